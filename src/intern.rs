//! A canonical string interner backed by `string_interner`.
//!
//! Thin wrapper: `Interner` forwards to a `string_interner::StringInterner`,
//! and `Symbol` newtypes its `DefaultSymbol` so the rest of the crate only
//! ever sees this crate's own handle type, never the dependency's.

use string_interner::{DefaultSymbol, StringInterner};

/// A handle to an interned string. Two `Symbol`s are equal iff the strings
/// they were interned from are equal, by construction of [`Interner`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Symbol(DefaultSymbol);

/// Canonical string table. Owned by the [`Engine`](crate::engine::Engine);
/// never process-global.
#[derive(Default, Debug)]
pub struct Interner {
    inner: StringInterner,
}

impl Interner {
    pub fn new() -> Self {
        Interner::default()
    }

    /// Interns `text`, returning the existing `Symbol` if already seen.
    pub fn intern(&mut self, text: &str) -> Symbol {
        Symbol(self.inner.get_or_intern(text))
    }

    /// Resolves a `Symbol` back to its spelling.
    ///
    /// Panics if `sym` was not produced by this interner; a `Symbol` is only
    /// ever constructed by [`Interner::intern`], so this signals a bug (a
    /// symbol crossing between two distinct engines), not bad input.
    pub fn resolve(&self, sym: Symbol) -> &str {
        self.inner
            .resolve(sym.0)
            .expect("Symbol resolved against a different Interner than the one that produced it")
    }
}
