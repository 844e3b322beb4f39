//! The macro table: a plain owned value threaded through by `&mut self`,
//! never a process-wide hash table behind a lazy-init guard.

use std::borrow::Cow;
use std::collections::HashMap;

use crate::error::{PreprocessError, Result};
use crate::intern::{Interner, Symbol};
use crate::macro_def::{macro_eq, Macro};
use crate::token::{NumberLiteral, NumberValue, TokenKind};

#[derive(Default, Debug)]
pub struct MacroTable {
    definitions: HashMap<Symbol, Macro>,
    line_symbol: Option<Symbol>,
}

impl MacroTable {
    pub fn new() -> Self {
        MacroTable::default()
    }

    /// Must be called once with the `__LINE__` symbol before `lookup` can
    /// recognize it for the on-read virtual replacement. The engine
    /// does this during `register_builtin_definitions`.
    pub fn set_line_symbol(&mut self, sym: Symbol) {
        self.line_symbol = Some(sym);
    }

    /// Insert `m` under `m.name`. If a macro is already defined under that
    /// name, the new definition is accepted silently iff it is structurally
    /// equivalent; otherwise this fails with `RedefinitionMismatch`
    /// and the table is left unchanged. `interner` is consulted only to
    /// spell out the macro's name in the diagnostic; it never affects
    /// whether the definition is accepted.
    pub fn define(&mut self, m: Macro, interner: &Interner) -> Result<()> {
        if let Some(existing) = self.definitions.get(&m.name) {
            if macro_eq(existing, &m) {
                return Ok(());
            }
            let name = interner.resolve(m.name).to_string();
            log::error!("redefinition of macro '{}' with a different substitution", name);
            return Err(PreprocessError::RedefinitionMismatch { name });
        }
        self.definitions.insert(m.name, m);
        Ok(())
    }

    /// Looks up `name`, returning the `__LINE__` macro's replacement
    /// rewritten to reflect `current_line` without ever mutating the stored
    /// entry (see DESIGN.md: "model as virtual replacement
    /// computed on lookup rather than mutation of shared state"). The
    /// rewritten token's spelling is re-interned from `current_line` too, not
    /// just its numeric payload — `paste`/`stringify` read spelling through
    /// `text`, so a lookup that updated only `value` would leave `__LINE__`
    /// pasting or stringifying to its stale initial spelling (`"0"`).
    pub fn lookup(&self, name: Symbol, current_line: i64, interner: &mut Interner) -> Option<Cow<'_, Macro>> {
        let found = self.definitions.get(&name)?;
        if Some(name) == self.line_symbol {
            let mut rewritten = found.clone();
            if let Some(tok) = rewritten.replacement.first_mut() {
                if let TokenKind::Number(NumberLiteral { .. }) = tok.kind {
                    let text = interner.intern(&current_line.to_string());
                    tok.kind = TokenKind::Number(NumberLiteral {
                        text,
                        value: NumberValue::Signed(current_line),
                    });
                }
            }
            return Some(Cow::Owned(rewritten));
        }
        Some(Cow::Borrowed(found))
    }

    /// Looks up `name` without any `__LINE__` rewriting, for collaborators
    /// (e.g. `#ifdef`) that only need to know whether a macro exists.
    pub fn definition(&self, name: Symbol) -> Option<&Macro> {
        self.definitions.get(&name)
    }

    pub fn undef(&mut self, name: Symbol) {
        self.definitions.remove(&name);
    }
}
