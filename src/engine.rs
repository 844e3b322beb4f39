//! The `Engine`: the explicit value every operation threads through. No
//! process-wide globals: the macro table, expansion stack, and interner are
//! all owned fields of one value, so two engines never interfere with each
//! other and nothing needs a lazy-init guard.

use std::borrow::Cow;
use std::cell::Cell;

use crate::args;
use crate::builtins;
use crate::error::Result;
use crate::expand::{self, ExpandCtx};
use crate::intern::{Interner, Symbol};
use crate::macro_def::Macro;
use crate::stack::ExpansionStack;
use crate::table::MacroTable;
use crate::token::Token;

/// The two synchronous pure accessors the engine consumes from its driver:
/// the current source line (for `__LINE__`) and the current
/// file path (for `__FILE__`). Both collaborators are out of scope for this
/// crate — no I/O, no parsing — so they are modeled as a trait the caller
/// implements however its own line-tracking works.
pub trait SourceContext {
    fn current_file_line(&self) -> i64;
    fn current_file_path(&self) -> &str;
}

/// A trivial [`SourceContext`] useful for tests and small demos: a fixed
/// file path and a line counter the caller can bump between top-level
/// expansions.
#[derive(Debug)]
pub struct StaticContext {
    path: String,
    line: Cell<i64>,
}

impl StaticContext {
    pub fn new(path: impl Into<String>) -> Self {
        StaticContext {
            path: path.into(),
            line: Cell::new(1),
        }
    }

    pub fn set_line(&self, line: i64) {
        self.line.set(line);
    }
}

impl SourceContext for StaticContext {
    fn current_file_line(&self) -> i64 {
        self.line.get()
    }

    fn current_file_path(&self) -> &str {
        &self.path
    }
}

/// Bundles the macro table, expansion stack, and interner for one
/// preprocessing session, plus the caller-supplied [`SourceContext`]. Not
/// `Sync` — the macro table and expansion stack are exclusively owned,
/// single-session state — only one thread may drive an `Engine` at a time,
/// though the whole value may be handed to a worker thread (it is `Send`).
#[derive(Debug)]
pub struct Engine<C: SourceContext> {
    pub(crate) table: MacroTable,
    pub(crate) stack: ExpansionStack,
    pub(crate) interner: Interner,
    pub(crate) context: C,
}

impl<C: SourceContext> Engine<C> {
    pub fn new(context: C) -> Self {
        Engine {
            table: MacroTable::new(),
            stack: ExpansionStack::new(),
            interner: Interner::new(),
            context,
        }
    }

    pub fn intern(&mut self, text: &str) -> Symbol {
        self.interner.intern(text)
    }

    pub fn resolve(&self, sym: Symbol) -> &str {
        self.interner.resolve(sym)
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    /// Inserts `m`, applying the redefinition-equivalence check.
    pub fn define(&mut self, m: Macro) -> Result<()> {
        self.table.define(m, &self.interner)
    }

    pub fn undef(&mut self, name: Symbol) {
        self.table.undef(name)
    }

    /// Looks up `name` with no `__LINE__` rewriting, for `#ifdef`-style
    /// collaborators that only need to know whether a name is defined,
    /// without triggering expansion or the on-read `__LINE__` rewrite that
    /// `expand` applies. Returns `Cow::Borrowed` always: unlike `expand`'s
    /// internal lookups, this path never needs an owned, rewritten copy.
    pub fn definition(&self, name: Symbol) -> Option<Cow<'_, Macro>> {
        self.table.definition(name).map(Cow::Borrowed)
    }

    /// Populates the table with the fixed set of builtins.
    /// Idempotent: calling this twice redefines every builtin with an
    /// identical replacement, which `define`'s equivalence check accepts.
    pub fn register_builtin_definitions(&mut self) -> Result<()> {
        builtins::register_builtin_definitions(self)
    }

    /// Top-level fixed-point expansion.
    pub fn expand(&mut self, tokens: Vec<Token>) -> Result<Vec<Token>> {
        let mut ctx = ExpandCtx {
            table: &mut self.table,
            interner: &mut self.interner,
            context: &self.context,
        };
        expand::expand(&mut ctx, &mut self.stack, tokens)
    }

    /// Reads actual arguments for a function-like invocation starting at
    /// `pos` in `tokens`, exposed for collaborators (e.g. a
    /// directive parser validating a macro call's arity) that need the
    /// same splitting logic the expander uses internally.
    pub fn read_args(
        &self,
        tokens: &[Token],
        pos: usize,
        params: u32,
    ) -> Result<(Vec<Vec<Token>>, usize)> {
        args::read_args(tokens, pos, params)
    }
}
