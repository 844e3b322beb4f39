//! The expansion stack: the ordered set of macro names
//! currently being rescanned, used to suppress self-recursion.
//!
//! A plain `Vec<Symbol>` guarded by [`ExpansionGuard`], an RAII scope guard
//! that pops on `Drop` so a `?` early-return during substitution can never
//! leave a stale entry behind — the same ownership discipline applied
//! elsewhere in this crate to token lists, applied here to stack discipline
//! instead.

use crate::intern::Symbol;

#[derive(Default, Debug)]
pub struct ExpansionStack {
    names: Vec<Symbol>,
}

impl ExpansionStack {
    pub fn new() -> Self {
        ExpansionStack::default()
    }

    pub fn contains(&self, name: Symbol) -> bool {
        self.names.contains(&name)
    }

    fn push(&mut self, name: Symbol) {
        debug_assert!(!self.contains(name), "macro already on expansion stack");
        self.names.push(name);
    }

    fn pop(&mut self) {
        debug_assert!(!self.names.is_empty(), "pop of empty expansion stack");
        self.names.pop();
    }
}

/// Pushes `name` on construction, pops it on `Drop`. Holding one of these
/// for the duration of a substitution is what makes the self-recursion
/// prohibition exception-safe (here, `?`-safe).
pub struct ExpansionGuard<'a> {
    stack: &'a mut ExpansionStack,
}

impl<'a> ExpansionGuard<'a> {
    pub fn enter(stack: &'a mut ExpansionStack, name: Symbol) -> Self {
        stack.push(name);
        ExpansionGuard { stack }
    }
}

impl Drop for ExpansionGuard<'_> {
    fn drop(&mut self) {
        self.stack.pop();
    }
}
