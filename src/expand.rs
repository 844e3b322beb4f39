//! The expander: top-level fixed-point rescan and single-macro
//! substitution (parameter expansion, stringify, paste, rescan).
//!
//! The top-level and per-macro passes take a split view of the engine's
//! state — `stack: &mut ExpansionStack` alongside `ctx: &mut ExpandCtx` —
//! rather than a single `&mut Engine`, so that
//! [`ExpansionGuard`](crate::stack::ExpansionGuard) can hold the stack borrow
//! for an entire substitution while the same call still recurses back into
//! `expand` for argument pre-expansion and final rescan.

use crate::args;
use crate::engine::SourceContext;
use crate::error::Result;
use crate::intern::Interner;
use crate::macro_def::{Macro, MacroKind};
use crate::paste;
use crate::stack::{ExpansionGuard, ExpansionStack};
use crate::stringify;
use crate::table::MacroTable;
use crate::token::{Token, TokenKind};

/// The pieces of an `Engine` a substitution needs that are *not* the
/// expansion stack: the table (to look up nested invocations), the interner
/// (to build stringified/pasted tokens), and the source context (for
/// `__LINE__`). Kept separate from `stack` so the two can be borrowed
/// independently.
pub struct ExpandCtx<'a, C: SourceContext> {
    pub table: &'a mut MacroTable,
    pub interner: &'a mut Interner,
    pub context: &'a C,
}

/// A cheap pre-check: does `tokens` contain any identifier that currently
/// resolves to an unblocked macro? A `false` here guarantees `expand` would
/// return `tokens` unchanged, so callers (and `expand` itself, recursively)
/// can skip the rewrite entirely. A `false positive` (returning `true` when
/// the identifier turns out not to be invoked, e.g. a function-like macro
/// with no following `(`) only costs a wasted full pass, never an incorrect
/// result.
fn needs_expansion<C: SourceContext>(ctx: &mut ExpandCtx<C>, stack: &ExpansionStack, tokens: &[Token]) -> bool {
    let current_line = ctx.context.current_file_line();
    tokens.iter().any(|tok| match tok.as_identifier() {
        Some(sym) => ctx
            .table
            .lookup(sym, current_line, ctx.interner)
            .map_or(false, |_| !stack.contains(sym)),
        None => false,
    })
}

/// Rewrites `tokens` to a fixed point under macro expansion.
pub fn expand<C: SourceContext>(
    ctx: &mut ExpandCtx<C>,
    stack: &mut ExpansionStack,
    tokens: Vec<Token>,
) -> Result<Vec<Token>> {
    if !needs_expansion(ctx, stack, &tokens) {
        return Ok(tokens);
    }

    let mut result = Vec::with_capacity(tokens.len());
    let mut i = 0;
    while i < tokens.len() {
        let tok = tokens[i];
        let sym = match tok.as_identifier() {
            Some(sym) => sym,
            None => {
                result.push(tok);
                i += 1;
                continue;
            }
        };

        let current_line = ctx.context.current_file_line();
        let def = match ctx.table.lookup(sym, current_line, ctx.interner) {
            Some(def) if !stack.contains(sym) => def.into_owned(),
            _ => {
                result.push(tok);
                i += 1;
                continue;
            }
        };

        let (args, next_i) = match def.kind {
            MacroKind::ObjectLike => (Vec::new(), i + 1),
            MacroKind::FunctionLike => {
                if !matches!(tokens.get(i + 1).map(|t| t.kind), Some(TokenKind::OpenParen)) {
                    // Not invoked: a function-like macro's name with no
                    // following `(` is an ordinary identifier.
                    result.push(tok);
                    i += 1;
                    continue;
                }
                args::read_args(&tokens, i + 1, def.params)?
            }
        };

        let mut substituted = expand_macro(ctx, stack, &def, args)?;
        if let Some(first) = substituted.first_mut() {
            first.leading_whitespace = tok.leading_whitespace;
        }
        result.extend(substituted);
        i = next_i;
    }

    Ok(result)
}

/// Substitutes a single invocation of `def` given its already-split actual
/// arguments: parameters expand before substitution, `#param`
/// stringifies the raw (unexpanded) argument, `##` pastes after
/// substitution, and the whole result is rescanned for further expansion
/// with `def.name` pushed onto the expansion stack for the duration.
fn expand_macro<C: SourceContext>(
    ctx: &mut ExpandCtx<C>,
    stack: &mut ExpansionStack,
    def: &Macro,
    args: Vec<Vec<Token>>,
) -> Result<Vec<Token>> {
    let _guard = ExpansionGuard::enter(stack, def.name);

    let mut substituted = Vec::with_capacity(def.replacement.len());
    let mut i = 0;
    while i < def.replacement.len() {
        let tok = def.replacement[i];
        match tok.kind {
            TokenKind::Hash => {
                if let Some(TokenKind::Param(index)) = def.replacement.get(i + 1).map(|t| t.kind) {
                    let raw = &args[index as usize];
                    substituted.push(stringify::stringify(raw, ctx.interner));
                    i += 2;
                    continue;
                }
                substituted.push(tok);
            }
            TokenKind::Param(index) => {
                let raw = args[index as usize].clone();
                log::trace!("expanding argument {} before substitution", index);
                let expanded = expand(ctx, stack, raw)?;
                substituted.extend(expanded);
            }
            _ => substituted.push(tok),
        }
        i += 1;
    }

    log::debug!("resolving token pastes in substitution of a macro invocation");
    let pasted = paste::resolve_pastes(substituted, ctx.interner)?;

    log::trace!("rescanning substitution result for further expansion");
    expand(ctx, stack, pasted)
}
