//! The built-in macro registrar.
//!
//! `parse` reads a declarative replacement-list body and recognizes `@` as
//! the placeholder for a formal parameter (here always parameter 0, the
//! only arity any builtin in this set needs).

use crate::engine::{Engine, SourceContext};
use crate::error::Result;
use crate::macro_def::Macro;
use crate::token::{Token, TokenKind};
use crate::tokenize;

/// Parses a declarative replacement-list body: every `@` becomes
/// `Param(0)`, everything else is delegated to the re-tokenizer. Returns
/// `None` if any non-`@` span fails to tokenize cleanly.
fn parse(body: &str, engine: &mut Engine<impl SourceContext>) -> Option<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut rest = body;
    while !rest.is_empty() {
        if let Some(stripped) = rest.strip_prefix('@') {
            tokens.push(Token::new(TokenKind::Param(0)));
            rest = stripped;
            continue;
        }
        let (tok, consumed) = tokenize::lex_one(rest, &mut engine.interner)?;
        if consumed == 0 {
            return None;
        }
        tokens.push(tok);
        rest = &rest[consumed..];
    }
    Some(tokens)
}

fn define_object(engine: &mut Engine<impl SourceContext>, name: &str, body: &str) -> Result<()> {
    let sym = engine.intern(name);
    let replacement = parse(body, engine).unwrap_or_default();
    engine.define(Macro::object_like(sym, replacement))
}

/// Inserts the fixed set of built-in macros a hosted C preprocessor carries
/// regardless of the translation unit it is processing. Idempotent: a
/// second call redefines every entry with an identical replacement list,
/// which `define`'s equivalence check accepts silently.
pub fn register_builtin_definitions(engine: &mut Engine<impl SourceContext>) -> Result<()> {
    define_object(engine, "__STDC_VERSION__", "199409L")?;
    define_object(engine, "__STDC__", "1")?;
    define_object(engine, "__STDC_HOSTED__", "1")?;

    let line_sym = engine.intern("__LINE__");
    let line_replacement = parse("0", engine).unwrap_or_default();
    engine.define(Macro::object_like(line_sym, line_replacement))?;
    engine.table.set_line_symbol(line_sym);

    let file_sym = engine.intern("__FILE__");
    let path = engine.context().current_file_path().to_string();
    let file_sym_text = engine.intern(&path);
    engine.define(Macro::object_like(
        file_sym,
        vec![Token::new(TokenKind::String(file_sym_text))],
    ))?;

    define_object(engine, "__x86_64__", "1")?;
    define_object(engine, "__inline", "")?;

    // va_list's four bookkeeping fields, zeroed out: gp_offset, fp_offset,
    // overflow_arg_area, reg_save_area. `@` stands for the single formal
    // parameter, the va_list object being ended.
    let va_end_name = engine.intern("__builtin_va_end");
    let va_end_body = "@[0].gp_offset=0;@[0].fp_offset=0;@[0].overflow_arg_area=(void*)0;@[0].reg_save_area=(void*)0;";
    let replacement = parse(va_end_body, engine).unwrap_or_default();
    debug_assert!(!replacement.is_empty(), "__builtin_va_end body must not be empty");
    debug_assert!(
        replacement
            .iter()
            .all(|t| !matches!(t.kind, TokenKind::Param(idx) if idx != 0)),
        "__builtin_va_end only ever references its single parameter"
    );
    engine.define(Macro::function_like(va_end_name, 1, replacement))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::StaticContext;
    use crate::token::NumberLiteral;

    #[test]
    fn registers_stdc_version_as_a_number() {
        let mut engine = Engine::new(StaticContext::new("test.c"));
        register_builtin_definitions(&mut engine).unwrap();
        let name = engine.intern("__STDC_VERSION__");
        let def = engine.definition(name).unwrap();
        assert_eq!(def.replacement.len(), 1);
        match def.replacement[0].kind {
            TokenKind::Number(NumberLiteral { .. }) => {}
            _ => panic!("expected a number token"),
        }
    }

    #[test]
    fn registers_file_as_the_context_path() {
        let mut engine = Engine::new(StaticContext::new("demo.c"));
        register_builtin_definitions(&mut engine).unwrap();
        let name = engine.intern("__FILE__");
        let def = engine.definition(name).unwrap();
        match def.replacement[0].kind {
            TokenKind::String(sym) => assert_eq!(engine.resolve(sym), "demo.c"),
            _ => panic!("expected a string token"),
        }
    }

    #[test]
    fn registers_inline_as_empty() {
        let mut engine = Engine::new(StaticContext::new("test.c"));
        register_builtin_definitions(&mut engine).unwrap();
        let name = engine.intern("__inline");
        let def = engine.definition(name).unwrap();
        assert!(def.replacement.is_empty());
    }

    #[test]
    fn registers_va_end_as_function_like_with_one_parameter() {
        let mut engine = Engine::new(StaticContext::new("test.c"));
        register_builtin_definitions(&mut engine).unwrap();
        let name = engine.intern("__builtin_va_end");
        let def = engine.definition(name).unwrap();
        assert_eq!(def.params, 1);
        assert!(!def.replacement.is_empty());
    }

    #[test]
    fn registering_twice_is_idempotent() {
        let mut engine = Engine::new(StaticContext::new("test.c"));
        register_builtin_definitions(&mut engine).unwrap();
        register_builtin_definitions(&mut engine).unwrap();
    }
}
