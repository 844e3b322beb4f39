//! The paste engine: in-place resolution of `##` operators.
//!
//! `['foo', '##', '_f', '##', 'u', '##', 'nc']` becomes `['foo_func']`.

use crate::error::{PasteBoundary, PreprocessError, Result};
use crate::intern::Interner;
use crate::token::{Token, TokenKind};
use crate::tokenize;

/// Fuses every `left ## right` pair in `list` by concatenating their
/// spellings and re-tokenizing. Chained pastes (`a ## b ## c`) fold
/// left-to-right because the fused token immediately becomes the next
/// iteration's left operand.
pub fn resolve_pastes(list: Vec<Token>, interner: &mut Interner) -> Result<Vec<Token>> {
    if list.is_empty() {
        return Ok(list);
    }
    if matches!(list[0].kind, TokenKind::TokenPaste) {
        log::error!("token paste operator at the start of a replacement list");
        return Err(PreprocessError::PasteAtBoundary(PasteBoundary::Start));
    }
    if matches!(list[list.len() - 1].kind, TokenKind::TokenPaste) {
        log::error!("token paste operator at the end of a replacement list");
        return Err(PreprocessError::PasteAtBoundary(PasteBoundary::End));
    }

    let mut result: Vec<Token> = Vec::with_capacity(list.len());
    let mut iter = list.into_iter().peekable();

    while let Some(tok) = iter.next() {
        if matches!(tok.kind, TokenKind::TokenPaste) {
            // Boundary checks above guarantee a previous token was already
            // pushed and a next token exists.
            let left = result.pop().expect("paste has a left operand");
            let right = iter.next().expect("paste has a right operand");
            let fused = paste(left, right, interner)?;
            result.push(fused);
        } else {
            result.push(tok);
        }
    }

    Ok(result)
}

fn paste(left: Token, right: Token, interner: &mut Interner) -> Result<Token> {
    let left_spelling = left.spelling(interner);
    let right_spelling = right.spelling(interner);
    let concatenated = format!("{}{}", left_spelling, right_spelling);

    let tokens = tokenize::lex_all(&concatenated, interner);
    let tokens = match tokens {
        Some(tokens) if tokens.len() == 1 => tokens,
        _ => {
            log::error!(
                "invalid token resulting from pasting '{}' and '{}'",
                left_spelling,
                right_spelling
            );
            return Err(PreprocessError::InvalidPasteResult {
                left: left_spelling,
                right: right_spelling,
            });
        }
    };

    let mut fused = tokens[0];
    fused.leading_whitespace = left.leading_whitespace;
    Ok(fused)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{NumberLiteral, NumberValue};

    fn ident(interner: &mut Interner, text: &str) -> Token {
        Token::new(TokenKind::Identifier(interner.intern(text)))
    }

    #[test]
    fn pastes_two_identifiers_into_one() {
        let mut interner = Interner::new();
        let list = vec![ident(&mut interner, "foo"), Token::new(TokenKind::TokenPaste), ident(&mut interner, "_bar")];
        let result = resolve_pastes(list, &mut interner).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].spelling(&interner), "foo_bar");
    }

    #[test]
    fn chained_pastes_fold_left_to_right() {
        let mut interner = Interner::new();
        let list = vec![
            ident(&mut interner, "foo"),
            Token::new(TokenKind::TokenPaste),
            ident(&mut interner, "_f"),
            Token::new(TokenKind::TokenPaste),
            ident(&mut interner, "unc"),
        ];
        let result = resolve_pastes(list, &mut interner).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].spelling(&interner), "foo_func");
    }

    #[test]
    fn paste_at_start_is_an_error() {
        let mut interner = Interner::new();
        let list = vec![Token::new(TokenKind::TokenPaste), ident(&mut interner, "x")];
        let err = resolve_pastes(list, &mut interner).unwrap_err();
        assert!(matches!(
            err,
            PreprocessError::PasteAtBoundary(PasteBoundary::Start)
        ));
    }

    #[test]
    fn paste_at_end_is_an_error() {
        let mut interner = Interner::new();
        let list = vec![ident(&mut interner, "x"), Token::new(TokenKind::TokenPaste)];
        let err = resolve_pastes(list, &mut interner).unwrap_err();
        assert!(matches!(
            err,
            PreprocessError::PasteAtBoundary(PasteBoundary::End)
        ));
    }

    #[test]
    fn pasting_two_numbers_preserves_value() {
        let mut interner = Interner::new();
        let left = Token::new(TokenKind::Number(NumberLiteral {
            text: interner.intern("1"),
            value: NumberValue::Signed(1),
        }));
        let list = vec![left, Token::new(TokenKind::TokenPaste), {
            let sym = interner.intern("2");
            Token::new(TokenKind::Number(NumberLiteral {
                text: sym,
                value: NumberValue::Signed(2),
            }))
        }];
        let result = resolve_pastes(list, &mut interner).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].spelling(&interner), "12");
    }

    #[test]
    fn invalid_paste_result_is_an_error() {
        let mut interner = Interner::new();
        // Pasting `+` and `+` yields `++`, a single valid token (Increment);
        // pasting `(` and `)` yields `()`, which lexes to two tokens and
        // must be rejected.
        let list = vec![
            Token::new(TokenKind::OpenParen),
            Token::new(TokenKind::TokenPaste),
            Token::new(TokenKind::CloseParen),
        ];
        let err = resolve_pastes(list, &mut interner).unwrap_err();
        assert!(matches!(err, PreprocessError::InvalidPasteResult { .. }));
    }
}
