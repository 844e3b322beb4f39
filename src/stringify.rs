//! The stringify engine: converts a token list to a single
//! `STRING` token.
//!
//! Whitespace rule, matching the GCC documentation: "All leading and
//! trailing whitespace in text being stringified is ignored. Any sequence
//! of whitespace in the middle of the text is converted to a single space
//! in the stringified result."
//!
//! Deliberately does **not** escape embedded `"` or `\` in the produced
//! payload; see DESIGN.md for why this crate accepts that deviation from
//! strict C11/C17 (which requires such escaping).

use crate::intern::Interner;
use crate::token::{Token, TokenKind};

/// Stringifies `list`, producing a `String` token whose payload is
/// `list`'s spellings joined per the whitespace rule above.
///
/// Panics (via `debug_assert!`) if `list` contains a `Newline` token: that
/// is a true design invariant (arguments never span a logical line), not a
/// condition a caller can trigger through normal macro use.
pub fn stringify(list: &[Token], interner: &mut Interner) -> Token {
    let mut buf = String::new();
    let mut emitted_any = false;

    for tok in list {
        debug_assert!(
            !matches!(tok.kind, TokenKind::Newline),
            "stringify input must not contain a NEWLINE token"
        );

        if emitted_any && tok.leading_whitespace > 0 {
            buf.push(' ');
        }
        buf.push_str(&spelling_for_stringify(tok, interner));
        emitted_any = true;
    }

    Token::new(TokenKind::String(interner.intern(&buf)))
}

/// Like `Token::spelling`, but without the quote-wrapping that
/// `TokenKind::String`'s general spelling applies — stringify wants the
/// *content* of a string token appearing inside another stringified
/// argument, not its quoted form.
fn spelling_for_stringify(tok: &Token, interner: &Interner) -> String {
    match tok.kind {
        TokenKind::String(sym) => interner.resolve(sym).to_string(),
        _ => tok.spelling(interner),
    }
}
