//! A macro expansion engine for a C preprocessor: `#define`/`#undef`,
//! object-like and function-like macros, argument substitution,
//! stringification (`#`), token pasting (`##`), self-recursion
//! prohibition, and a fixed set of built-in macros.
//!
//! This crate is deliberately narrow: tokenizing a whole translation unit,
//! parsing directives (`#if`, `#include`, ...), and file/line tracking
//! across includes are all collaborators a caller supplies, not
//! responsibilities of this crate. See [`engine::SourceContext`] for the
//! one piece of external state macro expansion actually consumes.
//!
//! ```
//! use cpp_macro_engine::engine::{Engine, StaticContext};
//! use cpp_macro_engine::macro_def::Macro;
//! use cpp_macro_engine::token::{NumberLiteral, NumberValue, Token, TokenKind};
//!
//! let mut engine = Engine::new(StaticContext::new("demo.c"));
//! let foo = engine.intern("FOO");
//! let body = Token::new(TokenKind::Number(NumberLiteral {
//!     text: engine.intern("42"),
//!     value: NumberValue::Signed(42),
//! }));
//! engine.define(Macro::object_like(foo, vec![body])).unwrap();
//!
//! let input = vec![Token::new(TokenKind::Identifier(foo))];
//! let output = engine.expand(input).unwrap();
//! assert_eq!(output.len(), 1);
//! ```

pub mod args;
pub mod builtins;
pub mod engine;
pub mod error;
pub mod expand;
pub mod intern;
pub mod macro_def;
pub mod paste;
pub mod stack;
pub mod stringify;
pub mod table;
pub mod token;
pub mod tokenize;

pub use engine::Engine;
pub use error::{PreprocessError, Result};
pub use macro_def::Macro;
pub use token::{Token, TokenKind};
