//! Lexer for the Garnet parser.
//!
//! The lexer is pulled one token at a time by the parser and is
//! context-sensitive in two ways:
//! - a [`LexState`] records what the previous token implies (`foo -1` vs
//!   `foo - 1`, `{` as block or hash, `do` after `while`), and the parser
//!   may override it where only it knows the answer (known locals);
//! - a mode stack tracks string-like literals, interpolation, and heredoc
//!   bodies, which are lexed out of line.
//!
//! Literal bodies are not processed here. [`unescape`] and the [`numeric`]
//! helpers compute values from token text when the parser builds nodes.

mod keywords;
mod lexer;
mod magic;
mod mode;
pub mod numeric;
mod state;
pub mod unescape;

pub use keywords::is_reserved;
pub use lexer::{LexOutput, Lexer, LexerOptions};
pub use mode::HeredocIndent;
pub use state::LexState;
pub use unescape::{unescape, Delimiters, EscapeError, ForcedEncoding, Strictness, Unescaped};
