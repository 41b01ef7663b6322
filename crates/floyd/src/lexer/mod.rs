//! # Lexer
//!
//! Greedy longest-match tokenization over a grammar's terminal set.
//!
//! Terminals carry an interpreted [`Pattern`]; the [`Lexer`] asks every
//! terminal for its longest matching prefix at the current position and
//! consumes the winner (maximal munch). Equal-length ties resolve by
//! terminal declaration order. Each produced [`Lexeme`] records its text,
//! terminal, byte offset, and a running 1-based per-terminal occurrence
//! index.

pub mod pattern;
pub mod stream;
pub mod token;

pub use pattern::{CharSet, Pattern};
pub use stream::Lexer;
pub use token::Lexeme;
