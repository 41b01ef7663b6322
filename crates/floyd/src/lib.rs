//! # Floyd
//!
//! Precedence-based shift-reduce parsing for operator grammars.
//!
//! ## Overview
//!
//! Given a context-free grammar in operator shape (no empty right-hand
//! sides, no two adjacent non-terminals), this crate:
//!
//! - validates and classifies it as operator-precedence or
//!   simple-precedence,
//! - builds a conflict-free precedence relation table between symbols,
//!   tolerating exactly one kind of conflict (the weak `less-than`/`equals`
//!   merge, simple-precedence only),
//! - optionally compresses the table into two integer-valued precedence
//!   functions via a longest-path pass over the fused relation graph,
//! - tokenizes input by greedy longest match over the grammar's terminals,
//! - and parses by a shift-reduce loop, producing the reduction-ordered
//!   list of raw symbols (operator variant) or identified productions
//!   (simple variant), from which derivations and parse trees can be
//!   rebuilt.
//!
//! Grammar, table and functions are built once and are immutable; each
//! parse call owns its own stack and output, so one parser can serve any
//! number of inputs.
//!
//! ## Quick start
//!
//! ```
//! use floyd::grammar::{ClassifiedGrammar, GrammarBuilder, Terminal};
//! use floyd::lexer::{CharSet, Pattern};
//! use floyd::parser::PrecedenceParser;
//!
//! let grammar = GrammarBuilder::new("addition")
//!     .terminal(Terminal::new("NUMBER", Pattern::some(CharSet::digits())))
//!     .terminal(Terminal::literal("ADD", "+"))
//!     .rule("expression", &["NUMBER"])
//!     .rule("expression", &["expression", "ADD", "NUMBER"])
//!     .build()?;
//!
//! let classified = ClassifiedGrammar::operator_precedence(grammar)?;
//! let parser = PrecedenceParser::new(classified);
//!
//! let output = parser.parse("2+3")?;
//! let texts: Vec<&str> = output
//!     .as_symbols()
//!     .unwrap()
//!     .iter()
//!     .map(|symbol| symbol.text())
//!     .collect();
//! assert_eq!(texts, vec!["2", "3", "+"]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Modules
//!
//! - [`grammar`] - symbols, productions, validation, FIRST/LAST sets and
//!   classification
//! - [`precedence`] - the relation table and precedence functions
//! - [`lexer`] - greedy longest-match tokenization
//! - [`parser`] - the shift-reduce engine for both variants
//! - [`error`] - failure types per family
//! - [`testing`] - shared fixture grammars

pub mod error;
pub mod grammar;
pub mod lexer;
pub mod parser;
pub mod precedence;
pub mod testing;

pub use error::{ClassifyError, FunctionsError, GrammarError, LexerError, ParseError, TableError};
pub use grammar::{
    classify, ClassifiedGrammar, Grammar, GrammarBuilder, GrammarClass, NonTerminal,
    PrecedenceVariant, Production, Symbol, SymbolSets, Terminal,
};
pub use lexer::{CharSet, Lexeme, Lexer, Pattern};
pub use parser::{ParseOutput, PrecedenceParser, StackSymbol};
pub use precedence::{PrecedenceFunctions, PrecedenceTable, Relation};
