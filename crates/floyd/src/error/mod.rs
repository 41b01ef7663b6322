//! # Error Types
//!
//! Failure families for grammar construction, classification, table and
//! function generation, lexing and parsing.
//!
//! Construction-time failures ([`GrammarError`], [`TableError`]) are fatal to
//! obtaining a usable parser. [`FunctionsError::Cycle`] is recoverable: the
//! caller keeps the table and parses through direct lookups. [`LexerError`]
//! and [`ParseError`] abort only the parse call that raised them; the
//! grammar, table and functions stay valid for later calls.

use crate::precedence::Relation;
use thiserror::Error;

#[cfg(feature = "diagnostics")]
use miette::Diagnostic;

/// Structural grammar validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "diagnostics", derive(Diagnostic))]
pub enum GrammarError {
    #[error("grammar has no terminals")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(grammar::empty_terminals)))]
    EmptyTerminals,

    #[error("grammar has no productions")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(grammar::empty_productions)))]
    EmptyProductions,

    #[error("production for '{lhs}' has an empty right-hand side")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(grammar::empty_rhs)))]
    EmptyRhs { lhs: String },

    #[error("non-terminal '{name}' is used but never defined as a rule head")]
    #[cfg_attr(
        feature = "diagnostics",
        diagnostic(code(grammar::undefined_non_terminal))
    )]
    UndefinedNonTerminal { name: String },

    #[error("no start symbol: every non-terminal appears in some right-hand side")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(grammar::missing_start)))]
    MissingStartSymbol,

    #[error("ambiguous start symbol, candidates: {}", candidates.join(", "))]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(grammar::ambiguous_start)))]
    AmbiguousStartSymbol { candidates: Vec<String> },

    #[error("'{name}' is reserved for the input boundary marker")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(grammar::reserved_name)))]
    ReservedBoundaryName { name: String },

    #[error("rule head '{name}' is already declared as a terminal")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(grammar::terminal_rule_head)))]
    TerminalAsRuleHead { name: String },

    #[error(
        "production for '{lhs}' places non-terminals '{left}' and '{right}' next to each other"
    )]
    #[cfg_attr(
        feature = "diagnostics",
        diagnostic(code(grammar::adjacent_non_terminals))
    )]
    AdjacentNonTerminals {
        lhs: String,
        left: String,
        right: String,
    },

    #[error("productions for '{first}' and '{second}' share the same right-hand side")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(grammar::duplicate_rhs)))]
    DuplicateRhs { first: String, second: String },
}

/// Unresolvable relation conflict while building a precedence table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "diagnostics", derive(Diagnostic))]
pub enum TableError {
    #[error("conflicting relations {existing} and {incoming} between '{left}' and '{right}'")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(table::conflict)))]
    Conflict {
        left: String,
        right: String,
        existing: Relation,
        incoming: Relation,
    },
}

/// Why precedence functions could not be generated for a table.
///
/// A [`Cycle`](FunctionsError::Cycle) is recoverable: parsing falls back to
/// direct table lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "diagnostics", derive(Diagnostic))]
pub enum FunctionsError {
    #[error("precedence functions are undefined for weak tables")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(functions::weak_table)))]
    WeakTable,

    #[error("relation graph has a cycle through: {}", symbols.join(", "))]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(functions::cycle)))]
    Cycle { symbols: Vec<String> },
}

/// Grammar classification failure: either the grammar itself is out of
/// shape, or its precedence table cannot be built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "diagnostics", derive(Diagnostic))]
pub enum ClassifyError {
    #[error(transparent)]
    Grammar(#[from] GrammarError),

    #[error(transparent)]
    Table(#[from] TableError),
}

/// No terminal matches the input at the reported byte offset.
///
/// `preview` holds a bounded slice of the unmatched input, never the whole
/// remaining string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "diagnostics", derive(Diagnostic))]
#[error("no terminal matches input at byte {offset}: {preview:?}")]
#[cfg_attr(feature = "diagnostics", diagnostic(code(lexer::no_match)))]
pub struct LexerError {
    pub offset: usize,
    pub preview: String,
}

impl LexerError {
    #[must_use]
    pub const fn new(offset: usize, preview: String) -> Self {
        Self { offset, preview }
    }

    /// Byte offset of the first unmatched character.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }
}

/// A parse call failed; the parser itself remains usable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "diagnostics", derive(Diagnostic))]
pub enum ParseError {
    #[error(transparent)]
    Lexer(#[from] LexerError),

    /// No shift or reduce decision exists for the current stack top and
    /// lookahead.
    #[error("unexpected '{text}' at byte {offset}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(parser::unexpected_token)))]
    UnexpectedToken { text: String, offset: usize },

    /// A reduction popped a handle no production produces. This indicates a
    /// grammar/table mismatch, not bad input.
    #[error("no production matches the reduced handle ending at '{symbol}'")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(parser::reduction_mismatch)))]
    ReductionMismatch { symbol: String },
}

impl ParseError {
    /// Byte offset associated with the failure, when one exists.
    #[must_use]
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::Lexer(err) => Some(err.offset),
            Self::UnexpectedToken { offset, .. } => Some(*offset),
            Self::ReductionMismatch { .. } => None,
        }
    }
}
