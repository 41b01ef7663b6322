//! Shared fixtures for tests and examples.
//!
//! These grammars pin down the behaviors the rest of the crate is tested
//! against; building them here keeps unit and integration tests from
//! re-declaring the same rules.

pub mod grammars {
    use crate::grammar::{Grammar, GrammarBuilder, Terminal};
    use crate::lexer::{CharSet, Pattern};

    /// `expression -> NUMBER | expression ADD NUMBER`
    ///
    /// Operator-precedence and simple-precedence eligible, never weak,
    /// functions available in both classes.
    #[must_use]
    pub fn addition() -> Grammar {
        match GrammarBuilder::new("addition")
            .terminal(Terminal::new("NUMBER", Pattern::some(CharSet::digits())))
            .terminal(Terminal::literal("ADD", "+"))
            .rule("expression", &["NUMBER"])
            .rule("expression", &["expression", "ADD", "NUMBER"])
            .build()
        {
            Ok(grammar) => grammar,
            Err(err) => unreachable!("fixture grammar must build: {err}"),
        }
    }

    /// `S -> a S b | c`
    ///
    /// A non-weak simple-precedence grammar whose relation graph is
    /// acyclic, so both lookup paths exist.
    #[must_use]
    pub fn balanced() -> Grammar {
        match GrammarBuilder::new("balanced")
            .terminal(Terminal::literal("a", "a"))
            .terminal(Terminal::literal("b", "b"))
            .terminal(Terminal::literal("c", "c"))
            .rule("S", &["a", "S", "b"])
            .rule("S", &["c"])
            .build()
        {
            Ok(grammar) => grammar,
            Err(err) => unreachable!("fixture grammar must build: {err}"),
        }
    }

    /// `expression -> expression ADD term | term`,
    /// `term -> term MUL factor | factor`
    ///
    /// The classic two-level arithmetic grammar: clean as
    /// operator-precedence, weak as simple-precedence (ADD relates to term
    /// as both less-than and equals).
    #[must_use]
    pub fn weak_arithmetic() -> Grammar {
        match GrammarBuilder::new("weak-arithmetic")
            .terminal(Terminal::literal("ADD", "+"))
            .terminal(Terminal::literal("MUL", "*"))
            .terminal(Terminal::new("factor", Pattern::some(CharSet::digits())))
            .rule("expression", &["expression", "ADD", "term"])
            .rule("expression", &["term"])
            .rule("term", &["term", "MUL", "factor"])
            .rule("term", &["factor"])
            .build()
        {
            Ok(grammar) => grammar,
            Err(err) => unreachable!("fixture grammar must build: {err}"),
        }
    }

    /// `A -> a B`, `B -> A b`
    ///
    /// Crossed recursion relating `a` to `b` in both directions: fails
    /// operator-precedence table construction, classifies as
    /// simple-precedence.
    #[must_use]
    pub fn crossed() -> Grammar {
        match GrammarBuilder::new("crossed")
            .terminal(Terminal::literal("a", "a"))
            .terminal(Terminal::literal("b", "b"))
            .rule("A", &["a", "B"])
            .rule("B", &["A", "b"])
            .start("A")
            .build()
        {
            Ok(grammar) => grammar,
            Err(err) => unreachable!("fixture grammar must build: {err}"),
        }
    }
}
