use crate::lexer::Pattern;
use compact_str::CompactString;
use std::fmt;
use std::hash::{Hash, Hasher};

/// The reserved character delimiting the start and end of every input
/// stream for precedence comparison purposes.
pub const BOUNDARY_CHAR: char = '$';

/// The boundary marker's symbol name.
pub const BOUNDARY_NAME: &str = "$";

/// A terminal symbol: a name plus the pattern used to match it in input.
///
/// Terminals are value identities: equality and hashing use the name only,
/// so two terminals with the same name are the same symbol no matter how
/// their patterns are spelled.
#[derive(Debug, Clone)]
pub struct Terminal {
    name: CompactString,
    pattern: Pattern,
}

impl Terminal {
    #[must_use]
    pub fn new(name: impl Into<CompactString>, pattern: Pattern) -> Self {
        Self {
            name: name.into(),
            pattern,
        }
    }

    /// A terminal whose pattern is its own fixed text.
    #[must_use]
    pub fn literal(name: impl Into<CompactString>, text: impl Into<CompactString>) -> Self {
        let text = text.into();
        Self::new(name, Pattern::Literal(text))
    }

    /// The implicit end-of-input marker, added to every grammar.
    #[must_use]
    pub fn boundary() -> Self {
        Self::literal(BOUNDARY_NAME, BOUNDARY_NAME)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    #[must_use]
    pub fn is_boundary(&self) -> bool {
        self.name == BOUNDARY_NAME
    }

    /// Length in bytes of the longest prefix of `input` this terminal
    /// matches; `0` means no match.
    #[must_use]
    pub fn match_len(&self, input: &str) -> usize {
        self.pattern.longest_match(input).unwrap_or(0)
    }
}

impl PartialEq for Terminal {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Terminal {}

impl Hash for Terminal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A non-terminal symbol, identified by name alone.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonTerminal {
    name: CompactString,
}

impl NonTerminal {
    #[must_use]
    pub fn new(name: impl Into<CompactString>) -> Self {
        Self { name: name.into() }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for NonTerminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Either side of the terminal/non-terminal split.
///
/// Equality is by name and variant: a terminal and a non-terminal sharing a
/// name are still different symbols.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Symbol {
    Terminal(Terminal),
    NonTerminal(NonTerminal),
}

impl Symbol {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Terminal(t) => t.name(),
            Self::NonTerminal(n) => n.name(),
        }
    }

    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Terminal(_))
    }

    #[must_use]
    pub const fn is_non_terminal(&self) -> bool {
        matches!(self, Self::NonTerminal(_))
    }

    #[must_use]
    pub const fn as_terminal(&self) -> Option<&Terminal> {
        match self {
            Self::Terminal(t) => Some(t),
            Self::NonTerminal(_) => None,
        }
    }

    #[must_use]
    pub const fn as_non_terminal(&self) -> Option<&NonTerminal> {
        match self {
            Self::NonTerminal(n) => Some(n),
            Self::Terminal(_) => None,
        }
    }
}

impl From<Terminal> for Symbol {
    fn from(terminal: Terminal) -> Self {
        Self::Terminal(terminal)
    }
}

impl From<NonTerminal> for Symbol {
    fn from(non_terminal: NonTerminal) -> Self {
        Self::NonTerminal(non_terminal)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::CharSet;

    #[test]
    fn terminal_equality_ignores_the_pattern() {
        let by_digits = Terminal::new("NUMBER", Pattern::some(CharSet::digits()));
        let by_literal = Terminal::literal("NUMBER", "0");
        assert_eq!(by_digits, by_literal);

        let other = Terminal::literal("ADD", "+");
        assert_ne!(by_digits, other);
    }

    #[test]
    fn symbol_variants_with_the_same_name_differ() {
        let terminal = Symbol::from(Terminal::literal("x", "x"));
        let non_terminal = Symbol::from(NonTerminal::new("x"));
        assert_ne!(terminal, non_terminal);
        assert_eq!(terminal.name(), non_terminal.name());
    }

    #[test]
    fn boundary_marker_matches_the_reserved_character() {
        let marker = Terminal::boundary();
        assert!(marker.is_boundary());
        assert_eq!(marker.match_len("$rest"), 1);
        assert_eq!(marker.match_len("x"), 0);
    }

    #[test]
    fn match_len_reports_the_longest_prefix() {
        let number = Terminal::new("NUMBER", Pattern::some(CharSet::digits()));
        assert_eq!(number.match_len("123+4"), 3);
        assert_eq!(number.match_len("+123"), 0);
    }
}
