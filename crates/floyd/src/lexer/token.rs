use crate::grammar::{Symbol, Terminal};
use compact_str::CompactString;
use std::fmt;

/// One matched occurrence of a terminal in the input.
///
/// Carries the matched text, the owning terminal, the 1-based count of how
/// many times that terminal has been seen so far in the scan, and the byte
/// offset of the match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexeme {
    text: CompactString,
    terminal: Terminal,
    occurrence: usize,
    offset: usize,
}

impl Lexeme {
    #[must_use]
    pub fn new(
        text: impl Into<CompactString>,
        terminal: Terminal,
        occurrence: usize,
        offset: usize,
    ) -> Self {
        Self {
            text: text.into(),
            terminal,
            occurrence,
            offset,
        }
    }

    /// The matched input text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The terminal this lexeme instantiates.
    #[must_use]
    pub const fn terminal(&self) -> &Terminal {
        &self.terminal
    }

    /// 1-based occurrence index of the terminal within the scan.
    #[must_use]
    pub const fn occurrence(&self) -> usize {
        self.occurrence
    }

    /// Byte offset of the match in the scanned input.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// The underlying grammar symbol, for table lookups.
    #[must_use]
    pub fn symbol(&self) -> Symbol {
        Symbol::Terminal(self.terminal.clone())
    }
}

impl fmt::Display for Lexeme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
