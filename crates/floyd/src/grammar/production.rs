use crate::error::GrammarError;
use crate::grammar::{NonTerminal, Symbol};
use smallvec::SmallVec;
use std::fmt;

/// A production rule: a non-terminal head and a non-empty ordered
/// right-hand side. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Production {
    lhs: NonTerminal,
    rhs: SmallVec<[Symbol; 4]>,
}

impl Production {
    /// Build a production, rejecting an empty right-hand side.
    pub fn new(
        lhs: NonTerminal,
        rhs: impl IntoIterator<Item = Symbol>,
    ) -> Result<Self, GrammarError> {
        let rhs: SmallVec<[Symbol; 4]> = rhs.into_iter().collect();
        if rhs.is_empty() {
            return Err(GrammarError::EmptyRhs {
                lhs: lhs.name().to_string(),
            });
        }
        Ok(Self { lhs, rhs })
    }

    #[must_use]
    pub const fn lhs(&self) -> &NonTerminal {
        &self.lhs
    }

    #[must_use]
    pub fn rhs(&self) -> &[Symbol] {
        &self.rhs
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rhs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rhs.is_empty()
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ->", self.lhs)?;
        for symbol in &self.rhs {
            write!(f, " {symbol}")?;
        }
        Ok(())
    }
}
