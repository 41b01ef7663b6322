//! # Precedence Relations
//!
//! The relation table between grammar symbols and its compressed form as a
//! pair of integer-valued precedence functions.
//!
//! A [`PrecedenceTable`] is built once from a grammar by scanning adjacent
//! right-hand-side symbols and applying the operator-precedence or
//! simple-precedence rule set; every insertion goes through a shared
//! conflict-merge policy. [`PrecedenceFunctions`] replace the table's
//! quadratic storage with two integer maps when the relation graph is
//! acyclic and the table is not weak.

pub mod functions;
pub mod table;

pub use functions::PrecedenceFunctions;
pub use table::PrecedenceTable;

use std::fmt;

/// A precedence relation between an ordered pair of symbols.
///
/// [`LessThanOrEquals`](Relation::LessThanOrEquals) is a merge artifact:
/// it only appears when the same pair required both
/// [`LessThan`](Relation::LessThan) and [`Equals`](Relation::Equals), the
/// single tolerated conflict, which marks the grammar weak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    LessThan,
    Equals,
    GreaterThan,
    LessThanOrEquals,
}

impl Relation {
    /// Whether the parser shifts on this relation.
    #[must_use]
    pub const fn shifts(self) -> bool {
        matches!(self, Self::LessThan | Self::Equals | Self::LessThanOrEquals)
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::LessThan => "less-than",
            Self::Equals => "equals",
            Self::GreaterThan => "greater-than",
            Self::LessThanOrEquals => "less-than-or-equals",
        })
    }
}
