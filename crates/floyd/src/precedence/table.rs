//! Precedence table construction.
//!
//! Both table variants scan every adjacent symbol pair of every
//! production's right-hand side and insert relations through one shared
//! conflict-merge policy:
//!
//! - an identical relation is a no-op;
//! - an existing merged `LessThanOrEquals` absorbs `LessThan` and `Equals`;
//! - `LessThan` meeting `Equals` (either order) merges to
//!   `LessThanOrEquals` and flags the table weak — unless the builder
//!   refuses weakness, as the operator-precedence builder does;
//! - every other combination is a fatal [`TableError::Conflict`].

use crate::error::TableError;
use crate::grammar::{Grammar, SymbolSets, Symbol};
use crate::precedence::Relation;
use hashbrown::HashMap;

/// An immutable relation table between ordered symbol pairs, plus the flag
/// recording whether any weak merge happened while building it.
#[derive(Debug, Clone)]
pub struct PrecedenceTable {
    relations: HashMap<Symbol, HashMap<Symbol, Relation>, ahash::RandomState>,
    pairs: usize,
    weak: bool,
}

impl PrecedenceTable {
    fn empty() -> Self {
        Self {
            relations: HashMap::with_hasher(ahash::RandomState::new()),
            pairs: 0,
            weak: false,
        }
    }

    /// Build the operator-precedence table: relations between terminals
    /// only, with adjacent non-terminals assumed to have been ruled out by
    /// the operator-grammar shape check.
    ///
    /// The weak merge is refused for this grammar class, so a pair needing
    /// both `LessThan` and `Equals` is a conflict here.
    ///
    /// # Errors
    ///
    /// [`TableError::Conflict`] on any pair requiring two relations.
    pub fn operator_precedence(grammar: &Grammar) -> Result<Self, TableError> {
        let sets = SymbolSets::new(grammar);
        let mut table = Self::empty();

        for production in grammar.productions() {
            let rhs = production.rhs();
            for pair in rhs.windows(2) {
                match (&pair[0], &pair[1]) {
                    (Symbol::Terminal(left), Symbol::Terminal(right)) => {
                        table.insert(
                            Symbol::Terminal(left.clone()),
                            Symbol::Terminal(right.clone()),
                            Relation::Equals,
                            false,
                        )?;
                    }
                    (Symbol::Terminal(left), Symbol::NonTerminal(right)) => {
                        for terminal in sets.first_op(right) {
                            table.insert(
                                Symbol::Terminal(left.clone()),
                                Symbol::Terminal(terminal.clone()),
                                Relation::LessThan,
                                false,
                            )?;
                        }
                    }
                    (Symbol::NonTerminal(left), Symbol::Terminal(right)) => {
                        for terminal in sets.last_op(left) {
                            table.insert(
                                Symbol::Terminal(terminal.clone()),
                                Symbol::Terminal(right.clone()),
                                Relation::GreaterThan,
                                false,
                            )?;
                        }
                    }
                    // Excluded by the operator-grammar shape check.
                    (Symbol::NonTerminal(_), Symbol::NonTerminal(_)) => {}
                }
            }

            // Terminals separated by exactly one non-terminal relate as
            // equals.
            for window in rhs.windows(3) {
                if let (Symbol::Terminal(left), Symbol::NonTerminal(_), Symbol::Terminal(right)) =
                    (&window[0], &window[1], &window[2])
                {
                    table.insert(
                        Symbol::Terminal(left.clone()),
                        Symbol::Terminal(right.clone()),
                        Relation::Equals,
                        false,
                    )?;
                }
            }
        }

        let marker = Symbol::Terminal(grammar.boundary().clone());
        for terminal in sets.first_op(grammar.start()) {
            table.insert(
                marker.clone(),
                Symbol::Terminal(terminal.clone()),
                Relation::LessThan,
                false,
            )?;
        }
        for terminal in sets.last_op(grammar.start()) {
            table.insert(
                Symbol::Terminal(terminal.clone()),
                marker.clone(),
                Relation::GreaterThan,
                false,
            )?;
        }

        Ok(table)
    }

    /// Build the simple-precedence table over full symbols.
    ///
    /// For adjacent `(X, Y)`: `X ≐ Y`; `X ⋖ s` for `s` in `FIRST_ALL(Y)`;
    /// `s ⋗ t` for `s` in `LAST_ALL(X)` and `t` in `FIRST(Y)`. The boundary
    /// marker relates as if the start symbol were wrapped `$ start $`:
    /// `$ ⋖ FIRST_ALL(start) ∪ {start}`, `LAST_ALL(start) ⋗ $` (the start
    /// symbol itself excluded, so a right-recursive start cannot force a
    /// fatal conflict with the closing shift), and `start ≐ $` so the final
    /// marker shift ends the parse.
    ///
    /// # Errors
    ///
    /// [`TableError::Conflict`] on any pair requiring two relations other
    /// than the tolerated `LessThan`/`Equals` merge.
    pub fn simple_precedence(grammar: &Grammar) -> Result<Self, TableError> {
        let sets = SymbolSets::new(grammar);
        let mut table = Self::empty();

        for production in grammar.productions() {
            for pair in production.rhs().windows(2) {
                let (left, right) = (&pair[0], &pair[1]);
                table.insert(left.clone(), right.clone(), Relation::Equals, true)?;
                for symbol in sets.first_all(right) {
                    table.insert(left.clone(), symbol.clone(), Relation::LessThan, true)?;
                }
                let first_of_right = sets.first(right);
                for symbol in sets.last_all(left) {
                    for terminal in &first_of_right {
                        table.insert(
                            symbol.clone(),
                            Symbol::Terminal(terminal.clone()),
                            Relation::GreaterThan,
                            true,
                        )?;
                    }
                }
            }
        }

        let start = Symbol::NonTerminal(grammar.start().clone());
        let marker = Symbol::Terminal(grammar.boundary().clone());
        table.insert(marker.clone(), start.clone(), Relation::LessThan, true)?;
        for symbol in sets.first_all(&start) {
            table.insert(marker.clone(), symbol.clone(), Relation::LessThan, true)?;
        }
        for symbol in sets.last_all(&start) {
            if *symbol != start {
                table.insert(symbol.clone(), marker.clone(), Relation::GreaterThan, true)?;
            }
        }
        table.insert(start, marker, Relation::Equals, true)?;

        Ok(table)
    }

    /// Build a table from explicit relations, applying the same merge
    /// policy as the grammar-driven builders (weak merges allowed).
    ///
    /// # Errors
    ///
    /// [`TableError::Conflict`] under the merge policy.
    pub fn from_relations(
        relations: impl IntoIterator<Item = (Symbol, Symbol, Relation)>,
    ) -> Result<Self, TableError> {
        let mut table = Self::empty();
        for (left, right, relation) in relations {
            table.insert(left, right, relation, true)?;
        }
        Ok(table)
    }

    /// The relation between `left` and `right`, if one is defined.
    #[must_use]
    pub fn relation(&self, left: &Symbol, right: &Symbol) -> Option<Relation> {
        self.relations.get(left)?.get(right).copied()
    }

    /// Whether any weak merge happened during construction.
    #[must_use]
    pub const fn is_weak(&self) -> bool {
        self.weak
    }

    /// Number of related pairs.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.pairs
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.pairs == 0
    }

    /// Every `(left, right, relation)` entry, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, &Symbol, Relation)> {
        self.relations.iter().flat_map(|(left, row)| {
            row.iter().map(move |(right, relation)| (left, right, *relation))
        })
    }

    fn insert(
        &mut self,
        left: Symbol,
        right: Symbol,
        relation: Relation,
        allow_weak: bool,
    ) -> Result<(), TableError> {
        let row = self.relations.entry(left.clone()).or_default();
        let Some(&existing) = row.get(&right) else {
            row.insert(right, relation);
            self.pairs += 1;
            return Ok(());
        };

        match (existing, relation) {
            (a, b) if a == b => Ok(()),
            (Relation::LessThanOrEquals, Relation::LessThan | Relation::Equals) if allow_weak => {
                Ok(())
            }
            (Relation::LessThan, Relation::Equals) | (Relation::Equals, Relation::LessThan)
                if allow_weak =>
            {
                row.insert(right, Relation::LessThanOrEquals);
                self.weak = true;
                Ok(())
            }
            _ => Err(TableError::Conflict {
                left: left.name().to_string(),
                right: right.name().to_string(),
                existing,
                incoming: relation,
            }),
        }
    }
}
