//! Grammar classification.
//!
//! One [`Grammar`] type plus pure classification functions, instead of a
//! class hierarchy: [`classify`] tags a grammar with the strongest class it
//! reaches, and the [`ClassifiedGrammar`] constructors target one class and
//! report why it was missed.

use crate::error::{ClassifyError, GrammarError};
use crate::grammar::{Grammar, Production, Symbol};
use crate::precedence::{PrecedenceFunctions, PrecedenceTable};
use hashbrown::HashMap;
use std::fmt;

/// Which precedence technique a [`ClassifiedGrammar`] was built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrecedenceVariant {
    OperatorPrecedence,
    SimplePrecedence,
}

impl fmt::Display for PrecedenceVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::OperatorPrecedence => "operator-precedence",
            Self::SimplePrecedence => "simple-precedence",
        })
    }
}

/// The strongest class a grammar reaches.
#[derive(Debug, Clone)]
pub enum GrammarClass {
    /// Not an operator grammar: an empty right-hand side or two adjacent
    /// non-terminals.
    ContextFree,
    /// Operator shape, but neither precedence table builds.
    Operator,
    OperatorPrecedence(ClassifiedGrammar),
    SimplePrecedence(ClassifiedGrammar),
}

/// A grammar together with its precedence table, the optional precedence
/// functions, and the weak flag: everything a parser needs.
///
/// Built once, immutable, reusable across any number of parse calls.
#[derive(Debug, Clone)]
pub struct ClassifiedGrammar {
    grammar: Grammar,
    table: PrecedenceTable,
    functions: Option<PrecedenceFunctions>,
    variant: PrecedenceVariant,
}

impl ClassifiedGrammar {
    /// Classify for operator-precedence parsing.
    ///
    /// The grammar must have operator shape and its terminal-pair table
    /// must build without conflicts; the weak merge counts as a conflict
    /// for this class. A cycle in the function graph is tolerated — the
    /// parser falls back to table lookups.
    ///
    /// # Errors
    ///
    /// [`ClassifyError`] wrapping the shape violation or table conflict.
    pub fn operator_precedence(grammar: Grammar) -> Result<Self, ClassifyError> {
        check_operator_shape(&grammar)?;
        let table = PrecedenceTable::operator_precedence(&grammar)?;
        let functions = PrecedenceFunctions::from_table(&table).ok();
        Ok(Self {
            grammar,
            table,
            functions,
            variant: PrecedenceVariant::OperatorPrecedence,
        })
    }

    /// Classify for simple-precedence parsing.
    ///
    /// The grammar must have operator shape, unique right-hand sides, and
    /// a conflict-free full-symbol table. A weak merge is tolerated and
    /// flags the grammar weak; precedence functions are then not computed
    /// and every relation query goes through the table.
    ///
    /// # Errors
    ///
    /// [`ClassifyError`] wrapping the shape violation, duplicate
    /// right-hand side, or table conflict.
    pub fn simple_precedence(grammar: Grammar) -> Result<Self, ClassifyError> {
        check_operator_shape(&grammar)?;
        check_unique_rhs(&grammar)?;
        let table = PrecedenceTable::simple_precedence(&grammar)?;
        let functions = if table.is_weak() {
            None
        } else {
            PrecedenceFunctions::from_table(&table).ok()
        };
        Ok(Self {
            grammar,
            table,
            functions,
            variant: PrecedenceVariant::SimplePrecedence,
        })
    }

    #[must_use]
    pub const fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    #[must_use]
    pub const fn table(&self) -> &PrecedenceTable {
        &self.table
    }

    /// The precedence functions, when the table is not weak and the
    /// function graph is acyclic.
    #[must_use]
    pub const fn functions(&self) -> Option<&PrecedenceFunctions> {
        self.functions.as_ref()
    }

    #[must_use]
    pub const fn variant(&self) -> PrecedenceVariant {
        self.variant
    }

    /// Whether a weak merge occurred anywhere in the table.
    #[must_use]
    pub const fn is_weak(&self) -> bool {
        self.table.is_weak()
    }

    /// Drop the precedence functions so every relation query goes through
    /// the table. Table-based and function-based parsing agree on every
    /// input a non-weak grammar accepts; the table additionally rejects
    /// pairs the integer comparison cannot distinguish.
    #[must_use]
    pub fn without_functions(mut self) -> Self {
        self.functions = None;
        self
    }
}

/// Tag `grammar` with the strongest class it reaches.
///
/// Operator-precedence is tried before simple-precedence.
#[must_use]
pub fn classify(grammar: &Grammar) -> GrammarClass {
    if check_operator_shape(grammar).is_err() {
        return GrammarClass::ContextFree;
    }
    if let Ok(classified) = ClassifiedGrammar::operator_precedence(grammar.clone()) {
        return GrammarClass::OperatorPrecedence(classified);
    }
    if let Ok(classified) = ClassifiedGrammar::simple_precedence(grammar.clone()) {
        return GrammarClass::SimplePrecedence(classified);
    }
    GrammarClass::Operator
}

/// Operator-grammar shape: no empty right-hand side (already unbuildable),
/// no two adjacent non-terminals.
pub fn check_operator_shape(grammar: &Grammar) -> Result<(), GrammarError> {
    for production in grammar.productions() {
        if production.is_empty() {
            return Err(GrammarError::EmptyRhs {
                lhs: production.lhs().name().to_string(),
            });
        }
        for pair in production.rhs().windows(2) {
            if let (Symbol::NonTerminal(left), Symbol::NonTerminal(right)) = (&pair[0], &pair[1]) {
                return Err(GrammarError::AdjacentNonTerminals {
                    lhs: production.lhs().name().to_string(),
                    left: left.name().to_string(),
                    right: right.name().to_string(),
                });
            }
        }
    }
    Ok(())
}

/// Every production's right-hand side must be unique across the grammar
/// for simple precedence, or reductions could not identify the production.
pub fn check_unique_rhs(grammar: &Grammar) -> Result<(), GrammarError> {
    let mut seen: HashMap<&[Symbol], &Production> = HashMap::new();
    for production in grammar.productions() {
        if let Some(first) = seen.insert(production.rhs(), production) {
            return Err(GrammarError::DuplicateRhs {
                first: first.lhs().name().to_string(),
                second: production.lhs().name().to_string(),
            });
        }
    }
    Ok(())
}
