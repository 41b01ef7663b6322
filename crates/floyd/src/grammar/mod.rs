//! # Grammar Model
//!
//! Symbols, productions, the validated [`Grammar`] container, the
//! FIRST/LAST set builder, and grammar classification.
//!
//! A grammar is built once through [`GrammarBuilder`], which resolves
//! right-hand-side names, validates the structural invariants (non-empty
//! terminal and production lists, every used non-terminal defined, exactly
//! one start symbol unless one is chosen explicitly), and implicitly
//! appends the `$` boundary-marker terminal. Classification is a pure
//! function of the grammar: see [`classify`] and [`ClassifiedGrammar`].

pub mod builder;
pub mod classify;
pub mod production;
pub mod sets;
pub mod symbol;
pub mod validate;

pub use builder::{Grammar, GrammarBuilder};
pub use classify::{
    check_operator_shape, check_unique_rhs, classify, ClassifiedGrammar, GrammarClass,
    PrecedenceVariant,
};
pub use production::Production;
pub use sets::SymbolSets;
pub use symbol::{NonTerminal, Symbol, Terminal, BOUNDARY_CHAR, BOUNDARY_NAME};
