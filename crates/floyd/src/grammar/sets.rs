//! FIRST/LAST set computation over a grammar's productions.
//!
//! All five families are computed once, eagerly, when [`SymbolSets`] is
//! built:
//!
//! - `FIRST_ALL(X)` / `LAST_ALL(X)`: every symbol reachable as the first
//!   (last) symbol of a derivation from `X`. Recursion through the grammar
//!   is guarded by a per-top-level visited set.
//! - `FIRST(X)`: the terminal restriction of `FIRST_ALL(X)`; a terminal
//!   maps to itself.
//! - `FIRST_OP(X)` / `LAST_OP(X)`: the nearest terminal reachable at the
//!   edge of a derivation from `X`. When a production's edge symbol is a
//!   non-terminal, its own `FIRST_OP` propagates and the first terminal
//!   found anywhere in the right-hand side is captured as well, since
//!   operator grammars interleave terminals between non-terminals.
//!
//! `FIRST_OP`/`LAST_OP` reuse previously finished results and short-circuit
//! on a non-terminal already under construction; memos are filled in
//! non-terminal declaration order so the outcome is deterministic.

use crate::grammar::{Grammar, NonTerminal, Symbol, Terminal};
use hashbrown::{HashMap, HashSet};

/// The FIRST/LAST set families of one grammar.
#[derive(Debug, Clone)]
pub struct SymbolSets {
    first_all: HashMap<NonTerminal, HashSet<Symbol>>,
    last_all: HashMap<NonTerminal, HashSet<Symbol>>,
    first_op: HashMap<NonTerminal, HashSet<Terminal>>,
    last_op: HashMap<NonTerminal, HashSet<Terminal>>,
}

/// Which end of a right-hand side a computation walks from.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Edge {
    Front,
    Back,
}

impl Edge {
    fn pick<'a>(self, rhs: &'a [Symbol]) -> Option<&'a Symbol> {
        match self {
            Self::Front => rhs.first(),
            Self::Back => rhs.last(),
        }
    }

    fn scan_for_terminal<'a>(self, rhs: &'a [Symbol]) -> Option<&'a Terminal> {
        match self {
            Self::Front => rhs.iter().find_map(Symbol::as_terminal),
            Self::Back => rhs.iter().rev().find_map(Symbol::as_terminal),
        }
    }
}

impl SymbolSets {
    /// Compute every set family for `grammar`.
    #[must_use]
    pub fn new(grammar: &Grammar) -> Self {
        let mut first_all = HashMap::new();
        let mut last_all = HashMap::new();
        for non_terminal in grammar.non_terminals() {
            let mut front = HashSet::new();
            collect_edge(
                grammar,
                non_terminal,
                Edge::Front,
                &mut HashSet::new(),
                &mut front,
            );
            first_all.insert(non_terminal.clone(), front);

            let mut back = HashSet::new();
            collect_edge(
                grammar,
                non_terminal,
                Edge::Back,
                &mut HashSet::new(),
                &mut back,
            );
            last_all.insert(non_terminal.clone(), back);
        }

        let mut first_op = HashMap::new();
        let mut last_op = HashMap::new();
        for non_terminal in grammar.non_terminals() {
            collect_op(grammar, non_terminal, Edge::Front, &mut first_op, &mut HashSet::new());
            collect_op(grammar, non_terminal, Edge::Back, &mut last_op, &mut HashSet::new());
        }

        Self {
            first_all,
            last_all,
            first_op,
            last_op,
        }
    }

    /// Symbols reachable first in a derivation from `symbol`. Empty for
    /// terminals: only non-terminals derive anything.
    #[must_use]
    pub fn first_all(&self, symbol: &Symbol) -> &HashSet<Symbol> {
        static EMPTY: std::sync::OnceLock<HashSet<Symbol>> = std::sync::OnceLock::new();
        symbol
            .as_non_terminal()
            .and_then(|n| self.first_all.get(n))
            .unwrap_or_else(|| EMPTY.get_or_init(HashSet::new))
    }

    /// Symbols reachable last in a derivation from `symbol`.
    #[must_use]
    pub fn last_all(&self, symbol: &Symbol) -> &HashSet<Symbol> {
        static EMPTY: std::sync::OnceLock<HashSet<Symbol>> = std::sync::OnceLock::new();
        symbol
            .as_non_terminal()
            .and_then(|n| self.last_all.get(n))
            .unwrap_or_else(|| EMPTY.get_or_init(HashSet::new))
    }

    /// Terminal restriction of `FIRST_ALL`; a terminal maps to itself.
    #[must_use]
    pub fn first(&self, symbol: &Symbol) -> HashSet<Terminal> {
        match symbol {
            Symbol::Terminal(t) => std::iter::once(t.clone()).collect(),
            Symbol::NonTerminal(_) => self
                .first_all(symbol)
                .iter()
                .filter_map(Symbol::as_terminal)
                .cloned()
                .collect(),
        }
    }

    /// Nearest terminals reachable first from `non_terminal`.
    #[must_use]
    pub fn first_op(&self, non_terminal: &NonTerminal) -> &HashSet<Terminal> {
        static EMPTY: std::sync::OnceLock<HashSet<Terminal>> = std::sync::OnceLock::new();
        self.first_op
            .get(non_terminal)
            .unwrap_or_else(|| EMPTY.get_or_init(HashSet::new))
    }

    /// Nearest terminals reachable last from `non_terminal`.
    #[must_use]
    pub fn last_op(&self, non_terminal: &NonTerminal) -> &HashSet<Terminal> {
        static EMPTY: std::sync::OnceLock<HashSet<Terminal>> = std::sync::OnceLock::new();
        self.last_op
            .get(non_terminal)
            .unwrap_or_else(|| EMPTY.get_or_init(HashSet::new))
    }
}

fn collect_edge(
    grammar: &Grammar,
    non_terminal: &NonTerminal,
    edge: Edge,
    visiting: &mut HashSet<NonTerminal>,
    out: &mut HashSet<Symbol>,
) {
    visiting.insert(non_terminal.clone());
    for production in grammar.productions_for(non_terminal) {
        if let Some(symbol) = edge.pick(production.rhs()) {
            out.insert(symbol.clone());
            if let Some(next) = symbol.as_non_terminal() {
                if !visiting.contains(next) {
                    collect_edge(grammar, next, edge, visiting, out);
                }
            }
        }
    }
}

fn collect_op(
    grammar: &Grammar,
    non_terminal: &NonTerminal,
    edge: Edge,
    memo: &mut HashMap<NonTerminal, HashSet<Terminal>>,
    in_progress: &mut HashSet<NonTerminal>,
) -> HashSet<Terminal> {
    if let Some(done) = memo.get(non_terminal) {
        return done.clone();
    }
    if !in_progress.insert(non_terminal.clone()) {
        // Already under construction further up the call chain.
        return HashSet::new();
    }

    let mut out = HashSet::new();
    for production in grammar.productions_for(non_terminal) {
        match edge.pick(production.rhs()) {
            Some(Symbol::Terminal(t)) => {
                out.insert(t.clone());
            }
            Some(Symbol::NonTerminal(next)) => {
                out.extend(collect_op(grammar, next, edge, memo, in_progress));
                if let Some(t) = edge.scan_for_terminal(production.rhs()) {
                    out.insert(t.clone());
                }
            }
            None => {}
        }
    }

    in_progress.remove(non_terminal);
    memo.insert(non_terminal.clone(), out.clone());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{GrammarBuilder, Terminal};
    use crate::lexer::{CharSet, Pattern};

    fn weak_arithmetic() -> Grammar {
        GrammarBuilder::new("weak-arithmetic")
            .terminal(Terminal::literal("ADD", "+"))
            .terminal(Terminal::literal("MUL", "*"))
            .terminal(Terminal::new("factor", Pattern::some(CharSet::digits())))
            .rule("expression", &["expression", "ADD", "term"])
            .rule("expression", &["term"])
            .rule("term", &["term", "MUL", "factor"])
            .rule("term", &["factor"])
            .build()
            .unwrap()
    }

    fn names(symbols: &HashSet<Symbol>) -> Vec<&str> {
        let mut out: Vec<&str> = symbols.iter().map(Symbol::name).collect();
        out.sort_unstable();
        out
    }

    fn terminal_names(terminals: &HashSet<Terminal>) -> Vec<&str> {
        let mut out: Vec<&str> = terminals.iter().map(Terminal::name).collect();
        out.sort_unstable();
        out
    }

    #[test]
    fn first_all_includes_recursive_heads() {
        let grammar = weak_arithmetic();
        let sets = SymbolSets::new(&grammar);
        let expression = Symbol::NonTerminal(NonTerminal::new("expression"));
        assert_eq!(
            names(sets.first_all(&expression)),
            vec!["expression", "factor", "term"]
        );
        let term = Symbol::NonTerminal(NonTerminal::new("term"));
        assert_eq!(names(sets.first_all(&term)), vec!["factor", "term"]);
    }

    #[test]
    fn last_all_mirrors_from_the_right() {
        let grammar = weak_arithmetic();
        let sets = SymbolSets::new(&grammar);
        let expression = Symbol::NonTerminal(NonTerminal::new("expression"));
        assert_eq!(names(sets.last_all(&expression)), vec!["factor", "term"]);
    }

    #[test]
    fn first_restricts_to_terminals_and_maps_terminals_to_themselves() {
        let grammar = weak_arithmetic();
        let sets = SymbolSets::new(&grammar);
        let expression = Symbol::NonTerminal(NonTerminal::new("expression"));
        assert_eq!(terminal_names(&sets.first(&expression)), vec!["factor"]);

        let add = Symbol::Terminal(Terminal::literal("ADD", "+"));
        assert_eq!(terminal_names(&sets.first(&add)), vec!["ADD"]);
    }

    #[test]
    fn op_sets_capture_interleaved_terminals() {
        let grammar = weak_arithmetic();
        let sets = SymbolSets::new(&grammar);
        // expression -> expression ADD term starts with a non-terminal, so
        // the interleaved ADD is the nearest first terminal; through term
        // the nearest are MUL and factor.
        assert_eq!(
            terminal_names(sets.first_op(&NonTerminal::new("expression"))),
            vec!["ADD", "MUL", "factor"]
        );
        assert_eq!(
            terminal_names(sets.last_op(&NonTerminal::new("expression"))),
            vec!["ADD", "factor"]
        );
        assert_eq!(
            terminal_names(sets.last_op(&NonTerminal::new("term"))),
            vec!["factor"]
        );
    }

    #[test]
    fn terminals_have_empty_all_sets() {
        let grammar = weak_arithmetic();
        let sets = SymbolSets::new(&grammar);
        let add = Symbol::Terminal(Terminal::literal("ADD", "+"));
        assert!(sets.first_all(&add).is_empty());
        assert!(sets.last_all(&add).is_empty());
    }
}
