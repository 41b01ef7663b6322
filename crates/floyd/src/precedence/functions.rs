//! Precedence function generation.
//!
//! Replaces a table's quadratic storage with two integer maps `f` and `g`
//! such that comparing `f(left)` with `g(right)` reproduces the table's
//! relation wherever one is defined:
//!
//! 1. every symbol gets an f-slot and a g-slot in an index arena;
//! 2. `X ≐ Y` fuses X's f-slot with Y's g-slot (transitively, via
//!    union-find over the indices);
//! 3. `X ⋖ Y` adds an edge from Y's g-node to X's f-node, `X ⋗ Y` from
//!    X's f-node to Y's g-node;
//! 4. the graph must be a DAG — a cycle means functions are unavailable
//!    and the caller falls back to table lookups;
//! 5. each node's value is the longest path leaving it, found by a
//!    relaxation pass in reverse topological order.

use crate::error::FunctionsError;
use crate::grammar::Symbol;
use crate::precedence::{PrecedenceTable, Relation};
use hashbrown::{HashMap, HashSet};

/// The two integer functions compressing a precedence table.
///
/// Deterministic: rebuilding from an unchanged table yields identical
/// values, since each value is a longest-path length in a graph determined
/// entirely by the table's contents.
#[derive(Debug, Clone)]
pub struct PrecedenceFunctions {
    f: HashMap<Symbol, u32, ahash::RandomState>,
    g: HashMap<Symbol, u32, ahash::RandomState>,
}

impl PrecedenceFunctions {
    /// Generate functions for `table`.
    ///
    /// # Errors
    ///
    /// [`FunctionsError::WeakTable`] when the table holds a merged
    /// `LessThanOrEquals` (functions are undefined for weak grammars), and
    /// [`FunctionsError::Cycle`] when the relation graph is cyclic. The
    /// latter is recoverable: keep the table and look relations up
    /// directly.
    pub fn from_table(table: &PrecedenceTable) -> Result<Self, FunctionsError> {
        if table.is_weak() {
            return Err(FunctionsError::WeakTable);
        }

        // Two slots per distinct symbol: f at 2i, g at 2i + 1.
        let mut symbols: Vec<&Symbol> = Vec::new();
        let mut slot_of: HashMap<&Symbol, usize, ahash::RandomState> =
            HashMap::with_hasher(ahash::RandomState::new());
        for (left, right, _) in table.iter() {
            for symbol in [left, right] {
                if !slot_of.contains_key(symbol) {
                    slot_of.insert(symbol, symbols.len());
                    symbols.push(symbol);
                }
            }
        }
        let f_slot = |index: usize| 2 * index;
        let g_slot = |index: usize| 2 * index + 1;

        let mut fusion = UnionFind::new(2 * symbols.len());
        for (left, right, relation) in table.iter() {
            if relation == Relation::Equals {
                fusion.union(f_slot(slot_of[left]), g_slot(slot_of[right]));
            }
        }

        let mut edges: HashSet<(usize, usize)> = HashSet::new();
        for (left, right, relation) in table.iter() {
            let f = fusion.find(f_slot(slot_of[left]));
            let g = fusion.find(g_slot(slot_of[right]));
            match relation {
                Relation::LessThan => {
                    edges.insert((g, f));
                }
                Relation::GreaterThan => {
                    edges.insert((f, g));
                }
                Relation::Equals => {}
                // Ruled out by the weak check above.
                Relation::LessThanOrEquals => {}
            }
        }

        let nodes: HashSet<usize> = (0..2 * symbols.len()).map(|s| fusion.find(s)).collect();
        let mut outgoing: HashMap<usize, Vec<usize>> = HashMap::new();
        let mut indegree: HashMap<usize, usize> = nodes.iter().map(|&n| (n, 0)).collect();
        for &(from, to) in &edges {
            outgoing.entry(from).or_default().push(to);
            if let Some(count) = indegree.get_mut(&to) {
                *count += 1;
            }
        }

        // Kahn's algorithm; anything left over sits on a cycle.
        let mut ready: Vec<usize> = indegree
            .iter()
            .filter(|(_, &count)| count == 0)
            .map(|(&node, _)| node)
            .collect();
        let mut order: Vec<usize> = Vec::with_capacity(nodes.len());
        while let Some(node) = ready.pop() {
            order.push(node);
            for &next in outgoing.get(&node).map(Vec::as_slice).unwrap_or(&[]) {
                if let Some(count) = indegree.get_mut(&next) {
                    *count -= 1;
                    if *count == 0 {
                        ready.push(next);
                    }
                }
            }
        }

        if order.len() < nodes.len() {
            let ordered: HashSet<usize> = order.iter().copied().collect();
            let mut stuck: Vec<String> = symbols
                .iter()
                .enumerate()
                .filter(|(index, _)| {
                    !ordered.contains(&fusion.find(f_slot(*index)))
                        || !ordered.contains(&fusion.find(g_slot(*index)))
                })
                .map(|(_, symbol)| symbol.name().to_string())
                .collect();
            stuck.sort_unstable();
            stuck.dedup();
            return Err(FunctionsError::Cycle { symbols: stuck });
        }

        // Longest path leaving each node: relax in reverse topological
        // order so every successor is final before its predecessors.
        let mut longest: HashMap<usize, u32> = nodes.iter().map(|&n| (n, 0)).collect();
        for &node in order.iter().rev() {
            let best = outgoing
                .get(&node)
                .map(Vec::as_slice)
                .unwrap_or(&[])
                .iter()
                .map(|next| longest[next] + 1)
                .max();
            if let Some(best) = best {
                longest.insert(node, best);
            }
        }

        let mut f = HashMap::with_hasher(ahash::RandomState::new());
        let mut g = HashMap::with_hasher(ahash::RandomState::new());
        for (index, symbol) in symbols.iter().enumerate() {
            f.insert((*symbol).clone(), longest[&fusion.find(f_slot(index))]);
            g.insert((*symbol).clone(), longest[&fusion.find(g_slot(index))]);
        }

        Ok(Self { f, g })
    }

    /// The f-value (left operand) for `symbol`, if it appeared in the table.
    #[must_use]
    pub fn f(&self, symbol: &Symbol) -> Option<u32> {
        self.f.get(symbol).copied()
    }

    /// The g-value (right operand) for `symbol`, if it appeared in the table.
    #[must_use]
    pub fn g(&self, symbol: &Symbol) -> Option<u32> {
        self.g.get(symbol).copied()
    }

    /// The relation implied by comparing `f(left)` with `g(right)`.
    ///
    /// `None` only when either symbol never appeared in the source table;
    /// unlike a table lookup, every known pair compares to something.
    #[must_use]
    pub fn relation(&self, left: &Symbol, right: &Symbol) -> Option<Relation> {
        let f = self.f(left)?;
        let g = self.g(right)?;
        Some(match f.cmp(&g) {
            std::cmp::Ordering::Less => Relation::LessThan,
            std::cmp::Ordering::Equal => Relation::Equals,
            std::cmp::Ordering::Greater => Relation::GreaterThan,
        })
    }
}

/// Union-find over arena indices, path-halving, union by attachment.
struct UnionFind {
    parent: Vec<usize>,
}

impl UnionFind {
    fn new(size: usize) -> Self {
        Self {
            parent: (0..size).collect(),
        }
    }

    fn find(&mut self, mut index: usize) -> usize {
        while self.parent[index] != index {
            self.parent[index] = self.parent[self.parent[index]];
            index = self.parent[index];
        }
        index
    }

    fn union(&mut self, a: usize, b: usize) {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a != root_b {
            self.parent[root_b] = root_a;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Terminal;

    fn t(name: &str) -> Symbol {
        Symbol::Terminal(Terminal::literal(name, name))
    }

    fn consistent(table: &PrecedenceTable, functions: &PrecedenceFunctions) {
        for (left, right, relation) in table.iter() {
            assert_eq!(
                functions.relation(left, right),
                Some(relation),
                "functions disagree with the table on ({left}, {right})"
            );
        }
    }

    #[test]
    fn reproduces_every_table_relation() {
        let table = PrecedenceTable::from_relations([
            (t("n"), t("+"), Relation::GreaterThan),
            (t("+"), t("n"), Relation::Equals),
            (t("$"), t("n"), Relation::LessThan),
            (t("$"), t("+"), Relation::LessThan),
            (t("n"), t("$"), Relation::GreaterThan),
        ])
        .unwrap();
        let functions = PrecedenceFunctions::from_table(&table).unwrap();
        consistent(&table, &functions);
    }

    #[test]
    fn values_are_deterministic() {
        let relations = [
            (t("n"), t("+"), Relation::GreaterThan),
            (t("+"), t("n"), Relation::Equals),
            (t("$"), t("n"), Relation::LessThan),
        ];
        let table = PrecedenceTable::from_relations(relations.clone()).unwrap();
        let first = PrecedenceFunctions::from_table(&table).unwrap();
        for _ in 0..16 {
            let again = PrecedenceFunctions::from_table(
                &PrecedenceTable::from_relations(relations.clone()).unwrap(),
            )
            .unwrap();
            for symbol in [t("n"), t("+"), t("$")] {
                assert_eq!(first.f(&symbol), again.f(&symbol));
                assert_eq!(first.g(&symbol), again.g(&symbol));
            }
        }
    }

    #[test]
    fn a_cycle_is_reported_not_looped() {
        // Fusing a/f with b/g and b/f with a/g, then relating the pairs in
        // both directions, ties the two fused nodes into a loop.
        let table = PrecedenceTable::from_relations([
            (t("a"), t("b"), Relation::Equals),
            (t("b"), t("a"), Relation::Equals),
            (t("a"), t("a"), Relation::LessThan),
            (t("b"), t("b"), Relation::LessThan),
        ])
        .unwrap();
        let err = PrecedenceFunctions::from_table(&table).unwrap_err();
        match err {
            FunctionsError::Cycle { symbols } => {
                assert_eq!(symbols, vec!["a".to_string(), "b".to_string()]);
            }
            FunctionsError::WeakTable => panic!("expected a cycle"),
        }
    }

    #[test]
    fn weak_tables_are_refused() {
        let table = PrecedenceTable::from_relations([
            (t("a"), t("b"), Relation::LessThan),
            (t("a"), t("b"), Relation::Equals),
        ])
        .unwrap();
        assert_eq!(
            PrecedenceFunctions::from_table(&table).unwrap_err(),
            FunctionsError::WeakTable
        );
    }

    #[test]
    fn unknown_symbols_have_no_values() {
        let table =
            PrecedenceTable::from_relations([(t("a"), t("b"), Relation::LessThan)]).unwrap();
        let functions = PrecedenceFunctions::from_table(&table).unwrap();
        assert_eq!(functions.f(&t("zz")), None);
        assert_eq!(functions.relation(&t("a"), &t("zz")), None);
    }
}
