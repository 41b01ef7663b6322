//! The production-recovery trie for simple-precedence reductions.
//!
//! Every production's right-hand side is inserted reversed (last symbol
//! first), so popping a handle off the parse stack descends the trie one
//! edge per popped symbol. The node reached when the pop loop stops names
//! the applied production: the node itself when it carries one, otherwise
//! its nearest descendant that does — shallowest first, declaration order
//! on equal depth.

use crate::grammar::{Grammar, Symbol};
use smallvec::SmallVec;
use std::collections::VecDeque;

pub(crate) const ROOT: usize = 0;

#[derive(Debug, Default)]
struct Node {
    edges: SmallVec<[(Symbol, usize); 4]>,
    production: Option<usize>,
}

/// Arena-indexed trie over reversed right-hand sides.
#[derive(Debug)]
pub(crate) struct RhsTrie {
    nodes: Vec<Node>,
}

impl RhsTrie {
    pub(crate) fn build(grammar: &Grammar) -> Self {
        let mut trie = Self {
            nodes: vec![Node::default()],
        };
        for (index, production) in grammar.productions().iter().enumerate() {
            let mut node = ROOT;
            for symbol in production.rhs().iter().rev() {
                node = trie.child(node, symbol).unwrap_or_else(|| {
                    trie.nodes.push(Node::default());
                    let next = trie.nodes.len() - 1;
                    trie.nodes[node].edges.push((symbol.clone(), next));
                    next
                });
            }
            // Unique right-hand sides are checked before parsing; keep the
            // first on the off chance both made it in.
            if trie.nodes[node].production.is_none() {
                trie.nodes[node].production = Some(index);
            }
        }
        trie
    }

    /// Follow the edge labeled `symbol`, if present.
    pub(crate) fn child(&self, node: usize, symbol: &Symbol) -> Option<usize> {
        self.nodes[node]
            .edges
            .iter()
            .find(|(label, _)| label == symbol)
            .map(|&(_, next)| next)
    }

    /// The production at `node`, or at its nearest descendant holding one.
    pub(crate) fn nearest_production(&self, node: usize) -> Option<usize> {
        let mut queue = VecDeque::from([node]);
        while let Some(current) = queue.pop_front() {
            if let Some(production) = self.nodes[current].production {
                return Some(production);
            }
            queue.extend(self.nodes[current].edges.iter().map(|&(_, next)| next));
        }
        None
    }
}
