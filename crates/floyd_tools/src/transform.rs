//! Output transformers.
//!
//! The simple-precedence parser returns productions in reduction order,
//! which is a rightmost derivation reversed. These transformers replay
//! that list into the shapes callers actually want: the derivation's
//! sentential forms, or a parse tree rendered as text or JSON.

use floyd::grammar::{NonTerminal, Production, Symbol};
use serde_json::{json, Value};
use thiserror::Error;

/// The reduction list does not replay cleanly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    #[error("production '{production}' does not fit the derivation")]
    DerivationMismatch { production: String },

    #[error("the reduction list does not assemble into a single tree")]
    Unrooted,
}

/// Replay a reduction list as a rightmost derivation.
///
/// Returns the sentential forms from the start symbol down to the parsed
/// sentence, one rendered form per step.
///
/// # Errors
///
/// [`TransformError::DerivationMismatch`] when a production's head is
/// absent from the current form.
pub fn derivation(
    start: &NonTerminal,
    productions: &[Production],
) -> Result<Vec<String>, TransformError> {
    let mut form: Vec<Symbol> = vec![Symbol::NonTerminal(start.clone())];
    let mut forms = vec![render_form(&form)];

    for production in productions.iter().rev() {
        let target = Symbol::NonTerminal(production.lhs().clone());
        let position = form.iter().rposition(|symbol| *symbol == target).ok_or_else(|| {
            TransformError::DerivationMismatch {
                production: production.to_string(),
            }
        })?;
        let tail = form.split_off(position + 1);
        form.pop();
        form.extend(production.rhs().iter().cloned());
        form.extend(tail);
        forms.push(render_form(&form));
    }

    Ok(forms)
}

fn render_form(form: &[Symbol]) -> String {
    form.iter()
        .map(Symbol::name)
        .collect::<Vec<_>>()
        .join(" ")
}

/// A parse-tree node: a grammar symbol and its children (empty for
/// terminal leaves).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub symbol: Symbol,
    pub children: Vec<TreeNode>,
}

/// Fold a reduction list bottom-up into a parse tree.
///
/// Each production pops the subtrees its right-hand-side non-terminals
/// already produced and wraps them, with terminal leaves, under its head.
///
/// # Errors
///
/// [`TransformError::DerivationMismatch`] when a right-hand-side
/// non-terminal has no matching completed subtree, and
/// [`TransformError::Unrooted`] when more or less than one tree remains.
pub fn parse_tree(productions: &[Production]) -> Result<TreeNode, TransformError> {
    let mut pending: Vec<TreeNode> = Vec::new();

    for production in productions {
        let mut children: Vec<TreeNode> = Vec::with_capacity(production.len());
        for symbol in production.rhs().iter().rev() {
            match symbol {
                Symbol::NonTerminal(_) => {
                    let node = pending
                        .pop()
                        .filter(|node| node.symbol == *symbol)
                        .ok_or_else(|| TransformError::DerivationMismatch {
                            production: production.to_string(),
                        })?;
                    children.push(node);
                }
                Symbol::Terminal(_) => children.push(TreeNode {
                    symbol: symbol.clone(),
                    children: Vec::new(),
                }),
            }
        }
        children.reverse();
        pending.push(TreeNode {
            symbol: Symbol::NonTerminal(production.lhs().clone()),
            children,
        });
    }

    if pending.len() == 1 {
        Ok(pending.remove(0))
    } else {
        Err(TransformError::Unrooted)
    }
}

/// Render a tree as indented text, one symbol per line.
#[must_use]
pub fn render_tree(root: &TreeNode) -> String {
    let mut out = String::new();
    render_into(root, 0, &mut out);
    out
}

fn render_into(node: &TreeNode, depth: usize, out: &mut String) {
    for _ in 0..depth {
        out.push_str("  ");
    }
    out.push_str(node.symbol.name());
    out.push('\n');
    for child in &node.children {
        render_into(child, depth + 1, out);
    }
}

/// Render a tree as JSON.
#[must_use]
pub fn tree_to_json(node: &TreeNode) -> Value {
    json!({
        "symbol": node.symbol.name(),
        "terminal": node.symbol.is_terminal(),
        "children": node.children.iter().map(tree_to_json).collect::<Vec<_>>(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use floyd::grammar::ClassifiedGrammar;
    use floyd::parser::PrecedenceParser;
    use floyd::testing::grammars;

    fn reductions(input: &str) -> Vec<Production> {
        let classified = ClassifiedGrammar::simple_precedence(grammars::addition()).unwrap();
        let parser = PrecedenceParser::new(classified);
        parser
            .parse(input)
            .unwrap()
            .as_productions()
            .unwrap()
            .to_vec()
    }

    #[test]
    fn derivation_expands_rightmost_first() {
        let grammar = grammars::addition();
        let forms = derivation(grammar.start(), &reductions("2+3")).unwrap();
        assert_eq!(
            forms,
            vec![
                "expression",
                "expression ADD NUMBER",
                "NUMBER ADD NUMBER",
            ]
        );
    }

    #[test]
    fn parse_tree_folds_bottom_up() {
        let tree = parse_tree(&reductions("2+3")).unwrap();
        assert_eq!(tree.symbol.name(), "expression");
        assert_eq!(tree.children.len(), 3);
        assert_eq!(tree.children[0].symbol.name(), "expression");
        assert_eq!(tree.children[1].symbol.name(), "ADD");
        assert!(tree.children[1].children.is_empty());
        assert_eq!(tree.children[2].symbol.name(), "NUMBER");
    }

    #[test]
    fn rendered_tree_indents_by_depth() {
        let tree = parse_tree(&reductions("2+3")).unwrap();
        assert_eq!(
            render_tree(&tree),
            "expression\n  expression\n    NUMBER\n  ADD\n  NUMBER\n"
        );
    }

    #[test]
    fn json_tree_marks_terminals() {
        let tree = parse_tree(&reductions("2")).unwrap();
        let value = tree_to_json(&tree);
        assert_eq!(value["symbol"], "expression");
        assert_eq!(value["terminal"], false);
        assert_eq!(value["children"][0]["symbol"], "NUMBER");
        assert_eq!(value["children"][0]["terminal"], true);
    }

    #[test]
    fn a_mismatched_list_is_reported() {
        let mut productions = reductions("2+3");
        productions.remove(0);
        assert!(matches!(
            parse_tree(&productions),
            Err(TransformError::DerivationMismatch { .. })
        ));

        assert!(matches!(
            derivation(&NonTerminal::new("other"), &reductions("2")),
            Err(TransformError::DerivationMismatch { .. })
        ));
    }
}
