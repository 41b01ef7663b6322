use crate::error::GrammarError;
use crate::grammar::{NonTerminal, Production, BOUNDARY_NAME};
use hashbrown::HashSet;

/// Check that every non-terminal appearing in a right-hand side is some
/// production's head.
pub fn check_rhs_defined(productions: &[Production]) -> Result<(), GrammarError> {
    let heads: HashSet<&NonTerminal> = productions.iter().map(Production::lhs).collect();
    for production in productions {
        for symbol in production.rhs() {
            if let Some(non_terminal) = symbol.as_non_terminal() {
                if !heads.contains(non_terminal) {
                    return Err(GrammarError::UndefinedNonTerminal {
                        name: non_terminal.name().to_string(),
                    });
                }
            }
        }
    }
    Ok(())
}

/// Determine the start symbol.
///
/// An explicit choice must be some production's head. Otherwise the start
/// symbol is inferred as the unique non-terminal that never appears in any
/// right-hand side; zero candidates or more than one is a structural
/// failure.
pub fn resolve_start(
    productions: &[Production],
    explicit: Option<&str>,
) -> Result<NonTerminal, GrammarError> {
    if let Some(name) = explicit {
        return productions
            .iter()
            .map(Production::lhs)
            .find(|head| head.name() == name)
            .cloned()
            .ok_or_else(|| GrammarError::UndefinedNonTerminal {
                name: name.to_string(),
            });
    }

    let used: HashSet<&NonTerminal> = productions
        .iter()
        .flat_map(|p| p.rhs().iter().filter_map(|s| s.as_non_terminal()))
        .collect();

    // Heads in first-appearance order, deduplicated, minus anything used in
    // a right-hand side.
    let mut candidates: Vec<&NonTerminal> = Vec::new();
    for head in productions.iter().map(Production::lhs) {
        if !used.contains(head) && !candidates.contains(&head) {
            candidates.push(head);
        }
    }

    match candidates.as_slice() {
        [] => Err(GrammarError::MissingStartSymbol),
        [start] => Ok((*start).clone()),
        many => Err(GrammarError::AmbiguousStartSymbol {
            candidates: many.iter().map(|n| n.name().to_string()).collect(),
        }),
    }
}

/// Reject any use of the reserved boundary-marker name.
pub fn check_reserved_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Result<(), GrammarError> {
    for name in names {
        if name == BOUNDARY_NAME {
            return Err(GrammarError::ReservedBoundaryName {
                name: name.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{Symbol, Terminal};

    fn production(lhs: &str, rhs: &[Symbol]) -> Production {
        Production::new(NonTerminal::new(lhs), rhs.iter().cloned()).unwrap()
    }

    fn nt(name: &str) -> Symbol {
        Symbol::NonTerminal(NonTerminal::new(name))
    }

    fn t(name: &str) -> Symbol {
        Symbol::Terminal(Terminal::literal(name, name))
    }

    #[test]
    fn undefined_rhs_non_terminal_is_rejected() {
        let productions = vec![production("s", &[nt("missing"), t("a")])];
        let err = check_rhs_defined(&productions).unwrap_err();
        assert_eq!(
            err,
            GrammarError::UndefinedNonTerminal {
                name: "missing".to_string()
            }
        );
    }

    #[test]
    fn start_is_the_unique_unreferenced_head() {
        let productions = vec![
            production("s", &[t("a"), nt("b")]),
            production("b", &[t("c")]),
        ];
        let start = resolve_start(&productions, None).unwrap();
        assert_eq!(start.name(), "s");
    }

    #[test]
    fn no_candidate_fails() {
        // Both heads appear in right-hand sides.
        let productions = vec![
            production("a", &[t("x"), nt("b")]),
            production("b", &[nt("a"), t("y")]),
        ];
        assert_eq!(
            resolve_start(&productions, None).unwrap_err(),
            GrammarError::MissingStartSymbol
        );
    }

    #[test]
    fn multiple_candidates_fail() {
        let productions = vec![production("a", &[t("x")]), production("b", &[t("y")])];
        let err = resolve_start(&productions, None).unwrap_err();
        assert_eq!(
            err,
            GrammarError::AmbiguousStartSymbol {
                candidates: vec!["a".to_string(), "b".to_string()]
            }
        );
    }

    #[test]
    fn explicit_start_must_be_a_head() {
        let productions = vec![production("a", &[t("x")])];
        assert!(resolve_start(&productions, Some("a")).is_ok());
        assert!(resolve_start(&productions, Some("zz")).is_err());
    }

    #[test]
    fn boundary_name_is_reserved() {
        assert!(check_reserved_names(["a", "b"]).is_ok());
        assert_eq!(
            check_reserved_names(["a", "$"]).unwrap_err(),
            GrammarError::ReservedBoundaryName {
                name: "$".to_string()
            }
        );
    }
}
