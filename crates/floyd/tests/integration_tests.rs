//! End-to-end flows through the public API: build, classify, parse.

use floyd::error::{ClassifyError, TableError};
use floyd::grammar::{classify, ClassifiedGrammar, GrammarClass};
use floyd::parser::{ParseOutput, PrecedenceParser, StackSymbol};
use floyd::testing::grammars;

fn popped_texts(output: &ParseOutput) -> Vec<String> {
    output
        .as_symbols()
        .expect("operator output")
        .iter()
        .map(|s| s.text().to_string())
        .collect()
}

#[test]
fn addition_parses_as_operator_precedence() {
    let classified = ClassifiedGrammar::operator_precedence(grammars::addition()).unwrap();
    assert!(!classified.is_weak());
    let parser = PrecedenceParser::new(classified);

    let single = parser.parse("2").unwrap();
    assert_eq!(popped_texts(&single), vec!["2"]);

    let sum = parser.parse("2+3").unwrap();
    assert_eq!(popped_texts(&sum), vec!["2", "3", "+"]);
}

#[test]
fn addition_parses_as_simple_precedence() {
    let classified = ClassifiedGrammar::simple_precedence(grammars::addition()).unwrap();
    let parser = PrecedenceParser::new(classified);

    let single = parser.parse("2").unwrap();
    let productions = single.as_productions().unwrap();
    assert_eq!(productions.len(), 1);
    assert_eq!(productions[0].to_string(), "expression -> NUMBER");
}

#[test]
fn crossed_recursion_fails_operator_table_construction() {
    let err = ClassifiedGrammar::operator_precedence(grammars::crossed()).unwrap_err();
    assert!(matches!(
        err,
        ClassifyError::Table(TableError::Conflict { .. })
    ));
}

#[test]
fn weak_arithmetic_is_flagged_weak_and_skips_functions() {
    let classified = ClassifiedGrammar::simple_precedence(grammars::weak_arithmetic()).unwrap();
    assert!(classified.is_weak());
    assert!(classified.functions().is_none());
}

#[test]
fn balanced_nesting_parses_through_both_lookup_paths() {
    let classified = ClassifiedGrammar::simple_precedence(grammars::balanced()).unwrap();
    assert!(classified.functions().is_some());
    let by_functions = PrecedenceParser::new(classified.clone());
    let by_table = PrecedenceParser::new(classified.without_functions());

    for input in ["c", "acb", "aacbb", "aaacbbb"] {
        let lhs = by_functions.parse(input).unwrap();
        let rhs = by_table.parse(input).unwrap();
        assert_eq!(lhs, rhs, "lookup paths diverge on {input:?}");
        let productions = lhs.as_productions().unwrap();
        // One S -> c plus one S -> a S b per nesting level.
        assert_eq!(productions.len(), 1 + (input.len() - 1) / 2);
        assert_eq!(productions[0].to_string(), "S -> c");
    }
}

#[test]
fn classification_tags_the_strongest_class() {
    assert!(matches!(
        classify(&grammars::addition()),
        GrammarClass::OperatorPrecedence(_)
    ));
    assert!(matches!(
        classify(&grammars::crossed()),
        GrammarClass::SimplePrecedence(_)
    ));
}

#[test]
fn simple_reductions_replace_handles_with_heads() {
    let classified = ClassifiedGrammar::simple_precedence(grammars::balanced()).unwrap();
    let parser = PrecedenceParser::new(classified);
    let output = parser.parse("aacbb").unwrap();
    let rendered: Vec<String> = output
        .as_productions()
        .unwrap()
        .iter()
        .map(|p| p.to_string())
        .collect();
    assert_eq!(rendered, vec!["S -> c", "S -> a S b", "S -> a S b"]);
}

#[test]
fn a_shared_parser_serves_concurrent_parses() {
    use std::sync::Arc;

    let parser = Arc::new(PrecedenceParser::new(
        ClassifiedGrammar::operator_precedence(grammars::addition()).unwrap(),
    ));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let parser = Arc::clone(&parser);
            std::thread::spawn(move || {
                let input = format!("{i}+{i}+{i}");
                let output = parser.parse(&input).unwrap();
                assert_eq!(output.len(), 5);
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn operator_outputs_are_lexeme_instances() {
    let classified = ClassifiedGrammar::operator_precedence(grammars::addition()).unwrap();
    let parser = PrecedenceParser::new(classified);
    let output = parser.parse("12+345").unwrap();
    let symbols = output.as_symbols().unwrap();
    let StackSymbol::Lexeme(first) = &symbols[0] else {
        panic!("operator output holds lexemes");
    };
    assert_eq!(first.text(), "12");
    assert_eq!(first.terminal().name(), "NUMBER");
    assert_eq!(first.occurrence(), 1);
}
