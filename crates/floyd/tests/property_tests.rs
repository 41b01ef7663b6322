//! Property-based tests over randomly generated inputs.

use floyd::grammar::ClassifiedGrammar;
use floyd::parser::{ParseOutput, PrecedenceParser, StackSymbol};
use floyd::testing::grammars;
use proptest::prelude::*;

fn popped_texts(output: &ParseOutput) -> Vec<String> {
    output
        .as_symbols()
        .expect("operator output")
        .iter()
        .map(|s| s.text().to_string())
        .collect()
}

proptest! {
    // For any sum of numbers, the operator variant pops both operands
    // before their operator, left to right.
    #[test]
    fn operator_pop_order_interleaves_operands_and_operators(
        numbers in proptest::collection::vec(0u32..1000, 1..12),
    ) {
        let parser = PrecedenceParser::new(
            ClassifiedGrammar::operator_precedence(grammars::addition()).unwrap(),
        );
        let input = numbers
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join("+");

        let mut expected: Vec<String> = Vec::new();
        expected.push(numbers[0].to_string());
        for number in &numbers[1..] {
            expected.push(number.to_string());
            expected.push("+".to_string());
        }

        let output = parser.parse(&input).unwrap();
        prop_assert_eq!(popped_texts(&output), expected);
    }

    // Table lookups and precedence functions drive identical parses on
    // every accepted input, for both grammar classes.
    #[test]
    fn lookup_paths_agree(numbers in proptest::collection::vec(0u32..100, 1..10)) {
        let input = numbers
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join("+");

        let operator = ClassifiedGrammar::operator_precedence(grammars::addition()).unwrap();
        prop_assert!(operator.functions().is_some());
        let with_functions = PrecedenceParser::new(operator.clone());
        let table_only = PrecedenceParser::new(operator.without_functions());
        prop_assert_eq!(
            with_functions.parse(&input).unwrap(),
            table_only.parse(&input).unwrap()
        );

        let simple = ClassifiedGrammar::simple_precedence(grammars::addition()).unwrap();
        prop_assert!(simple.functions().is_some());
        let with_functions = PrecedenceParser::new(simple.clone());
        let table_only = PrecedenceParser::new(simple.without_functions());
        prop_assert_eq!(
            with_functions.parse(&input).unwrap(),
            table_only.parse(&input).unwrap()
        );
    }

    // The simple variant applies exactly one production per number: one
    // base reduction and one extension per '+'.
    #[test]
    fn simple_reduction_count_tracks_the_operand_count(
        numbers in proptest::collection::vec(0u32..1000, 1..12),
    ) {
        let parser = PrecedenceParser::new(
            ClassifiedGrammar::simple_precedence(grammars::addition()).unwrap(),
        );
        let input = numbers
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join("+");
        let output = parser.parse(&input).unwrap();
        prop_assert_eq!(output.as_productions().unwrap().len(), numbers.len());
    }

    // Nested balanced inputs reduce innermost first.
    #[test]
    fn balanced_nesting_reduces_inside_out(depth in 0usize..10) {
        let parser = PrecedenceParser::new(
            ClassifiedGrammar::simple_precedence(grammars::balanced()).unwrap(),
        );
        let input = format!("{}c{}", "a".repeat(depth), "b".repeat(depth));
        let output = parser.parse(&input).unwrap();
        let productions = output.as_productions().unwrap();
        prop_assert_eq!(productions.len(), depth + 1);
        prop_assert_eq!(productions[0].to_string(), "S -> c");
        for production in &productions[1..] {
            prop_assert_eq!(production.to_string(), "S -> a S b");
        }
    }
}

#[test]
fn weak_parses_match_operator_structure() {
    // The same arithmetic input through both classes: the operator
    // variant's flattened terminal order mirrors the simple variant's
    // reduction order.
    let operator = PrecedenceParser::new(
        ClassifiedGrammar::operator_precedence(grammars::weak_arithmetic()).unwrap(),
    );
    let simple = PrecedenceParser::new(
        ClassifiedGrammar::simple_precedence(grammars::weak_arithmetic()).unwrap(),
    );

    let by_symbols = operator.parse("1+2*3").unwrap();
    let texts: Vec<&str> = by_symbols
        .as_symbols()
        .unwrap()
        .iter()
        .map(StackSymbol::text)
        .collect();
    assert_eq!(texts, vec!["1", "2", "3", "*", "+"]);

    let by_productions = simple.parse("1+2*3").unwrap();
    let rendered: Vec<String> = by_productions
        .as_productions()
        .unwrap()
        .iter()
        .map(|p| p.to_string())
        .collect();
    assert_eq!(
        rendered,
        vec![
            "term -> factor",
            "expression -> term",
            "term -> factor",
            "term -> term MUL factor",
            "expression -> expression ADD term",
        ]
    );
}
