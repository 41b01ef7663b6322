//! Arithmetic expression parsing example
//!
//! This example demonstrates how to:
//! 1. Build an operator grammar for arithmetic
//! 2. Classify it as operator-precedence and as simple-precedence
//! 3. Inspect the precedence table and functions
//! 4. Parse input through both variants

use floyd::grammar::{ClassifiedGrammar, GrammarBuilder, Terminal};
use floyd::lexer::{CharSet, Pattern};
use floyd::parser::PrecedenceParser;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Arithmetic Precedence Parsing Example ===\n");

    // Step 1: Build the grammar
    println!("1. Building grammar...");
    let grammar = GrammarBuilder::new("arithmetic")
        .terminal(Terminal::literal("ADD", "+"))
        .terminal(Terminal::literal("MUL", "*"))
        .terminal(Terminal::new("factor", Pattern::some(CharSet::digits())))
        .rule("expression", &["expression", "ADD", "term"])
        .rule("expression", &["term"])
        .rule("term", &["term", "MUL", "factor"])
        .rule("term", &["factor"])
        .build()?;

    println!("   Grammar '{}':", grammar.name());
    for production in grammar.productions() {
        println!("     {production}");
    }
    println!("   Start symbol: {}\n", grammar.start());

    // Step 2: Operator-precedence classification
    println!("2. Classifying as operator-precedence...");
    let operator = ClassifiedGrammar::operator_precedence(grammar.clone())?;
    println!("   Table holds {} terminal pairs", operator.table().len());
    match operator.functions() {
        Some(_) => println!("   Precedence functions available\n"),
        None => println!("   Precedence functions unavailable, table lookups only\n"),
    }

    // Step 3: Parse with the operator variant
    let input = "1+2*3";
    println!("3. Operator-precedence parse of {input:?}:");
    let parser = PrecedenceParser::new(operator);
    let output = parser.parse(input)?;
    if let Some(symbols) = output.as_symbols() {
        for (i, symbol) in symbols.iter().enumerate() {
            println!("     [{i}] {symbol}");
        }
    }
    println!();

    // Step 4: The same grammar as simple-precedence is weak
    println!("4. Classifying as simple-precedence...");
    let simple = ClassifiedGrammar::simple_precedence(grammar)?;
    println!(
        "   Weak: {} (functions skipped: {})",
        simple.is_weak(),
        simple.functions().is_none()
    );

    println!("   Simple-precedence parse of {input:?}:");
    let parser = PrecedenceParser::new(simple);
    let output = parser.parse(input)?;
    if let Some(productions) = output.as_productions() {
        for (i, production) in productions.iter().enumerate() {
            println!("     [{i}] {production}");
        }
    }
    println!();

    println!("=== Example completed successfully! ===");

    Ok(())
}
