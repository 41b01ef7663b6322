//! floyd-parse
//!
//! Loads a grammar file, classifies it for the requested precedence class,
//! parses the input string, and renders the result.

use clap::Parser;
use floyd::grammar::ClassifiedGrammar;
use floyd::parser::{ParseOutput, PrecedenceParser};
use floyd_tools::cli::{Cli, OutputMode, TargetClass};
use floyd_tools::{reader, transform};
use std::fs;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let source = fs::read_to_string(&cli.grammar)
        .map_err(|err| format!("cannot read {}: {err}", cli.grammar.display()))?;
    let grammar = reader::parse_grammar(&source)?;

    let classified = match cli.class {
        TargetClass::Operator => ClassifiedGrammar::operator_precedence(grammar)?,
        TargetClass::Simple => ClassifiedGrammar::simple_precedence(grammar)?,
    };
    if classified.is_weak() {
        eprintln!("note: weak precedence grammar, parsing through table lookups");
    }

    let parser = PrecedenceParser::new(classified);
    let output = parser.parse(&cli.input)?;

    let mode = match (cli.output, &output) {
        (OutputMode::Auto, ParseOutput::Symbols(_)) => OutputMode::Symbols,
        (OutputMode::Auto, ParseOutput::Productions(_)) => OutputMode::Productions,
        (mode, _) => mode,
    };

    match mode {
        OutputMode::Symbols => {
            let symbols = output
                .as_symbols()
                .ok_or("symbol output needs --class operator")?;
            for symbol in symbols {
                println!("{symbol}");
            }
        }
        OutputMode::Productions => {
            let productions = output
                .as_productions()
                .ok_or("production output needs --class simple")?;
            for production in productions {
                println!("{production}");
            }
        }
        OutputMode::Derivation => {
            let productions = output
                .as_productions()
                .ok_or("derivations need --class simple")?;
            let forms = transform::derivation(parser.grammar().start(), productions)?;
            for (index, form) in forms.iter().enumerate() {
                if index == 0 {
                    println!("{form}");
                } else {
                    println!("=> {form}");
                }
            }
        }
        OutputMode::Tree => {
            let productions = output
                .as_productions()
                .ok_or("parse trees need --class simple")?;
            let tree = transform::parse_tree(productions)?;
            print!("{}", transform::render_tree(&tree));
        }
        OutputMode::Json => match &output {
            ParseOutput::Symbols(symbols) => {
                let texts: Vec<&str> = symbols.iter().map(|s| s.text()).collect();
                println!("{}", serde_json::json!({ "symbols": texts }));
            }
            ParseOutput::Productions(productions) => {
                let tree = transform::parse_tree(productions)?;
                println!("{}", transform::tree_to_json(&tree));
            }
        },
        OutputMode::Auto => unreachable!("auto resolves against the parse output"),
    }

    Ok(())
}
