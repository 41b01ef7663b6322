//! CLI surface for floyd-parse.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "floyd-parse")]
#[command(about = "Parse input with a precedence grammar")]
#[command(version)]
pub struct Cli {
    /// Grammar file to load
    #[arg(short, long)]
    pub grammar: PathBuf,

    /// Target grammar class
    #[arg(short, long, default_value = "operator")]
    pub class: TargetClass,

    /// Output rendering
    #[arg(short, long, default_value = "auto")]
    pub output: OutputMode,

    /// Input string to parse
    pub input: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetClass {
    Operator,
    Simple,
}

impl std::str::FromStr for TargetClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "operator" | "operator-precedence" => Ok(Self::Operator),
            "simple" | "simple-precedence" => Ok(Self::Simple),
            _ => Err(format!("unknown class: {s}. Supported: operator, simple")),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputMode {
    /// Symbols for the operator class, productions for the simple class.
    Auto,
    Symbols,
    Productions,
    Derivation,
    Tree,
    Json,
}

impl std::str::FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "symbols" => Ok(Self::Symbols),
            "productions" => Ok(Self::Productions),
            "derivation" => Ok(Self::Derivation),
            "tree" => Ok(Self::Tree),
            "json" => Ok(Self::Json),
            _ => Err(format!(
                "unknown output mode: {s}. Supported: auto, symbols, productions, derivation, tree, json"
            )),
        }
    }
}
