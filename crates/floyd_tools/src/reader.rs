//! Line-oriented grammar file reader.
//!
//! ```text
//! # comments and blank lines are ignored
//! grammar arithmetic
//! start expression
//! terminal NUMBER [0-9]+
//! terminal ADD '+'
//! rule expression -> expression ADD NUMBER
//! rule expression -> NUMBER
//! ```
//!
//! The `start` directive is optional; without it the start symbol is
//! inferred. Terminal patterns use a small regex-like surface:
//! single-quoted literals, `[a-z0-9]` character classes (single characters
//! and ranges), postfix `+` `*` `?`, juxtaposition for sequencing, and `|`
//! between alternatives.

use floyd::error::GrammarError;
use floyd::grammar::{Grammar, GrammarBuilder, Terminal};
use floyd::lexer::{CharSet, Pattern};
use thiserror::Error;

/// Why a grammar file could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadError {
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error(transparent)]
    Grammar(#[from] GrammarError),
}

fn syntax(line: usize, message: impl Into<String>) -> ReadError {
    ReadError::Syntax {
        line,
        message: message.into(),
    }
}

/// Parse the text of a grammar file into a validated [`Grammar`].
///
/// # Errors
///
/// [`ReadError::Syntax`] with a 1-based line number for malformed lines,
/// [`ReadError::Grammar`] when the collected grammar fails validation.
pub fn parse_grammar(source: &str) -> Result<Grammar, ReadError> {
    let mut name: Option<String> = None;
    let mut start: Option<String> = None;
    let mut terminals: Vec<Terminal> = Vec::new();
    let mut rules: Vec<(String, Vec<String>)> = Vec::new();

    for (index, raw) in source.lines().enumerate() {
        let line = index + 1;
        let text = raw.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }

        let (directive, rest) = text
            .split_once(char::is_whitespace)
            .ok_or_else(|| syntax(line, format!("'{text}' is missing its arguments")))?;
        let rest = rest.trim();

        match directive {
            "grammar" => {
                if name.replace(rest.to_string()).is_some() {
                    return Err(syntax(line, "duplicate 'grammar' directive"));
                }
            }
            "start" => {
                if start.replace(rest.to_string()).is_some() {
                    return Err(syntax(line, "duplicate 'start' directive"));
                }
            }
            "terminal" => {
                let (terminal_name, pattern_source) = rest
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| syntax(line, "expected 'terminal <name> <pattern>'"))?;
                let pattern = parse_pattern(pattern_source.trim())
                    .map_err(|message| syntax(line, message))?;
                terminals.push(Terminal::new(terminal_name, pattern));
            }
            "rule" => {
                let (lhs, rhs) = rest
                    .split_once("->")
                    .ok_or_else(|| syntax(line, "expected 'rule <head> -> <symbols>'"))?;
                let symbols: Vec<String> = rhs.split_whitespace().map(str::to_string).collect();
                if symbols.is_empty() {
                    return Err(syntax(line, "a rule needs at least one symbol"));
                }
                rules.push((lhs.trim().to_string(), symbols));
            }
            other => return Err(syntax(line, format!("unknown directive '{other}'"))),
        }
    }

    let mut builder = GrammarBuilder::new(name.unwrap_or_else(|| "grammar".to_string()));
    for terminal in terminals {
        builder = builder.terminal(terminal);
    }
    for (lhs, symbols) in &rules {
        let names: Vec<&str> = symbols.iter().map(String::as_str).collect();
        builder = builder.rule(lhs, &names);
    }
    if let Some(start) = &start {
        builder = builder.start(start);
    }
    Ok(builder.build()?)
}

/// Compile the pattern surface syntax into a [`Pattern`].
fn parse_pattern(source: &str) -> Result<Pattern, String> {
    let chars: Vec<char> = source.chars().collect();
    let mut pos = 0;
    let pattern = parse_alternatives(&chars, &mut pos)?;
    if pos != chars.len() {
        return Err(format!("unexpected '{}' in pattern", chars[pos]));
    }
    Ok(pattern)
}

fn parse_alternatives(chars: &[char], pos: &mut usize) -> Result<Pattern, String> {
    let mut alternatives = vec![parse_sequence(chars, pos)?];
    while chars.get(*pos) == Some(&'|') {
        *pos += 1;
        alternatives.push(parse_sequence(chars, pos)?);
    }
    if alternatives.len() == 1 {
        Ok(alternatives.remove(0))
    } else {
        Ok(Pattern::Choice(alternatives))
    }
}

fn parse_sequence(chars: &[char], pos: &mut usize) -> Result<Pattern, String> {
    let mut parts = Vec::new();
    while let Some(&c) = chars.get(*pos) {
        if c == '|' {
            break;
        }
        let atom = match c {
            '\'' => parse_literal(chars, pos)?,
            '[' => parse_class(chars, pos)?,
            other => return Err(format!("unexpected '{other}' in pattern")),
        };
        let atom = match chars.get(*pos) {
            Some('+') => {
                *pos += 1;
                Pattern::repeat(atom, 1, None)
            }
            Some('*') => {
                *pos += 1;
                Pattern::repeat(atom, 0, None)
            }
            Some('?') => {
                *pos += 1;
                Pattern::repeat(atom, 0, Some(1))
            }
            _ => atom,
        };
        parts.push(atom);
    }
    match parts.len() {
        0 => Err("empty pattern".to_string()),
        1 => Ok(parts.remove(0)),
        _ => Ok(Pattern::Seq(parts)),
    }
}

fn parse_literal(chars: &[char], pos: &mut usize) -> Result<Pattern, String> {
    // Opening quote.
    *pos += 1;
    let start = *pos;
    while let Some(&c) = chars.get(*pos) {
        if c == '\'' {
            let text: String = chars[start..*pos].iter().collect();
            *pos += 1;
            if text.is_empty() {
                return Err("empty literal".to_string());
            }
            return Ok(Pattern::literal(text));
        }
        *pos += 1;
    }
    Err("unterminated literal".to_string())
}

fn parse_class(chars: &[char], pos: &mut usize) -> Result<Pattern, String> {
    // Opening bracket.
    *pos += 1;
    let mut ranges: Vec<(char, char)> = Vec::new();
    loop {
        let Some(&c) = chars.get(*pos) else {
            return Err("unterminated character class".to_string());
        };
        if c == ']' {
            *pos += 1;
            if ranges.is_empty() {
                return Err("empty character class".to_string());
            }
            return Ok(Pattern::class(CharSet::new(ranges)));
        }
        *pos += 1;
        if chars.get(*pos) == Some(&'-') && chars.get(*pos + 1).is_some_and(|&next| next != ']') {
            let end = chars[*pos + 1];
            *pos += 2;
            if end < c {
                return Err(format!("inverted range '{c}-{end}'"));
            }
            ranges.push((c, end));
        } else {
            ranges.push((c, c));
        }
    }
}
