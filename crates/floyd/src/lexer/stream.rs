use crate::error::LexerError;
use crate::grammar::Grammar;
use crate::lexer::Lexeme;
use compact_str::CompactString;
use hashbrown::HashMap;

/// Longest characters kept in a lexer error's input preview.
const PREVIEW_CHARS: usize = 16;

/// Greedy longest-match tokenizer over a grammar's terminals.
///
/// At each position every terminal (boundary marker included) reports the
/// length of the longest input prefix it matches; the greatest length wins.
/// Ties between equally long matches resolve by terminal declaration
/// order, first declared wins. A position no terminal matches is a
/// [`LexerError`] carrying a bounded preview of the offending input.
///
/// [`peek`](Self::peek) buffers one lexeme, so looking ahead never skews
/// the per-terminal occurrence counters.
pub struct Lexer<'a> {
    grammar: &'a Grammar,
    input: &'a str,
    pos: usize,
    counts: HashMap<CompactString, usize, ahash::RandomState>,
    peeked: Option<Lexeme>,
}

impl<'a> Lexer<'a> {
    #[must_use]
    pub fn new(grammar: &'a Grammar, input: &'a str) -> Self {
        Self {
            grammar,
            input,
            pos: 0,
            counts: HashMap::with_hasher(ahash::RandomState::new()),
            peeked: None,
        }
    }

    /// Whether any input remains, buffered or unscanned.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.peeked.is_some() || self.pos < self.input.len()
    }

    /// The next lexeme without consuming it.
    ///
    /// # Errors
    ///
    /// [`LexerError`] when no terminal matches the current position.
    pub fn peek(&mut self) -> Result<&Lexeme, LexerError> {
        let lexeme = match self.peeked.take() {
            Some(lexeme) => lexeme,
            None => self.scan()?,
        };
        Ok(self.peeked.insert(lexeme))
    }

    /// Consume and return the next lexeme.
    ///
    /// # Errors
    ///
    /// [`LexerError`] when no terminal matches the current position.
    pub fn next_lexeme(&mut self) -> Result<Lexeme, LexerError> {
        match self.peeked.take() {
            Some(lexeme) => Ok(lexeme),
            None => self.scan(),
        }
    }

    fn scan(&mut self) -> Result<Lexeme, LexerError> {
        let rest = &self.input[self.pos..];

        let mut best: Option<(usize, usize)> = None;
        for (index, terminal) in self.grammar.terminals().iter().enumerate() {
            let len = terminal.match_len(rest);
            // Strictly greater keeps the earliest declaration on ties.
            if len > 0 && best.map_or(true, |(b, _)| len > b) {
                best = Some((len, index));
            }
        }

        let Some((len, index)) = best else {
            return Err(LexerError::new(self.pos, preview(rest)));
        };

        let terminal = self.grammar.terminals()[index].clone();
        let occurrence = {
            let count = self
                .counts
                .entry(CompactString::new(terminal.name()))
                .or_insert(0);
            *count += 1;
            *count
        };
        let lexeme = Lexeme::new(&rest[..len], terminal, occurrence, self.pos);
        self.pos += len;
        Ok(lexeme)
    }
}

fn preview(rest: &str) -> String {
    let mut preview: String = rest.chars().take(PREVIEW_CHARS).collect();
    if rest.chars().count() > PREVIEW_CHARS {
        preview.push_str("...");
    }
    preview
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{GrammarBuilder, Terminal};
    use crate::lexer::{CharSet, Pattern};
    use proptest::prelude::*;

    fn addition() -> Grammar {
        GrammarBuilder::new("addition")
            .terminal(Terminal::new("NUMBER", Pattern::some(CharSet::digits())))
            .terminal(Terminal::literal("ADD", "+"))
            .rule("expression", &["NUMBER"])
            .rule("expression", &["expression", "ADD", "NUMBER"])
            .build()
            .unwrap()
    }

    fn all_lexemes(grammar: &Grammar, input: &str) -> Vec<Lexeme> {
        let mut lexer = Lexer::new(grammar, input);
        let mut out = Vec::new();
        while lexer.has_next() {
            out.push(lexer.next_lexeme().unwrap());
        }
        out
    }

    #[test]
    fn maximal_munch_takes_the_longest_match() {
        let grammar = addition();
        let lexemes = all_lexemes(&grammar, "42+317");
        let texts: Vec<&str> = lexemes.iter().map(Lexeme::text).collect();
        assert_eq!(texts, vec!["42", "+", "317"]);
        let names: Vec<&str> = lexemes.iter().map(|l| l.terminal().name()).collect();
        assert_eq!(names, vec!["NUMBER", "ADD", "NUMBER"]);
    }

    #[test]
    fn occurrence_counters_are_per_terminal_and_one_based() {
        let grammar = addition();
        let lexemes = all_lexemes(&grammar, "1+2+3");
        let occurrences: Vec<(usize, &str)> = lexemes
            .iter()
            .map(|l| (l.occurrence(), l.terminal().name()))
            .collect();
        assert_eq!(
            occurrences,
            vec![
                (1, "NUMBER"),
                (1, "ADD"),
                (2, "NUMBER"),
                (2, "ADD"),
                (3, "NUMBER"),
            ]
        );
    }

    #[test]
    fn peeking_neither_consumes_nor_double_counts() {
        let grammar = addition();
        let mut lexer = Lexer::new(&grammar, "7+8");
        assert_eq!(lexer.peek().unwrap().text(), "7");
        assert_eq!(lexer.peek().unwrap().text(), "7");
        let first = lexer.next_lexeme().unwrap();
        assert_eq!(first.text(), "7");
        assert_eq!(first.occurrence(), 1);
        let second = lexer.next_lexeme().unwrap();
        assert_eq!(second.text(), "+");
        let third = lexer.next_lexeme().unwrap();
        assert_eq!(third.occurrence(), 2);
        assert!(!lexer.has_next());
    }

    #[test]
    fn declaration_order_breaks_ties() {
        // Both terminals match "ab" with length 2; the first declared wins.
        let grammar = GrammarBuilder::new("ties")
            .terminal(Terminal::literal("FIRST", "ab"))
            .terminal(Terminal::literal("SECOND", "ab"))
            .rule("s", &["FIRST", "SECOND"])
            .build()
            .unwrap();
        let lexemes = all_lexemes(&grammar, "abab");
        assert!(lexemes.iter().all(|l| l.terminal().name() == "FIRST"));
    }

    #[test]
    fn a_longer_match_beats_an_earlier_declaration() {
        let grammar = GrammarBuilder::new("longest")
            .terminal(Terminal::literal("LT", "<"))
            .terminal(Terminal::literal("LE", "<="))
            .rule("s", &["LT", "LE"])
            .build()
            .unwrap();
        let lexemes = all_lexemes(&grammar, "<=<");
        let names: Vec<&str> = lexemes.iter().map(|l| l.terminal().name()).collect();
        assert_eq!(names, vec!["LE", "LT"]);
    }

    #[test]
    fn unmatched_input_reports_a_bounded_preview() {
        let grammar = addition();
        let mut lexer = Lexer::new(&grammar, "1+@@@@@@@@@@@@@@@@@@@@@@@@");
        lexer.next_lexeme().unwrap();
        lexer.next_lexeme().unwrap();
        let err = lexer.next_lexeme().unwrap_err();
        assert_eq!(err.offset(), 2);
        assert_eq!(err.preview, format!("{}...", "@".repeat(PREVIEW_CHARS)));
    }

    #[test]
    fn the_boundary_marker_is_lexable() {
        let grammar = addition();
        let lexemes = all_lexemes(&grammar, "1$");
        assert_eq!(lexemes[1].terminal().name(), "$");
        assert!(lexemes[1].terminal().is_boundary());
    }

    proptest! {
        // Any concatenation of terminal texts tokenizes back to the same
        // terminal sequence. NUMBER runs merge under maximal munch, so
        // consecutive numbers are collapsed in the expectation.
        #[test]
        fn concatenated_terminals_round_trip(choices in proptest::collection::vec(0usize..2, 1..32)) {
            let grammar = addition();
            let mut input = String::new();
            let mut expected: Vec<&str> = Vec::new();
            for &choice in &choices {
                let (name, text) = [("NUMBER", "9"), ("ADD", "+")][choice];
                input.push_str(text);
                if choice == 0 && expected.last() == Some(&"NUMBER") {
                    continue;
                }
                expected.push(name);
            }
            let names: Vec<String> = all_lexemes(&grammar, &input)
                .iter()
                .map(|l| l.terminal().name().to_string())
                .collect();
            prop_assert_eq!(names, expected);
        }
    }
}
