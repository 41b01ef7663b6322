//! # Shift-Reduce Parser
//!
//! The precedence-driven parse loop shared by both grammar classes.
//!
//! Input is wrapped with the boundary marker and scanned lazily; while the
//! lexer has characters left, the relation between the stack top and the
//! peeked lookahead decides the move. An empty stack always shifts;
//! `less-than`, `equals` and the weak merged relation shift; `greater-than`
//! reduces; anything else is a syntax error naming the offending lexeme.
//!
//! The operator-precedence variant reduces by popping raw symbols until the
//! relation to the new stack top is `less-than`, and its output is that
//! flat pop order. The simple-precedence variant descends the reversed
//! right-hand-side trie in lock-step with the same pop loop, identifies the
//! production at the stop node (nearest leaf), pushes its head back, and
//! outputs productions. Relations go through precedence functions when the
//! classification produced them, else through the table.

pub mod trie;

use crate::error::ParseError;
use crate::grammar::{
    ClassifiedGrammar, Grammar, NonTerminal, PrecedenceVariant, Production, Symbol, BOUNDARY_CHAR,
};
use crate::lexer::{Lexeme, Lexer};
use crate::precedence::Relation;
use std::fmt;
use trie::RhsTrie;

/// One entry of a parse stack: a shifted terminal instance, or the head of
/// an already-reduced production.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackSymbol {
    Lexeme(Lexeme),
    NonTerminal(NonTerminal),
}

impl StackSymbol {
    /// The underlying grammar symbol, for relation lookups and trie
    /// descent.
    #[must_use]
    pub fn symbol(&self) -> Symbol {
        match self {
            Self::Lexeme(lexeme) => lexeme.symbol(),
            Self::NonTerminal(non_terminal) => Symbol::NonTerminal(non_terminal.clone()),
        }
    }

    /// The matched input text for shifted terminals, the symbol name
    /// otherwise.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Lexeme(lexeme) => lexeme.text(),
            Self::NonTerminal(non_terminal) => non_terminal.name(),
        }
    }
}

impl fmt::Display for StackSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// A parse call's result, in reduction order — the reverse of a rightmost
/// derivation read right to left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutput {
    /// Raw popped symbols, from the operator-precedence variant.
    Symbols(Vec<StackSymbol>),
    /// Identified productions, from the simple-precedence variant.
    Productions(Vec<Production>),
}

impl ParseOutput {
    #[must_use]
    pub fn as_symbols(&self) -> Option<&[StackSymbol]> {
        match self {
            Self::Symbols(symbols) => Some(symbols),
            Self::Productions(_) => None,
        }
    }

    #[must_use]
    pub fn as_productions(&self) -> Option<&[Production]> {
        match self {
            Self::Productions(productions) => Some(productions),
            Self::Symbols(_) => None,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Symbols(symbols) => symbols.len(),
            Self::Productions(productions) => productions.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

enum Engine {
    Operator,
    Simple { trie: RhsTrie },
}

/// A reusable parser over a classified grammar.
///
/// Construction is cheap for the operator variant and builds the
/// production-recovery trie once for the simple variant. The parser holds
/// no per-call state: each [`parse`](Self::parse) owns its stack and output
/// list, so one parser may serve many inputs.
pub struct PrecedenceParser {
    classified: ClassifiedGrammar,
    engine: Engine,
}

impl PrecedenceParser {
    #[must_use]
    pub fn new(classified: ClassifiedGrammar) -> Self {
        let engine = match classified.variant() {
            PrecedenceVariant::OperatorPrecedence => Engine::Operator,
            PrecedenceVariant::SimplePrecedence => Engine::Simple {
                trie: RhsTrie::build(classified.grammar()),
            },
        };
        Self { classified, engine }
    }

    #[must_use]
    pub const fn classified(&self) -> &ClassifiedGrammar {
        &self.classified
    }

    #[must_use]
    pub const fn grammar(&self) -> &Grammar {
        self.classified.grammar()
    }

    /// Parse `input`, returning the reduction-ordered output list.
    ///
    /// # Errors
    ///
    /// [`ParseError::Lexer`] when tokenization fails,
    /// [`ParseError::UnexpectedToken`] when no shift/reduce decision
    /// exists, and [`ParseError::ReductionMismatch`] when a reduced handle
    /// matches no production (a grammar/table mismatch).
    pub fn parse(&self, input: &str) -> Result<ParseOutput, ParseError> {
        let mut wrapped = String::with_capacity(input.len() + 1);
        wrapped.push_str(input);
        wrapped.push(BOUNDARY_CHAR);
        let mut lexer = Lexer::new(self.grammar(), &wrapped);

        match &self.engine {
            Engine::Operator => self.parse_operator(&mut lexer),
            Engine::Simple { trie } => self.parse_simple(&mut lexer, trie),
        }
    }

    /// The relation between two symbols, through precedence functions when
    /// available, else the table.
    fn relation(&self, left: &Symbol, right: &Symbol) -> Option<Relation> {
        match self.classified.functions() {
            Some(functions) => functions.relation(left, right),
            None => self.classified.table().relation(left, right),
        }
    }

    fn decide(&self, top: Option<&Symbol>, lookahead: &Lexeme) -> Result<Move, ParseError> {
        let Some(top) = top else {
            return Ok(Move::Shift);
        };
        match self.relation(top, &lookahead.symbol()) {
            Some(relation) if relation.shifts() => Ok(Move::Shift),
            Some(Relation::GreaterThan) => Ok(Move::Reduce),
            _ => Err(ParseError::UnexpectedToken {
                text: lookahead.text().to_string(),
                offset: lookahead.offset(),
            }),
        }
    }

    fn parse_operator(&self, lexer: &mut Lexer<'_>) -> Result<ParseOutput, ParseError> {
        let mut stack: Vec<Lexeme> = Vec::new();
        let mut output: Vec<StackSymbol> = Vec::new();

        while lexer.has_next() {
            let top = stack.last().map(Lexeme::symbol);
            let decision = self.decide(top.as_ref(), lexer.peek()?)?;
            match decision {
                Move::Shift => stack.push(lexer.next_lexeme()?),
                Move::Reduce => self.reduce_operator(&mut stack, &mut output),
            }
        }

        Ok(ParseOutput::Symbols(output))
    }

    /// Pop the handle, emitting each symbol, until the relation between the
    /// new stack top and the last popped symbol marks the left boundary.
    fn reduce_operator(&self, stack: &mut Vec<Lexeme>, output: &mut Vec<StackSymbol>) {
        while let Some(popped) = stack.pop() {
            let popped_symbol = popped.symbol();
            output.push(StackSymbol::Lexeme(popped));
            let Some(top) = stack.last() else {
                break;
            };
            match self.relation(&top.symbol(), &popped_symbol) {
                Some(Relation::Equals | Relation::GreaterThan | Relation::LessThanOrEquals) => {}
                // Less-than is the handle's left boundary; an undefined
                // relation only occurs on malformed stacks and stops too.
                Some(Relation::LessThan) | None => break,
            }
        }
    }

    fn parse_simple(
        &self,
        lexer: &mut Lexer<'_>,
        trie: &RhsTrie,
    ) -> Result<ParseOutput, ParseError> {
        let mut stack: Vec<StackSymbol> = Vec::new();
        let mut output: Vec<Production> = Vec::new();

        while lexer.has_next() {
            let top = stack.last().map(StackSymbol::symbol);
            let decision = self.decide(top.as_ref(), lexer.peek()?)?;
            match decision {
                Move::Shift => stack.push(StackSymbol::Lexeme(lexer.next_lexeme()?)),
                Move::Reduce => self.reduce_simple(&mut stack, &mut output, trie)?,
            }
        }

        Ok(ParseOutput::Productions(output))
    }

    /// The operator pop loop run in lock-step with the reversed-rhs trie.
    ///
    /// On the weak merged boundary the trie arbitrates: popping continues
    /// only while it can extend the handle. The node where the loop stops
    /// identifies the production via its nearest leaf; its head replaces
    /// the handle on the stack.
    fn reduce_simple(
        &self,
        stack: &mut Vec<StackSymbol>,
        output: &mut Vec<Production>,
        trie: &RhsTrie,
    ) -> Result<(), ParseError> {
        let mut node = trie::ROOT;
        let mut last_popped: Option<Symbol> = None;

        while let Some(popped) = stack.pop() {
            let symbol = popped.symbol();
            node = trie
                .child(node, &symbol)
                .ok_or_else(|| ParseError::ReductionMismatch {
                    symbol: symbol.name().to_string(),
                })?;

            let stop = match stack.last() {
                None => true,
                Some(below) => {
                    let below_symbol = below.symbol();
                    match self.relation(&below_symbol, &symbol) {
                        Some(Relation::Equals) => false,
                        // The weak boundary: keep popping only while the
                        // trie can extend the handle.
                        Some(Relation::LessThanOrEquals) => {
                            trie.child(node, &below_symbol).is_none()
                        }
                        Some(Relation::LessThan | Relation::GreaterThan) | None => true,
                    }
                }
            };
            last_popped = Some(symbol);
            if stop {
                break;
            }
        }

        let production_index =
            trie.nearest_production(node)
                .ok_or_else(|| ParseError::ReductionMismatch {
                    symbol: last_popped
                        .as_ref()
                        .map_or_else(String::new, |s| s.name().to_string()),
                })?;
        let production = self.grammar().productions()[production_index].clone();
        stack.push(StackSymbol::NonTerminal(production.lhs().clone()));
        output.push(production);
        Ok(())
    }
}

enum Move {
    Shift,
    Reduce,
}
