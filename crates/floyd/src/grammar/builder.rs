use crate::error::GrammarError;
use crate::grammar::{validate, NonTerminal, Production, Symbol, Terminal};
use compact_str::CompactString;
use hashbrown::{HashMap, HashSet};
use smallvec::SmallVec;

/// A validated grammar: terminals, non-terminals, productions and the start
/// symbol. Built once through [`GrammarBuilder`], immutable afterwards, and
/// safely shared by any number of parse calls.
///
/// The terminal list keeps declaration order (the lexer's tie-break) and
/// always ends with the implicit boundary marker `$`.
#[derive(Debug, Clone)]
pub struct Grammar {
    name: CompactString,
    terminals: Vec<Terminal>,
    non_terminals: Vec<NonTerminal>,
    productions: Vec<Production>,
    start: NonTerminal,
    by_lhs: HashMap<NonTerminal, SmallVec<[usize; 4]>, ahash::RandomState>,
}

impl Grammar {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All terminals in declaration order, boundary marker last.
    #[must_use]
    pub fn terminals(&self) -> &[Terminal] {
        &self.terminals
    }

    /// Every distinct rule head, in first-appearance order.
    #[must_use]
    pub fn non_terminals(&self) -> &[NonTerminal] {
        &self.non_terminals
    }

    #[must_use]
    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    #[must_use]
    pub const fn start(&self) -> &NonTerminal {
        &self.start
    }

    /// The implicit end-of-input marker.
    #[must_use]
    pub fn boundary(&self) -> &Terminal {
        // The builder appends the marker last.
        &self.terminals[self.terminals.len() - 1]
    }

    /// Productions whose head is `non_terminal`, in declaration order.
    pub fn productions_for<'a>(
        &'a self,
        non_terminal: &NonTerminal,
    ) -> impl Iterator<Item = &'a Production> + 'a {
        self.by_lhs
            .get(non_terminal)
            .into_iter()
            .flat_map(|indexes| indexes.iter().map(|&i| &self.productions[i]))
    }

    /// Position of `production` in declaration order, if it belongs to this
    /// grammar.
    #[must_use]
    pub fn production_index(&self, production: &Production) -> Option<usize> {
        self.productions.iter().position(|p| p == production)
    }
}

/// Builder for [`Grammar`].
///
/// Right-hand sides are written as symbol names; a name declared with
/// [`terminal`](Self::terminal) resolves to that terminal, anything else is
/// a non-terminal and must be the head of some rule.
///
/// # Example
///
/// ```
/// use floyd::grammar::{GrammarBuilder, Terminal};
/// use floyd::lexer::{CharSet, Pattern};
///
/// let grammar = GrammarBuilder::new("addition")
///     .terminal(Terminal::new("NUMBER", Pattern::some(CharSet::digits())))
///     .terminal(Terminal::literal("ADD", "+"))
///     .rule("expression", &["NUMBER"])
///     .rule("expression", &["expression", "ADD", "NUMBER"])
///     .build()
///     .unwrap();
///
/// assert_eq!(grammar.start().name(), "expression");
/// assert_eq!(grammar.productions().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct GrammarBuilder {
    name: CompactString,
    terminals: Vec<Terminal>,
    rules: Vec<(CompactString, Vec<CompactString>)>,
    start: Option<CompactString>,
}

impl GrammarBuilder {
    #[must_use]
    pub fn new(name: impl Into<CompactString>) -> Self {
        Self {
            name: name.into(),
            terminals: Vec::new(),
            rules: Vec::new(),
            start: None,
        }
    }

    /// Declare a terminal. Declaration order decides lexer tie-breaks.
    #[must_use]
    pub fn terminal(mut self, terminal: Terminal) -> Self {
        self.terminals.push(terminal);
        self
    }

    /// Add a production, right-hand side as symbol names.
    #[must_use]
    pub fn rule(mut self, lhs: &str, rhs: &[&str]) -> Self {
        self.rules.push((
            CompactString::new(lhs),
            rhs.iter().map(|s| CompactString::new(s)).collect(),
        ));
        self
    }

    /// Pick the start symbol explicitly instead of inferring it.
    #[must_use]
    pub fn start(mut self, name: &str) -> Self {
        self.start = Some(CompactString::new(name));
        self
    }

    /// Resolve names, validate, and produce the grammar.
    ///
    /// # Errors
    ///
    /// Any [`GrammarError`] from the structural checks: empty terminal or
    /// production lists, an empty right-hand side, a right-hand-side
    /// non-terminal that heads no rule, a rule head clashing with a
    /// terminal, use of the reserved `$` name, or a missing/ambiguous start
    /// symbol.
    pub fn build(self) -> Result<Grammar, GrammarError> {
        if self.terminals.is_empty() {
            return Err(GrammarError::EmptyTerminals);
        }
        if self.rules.is_empty() {
            return Err(GrammarError::EmptyProductions);
        }

        validate::check_reserved_names(
            self.terminals
                .iter()
                .map(Terminal::name)
                .chain(self.rules.iter().map(|(lhs, _)| lhs.as_str()))
                .chain(self.rules.iter().flat_map(|(_, rhs)| {
                    rhs.iter().map(CompactString::as_str)
                })),
        )?;

        let terminal_by_name: HashMap<&str, &Terminal> = self
            .terminals
            .iter()
            .map(|t| (t.name(), t))
            .collect();

        let heads: HashSet<&str> = self.rules.iter().map(|(lhs, _)| lhs.as_str()).collect();
        for (lhs, _) in &self.rules {
            if terminal_by_name.contains_key(lhs.as_str()) {
                return Err(GrammarError::TerminalAsRuleHead {
                    name: lhs.to_string(),
                });
            }
        }

        let mut productions = Vec::with_capacity(self.rules.len());
        for (lhs, rhs_names) in &self.rules {
            let mut rhs = Vec::with_capacity(rhs_names.len());
            for name in rhs_names {
                if let Some(terminal) = terminal_by_name.get(name.as_str()) {
                    rhs.push(Symbol::Terminal((*terminal).clone()));
                } else if heads.contains(name.as_str()) {
                    rhs.push(Symbol::NonTerminal(NonTerminal::new(name.clone())));
                } else {
                    return Err(GrammarError::UndefinedNonTerminal {
                        name: name.to_string(),
                    });
                }
            }
            productions.push(Production::new(NonTerminal::new(lhs.clone()), rhs)?);
        }

        validate::check_rhs_defined(&productions)?;
        let start = validate::resolve_start(&productions, self.start.as_deref())?;

        let mut non_terminals: Vec<NonTerminal> = Vec::new();
        let mut by_lhs: HashMap<NonTerminal, SmallVec<[usize; 4]>, ahash::RandomState> =
            HashMap::with_hasher(ahash::RandomState::new());
        for (index, production) in productions.iter().enumerate() {
            let head = production.lhs().clone();
            if !non_terminals.contains(&head) {
                non_terminals.push(head.clone());
            }
            by_lhs.entry(head).or_default().push(index);
        }

        let mut terminals = self.terminals;
        terminals.push(Terminal::boundary());

        Ok(Grammar {
            name: self.name,
            terminals,
            non_terminals,
            productions,
            start,
            by_lhs,
        })
    }
}
