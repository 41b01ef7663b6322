use compact_str::CompactString;

/// A terminal's matcher, interpreted directly against the remaining input.
///
/// Matching is greedy and answers one question: how long is the longest
/// prefix of the input this pattern matches? Sequences commit to each
/// part's greedy match in turn; there is no backtracking across `Seq`
/// boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    /// Exact text.
    Literal(CompactString),
    /// A single character drawn from a set of ranges.
    CharClass(CharSet),
    /// `pattern` repeated at least `min` and at most `max` times
    /// (unbounded when `max` is `None`).
    Repeat {
        pattern: Box<Pattern>,
        min: usize,
        max: Option<usize>,
    },
    /// Each part in order.
    Seq(Vec<Pattern>),
    /// The longest-matching alternative wins.
    Choice(Vec<Pattern>),
}

impl Pattern {
    /// Exact-text pattern.
    #[must_use]
    pub fn literal(text: impl Into<CompactString>) -> Self {
        Self::Literal(text.into())
    }

    /// Single-character pattern over a character set.
    #[must_use]
    pub const fn class(set: CharSet) -> Self {
        Self::CharClass(set)
    }

    /// `pattern` repeated `min..=max` times.
    #[must_use]
    pub fn repeat(pattern: Self, min: usize, max: Option<usize>) -> Self {
        Self::Repeat {
            pattern: Box::new(pattern),
            min,
            max,
        }
    }

    /// One or more repetitions of a character class, the common shape for
    /// numbers and names.
    #[must_use]
    pub fn some(set: CharSet) -> Self {
        Self::repeat(Self::CharClass(set), 1, None)
    }

    /// Length in bytes of the longest prefix of `input` this pattern
    /// matches, or `None` when it does not match at all.
    ///
    /// `Some(0)` is possible for patterns that match the empty string
    /// (a `Repeat` with `min == 0`); callers that need progress must treat
    /// it as a non-match.
    #[must_use]
    pub fn longest_match(&self, input: &str) -> Option<usize> {
        match self {
            Self::Literal(text) => input.starts_with(text.as_str()).then(|| text.len()),
            Self::CharClass(set) => {
                let first = input.chars().next()?;
                set.contains(first).then(|| first.len_utf8())
            }
            Self::Repeat { pattern, min, max } => {
                let mut consumed = 0;
                let mut count = 0;
                while max.map_or(true, |m| count < m) {
                    match pattern.longest_match(&input[consumed..]) {
                        // A zero-length inner match cannot make progress.
                        Some(len) if len > 0 => {
                            consumed += len;
                            count += 1;
                        }
                        _ => break,
                    }
                }
                (count >= *min).then_some(consumed)
            }
            Self::Seq(parts) => {
                let mut consumed = 0;
                for part in parts {
                    consumed += part.longest_match(&input[consumed..])?;
                }
                Some(consumed)
            }
            Self::Choice(parts) => parts
                .iter()
                .filter_map(|part| part.longest_match(input))
                .max(),
        }
    }
}

/// A set of character ranges for [`Pattern::CharClass`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharSet {
    ranges: Vec<(char, char)>,
}

impl CharSet {
    /// Character set over inclusive ranges.
    #[must_use]
    pub const fn new(ranges: Vec<(char, char)>) -> Self {
        Self { ranges }
    }

    /// A single character.
    #[must_use]
    pub fn single(c: char) -> Self {
        Self::new(vec![(c, c)])
    }

    /// `[0-9]`
    #[must_use]
    pub fn digits() -> Self {
        Self::new(vec![('0', '9')])
    }

    /// `[a-zA-Z]`
    #[must_use]
    pub fn letters() -> Self {
        Self::new(vec![('a', 'z'), ('A', 'Z')])
    }

    /// Space, tab, carriage return and newline.
    #[must_use]
    pub fn whitespace() -> Self {
        Self::new(vec![(' ', ' '), ('\t', '\t'), ('\r', '\r'), ('\n', '\n')])
    }

    /// Whether `c` falls in any range.
    #[must_use]
    pub fn contains(&self, c: char) -> bool {
        self.ranges.iter().any(|(start, end)| c >= *start && c <= *end)
    }
}
