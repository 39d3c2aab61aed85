//! Root-word patterns: which token sequence a sentence must start (or end) with.

use crate::model::Token;

/// Constraint on a single token of a [RootPattern].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenConstraint {
    /// Token text equals the value, ignoring case
    Lower(String),
    /// Token text equals the value exactly
    Text(String),
    /// Token is (or is not) punctuation
    IsPunct(bool),
}

impl TokenConstraint {
    /// Returns `true` if `token` satisfies this constraint.
    pub fn matches(&self, token: &Token) -> bool {
        match self {
            TokenConstraint::Lower(lower) => token.text().to_lowercase() == lower.to_lowercase(),
            TokenConstraint::Text(text) => token.text() == text,
            TokenConstraint::IsPunct(is_punct) => token.is_punct() == *is_punct,
        }
    }
}

/// Ordered token constraints locating the root word(s) in a sentence.
///
/// # Example
/// ```
/// use text_tree::model::Sentence;
/// use text_tree::segment::RootPattern;
///
/// let pattern = RootPattern::words("of course");
/// let sentence = Sentence::from_words("Of course it is");
/// assert!(pattern.matches_at(sentence.tokens(), 0));
/// assert!(!pattern.matches_at(sentence.tokens(), 1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RootPattern {
    constraints: Vec<TokenConstraint>,
}

impl RootPattern {
    /// Creates a pattern from constraints, one per token.
    pub fn new(constraints: Vec<TokenConstraint>) -> Self {
        RootPattern { constraints }
    }

    /// Pattern matching a single word, ignoring case.
    pub fn word<S: Into<String>>(word: S) -> Self {
        RootPattern::new(vec![TokenConstraint::Lower(word.into())])
    }

    /// Pattern matching whitespace-separated words, ignoring case.
    pub fn words(words: &str) -> Self {
        RootPattern::new(
            words
                .split_whitespace()
                .map(|w| TokenConstraint::Lower(w.to_string()))
                .collect(),
        )
    }

    /// Returns the constraints.
    pub fn constraints(&self) -> &[TokenConstraint] {
        &self.constraints
    }

    /// Returns the number of tokens a match spans.
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    /// Returns `true` if the pattern has no constraints.
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Returns `true` if the pattern matches `tokens` starting at `start`.
    pub fn matches_at(&self, tokens: &[Token], start: usize) -> bool {
        let Some(window) = tokens.get(start..start + self.len()) else {
            return false;
        };
        !self.is_empty() && self.constraints.iter().zip(window).all(|(c, t)| c.matches(t))
    }
}
