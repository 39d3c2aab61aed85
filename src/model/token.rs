//! Token records as supplied by a sentence segmenter.
//!
//! * [Token] - one lexical unit with its trailing-whitespace flag
//! * [Sentence] - ordered tokens, index 0 nearest the matched root word
//! * [DocumentSentences] - per-document sentences, references and attributes,
//!   kept index-aligned

use crate::error::{Result, TextTreeError};
use crate::model::attributes::ExtraAttributes;

// =#========================================================================#=
// TOKEN
// =#========================================================================#=
/// One lexical unit of a sentence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    text: String,
    whitespace: bool,
    is_punct: bool,
}

impl Token {
    /// Creates a new token.
    ///
    /// # Arguments
    /// * `text` - Original token text (case is retained)
    /// * `whitespace` - Whether the token was followed by whitespace
    /// * `is_punct` - Whether the token is punctuation
    pub fn new<S: Into<String>>(text: S, whitespace: bool, is_punct: bool) -> Self {
        Token {
            text: text.into(),
            whitespace,
            is_punct,
        }
    }

    /// Creates a word token; punctuation flag derived from the text.
    pub fn word<S: Into<String>>(text: S, whitespace: bool) -> Self {
        let text = text.into();
        let is_punct = is_punct_text(&text);
        Token::new(text, whitespace, is_punct)
    }

    /// Returns the original token text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns whether the token was followed by whitespace.
    pub fn whitespace(&self) -> bool {
        self.whitespace
    }

    /// Returns whether the token is punctuation.
    pub fn is_punct(&self) -> bool {
        self.is_punct
    }
}

/// Returns `true` if `text` is non-empty and consists of punctuation/symbol
/// characters only.
pub fn is_punct_text(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| !c.is_alphanumeric() && !c.is_whitespace())
}

// =#========================================================================#=
// SENTENCE
// =#========================================================================#=
/// Ordered tokens of one matched sentence.
///
/// Index 0 is always the token nearest the matched root word: sentences
/// matched at their start keep reading order, sentences matched at their end
/// are stored reversed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sentence {
    tokens: Vec<Token>,
}

impl Sentence {
    /// Creates a sentence from tokens in root-first order.
    pub fn new(tokens: Vec<Token>) -> Self {
        Sentence { tokens }
    }

    /// Convenience constructor splitting `text` on whitespace into word
    /// tokens; every token but the last carries a whitespace flag.
    ///
    /// # Example
    /// ```
    /// use text_tree::model::Sentence;
    ///
    /// let sentence = Sentence::from_words("The cat sat");
    /// assert_eq!(sentence.len(), 3);
    /// assert!(sentence[0].whitespace());
    /// assert!(!sentence[2].whitespace());
    /// ```
    pub fn from_words(text: &str) -> Self {
        let words: Vec<&str> = text.split_whitespace().collect();
        let last = words.len().saturating_sub(1);
        let tokens = words
            .into_iter()
            .enumerate()
            .map(|(i, w)| Token::word(w, i != last))
            .collect();
        Sentence { tokens }
    }

    /// Returns the tokens of this sentence.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Returns the number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns `true` if the sentence has no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns the sentence text in root-first order.
    pub fn text(&self) -> String {
        let mut text = String::new();
        for token in &self.tokens {
            text.push_str(token.text());
            if token.whitespace() {
                text.push(' ');
            }
        }
        text
    }
}

impl std::ops::Index<usize> for Sentence {
    type Output = Token;

    fn index(&self, index: usize) -> &Self::Output {
        &self.tokens[index]
    }
}

impl From<Vec<Token>> for Sentence {
    fn from(tokens: Vec<Token>) -> Self {
        Sentence::new(tokens)
    }
}

// =#========================================================================#=
// DOCUMENT SENTENCES
// =#========================================================================#=
/// Matched sentences of a list of documents, with optional per-document
/// reference and extra attributes.
///
/// # Invariants
/// - `sentences`, `references` and `attributes` have the same length,
///   one entry per input document
/// - Documents without matches occupy a slot with an empty sentence list
#[derive(Debug, Clone, Default)]
pub struct DocumentSentences {
    sentences: Vec<Vec<Sentence>>,
    references: Vec<Option<String>>,
    attributes: Vec<ExtraAttributes>,
}

impl DocumentSentences {
    /// Creates a sentence set without references or attributes.
    pub fn new(sentences: Vec<Vec<Sentence>>) -> Self {
        let num_docs = sentences.len();
        DocumentSentences {
            sentences,
            references: vec![None; num_docs],
            attributes: vec![ExtraAttributes::new(); num_docs],
        }
    }

    /// Creates a sentence set, validating index alignment.
    ///
    /// # Arguments
    /// * `sentences` - Matched sentences per document
    /// * `references` - Optional reference per document
    /// * `attributes` - Optional extra attributes per document
    ///
    /// # Errors
    /// [TextTreeError::InvalidInput] if `references` or `attributes` are
    /// given but their length differs from the number of documents.
    pub fn with_metadata(
        sentences: Vec<Vec<Sentence>>,
        references: Option<Vec<Option<String>>>,
        attributes: Option<Vec<ExtraAttributes>>,
    ) -> Result<Self> {
        let num_docs = sentences.len();
        DocumentSentences::check_alignment(
            num_docs,
            references.as_ref().map(Vec::len),
            attributes.as_ref().map(Vec::len),
        )?;

        let mut set = DocumentSentences::new(sentences);
        if let Some(references) = references {
            set.references = references;
        }
        if let Some(attributes) = attributes {
            set.attributes = attributes;
        }
        Ok(set)
    }

    /// Checks that optional per-document references and attribute mappings
    /// have one entry per document.
    ///
    /// # Errors
    /// [TextTreeError::InvalidInput] naming the misaligned list.
    pub fn check_alignment(
        num_docs: usize,
        num_references: Option<usize>,
        num_attributes: Option<usize>,
    ) -> Result<()> {
        if let Some(num_references) = num_references.filter(|&n| n != num_docs) {
            return Err(TextTreeError::invalid_input(format!(
                "{num_references} references given for {num_docs} documents"
            )));
        }
        if let Some(num_attributes) = num_attributes.filter(|&n| n != num_docs) {
            return Err(TextTreeError::invalid_input(format!(
                "{num_attributes} attribute mappings given for {num_docs} documents"
            )));
        }
        Ok(())
    }

    /// Returns the number of documents (matched or not).
    pub fn num_documents(&self) -> usize {
        self.sentences.len()
    }

    /// Returns the total number of matched sentences over all documents.
    pub fn num_sentences(&self) -> usize {
        self.sentences.iter().map(Vec::len).sum()
    }

    /// Returns `true` if no document has a matched sentence.
    pub fn is_empty(&self) -> bool {
        self.num_sentences() == 0
    }

    /// Returns the matched sentences of each document.
    pub fn sentences(&self) -> &[Vec<Sentence>] {
        &self.sentences
    }

    /// Returns the reference of the document at `doc_index`.
    pub fn reference(&self, doc_index: usize) -> Option<&str> {
        self.references[doc_index].as_deref()
    }

    /// Returns the extra attributes of the document at `doc_index`.
    pub fn attributes(&self, doc_index: usize) -> &ExtraAttributes {
        &self.attributes[doc_index]
    }

    /// Consumes the set, returning the sentences per document.
    pub fn into_sentences(self) -> Vec<Vec<Sentence>> {
        self.sentences
    }
}
