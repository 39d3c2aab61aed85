//! Sentence segmentation and root-word matching.
//!
//! A [SentenceSegmenter] turns one document text into the sentences that
//! start with (or, reversed, end with) a [RootPattern]. Sentences come back in
//! root-first token order, ready for the
//! [PrefixTreeBuilder](crate::model::PrefixTreeBuilder).
//!
//! [SimpleSegmenter] is a rule-based implementation; any NLP pipeline can be
//! plugged in by implementing the trait.

pub mod pattern;
pub mod simple;

pub use pattern::{RootPattern, TokenConstraint};
pub use simple::SimpleSegmenter;

use crate::error::{Result, TextTreeError};
use crate::model::Sentence;
use tracing::debug;

/// Where sentence boundaries are placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SentSplitting {
    /// After sentence-final punctuation (`.`, `!`, `?`, `…`)
    #[default]
    Punctuation,
    /// At line breaks only
    Newline,
    /// At both
    PunctuationAndNewline,
}

impl SentSplitting {
    pub fn on_punctuation(self) -> bool {
        matches!(self, SentSplitting::Punctuation | SentSplitting::PunctuationAndNewline)
    }

    pub fn on_newline(self) -> bool {
        matches!(self, SentSplitting::Newline | SentSplitting::PunctuationAndNewline)
    }
}

/// Finds the sentences of a document that match a root pattern.
pub trait SentenceSegmenter {
    /// Returns the sentences of `text` matching `pattern`, in document order.
    ///
    /// Without `reverse`, a sentence matches if it starts with the pattern and
    /// is returned in reading order. With `reverse`, a sentence matches if
    /// only punctuation follows the pattern; it is returned reversed, without
    /// that punctuation. At most one match per sentence.
    fn segment(&self, text: &str, pattern: &RootPattern, reverse: bool, splitting: SentSplitting) -> Vec<Sentence>;
}

/// Segments every document, keeping one (possibly empty) slot per document.
///
/// # Errors
/// [TextTreeError::InvalidInput] if `pattern` is empty.
///
/// # Example
/// ```
/// use text_tree::segment::{segment_matching_sents, RootPattern, SentSplitting, SimpleSegmenter};
///
/// let docs = ["The cat sat. A dog ran.", "No match here.", "The end."];
/// let sents = segment_matching_sents(&docs, &RootPattern::word("the"), false, SentSplitting::default(), &SimpleSegmenter)?;
/// assert_eq!(sents.len(), 3);
/// assert_eq!(sents[0].len(), 1);
/// assert!(sents[1].is_empty());
/// # Ok::<(), text_tree::TextTreeError>(())
/// ```
pub fn segment_matching_sents<D, S>(
    documents: &[D],
    pattern: &RootPattern,
    reverse: bool,
    splitting: SentSplitting,
    segmenter: &S,
) -> Result<Vec<Vec<Sentence>>>
where
    D: AsRef<str>,
    S: SentenceSegmenter + ?Sized,
{
    if pattern.is_empty() {
        return Err(TextTreeError::invalid_input("Root pattern must not be empty"));
    }

    let doc_sents: Vec<Vec<Sentence>> = documents
        .iter()
        .map(|doc| segmenter.segment(doc.as_ref(), pattern, reverse, splitting))
        .collect();

    debug!(
        "Segmented {} documents, {} matching sentences",
        documents.len(),
        doc_sents.iter().map(Vec::len).sum::<usize>()
    );

    Ok(doc_sents)
}
