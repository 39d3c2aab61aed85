//! End-to-end pipeline: documents → matched sentences → tree → styled tree →
//! rendered output.

use crate::error::Result;
use crate::model::{DocumentSentences, ExtraAttributes, MergeConflict, MergePolicy, PrefixTreeBuilder, Sentence};
use crate::render::TreeRenderer;
use crate::segment::{RootPattern, SentSplitting, SentenceSegmenter, SimpleSegmenter, segment_matching_sents};
use crate::style::{Orientation, StyleConfig, StyleEngine, StyledTree};
use std::path::Path;
use tracing::info;

// =#========================================================================#=
// DRAW OUTCOME
// =#========================================================================#=
/// Result of a pipeline run.
#[derive(Debug, Clone)]
pub struct DrawOutcome {
    /// The styled tree, `None` if no sentence matched
    pub tree: Option<StyledTree>,
    /// Matched sentences per document (root-first token order)
    pub doc_sentences: Vec<Vec<Sentence>>,
    /// Conflicting metadata on merged terminal vertices
    pub conflicts: Vec<MergeConflict>,
}

impl DrawOutcome {
    /// Returns `true` if no sentence matched.
    pub fn is_empty(&self) -> bool {
        self.tree.is_none()
    }

    /// Returns the total number of matched sentences.
    pub fn num_sentences(&self) -> usize {
        self.doc_sentences.iter().map(Vec::len).sum()
    }
}

// =#========================================================================#=
// TEXT TREE DRIVER
// =#========================================================================#=
/// Runs segmentation, tree building, styling and rendering in sequence.
///
/// Configure with the `with_*` methods, then [run](Self::run) or
/// [draw](Self::draw) on a list of documents.
///
/// # Example
/// ```
/// use text_tree::driver::TextTreeDriver;
/// use text_tree::segment::RootPattern;
///
/// let docs = ["The cat sat on the mat.", "The cat ran away.", "A dog barked."];
/// let outcome = TextTreeDriver::new()
///     .with_references(vec![Some("doc1".into()), Some("doc2".into()), None])
///     .with_highlights(vec!["cat".into()])
///     .run(&docs, &RootPattern::word("the"))?;
///
/// assert_eq!(outcome.num_sentences(), 2);
/// assert!(outcome.doc_sentences[2].is_empty());
/// let styled = outcome.tree.unwrap();
/// assert_eq!(styled.tree().root().unwrap().text(), "The");
/// # Ok::<(), text_tree::TextTreeError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TextTreeDriver<S: SentenceSegmenter = SimpleSegmenter> {
    segmenter: S,
    reverse: bool,
    references: Option<Vec<Option<String>>>,
    attributes: Option<Vec<ExtraAttributes>>,
    highlights: Vec<String>,
    style: StyleConfig,
    merge_policy: MergePolicy,
    sent_splitting: SentSplitting,
}

impl Default for TextTreeDriver<SimpleSegmenter> {
    fn default() -> Self {
        TextTreeDriver::new()
    }
}

impl TextTreeDriver<SimpleSegmenter> {
    /// Creates a driver with the [SimpleSegmenter] and default settings.
    pub fn new() -> Self {
        TextTreeDriver::with_segmenter(SimpleSegmenter)
    }
}

impl<S: SentenceSegmenter> TextTreeDriver<S> {
    /// Creates a driver with a custom segmenter and default settings.
    pub fn with_segmenter(segmenter: S) -> Self {
        TextTreeDriver {
            segmenter,
            reverse: false,
            references: None,
            attributes: None,
            highlights: Vec::new(),
            style: StyleConfig::default(),
            merge_policy: MergePolicy::default(),
            sent_splitting: SentSplitting::default(),
        }
    }

    /// Match the root pattern at sentence ends and draw the tree reversed.
    pub fn with_reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    /// Sets one optional reference per document, shown next to the leaves of
    /// its sentences.
    pub fn with_references(mut self, references: Vec<Option<String>>) -> Self {
        self.references = Some(references);
        self
    }

    /// Sets extra attributes per document, attached where its sentences end.
    pub fn with_attributes(mut self, attributes: Vec<ExtraAttributes>) -> Self {
        self.attributes = Some(attributes);
        self
    }

    /// Sets highlight patterns (case-insensitive regular expressions).
    pub fn with_highlights(mut self, highlights: Vec<String>) -> Self {
        self.highlights = highlights;
        self
    }

    /// Sets the [StyleConfig].
    pub fn with_style(mut self, style: StyleConfig) -> Self {
        self.style = style;
        self
    }

    /// Sets the [MergePolicy] for conflicting references.
    pub fn with_merge_policy(mut self, merge_policy: MergePolicy) -> Self {
        self.merge_policy = merge_policy;
        self
    }

    /// Sets where sentence boundaries are placed.
    pub fn with_sent_splitting(mut self, sent_splitting: SentSplitting) -> Self {
        self.sent_splitting = sent_splitting;
        self
    }

    /// Returns the segmenter.
    pub fn segmenter(&self) -> &S {
        &self.segmenter
    }

    /// Runs the pipeline up to the styled tree.
    ///
    /// # Errors
    /// * [TextTreeError::InvalidInput](crate::TextTreeError::InvalidInput) - references or attributes not of the
    ///   same length as `documents`, empty `pattern`, invalid style config
    /// * [TextTreeError::InvalidHighlight](crate::TextTreeError::InvalidHighlight) - highlight pattern not a regex
    pub fn run<D: AsRef<str>>(&self, documents: &[D], pattern: &RootPattern) -> Result<DrawOutcome> {
        DocumentSentences::check_alignment(
            documents.len(),
            self.references.as_ref().map(Vec::len),
            self.attributes.as_ref().map(Vec::len),
        )?;
        let engine = StyleEngine::with_highlights(self.style.clone(), self.highlights.as_slice())?;

        info!("Extracting matching sentences from {} documents", documents.len());
        let doc_sentences =
            segment_matching_sents(documents, pattern, self.reverse, self.sent_splitting, &self.segmenter)?;

        let input =
            DocumentSentences::with_metadata(doc_sentences, self.references.clone(), self.attributes.clone())?;
        info!("Found {} sentences", input.num_sentences());

        if input.num_sentences() == 0 {
            info!("No matching sentences found, skipping");
            return Ok(DrawOutcome {
                tree: None,
                doc_sentences: input.into_sentences(),
                conflicts: Vec::new(),
            });
        }

        info!("Building tree");
        let report = PrefixTreeBuilder::new()
            .with_merge_policy(self.merge_policy)
            .build_with_report(&input)?;

        info!("Applying style");
        let styled = engine.apply(report.tree, Orientation::from_reverse(self.reverse));

        Ok(DrawOutcome {
            tree: Some(styled),
            doc_sentences: input.into_sentences(),
            conflicts: report.conflicts,
        })
    }

    /// Runs the pipeline and renders the styled tree to `output`.
    ///
    /// Nothing is rendered if no sentence matched.
    ///
    /// # Errors
    /// As [run](Self::run), plus rendering errors.
    pub fn draw<D, P, R>(&self, documents: &[D], pattern: &RootPattern, output: P, renderer: &R) -> Result<DrawOutcome>
    where
        D: AsRef<str>,
        P: AsRef<Path>,
        R: TreeRenderer + ?Sized,
    {
        let outcome = self.run(documents, pattern)?;
        if let Some(styled) = &outcome.tree {
            info!("Rendering tree to {}", output.as_ref().display());
            renderer.render(styled, output.as_ref())?;
        }
        Ok(outcome)
    }
}
