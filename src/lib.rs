//! Text-tree is a library to merge sentences sharing a common beginning (or
//! ending) into one styled tree, for visual comparison of how texts continue
//! after a word of interest.
//!
//! Core functionality provided:
//! - Segmentation: find sentences starting (or, reversed, ending) with a
//!   [RootPattern](segment::RootPattern). [SimpleSegmenter](segment::SimpleSegmenter)
//!   is included; other segmenters implement
//!   [SentenceSegmenter](segment::SentenceSegmenter).
//! - Tree builder: [PrefixTreeBuilder](model::PrefixTreeBuilder) merges
//!   sentences on shared token prefixes (compared case-insensitively) into a
//!   [TextTree](model::TextTree), keeping per-document references and extra
//!   attributes where sentences end.
//! - Style: [StyleEngine](style::StyleEngine) sizes fonts by the number of
//!   merged sentences, sets margins, highlight colors and child order.
//! - Rendering: [TreeRenderer](render::TreeRenderer) draws the
//!   [StyledTree](style::StyledTree); [NhxRenderer](render::NhxRenderer)
//!   writes Newick with NHX style annotations.
//! - Tree model:
//!   - Arena pattern: vertices are referenced by index, never by pointer.
//!   - See [crate::model] for more details.
//!
//! Limitations:
//! - Tokenization rules of the included segmenter target languages that
//!   separate words by whitespace
//! - No drawing to image formats; use a renderer reading NHX
//!
//! # Usage patterns
//! 1. [draw_text_tree] runs the whole pipeline with default settings.
//! 2. Configure a [TextTreeDriver](driver::TextTreeDriver) for highlights,
//!    references, reversed trees, style and merge policy.
//! 3. Use the stages directly, e.g. feed your own tokens into the
//!    [PrefixTreeBuilder](model::PrefixTreeBuilder).
//!
//! ## Example Default Configuration
//! ```no_run
//! use text_tree::draw_text_tree;
//!
//! let docs = ["I like green tea.", "I like black tea.", "I hate coffee."];
//! let outcome = draw_text_tree(&docs, "I", "tree.nhx")?;
//! println!("Merged {} sentences", outcome.num_sentences());
//! # Ok::<(), text_tree::TextTreeError>(())
//! ```
//!
//! ## Example Driver Configuration
//! ```no_run
//! use text_tree::driver::TextTreeDriver;
//! use text_tree::render::NhxRenderer;
//! use text_tree::segment::RootPattern;
//! use text_tree::style::StyleConfig;
//!
//! let docs = ["This was good.", "The food was good!", "Service was bad."];
//! let outcome = TextTreeDriver::new()
//!     .with_reverse(true)                                  // Match sentence ends
//!     .with_highlights(vec!["food".into()])                // Color matching tokens
//!     .with_style(StyleConfig::default().with_sorting(true, true))
//!     .draw(&docs, &RootPattern::word("good"), "good.nhx", &NhxRenderer)?;
//! assert_eq!(outcome.num_sentences(), 2);
//! # Ok::<(), text_tree::TextTreeError>(())
//! ```

pub mod driver;
pub mod error;
pub mod model;
pub mod newick;
pub mod render;
pub mod segment;
pub mod style;

pub use crate::error::{Result, TextTreeError};

use crate::driver::{DrawOutcome, TextTreeDriver};
use crate::model::{DocumentSentences, PrefixTreeBuilder, Sentence};
use crate::render::NhxRenderer;
use crate::segment::RootPattern;
use crate::style::{Orientation, StyleConfig, StyleEngine, StyledTree};
use std::path::Path;

// ============================================================================
// Quick API
// ============================================================================
/// Finds sentences starting with `root_words`, merges and styles them with
/// default settings and writes the tree as NHX to `output`.
///
/// See [TextTreeDriver::draw] for full documentation.
pub fn draw_text_tree<D: AsRef<str>, P: AsRef<Path>>(
    documents: &[D],
    root_words: &str,
    output: P,
) -> Result<DrawOutcome> {
    TextTreeDriver::new().draw(documents, &RootPattern::words(root_words), output, &NhxRenderer)
}

/// Merges already tokenized sentences (root-first order) into a styled tree
/// with default settings, drawn in forward orientation.
///
/// Returns `None` if `sentences` is empty.
///
/// # Example
/// ```
/// use text_tree::build_text_tree;
/// use text_tree::model::Sentence;
///
/// let styled = build_text_tree(vec![
///     Sentence::from_words("I like tea"),
///     Sentence::from_words("I like coffee"),
/// ])?
/// .unwrap();
/// assert_eq!(styled.tree().num_leaves(), 2);
/// # Ok::<(), text_tree::TextTreeError>(())
/// ```
pub fn build_text_tree(sentences: Vec<Sentence>) -> Result<Option<StyledTree>> {
    if sentences.is_empty() {
        return Ok(None);
    }
    let tree = PrefixTreeBuilder::new().build(&DocumentSentences::new(vec![sentences]))?;
    let engine = StyleEngine::new(StyleConfig::default())?;
    Ok(Some(engine.apply(tree, Orientation::Forward)))
}
