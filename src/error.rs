//! Error types for building and styling text trees.
//!
//! All fallible operations of this crate return [TextTreeError]. Note that a
//! run without any matching sentence is *not* an error; it results in an
//! empty tree instead.

use thiserror::Error;

// =#========================================================================#=
// TEXT TREE ERROR
// =#========================================================================#=
/// Errors that can occur while building, styling or rendering a text tree.
#[derive(Error, Debug)]
pub enum TextTreeError {
    /// Input lists are malformed, e.g. references or attributes not
    /// index-aligned with the documents.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal invariant of the tree violated (cycle, several roots,
    /// vertex with several parents). Always a defect, never user-triggered.
    #[error("Malformed tree: {0}")]
    MalformedTree(String),

    /// A highlight pattern could not be compiled.
    #[error("Invalid highlight pattern '{pattern}': {source}")]
    InvalidHighlight {
        /// The pattern as given by the caller
        pattern: String,
        /// Underlying compilation error
        #[source]
        source: regex::Error,
    },

    /// Style configuration could not be read.
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O error, e.g. while reading documents or writing the rendered tree.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for text tree operations
pub type Result<T> = std::result::Result<T, TextTreeError>;

impl TextTreeError {
    /// Convenience constructor for [TextTreeError::InvalidInput]
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        TextTreeError::InvalidInput(msg.into())
    }

    /// Convenience constructor for [TextTreeError::MalformedTree]
    pub fn malformed_tree<S: Into<String>>(msg: S) -> Self {
        TextTreeError::MalformedTree(msg.into())
    }
}
