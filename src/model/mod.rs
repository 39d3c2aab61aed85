//! Data model for merged sentence trees.
//!
//! # Tree representation
//! Trees are represented by [TextTree], which uses the arena pattern to store
//! [Vertex] nodes referenced by [VertexIndex]. Every vertex carries an
//! explicit [NodeAttributes] record and is identified by its [NodeIdentity],
//! the cumulative code path of the tokens leading to it.
//!
//! # Building trees
//! Input arrives as [DocumentSentences] (sentences of [Token]s per document,
//! plus optional references and [ExtraAttributes]). The
//! [PrefixTreeBuilder] merges them:
//!
//! | Step | Type |
//! |------|------|
//! | Token text → code | [Codifier] |
//! | Code path → identity | [NodeIdentity] |
//! | Identities + edges → tree | [PrefixTreeBuilder] → [TextTree] |

pub mod attributes;
pub mod codifier;
pub mod token;
pub mod tree;
pub mod tree_builder;
pub mod vertex;

// Tokens
pub use token::DocumentSentences;
pub use token::Sentence;
pub use token::Token;
// Identity
pub use codifier::Code;
pub use codifier::Codifier;
pub use codifier::NodeIdentity;
// Tree
pub use attributes::AttributeValue;
pub use attributes::ExtraAttributes;
pub use attributes::NodeAttributes;
pub use tree::TextTree;
pub use tree::VertexIndex;
pub use vertex::Vertex;
// Building
pub use tree_builder::BuildReport;
pub use tree_builder::MergeConflict;
pub use tree_builder::MergePolicy;
pub use tree_builder::PrefixTreeBuilder;
