//! Newick writer with NHX style annotations.
//!
//! A [StyledTree](crate::style::StyledTree) is serialized as one Newick
//! string where each vertex carries its text as label and its style as an
//! NHX comment, e.g.
//!
//! `((sat[&&NHX:leaves=1:...],ran[&&NHX:leaves=1:...])cat[&&NHX:leaves=2:...])The[&&NHX:leaves=2:...];`
//!
//! Tree drawing tools that read NHX can lay out and draw the tree from it.
//!
//! # API
//! * [`to_nhx`] - NHX string of a styled tree
//! * [`write_nhx_file`] - writes it to a file
//! * [`escape_label`], [`sanitize_nhx_value`] - quoting helpers
//! * [`encode_nhx_value`], [`decode_nhx_value`] - reversible value encoding
//!
//! # Format
//! * `tree ::= vertex ';'`
//! * `vertex ::= leaf | '(' vertex (',' vertex)* ')' label annotation`
//! * `leaf ::= label annotation`
//! * `annotation ::= '[&&NHX' (':' key '=' value)* ']'`
//!
//! Labels containing `( ) [ ] , ; : '` or whitespace are single-quoted. NHX
//! keys have reserved characters replaced by `_`; values, references
//! included, are percent-encoded so they decode back unchanged. No branch
//! lengths are written.

mod escape;
pub mod writer;

pub use self::escape::{decode_nhx_value, encode_nhx_value, escape_label, sanitize_nhx_value};
pub use self::writer::{to_nhx, write_nhx_file};
