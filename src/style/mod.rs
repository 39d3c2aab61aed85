//! Layout and style computation for text trees.
//!
//! The [StyleEngine] turns a [TextTree](crate::model::TextTree) into a
//! [StyledTree]: every vertex gets a [NodeStyle] with
//! - a font size growing with the number of sentences merged below it,
//! - margins separating labels, spaces and branch points,
//! - background and contrasting text colors from highlight patterns,
//! - an optional reference annotation on leaves,
//!
//! and children are reordered by the configured [SortPass]es. The engine only
//! computes these inputs; drawing is left to a
//! [TreeRenderer](crate::render::TreeRenderer).

pub mod color;
pub mod config;
pub mod engine;

pub use color::{Colormap, CyclicColormap, Highlighter, Rgb};
pub use config::{SortPass, StyleConfig};
pub use engine::{
    Margins, NodeStyle, Orientation, ReferenceFace, StyleEngine, StyledTree, TextFace, TreeLayout,
};
