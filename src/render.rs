//! Rendering of styled trees.
//!
//! Drawing is delegated: a [TreeRenderer] receives the
//! [StyledTree] (tree, per-vertex styles, layout with orientation) and an
//! output path. [NhxRenderer] writes the annotated Newick representation.

use crate::error::Result;
use crate::newick::write_nhx_file;
use crate::style::StyledTree;
use std::path::Path;
use tracing::info;

/// Draws a styled tree to an output file.
pub trait TreeRenderer {
    /// Renders `styled` to `output`.
    ///
    /// # Errors
    /// Implementation specific; I/O failures as
    /// [TextTreeError::Io](crate::TextTreeError::Io).
    fn render(&self, styled: &StyledTree, output: &Path) -> Result<()>;
}

/// Writes the tree as Newick with NHX style annotations.
#[derive(Debug, Clone, Copy, Default)]
pub struct NhxRenderer;

impl TreeRenderer for NhxRenderer {
    fn render(&self, styled: &StyledTree, output: &Path) -> Result<()> {
        write_nhx_file(output, styled)?;
        info!(
            "Wrote {} vertices ({:?}) to {}",
            styled.tree().num_vertices(),
            styled.layout().orientation,
            output.display()
        );
        Ok(())
    }
}
