//! Newick/NHX serialization of styled trees.

use crate::error::Result;
use crate::model::{ExtraAttributes, VertexIndex};
use crate::newick::escape::{encode_nhx_value, escape_label, sanitize_nhx_value};
use crate::style::{NodeStyle, StyledTree};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Extra buffer in NHX string length/capacity estimate
const BUFFER_CHARS: usize = 10;

/// Writes a styled tree to a file as a single NHX line.
///
/// An empty tree writes an empty file.
///
/// # Errors
/// [TextTreeError::Io](crate::TextTreeError::Io) if the file cannot be
/// created or written.
///
/// # Example
/// ```no_run
/// use text_tree::newick::write_nhx_file;
/// # use text_tree::style::StyledTree;
/// # fn write(styled: &StyledTree) -> text_tree::Result<()> {
/// write_nhx_file("tree.nhx", styled)?;
/// # Ok(())
/// # }
/// ```
pub fn write_nhx_file<P: AsRef<Path>>(path: P, styled: &StyledTree) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    if !styled.is_empty() {
        writer.write_all(to_nhx(styled).as_bytes())?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// Returns the NHX representation of a styled tree with closing semicolon.
///
/// Every vertex is written as `(children)label[&&NHX:...]` (leaves without
/// parentheses), where the annotation carries its style:
///
/// | Key | Value |
/// |-----|-------|
/// | `leaves` | leaf count |
/// | `fsize` | font size |
/// | `ml`, `mr` | left and right margin |
/// | `bgcolor`, `fgcolor` | background and text color, `#rrggbb` |
/// | `ref`, `refsize` | reference text and font size (annotated leaves) |
///
/// followed by the extra attributes of the vertex. Values are encoded with
/// [encode_nhx_value](crate::newick::encode_nhx_value). Children appear in
/// their sorted order. Returns an empty string for an empty tree.
///
/// # Example
/// ```
/// use text_tree::model::{DocumentSentences, PrefixTreeBuilder, Sentence};
/// use text_tree::newick::to_nhx;
/// use text_tree::style::{Orientation, StyleConfig, StyleEngine};
///
/// let input = DocumentSentences::new(vec![vec![
///     Sentence::from_words("a b"),
///     Sentence::from_words("a c"),
/// ]]);
/// let tree = PrefixTreeBuilder::new().build(&input)?;
/// let styled = StyleEngine::new(StyleConfig::default())?.apply(tree, Orientation::Forward);
///
/// let nhx = to_nhx(&styled);
/// assert!(nhx.starts_with("(b[&&NHX:leaves=1:fsize=8:"));
/// assert!(nhx.ends_with(";"));
/// # Ok::<(), text_tree::TextTreeError>(())
/// ```
pub fn to_nhx(styled: &StyledTree) -> String {
    let tree = styled.tree();
    let Some(root) = tree.root_index() else {
        return String::new();
    };

    // Recursive helper for building the NHX string
    fn build_nhx(styled: &StyledTree, nhx: &mut String, index: VertexIndex) {
        let vertex = &styled.tree()[index];

        if !vertex.is_leaf() {
            nhx.push('(');
            for (i, &child) in vertex.children().iter().enumerate() {
                if i > 0 {
                    nhx.push(',');
                }
                build_nhx(styled, nhx, child);
            }
            nhx.push(')');
        }

        nhx.push_str(&escape_label(vertex.text()));
        build_annotation(nhx, styled.style(index), &vertex.attributes().extra);
    }

    let mut nhx = String::with_capacity(estimate_nhx_len(styled));
    build_nhx(styled, &mut nhx, root);
    nhx.push(';');

    nhx
}

/// Appends the `[&&NHX:...]` annotation of one vertex.
fn build_annotation(nhx: &mut String, style: &NodeStyle, extra: &ExtraAttributes) {
    let face = &style.face;
    nhx.push_str("[&&NHX");
    push_field(nhx, "leaves", &style.leaf_count.to_string());
    push_field(nhx, "fsize", &face.font_size.to_string());
    push_field(nhx, "ml", &face.margins.left.to_string());
    push_field(nhx, "mr", &face.margins.right.to_string());
    push_field(nhx, "bgcolor", &face.background.to_string());
    push_field(nhx, "fgcolor", &face.foreground.to_string());
    if let Some(reference) = &style.reference {
        push_field(nhx, "ref", &reference.text);
        push_field(nhx, "refsize", &reference.font_size.to_string());
    }
    for (key, value) in extra {
        push_field(nhx, &sanitize_nhx_value(key), &value.to_string());
    }
    nhx.push(']');
}

fn push_field(nhx: &mut String, key: &str, value: &str) {
    nhx.push(':');
    nhx.push_str(key);
    nhx.push('=');
    nhx.push_str(&encode_nhx_value(value));
}

/// Estimates the length of the NHX string of a styled tree.
pub(crate) fn estimate_nhx_len(styled: &StyledTree) -> usize {
    // "(,)" per branch point, roughly
    const INTERNAL_NODE_CHARS: usize = 3;
    // Fixed annotation fields, e.g. "[&&NHX:leaves=1:fsize=8:ml=0.5:mr=5.5:bgcolor=#ffffff:fgcolor=#000000]"
    const ANNOTATION_CHARS: usize = 72;

    let tree = styled.tree();
    let label_capacity: usize = tree.vertices().map(|v| escape_label(v.text()).len()).sum();
    let structure_capacity = (tree.num_vertices() - tree.num_leaves()) * INTERNAL_NODE_CHARS;

    structure_capacity + label_capacity + tree.num_vertices() * ANNOTATION_CHARS + BUFFER_CHARS
}
