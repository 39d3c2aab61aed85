//! Vertex module for text tree representation.

use crate::model::attributes::NodeAttributes;
use crate::model::codifier::NodeIdentity;
use crate::model::tree::VertexIndex;

// =#========================================================================#=
// VERTEX
// =#========================================================================#=
/// Represents a vertex (merged token node) in a text tree.
///
/// A vertex is either:
/// - **Root**: no parent; the first token shared by all sentences, or the
///   synthetic root joining several sentence roots
/// - **Internal**: parent and at least one child
/// - **Leaf**: parent and no children; the last token of some sentence
///
/// # Invariants
/// - `index` is the position in the tree arena
/// - Every vertex but the root has `parent` set
/// - Children are ordered; the order is the left-to-right drawing order
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    /// Index of this vertex in the tree arena
    index: VertexIndex,
    /// Index of the parent vertex, `None` for the root
    parent: Option<VertexIndex>,
    /// Indices of child vertices, in drawing order
    children: Vec<VertexIndex>,
    /// Token and sentence attributes of this vertex
    attributes: NodeAttributes,
}

impl Vertex {
    /// Creates a new vertex without parent and children.
    ///
    /// # Arguments
    /// * `index` - The unique index of this vertex in the tree (arena)
    /// * `attributes` - Attributes of the merged node
    pub fn new(index: VertexIndex, attributes: NodeAttributes) -> Self {
        Vertex {
            index,
            parent: None,
            children: Vec::new(),
            attributes,
        }
    }

    /// Returns the index of this vertex.
    pub fn index(&self) -> VertexIndex {
        self.index
    }

    /// Returns the index of the parent, or `None` for the root.
    pub fn parent(&self) -> Option<VertexIndex> {
        self.parent
    }

    /// Returns the children in drawing order.
    pub fn children(&self) -> &[VertexIndex] {
        &self.children
    }

    /// Returns the number of children.
    pub fn num_children(&self) -> usize {
        self.children.len()
    }

    /// Returns `true` if this vertex has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns `true` if this vertex has no parent.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Returns `true` if sentences diverge here, i.e. more than one child.
    pub fn is_branch_point(&self) -> bool {
        self.children.len() > 1
    }

    /// Returns the attributes of this vertex.
    pub fn attributes(&self) -> &NodeAttributes {
        &self.attributes
    }

    /// Returns the identity (cumulative code path) of this vertex.
    pub fn identity(&self) -> &NodeIdentity {
        &self.attributes.identity
    }

    /// Returns the original token text of this vertex.
    pub fn text(&self) -> &str {
        &self.attributes.text
    }

    /// Returns the reference attached to this vertex, if any.
    pub fn reference(&self) -> Option<&str> {
        self.attributes.reference.as_deref()
    }

    pub(crate) fn set_index(&mut self, index: VertexIndex) {
        self.index = index;
    }

    pub(crate) fn set_attributes(&mut self, attributes: NodeAttributes) {
        self.attributes = attributes;
    }

    pub(crate) fn set_parent(&mut self, parent: Option<VertexIndex>) {
        self.parent = parent;
    }

    pub(crate) fn push_child(&mut self, child: VertexIndex) {
        self.children.push(child);
    }

    pub(crate) fn children_mut(&mut self) -> &mut Vec<VertexIndex> {
        &mut self.children
    }

    pub(crate) fn take_children(&mut self) -> Vec<VertexIndex> {
        std::mem::take(&mut self.children)
    }
}
