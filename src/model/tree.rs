//! Provides the text tree representation.
//!
//! Provides core data structures for representing merged sentence trees:
//! * [TextTree] - Main tree structure using the arena pattern
//!   for efficient memory layout, with lookup by [NodeIdentity].
//! * [VertexIndex] as type used to index vertices in tree
//! * [PreOrderIter] and [PostOrderIter] for restartable lazy traversal

use crate::error::{Result, TextTreeError};
use crate::model::attributes::NodeAttributes;
use crate::model::codifier::NodeIdentity;
use crate::model::vertex::Vertex;
use std::collections::HashMap;
use std::fmt;

/// Index of a vertex in a tree (arena).
pub type VertexIndex = usize;

// =$========================================================================$=
// TREE
// =$========================================================================$=
/// A rooted tree of merged sentence tokens, represented using the arena
/// pattern on [Vertex].
///
/// Vertices are stored in a contiguous vector and referenced by
/// [VertexIndex]. Each vertex is also reachable through its [NodeIdentity].
///
/// # Structure
/// - All vertices are stored in the arena; index of root is maintained.
/// - Vertices have any number of ordered children.
/// - An empty tree (no matched sentences) has no vertices and no root.
///
/// # Construction
/// Add vertices with [TextTree::add_vertex], connect them with
/// [TextTree::attach] and finally set the root with [TextTree::set_root].
/// Test validity with [TextTree::validate].
///
/// # Example
/// ```
/// use text_tree::model::{Codifier, NodeAttributes, NodeIdentity, TextTree, Token};
///
/// let mut codifier = Codifier::new();
/// let mut tree = TextTree::new();
///
/// let the_id = NodeIdentity::default().extended(codifier.codify("The"));
/// let cat_id = the_id.extended(codifier.codify("cat"));
///
/// let the = NodeAttributes::from_token(the_id, &Token::word("The", true), "");
/// let cat = NodeAttributes::from_token(cat_id, &Token::word("cat", false), &the.simple_label);
///
/// let index_the = tree.add_vertex(the);
/// let index_cat = tree.add_vertex(cat);
/// tree.attach(index_the, index_cat);
/// tree.set_root(index_the);
///
/// assert!(tree.validate().is_ok());
/// assert_eq!(tree.num_leaves(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TextTree {
    /// Vertices of this tree (arena pattern)
    vertices: Vec<Vertex>,

    /// Index of the root of this tree, `None` while empty
    root_index: Option<VertexIndex>,

    /// Lookup from node identity to arena index
    lookup: HashMap<NodeIdentity, VertexIndex>,
}

// ============================================================================
// New, Getters / Accessors, etc. (pub)
// ============================================================================
impl TextTree {
    /// Creates a new, empty tree.
    pub fn new() -> Self {
        TextTree::default()
    }

    /// Creates a new, empty tree with room for `num_vertices` vertices.
    pub fn with_capacity(num_vertices: usize) -> Self {
        TextTree {
            vertices: Vec::with_capacity(num_vertices),
            root_index: None,
            lookup: HashMap::with_capacity(num_vertices),
        }
    }

    /// Adds a vertex to the tree, assigning a unique index, which gets returned.
    ///
    /// If a vertex with the same identity exists, its attributes are replaced
    /// and its index is returned instead.
    pub fn add_vertex(&mut self, attributes: NodeAttributes) -> VertexIndex {
        if let Some(&index) = self.lookup.get(&attributes.identity) {
            self.vertices[index].set_attributes(attributes);
            return index;
        }

        let index = self.vertices.len();
        self.lookup.insert(attributes.identity.clone(), index);
        self.vertices.push(Vertex::new(index, attributes));
        index
    }

    /// Appends `child` to the children of `parent`.
    ///
    /// # Panics
    /// Panics if an index is out of bounds.
    pub fn attach(&mut self, parent: VertexIndex, child: VertexIndex) {
        self.vertices[parent].push_child(child);
        self.vertices[child].set_parent(Some(parent));
    }

    /// Sets the root of the tree.
    pub fn set_root(&mut self, index: VertexIndex) {
        self.root_index = Some(index);
    }

    /// Returns `true` if the tree has no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns the root vertex, or `None` for an empty tree.
    pub fn root(&self) -> Option<&Vertex> {
        self.root_index.map(|index| &self.vertices[index])
    }

    /// Returns the index of the root, or `None` for an empty tree.
    pub fn root_index(&self) -> Option<VertexIndex> {
        self.root_index
    }

    /// Returns a reference to the vertex at the given index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn vertex(&self, index: VertexIndex) -> &Vertex {
        &self[index]
    }

    /// Returns the vertex with the given identity, if present.
    pub fn find(&self, identity: &NodeIdentity) -> Option<&Vertex> {
        self.lookup.get(identity).map(|&index| &self.vertices[index])
    }

    /// Returns the arena index of the vertex with the given identity.
    pub fn index_of(&self, identity: &NodeIdentity) -> Option<VertexIndex> {
        self.lookup.get(identity).copied()
    }

    /// Returns the token texts of the children of `index`, in drawing order.
    pub fn child_texts(&self, index: VertexIndex) -> Vec<&str> {
        self[index]
            .children()
            .iter()
            .map(|&child| self[child].text())
            .collect()
    }

    /// Returns the number of siblings of the vertex at `index`.
    pub fn num_siblings(&self, index: VertexIndex) -> usize {
        match self[index].parent() {
            Some(parent) => self[parent].num_children() - 1,
            None => 0,
        }
    }

    /// Returns the number of vertices in this tree.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of leaves in this tree.
    pub fn num_leaves(&self) -> usize {
        self.vertices.iter().filter(|&v| v.is_leaf()).count()
    }

    /// Returns the number of edges in this tree.
    pub fn num_edges(&self) -> usize {
        self.vertices.iter().map(Vertex::num_children).sum()
    }

    /// Returns an iterator over all vertices in arena order.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.iter()
    }

    /// Returns an iterator over the leaves, left to right.
    pub fn leaves(&self) -> impl Iterator<Item = &Vertex> {
        self.pre_order_iter().filter(|v| v.is_leaf())
    }

    /// Returns, for every vertex (by arena index), the number of leaves in
    /// its subtree; a leaf counts itself.
    pub fn leaf_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.vertices.len()];
        for vertex in self.post_order_iter() {
            counts[vertex.index()] = if vertex.is_leaf() {
                1
            } else {
                vertex.children().iter().map(|&c| counts[c]).sum()
            };
        }
        counts
    }

    /// Validates the tree structure and all index references.
    ///
    /// Checks:
    /// - Empty trees have no root, non-empty trees have one in bounds
    /// - All vertex indices match their position in the arena
    /// - Only the root has no parent
    /// - All children point back to their parent, all parents list their children
    /// - Every vertex is reachable from the root exactly once (no cycles)
    /// - Identity lookup agrees with the arena
    ///
    /// # Errors
    /// [TextTreeError::MalformedTree] describing the first violation found.
    pub fn validate(&self) -> Result<()> {
        let Some(root_index) = self.root_index else {
            if self.vertices.is_empty() {
                return Ok(());
            }
            return Err(TextTreeError::malformed_tree("no root set"));
        };

        if root_index >= self.vertices.len() {
            return Err(TextTreeError::malformed_tree(format!(
                "root index {root_index} out of bounds"
            )));
        }

        for (index, vertex) in self.vertices.iter().enumerate() {
            if vertex.index() != index {
                return Err(TextTreeError::malformed_tree(format!(
                    "vertex at position {index} claims index {}",
                    vertex.index()
                )));
            }

            match vertex.parent() {
                None if index != root_index => {
                    return Err(TextTreeError::malformed_tree(format!(
                        "several roots: vertex {} ({}) has no parent",
                        index,
                        vertex.identity()
                    )));
                }
                Some(_) if index == root_index => {
                    return Err(TextTreeError::malformed_tree("root has a parent"));
                }
                Some(parent) => {
                    let listed = self
                        .vertices
                        .get(parent)
                        .is_some_and(|p| p.children().contains(&index));
                    if !listed {
                        return Err(TextTreeError::malformed_tree(format!(
                            "vertex {index} not listed as child of its parent {parent}"
                        )));
                    }
                }
                None => {}
            }

            for &child in vertex.children() {
                if child >= self.vertices.len() || self.vertices[child].parent() != Some(index) {
                    return Err(TextTreeError::malformed_tree(format!(
                        "child {child} of vertex {index} does not point back"
                    )));
                }
            }

            if self.lookup.get(vertex.identity()) != Some(&index) {
                return Err(TextTreeError::malformed_tree(format!(
                    "identity {} not registered for vertex {index}",
                    vertex.identity()
                )));
            }
        }

        // Reachability; a vertex seen twice means a cycle or shared child
        let mut seen = vec![false; self.vertices.len()];
        let mut stack = vec![root_index];
        let mut num_seen = 0;
        while let Some(index) = stack.pop() {
            if seen[index] {
                return Err(TextTreeError::malformed_tree(format!(
                    "vertex {index} reached twice"
                )));
            }
            seen[index] = true;
            num_seen += 1;
            stack.extend_from_slice(self.vertices[index].children());
        }

        if num_seen != self.vertices.len() {
            return Err(TextTreeError::malformed_tree(format!(
                "{} of {} vertices unreachable from root",
                self.vertices.len() - num_seen,
                self.vertices.len()
            )));
        }

        Ok(())
    }
}

// ============================================================================
// Structural edits (crate)
// ============================================================================
impl TextTree {
    /// Deletes a non-root vertex, moving its children into its place among
    /// its parent's children. The vertex stays in the arena, detached, until
    /// [TextTree::compact] is called.
    pub(crate) fn delete_vertex(&mut self, index: VertexIndex) {
        let Some(parent) = self.vertices[index].parent() else {
            return;
        };

        let children = self.vertices[index].take_children();
        for &child in &children {
            self.vertices[child].set_parent(Some(parent));
        }

        let siblings = self.vertices[parent].children_mut();
        if let Some(position) = siblings.iter().position(|&c| c == index) {
            siblings.splice(position..=position, children);
        }

        self.vertices[index].set_parent(None);
    }

    /// Drops all vertices unreachable from the root and reassigns indices
    /// in pre-order.
    pub(crate) fn compact(&mut self) {
        let Some(root_index) = self.root_index else {
            return;
        };

        let order: Vec<VertexIndex> = self.pre_order_iter().map(Vertex::index).collect();
        if order.len() == self.vertices.len() {
            return;
        }

        let mut new_index = vec![usize::MAX; self.vertices.len()];
        for (new, &old) in order.iter().enumerate() {
            new_index[old] = new;
        }

        let mut old_vertices: Vec<Option<Vertex>> =
            std::mem::take(&mut self.vertices).into_iter().map(Some).collect();
        self.lookup.clear();

        for (new, &old) in order.iter().enumerate() {
            let Some(mut vertex) = old_vertices[old].take() else {
                continue;
            };
            vertex.set_index(new);
            vertex.set_parent(vertex.parent().map(|p| new_index[p]));
            for child in vertex.children_mut().iter_mut() {
                *child = new_index[*child];
            }
            self.lookup.insert(vertex.identity().clone(), new);
            self.vertices.push(vertex);
        }

        self.root_index = Some(new_index[root_index]);
    }

    /// Returns the children of `index` for reordering.
    pub(crate) fn children_mut(&mut self, index: VertexIndex) -> &mut Vec<VertexIndex> {
        self.vertices[index].children_mut()
    }
}

impl std::ops::Index<VertexIndex> for TextTree {
    type Output = Vertex;

    fn index(&self, index: VertexIndex) -> &Self::Output {
        &self.vertices[index]
    }
}

// ============================================================================
// Printing
// ============================================================================
/// Draws the tree with box characters, one vertex per line.
///
/// # Example Output
/// ```text
/// [0] "The" (3 leaves)
///   ├─ [1] "cat" (2 leaves)
///   │   ├─ [2] "sat"
///   │   └─ [3] "ran"
///   └─ [4] "dog"
/// ```
impl fmt::Display for TextTree {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fn write_vertex(
            tree: &TextTree,
            f: &mut fmt::Formatter,
            index: VertexIndex,
            prefix: &str,
            is_last: bool,
            leaf_counts: &[usize],
        ) -> fmt::Result {
            let vertex = &tree[index];

            let connector = if prefix.is_empty() {
                ""
            } else if is_last {
                "└─ "
            } else {
                "├─ "
            };

            write!(f, "{}{}[{}] {:?}", prefix, connector, index, vertex.text())?;
            if vertex.is_leaf() {
                if let Some(reference) = vertex.reference() {
                    write!(f, " <{reference}>")?;
                }
                writeln!(f)?;
            } else {
                writeln!(f, " ({} leaves)", leaf_counts[index])?;
            }

            let new_prefix = if prefix.is_empty() {
                "  ".to_string()
            } else {
                format!("{}{}   ", prefix, if is_last { " " } else { "│" })
            };

            let children = vertex.children();
            for (i, &child) in children.iter().enumerate() {
                write_vertex(tree, f, child, &new_prefix, i + 1 == children.len(), leaf_counts)?;
            }
            Ok(())
        }

        match self.root_index {
            Some(root_index) => {
                let leaf_counts = self.leaf_counts();
                write_vertex(self, f, root_index, "", true, &leaf_counts)
            }
            None => writeln!(f, "(empty tree)"),
        }
    }
}

// =$========================================================================$=
// ITERATORS
// =$========================================================================$=
impl TextTree {
    /// Returns an iterator over the tree in post-order (children before parents).
    ///
    /// Post-order traversal visits each vertex's children before visiting the
    /// vertex itself. This is useful for aggregating data from leaves upward,
    /// e.g. leaf counts. Calling it again restarts the traversal.
    pub fn post_order_iter(&self) -> PostOrderIter<'_> {
        PostOrderIter::new(self)
    }

    /// Returns an iterator over the tree in pre-order (parents before children).
    ///
    /// Pre-order traversal visits each vertex before visiting its children,
    /// children left to right. This is useful for propagating data from
    /// root to leaves.
    pub fn pre_order_iter(&self) -> PreOrderIter<'_> {
        PreOrderIter::new(self)
    }
}

/// Iterator for post-order traversal (children before parents).
///
/// This iterator uses a stack-based approach to traverse the tree without recursion.
/// Each vertex is visited after all its descendants have been visited.
pub struct PostOrderIter<'a> {
    tree: &'a TextTree,
    stack: Vec<(VertexIndex, bool)>, // (index, children_visited)
}

impl<'a> PostOrderIter<'a> {
    fn new(tree: &'a TextTree) -> Self {
        let mut stack = Vec::new();
        if let Some(root_index) = tree.root_index {
            stack.push((root_index, false));
        }
        PostOrderIter { tree, stack }
    }
}

impl<'a> Iterator for PostOrderIter<'a> {
    type Item = &'a Vertex;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((index, children_visited)) = self.stack.pop() {
            let vertex = &self.tree[index];

            if children_visited || vertex.is_leaf() {
                return Some(vertex);
            }

            self.stack.push((index, true));
            // Push children reversed, so leftmost is processed first
            for &child in vertex.children().iter().rev() {
                self.stack.push((child, false));
            }
        }
        None
    }
}

/// Iterator for pre-order traversal (parents before children).
///
/// This iterator uses a stack-based approach to traverse the tree without recursion.
/// Each vertex is visited before any of its descendants.
pub struct PreOrderIter<'a> {
    tree: &'a TextTree,
    stack: Vec<VertexIndex>,
}

impl<'a> PreOrderIter<'a> {
    fn new(tree: &'a TextTree) -> Self {
        let mut stack = Vec::new();
        if let Some(root_index) = tree.root_index {
            stack.push(root_index);
        }
        PreOrderIter { tree, stack }
    }
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = &'a Vertex;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.stack.pop()?;
        let vertex = &self.tree[index];

        for &child in vertex.children().iter().rev() {
            self.stack.push(child);
        }

        Some(vertex)
    }
}
