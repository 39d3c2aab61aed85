//! Builder merging tokenized sentences into one [TextTree].
//!
//! The [PrefixTreeBuilder] turns [DocumentSentences] into a tree in which
//! sentences sharing a token prefix share one branch:
//!
//! 1. Every token position gets a [NodeIdentity], the cumulative code path of
//!    the tokens up to it (codes assigned by a fresh [Codifier] per build).
//! 2. Adjacent positions yield deduplicated parent → child edges.
//! 3. Node attributes are recorded per identity; references and extra
//!    attributes only where a sentence terminates.
//! 4. Vertices never appearing as a child become the root; several such
//!    vertices are joined under a synthetic root.
//! 5. Punctuation and whitespace vertices above a branch point are pruned.
//!
//! # Merge conflicts
//! When two sentences terminate on the same vertex with different references
//! or attributes, only one can be kept. [MergePolicy] selects which, and
//! every such case is reported as a [MergeConflict] by
//! [PrefixTreeBuilder::build_with_report].

use crate::error::{Result, TextTreeError};
use crate::model::attributes::{ExtraAttributes, NodeAttributes};
use crate::model::codifier::{Codifier, NodeIdentity};
use crate::model::token::DocumentSentences;
use crate::model::tree::{TextTree, VertexIndex};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

// =#========================================================================#=
// MERGE POLICY
// =#========================================================================#=
/// Which reference/attributes survive when several sentences terminate on
/// the same merged vertex.
///
/// Reference and extra attributes of a document are kept or dropped
/// together; a document without reference counts as `None`, not as absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergePolicy {
    /// The sentence processed last wins (documents in order, sentences in order).
    #[default]
    KeepLast,
    /// The sentence processed first wins.
    KeepFirst,
}

/// A vertex on which sentences of different metadata terminate.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeConflict {
    /// Identity of the vertex
    pub identity: NodeIdentity,
    /// Token text of the vertex
    pub text: String,
    /// Reference kept on the vertex
    pub kept_reference: Option<String>,
    /// Reference that was dropped
    pub dropped_reference: Option<String>,
    /// Extra attributes kept on the vertex
    pub kept_extra: ExtraAttributes,
    /// Extra attributes that were dropped
    pub dropped_extra: ExtraAttributes,
}

impl MergeConflict {
    /// Returns `true` if the references differ.
    pub fn reference_differs(&self) -> bool {
        self.kept_reference != self.dropped_reference
    }

    /// Returns `true` if the extra attributes differ.
    pub fn extra_differs(&self) -> bool {
        self.kept_extra != self.dropped_extra
    }
}

/// Result of a build: the tree plus what happened on the way.
#[derive(Debug, Clone)]
pub struct BuildReport {
    /// The merged tree, empty if no sentence was given
    pub tree: TextTree,
    /// Conflicting metadata on merged terminal vertices
    pub conflicts: Vec<MergeConflict>,
    /// Number of sentences merged into the tree
    pub num_sentences: usize,
    /// Number of vertices removed by pruning
    pub num_pruned: usize,
}

// =#========================================================================#=
// PREFIX TREE BUILDER
// =#========================================================================#=
/// Builds a merged [TextTree] from the matched sentences of documents.
///
/// # Example
/// ```
/// use text_tree::model::{DocumentSentences, PrefixTreeBuilder, Sentence};
///
/// let input = DocumentSentences::new(vec![
///     vec![Sentence::from_words("The cat sat")],
///     vec![Sentence::from_words("The cat ran")],
/// ]);
///
/// let tree = PrefixTreeBuilder::new().build(&input)?;
/// let root = tree.root().unwrap();
/// assert_eq!(root.text(), "The");
/// assert_eq!(tree.child_texts(root.index()), vec!["cat"]);
/// assert_eq!(tree.num_leaves(), 2);
/// # Ok::<(), text_tree::TextTreeError>(())
/// ```
#[derive(Debug, Clone)]
pub struct PrefixTreeBuilder {
    merge_policy: MergePolicy,
    prune: bool,
}

impl Default for PrefixTreeBuilder {
    fn default() -> Self {
        PrefixTreeBuilder::new()
    }
}

impl PrefixTreeBuilder {
    /// Creates a builder keeping the last terminal metadata, with pruning.
    pub fn new() -> Self {
        PrefixTreeBuilder {
            merge_policy: MergePolicy::KeepLast,
            prune: true,
        }
    }

    /// Sets the [MergePolicy] for conflicting terminal metadata.
    pub fn with_merge_policy(mut self, merge_policy: MergePolicy) -> Self {
        self.merge_policy = merge_policy;
        self
    }

    /// Enables or disables pruning of punctuation/whitespace vertices above
    /// branch points (enabled by default).
    pub fn with_pruning(mut self, prune: bool) -> Self {
        self.prune = prune;
        self
    }

    /// Returns the configured [MergePolicy].
    pub fn merge_policy(&self) -> MergePolicy {
        self.merge_policy
    }

    /// Builds the merged tree.
    ///
    /// See [build_with_report](Self::build_with_report).
    pub fn build(&self, input: &DocumentSentences) -> Result<TextTree> {
        self.build_with_report(input).map(|report| report.tree)
    }

    /// Builds the merged tree and reports merge conflicts and pruning.
    ///
    /// Zero sentences over all documents yield an empty tree, not an error.
    ///
    /// # Errors
    /// [TextTreeError::MalformedTree] if the resulting structure is not a
    /// single rooted tree; not expected for any input.
    pub fn build_with_report(&self, input: &DocumentSentences) -> Result<BuildReport> {
        let num_sentences = input.num_sentences();
        if num_sentences == 0 {
            debug!("No sentences given, returning empty tree");
            return Ok(BuildReport {
                tree: TextTree::new(),
                conflicts: Vec::new(),
                num_sentences,
                num_pruned: 0,
            });
        }

        let mut table = NodeTable::default();
        let mut edges = EdgeSet::default();
        let mut conflicts = Vec::new();
        let mut codifier = Codifier::new();

        for (doc_index, doc_sentences) in input.sentences().iter().enumerate() {
            for sentence in doc_sentences {
                let Some(last_position) = sentence.len().checked_sub(1) else {
                    continue;
                };

                let mut identity = NodeIdentity::default();
                let mut simple_label = String::new();
                let mut previous: Option<NodeIdentity> = None;

                for (position, token) in sentence.tokens().iter().enumerate() {
                    identity = identity.extended(codifier.codify(token.text()));
                    let attributes = NodeAttributes::from_token(identity.clone(), token, &simple_label);
                    simple_label.clone_from(&attributes.simple_label);

                    let slot = table.record(attributes);
                    if position == last_position {
                        let first_visit = table.mark_terminal(slot);
                        let conflict = self.terminate(
                            table.get_mut(slot),
                            first_visit,
                            input.reference(doc_index),
                            input.attributes(doc_index),
                        );
                        conflicts.extend(conflict);
                    }

                    if let Some(parent) = previous.replace(identity.clone()) {
                        // Code paths grow by one token, never equal in practice
                        if parent != identity {
                            edges.insert(parent, identity.clone());
                        }
                    }
                }
            }
        }

        debug!(
            "Recorded {} vertices and {} edges from {} sentences ({} distinct tokens)",
            table.len(),
            edges.len(),
            num_sentences,
            codifier.num_codes()
        );

        if table.len() == 0 {
            return Ok(BuildReport {
                tree: TextTree::new(),
                conflicts,
                num_sentences,
                num_pruned: 0,
            });
        }

        for conflict in &conflicts {
            if conflict.reference_differs() {
                warn!(
                    "Sentences with different references end on '{}' ({}); kept {:?}, dropped {:?}",
                    conflict.text, conflict.identity, conflict.kept_reference, conflict.dropped_reference
                );
            }
            if conflict.extra_differs() {
                warn!(
                    "Sentences with different attributes end on '{}' ({}); kept {:?}, dropped {:?}",
                    conflict.text, conflict.identity, conflict.kept_extra, conflict.dropped_extra
                );
            }
        }

        let mut tree = assemble(table, edges)?;
        tree.validate()?;

        let num_pruned = if self.prune { prune_cosmetic(&mut tree) } else { 0 };
        if num_pruned > 0 {
            debug!("Pruned {} punctuation/whitespace vertices", num_pruned);
            tree.validate()?;
        }

        Ok(BuildReport {
            tree,
            conflicts,
            num_sentences,
            num_pruned,
        })
    }

    /// Attaches document metadata to a vertex on which a sentence ends.
    ///
    /// The first sentence ending on a vertex sets its metadata. Later ones
    /// with different metadata are resolved by the [MergePolicy] and
    /// reported as a conflict.
    fn terminate(
        &self,
        node: &mut NodeAttributes,
        first_visit: bool,
        reference: Option<&str>,
        extra: &ExtraAttributes,
    ) -> Option<MergeConflict> {
        if first_visit {
            node.reference = reference.map(str::to_string);
            node.extra = extra.clone();
            return None;
        }

        if node.reference.as_deref() == reference && &node.extra == extra {
            return None;
        }

        let new_reference = reference.map(str::to_string);
        let (kept_reference, dropped_reference, kept_extra, dropped_extra) = match self.merge_policy {
            MergePolicy::KeepLast => {
                let dropped_reference = std::mem::replace(&mut node.reference, new_reference);
                let dropped_extra = std::mem::replace(&mut node.extra, extra.clone());
                (node.reference.clone(), dropped_reference, node.extra.clone(), dropped_extra)
            }
            MergePolicy::KeepFirst => (node.reference.clone(), new_reference, node.extra.clone(), extra.clone()),
        };

        Some(MergeConflict {
            identity: node.identity.clone(),
            text: node.text.clone(),
            kept_reference,
            dropped_reference,
            kept_extra,
            dropped_extra,
        })
    }
}

// ============================================================================
// Helpers (private)
// ============================================================================
/// Node attributes by identity, in order of first occurrence.
#[derive(Default)]
struct NodeTable {
    nodes: Vec<NodeAttributes>,
    slots: HashMap<NodeIdentity, usize>,
    /// Whether some sentence ended on the node, parallel to `nodes`
    terminal: Vec<bool>,
}

impl NodeTable {
    /// Records the attributes of a token position; a later visit of the same
    /// identity updates token fields but keeps terminal metadata.
    fn record(&mut self, attributes: NodeAttributes) -> usize {
        if let Some(&slot) = self.slots.get(&attributes.identity) {
            let node = &mut self.nodes[slot];
            node.text = attributes.text;
            node.whitespace = attributes.whitespace;
            node.is_punct = attributes.is_punct;
            node.simple_label = attributes.simple_label;
            return slot;
        }

        let slot = self.nodes.len();
        self.slots.insert(attributes.identity.clone(), slot);
        self.nodes.push(attributes);
        self.terminal.push(false);
        slot
    }

    /// Marks `slot` as the end of a sentence; returns `true` on the first mark.
    fn mark_terminal(&mut self, slot: usize) -> bool {
        !std::mem::replace(&mut self.terminal[slot], true)
    }

    fn get_mut(&mut self, slot: usize) -> &mut NodeAttributes {
        &mut self.nodes[slot]
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }
}

/// Deduplicated parent → child edges, in order of first occurrence.
#[derive(Default)]
struct EdgeSet {
    edges: Vec<(NodeIdentity, NodeIdentity)>,
    seen: HashSet<(NodeIdentity, NodeIdentity)>,
}

impl EdgeSet {
    fn insert(&mut self, parent: NodeIdentity, child: NodeIdentity) {
        let edge = (parent, child);
        if !self.seen.contains(&edge) {
            self.seen.insert(edge.clone());
            self.edges.push(edge);
        }
    }

    fn len(&self) -> usize {
        self.edges.len()
    }
}

/// Creates the arena from recorded vertices and edges and determines the root.
fn assemble(table: NodeTable, edges: EdgeSet) -> Result<TextTree> {
    let mut tree = TextTree::with_capacity(table.len() + 1);
    for attributes in table.nodes {
        tree.add_vertex(attributes);
    }

    let mut has_parent = vec![false; tree.num_vertices()];
    for (parent, child) in &edges.edges {
        let (Some(parent_index), Some(child_index)) = (tree.index_of(parent), tree.index_of(child)) else {
            return Err(TextTreeError::malformed_tree(format!(
                "edge {parent} -> {child} refers to unknown vertex"
            )));
        };

        if has_parent[child_index] {
            return Err(TextTreeError::malformed_tree(format!(
                "vertex {child} has more than one parent"
            )));
        }
        has_parent[child_index] = true;
        tree.attach(parent_index, child_index);
    }

    let roots: Vec<VertexIndex> = (0..has_parent.len()).filter(|&i| !has_parent[i]).collect();
    match roots.as_slice() {
        [] => {
            return Err(TextTreeError::malformed_tree("no vertex without parent (cycle)"));
        }
        [root] => tree.set_root(*root),
        _ => {
            debug!("{} sentence roots, joining them under a synthetic root", roots.len());
            let synthetic = tree.add_vertex(NodeAttributes::synthetic_root());
            for root in roots {
                tree.attach(synthetic, root);
            }
            tree.set_root(synthetic);
        }
    }

    Ok(tree)
}

/// Deletes non-root, non-leaf punctuation/whitespace vertices with more than
/// one leaf below, re-parenting their children. Returns the number deleted.
fn prune_cosmetic(tree: &mut TextTree) -> usize {
    let leaf_counts = tree.leaf_counts();
    let doomed: Vec<VertexIndex> = tree
        .pre_order_iter()
        .filter(|v| !v.is_root() && !v.is_leaf())
        .filter(|v| leaf_counts[v.index()] > 1 && v.attributes().is_cosmetic())
        .map(|v| v.index())
        .collect();

    for &index in &doomed {
        tree.delete_vertex(index);
    }
    tree.compact();

    doomed.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::token::{Sentence, Token};

    fn docs(texts: &[&str]) -> DocumentSentences {
        DocumentSentences::new(texts.iter().map(|t| vec![Sentence::from_words(t)]).collect())
    }

    #[test]
    fn test_edges_are_deduplicated_in_first_occurrence_order() {
        let mut edges = EdgeSet::default();
        let a = NodeIdentity::from(vec![1]);
        let b = NodeIdentity::from(vec![1, 2]);
        let c = NodeIdentity::from(vec![1, 3]);
        edges.insert(a.clone(), c.clone());
        edges.insert(a.clone(), b.clone());
        edges.insert(a.clone(), c.clone());
        assert_eq!(edges.len(), 2);
        assert_eq!(edges.edges[0].1, c);
        assert_eq!(edges.edges[1].1, b);
    }

    #[test]
    fn test_single_token_sentences_become_vertices() {
        let tree = PrefixTreeBuilder::new().build(&docs(&["Hello", "Hello"])).unwrap();
        assert_eq!(tree.num_vertices(), 1);
        assert_eq!(tree.root().unwrap().text(), "Hello");
    }

    #[test]
    fn test_prune_keeps_punctuation_on_unbranched_chain() {
        let input = DocumentSentences::new(vec![vec![Sentence::new(vec![
            Token::word("Well", false),
            Token::word(",", true),
            Token::word("yes", false),
        ])]]);
        let report = PrefixTreeBuilder::new().build_with_report(&input).unwrap();
        assert_eq!(report.num_pruned, 0);
        assert_eq!(report.tree.num_vertices(), 3);
    }

    #[test]
    fn test_prune_removes_comma_above_branch_point() {
        let comma = |ws| Token::word(",", ws);
        let input = DocumentSentences::new(vec![
            vec![Sentence::new(vec![Token::word("Well", false), comma(true), Token::word("yes", false)])],
            vec![Sentence::new(vec![Token::word("Well", false), comma(true), Token::word("no", false)])],
        ]);
        let report = PrefixTreeBuilder::new().build_with_report(&input).unwrap();
        assert_eq!(report.num_pruned, 1);

        let tree = report.tree;
        let root = tree.root().unwrap();
        assert_eq!(tree.child_texts(root.index()), vec!["yes", "no"]);
        assert!(tree.validate().is_ok());
    }
}
