use text_tree::TextTreeError;
use text_tree::model::{Codifier, NodeAttributes, NodeIdentity, TextTree, Token, VertexIndex};

/// Adds the token path `words` below `parent` (root if `None`), returning the
/// index of the last vertex.
fn add_path(
    tree: &mut TextTree,
    codifier: &mut Codifier,
    parent: Option<VertexIndex>,
    words: &[&str],
) -> VertexIndex {
    let mut identity = parent.map(|p| tree[p].identity().clone()).unwrap_or_default();
    let mut label = parent.map(|p| tree[p].attributes().simple_label.clone()).unwrap_or_default();
    let mut previous = parent;

    for word in words {
        identity = identity.extended(codifier.codify(word));
        let attributes = NodeAttributes::from_token(identity.clone(), &Token::word(*word, true), &label);
        label.clone_from(&attributes.simple_label);
        let index = tree.add_vertex(attributes);
        if let Some(p) = previous {
            tree.attach(p, index);
        }
        previous = Some(index);
    }
    previous.unwrap()
}

#[test]
fn test_building_tree() {
    let mut codifier = Codifier::new();
    let mut tree = TextTree::new();
    let index_i = add_path(&mut tree, &mut codifier, None, &["I"]);
    tree.set_root(index_i);
    let index_like = add_path(&mut tree, &mut codifier, Some(index_i), &["like"]);
    let index_tea = add_path(&mut tree, &mut codifier, Some(index_like), &["tea"]);
    let index_coffee = add_path(&mut tree, &mut codifier, Some(index_like), &["coffee"]);
    let index_hate = add_path(&mut tree, &mut codifier, Some(index_i), &["hate", "milk"]);

    assert!(tree.validate().is_ok());

    // Counts
    assert_eq!(tree.num_vertices(), 6);
    assert_eq!(tree.num_leaves(), 3);
    assert_eq!(tree.num_edges(), 5);

    // Root
    let root = tree.root().unwrap();
    assert_eq!(root.index(), index_i);
    assert!(root.is_root());
    assert!(root.is_branch_point());

    // Leaves
    let tea = &tree[index_tea];
    assert!(tea.is_leaf());
    assert_eq!(tea.parent(), Some(index_like));
    assert_eq!(tree.num_siblings(index_tea), 1);
    assert_eq!(tree.num_siblings(index_hate), 0);
    assert_eq!(tree[index_hate].text(), "milk");
    assert_eq!(tree[index_coffee].attributes().simple_label, "ilikecoffee");

    // Lookup
    let like_id = NodeIdentity::from(vec![1, 2]);
    assert_eq!(tree.index_of(&like_id), Some(index_like));
    assert_eq!(tree.find(&like_id).unwrap().text(), "like");

    // Leaf counts
    let counts = tree.leaf_counts();
    assert_eq!(counts[index_i], 3);
    assert_eq!(counts[index_like], 2);
    assert_eq!(counts[index_tea], 1);
}

#[test]
fn test_traversal_orders() {
    let mut codifier = Codifier::new();
    let mut tree = TextTree::new();
    let root = add_path(&mut tree, &mut codifier, None, &["a"]);
    tree.set_root(root);
    let b = add_path(&mut tree, &mut codifier, Some(root), &["b"]);
    add_path(&mut tree, &mut codifier, Some(b), &["c"]);
    add_path(&mut tree, &mut codifier, Some(b), &["d"]);
    add_path(&mut tree, &mut codifier, Some(root), &["e"]);

    let pre: Vec<&str> = tree.pre_order_iter().map(|v| v.text()).collect();
    let post: Vec<&str> = tree.post_order_iter().map(|v| v.text()).collect();
    let leaves: Vec<&str> = tree.leaves().map(|v| v.text()).collect();
    assert_eq!(pre, vec!["a", "b", "c", "d", "e"]);
    assert_eq!(post, vec!["c", "d", "b", "e", "a"]);
    assert_eq!(leaves, vec!["c", "d", "e"]);
}

#[test]
fn test_adding_known_identity_replaces_attributes() {
    let mut tree = TextTree::new();
    let identity = NodeIdentity::from(vec![1]);
    let first = tree.add_vertex(NodeAttributes::from_token(identity.clone(), &Token::word("The", true), ""));
    let second = tree.add_vertex(NodeAttributes::from_token(identity, &Token::word("the", false), ""));

    assert_eq!(first, second);
    assert_eq!(tree.num_vertices(), 1);
    assert_eq!(tree[first].text(), "the");
    assert!(!tree[first].attributes().whitespace);
}

#[test]
fn test_validate_detects_unattached_vertex() {
    let mut codifier = Codifier::new();
    let mut tree = TextTree::new();
    let root = add_path(&mut tree, &mut codifier, None, &["a"]);
    add_path(&mut tree, &mut codifier, None, &["b"]);
    tree.set_root(root);

    assert!(matches!(tree.validate(), Err(TextTreeError::MalformedTree(_))));
}

#[test]
fn test_validate_detects_missing_root() {
    let mut codifier = Codifier::new();
    let mut tree = TextTree::new();
    add_path(&mut tree, &mut codifier, None, &["a"]);

    assert!(matches!(tree.validate(), Err(TextTreeError::MalformedTree(_))));
}

#[test]
fn test_empty_tree() {
    let tree = TextTree::new();
    assert!(tree.is_empty());
    assert!(tree.root().is_none());
    assert!(tree.validate().is_ok());
    assert_eq!(tree.pre_order_iter().count(), 0);
    assert_eq!(tree.to_string(), "(empty tree)\n");
}

#[test]
fn test_display() {
    let mut codifier = Codifier::new();
    let mut tree = TextTree::new();
    let root = add_path(&mut tree, &mut codifier, None, &["The"]);
    tree.set_root(root);
    add_path(&mut tree, &mut codifier, Some(root), &["cat"]);
    add_path(&mut tree, &mut codifier, Some(root), &["dog"]);

    let shown = tree.to_string();
    assert!(shown.starts_with("[0] \"The\" (2 leaves)\n"));
    assert!(shown.contains("├─ [1] \"cat\""));
    assert!(shown.contains("└─ [2] \"dog\""));
}

#[test]
#[should_panic]
fn test_get_vertex_out_of_bounds() {
    let tree = TextTree::new();
    let _ = &tree[55];
}
