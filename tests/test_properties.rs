use proptest::prelude::*;
use text_tree::model::{DocumentSentences, PrefixTreeBuilder, Sentence, TextTree, Token};
use text_tree::newick::to_nhx;
use text_tree::style::{Orientation, SortPass, StyleConfig, StyleEngine};

const VOCABULARY: &[&str] = &["the", "The", "cat", "sat", "ran", "a", ",", ".", "!", "--", "good"];

fn token() -> impl Strategy<Value = Token> {
    (prop::sample::select(VOCABULARY), any::<bool>()).prop_map(|(text, whitespace)| Token::word(text, whitespace))
}

fn sentence() -> impl Strategy<Value = Sentence> {
    prop::collection::vec(token(), 1..6).prop_map(Sentence::new)
}

fn documents() -> impl Strategy<Value = Vec<Vec<Sentence>>> {
    prop::collection::vec(prop::collection::vec(sentence(), 0..4), 1..6)
}

fn build(docs: &[Vec<Sentence>], prune: bool) -> TextTree {
    PrefixTreeBuilder::new()
        .with_pruning(prune)
        .build(&DocumentSentences::new(docs.to_vec()))
        .unwrap()
}

fn num_sentences(docs: &[Vec<Sentence>]) -> usize {
    docs.iter().map(Vec::len).sum()
}

proptest! {
    #[test]
    fn tree_is_single_rooted(docs in documents()) {
        let tree = build(&docs, true);
        prop_assert!(tree.validate().is_ok());
        if num_sentences(&docs) == 0 {
            prop_assert!(tree.is_empty());
        } else {
            prop_assert_eq!(tree.num_edges(), tree.num_vertices() - 1);
            prop_assert_eq!(tree.vertices().filter(|v| v.is_root()).count(), 1);
        }
    }

    #[test]
    fn every_sentence_is_a_root_path(docs in documents()) {
        let tree = build(&docs, false);
        for sentence in docs.iter().flatten() {
            let texts: Vec<String> = sentence.tokens().iter().map(|t| t.text().to_lowercase()).collect();
            let mut current = tree.root().unwrap();
            if current.identity().is_synthetic_root() {
                current = current.children().iter().map(|&c| &tree[c])
                    .find(|v| v.text().to_lowercase() == texts[0]).unwrap();
            }
            prop_assert_eq!(current.text().to_lowercase(), texts[0].clone());
            for text in &texts[1..] {
                current = current.children().iter().map(|&c| &tree[c])
                    .find(|v| &v.text().to_lowercase() == text).unwrap();
            }
        }
    }

    #[test]
    fn no_self_edges(docs in documents()) {
        let tree = build(&docs, true);
        for vertex in tree.vertices() {
            prop_assert!(!vertex.children().contains(&vertex.index()));
            prop_assert_ne!(vertex.parent(), Some(vertex.index()));
        }
    }

    #[test]
    fn duplicating_input_keeps_structure(docs in documents()) {
        let mut doubled = docs.clone();
        doubled.extend(docs.iter().cloned());
        prop_assert_eq!(build(&docs, true).to_string(), build(&doubled, true).to_string());
    }

    #[test]
    fn build_is_deterministic(docs in documents()) {
        prop_assert_eq!(build(&docs, true).to_string(), build(&docs, true).to_string());
    }

    #[test]
    fn pruning_keeps_leaves_and_root(docs in documents()) {
        prop_assume!(num_sentences(&docs) > 0);
        let pruned = build(&docs, true);
        let full = build(&docs, false);

        prop_assert_eq!(pruned.num_leaves(), full.num_leaves());
        prop_assert_eq!(pruned.root().unwrap().identity(), full.root().unwrap().identity());
        let leaves = |tree: &TextTree| {
            let mut ids: Vec<_> = tree.leaves().map(|v| v.identity().clone()).collect();
            ids.sort();
            ids
        };
        prop_assert_eq!(leaves(&pruned), leaves(&full));
    }

    #[test]
    fn leaf_counts_are_monotonic(docs in documents()) {
        let tree = build(&docs, true);
        let counts = tree.leaf_counts();
        for vertex in tree.vertices() {
            if vertex.is_leaf() {
                prop_assert_eq!(counts[vertex.index()], 1);
            } else {
                let sum: usize = vertex.children().iter().map(|&c| counts[c]).sum();
                prop_assert_eq!(counts[vertex.index()], sum);
            }
            if let Some(parent) = vertex.parent() {
                prop_assert!(counts[parent] >= counts[vertex.index()]);
            }
        }
    }

    #[test]
    fn styles_are_bounded(docs in documents(), min in 1.0f32..20.0, extra in 0.0f32..100.0, reversed in any::<bool>()) {
        let config = StyleConfig::default()
            .with_font_sizes(min, min + extra)
            .with_sort_passes(vec![SortPass::Label, SortPass::Ladderize]);
        let engine = StyleEngine::with_highlights(config, &["a", "cat"]).unwrap();
        let styled = engine.apply(build(&docs, true), Orientation::from_reverse(reversed));

        prop_assert_eq!(styled.styles().len(), styled.tree().num_vertices());
        for style in styled.styles() {
            prop_assert!(style.face.font_size >= min && style.face.font_size <= min + extra);
            prop_assert!(style.face.margins.left >= 0.5 && style.face.margins.right >= 0.5);
            prop_assert!(style.hide_chrome);
        }
    }

    #[test]
    fn sorting_is_a_permutation(docs in documents()) {
        let tree = build(&docs, true);
        let config = StyleConfig::default().with_sort_passes(vec![SortPass::Label, SortPass::Ladderize]);
        let styled = StyleEngine::new(config).unwrap().apply(tree.clone(), Orientation::Forward);

        prop_assert!(styled.tree().validate().is_ok());
        for vertex in tree.vertices() {
            let mut before = vertex.children().to_vec();
            let mut after = styled.tree()[vertex.index()].children().to_vec();
            before.sort_unstable();
            after.sort_unstable();
            prop_assert_eq!(before, after);
        }
    }

    #[test]
    fn nhx_annotates_every_vertex_once(docs in documents()) {
        let tree = build(&docs, true);
        let num_vertices = tree.num_vertices();
        let styled = StyleEngine::new(StyleConfig::default()).unwrap().apply(tree, Orientation::Forward);
        let nhx = to_nhx(&styled);

        prop_assert_eq!(nhx.matches("[&&NHX").count(), num_vertices);
        if num_vertices > 0 {
            prop_assert!(nhx.ends_with(';'));
        }
    }
}
