use std::cell::RefCell;
use std::path::{Path, PathBuf};
use text_tree::driver::TextTreeDriver;
use text_tree::model::{AttributeValue, DocumentSentences, ExtraAttributes, MergePolicy, Sentence};
use text_tree::render::{NhxRenderer, TreeRenderer};
use text_tree::segment::{RootPattern, SentSplitting, SentenceSegmenter};
use text_tree::style::{Orientation, Rgb, StyleConfig, StyledTree};
use text_tree::{Result, TextTreeError, build_text_tree, draw_text_tree};

const REVIEWS: [&str; 4] = [
    "The food was good. The service was slow.",
    "Nice place. The food was cold!",
    "The staff was friendly.",
    "Would not return.",
];

/// Records what it was asked to render.
#[derive(Default)]
struct RecordingRenderer {
    calls: RefCell<Vec<(PathBuf, Orientation, usize)>>,
}

impl TreeRenderer for RecordingRenderer {
    fn render(&self, styled: &StyledTree, output: &Path) -> Result<()> {
        self.calls.borrow_mut().push((
            output.to_path_buf(),
            styled.layout().orientation,
            styled.tree().num_leaves(),
        ));
        Ok(())
    }
}

// --- TESTS RUN ---
#[test]
fn test_run_forward() {
    let outcome = TextTreeDriver::new().run(&REVIEWS, &RootPattern::word("the")).unwrap();

    assert_eq!(outcome.num_sentences(), 4);
    assert_eq!(outcome.doc_sentences.len(), 4);
    assert_eq!(outcome.doc_sentences[0].len(), 2);
    assert_eq!(outcome.doc_sentences[1].len(), 1);
    assert!(outcome.doc_sentences[3].is_empty());

    let styled = outcome.tree.unwrap();
    let tree = styled.tree();
    let root = tree.root().unwrap();
    assert_eq!(root.text(), "The");
    assert_eq!(tree.child_texts(root.index()), vec!["food", "service", "staff"]);
    assert_eq!(styled.style(root.index()).face.font_size, 32.0);
    assert_eq!(styled.layout().orientation, Orientation::Forward);
}

#[test]
fn test_run_reverse() {
    let docs = ["This was good.", "The food was good!", "Service was bad."];
    let outcome = TextTreeDriver::new()
        .with_reverse(true)
        .run(&docs, &RootPattern::word("good"))
        .unwrap();

    let styled = outcome.tree.unwrap();
    let root = styled.tree().root().unwrap();
    assert_eq!(root.text(), "good");
    assert_eq!(styled.tree().child_texts(root.index()), vec!["was"]);
    assert_eq!(styled.layout().orientation, Orientation::Reversed);
    let tokens: Vec<&str> = outcome.doc_sentences[1][0].tokens().iter().map(|t| t.text()).collect();
    assert_eq!(tokens, vec!["good", "was", "food", "The"]);
}

#[test]
fn test_no_match_is_empty_outcome() {
    let outcome = TextTreeDriver::new().run(&REVIEWS, &RootPattern::word("zebra")).unwrap();
    assert!(outcome.is_empty());
    assert_eq!(outcome.doc_sentences.len(), 4);
    assert_eq!(outcome.num_sentences(), 0);
}

#[test]
fn test_references_and_attributes_flow_through() {
    let refs: Vec<Option<String>> = (1..=4).map(|i| Some(format!("review {i}"))).collect();
    let attrs: Vec<ExtraAttributes> = (1..=4i64)
        .map(|i| ExtraAttributes::from([("stars".to_string(), AttributeValue::from(i))]))
        .collect();

    let outcome = TextTreeDriver::new()
        .with_references(refs)
        .with_attributes(attrs)
        .run(&REVIEWS, &RootPattern::word("the"))
        .unwrap();

    let styled = outcome.tree.unwrap();
    let staff_end = styled.tree().leaves().find(|v| v.reference() == Some("review 3")).unwrap();
    assert_eq!(staff_end.attributes().extra["stars"], AttributeValue::Int(3));
    assert_eq!(styled.style(staff_end.index()).reference.as_ref().unwrap().text, "review 3");
}

#[test]
fn test_conflicts_reported() {
    let docs = ["The end.", "The end."];
    let refs = vec![Some("first".to_string()), Some("second".to_string())];

    let outcome = TextTreeDriver::new()
        .with_references(refs.clone())
        .run(&docs, &RootPattern::word("the"))
        .unwrap();
    assert_eq!(outcome.conflicts.len(), 1);
    assert_eq!(outcome.conflicts[0].kept_reference.as_deref(), Some("second"));

    let outcome = TextTreeDriver::new()
        .with_references(refs)
        .with_merge_policy(MergePolicy::KeepFirst)
        .run(&docs, &RootPattern::word("the"))
        .unwrap();
    assert_eq!(outcome.conflicts[0].kept_reference.as_deref(), Some("first"));
}

#[test]
fn test_highlights_and_style() {
    let outcome = TextTreeDriver::new()
        .with_highlights(vec!["food".into()])
        .with_style(StyleConfig::default().with_font_sizes(4.0, 10.0))
        .run(&REVIEWS, &RootPattern::word("the"))
        .unwrap();

    let styled = outcome.tree.unwrap();
    let food = styled.tree().vertices().find(|v| v.text() == "food").unwrap();
    assert_eq!(styled.style(food.index()).face.background, Rgb::from_hex(0x1f77b4));
    assert_eq!(styled.style(food.index()).face.font_size, 8.0);
    let root = styled.tree().root().unwrap().index();
    assert_eq!(styled.style(root).face.font_size, 10.0);
}

#[test]
fn test_sent_splitting_forwarded() {
    let docs = ["the first line\nthe second line"];
    let punct = TextTreeDriver::new().run(&docs, &RootPattern::word("the")).unwrap();
    assert_eq!(punct.num_sentences(), 1);

    let newline = TextTreeDriver::new()
        .with_sent_splitting(SentSplitting::Newline)
        .run(&docs, &RootPattern::word("the"))
        .unwrap();
    assert_eq!(newline.num_sentences(), 2);
}

// --- TESTS INPUT VALIDATION ---
#[test]
fn test_misaligned_references_rejected() {
    let result = TextTreeDriver::new()
        .with_references(vec![None])
        .run(&REVIEWS, &RootPattern::word("the"));
    assert!(matches!(result, Err(TextTreeError::InvalidInput(_))));
}

#[test]
fn test_misaligned_references_match_sentence_set_error() {
    let from_driver = TextTreeDriver::new()
        .with_references(vec![None])
        .run(&REVIEWS, &RootPattern::word("the"))
        .unwrap_err();
    let from_set = DocumentSentences::with_metadata(vec![Vec::new(); REVIEWS.len()], Some(vec![None]), None).unwrap_err();
    assert_eq!(from_driver.to_string(), from_set.to_string());
}

#[test]
fn test_misaligned_attributes_rejected() {
    let result = TextTreeDriver::new()
        .with_attributes(vec![ExtraAttributes::new(); 5])
        .run(&REVIEWS, &RootPattern::word("the"));
    assert!(matches!(result, Err(TextTreeError::InvalidInput(_))));
}

#[test]
fn test_invalid_highlight_rejected() {
    let result = TextTreeDriver::new()
        .with_highlights(vec!["[".into()])
        .run(&REVIEWS, &RootPattern::word("the"));
    assert!(matches!(result, Err(TextTreeError::InvalidHighlight { .. })));
}

// --- TESTS DRAW ---
#[test]
fn test_draw_hands_tree_to_renderer() {
    let renderer = RecordingRenderer::default();
    TextTreeDriver::new()
        .with_reverse(true)
        .draw(&["It was good."], &RootPattern::word("good"), "out.svg", &renderer)
        .unwrap();

    let calls = renderer.calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0], (PathBuf::from("out.svg"), Orientation::Reversed, 1));
}

#[test]
fn test_draw_skips_renderer_without_match() {
    let renderer = RecordingRenderer::default();
    let outcome = TextTreeDriver::new()
        .draw(&REVIEWS, &RootPattern::word("zebra"), "out.svg", &renderer)
        .unwrap();
    assert!(outcome.is_empty());
    assert!(renderer.calls.borrow().is_empty());
}

#[test]
fn test_draw_text_tree_writes_nhx() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reviews.nhx");

    let outcome = draw_text_tree(&REVIEWS, "The", &path).unwrap();
    assert_eq!(outcome.num_sentences(), 4);
    let nhx = std::fs::read_to_string(&path).unwrap();
    assert!(nhx.trim_end().ends_with(';'));
    assert!(nhx.contains("The[&&NHX:leaves=4:fsize=32"));

    NhxRenderer.render(outcome.tree.as_ref().unwrap(), &path).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), nhx);
}

#[test]
fn test_build_text_tree() {
    assert!(build_text_tree(vec![]).unwrap().is_none());
    let styled = build_text_tree(vec![Sentence::from_words("a b"), Sentence::from_words("a c")])
        .unwrap()
        .unwrap();
    assert_eq!(styled.tree().num_vertices(), 3);
}

/// Splits documents at '|' and matches the pattern at the first token.
struct PipeSegmenter;

impl SentenceSegmenter for PipeSegmenter {
    fn segment(&self, text: &str, pattern: &RootPattern, _reverse: bool, _splitting: SentSplitting) -> Vec<Sentence> {
        text.split('|')
            .map(Sentence::from_words)
            .filter(|s| pattern.matches_at(s.tokens(), 0))
            .collect()
    }
}

#[test]
fn test_custom_segmenter() {
    let outcome = TextTreeDriver::with_segmenter(PipeSegmenter)
        .run(&["x y | x z | w"], &RootPattern::word("x"))
        .unwrap();
    assert_eq!(outcome.num_sentences(), 2);
    assert_eq!(outcome.tree.unwrap().tree().num_leaves(), 2);
}
