use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use text_tree::driver::TextTreeDriver;
use text_tree::model::{DocumentSentences, PrefixTreeBuilder, Sentence};
use text_tree::newick::to_nhx;
use text_tree::segment::RootPattern;
use text_tree::style::{Orientation, SortPass, StyleConfig, StyleEngine};

const CORPUS_SIZES: &[usize] = &[100, 1_000, 10_000];

const SUBJECTS: &[&str] = &["food", "service", "staff", "place", "music", "wine", "dessert"];
const VERBS: &[&str] = &["was", "is", "seemed", "felt"];
const ADJECTIVES: &[&str] = &["good", "great", "slow", "cold", "friendly", "loud", "fine", "awful"];
const TAILS: &[&str] = &["", " overall", " tonight", " as always", " , sadly", " for sure"];

/// Deterministic synthetic reviews, one sentence each.
fn corpus(size: usize) -> Vec<String> {
    (0..size)
        .map(|i| {
            format!(
                "The {} {} {}{}.",
                SUBJECTS[i % SUBJECTS.len()],
                VERBS[(i / 3) % VERBS.len()],
                ADJECTIVES[(i / 7) % ADJECTIVES.len()],
                TAILS[(i / 11) % TAILS.len()]
            )
        })
        .collect()
}

fn sentences(size: usize) -> DocumentSentences {
    DocumentSentences::new(
        corpus(size)
            .iter()
            .map(|doc| vec![Sentence::from_words(doc)])
            .collect(),
    )
}

fn tree_building(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for &size in CORPUS_SIZES {
        let input = sentences(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &input, |b, input| {
            b.iter(|| PrefixTreeBuilder::new().build(black_box(input)).unwrap());
        });
    }
    group.finish();
}

fn styling(c: &mut Criterion) {
    let config = StyleConfig::default().with_sort_passes(vec![SortPass::Label, SortPass::Ladderize]);
    let engine = StyleEngine::with_highlights(config, &["good", "great", "cold|awful"]).unwrap();

    let mut group = c.benchmark_group("style");
    for &size in CORPUS_SIZES {
        let tree = PrefixTreeBuilder::new().build(&sentences(size)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &tree, |b, tree| {
            b.iter(|| engine.apply(black_box(tree.clone()), Orientation::Forward));
        });
    }
    group.finish();
}

fn pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    for &size in CORPUS_SIZES {
        let docs = corpus(size);
        let driver = TextTreeDriver::new().with_highlights(vec!["good".into()]);
        group.bench_with_input(BenchmarkId::from_parameter(size), &docs, |b, docs| {
            b.iter(|| {
                let outcome = driver.run(black_box(docs.as_slice()), &RootPattern::word("the")).unwrap();
                to_nhx(outcome.tree.as_ref().unwrap())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, tree_building, styling, pipeline);
criterion_main!(benches);
