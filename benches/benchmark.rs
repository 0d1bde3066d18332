use gsinks::prelude::*;
use testing::DigraphIter;

use criterion::{BatchSize, black_box, criterion_group, criterion_main, Criterion};

fn count_all(graphs: impl IntoIterator<Item = Digraph>) -> u64 {
    graphs.into_iter().map(|g| {
        count_sink_extensions(&g, &NautyEngine, &ExtensionOptions::default(), |_| {})
            .unwrap()
    }).sum()
}

fn construct_all(graphs: impl IntoIterator<Item = Digraph>) -> usize {
    let mut extensions = Vec::new();
    let options = ExtensionOptions { construct: true };
    for g in graphs {
        count_sink_extensions(&g, &NautyEngine, &options, |h| extensions.push(h))
            .unwrap();
    }
    extensions.len()
}

fn criterion_benchmark(c: &mut Criterion) {
    let graphs = Vec::from_iter(
        DigraphIter::default()
            .take(1000)
            .map(|g| Digraph::from(&g)),
    );
    let g = graphs.clone();
    c.bench_function("count", move |b| {
        b.iter_batched(|| g.clone(), |g| count_all(black_box(g)), BatchSize::SmallInput)
    });
    c.bench_function("construct", move |b| {
        b.iter_batched(|| graphs.clone(), |g| construct_all(black_box(g)), BatchSize::SmallInput)
    });

    let graphs = Vec::from_iter(
        DigraphIter::default()
            .with_loops(true)
            .max_order(12)
            .take(100)
            .map(|g| Digraph::from(&g)),
    );
    c.bench_function("count with loops", move |b| {
        b.iter_batched(|| graphs.clone(), |g| count_all(black_box(g)), BatchSize::SmallInput)
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
