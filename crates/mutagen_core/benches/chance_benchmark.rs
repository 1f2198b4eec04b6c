//! Benchmark for success-chance evaluation over composite trees.
//!
//! Run with: cargo bench --package mutagen_core --bench chance_benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mutagen_core::catalog::{ClassTag, ItemCatalog, ItemId, SourceStack};
use mutagen_core::chance::success_chance;
use mutagen_core::evaluator::{leaf_tally, stability_of};

/// Builds a chain of `depth` fusions, each mixing in a fresh base item.
fn create_deep_catalog(depth: u32) -> (ItemCatalog, ItemId, ItemId) {
    let mut catalog = ItemCatalog::new();
    let first = catalog
        .add_base("Base 0", ClassTag::Winged, 90.0)
        .unwrap();
    let mut current = first;

    for i in 1..=depth {
        let class = ClassTag::ALL[(i as usize) % ClassTag::ALL.len()];
        let base = catalog
            .add_base(format!("Base {i}"), class, (i % 100) as f32)
            .unwrap();
        current = catalog
            .add_composite(vec![SourceStack::new(current, 2), SourceStack::new(base, 1)])
            .unwrap();
    }

    (catalog, first, current)
}

fn benchmark_leaf_pair(c: &mut Criterion) {
    let (catalog, first, _) = create_deep_catalog(1);
    let second = ItemId::from_raw(1);

    c.bench_function("chance_leaf_pair", |b| {
        b.iter(|| black_box(success_chance(&catalog, black_box(first), black_box(second))));
    });
}

fn benchmark_deep_pair(c: &mut Criterion) {
    let (catalog, first, deep) = create_deep_catalog(32);

    c.bench_function("chance_depth_32_vs_leaf", |b| {
        b.iter(|| black_box(success_chance(&catalog, black_box(deep), black_box(first))));
    });

    c.bench_function("stability_depth_32", |b| {
        b.iter(|| black_box(stability_of(&catalog, black_box(deep))));
    });
}

fn benchmark_leaf_tally(c: &mut Criterion) {
    let (catalog, _, deep) = create_deep_catalog(32);

    c.bench_function("leaf_tally_depth_32", |b| {
        b.iter(|| black_box(leaf_tally(&catalog, black_box(deep))));
    });
}

criterion_group!(
    benches,
    benchmark_leaf_pair,
    benchmark_deep_pair,
    benchmark_leaf_tally
);
criterion_main!(benches);
