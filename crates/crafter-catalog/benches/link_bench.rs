//! Criterion benchmarks for the catalog link passes.

use crafter_catalog::test_utils::make_wide_builder;
use criterion::{Criterion, criterion_group, criterion_main};

fn bench_link(c: &mut Criterion) {
    let mut group = c.benchmark_group("link");
    group.sample_size(50);

    // Benchmark: 200 types, 20 groups of 200 members, 100 recipes.
    let builder = make_wide_builder(200, 20, 100);
    group.bench_function("build_200_types_20_groups_100_recipes", |b| {
        b.iter(|| builder.clone().build().unwrap());
    });

    // Benchmark: re-linking an already linked builder.
    let mut linked = make_wide_builder(200, 20, 100);
    linked.link().unwrap();
    group.bench_function("relink_200_types_20_groups_100_recipes", |b| {
        b.iter(|| linked.link().unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_link);
criterion_main!(benches);
