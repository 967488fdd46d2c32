//! Benchmarks for navigation building.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use pal_nav::{DocEntry, NavIndexer};

/// Create `groups * per_group` entries, every third one without an order.
fn create_entries(groups: usize, per_group: usize) -> Vec<DocEntry> {
    let mut entries = Vec::with_capacity(groups * per_group);
    for g in 0..groups {
        for i in 0..per_group {
            let entry = DocEntry::new(
                format!("Page {i}"),
                format!("Group {g}"),
                format!("/docs/group-{g}/page-{i}"),
            );
            let entry = if i % 3 == 0 {
                entry
            } else {
                entry.with_order(i64::try_from(per_group - i).unwrap())
            };
            entries.push(entry);
        }
    }
    entries
}

fn bench_build_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_tree");
    let indexer = NavIndexer::new().with_group_order("Group 0", 1);

    for size in [10, 50, 200] {
        let entries = create_entries(5, size);
        group.bench_with_input(BenchmarkId::from_parameter(size * 5), &entries, |b, e| {
            b.iter(|| indexer.build_tree(e));
        });
    }

    group.finish();
}

fn bench_prev_next(c: &mut Criterion) {
    let entries = create_entries(5, 200);
    let indexer = NavIndexer::new();

    let mut group = c.benchmark_group("prev_next");

    group.bench_function("hit", |b| {
        b.iter(|| indexer.prev_next(&entries, "/docs/group-2/page-100"));
    });

    group.bench_function("miss", |b| {
        b.iter(|| indexer.prev_next(&entries, "/docs/missing"));
    });

    group.finish();
}

criterion_group!(benches, bench_build_tree, bench_prev_next);
criterion_main!(benches);
