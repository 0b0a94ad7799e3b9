//! # TaggedVec Benchmark
//!
//! Insert, lookup and removal on a container holding all 32 tags.
//!
//! Run with: `cargo bench --package ordinal-core`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ordinal_core::{bit_index, tags, TaggedVec};

fn full_container() -> TaggedVec<u64> {
    let mut set = TaggedVec::with_capacity(32);
    for tag in tags(u32::MAX) {
        set.insert(tag, u64::from(tag));
    }
    set
}

/// Benchmark: ordinal lookup for every bit of a full mask.
fn bench_bit_index(c: &mut Criterion) {
    c.bench_function("bit_index_all_tags", |b| {
        b.iter(|| {
            let mut sum = 0u32;
            for tag in tags(u32::MAX) {
                sum += bit_index(black_box(u32::MAX), tag);
            }
            sum
        });
    });
}

/// Benchmark: fill an empty container, lowest and highest tag first.
fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_32");

    let ascending: Vec<u32> = tags(u32::MAX).collect();
    let descending: Vec<u32> = ascending.iter().rev().copied().collect();

    for (name, order) in [("ascending", &ascending), ("descending", &descending)] {
        group.bench_with_input(BenchmarkId::from_parameter(name), order, |b, order| {
            b.iter(|| {
                let mut set = TaggedVec::with_capacity(32);
                for &tag in order {
                    set.insert(tag, tag);
                }
                black_box(set.len())
            });
        });
    }

    group.finish();
}

/// Benchmark: get every tag from a full container.
fn bench_get(c: &mut Criterion) {
    let set = full_container();
    c.bench_function("get_all_tags", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            for tag in tags(u32::MAX) {
                sum += set.get(black_box(tag)).copied().unwrap_or_default();
            }
            sum
        });
    });
}

/// Benchmark: remove the lowest tag and put it back.
fn bench_remove_reinsert(c: &mut Criterion) {
    let mut set = full_container();
    c.bench_function("remove_reinsert_lowest", |b| {
        b.iter(|| {
            let item = set.remove(black_box(1)).unwrap_or_default();
            set.insert(1, item);
        });
    });
}

criterion_group!(
    benches,
    bench_bit_index,
    bench_insert,
    bench_get,
    bench_remove_reinsert,
);
criterion_main!(benches);
