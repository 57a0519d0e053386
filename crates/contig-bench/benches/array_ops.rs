//! Criterion micro-benchmarks for DynamicArray append, insert, erase and copy.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use contig_array::DynamicArray;
use contig_bench::{filled, scatter_positions};
use contig_test_utils::{Counters, Tracked};

/// Benchmark: 10K appends from empty (doubling growth).
fn bench_push_10k(c: &mut Criterion) {
    c.bench_function("push_10k", |b| {
        b.iter(|| {
            let array = filled(10_000);
            black_box(array.len());
        });
    });
}

/// Benchmark: 10K appends after a single exact reservation.
fn bench_reserve_then_push_10k(c: &mut Criterion) {
    c.bench_function("reserve_then_push_10k", |b| {
        b.iter(|| {
            let mut array = DynamicArray::new();
            array.reserve(10_000);
            for i in 0..10_000u64 {
                array.push(i);
            }
            black_box(array.capacity());
        });
    });
}

/// Benchmark: 10K appends of a drop-tracked element (relocation of non-Copy values).
fn bench_push_tracked_10k(c: &mut Criterion) {
    let counters = Counters::new();
    c.bench_function("push_tracked_10k", |b| {
        b.iter(|| {
            let mut array = DynamicArray::new();
            for i in 0..10_000 {
                array.push(Tracked::new(i, &counters));
            }
            black_box(array.len());
        });
    });
}

/// Benchmark: 1K inserts at scattered positions.
fn bench_insert_scattered_1k(c: &mut Criterion) {
    let positions = scatter_positions(1_000);
    c.bench_function("insert_scattered_1k", |b| {
        b.iter(|| {
            let mut array = DynamicArray::new();
            for (i, &p) in positions.iter().enumerate() {
                array.insert(p, i);
            }
            black_box(array.len());
        });
    });
}

/// Benchmark: drain 1K elements by erasing the front.
fn bench_erase_front_1k(c: &mut Criterion) {
    c.bench_function("erase_front_1k", |b| {
        b.iter(|| {
            let mut array = filled(1_000);
            while !array.is_empty() {
                array.erase(0);
            }
            black_box(array.capacity());
        });
    });
}

/// Benchmark: clone and copy-assign into reused storage, 10K elements.
fn bench_clone_10k(c: &mut Criterion) {
    let source = filled(10_000);
    let mut target = DynamicArray::with_capacity(10_000);
    c.bench_function("clone_10k", |b| {
        b.iter(|| black_box(source.clone()));
    });
    c.bench_function("clone_from_reuse_10k", |b| {
        b.iter(|| {
            target.clone_from(&source);
            black_box(target.len());
        });
    });
}

criterion_group!(
    benches,
    bench_push_10k,
    bench_reserve_then_push_10k,
    bench_push_tracked_10k,
    bench_insert_scattered_1k,
    bench_erase_front_1k,
    bench_clone_10k
);
criterion_main!(benches);
