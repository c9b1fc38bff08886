extern crate criterion;

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use indexed_min_heap::IndexedMinHeap;
use rustc_hash::FxHasher;
use std::hash::BuildHasherDefault;

use crate::generators::{
    gen_random_distances, gen_random_usizes, generate_worst_push_data, get_unique_random_strings,
};

type FxIndexedMinHeap<K, P> = IndexedMinHeap<K, P, BuildHasherDefault<FxHasher>>;

pub fn bench_push(c: &mut Criterion) {
    let base_keys = gen_random_usizes(500_000, 0);
    let base_values = gen_random_distances(500_000, 7);

    let extra_keys = gen_random_usizes(1000, 8);
    let extra_values = gen_random_distances(1000, 20);
    let extra: Vec<_> = extra_keys.into_iter().zip(extra_values).collect();

    let mut group = c.benchmark_group("push_usizes_random");
    for &size in &[100_000, 200_000, 300_000, 400_000, 500_000] {
        assert!(base_keys.len() >= size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let base_heap: IndexedMinHeap<usize, f64> = base_keys[..size]
                .iter()
                .cloned()
                .zip(base_values[..size].iter().cloned())
                .collect();
            b.iter_batched(
                || base_heap.clone(),
                |mut heap| {
                    for &(k, v) in extra.iter() {
                        heap.push(k, v);
                    }
                    heap
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();

    let mut group = c.benchmark_group("push_usizes_random_fx");
    for &size in &[100_000, 500_000] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let base_heap: FxIndexedMinHeap<usize, f64> = base_keys[..size]
                .iter()
                .cloned()
                .zip(base_values[..size].iter().cloned())
                .collect();
            b.iter_batched(
                || base_heap.clone(),
                |mut heap| {
                    for &(k, v) in extra.iter() {
                        heap.push(k, v);
                    }
                    heap
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();

    // Every extra push lands at the root.
    let mut base_keys: Vec<String> = get_unique_random_strings(55_000, 987987);
    let base_values = gen_random_distances(55_000, 23423);

    let extra_keys: Vec<_> = base_keys[50_000..].to_vec();
    base_keys.truncate(50_000);
    let (base_values, extra_values) = generate_worst_push_data(base_values, 5_000, 987987);
    let extra: Vec<_> = extra_keys.into_iter().zip(extra_values).collect();

    let mut group = c.benchmark_group("push_strings_worst");
    for &size in &[10_000, 20_000, 30_000, 40_000, 50_000] {
        assert!(base_keys.len() >= size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let base_heap: IndexedMinHeap = base_keys[..size]
                .iter()
                .cloned()
                .zip(base_values[..size].iter().cloned())
                .collect();
            b.iter_batched(
                || base_heap.clone(),
                |mut heap| {
                    for (k, v) in extra.iter().cloned() {
                        heap.push(k, v);
                    }
                    heap
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_push);
criterion_main!(benches);
