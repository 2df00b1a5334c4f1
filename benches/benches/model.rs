// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for `understory_model` collections.

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use understory_model::{Collection, Identifiable, Property};

struct Item {
    id: u32,
    score: Property<u32>,
}

impl Identifiable<u32> for Item {
    fn id(&self) -> u32 {
        self.id
    }
}

fn item(id: u32) -> Item {
    // Cheap deterministic scramble so sorting has work to do.
    let score = id.wrapping_mul(2_654_435_761) >> 7;
    Item {
        id,
        score: Property::with_value(score),
    }
}

fn filled(n: u32) -> Collection<u32, Item> {
    let mut collection = Collection::identifiable();
    for id in 0..n {
        collection.add(item(id)).ok();
    }
    collection
}

fn bench_add_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("collection_add_remove");
    for &n in &[100_u32, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter_batched(
                Collection::<u32, Item>::identifiable,
                |mut collection| {
                    for id in 0..n {
                        collection.add(item(id)).ok();
                    }
                    for id in (0..n).step_by(2) {
                        collection.remove_by_id(&id);
                    }
                    collection
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("collection_sort");
    for &n in &[100_u32, 1_000, 10_000] {
        let collection = filled(n);
        group.bench_with_input(BenchmarkId::new("less", n), &n, |b, _| {
            b.iter(|| black_box(collection.sort(|a, b| a.score < b.score)));
        });
        group.bench_with_input(BenchmarkId::new("key", n), &n, |b, _| {
            b.iter(|| black_box(collection.sort_by_key(|item| item.score.get().copied())));
        });
    }
    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let collection = filled(10_000);
    c.bench_function("collection_find_by_id", |b| {
        let mut id = 0_u32;
        b.iter(|| {
            id = (id + 7919) % 10_000;
            black_box(collection.find_by_id(&id).is_ok())
        });
    });
}

criterion_group!(benches, bench_add_remove, bench_sort, bench_lookup);
criterion_main!(benches);
