// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for `understory_event`.

use std::cell::Cell;
use std::rc::Rc;

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use understory_event::{Event, EventHandler};

fn bench_fire(c: &mut Criterion) {
    let mut group = c.benchmark_group("event_fire");
    for &handlers in &[1_usize, 4, 16, 128] {
        let event: Event<dyn Fn(u64)> = Event::new();
        let total = Rc::new(Cell::new(0_u64));
        let subscriptions: Vec<_> = (0..handlers)
            .map(|_| {
                let sink = Rc::clone(&total);
                event.connect(Rc::new(move |value: u64| sink.set(sink.get().wrapping_add(value))))
            })
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(handlers), &handlers, |b, _| {
            b.iter(|| event.fire(|handler| handler(black_box(1))));
        });
        drop(subscriptions);
    }
    group.finish();
}

fn bench_binder_teardown(c: &mut Criterion) {
    let mut group = c.benchmark_group("event_handler_drop");
    for &events in &[1_usize, 8, 64] {
        let sources: Vec<Event<dyn Fn()>> = (0..events).map(|_| Event::new()).collect();
        group.bench_with_input(BenchmarkId::from_parameter(events), &events, |b, _| {
            b.iter_batched(
                || {
                    let mut handler = EventHandler::new();
                    for source in &sources {
                        handler.connect(source, Rc::new(|| {}));
                    }
                    handler
                },
                drop,
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_fire, bench_binder_teardown);
criterion_main!(benches);
