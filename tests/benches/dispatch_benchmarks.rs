//! # Herald Dispatch Benchmarks
//!
//! | Path | Claim |
//! |------|-------|
//! | Request building | No allocation beyond the body markup |
//! | Dispatch | Never blocks, O(subscribers) publish |
//! | Settlement | Single atomic transition |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use herald_bus::EventFilter;
use herald_core::{DialogContainer, HeraldConfig, MessageOptions, Messenger, PromptOptions, RequestBuilder};
use std::time::Duration;

// ============================================================================
// Request Builder
// ============================================================================

fn bench_request_builder(c: &mut Criterion) {
    let mut group = c.benchmark_group("request-builder");
    let builder = RequestBuilder::default();

    group.bench_function("plain_message", |b| {
        b.iter(|| black_box(builder.build("Hello", MessageOptions::new().level(2))))
    });

    group.bench_function("icon_message", |b| {
        b.iter(|| black_box(builder.build("Disk full", MessageOptions::new().icon("alert"))))
    });

    group.bench_function("prompt", |b| {
        b.iter(|| {
            let options = PromptOptions::new().label("Name").default_value("Bob");
            black_box(builder.prompt("Name?", options))
        })
    });

    group.finish();
}

// ============================================================================
// Dispatch + Settlement
// ============================================================================

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");
    group.measurement_time(Duration::from_secs(5));

    let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
    let _guard = runtime.enter();

    for subscribers in [0usize, 1, 8] {
        let (messenger, bus) = Messenger::in_memory(HeraldConfig::default());
        let _subs: Vec<_> = (0..subscribers).map(|_| bus.subscribe(EventFilter::all())).collect();

        group.throughput(Throughput::Elements(1));
        group.bench_with_input(
            BenchmarkId::new("dispatch_and_settle", subscribers),
            &subscribers,
            |b, _| {
                b.iter(|| {
                    let future = messenger.message("tick", MessageOptions::default());
                    future.fulfill(DialogContainer::new().with_button("ok"));
                    black_box(future.is_fulfilled())
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_request_builder, bench_dispatch);
criterion_main!(benches);
