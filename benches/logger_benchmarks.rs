//! Criterion benchmarks for logpipe

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use logpipe::prelude::*;
use logpipe::fields;

fn bench_enqueue(c: &mut Criterion) {
    let mut group = c.benchmark_group("enqueue");
    group.throughput(Throughput::Elements(1));

    let logger = Logger::builder("bench")
        .min_level(Level::TRACE)
        .queue_capacity(100_000)
        .overflow_policy(OverflowPolicy::DropNewest)
        .build()
        .expect("bench logger");

    group.bench_function("plain_message", |b| {
        b.iter(|| {
            logger.info(black_box("benchmark message"));
        });
    });

    group.bench_function("with_fields", |b| {
        b.iter(|| {
            logger.log_with(
                Level::INFO,
                black_box("benchmark message"),
                fields! { "user_id" => 42, "component" => "bench" },
            );
        });
    });

    group.bench_function("filtered_out", |b| {
        let quiet = Logger::builder("bench-quiet")
            .min_level(Level::ERROR)
            .build()
            .expect("quiet logger");
        b.iter(|| {
            quiet.debug(black_box("never enqueued"));
        });
    });

    group.finish();
}

fn bench_masking(c: &mut Criterion) {
    let mut group = c.benchmark_group("masking");
    group.throughput(Throughput::Elements(1));

    let engine =
        MaskingEngine::from_config(&MaskConfig::default()).expect("default mask config");

    group.bench_function("clean_text", |b| {
        b.iter(|| {
            black_box(engine.mask_text(black_box("a perfectly ordinary log message")));
        });
    });

    group.bench_function("matching_text", |b| {
        b.iter(|| {
            black_box(engine.mask_text(black_box(
                "charging card 4111 1111 1111 1111 with Bearer abc.def",
            )));
        });
    });

    group.finish();
}

fn bench_scopes(c: &mut Criterion) {
    let mut group = c.benchmark_group("scopes");
    group.throughput(Throughput::Elements(1));

    group.bench_function("push_snapshot_pop", |b| {
        b.iter(|| {
            let _guard = logpipe::core::scope(fields! { "request_id" => "req-1" });
            black_box(logpipe::core::snapshot());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_enqueue, bench_masking, bench_scopes);
criterion_main!(benches);
