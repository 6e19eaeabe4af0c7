//! Benchmark for the per-frame advance + render path.
//!
//! TARGET: full weather (all six effects) well under 1 ms per frame
//!
//! Run with: cargo bench --package daybreak_effects --bench frame_benchmark

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use daybreak_effects::{CommandRecorder, EffectKind, EngineConfig, FrameContext, ParticleEngine};

fn full_weather() -> ParticleEngine {
    let mut engine = ParticleEngine::new(EngineConfig::seeded(42), 1920.0, 1080.0);
    for kind in EffectKind::ALL {
        engine.start_effect(kind, 200);
    }
    engine
}

fn benchmark_advance(c: &mut Criterion) {
    let mut engine = full_weather();
    let mut time_ms = 0.0f64;

    let mut group = c.benchmark_group("advance");
    group.throughput(Throughput::Elements(engine.len() as u64));
    group.bench_function("advance_full_weather", |b| {
        b.iter(|| {
            time_ms += 16.6;
            engine.advance(black_box(&FrameContext::at(time_ms)));
        });
    });
    group.finish();
}

fn benchmark_render(c: &mut Criterion) {
    let engine = full_weather();
    let mut surface = CommandRecorder::new();

    c.bench_function("render_full_weather", |b| {
        b.iter(|| {
            surface.begin_frame();
            engine.render(black_box(&mut surface));
            black_box(surface.command_count())
        });
    });
}

fn benchmark_start_stop(c: &mut Criterion) {
    let mut engine = ParticleEngine::new(EngineConfig::seeded(7), 1920.0, 1080.0);

    c.bench_function("start_stop_rain_1000", |b| {
        b.iter(|| {
            engine.start_effect(EffectKind::Rain, black_box(1_000));
            engine.stop_effect(EffectKind::Rain);
        });
    });
}

criterion_group!(
    benches,
    benchmark_advance,
    benchmark_render,
    benchmark_start_stop
);
criterion_main!(benches);
