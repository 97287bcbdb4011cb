//! Benchmarks for the CPU-side per-frame passes.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use thoughtfield::prelude::*;

/// Build a running engine holding exactly `count` particles.
fn filled_engine(count: usize) -> Engine {
    let mut engine = Simulation::new()
        .with_capacity(count)
        .with_spawn_rate(SpawnRate::Fixed(1.0))
        .with_connections(80.0)
        .with_lifecycle(|l| l.lifetime(f32::MAX))
        .with_seed(42)
        .build()
        .unwrap();
    engine.start(800, 600);
    for _ in 0..count {
        engine.spawn_tick();
    }
    engine
}

fn bench_proximity_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("proximity_scan");

    for count in [50, 200, 500] {
        let engine = filled_engine(count);
        group.bench_with_input(BenchmarkId::new("particles", count), &count, |b, _| {
            b.iter(|| black_box(engine.connections()))
        });
    }

    group.finish();
}

fn bench_full_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_frame");

    for count in [50, 200, 500] {
        let mut engine = filled_engine(count);
        let mut surface = Pixmap::new(800, 600);
        group.bench_with_input(BenchmarkId::new("particles", count), &count, |b, _| {
            b.iter(|| engine.frame(black_box(&mut surface)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_proximity_scan, bench_full_frame);
criterion_main!(benches);
