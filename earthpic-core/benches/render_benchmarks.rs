//! Criterion benchmarks for rendering and nearest-sample lookup.
//!
//! Renders synthetic grid acquisitions at a few densities so changes to the
//! linear nearest-neighbour scan show up as regressions.
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench --package earthpic-core
//! ```

#![allow(missing_docs, reason = "Criterion macros generate undocumented code")]

use std::time::Duration;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use earthpic_core::test_support::{GridColorProvider, MemoryRaster};
use earthpic_core::{AcquireOptions, SampleSet, acquire, render};

/// Grid steps in degrees, coarsest first.
const GRID_STEPS: &[f64] = &[30.0, 15.0, 10.0];

/// Edge length of the rendered square raster.
const RASTER_SIZE: u32 = 64;

fn grid_samples(step: f64) -> SampleSet {
    acquire(step, step, &GridColorProvider, AcquireOptions::default())
        .expect("synthetic grid acquires")
        .samples
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    group.sample_size(20);
    group.measurement_time(Duration::from_secs(5));

    for &step in GRID_STEPS {
        let samples = grid_samples(step);
        #[expect(
            clippy::as_conversions,
            reason = "sample counts for these grids fit in u64"
        )]
        let sample_count = samples.len() as u64;
        group.throughput(Throughput::Elements(sample_count));
        group.bench_with_input(BenchmarkId::new("step", step), &samples, |b, samples| {
            b.iter(|| {
                let mut raster = MemoryRaster::new(RASTER_SIZE, RASTER_SIZE);
                render(samples, RASTER_SIZE, RASTER_SIZE, &mut raster).expect("non-empty set")
            });
        });
    }

    group.finish();
}

fn bench_nearest(c: &mut Criterion) {
    let samples = grid_samples(5.0);
    c.bench_function("nearest/step_5", |b| {
        b.iter(|| samples.nearest(12.5, -33.3).expect("non-empty set"));
    });
}

criterion_group!(benches, bench_render, bench_nearest);
criterion_main!(benches);
