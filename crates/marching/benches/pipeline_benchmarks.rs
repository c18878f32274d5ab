//! Benchmarks for the contour pipeline.
//!
//! Run with: cargo bench --package marching --bench pipeline_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use marching::{run, ContourConfig, ContourMap};
use raster::{sample_bicubic, Image, Rgb};

/// Dark blobs on a light background, built from overlapping sine waves.
fn generate_blob_image(width: usize, height: usize) -> Image {
    Image::from_fn(width, height, |row, col| {
        let fx = col as f32 / width as f32;
        let fy = row as f32 / height as f32;
        let v1 = (fx * std::f32::consts::PI * 6.0).sin();
        let v2 = (fy * std::f32::consts::PI * 6.0).sin();
        let value = (128.0 + 120.0 * v1 * v2).clamp(0.0, 255.0) as u8;
        Rgb::gray(value)
    })
}

// =============================================================================
// PIPELINE BENCHMARKS
// =============================================================================

fn bench_trace_by_workers(c: &mut Criterion) {
    let mut group = c.benchmark_group("trace_1024");
    let config = ContourConfig::default();
    let map = ContourMap::builtin(config.step);
    let source = generate_blob_image(1024, 1024);
    group.throughput(Throughput::Elements((1024 * 1024) as u64));

    for workers in [1, 2, 4, 8] {
        group.bench_with_input(BenchmarkId::new("workers", workers), &workers, |b, &workers| {
            b.iter(|| run(black_box(source.clone()), workers, &map, &config).unwrap());
        });
    }

    group.finish();
}

fn bench_rescale(c: &mut Criterion) {
    let mut group = c.benchmark_group("rescale");
    group.sample_size(20);
    let config = ContourConfig {
        target_width: 512,
        target_height: 512,
        ..Default::default()
    };
    let map = ContourMap::builtin(config.step);
    let source = generate_blob_image(1536, 1536);

    for workers in [1, 4] {
        group.bench_with_input(BenchmarkId::new("workers", workers), &workers, |b, &workers| {
            b.iter(|| run(black_box(source.clone()), workers, &map, &config).unwrap());
        });
    }

    group.finish();
}

// =============================================================================
// PRIMITIVES
// =============================================================================

fn bench_bicubic_sample(c: &mut Criterion) {
    let image = generate_blob_image(256, 256);
    c.bench_function("sample_bicubic", |b| {
        b.iter(|| sample_bicubic(black_box(&image), black_box(0.37), black_box(0.61)));
    });
}

fn bench_builtin_stencils(c: &mut Criterion) {
    let mut group = c.benchmark_group("builtin_stencils");
    for size in [8, 32] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| ContourMap::builtin(black_box(size)));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_trace_by_workers,
    bench_rescale,
    bench_bicubic_sample,
    bench_builtin_stencils
);
criterion_main!(benches);
