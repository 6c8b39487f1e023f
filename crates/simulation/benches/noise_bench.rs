//! Criterion benchmarks for terrain sampling.
//!
//! Benchmarks:
//!   - raw NoiseField sample
//!   - 4-octave height
//!   - full TerrainSample (height, normal, classification)
//!
//! Run with: cargo bench -p simulation --bench noise_bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use simulation::noise_field::NoiseField;
use simulation::terrain::Terrain;

fn bench_noise(c: &mut Criterion) {
    let mut group = c.benchmark_group("terrain_sampling");
    group.sample_size(1000);

    let noise = NoiseField::new(123.0);
    let terrain = Terrain::new(123.0);

    group.bench_function("noise_sample2d", |b| {
        b.iter(|| black_box(noise.sample2d(black_box(12.34), black_box(-56.78))));
    });

    group.bench_function("terrain_height", |b| {
        b.iter(|| black_box(terrain.height(black_box(12.34), black_box(-56.78))));
    });

    group.bench_function("terrain_sample", |b| {
        b.iter(|| black_box(terrain.sample(black_box(12.34), black_box(-56.78))));
    });

    group.finish();
}

criterion_group!(benches, bench_noise);
criterion_main!(benches);
