//! Benchmarks for noise evaluators.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use glam::Vec3;
use strata_noise::{
    Lattice3D, LatticeNormal, Noise, Perlin, Settings, Simplex, Simplex3D, SmallXxHash, SpaceTrs,
    Value, Voronoi3D, Worley, F1, get_fractal_noise, sample_noise,
};

fn bench_single<N: Noise>(c: &mut Criterion, name: &str) {
    let hash = SmallXxHash::seed(0);
    c.bench_function(name, |b| {
        b.iter(|| N::get_noise(black_box(Vec3::new(1.234, 5.678, 9.012)), hash, black_box(4)))
    });
}

fn bench_evaluators(c: &mut Criterion) {
    bench_single::<Lattice3D<LatticeNormal, Value>>(c, "value3");
    bench_single::<Lattice3D<LatticeNormal, Perlin>>(c, "perlin3");
    bench_single::<Simplex3D<Simplex>>(c, "simplex3");
    bench_single::<Voronoi3D<LatticeNormal, Worley, F1>>(c, "worley3_f1");
}

fn bench_fractal(c: &mut Criterion) {
    let settings = Settings {
        octaves: 4,
        ..Default::default()
    };
    c.bench_function("fractal_perlin3_4oct", |b| {
        b.iter(|| {
            get_fractal_noise::<Lattice3D<LatticeNormal, Perlin>>(
                black_box(Vec3::new(1.234, 5.678, 9.012)),
                &settings,
            )
        })
    });
}

fn bench_field(c: &mut Criterion) {
    let positions: Vec<Vec3> = (0..64 * 64)
        .map(|i| Vec3::new((i % 64) as f32, 0.0, (i / 64) as f32) / 64.0)
        .collect();
    let settings = Settings::default();
    let domain = SpaceTrs::default();
    c.bench_function("field_perlin3_64x64", |b| {
        b.iter(|| sample_noise::<Lattice3D<LatticeNormal, Perlin>>(black_box(&positions), &settings, &domain))
    });
}

criterion_group!(benches, bench_evaluators, bench_fractal, bench_field);
criterion_main!(benches);
