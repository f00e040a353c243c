//! Benchmarks for the per-particle kernel and full-population steps.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::{Vec3, Vec4};
use morphsim::{step_particle, step_population, Mode, NoiseField, SimulationConfig};

fn bench_single_particle(c: &mut Criterion) {
    let mut group = c.benchmark_group("step_particle");
    let noise = NoiseField::new(16, 7);

    let p = Vec3::new(0.2, -0.1, 0.3);
    let v = Vec3::new(0.01, 0.0, -0.02);

    for mode in [Mode::Flow, Mode::Absorb, Mode::Heart, Mode::Star] {
        let config = SimulationConfig::new(100_000).with_mode(mode);
        group.bench_function(format!("{:?}", mode).to_lowercase(), |b| {
            b.iter(|| black_box(step_particle(42, p, v, mode, &config, &noise)))
        });
    }

    group.finish();
}

fn bench_population_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("step_population");
    let noise = NoiseField::new(16, 7);

    for &count in &[10_000u32, 100_000, 1_000_000] {
        let config = SimulationConfig::new(count).with_mode(Mode::Flow);
        let mut positions: Vec<Vec4> = (0..count)
            .map(|i| {
                let t = i as f32 / count as f32;
                Vec4::new(t - 0.5, (t * 17.0).sin() * 0.5, (t * 31.0).cos() * 0.5, 1.0)
            })
            .collect();
        let mut velocities = vec![Vec4::ZERO; count as usize];

        group.bench_with_input(BenchmarkId::new("flow", count), &count, |b, _| {
            b.iter(|| step_population(&mut positions, &mut velocities, &config, &noise))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_single_particle, bench_population_step);
criterion_main!(benches);
