use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gravsim::models::scenarios::three_body;
use gravsim::{compute_all_forces, BodyConfig, Engine, Gravity, SimulationState};

fn shell(n: usize) -> SimulationState {
    let configs: Vec<_> = (0..n)
        .map(|i| {
            let t = i as f64;
            let theta = t * 2.399963; // golden angle
            let z = 1.0 - 2.0 * (t + 0.5) / n as f64;
            let r = (1.0 - z * z).sqrt();
            BodyConfig::new(format!("p{}", i), 1.0, [r * theta.cos(), r * theta.sin(), z], [0.0; 3])
        })
        .collect();
    SimulationState::new(&configs).unwrap()
}

fn criterion_benchmark_forces(c: &mut Criterion) {
    let gravity = Gravity::default();
    let mut group = c.benchmark_group("compute_all_forces");
    for n in [3, 16, 64, 256] {
        let state = shell(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &state, |b, s| {
            b.iter(|| compute_all_forces(black_box(s), &gravity).unwrap())
        });
    }
    group.finish();
}

fn criterion_benchmark_run(c: &mut Criterion) {
    c.bench_function("three_body_500_steps", |b| {
        b.iter(|| {
            let mut engine = Engine::from_config(three_body()).unwrap();
            engine.run().unwrap();
            black_box(engine.trajectories().steps())
        })
    });
}

criterion_group!(benches, criterion_benchmark_forces, criterion_benchmark_run);
criterion_main!(benches);
