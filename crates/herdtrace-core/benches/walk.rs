use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use herdtrace_core::{
    walk::WalkSynthesizer, writer::Ns2Writer, SynthConfig, TurnDelta,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Synthetic track distributions (deterministic, stable across runs).
fn det_parts(n: usize, seed: u64) -> (Vec<f64>, Vec<TurnDelta>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let distances = (0..n).map(|_| rng.random_range(0.0..60.0)).collect();
    let turns = (0..n - 1)
        .map(|_| TurnDelta(rng.random_range(-3.0..3.0)))
        .collect();
    (distances, turns)
}

fn bench_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("walk_synthesis");
    let (distances, turns) = det_parts(2048, 2024);
    let synth = WalkSynthesizer::from_parts(distances, turns, &SynthConfig::default())
        .expect("valid parts");

    for &nodes in &[1u32, 16u32] {
        // ~56000 / 100 steps per node at a mid-range offset.
        group.throughput(Throughput::Elements(u64::from(nodes) * 561));
        group.bench_function(BenchmarkId::new("ns2_to_memory", nodes), |b| {
            b.iter(|| {
                let mut rng = StdRng::seed_from_u64(7);
                let mut w = Ns2Writer::new(Vec::with_capacity(1 << 20));
                let s = synth
                    .run_with_offset(&mut rng, black_box(nodes), 100.0, &mut w)
                    .expect("in-memory run");
                black_box((s, w.into_inner()));
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_walk);
criterion_main!(benches);
