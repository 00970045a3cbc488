use criterion::{black_box, criterion_group, criterion_main, Criterion};
use light_curve::{generate, SimulationConfig};
use transit_geometry::presets;

fn bench_generate(c: &mut Criterion) {
    let demo = presets::central_transit_demo();
    c.bench_function("central_transit_demo", |b| {
        b.iter(|| generate(black_box(&demo.star), black_box(&demo.planets), 0.1, 10.0))
    });

    // 2,801 samples, two planets
    let config = SimulationConfig::default();
    c.bench_function("earth_and_hot_jupiter", |b| b.iter(|| black_box(&config).run()));
}

criterion_group!(benches, bench_generate);
criterion_main!(benches);
