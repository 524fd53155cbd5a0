//! Encoder throughput benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gridsdr::{
    CategoryEncoder, Encoder, GridCellPopulationEncoder, LocationEncoder, Position, ScalarEncoder,
};

fn bench_grid_cell_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_cell_encode");

    for modules in [8, 32, 128].iter() {
        let encoder = GridCellPopulationEncoder::new(*modules, 0).unwrap();
        let pos = Position::new(123.4, -56.7);

        group.bench_with_input(BenchmarkId::from_parameter(modules), modules, |b, _| {
            b.iter(|| black_box(encoder.encode(black_box(pos)).unwrap()));
        });
    }
    group.finish();
}

fn bench_grid_cell_new(c: &mut Criterion) {
    c.bench_function("grid_cell_new", |b| {
        b.iter(|| black_box(GridCellPopulationEncoder::new(black_box(32), black_box(7)).unwrap()));
    });
}

fn bench_scalar_encode(c: &mut Criterion) {
    let encoder = ScalarEncoder::new(0.0, 800.0, 26, 256).unwrap();

    c.bench_function("scalar_encode", |b| {
        b.iter(|| black_box(encoder.encode(black_box(412.5)).unwrap()));
    });
}

fn bench_location_encode(c: &mut Criterion) {
    let encoder = LocationEncoder::from_config(&Default::default()).unwrap();
    let pos = Position::new(412.5, 300.0);

    c.bench_function("location_encode", |b| {
        b.iter(|| black_box(encoder.encode(black_box(pos)).unwrap()));
    });
}

fn bench_category_encode(c: &mut Criterion) {
    let encoder = CategoryEncoder::new(32, 16).unwrap();

    c.bench_function("category_encode", |b| {
        b.iter(|| black_box(encoder.encode(black_box(17)).unwrap()));
    });
}

criterion_group!(
    benches,
    bench_grid_cell_encode,
    bench_grid_cell_new,
    bench_scalar_encode,
    bench_location_encode,
    bench_category_encode
);

criterion_main!(benches);
