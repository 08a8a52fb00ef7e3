use criterion::{Criterion, black_box, criterion_group, criterion_main};
use orrery_mesh::*;

fn bench_octahedron(c: &mut Criterion) {
    c.bench_function("octahedron", |bencher| {
        bencher.iter(|| black_box(generate_octahedron(black_box(18.0))))
    });
}

fn bench_marker_sphere(c: &mut Criterion) {
    c.bench_function("sphere_36x18", |bencher| {
        bencher.iter(|| black_box(generate_sphere(black_box(10.0), 36, 18)))
    });
}

fn bench_dense_sphere(c: &mut Criterion) {
    c.bench_function("sphere_256x128", |bencher| {
        bencher.iter(|| black_box(generate_sphere(black_box(10.0), 256, 128)))
    });
}

fn bench_well_formed_check(c: &mut Criterion) {
    let mesh = generate_sphere(10.0, 256, 128);
    c.bench_function("is_well_formed_256x128", |bencher| {
        bencher.iter(|| black_box(mesh.is_well_formed()))
    });
}

criterion_group!(
    benches,
    bench_octahedron,
    bench_marker_sphere,
    bench_dense_sphere,
    bench_well_formed_check,
);
criterion_main!(benches);
