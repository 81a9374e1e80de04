// Relaxation solver benchmark.
//
// Builds a mid-sized structure (ground plane, trunk column, several
// platform arms) and measures network construction plus a full
// authoritative solve at the default iteration budget. The interactive
// budget target is tens of milliseconds for networks of this size.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use heartwood_structural::config::MaterialCatalog;
use heartwood_structural::network::{FaceAssignments, build_network};
use heartwood_structural::solver::relax;
use heartwood_structural::types::Material;
use heartwood_structural::world::WorldGrid;

fn bench_world() -> WorldGrid {
    let mut world = WorldGrid::new(48, 48, 48);
    world.fill_floor(24);
    for (cx, cz) in [(8, 8), (16, 16), (24, 8)] {
        world.fill_column(cx, cz, 20, Material::Trunk);
        for (y, len) in [(8, 6), (12, 8), (16, 10)] {
            world.fill_row(y, cz, cx + 1, cx + len, Material::Platform);
        }
    }
    world
}

fn relaxation_benches(c: &mut Criterion) {
    let catalog = MaterialCatalog::default();
    let world = bench_world();
    let faces = FaceAssignments::new();

    c.bench_function("build_network", |b| {
        b.iter(|| build_network(black_box(&world), &faces, &catalog).unwrap())
    });

    c.bench_function("relax_authoritative", |b| {
        b.iter(|| {
            let mut network = build_network(&world, &faces, &catalog).unwrap();
            black_box(relax(&mut network, &catalog))
        })
    });

    let preview = catalog.preview();
    c.bench_function("relax_preview", |b| {
        b.iter(|| {
            let mut network = build_network(&world, &faces, &preview).unwrap();
            black_box(relax(&mut network, &preview))
        })
    });
}

criterion_group!(benches, relaxation_benches);
criterion_main!(benches);
