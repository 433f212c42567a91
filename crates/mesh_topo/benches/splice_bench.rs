use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use mesh_topo::Mesh;

/// A fan mesh with `n` vertices, built by repeatedly splitting the hub
/// vertex's origin orbit between the same two faces. Used as a non-trivial
/// starting point for the splice and orbit benchmarks below.
fn fan_mesh(n: usize) -> Mesh<(), (), ()> {
    let mut m: Mesh<(), (), ()> = Mesh::new();
    let mut e = m.make_loop_edge(true).unwrap();
    let lf = m.lface(e);
    let rf = m.lface(e.sym());
    for _ in 1..n {
        let v = m.org(e);
        let (_v_new, e_new) = m.make_vertex_edge(v, lf, rf).unwrap();
        e = e_new;
    }
    m
}

fn bench_splice(c: &mut Criterion) {
    let mut group = c.benchmark_group("splice");
    for &n in &[8usize, 64, 512] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let mut m = fan_mesh(n);
            let e = m.vertex_edge(m.vertices().next().unwrap());
            let a = m.onext(e);
            b.iter(|| {
                m.splice(e, a);
                m.splice(e, a);
            });
        });
    }
    group.finish();
}

fn bench_make_edge(c: &mut Criterion) {
    c.bench_function("make_edge", |b| {
        let mut m: Mesh<(), (), ()> = Mesh::new();
        b.iter(|| {
            m.make_edge().unwrap();
        });
    });
}

fn bench_make_vertex_edge_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("make_vertex_edge_round_trip");
    for &n in &[8usize, 64, 512] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let mut m = fan_mesh(n);
            let v = m.org(m.vertex_edge(m.vertices().next().unwrap()));
            let head = m.vertex_edge(v);
            let lf = m.lface(head);
            let rf = m.lface(head.sym());
            b.iter(|| {
                let (_v_new, e_new) = m.make_vertex_edge(v, lf, rf).unwrap();
                m.kill_vertex_edge(e_new).unwrap();
            });
        });
    }
    group.finish();
}

fn bench_orbit_walks(c: &mut Criterion) {
    let mut group = c.benchmark_group("orbit_org_set");
    for &n in &[8usize, 64, 512] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let mut m = fan_mesh(n);
            let v = m.vertices().next().unwrap();
            let e = m.vertex_edge(v);
            // Re-stamping org with its current value leaves the topology
            // unchanged, so the walk cost can be measured in a tight loop.
            b.iter(|| {
                m.orbit_org_set(e, v);
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_splice,
    bench_make_edge,
    bench_make_vertex_edge_round_trip,
    bench_orbit_walks
);
criterion_main!(benches);
