//! Criterion benchmarks for store operations
//!
//! Covers the hot paths:
//! - Vertex creation (id allocation + owner index)
//! - Edge creation (precondition checks + adjacency append)
//! - Adjacency and owner queries

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use graphstore::{CallerId, GraphStore, VertexId};
use std::hint::black_box;

/// Build a store with `num_vertices` vertices and ~`edges_per_vertex` edges each
fn generate_store(num_vertices: u64, edges_per_vertex: usize) -> GraphStore {
    let owner = CallerId::from("bench");
    let mut store = GraphStore::new();
    let mut rng_state = 12345_u64; // Simple LCG for reproducibility

    for i in 0..num_vertices {
        store.create_vertex(&owner, format!("v{i}")).unwrap();
    }

    for src in 0..num_vertices {
        for _ in 0..edges_per_vertex {
            rng_state = rng_state.wrapping_mul(1_103_515_245).wrapping_add(12345);
            let dst = rng_state % num_vertices;
            // Self-loops and duplicates are rejected; skipping them is fine here
            let _ = store.create_edge(VertexId(src), VertexId(dst), 1, "bench");
        }
    }

    store
}

fn bench_create_vertex(c: &mut Criterion) {
    let mut group = c.benchmark_group("create_vertex");
    let owner = CallerId::from("bench");

    for size in [100_u64, 1000, 10_000].iter() {
        group.bench_with_input(BenchmarkId::new("sequential", size), size, |b, &size| {
            b.iter(|| {
                let mut store = GraphStore::new();
                for _ in 0..size {
                    black_box(store.create_vertex(&owner, "payload").unwrap());
                }
            });
        });
    }

    group.finish();
}

fn bench_create_edge(c: &mut Criterion) {
    let mut group = c.benchmark_group("create_edge");

    for size in [100_u64, 1000, 5000].iter() {
        group.bench_with_input(BenchmarkId::new("random", size), size, |b, &size| {
            b.iter(|| black_box(generate_store(size, 3)));
        });
    }

    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("queries");
    let owner = CallerId::from("bench");

    for size in [1000_u64, 10_000].iter() {
        let store = generate_store(*size, 5);

        group.bench_with_input(BenchmarkId::new("adjacent", size), &store, |b, store| {
            b.iter(|| {
                for id in 0..*size {
                    black_box(store.get_adjacent_vertices(VertexId(id)).unwrap());
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("user_vertices", size), &store, |b, store| {
            b.iter(|| black_box(store.get_user_vertices(&owner).len()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_create_vertex, bench_create_edge, bench_queries);
criterion_main!(benches);
