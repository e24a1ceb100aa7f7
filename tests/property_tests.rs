//! Property-based tests for graphstore
//!
//! Verifies store invariants hold for arbitrary operation sequences

use graphstore::{CallerId, ErrorKind, GraphStore, VertexId};
use proptest::prelude::*;
use std::collections::{HashMap, HashSet};

/// One mutation against the store
#[derive(Debug, Clone)]
enum Op {
    CreateVertex { owner: u8, len: usize },
    CreateEdge { from: u64, to: u64, weight: u64 },
    Delete { caller: u8, id: u64 },
}

fn caller(n: u8) -> CallerId {
    CallerId::new(format!("caller-{n}"))
}

fn prop_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..3, 0usize..600).prop_map(|(owner, len)| Op::CreateVertex { owner, len }),
        (0u64..12, 0u64..12, 0u64..4)
            .prop_map(|(from, to, weight)| Op::CreateEdge { from, to, weight }),
        (0u8..3, 0u64..12).prop_map(|(caller, id)| Op::Delete { caller, id }),
    ]
}

// Property: ids come out as 0, 1, 2, ... regardless of interleaved failures
proptest! {
    #[test]
    fn prop_ids_dense_and_sequential(lens in prop::collection::vec(0usize..600, 0..60)) {
        let mut store = GraphStore::new();
        let owner = caller(0);
        let mut expected = 0u64;

        for len in lens {
            match store.create_vertex(&owner, "x".repeat(len)) {
                Ok(id) => {
                    prop_assert!((1..=500).contains(&len));
                    prop_assert_eq!(id, VertexId(expected));
                    expected += 1;
                }
                Err(err) => {
                    prop_assert!(len == 0 || len > 500);
                    prop_assert_eq!(err.kind(), ErrorKind::InvalidArgument);
                }
            }
            prop_assert_eq!(store.total_vertices(), expected);
        }
    }
}

// Property: indices stay consistent with a simple model under mixed operations
proptest! {
    #[test]
    fn prop_indices_match_model(ops in prop::collection::vec(prop_op(), 0..150)) {
        let mut store = GraphStore::new();

        let mut owners: Vec<CallerId> = Vec::new();
        let mut live: Vec<bool> = Vec::new();
        let mut edges: HashMap<(u64, u64), u64> = HashMap::new();
        let mut adjacency: HashMap<u64, Vec<u64>> = HashMap::new();

        for op in ops {
            match op {
                Op::CreateVertex { owner, len } => {
                    let ok = store.create_vertex(&caller(owner), "v".repeat(len)).is_ok();
                    if ok {
                        owners.push(caller(owner));
                        live.push(true);
                    }
                }
                Op::CreateEdge { from, to, weight } => {
                    let result = store.create_edge(VertexId(from), VertexId(to), weight, "t");
                    let n = owners.len() as u64;
                    let should_succeed = from < n
                        && to < n
                        && weight > 0
                        && from != to
                        && !edges.contains_key(&(from, to));
                    prop_assert_eq!(result.is_ok(), should_succeed);
                    if should_succeed {
                        edges.insert((from, to), weight);
                        adjacency.entry(from).or_default().push(to);
                    }
                }
                Op::Delete { caller: c, id } => {
                    let result = store.delete_vertex(&caller(c), VertexId(id));
                    match owners.get(id as usize) {
                        None => {
                            prop_assert_eq!(result.unwrap_err().kind(), ErrorKind::NotFound);
                        }
                        Some(owner) if *owner != caller(c) => {
                            prop_assert_eq!(result.unwrap_err().kind(), ErrorKind::PermissionDenied);
                        }
                        Some(_) => {
                            prop_assert!(result.is_ok());
                            live[id as usize] = false;
                        }
                    }
                }
            }
        }

        // Counters track successful creations only
        prop_assert_eq!(store.total_vertices(), owners.len() as u64);
        prop_assert_eq!(store.total_edges(), edges.len() as u64);

        for (i, owner) in owners.iter().enumerate() {
            let id = VertexId(i as u64);
            prop_assert_eq!(store.vertex_exists(id), live[i]);
            prop_assert_eq!(&store.get_vertex(id).unwrap().owner, owner);

            let expected: Vec<VertexId> = adjacency
                .get(&(i as u64))
                .map(|dsts| dsts.iter().map(|&d| VertexId(d)).collect())
                .unwrap_or_default();
            prop_assert_eq!(store.get_adjacent_vertices(id).unwrap(), expected.as_slice());
        }

        for c in 0..3u8 {
            let expected: Vec<VertexId> = owners
                .iter()
                .enumerate()
                .filter(|(_, o)| **o == caller(c))
                .map(|(i, _)| VertexId(i as u64))
                .collect();
            prop_assert_eq!(store.get_user_vertices(&caller(c)), expected.as_slice());
        }

        for (&(from, to), &weight) in &edges {
            prop_assert_eq!(store.get_edge(VertexId(from), VertexId(to)).unwrap().weight, weight);
        }
    }
}

// Property: at most one edge per ordered pair, first write wins
proptest! {
    #[test]
    fn prop_one_edge_per_pair(
        attempts in prop::collection::vec((0u64..4, 0u64..4, 1u64..50), 0..40)
    ) {
        let mut store = GraphStore::new();
        let owner = caller(0);
        for _ in 0..4 {
            store.create_vertex(&owner, "v").unwrap();
        }

        let mut first: HashMap<(u64, u64), u64> = HashMap::new();
        for (from, to, weight) in attempts {
            if store.create_edge(VertexId(from), VertexId(to), weight, "t").is_ok() {
                prop_assert!(first.insert((from, to), weight).is_none());
            }
        }

        for (&(from, to), &weight) in &first {
            prop_assert_eq!(store.get_edge(VertexId(from), VertexId(to)).unwrap().weight, weight);
            let dsts = store.get_adjacent_vertices(VertexId(from)).unwrap();
            let unique: HashSet<_> = dsts.iter().collect();
            prop_assert_eq!(unique.len(), dsts.len());
        }
    }
}

// Property: snapshot then restore reproduces every query answer
proptest! {
    #[test]
    fn prop_snapshot_restore_equivalent(ops in prop::collection::vec(prop_op(), 0..100)) {
        let mut store = GraphStore::new();
        for op in ops {
            let _ = match op {
                Op::CreateVertex { owner, len } => {
                    store.create_vertex(&caller(owner), "v".repeat(len)).map(|_| ())
                }
                Op::CreateEdge { from, to, weight } => {
                    store.create_edge(VertexId(from), VertexId(to), weight, "t")
                }
                Op::Delete { caller: c, id } => store.delete_vertex(&caller(c), VertexId(id)),
            };
        }

        let restored = GraphStore::builder().restore(store.snapshot()).unwrap();

        prop_assert_eq!(restored.total_vertices(), store.total_vertices());
        prop_assert_eq!(restored.total_edges(), store.total_edges());
        for v in store.vertices() {
            prop_assert_eq!(restored.get_vertex(v.id).unwrap(), v);
            prop_assert_eq!(
                restored.get_adjacent_vertices(v.id).unwrap(),
                store.get_adjacent_vertices(v.id).unwrap()
            );
        }
        for c in 0..3u8 {
            prop_assert_eq!(
                restored.get_user_vertices(&caller(c)),
                store.get_user_vertices(&caller(c))
            );
        }
    }
}
