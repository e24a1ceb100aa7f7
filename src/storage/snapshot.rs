//! Point-in-time copies of a store's records
//!
//! A [`Snapshot`] holds only primary records. Every index (adjacency lists,
//! owner lists, counters) is derived again on restore.

use super::store::{GraphStore, GraphStoreBuilder};
use super::types::{Edge, Vertex, VertexId};
use anyhow::{bail, ensure, Context, Result};
use std::collections::HashSet;
use tracing::info;

/// Records of a store, ordered so that restoring reproduces every index
///
/// - `vertices` in id order
/// - `edges` grouped by source (ascending), creation order within a source
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    /// Vertex records
    pub vertices: Vec<Vertex>,
    /// Edge records
    pub edges: Vec<Edge>,
}

impl GraphStore {
    /// Copy every record out of the store
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            vertices: self.vertices().cloned().collect(),
            edges: self.edges().cloned().collect(),
        }
    }
}

impl GraphStoreBuilder {
    /// Build a store pre-populated from `snapshot`
    ///
    /// No events are emitted and the clock is not read. The clock is told the
    /// latest restored creation time so new vertices are stamped after it.
    ///
    /// # Errors
    ///
    /// Returns error if the snapshot violates a store invariant: vertex ids
    /// not dense from 0, vertex data empty or over the configured bound, an
    /// edge with a missing endpoint, a self-loop, zero weight, empty type, or
    /// two edges for the same ordered pair.
    pub fn restore(self, snapshot: Snapshot) -> Result<GraphStore> {
        let mut store = self.build();
        let mut latest = None;

        for (expected, vertex) in snapshot.vertices.into_iter().enumerate() {
            if vertex.id != VertexId(expected as u64) {
                bail!(
                    "vertex ids must be dense from 0: expected {expected}, found {}",
                    vertex.id
                );
            }
            store
                .check_data(&vertex.data)
                .with_context(|| format!("vertex {} has invalid data", vertex.id))?;
            latest = latest.max(Some(vertex.created_at));
            store.push_vertex(vertex);
        }
        if let Some(timestamp) = latest {
            store.observe_timestamp(timestamp);
        }

        let mut seen = HashSet::with_capacity(snapshot.edges.len());
        for edge in snapshot.edges {
            let (from, to) = (edge.from, edge.to);
            for endpoint in [from, to] {
                ensure!(
                    store.get_vertex(endpoint).is_ok(),
                    "edge {from} -> {to} references missing vertex {endpoint}"
                );
            }
            ensure!(from != to, "edge {from} -> {to} is a self-loop");
            ensure!(edge.weight > 0, "edge {from} -> {to} has zero weight");
            ensure!(!edge.edge_type.is_empty(), "edge {from} -> {to} has empty type");
            ensure!(seen.insert((from, to)), "duplicate edge {from} -> {to}");
            store.push_edge(edge);
        }

        info!(
            vertices = store.total_vertices(),
            edges = store.total_edges(),
            "store restored from snapshot"
        );
        Ok(store)
    }
}
