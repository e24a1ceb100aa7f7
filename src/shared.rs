//! Thread-safe handle over a single store
//!
//! Mutations hold the write lock for the whole operation, so every mutation is
//! applied atomically and in one total order. Queries hold the read lock and
//! return owned copies.

use crate::error::GraphResult;
use crate::storage::{CallerId, Edge, GraphStore, Snapshot, Vertex, VertexId};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Cloneable, shareable [`GraphStore`] handle
///
/// # Example
///
/// ```
/// use graphstore::{CallerId, GraphStore, SharedGraphStore};
///
/// # tokio_test::block_on(async {
/// let store = SharedGraphStore::new(GraphStore::new());
/// let alice = CallerId::from("alice");
///
/// let id = store.create_vertex(&alice, "hello").await.unwrap();
/// assert!(store.vertex_exists(id).await);
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct SharedGraphStore {
    inner: Arc<RwLock<GraphStore>>,
}

impl SharedGraphStore {
    /// Take ownership of `store`
    #[must_use]
    pub fn new(store: GraphStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    /// See [`GraphStore::create_vertex`]
    ///
    /// # Errors
    ///
    /// Same as [`GraphStore::create_vertex`]
    pub async fn create_vertex(
        &self,
        caller: &CallerId,
        data: impl Into<String>,
    ) -> GraphResult<VertexId> {
        self.inner.write().await.create_vertex(caller, data)
    }

    /// See [`GraphStore::create_edge`]
    ///
    /// # Errors
    ///
    /// Same as [`GraphStore::create_edge`]
    pub async fn create_edge(
        &self,
        from: VertexId,
        to: VertexId,
        weight: u64,
        edge_type: impl Into<String>,
    ) -> GraphResult<()> {
        self.inner
            .write()
            .await
            .create_edge(from, to, weight, edge_type)
    }

    /// See [`GraphStore::delete_vertex`]
    ///
    /// # Errors
    ///
    /// Same as [`GraphStore::delete_vertex`]
    pub async fn delete_vertex(&self, caller: &CallerId, id: VertexId) -> GraphResult<()> {
        self.inner.write().await.delete_vertex(caller, id)
    }

    /// See [`GraphStore::get_vertex`]
    ///
    /// # Errors
    ///
    /// Same as [`GraphStore::get_vertex`]
    pub async fn get_vertex(&self, id: VertexId) -> GraphResult<Vertex> {
        self.inner.read().await.get_vertex(id).cloned()
    }

    /// See [`GraphStore::get_edge`]
    ///
    /// # Errors
    ///
    /// Same as [`GraphStore::get_edge`]
    pub async fn get_edge(&self, from: VertexId, to: VertexId) -> GraphResult<Edge> {
        self.inner.read().await.get_edge(from, to).cloned()
    }

    /// See [`GraphStore::get_adjacent_vertices`]
    ///
    /// # Errors
    ///
    /// Same as [`GraphStore::get_adjacent_vertices`]
    pub async fn get_adjacent_vertices(&self, id: VertexId) -> GraphResult<Vec<VertexId>> {
        self.inner
            .read()
            .await
            .get_adjacent_vertices(id)
            .map(<[VertexId]>::to_vec)
    }

    /// See [`GraphStore::get_user_vertices`]
    pub async fn get_user_vertices(&self, owner: &CallerId) -> Vec<VertexId> {
        self.inner.read().await.get_user_vertices(owner).to_vec()
    }

    /// See [`GraphStore::total_vertices`]
    pub async fn total_vertices(&self) -> u64 {
        self.inner.read().await.total_vertices()
    }

    /// See [`GraphStore::total_edges`]
    pub async fn total_edges(&self) -> u64 {
        self.inner.read().await.total_edges()
    }

    /// See [`GraphStore::vertex_exists`]
    pub async fn vertex_exists(&self, id: VertexId) -> bool {
        self.inner.read().await.vertex_exists(id)
    }

    /// Consistent copy of every record as of the last completed mutation
    pub async fn snapshot(&self) -> Snapshot {
        self.inner.read().await.snapshot()
    }
}

impl From<GraphStore> for SharedGraphStore {
    fn from(store: GraphStore) -> Self {
        Self::new(store)
    }
}
