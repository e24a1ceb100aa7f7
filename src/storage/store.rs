//! In-memory graph store
//!
//! # Layout
//!
//! ```text
//! Vertices 0("V1"), 1("V2"), 2("V3") owned by O; edges 0 → 1, 0 → 2, 2 → 1
//!
//!   vertices:    [V0, V1, V2]            // id → record (dense)
//!   adjacency:   [[1, 2], [], [1]]       // id → destinations, creation order
//!   edges:       {(0,1), (0,2), (2,1)}   // (from, to) → record
//!   owner_index: {O: [0, 1, 2]}          // owner → ids, creation order
//! ```
//!
//! Records are never removed. Deleting a vertex clears its liveness flag and
//! leaves every index untouched.

use super::types::{CallerId, Edge, Vertex, VertexId};
use crate::clock::{Clock, LogicalClock};
use crate::config::StoreConfig;
use crate::error::{GraphError, GraphResult, InvalidArgument};
use crate::events::{EventSink, GraphEvent, NullSink};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Graph store with ownership tracking and adjacency queries
///
/// The store assumes sequential application of operations: mutations take
/// `&mut self`, so a caller sharing one store across threads must serialize
/// access (see [`SharedGraphStore`](crate::SharedGraphStore)).
///
/// # Example
///
/// ```
/// use graphstore::{CallerId, GraphStore, VertexId};
///
/// let mut store = GraphStore::new();
/// let alice = CallerId::from("alice");
///
/// let a = store.create_vertex(&alice, "V1").unwrap();
/// let b = store.create_vertex(&alice, "V2").unwrap();
/// store.create_edge(a, b, 100, "connection").unwrap();
///
/// assert_eq!(store.get_adjacent_vertices(a).unwrap(), &[VertexId(1)]);
/// assert_eq!(store.total_edges(), 1);
/// ```
#[derive(Debug)]
pub struct GraphStore {
    /// Vertex records, indexed by id
    vertices: Vec<Vertex>,

    /// Outgoing destinations per vertex, indexed by source id
    /// Same length as `vertices`
    adjacency: Vec<Vec<VertexId>>,

    /// Edge records keyed by ordered (from, to) pair
    edges: HashMap<(VertexId, VertexId), Edge>,

    /// Vertex ids per owner, creation order
    owner_index: HashMap<CallerId, Vec<VertexId>>,

    /// Successful edge creations
    edge_count: u64,

    config: StoreConfig,
    clock: Box<dyn Clock>,
    sink: Box<dyn EventSink>,
}

impl GraphStore {
    /// Create an empty store with default config, a [`LogicalClock`] and no event sink
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Start configuring a store
    #[must_use]
    pub fn builder() -> GraphStoreBuilder {
        GraphStoreBuilder::default()
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Create a vertex owned by `caller`
    ///
    /// Allocates the next sequential id, stamps it with the clock and appends
    /// it to the caller's vertex list.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `data` is empty or longer than
    /// `max_data_len` bytes. The id counter does not advance on failure.
    pub fn create_vertex(
        &mut self,
        caller: &CallerId,
        data: impl Into<String>,
    ) -> GraphResult<VertexId> {
        let data = data.into();
        self.check_data(&data)?;

        let id = VertexId(self.total_vertices());
        let created_at = self.clock.now();

        self.push_vertex(Vertex {
            id,
            owner: caller.clone(),
            data: data.clone(),
            created_at,
            live: true,
        });

        debug!(vertex = %id, owner = %caller, created_at, "vertex created");
        self.sink.emit(GraphEvent::VertexCreated {
            id,
            owner: caller.clone(),
            data,
            timestamp: created_at,
        });

        Ok(id)
    }

    /// Create a directed edge `from → to`
    ///
    /// Preconditions are checked in order and the first failure wins:
    /// endpoints exist, weight is positive, type is non-empty, no self-loop,
    /// no existing edge for the pair. Endpoints only need to have been
    /// allocated; a deleted vertex still accepts new edges.
    ///
    /// # Errors
    ///
    /// - `VertexNotFound` if either endpoint was never allocated
    /// - `InvalidArgument` for zero weight, empty type or `from == to`
    /// - `EdgeAlreadyExists` if the ordered pair already has an edge
    pub fn create_edge(
        &mut self,
        from: VertexId,
        to: VertexId,
        weight: u64,
        edge_type: impl Into<String>,
    ) -> GraphResult<()> {
        let edge_type = edge_type.into();

        self.require_vertex(from)?;
        self.require_vertex(to)?;
        if weight == 0 {
            return Err(InvalidArgument::ZeroWeight.into());
        }
        if edge_type.is_empty() {
            return Err(InvalidArgument::EmptyEdgeType.into());
        }
        if from == to {
            return Err(InvalidArgument::SelfLoop(from).into());
        }
        if self.edges.contains_key(&(from, to)) {
            debug!(%from, %to, "duplicate edge rejected");
            return Err(GraphError::EdgeAlreadyExists { from, to });
        }

        self.push_edge(Edge {
            from,
            to,
            weight,
            edge_type: edge_type.clone(),
            live: true,
        });

        debug!(%from, %to, weight, edge_type = %edge_type, "edge created");
        self.sink.emit(GraphEvent::EdgeCreated {
            from,
            to,
            weight,
            edge_type,
        });

        Ok(())
    }

    /// Mark a vertex as deleted
    ///
    /// Only the liveness flag changes. Edges, adjacency lists, owner lists and
    /// counters are left as they are.
    ///
    /// # Errors
    ///
    /// - `VertexNotFound` if the id was never allocated
    /// - `PermissionDenied` if `caller` is not the vertex owner
    pub fn delete_vertex(&mut self, caller: &CallerId, id: VertexId) -> GraphResult<()> {
        let vertex = id
            .index()
            .and_then(|i| self.vertices.get_mut(i))
            .ok_or(GraphError::VertexNotFound(id))?;

        if vertex.owner != *caller {
            warn!(vertex = %id, caller = %caller, "delete by non-owner rejected");
            return Err(GraphError::PermissionDenied {
                caller: caller.clone(),
                vertex: id,
            });
        }

        vertex.live = false;
        let owner = vertex.owner.clone();

        debug!(vertex = %id, owner = %owner, "vertex deleted");
        self.sink.emit(GraphEvent::VertexDeleted { id, owner });

        Ok(())
    }

    /// Get a vertex record (including deleted ones)
    ///
    /// # Errors
    ///
    /// Returns `VertexNotFound` if the id was never allocated
    pub fn get_vertex(&self, id: VertexId) -> GraphResult<&Vertex> {
        self.vertex_record(id)
            .ok_or(GraphError::VertexNotFound(id))
    }

    /// Get the edge stored for the ordered pair `from → to`
    ///
    /// # Errors
    ///
    /// Returns `EdgeNotFound` if no edge was created for the pair
    pub fn get_edge(&self, from: VertexId, to: VertexId) -> GraphResult<&Edge> {
        self.edges
            .get(&(from, to))
            .ok_or(GraphError::EdgeNotFound { from, to })
    }

    /// Destinations of a vertex's outgoing edges, in creation order
    ///
    /// Deleted destinations are not filtered out.
    ///
    /// # Errors
    ///
    /// Returns `VertexNotFound` if the id was never allocated
    pub fn get_adjacent_vertices(&self, id: VertexId) -> GraphResult<&[VertexId]> {
        id.index()
            .and_then(|i| self.adjacency.get(i))
            .map(Vec::as_slice)
            .ok_or(GraphError::VertexNotFound(id))
    }

    /// Ids of every vertex `owner` created, in creation order
    ///
    /// Unknown owners yield an empty slice.
    #[must_use]
    pub fn get_user_vertices(&self, owner: &CallerId) -> &[VertexId] {
        self.owner_index
            .get(owner)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of successful vertex creations (also the next id to allocate)
    #[must_use]
    pub fn total_vertices(&self) -> u64 {
        self.vertices.len() as u64
    }

    /// Number of successful edge creations
    #[must_use]
    pub const fn total_edges(&self) -> u64 {
        self.edge_count
    }

    /// Whether the vertex is live; false for unknown ids
    #[must_use]
    pub fn vertex_exists(&self, id: VertexId) -> bool {
        self.vertex_record(id).is_some_and(|v| v.live)
    }

    /// Number of vertices that have not been deleted
    #[must_use]
    pub fn live_vertex_count(&self) -> usize {
        self.vertices.iter().filter(|v| v.live).count()
    }

    /// Iterate over all vertex records in id order
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> + '_ {
        self.vertices.iter()
    }

    /// Iterate over all edge records, grouped by source in ascending id order
    /// and in creation order within a source
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.adjacency.iter().enumerate().flat_map(move |(src, dsts)| {
            let from = VertexId(src as u64);
            dsts.iter().filter_map(move |&to| self.edges.get(&(from, to)))
        })
    }

    pub(crate) fn check_data(&self, data: &str) -> GraphResult<()> {
        if data.is_empty() {
            return Err(InvalidArgument::EmptyData.into());
        }
        let max = self.config.max_data_len;
        if data.len() > max {
            return Err(InvalidArgument::DataTooLong {
                len: data.len(),
                max,
            }
            .into());
        }
        Ok(())
    }

    fn vertex_record(&self, id: VertexId) -> Option<&Vertex> {
        id.index().and_then(|i| self.vertices.get(i))
    }

    fn require_vertex(&self, id: VertexId) -> GraphResult<()> {
        if self.vertex_record(id).is_some() {
            Ok(())
        } else {
            Err(GraphError::VertexNotFound(id))
        }
    }

    /// Make sure the clock never hands out a timestamp below `timestamp`
    pub(crate) fn observe_timestamp(&self, timestamp: u64) {
        self.clock.observe(timestamp);
    }

    /// Append a vertex record and its index entries
    ///
    /// Caller guarantees `vertex.id` is the next dense id.
    pub(crate) fn push_vertex(&mut self, vertex: Vertex) {
        debug_assert_eq!(vertex.id.index(), Some(self.vertices.len()));

        self.owner_index
            .entry(vertex.owner.clone())
            .or_default()
            .push(vertex.id);
        self.adjacency.push(Vec::new());
        self.vertices.push(vertex);
    }

    /// Insert an edge record, extend the source's adjacency list and bump the counter
    ///
    /// Caller guarantees endpoints exist and the pair is free.
    pub(crate) fn push_edge(&mut self, edge: Edge) {
        if let Some(dsts) = edge.from.index().and_then(|i| self.adjacency.get_mut(i)) {
            dsts.push(edge.to);
        }
        self.edges.insert((edge.from, edge.to), edge);
        self.edge_count += 1;
    }
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`GraphStore`]
///
/// ```
/// use std::sync::Arc;
/// use graphstore::{GraphStore, LogicalClock, RecordingSink, StoreConfig};
///
/// let events = Arc::new(RecordingSink::new());
/// let store = GraphStore::builder()
///     .config(StoreConfig::default().with_max_data_len(64))
///     .clock(LogicalClock::starting_at(1_000))
///     .sink(Arc::clone(&events))
///     .build();
///
/// assert_eq!(store.config().max_data_len, 64);
/// ```
#[derive(Debug, Default)]
pub struct GraphStoreBuilder {
    config: StoreConfig,
    clock: Option<Box<dyn Clock>>,
    sink: Option<Box<dyn EventSink>>,
}

impl GraphStoreBuilder {
    /// Use `config` instead of the defaults
    #[must_use]
    pub fn config(mut self, config: StoreConfig) -> Self {
        self.config = config;
        self
    }

    /// Stamp vertices with `clock` (default: [`LogicalClock`] from 0)
    #[must_use]
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    /// Deliver notifications to `sink` (default: [`NullSink`])
    #[must_use]
    pub fn sink(mut self, sink: impl EventSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Build an empty store
    #[must_use]
    pub fn build(self) -> GraphStore {
        GraphStore {
            vertices: Vec::new(),
            adjacency: Vec::new(),
            edges: HashMap::new(),
            owner_index: HashMap::new(),
            edge_count: 0,
            config: self.config,
            clock: self.clock.unwrap_or_else(|| Box::new(LogicalClock::new())),
            sink: self.sink.unwrap_or_else(|| Box::new(NullSink)),
        }
    }
}
