//! graphstore: embedded in-memory graph store
//!
//! # Overview
//!
//! graphstore keeps identified vertices and directed, weighted, typed edges,
//! tracks which caller owns each vertex, and answers adjacency queries.
//! Vertices are soft-deleted: a delete clears a liveness flag and the record
//! stays queryable forever.
//!
//! # Quick Start
//!
//! ```
//! use graphstore::{CallerId, GraphStore, VertexId};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut store = GraphStore::new();
//! let owner = CallerId::from("0xowner");
//!
//! let v1 = store.create_vertex(&owner, "V1")?;
//! let v2 = store.create_vertex(&owner, "V2")?;
//! store.create_edge(v1, v2, 100, "connection")?;
//!
//! assert_eq!(store.get_edge(v1, v2)?.weight, 100);
//! assert_eq!(store.get_adjacent_vertices(v1)?, &[VertexId(1)]);
//! assert_eq!(store.get_user_vertices(&owner), &[v1, v2]);
//!
//! store.delete_vertex(&owner, v2)?;
//! assert!(!store.vertex_exists(v2));
//! assert_eq!(store.total_vertices(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - **Storage**: dense vertex table, pair-keyed edge map, append-only adjacency and owner indices
//! - **Collaborators**: [`Clock`] stamps creation times, [`EventSink`] receives notifications
//! - **Concurrency**: single-writer; [`SharedGraphStore`] serializes access behind a lock
//! - **Persistence**: [`Snapshot`] export/restore, Parquet-backed (`storage` feature)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod clock;
pub mod config;
pub mod error;
pub mod events;
pub mod shared;
pub mod storage;

// Re-export core types
pub use clock::{Clock, LogicalClock, SystemClock};
pub use config::StoreConfig;
pub use error::{ErrorKind, GraphError, GraphResult, InvalidArgument};
pub use events::{ChannelSink, EventSink, GraphEvent, NullSink, RecordingSink};
pub use shared::SharedGraphStore;
pub use storage::{CallerId, Edge, GraphStore, GraphStoreBuilder, Snapshot, Vertex, VertexId};
