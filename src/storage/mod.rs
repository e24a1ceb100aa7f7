//! Graph storage layer
//!
//! Provides the in-memory store, its record types, snapshots and Parquet persistence.

#[cfg(feature = "storage")]
pub mod parquet;
pub mod snapshot;
pub mod store;
pub mod types;

pub use snapshot::Snapshot;
pub use store::{GraphStore, GraphStoreBuilder};
pub use types::{CallerId, Edge, Vertex, VertexId};
