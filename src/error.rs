//! Error types for graph store operations

use crate::storage::{CallerId, VertexId};
use std::fmt;
use thiserror::Error;

/// Coarse error classification reported to callers
///
/// Every [`GraphError`] maps onto exactly one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed input (empty or oversized payload, zero weight, empty type, self-loop)
    InvalidArgument,
    /// Reference to an unallocated vertex or a missing edge
    NotFound,
    /// Duplicate edge for an ordered pair
    AlreadyExists,
    /// Caller is not the owner of the vertex
    PermissionDenied,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument => write!(f, "invalid argument"),
            Self::NotFound => write!(f, "not found"),
            Self::AlreadyExists => write!(f, "already exists"),
            Self::PermissionDenied => write!(f, "permission denied"),
        }
    }
}

/// Reason an argument was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidArgument {
    /// Vertex payload was empty
    #[error("vertex data must not be empty")]
    EmptyData,

    /// Vertex payload exceeded the configured maximum
    #[error("vertex data is {len} bytes, maximum is {max}")]
    DataTooLong {
        /// Payload length in bytes
        len: usize,
        /// Configured maximum in bytes
        max: usize,
    },

    /// Edge weight was zero
    #[error("edge weight must be positive")]
    ZeroWeight,

    /// Edge type label was empty
    #[error("edge type must not be empty")]
    EmptyEdgeType,

    /// Edge source and destination were the same vertex
    #[error("self-loop on vertex {0}")]
    SelfLoop(VertexId),
}

/// Errors returned by [`GraphStore`](crate::GraphStore) operations
///
/// All errors are request-scoped: an operation that fails has applied none
/// of its effects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// Input failed validation
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] InvalidArgument),

    /// Vertex id was never allocated
    #[error("vertex not found: {0}")]
    VertexNotFound(VertexId),

    /// No edge stored for the ordered pair
    #[error("edge not found: {from} -> {to}")]
    EdgeNotFound {
        /// Source vertex
        from: VertexId,
        /// Destination vertex
        to: VertexId,
    },

    /// An edge already exists for the ordered pair
    #[error("edge already exists: {from} -> {to}")]
    EdgeAlreadyExists {
        /// Source vertex
        from: VertexId,
        /// Destination vertex
        to: VertexId,
    },

    /// Caller does not own the vertex
    #[error("permission denied: {caller} does not own vertex {vertex}")]
    PermissionDenied {
        /// Identity that attempted the mutation
        caller: CallerId,
        /// Vertex it attempted to mutate
        vertex: VertexId,
    },
}

impl GraphError {
    /// Classify this error
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::VertexNotFound(_) | Self::EdgeNotFound { .. } => ErrorKind::NotFound,
            Self::EdgeAlreadyExists { .. } => ErrorKind::AlreadyExists,
            Self::PermissionDenied { .. } => ErrorKind::PermissionDenied,
        }
    }
}

/// Result type for graph store operations
pub type GraphResult<T> = Result<T, GraphError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let err: GraphError = InvalidArgument::ZeroWeight.into();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        assert_eq!(
            GraphError::VertexNotFound(VertexId(3)).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            GraphError::EdgeNotFound {
                from: VertexId(0),
                to: VertexId(1)
            }
            .kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            GraphError::EdgeAlreadyExists {
                from: VertexId(0),
                to: VertexId(1)
            }
            .kind(),
            ErrorKind::AlreadyExists
        );
        assert_eq!(
            GraphError::PermissionDenied {
                caller: CallerId::from("mallory"),
                vertex: VertexId(0)
            }
            .kind(),
            ErrorKind::PermissionDenied
        );
    }

    #[test]
    fn test_error_display() {
        let err = GraphError::VertexNotFound(VertexId(42));
        assert!(err.to_string().contains("42"));

        let err: GraphError = InvalidArgument::DataTooLong { len: 501, max: 500 }.into();
        assert_eq!(
            err.to_string(),
            "invalid argument: vertex data is 501 bytes, maximum is 500"
        );

        let err = GraphError::PermissionDenied {
            caller: CallerId::from("mallory"),
            vertex: VertexId(7),
        };
        assert_eq!(
            err.to_string(),
            "permission denied: mallory does not own vertex 7"
        );
    }
}
