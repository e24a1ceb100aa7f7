//! Vertex and edge records

use std::fmt;

/// Vertex identifier (zero-indexed, dense, allocated sequentially)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub u64);

impl VertexId {
    /// Position of this vertex in dense per-vertex tables
    ///
    /// `None` when the id does not fit in `usize`; no such vertex can be stored.
    pub(crate) fn index(self) -> Option<usize> {
        usize::try_from(self.0).ok()
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for VertexId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Opaque caller identity
///
/// Supplied by the surrounding collaborator on every mutating call. The store
/// only ever compares identities for equality and uses them as index keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CallerId(String);

impl CallerId {
    /// Wrap a raw identity value
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Raw identity value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CallerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CallerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for CallerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Stored vertex record
///
/// Records are never removed; deletion only clears `live`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vertex {
    /// Sequentially allocated id
    pub id: VertexId,
    /// Identity that created the vertex
    pub owner: CallerId,
    /// Non-empty, length-bounded payload
    pub data: String,
    /// Logical creation timestamp
    pub created_at: u64,
    /// Liveness flag (false once deleted)
    pub live: bool,
}

/// Stored directed edge record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    /// Source vertex
    pub from: VertexId,
    /// Destination vertex (never equal to `from`)
    pub to: VertexId,
    /// Positive weight
    pub weight: u64,
    /// Free-form, non-empty type label
    pub edge_type: String,
    /// Liveness flag; no operation clears it
    pub live: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_id_ordering() {
        assert!(VertexId(0) < VertexId(1));
        assert_eq!(VertexId::from(5), VertexId(5));
        assert_eq!(VertexId(9).to_string(), "9");
    }

    #[test]
    fn test_caller_id_is_opaque() {
        let a = CallerId::from("0xabc");
        let b = CallerId::new(String::from("0xabc"));
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "0xabc");
        assert_ne!(a, CallerId::from("0xABC"));
    }
}
