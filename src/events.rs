//! Mutation notifications
//!
//! The store hands a [`GraphEvent`] to its [`EventSink`] after each successful
//! mutation has been fully applied. Delivery is fire-and-forget: sinks cannot
//! fail the operation that produced the event.

use crate::storage::{CallerId, VertexId};
use std::fmt;
use std::sync::{Mutex, PoisonError};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

/// Notification emitted by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphEvent {
    /// A vertex was created
    VertexCreated {
        /// Allocated id
        id: VertexId,
        /// Creating identity
        owner: CallerId,
        /// Payload
        data: String,
        /// Creation timestamp
        timestamp: u64,
    },

    /// An edge was created
    EdgeCreated {
        /// Source vertex
        from: VertexId,
        /// Destination vertex
        to: VertexId,
        /// Edge weight
        weight: u64,
        /// Edge type label
        edge_type: String,
    },

    /// A vertex was marked not-live
    VertexDeleted {
        /// Deleted vertex
        id: VertexId,
        /// Its owner
        owner: CallerId,
    },

    /// Part of the notification contract; no current operation emits it
    EdgeDeleted {
        /// Source vertex
        from: VertexId,
        /// Destination vertex
        to: VertexId,
    },
}

/// Receiver of store notifications
pub trait EventSink: Send + Sync + fmt::Debug {
    /// Accept an event
    fn emit(&self, event: GraphEvent);
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: GraphEvent) {}
}

/// Buffers events in memory, in emission order
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<GraphEvent>>,
}

impl RecordingSink {
    /// Create an empty recorder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every event recorded so far
    #[must_use]
    pub fn events(&self) -> Vec<GraphEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Drain recorded events
    pub fn take(&self) -> Vec<GraphEvent> {
        std::mem::take(&mut *self.events.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: GraphEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

// Shared recorders let tests keep a handle after moving the sink into a store
impl<S: EventSink + ?Sized> EventSink for std::sync::Arc<S> {
    fn emit(&self, event: GraphEvent) {
        (**self).emit(event);
    }
}

/// Forwards events into a tokio unbounded channel
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: UnboundedSender<GraphEvent>,
}

impl ChannelSink {
    /// Create a sink and the receiver that observes its events
    #[must_use]
    pub fn channel() -> (Self, UnboundedReceiver<GraphEvent>) {
        let (tx, rx) = unbounded_channel();
        (Self { tx }, rx)
    }

    /// Wrap an existing sender
    #[must_use]
    pub const fn from_sender(tx: UnboundedSender<GraphEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelSink {
    fn emit(&self, event: GraphEvent) {
        if self.tx.send(event).is_err() {
            tracing::trace!("event receiver dropped, discarding notification");
        }
    }
}
