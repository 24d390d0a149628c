//! Inbound event channel
//!
//! UI-originated messages arrive on an mpsc stream, each paired with a
//! single-use completion sink. The sink consumes `self` on its terminal
//! calls, so "exactly one terminal call per event" is enforced by the type
//! system rather than by convention.

use serde_json::Value;
use tokio::sync::{mpsc, oneshot};

use crate::error::TransportError;

/// What a turn sends to the agent
#[derive(Debug, Clone)]
pub enum Outbound {
    /// Plain user text
    Text(String),
    /// A structured command envelope, e.g. a form submission from a
    /// surface. `label` is the human-readable stand-in shown in history;
    /// without one the user turn stays empty.
    Command { envelope: Value, label: Option<String> },
}

/// One UI-originated message awaiting its turn
pub struct InboundEvent {
    pub message: Outbound,
    pub completion: CompletionSink,
}

impl InboundEvent {
    /// Build an event with its paired waiter
    pub fn new(message: Outbound) -> (Self, CompletionWaiter) {
        let (completion, waiter) = CompletionSink::new();
        (
            Self {
                message,
                completion,
            },
            waiter,
        )
    }
}

/// Bounded channel carrying inbound events to the coordinator
pub fn channel(capacity: usize) -> (mpsc::Sender<InboundEvent>, mpsc::Receiver<InboundEvent>) {
    mpsc::channel(capacity)
}

/// Single-use terminal sink for one inbound event
pub struct CompletionSink {
    tx: oneshot::Sender<Result<(), TransportError>>,
}

impl CompletionSink {
    /// Create a sink with its waiter half
    pub fn new() -> (Self, CompletionWaiter) {
        let (tx, rx) = oneshot::channel();
        (Self { tx }, CompletionWaiter { rx })
    }

    /// Terminal success call
    pub fn succeed(self) {
        let _ = self.tx.send(Ok(()));
    }

    /// Terminal failure call
    pub fn fail(self, error: TransportError) {
        let _ = self.tx.send(Err(error));
    }
}

/// Waits for the terminal call on the paired sink
pub struct CompletionWaiter {
    rx: oneshot::Receiver<Result<(), TransportError>>,
}

impl CompletionWaiter {
    /// Resolve with the sink's terminal result; a sink dropped without a
    /// terminal call resolves as `ChannelClosed` rather than hanging
    pub async fn wait(self) -> Result<(), TransportError> {
        self.rx.await.unwrap_or(Err(TransportError::ChannelClosed))
    }
}
