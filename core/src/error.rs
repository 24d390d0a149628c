//! Error types for the agent client
//!
//! `TransportError` is the only error type that crosses the core boundary:
//! a failed turn cycle surfaces it from `send_turn` and, for event-sourced
//! turns, through the event's completion sink.

use thiserror::Error;

/// Errors produced by one turn cycle against the remote agent
#[derive(Debug, Error)]
pub enum TransportError {
    /// The agent answered a non-success status with an error message
    #[error("agent error: {0}")]
    Agent(String),

    /// Non-success status whose body carried no usable error message
    #[error("agent returned status {0}")]
    Status(u16),

    /// Network-level failure (connect, timeout, TLS)
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Success status but the body could not be decoded
    #[error("malformed response body: {0}")]
    Body(#[from] serde_json::Error),

    /// The completion channel was dropped before a terminal call
    #[error("completion channel closed")]
    ChannelClosed,
}
