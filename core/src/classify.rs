//! Response classification
//!
//! Flattens the heterogeneous result of a success envelope into one ordered
//! part sequence. Ordering is load-bearing: it determines both the order
//! rendering commands apply in and the order contents appear in history.

use crate::protocol::{Part, SendResult};

/// Flatten a result into its ordered parts
///
/// For a task: the status message's parts (empty if absent), then each
/// artifact's parts in artifact-array order, each artifact's own order
/// preserved. For a plain message: its parts unchanged. No other
/// normalization happens here.
pub fn classify(result: SendResult) -> Vec<Part> {
    match result {
        SendResult::Message(message) => message.parts,
        SendResult::Task(task) => {
            let mut parts = task
                .status
                .and_then(|status| status.message)
                .map(|message| message.parts)
                .unwrap_or_default();
            for artifact in task.artifacts {
                parts.extend(artifact.parts);
            }
            parts
        }
    }
}
