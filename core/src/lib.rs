//! confab-core: orchestration and protocol adaptation for a
//! surface-rendering conversational agent client
//!
//! One request/response cycle per user turn. The reply is classified into
//! an ordered part sequence, routed into rendering commands and history
//! contents, and projected into two independent pieces of client state:
//! the turn history and the surfaces snapshot.

pub mod classify;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod events;
pub mod history;
pub mod protocol;
pub mod route;
pub mod surfaces;
pub mod transport;

// Re-exports for convenience
pub use config::ClientConfig;
pub use coordinator::TurnCoordinator;
pub use error::TransportError;
pub use events::{CompletionSink, CompletionWaiter, InboundEvent, Outbound};
pub use history::{Content, Role, Turn, TurnStatus};
pub use surfaces::{RenderingProcessor, SurfaceRenderer, SurfacesSnapshot};
pub use transport::{AgentTransport, HttpTransport};
