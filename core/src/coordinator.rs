//! Turn coordination
//!
//! Owns the turn history and the conversation continuation id, and drives
//! one full request/response cycle per user turn: build the turn pair,
//! call the transport, classify the reply, route the parts, apply commands
//! to the rendering processor, append contents to history.
//!
//! State is published through watch holders whose containers are replaced
//! wholesale on every update, so a snapshot held across an await point
//! never tears. A turn guard serializes cycles; overlapping callers queue
//! in FIFO order rather than interleaving their history writes.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{mpsc, watch, Mutex};

use crate::classify::classify;
use crate::config::ClientConfig;
use crate::error::TransportError;
use crate::events::{InboundEvent, Outbound};
use crate::history::{Content, Role, Turn, TurnStatus};
use crate::protocol::Part;
use crate::route::route;
use crate::surfaces::{RenderingProcessor, SurfacesSnapshot};
use crate::transport::AgentTransport;

/// Orchestrates turn cycles and owns the client-side state projections
pub struct TurnCoordinator {
    transport: Arc<dyn AgentTransport>,
    renderer: Arc<dyn RenderingProcessor>,
    agent_role: Role,

    /// Serializes cycles: at most one turn in flight
    turn_guard: Mutex<()>,

    history: watch::Sender<Arc<Vec<Turn>>>,
    surfaces: watch::Sender<Arc<SurfacesSnapshot>>,
    stream_open: watch::Sender<bool>,
    context_id: parking_lot::RwLock<Option<String>>,
}

impl TurnCoordinator {
    pub fn new(
        transport: Arc<dyn AgentTransport>,
        renderer: Arc<dyn RenderingProcessor>,
        config: &ClientConfig,
    ) -> Self {
        let (history, _) = watch::channel(Arc::new(Vec::new()));
        let (surfaces, _) = watch::channel(Arc::new(SurfacesSnapshot::new()));
        let (stream_open, _) = watch::channel(false);
        Self {
            transport,
            renderer,
            agent_role: Role::Agent {
                display_name: config.agent_name.clone(),
                icon: config.agent_icon.clone(),
            },
            turn_guard: Mutex::new(()),
            history,
            surfaces,
            stream_open,
            context_id: parking_lot::RwLock::new(None),
        }
    }

    /// Current history snapshot; stable, the container is never mutated
    pub fn history(&self) -> Arc<Vec<Turn>> {
        self.history.borrow().clone()
    }

    /// Current surfaces snapshot, refreshed after each completed cycle
    pub fn surfaces(&self) -> Arc<SurfacesSnapshot> {
        self.surfaces.borrow().clone()
    }

    /// Advisory in-flight indicator
    pub fn stream_open(&self) -> bool {
        *self.stream_open.borrow()
    }

    /// Conversation continuation id; `None` until the first successful
    /// response supplies one, monotone-non-regressing after that
    pub fn context_id(&self) -> Option<String> {
        self.context_id.read().clone()
    }

    /// Subscribe to history replacements
    pub fn watch_history(&self) -> watch::Receiver<Arc<Vec<Turn>>> {
        self.history.subscribe()
    }

    /// Subscribe to surfaces snapshot replacements
    pub fn watch_surfaces(&self) -> watch::Receiver<Arc<SurfacesSnapshot>> {
        self.surfaces.subscribe()
    }

    /// Subscribe to the in-flight indicator
    pub fn watch_stream_open(&self) -> watch::Receiver<bool> {
        self.stream_open.subscribe()
    }

    /// Run one full turn cycle
    ///
    /// Appends the user/agent turn pair before the transport call, so the
    /// history grows by exactly two whether the cycle succeeds or not. On
    /// transport failure the error propagates and the agent turn stays
    /// pending with the in-flight indicator still set; there is no retry
    /// and no rollback.
    pub async fn send_turn(&self, input: Outbound) -> Result<(), TransportError> {
        let _guard = self.turn_guard.lock().await;

        let context_id = self.context_id();
        let (user_contents, outbound_parts) = match input {
            Outbound::Text(text) => (vec![Content::text(text.clone())], vec![Part::text(text)]),
            Outbound::Command { envelope, label } => {
                // Only a labeled command leaves a visible trace in history.
                let contents = label.map(Content::text).into_iter().collect();
                (contents, vec![Part::data(envelope)])
            }
        };

        let user_turn = Turn::user(user_contents, context_id.clone());
        let agent_turn = Turn::agent(self.agent_role.clone(), context_id.clone());
        let agent_turn_id = agent_turn.id.clone();
        self.append_turns([user_turn, agent_turn]);

        self.publish_surfaces();
        self.stream_open.send_replace(true);

        self.cycle(outbound_parts, context_id, &agent_turn_id).await
    }

    async fn cycle(
        &self,
        parts: Vec<Part>,
        context_id: Option<String>,
        agent_turn_id: &str,
    ) -> Result<(), TransportError> {
        let envelope = self.transport.send(parts, context_id).await?;
        let result = envelope.result;

        if let Some(new_context) = result.context_id() {
            if !new_context.is_empty() {
                *self.context_id.write() = Some(new_context.to_string());
            }
        }

        let routed = route(classify(result));
        self.renderer.process_messages(&routed.commands);
        self.complete_agent_turn(agent_turn_id, routed.contents);
        self.publish_surfaces();
        self.stream_open.send_replace(false);

        tracing::debug!(turn = agent_turn_id, "turn cycle completed");
        Ok(())
    }

    /// Drain UI-originated messages, answering each completion sink with
    /// exactly one terminal call
    pub async fn run_events(self: Arc<Self>, mut events: mpsc::Receiver<InboundEvent>) {
        while let Some(event) = events.recv().await {
            match self.send_turn(event.message).await {
                Ok(()) => event.completion.succeed(),
                Err(error) => {
                    tracing::warn!(%error, "turn failed");
                    event.completion.fail(error);
                }
            }
        }
    }

    fn append_turns(&self, turns: [Turn; 2]) {
        let mut next = self.history.borrow().as_ref().clone();
        next.extend(turns);
        self.history.send_replace(Arc::new(next));
    }

    fn complete_agent_turn(&self, id: &str, contents: Vec<Content>) {
        let mut next = self.history.borrow().as_ref().clone();
        if let Some(turn) = next.iter_mut().find(|turn| turn.id == id) {
            turn.contents.extend(contents);
            turn.status = TurnStatus::Completed;
            turn.last_updated = Utc::now();
        }
        self.history.send_replace(Arc::new(next));
    }

    fn publish_surfaces(&self) {
        self.surfaces
            .send_replace(Arc::new(self.renderer.surfaces()));
    }
}
