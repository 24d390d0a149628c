//! Rendering surfaces
//!
//! The coordinator consumes the rendering processor through two operations:
//! a snapshot read of the current surfaces and an ordered command batch.
//! Painting and styling live elsewhere; `SurfaceRenderer` here only keeps
//! the surface state the commands describe, enough for the CLI and tests.

use std::collections::HashMap;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::protocol::RenderCommand;

/// One named unit of renderable UI state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SurfaceDef {
    /// Component tree supplied by the agent
    #[serde(default)]
    pub components: Value,
    /// Data model backing the components
    #[serde(default)]
    pub data_model: Value,
}

/// Point-in-time copy of the surface mapping; read-only for consumers
pub type SurfacesSnapshot = HashMap<String, SurfaceDef>;

/// Contract the coordinator consumes
///
/// `surfaces` is a snapshot read; the coordinator copies it, never aliases
/// it. `process_messages` applies the batch in order; atomicity under
/// partial failure is the implementation's own business.
pub trait RenderingProcessor: Send + Sync {
    fn surfaces(&self) -> SurfacesSnapshot;
    fn process_messages(&self, commands: &[RenderCommand]);
}

/// In-process surface store
#[derive(Default)]
pub struct SurfaceRenderer {
    surfaces: RwLock<SurfacesSnapshot>,
}

impl SurfaceRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    fn apply(&self, command: &RenderCommand) {
        let Some(id) = command.surface_id() else {
            // Same permissive policy as the router: no surface id, no effect.
            tracing::debug!("dropping rendering command without surface id");
            return;
        };
        let mut surfaces = self.surfaces.write();
        match command {
            RenderCommand::BeginRendering(payload) => {
                let surface = surfaces.entry(id.to_string()).or_default();
                if let Some(root) = payload.get("root") {
                    surface.components = root.clone();
                }
            }
            RenderCommand::SurfaceUpdate(payload) => {
                let surface = surfaces.entry(id.to_string()).or_default();
                if let Some(components) = payload.get("components") {
                    surface.components = components.clone();
                }
            }
            RenderCommand::DataModelUpdate(payload) => {
                let surface = surfaces.entry(id.to_string()).or_default();
                if let Some(contents) = payload.get("contents") {
                    surface.data_model = contents.clone();
                }
            }
            RenderCommand::DeleteSurface(_) => {
                surfaces.remove(id);
            }
        }
    }
}

impl RenderingProcessor for SurfaceRenderer {
    fn surfaces(&self) -> SurfacesSnapshot {
        self.surfaces.read().clone()
    }

    fn process_messages(&self, commands: &[RenderCommand]) {
        for command in commands {
            self.apply(command);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_begin_rendering_creates_surface() {
        let renderer = SurfaceRenderer::new();
        renderer.process_messages(&[RenderCommand::BeginRendering(json!({
            "surfaceId": "s1",
            "root": {"component": "Column"}
        }))]);
        let surfaces = renderer.surfaces();
        assert_eq!(surfaces["s1"].components, json!({"component": "Column"}));
    }

    #[test]
    fn test_update_and_delete_in_one_batch() {
        let renderer = SurfaceRenderer::new();
        renderer.process_messages(&[
            RenderCommand::SurfaceUpdate(json!({"surfaceId": "s1", "components": [1]})),
            RenderCommand::DataModelUpdate(json!({"surfaceId": "s1", "contents": {"k": "v"}})),
            RenderCommand::SurfaceUpdate(json!({"surfaceId": "s2", "components": [2]})),
            RenderCommand::DeleteSurface(json!({"surfaceId": "s1"})),
        ]);
        let surfaces = renderer.surfaces();
        assert!(!surfaces.contains_key("s1"));
        assert_eq!(surfaces["s2"].components, json!([2]));
    }

    #[test]
    fn test_command_without_surface_id_is_ignored() {
        let renderer = SurfaceRenderer::new();
        renderer.process_messages(&[RenderCommand::SurfaceUpdate(json!({"components": []}))]);
        assert!(renderer.surfaces().is_empty());
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let renderer = SurfaceRenderer::new();
        renderer.process_messages(&[RenderCommand::BeginRendering(
            json!({"surfaceId": "s1", "root": {}}),
        )]);
        let before = renderer.surfaces();
        renderer.process_messages(&[RenderCommand::DeleteSurface(json!({"surfaceId": "s1"}))]);
        // The earlier snapshot is unaffected by later command batches.
        assert!(before.contains_key("s1"));
        assert!(renderer.surfaces().is_empty());
    }
}
