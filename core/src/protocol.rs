//! Wire types for the agent request/response protocol
//!
//! Covers the subset of the transport protocol this client actually
//! consumes: the outbound send envelope with capability metadata, the
//! success envelope carrying a task or message result, and the rendering
//! commands smuggled inside data parts. Parsing is deliberately permissive;
//! unknown fields and unrecognized command payloads are tolerated, not
//! rejected.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Smallest unit of payload exchanged with the agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Part {
    /// Plain text
    Text { text: String },
    /// Opaque structured data; may carry a rendering command
    Data { data: Value },
}

impl Part {
    /// Create a text part
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text { text: text.into() }
    }

    /// Create a data part
    pub fn data(data: Value) -> Self {
        Part::Data { data }
    }
}

/// Request body POSTed to the agent endpoint
#[derive(Debug, Clone, Serialize)]
pub struct SendEnvelope {
    pub parts: Vec<Part>,
    pub metadata: SendMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_id: Option<String>,
}

/// Metadata attached to every outbound request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMetadata {
    pub client_ui_capabilities: UiCapabilities,
}

/// Client-declared rendering capabilities, echoed verbatim each request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UiCapabilities {
    pub supported_catalog_uris: Vec<String>,
}

/// Success response body: `{"result": ...}`
#[derive(Debug, Clone, Deserialize)]
pub struct SuccessEnvelope {
    pub result: SendResult,
}

/// Failure response body: `{"error": "..."}`
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,
}

/// The result half of a success envelope, a task or a plain message
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SendResult {
    Task(TaskResult),
    Message(MessageResult),
}

impl SendResult {
    /// Continuation id supplied by this result, if any
    pub fn context_id(&self) -> Option<&str> {
        match self {
            SendResult::Task(task) => task.context_id.as_deref(),
            SendResult::Message(message) => message.context_id.as_deref(),
        }
    }
}

/// A task result: status message plus produced artifacts
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskResult {
    #[serde(default)]
    pub status: Option<TaskStatus>,
    #[serde(default)]
    pub artifacts: Vec<Artifact>,
    #[serde(default, rename = "contextId", alias = "context_id")]
    pub context_id: Option<String>,
}

/// Status block of a task result
#[derive(Debug, Clone, Deserialize)]
pub struct TaskStatus {
    #[serde(default)]
    pub message: Option<MessageResult>,
}

/// One artifact produced by a task; its parts keep their own order
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Artifact {
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// A plain message result
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageResult {
    #[serde(default)]
    pub parts: Vec<Part>,
    #[serde(default, rename = "contextId", alias = "context_id")]
    pub context_id: Option<String>,
}

/// A rendering instruction carried by a data part
///
/// A data payload is a command envelope iff it holds exactly one of the
/// four command keys. Everything else is unrecognized and dropped by the
/// router.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    BeginRendering(Value),
    SurfaceUpdate(Value),
    DataModelUpdate(Value),
    DeleteSurface(Value),
}

impl RenderCommand {
    /// Extract the single recognized command from a data payload
    ///
    /// Returns `None` for payloads with no command key, and also for
    /// payloads carrying more than one (the keys are mutually exclusive).
    pub fn from_data(data: &Value) -> Option<RenderCommand> {
        let object = data.as_object()?;
        let mut found = None;
        for (key, payload) in object {
            let command = match key.as_str() {
                "beginRendering" => RenderCommand::BeginRendering(payload.clone()),
                "surfaceUpdate" => RenderCommand::SurfaceUpdate(payload.clone()),
                "dataModelUpdate" => RenderCommand::DataModelUpdate(payload.clone()),
                "deleteSurface" => RenderCommand::DeleteSurface(payload.clone()),
                _ => continue,
            };
            if found.is_some() {
                return None;
            }
            found = Some(command);
        }
        found
    }

    /// The command's payload object
    pub fn payload(&self) -> &Value {
        match self {
            RenderCommand::BeginRendering(payload)
            | RenderCommand::SurfaceUpdate(payload)
            | RenderCommand::DataModelUpdate(payload)
            | RenderCommand::DeleteSurface(payload) => payload,
        }
    }

    /// The surface this command addresses, if the payload names one
    pub fn surface_id(&self) -> Option<&str> {
        self.payload().get("surfaceId").and_then(Value::as_str)
    }

    /// `beginRendering` is the one command that also shows up in history
    pub fn is_begin_rendering(&self) -> bool {
        matches!(self, RenderCommand::BeginRendering(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_part_wire_format() {
        let part: Part = serde_json::from_value(json!({"kind": "text", "text": "hi"})).unwrap();
        assert_eq!(part, Part::text("hi"));

        let part: Part =
            serde_json::from_value(json!({"kind": "data", "data": {"x": 1}})).unwrap();
        assert_eq!(part, Part::data(json!({"x": 1})));
    }

    #[test]
    fn test_send_envelope_field_names() {
        let envelope = SendEnvelope {
            parts: vec![Part::text("hi")],
            metadata: SendMetadata {
                client_ui_capabilities: UiCapabilities {
                    supported_catalog_uris: vec!["uri:a".to_string()],
                },
            },
            context_id: Some("ctx-1".to_string()),
        };
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            value["metadata"]["clientUiCapabilities"]["supportedCatalogUris"],
            json!(["uri:a"])
        );
        assert_eq!(value["context_id"], json!("ctx-1"));
    }

    #[test]
    fn test_send_envelope_omits_absent_context() {
        let envelope = SendEnvelope {
            parts: vec![],
            metadata: SendMetadata {
                client_ui_capabilities: UiCapabilities {
                    supported_catalog_uris: vec![],
                },
            },
            context_id: None,
        };
        let value = serde_json::to_value(&envelope).unwrap();
        assert!(value.get("context_id").is_none());
    }

    #[test]
    fn test_result_discrimination() {
        let result: SendResult = serde_json::from_value(json!({
            "kind": "message",
            "parts": [{"kind": "text", "text": "hello"}],
            "contextId": "ctx-9"
        }))
        .unwrap();
        assert_eq!(result.context_id(), Some("ctx-9"));

        let result: SendResult = serde_json::from_value(json!({
            "kind": "task",
            "artifacts": [{"parts": []}]
        }))
        .unwrap();
        assert_eq!(result.context_id(), None);
    }

    #[test]
    fn test_command_extraction() {
        let command = RenderCommand::from_data(&json!({"surfaceUpdate": {"surfaceId": "s1"}}));
        assert_eq!(
            command,
            Some(RenderCommand::SurfaceUpdate(json!({"surfaceId": "s1"})))
        );
        assert_eq!(command.unwrap().surface_id(), Some("s1"));
    }

    #[test]
    fn test_command_extraction_rejects_unknown_and_ambiguous() {
        assert_eq!(RenderCommand::from_data(&json!({"unknownKey": 1})), None);
        assert_eq!(RenderCommand::from_data(&json!("not an object")), None);
        assert_eq!(
            RenderCommand::from_data(&json!({
                "surfaceUpdate": {},
                "deleteSurface": {}
            })),
            None
        );
    }

    #[test]
    fn test_command_extraction_ignores_extra_keys() {
        // One command key plus arbitrary metadata still counts as that command.
        let command = RenderCommand::from_data(&json!({
            "deleteSurface": {"surfaceId": "s2"},
            "timestamp": 123
        }));
        assert_eq!(
            command,
            Some(RenderCommand::DeleteSurface(json!({"surfaceId": "s2"})))
        );
    }
}
