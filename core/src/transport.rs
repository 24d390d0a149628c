//! HTTP transport to the remote agent
//!
//! One request envelope per turn, POSTed to the agent endpoint. A success
//! body is parsed permissively into the typed envelope; a failure body is
//! mined for the server's error message. The transport also owns the
//! client-declared capability list echoed on every request.

use std::time::Duration;

use async_trait::async_trait;
use parking_lot::RwLock;
use reqwest::Client as HttpClient;

use crate::error::TransportError;
use crate::protocol::{
    ErrorEnvelope, Part, SendEnvelope, SendMetadata, SuccessEnvelope, UiCapabilities,
};

/// Transport seam between the coordinator and the wire
#[async_trait]
pub trait AgentTransport: Send + Sync {
    /// Send one request envelope, returning the parsed success envelope
    async fn send(
        &self,
        parts: Vec<Part>,
        context_id: Option<String>,
    ) -> Result<SuccessEnvelope, TransportError>;
}

/// reqwest-backed transport
pub struct HttpTransport {
    endpoint: String,
    http_client: HttpClient,
    supported_catalogs: RwLock<Vec<String>>,
}

impl HttpTransport {
    /// Create a transport for the given endpoint
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, TransportError> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self {
            endpoint: endpoint.into(),
            http_client,
            supported_catalogs: RwLock::new(Vec::new()),
        })
    }

    /// Replace the catalog list echoed on every request from now on
    ///
    /// The list is not negotiated or validated here; the surrounding UI
    /// component owns what it claims to support.
    pub fn set_supported_catalogs(&self, catalogs: Vec<String>) {
        *self.supported_catalogs.write() = catalogs;
    }

    pub fn supported_catalogs(&self) -> Vec<String> {
        self.supported_catalogs.read().clone()
    }
}

#[async_trait]
impl AgentTransport for HttpTransport {
    async fn send(
        &self,
        parts: Vec<Part>,
        context_id: Option<String>,
    ) -> Result<SuccessEnvelope, TransportError> {
        let body = SendEnvelope {
            parts,
            metadata: SendMetadata {
                client_ui_capabilities: UiCapabilities {
                    supported_catalog_uris: self.supported_catalogs(),
                },
            },
            context_id,
        };

        tracing::debug!(
            endpoint = %self.endpoint,
            parts = body.parts.len(),
            has_context = body.context_id.is_some(),
            "sending turn"
        );

        let response = self
            .http_client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let text = response.text().await?;
            let envelope: SuccessEnvelope = serde_json::from_str(&text)?;
            Ok(envelope)
        } else {
            let text = response.text().await.unwrap_or_default();
            Err(error_from_body(status.as_u16(), &text))
        }
    }
}

/// Pull the server's message out of a failure body, falling back to the
/// bare status code when the body yields nothing usable
fn error_from_body(status: u16, body: &str) -> TransportError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => TransportError::Agent(envelope.error),
        Err(_) => TransportError::Status(status),
    }
}
