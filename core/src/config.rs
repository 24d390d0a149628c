//! Client configuration
//!
//! A serde-derived config with sensible defaults, loadable from a TOML
//! file. The binary layers CLI flags on top.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Configuration for one agent connection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Agent endpoint receiving turn requests
    pub endpoint: String,
    /// Display name attached to agent turns
    pub agent_name: String,
    /// Optional icon reference attached to agent turns
    pub agent_icon: Option<String>,
    /// Catalog URIs declared in every request's capability metadata
    pub supported_catalog_uris: Vec<String>,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:10002/v1/message:send".to_string(),
            agent_name: "Agent".to_string(),
            agent_icon: None,
            supported_catalog_uris: Vec::new(),
            request_timeout_secs: 300,
        }
    }
}

impl ClientConfig {
    /// Load from a TOML file; missing keys fall back to defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.agent_name, "Agent");
        assert!(config.supported_catalog_uris.is_empty());
        assert_eq!(config.request_timeout_secs, 300);
    }

    #[test]
    fn test_load_partial_toml_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "endpoint = \"http://agent.local/send\"\nsupported_catalog_uris = [\"uri:a\"]"
        )
        .unwrap();

        let config = ClientConfig::load(file.path()).unwrap();
        assert_eq!(config.endpoint, "http://agent.local/send");
        assert_eq!(config.supported_catalog_uris, vec!["uri:a"]);
        assert_eq!(config.agent_name, "Agent");
    }

    #[test]
    fn test_load_missing_file_errors() {
        assert!(ClientConfig::load("/nonexistent/confab.toml").is_err());
    }
}
