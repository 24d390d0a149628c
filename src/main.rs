//! confab: terminal client for surface-rendering conversational agents

mod repl;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use confab_core::{ClientConfig, HttpTransport, SurfaceRenderer, TurnCoordinator};

#[derive(Parser, Debug)]
#[command(name = "confab", version, about = "Chat with a surface-rendering remote agent")]
struct Cli {
    /// Agent endpoint URL (overrides config)
    #[arg(long)]
    endpoint: Option<String>,

    /// Path to a TOML config file
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    /// Display name for the agent (overrides config)
    #[arg(long)]
    name: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("confab=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ClientConfig::load(path)?,
        None => ClientConfig::default(),
    };
    if let Some(endpoint) = cli.endpoint {
        config.endpoint = endpoint;
    }
    if let Some(name) = cli.name {
        config.agent_name = name;
    }

    let transport = HttpTransport::new(
        &config.endpoint,
        Duration::from_secs(config.request_timeout_secs),
    )
    .context("failed to build HTTP transport")?;
    transport.set_supported_catalogs(config.supported_catalog_uris.clone());
    tracing::info!(endpoint = %config.endpoint, "connecting to agent");

    let renderer = Arc::new(SurfaceRenderer::new());
    let coordinator = Arc::new(TurnCoordinator::new(
        Arc::new(transport),
        renderer,
        &config,
    ));

    repl::run(coordinator).await
}
