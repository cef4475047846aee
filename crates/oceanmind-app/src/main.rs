//! OceanMind application binary - composition root.
//!
//! Ties together the OceanMind crates into a single executable:
//! 1. Load configuration from TOML (with CLI/env overrides)
//! 2. Initialize tracing
//! 3. Build the Gemini client, or run degraded when no credential exists
//! 4. Start the axum REST API server

mod cli;

use std::sync::Arc;

use clap::Parser;

use oceanmind_api::AppState;
use oceanmind_core::OceanMindConfig;
use oceanmind_data::SnapshotFetcher;
use oceanmind_genai::{GenAiError, GeminiClient, GenerativeClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = cli::CliArgs::parse();

    // Config first: the log level may come from it.
    let config_file = args.resolve_config_path();
    let mut config = OceanMindConfig::load_or_default(&config_file);
    config.general.port = args.resolve_port(config.general.port);
    config.general.log_level = args.resolve_log_level(&config.general.log_level);

    // Tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.general.log_level)),
        )
        .init();

    tracing::info!("Starting OceanMind v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %config_file.display(), "Configuration loaded");

    // Gemini client. A missing credential is a supported degraded mode: the
    // server still runs and every endpoint serves its documented fallback.
    let client: Option<Arc<dyn GenerativeClient>> = match GeminiClient::new(&config.genai) {
        Ok(client) => {
            tracing::info!(model = %config.genai.model, "Gemini client ready");
            Some(Arc::new(client))
        }
        Err(GenAiError::MissingCredential) => {
            tracing::warn!("No API credential configured; serving fallback data only");
            None
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to build Gemini client");
            return Err(e.into());
        }
    };

    let fetcher = match &client {
        Some(client) => SnapshotFetcher::new(Arc::clone(client), config.dashboard.alert_count),
        None => SnapshotFetcher::disabled(),
    };

    let state = AppState::new(config.clone(), fetcher, client);
    oceanmind_api::start_server(&config, state).await?;

    Ok(())
}
