mod router;
pub mod server;
pub mod tracing;

pub use router::dashboard_router;

use crate::client::{ApiClientConfig, SentimentApiClient};
use crate::config::Config;
use crate::error::DashboardError;
use crate::handler::DashboardState;
use clap::Parser;
use std::sync::Arc;

/// Application entry point. Parses flags, builds the API client, and starts the server.
pub async fn run() -> Result<(), DashboardError> {
    tracing::init_tracing();

    let config = Config::parse();
    config
        .validate()
        .map_err(|e| DashboardError::Config(e.to_string()))?;
    ::tracing::info!(bind = %config.bind, api_url = %config.api_url, "Loaded settings");

    let client = SentimentApiClient::new(ApiClientConfig {
        base_url: config.api_url.clone(),
        predict_timeout: config.predict_timeout(),
        explain_timeout: config.explain_timeout(),
    })
    .map_err(|e| DashboardError::Client(format!("{e:#}")))?;

    let state = Arc::new(DashboardState {
        client,
        max_chars: config.max_chars,
    });

    server::serve(dashboard_router(state), config.bind).await
}
