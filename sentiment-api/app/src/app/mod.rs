mod router;
pub mod server;
mod state;
pub mod tracing;

pub use router::main_router;
pub use state::AppState;

use crate::config;
use crate::error::ServiceError;

/// Application entry point. Initializes tracing, configuration, artifacts, and starts the server.
pub async fn run() -> Result<(), ServiceError> {
    // Handle healthcheck subcommand (for Docker healthcheck in distroless image)
    if std::env::args().nth(1).as_deref() == Some("healthcheck") {
        match crate::healthcheck().await {
            Ok(()) => std::process::exit(0),
            Err(e) => {
                eprintln!("Healthcheck failed: {e}");
                std::process::exit(1)
            }
        }
    }

    tracing::init_tracing();

    let settings = config::get_configuration().map_err(|e| ServiceError::Config(e.to_string()))?;
    ::tracing::info!(
        bind = %settings.http_bind,
        artifacts_dir = %settings.artifacts_dir.display(),
        normalize_mode = %settings.normalize_mode,
        "Loaded settings"
    );

    let app_state = AppState::from_settings(&settings)?;
    let app = main_router(app_state.service);

    server::serve(app, settings.http_bind).await
}
