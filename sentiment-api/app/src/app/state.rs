use crate::artifacts::Artifacts;
use crate::config::Settings;
use crate::error::ServiceError;
use crate::service::SentimentService;
use std::sync::Arc;

/// Shared application state holding the sentiment service.
pub struct AppState {
    pub service: Arc<SentimentService>,
}

impl AppState {
    /// Create `AppState` from configuration settings.
    ///
    /// Reads every artifact from `settings.artifacts_dir`. A missing model or
    /// vectorizer does not fail startup; `/health` reports it instead.
    pub fn from_settings(settings: &Settings) -> Result<Self, ServiceError> {
        let artifacts = Artifacts::load(&settings.artifacts_dir)?;
        let service = SentimentService::from_artifacts(
            artifacts,
            settings.normalize_mode,
            settings.lime.clone(),
        )?;
        Ok(Self {
            service: Arc::new(service),
        })
    }
}
