use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

use crate::explain::{FeatureSelection, LimeConfig};
use crate::preprocess::NormalizeMode;

#[cfg(test)]
pub(crate) static ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());

pub const DEFAULT_HTTP_BIND: &str = "0.0.0.0:8000";
pub const DEFAULT_ARTIFACTS_DIR: &str = "api_artifacts";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub http_bind: SocketAddr,
    /// Directory holding the lexicons and the exported model/vectorizer
    pub artifacts_dir: PathBuf,
    pub normalize_mode: NormalizeMode,
    pub lime: LimeConfig,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {message}")]
    Invalid { name: &'static str, message: String },
}

impl Settings {
    /// Validates the settings and returns an error if invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_port(self.http_bind.port())?;
        if self.artifacts_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid {
                name: "ARTIFACTS_DIR",
                message: "artifacts directory cannot be empty".into(),
            });
        }
        if self.lime.num_samples < 2 {
            return Err(ConfigError::Invalid {
                name: "LIME_NUM_SAMPLES",
                message: "at least 2 samples are required".into(),
            });
        }
        if self.lime.num_features == 0 {
            return Err(ConfigError::Invalid {
                name: "LIME_NUM_FEATURES",
                message: "must be greater than zero".into(),
            });
        }
        if !(self.lime.kernel_width.is_finite() && self.lime.kernel_width > 0.0) {
            return Err(ConfigError::Invalid {
                name: "LIME_KERNEL_WIDTH",
                message: "must be a positive number".into(),
            });
        }
        Ok(())
    }

    /// Reads the service settings from the environment, falling back to defaults.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when a variable is set but cannot be parsed, or
    /// when the resulting settings fail validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        let http_bind = parse_var::<SocketAddr>("HTTP_BIND", DEFAULT_HTTP_BIND)?;
        let artifacts_dir = PathBuf::from(
            env::var("ARTIFACTS_DIR").unwrap_or_else(|_| DEFAULT_ARTIFACTS_DIR.to_string()),
        );
        let normalize_mode = parse_var::<NormalizeMode>("NORMALIZE_MODE", "lem")?;

        let defaults = LimeConfig::default();
        let lime = LimeConfig {
            num_samples: parse_var("LIME_NUM_SAMPLES", &defaults.num_samples.to_string())?,
            num_features: parse_var("LIME_NUM_FEATURES", &defaults.num_features.to_string())?,
            kernel_width: parse_var("LIME_KERNEL_WIDTH", &defaults.kernel_width.to_string())?,
            feature_selection: parse_var::<FeatureSelection>("LIME_FEATURE_SELECTION", "auto")?,
            random_seed: parse_var("LIME_RANDOM_SEED", &defaults.random_seed.to_string())?,
        };

        let settings = Self {
            http_bind,
            artifacts_dir,
            normalize_mode,
            lime,
        };

        // Validate settings before returning
        settings.validate()?;

        Ok(settings)
    }
}

pub fn get_configuration() -> Result<Settings, ConfigError> {
    Settings::from_env()
}

/// Validates that the port is in valid range (1-65535).
fn validate_port(port: u16) -> Result<(), ConfigError> {
    if port == 0 {
        return Err(ConfigError::Invalid {
            name: "HTTP_BIND",
            message: "Port cannot be 0".into(),
        });
    }
    Ok(())
}

fn parse_var<T>(name: &'static str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = env::var(name).unwrap_or_else(|_| default.to_string());
    raw.trim().parse::<T>().map_err(|error| ConfigError::Invalid {
        name,
        message: format!("{error} (got {raw:?})"),
    })
}
