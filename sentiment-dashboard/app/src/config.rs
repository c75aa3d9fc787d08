use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Sentiment analysis dashboard", long_about = None)]
pub struct Config {
    /// Address the dashboard listens on
    #[arg(long, env = "DASHBOARD_HTTP_BIND", default_value = "0.0.0.0:8501")]
    pub bind: SocketAddr,

    /// Base URL of the sentiment API
    #[arg(long, env = "SENTIMENT_API_URL", default_value = "http://127.0.0.1:8000")]
    pub api_url: String,

    /// Timeout for /predict calls in seconds
    #[arg(long, env = "PREDICT_TIMEOUT_SECS", default_value = "30")]
    pub predict_timeout_secs: u64,

    /// Timeout for /explain calls in seconds
    #[arg(long, env = "EXPLAIN_TIMEOUT_SECS", default_value = "60")]
    pub explain_timeout_secs: u64,

    /// Maximum characters sent to the API; longer input is truncated
    #[arg(long, env = "MAX_CHARS", default_value = "280")]
    pub max_chars: usize,
}

impl Config {
    /// # Errors
    /// Rejects zero timeouts, a zero character limit and non-HTTP API URLs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.predict_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "predict_timeout_secs",
                message: "must be greater than 0".to_string(),
            });
        }
        if self.explain_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "explain_timeout_secs",
                message: "must be greater than 0".to_string(),
            });
        }
        if self.max_chars == 0 {
            return Err(ConfigError::Invalid {
                field: "max_chars",
                message: "must be greater than 0".to_string(),
            });
        }
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                field: "api_url",
                message: format!("expected an http(s) URL, got {:?}", self.api_url),
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn predict_timeout(&self) -> Duration {
        Duration::from_secs(self.predict_timeout_secs)
    }

    #[must_use]
    pub fn explain_timeout(&self) -> Duration {
        Duration::from_secs(self.explain_timeout_secs)
    }
}
