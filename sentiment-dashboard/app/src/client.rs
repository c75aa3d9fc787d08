//! HTTP client for the sentiment API.
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ClientError;

const HEALTH_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Serialize)]
struct TweetRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model_loaded: bool,
    pub vectorizer_loaded: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PredictResponse {
    pub sentiment: String,
    pub confidence: f64,
    pub probability_positive: f64,
    pub probability_negative: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExplainResponse {
    pub sentiment: String,
    pub explanation: Vec<(String, f64)>,
    pub html_explanation: String,
    #[serde(default)]
    pub intercept: f64,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub local_prediction: f64,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    pub base_url: String,
    pub predict_timeout: Duration,
    pub explain_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct SentimentApiClient {
    client: Client,
    base_url: Url,
    predict_timeout: Duration,
    explain_timeout: Duration,
}

impl SentimentApiClient {
    /// # Errors
    /// Fails when the base URL does not parse or the HTTP client cannot be built.
    pub fn new(config: ApiClientConfig) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("failed to build sentiment API HTTP client")?;
        let base_url = Url::parse(&config.base_url).context("invalid sentiment API base URL")?;

        Ok(Self {
            client,
            base_url,
            predict_timeout: config.predict_timeout,
            explain_timeout: config.explain_timeout,
        })
    }

    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        let response = self
            .client
            .get(self.endpoint("health"))
            .timeout(HEALTH_TIMEOUT)
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                endpoint: "/health",
                source,
            })?;
        decode("/health", response).await
    }

    pub async fn predict(&self, text: &str) -> Result<PredictResponse, ClientError> {
        debug!(chars = text.chars().count(), "requesting prediction");
        self.post("/predict", "predict", text, self.predict_timeout)
            .await
    }

    pub async fn explain(&self, text: &str) -> Result<ExplainResponse, ClientError> {
        debug!(chars = text.chars().count(), "requesting explanation");
        self.post("/explain", "explain", text, self.explain_timeout)
            .await
    }

    async fn post<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        path: &str,
        text: &str,
        timeout: Duration,
    ) -> Result<T, ClientError> {
        let response = self
            .client
            .post(self.endpoint(path))
            .timeout(timeout)
            .json(&TweetRequest { text })
            .send()
            .await
            .map_err(|source| ClientError::Transport { endpoint, source })?;
        decode(endpoint, response).await
    }

    /// Joins `path` onto the base URL, keeping any path prefix the base carries.
    fn endpoint(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        let joined = format!("{}/{path}", url.path().trim_end_matches('/'));
        url.set_path(&joined);
        url
    }
}

async fn decode<T: DeserializeOwned>(
    endpoint: &'static str,
    response: Response,
) -> Result<T, ClientError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ErrorBody>(&body)
            .map(|error| error.detail)
            .unwrap_or(body);
        return Err(ClientError::Status {
            endpoint,
            status: status.as_u16(),
            detail,
        });
    }
    response
        .json()
        .await
        .map_err(|source| ClientError::Decode { endpoint, source })
}
