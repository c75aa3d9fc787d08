use crate::domain::{Explanation, TweetRequest};
use crate::error::ApiError;
use crate::service::SentimentService;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use std::sync::Arc;
use tracing::{error, info, warn};

use super::tweet_body;

/// Handler for POST /explain
///
/// LIME scores thousands of perturbations, so the work runs on the blocking pool.
pub async fn explain_handler(
    State(service): State<Arc<SentimentService>>,
    payload: Result<Json<TweetRequest>, JsonRejection>,
) -> Result<Json<Explanation>, ApiError> {
    let TweetRequest { text } = tweet_body(payload)?;

    let result = tokio::task::spawn_blocking(move || service.explain(&text))
        .await
        .map_err(|e| ApiError::Inference(format!("explanation task failed: {e}")))?;

    match result {
        Ok(explanation) => {
            info!(
                sentiment = ?explanation.sentiment,
                features = explanation.explanation.len(),
                score = explanation.score,
                "Explanation served"
            );
            Ok(Json(explanation))
        }
        Err(ApiError::TextTooShort) => {
            warn!("Explanation rejected: text too short");
            Err(ApiError::TextTooShort)
        }
        Err(e) => {
            error!("Explanation failed: {e}");
            Err(e)
        }
    }
}
