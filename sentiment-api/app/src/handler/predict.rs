use crate::domain::{Prediction, TweetRequest};
use crate::error::ApiError;
use crate::service::SentimentService;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use std::sync::Arc;
use tracing::{error, info};

use super::tweet_body;

/// Handler for POST /predict
pub async fn predict_handler(
    State(service): State<Arc<SentimentService>>,
    payload: Result<Json<TweetRequest>, JsonRejection>,
) -> Result<Json<Prediction>, ApiError> {
    let TweetRequest { text } = tweet_body(payload)?;

    match service.predict(&text) {
        Ok(prediction) => {
            info!(
                sentiment = ?prediction.sentiment,
                confidence = prediction.confidence,
                chars = text.chars().count(),
                "Prediction served"
            );
            Ok(Json(prediction))
        }
        Err(e) => {
            error!("Prediction failed: {e}");
            Err(e)
        }
    }
}
