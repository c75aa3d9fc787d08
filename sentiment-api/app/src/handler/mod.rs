pub mod explain;
pub mod health;
pub mod predict;
pub mod root;

use crate::domain::TweetRequest;
use crate::error::ApiError;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use tracing::warn;

/// Maps body rejections (missing `text`, wrong type, not JSON, wrong content
/// type) onto a 422 `{"detail"}` error. Oversized bodies keep their 413.
pub(crate) fn tweet_body(
    payload: Result<Json<TweetRequest>, JsonRejection>,
) -> Result<TweetRequest, ApiError> {
    payload
        .map(|Json(request)| request)
        .map_err(|rejection| {
            warn!(status = %rejection.status(), "Rejected request body");
            let status = if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                StatusCode::PAYLOAD_TOO_LARGE
            } else {
                StatusCode::UNPROCESSABLE_ENTITY
            };
            ApiError::InvalidRequest {
                status,
                message: rejection.body_text(),
            }
        })
}
