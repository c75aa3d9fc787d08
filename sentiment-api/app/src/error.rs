use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Startup failures. Anything here stops the process before it serves traffic.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Failed to load configuration: {0}")]
    Config(String),

    #[error("Failed to load artifact {path}: {message}")]
    Artifact { path: String, message: String },

    #[error("Failed to bind to address {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),
}

/// Request-level failures, rendered as `{"detail": ...}` bodies.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Model not loaded")]
    ModelNotLoaded,

    #[error("Text too short for explanation")]
    TextTooShort,

    #[error("{message}")]
    InvalidRequest { status: StatusCode, message: String },

    #[error("{0}")]
    Inference(String),
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::ModelNotLoaded | ApiError::Inference(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::TextTooShort => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidRequest { status, .. } => *status,
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(error: anyhow::Error) -> Self {
        ApiError::Inference(format!("{error:#}"))
    }
}

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            detail: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
