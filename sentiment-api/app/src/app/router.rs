use crate::handler::explain::explain_handler;
use crate::handler::health::health_handler;
use crate::handler::predict::predict_handler;
use crate::handler::root::root_handler;
use crate::service::SentimentService;
use axum::Router;
use axum::routing::{get, post};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Build the HTTP router (info, health, predict, explain).
pub fn main_router(service: Arc<SentimentService>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/predict", post(predict_handler))
        .route("/explain", post(explain_handler))
        .with_state(service)
        .layer(TraceLayer::new_for_http())
}
