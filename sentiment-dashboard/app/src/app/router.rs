use crate::handler::{DashboardState, explain_handler, index_handler, predict_handler};
use axum::Router;
use axum::routing::{get, post};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Build the dashboard router (form page, predict, explain).
pub fn dashboard_router(state: Arc<DashboardState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/predict", post(predict_handler))
        .route("/explain", post(explain_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
