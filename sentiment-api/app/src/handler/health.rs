use crate::domain::HealthReport;
use crate::service::SentimentService;
use axum::Json;
use axum::extract::State;
use std::sync::Arc;
use tracing::info;

/// Handler for GET /health
pub async fn health_handler(State(service): State<Arc<SentimentService>>) -> Json<HealthReport> {
    let report = service.health();
    info!(status = %report.status, "Health check requested");
    Json(report)
}
