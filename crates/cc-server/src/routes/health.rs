use crate::state::AppState;
use axum::{routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;

/// Simple health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
  pub status: String,
  pub timestamp: chrono::DateTime<chrono::Utc>,
  pub version: String,
}

/// Create health routes
pub fn routes() -> Router<Arc<AppState>> {
  Router::new().route("/health", get(health_check))
}

/// GET /api/health
async fn health_check() -> Json<HealthResponse> {
  Json(HealthResponse {
    status: "ok".to_string(),
    timestamp: Utc::now(),
    version: env!("CARGO_PKG_VERSION").to_string(),
  })
}
