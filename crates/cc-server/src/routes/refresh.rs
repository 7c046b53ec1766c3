use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{routing::get, routing::post, Json, Router};
use cc_catalog::CatalogError;
use serde_json::json;
use std::sync::Arc;

/// Create refresh routes
pub fn routes() -> Router<Arc<AppState>> {
  Router::new()
    .route("/refresh", post(trigger_refresh))
    .route("/refresh/status", get(refresh_status))
}

/// POST /api/refresh
///
/// Starts a background refresh. At most one refresh runs at a time; a
/// request while one is running gets 409 with the live progress record.
async fn trigger_refresh(State(state): State<Arc<AppState>>) -> Response {
  match Arc::clone(&state.coordinator).spawn().await {
    Ok(()) => (StatusCode::ACCEPTED, Json(json!({ "status": "started" }))).into_response(),
    Err(CatalogError::Conflict) => {
      let progress = state.tracker.snapshot().await;
      (
        StatusCode::CONFLICT,
        Json(json!({ "error": "A refresh is already running", "progress": progress })),
      )
        .into_response()
    }
    Err(other) => (
      StatusCode::INTERNAL_SERVER_ERROR,
      Json(json!({ "error": other.to_string() })),
    )
      .into_response(),
  }
}

/// GET /api/refresh/status
async fn refresh_status(State(state): State<Arc<AppState>>) -> Response {
  Json(state.tracker.snapshot().await).into_response()
}
