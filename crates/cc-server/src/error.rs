//! Mapping from the domain error taxonomy to HTTP responses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use cc_catalog::CatalogError;
use serde_json::json;

/// Wrapper so route handlers can use `?` on domain results
pub struct ApiError(pub CatalogError);

impl From<CatalogError> for ApiError {
  fn from(err: CatalogError) -> Self {
    ApiError(err)
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = match &self.0 {
      CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
      CatalogError::Conflict => StatusCode::CONFLICT,
      CatalogError::Upstream(_) | CatalogError::Degraded(_) => StatusCode::BAD_GATEWAY,
      CatalogError::Persistence(_) | CatalogError::Corrupt(_) => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
    };
    (status, Json(json!({ "error": self.0.to_string() }))).into_response()
  }
}
