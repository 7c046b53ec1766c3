use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{Query, State};
use axum::{routing::get, Json, Router};
use cc_catalog::CatalogEntry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct CoinsQuery {
  /// Case-insensitive prefix matched against name or symbol
  pub search: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CoinsResponse {
  pub timestamp_utc: DateTime<Utc>,
  pub count: usize,
  pub coins: Vec<CatalogEntry>,
}

/// Create catalog listing routes
pub fn routes() -> Router<Arc<AppState>> {
  Router::new().route("/coins", get(list_coins))
}

/// GET /api/coins?search=
async fn list_coins(
  State(state): State<Arc<AppState>>,
  Query(query): Query<CoinsQuery>,
) -> Result<Json<CoinsResponse>, ApiError> {
  let snapshot = state.cache.get().await?;

  let coins = match query.search.as_deref() {
    Some(token) if !token.is_empty() => filter_entries(&snapshot.coins, token),
    _ => snapshot.coins.clone(),
  };

  Ok(Json(CoinsResponse { timestamp_utc: snapshot.timestamp_utc, count: coins.len(), coins }))
}

/// Prefix match on name or symbol, case-insensitive
pub fn filter_entries(entries: &[CatalogEntry], token: &str) -> Vec<CatalogEntry> {
  let token = token.to_lowercase();
  entries
    .iter()
    .filter(|entry| {
      entry.name.to_lowercase().starts_with(&token)
        || entry.symbol.to_lowercase().starts_with(&token)
    })
    .cloned()
    .collect()
}
