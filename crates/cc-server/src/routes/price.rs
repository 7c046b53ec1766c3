use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::{routing::get, Json, Router};
use cc_catalog::PriceQuote;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct PriceQuery {
  /// Market-data source identifier, e.g. "bitcoin"
  pub coin_id: String,
  /// Tradability flag from the catalog entry; selects the primary source
  #[serde(default)]
  pub is_tradable: bool,
}

/// Create price resolution routes
pub fn routes() -> Router<Arc<AppState>> {
  Router::new().route("/price/:symbol", get(resolve_price))
}

/// GET /api/price/{symbol}?coin_id=&is_tradable=
async fn resolve_price(
  State(state): State<Arc<AppState>>,
  Path(symbol): Path<String>,
  Query(query): Query<PriceQuery>,
) -> Result<Json<PriceQuote>, ApiError> {
  let quote = state.resolver.resolve(&symbol, &query.coin_id, query.is_tradable).await?;
  Ok(Json(quote))
}
