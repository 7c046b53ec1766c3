use crate::state::AppState;
use axum::extract::State;
use axum::{routing::get, Json, Router};
use cc_catalog::PairRegistry;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct PairsResponse {
  pub count: usize,
  /// True when the exchange was unreachable and the built-in fallback set
  /// is being served
  pub degraded: bool,
  pub pairs: Vec<String>,
}

/// Create trading-pair routes
pub fn routes() -> Router<Arc<AppState>> {
  Router::new().route("/pairs", get(list_pairs))
}

/// GET /api/pairs
///
/// Live view of the tradable pairs quoted in the configured stablecoin.
async fn list_pairs(State(state): State<Arc<AppState>>) -> Json<PairsResponse> {
  let registry =
    PairRegistry::new(Arc::clone(&state.client), state.config.quote_asset.clone());
  let pair_set = registry.fetch_tradable_pairs().await;

  let mut pairs: Vec<String> = pair_set.symbols().cloned().collect();
  pairs.sort();

  Json(PairsResponse { count: pairs.len(), degraded: pair_set.degraded, pairs })
}
