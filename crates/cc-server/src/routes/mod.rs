//! Route modules and router assembly

pub mod coins;
pub mod health;
pub mod lend;
pub mod pairs;
pub mod price;
pub mod refresh;

use crate::state::AppState;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Build the application router with all API routes under `/api`
pub fn create_router(state: Arc<AppState>) -> Router {
  let api = Router::new()
    .merge(health::routes())
    .merge(coins::routes())
    .merge(refresh::routes())
    .merge(price::routes())
    .merge(pairs::routes())
    .merge(lend::routes());

  Router::new()
    .nest("/api", api)
    // The catalog frontend runs on its own origin during development.
    .layer(CorsLayer::permissive())
    .with_state(state)
}
