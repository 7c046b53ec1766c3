use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{routing::get, Json, Router};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tracing::warn;

/// One lend position in the shape the lending dashboard renders
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanPosition {
  pub collateral: String,
  pub collateral_amount: f64,
  pub collateral_value: f64,
  pub borrowed: String,
  pub borrow_value: f64,
  pub supply_rate: f64,
  pub borrow_rate: f64,
  pub ratio: f64,
  pub liquidation_threshold: f64,
  pub health_factor: f64,
  pub risk_level: String,
}

/// Create lend-position routes
pub fn routes() -> Router<Arc<AppState>> {
  Router::new().route("/jupiter-lend-positions/:wallet", get(lend_positions))
}

/// GET /api/jupiter-lend-positions/{wallet}
///
/// Pass-through to the Jupiter lend API. The literal wallet `DEMO` (any
/// letter case) short-circuits to fixed illustrative positions without
/// contacting the upstream.
async fn lend_positions(
  State(state): State<Arc<AppState>>,
  Path(wallet): Path<String>,
) -> Response {
  if wallet.eq_ignore_ascii_case("DEMO") {
    return Json(demo_positions()).into_response();
  }

  match state.client.jupiter().lend_positions(&wallet).await {
    Ok(positions) => Json(positions).into_response(),
    Err(e) => {
      warn!("Lend position lookup failed for {}: {}", wallet, e);
      (
        StatusCode::BAD_GATEWAY,
        Json(json!({ "error": format!("Lend position lookup failed: {}", e) })),
      )
        .into_response()
    }
  }
}

/// The two fixed demo positions: one healthy, one to keep an eye on
pub fn demo_positions() -> Vec<LoanPosition> {
  vec![
    LoanPosition {
      collateral: "USDC".to_string(),
      collateral_amount: 15_000.0,
      collateral_value: 15_000.0,
      borrowed: "SOL".to_string(),
      borrow_value: 6_000.0,
      supply_rate: 8.45,
      borrow_rate: 11.2,
      ratio: 40.0,
      liquidation_threshold: 80.0,
      health_factor: 2.0,
      risk_level: "healthy".to_string(),
    },
    LoanPosition {
      collateral: "SOL".to_string(),
      collateral_amount: 120.0,
      collateral_value: 21_600.0,
      borrowed: "USDC".to_string(),
      borrow_value: 14_500.0,
      supply_rate: 6.1,
      borrow_rate: 9.8,
      ratio: 67.13,
      liquidation_threshold: 75.0,
      health_factor: 1.12,
      risk_level: "risky".to_string(),
    },
  ]
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_demo_returns_exactly_two_positions() {
    let positions = demo_positions();
    assert_eq!(positions.len(), 2);
    assert_eq!(positions[0].risk_level, "healthy");
    assert_eq!(positions[1].risk_level, "risky");
  }

  #[test]
  fn test_demo_positions_serialize_camel_case() {
    let json = serde_json::to_value(demo_positions()).unwrap();
    assert!(json[0]["healthFactor"].is_number());
    assert!(json[0]["collateralValue"].is_number());
    assert!(json[0].get("health_factor").is_none());
  }
}
