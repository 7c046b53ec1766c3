//! Typed responses for the upstream collaborators

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One instrument from the Binance `exchangeInfo` listing
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExchangeSymbol {
  /// Pair symbol, e.g. "BTCUSDC"
  pub symbol: String,
  /// Quote asset of the pair, e.g. "USDC"
  #[serde(rename = "quoteAsset")]
  pub quote_asset: String,
  /// Instrument status; "TRADING" means currently tradable
  pub status: String,
}

/// Response of the Binance `/api/v3/exchangeInfo` endpoint
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExchangeInfo {
  pub symbols: Vec<ExchangeSymbol>,
}

/// Response of the Binance `/api/v3/ticker/price` endpoint.
///
/// Binance serializes the price as a string, e.g. `"67000.00"`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TickerPrice {
  pub symbol: String,
  pub price: String,
}

impl TickerPrice {
  /// Parse the stringified price, returning it only when usable
  /// (finite and strictly positive).
  pub fn usable_price(&self) -> Option<f64> {
    self.price.parse::<f64>().ok().filter(|p| p.is_finite() && *p > 0.0)
  }
}

/// One raw record from the CoinGecko `/coins/markets` listing.
///
/// The three identity fields can come back null or empty; the snapshot
/// builder drops such records.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MarketRecord {
  pub id: Option<String>,
  pub symbol: Option<String>,
  pub name: Option<String>,
  pub market_cap_rank: Option<u32>,
  pub current_price: Option<f64>,
}

/// Response of the CoinGecko `/simple/price` endpoint:
/// `{"bitcoin": {"usd": 67000.0}}`
pub type SimplePrice = HashMap<String, HashMap<String, f64>>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_ticker_price_usable() {
    let ticker = TickerPrice { symbol: "BTCUSDC".to_string(), price: "67000.00".to_string() };
    assert_eq!(ticker.usable_price(), Some(67000.00));
  }

  #[test]
  fn test_ticker_price_zero_is_unusable() {
    let ticker = TickerPrice { symbol: "XUSDC".to_string(), price: "0.0".to_string() };
    assert_eq!(ticker.usable_price(), None);
  }

  #[test]
  fn test_ticker_price_garbage_is_unusable() {
    let ticker = TickerPrice { symbol: "XUSDC".to_string(), price: "n/a".to_string() };
    assert_eq!(ticker.usable_price(), None);
  }

  #[test]
  fn test_market_record_tolerates_nulls() {
    let record: MarketRecord =
      serde_json::from_str(r#"{"id":null,"symbol":"btc","name":null,"market_cap_rank":1}"#)
        .unwrap();
    assert!(record.id.is_none());
    assert_eq!(record.symbol.as_deref(), Some("btc"));
  }

  #[test]
  fn test_exchange_symbol_field_names() {
    let symbol: ExchangeSymbol = serde_json::from_str(
      r#"{"symbol":"BTCUSDC","quoteAsset":"USDC","status":"TRADING","baseAsset":"BTC"}"#,
    )
    .unwrap();
    assert_eq!(symbol.quote_asset, "USDC");
    assert_eq!(symbol.status, "TRADING");
  }
}
