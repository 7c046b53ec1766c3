/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Coin Catalog contributors
 *
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

//! Trading-pair registry for the reference exchange

use cc_client::CatalogClient;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, warn};

/// Major assets used to build the fallback pair set when the exchange
/// cannot be reached (e.g. geographic restriction).
const FALLBACK_BASES: [&str; 17] = [
  "BTC", "ETH", "BNB", "SOL", "XRP", "ADA", "AVAX", "LINK", "DOT", "DOGE", "MATIC", "LTC",
  "WBTC", "BCH", "TRX", "SHIB", "UNI",
];

/// The set of pair symbols quoted in the configured stablecoin and
/// currently open for trading. Rebuilt fully on each refresh and discarded
/// after the tradability join.
#[derive(Debug, Clone)]
pub struct PairSet {
  symbols: HashSet<String>,
  /// True when the exchange could not be queried and the built-in
  /// major-asset fallback was used instead
  pub degraded: bool,
}

impl PairSet {
  pub fn new(symbols: HashSet<String>) -> Self {
    Self { symbols, degraded: false }
  }

  /// The fixed fallback set of well-known major-asset pairs
  pub fn fallback(quote_asset: &str) -> Self {
    let symbols =
      FALLBACK_BASES.iter().map(|base| format!("{}{}", base, quote_asset)).collect();
    Self { symbols, degraded: true }
  }

  pub fn contains(&self, pair: &str) -> bool {
    self.symbols.contains(pair)
  }

  pub fn len(&self) -> usize {
    self.symbols.len()
  }

  pub fn is_empty(&self) -> bool {
    self.symbols.is_empty()
  }

  /// Pair symbols in unspecified order
  pub fn symbols(&self) -> impl Iterator<Item = &String> {
    self.symbols.iter()
  }
}

/// Fetches and filters the exchange's instrument listing
pub struct PairRegistry {
  client: Arc<CatalogClient>,
  quote_asset: String,
}

impl PairRegistry {
  pub fn new(client: Arc<CatalogClient>, quote_asset: impl Into<String>) -> Self {
    Self { client, quote_asset: quote_asset.into() }
  }

  /// Fetch the currently tradable pairs quoted in the configured stablecoin.
  ///
  /// Never fails: when the exchange cannot be queried the built-in
  /// major-asset set is returned with `degraded = true` so a refresh can
  /// still complete with reduced tradability accuracy.
  pub async fn fetch_tradable_pairs(&self) -> PairSet {
    match self.client.binance().exchange_info().await {
      Ok(info) => {
        let symbols: HashSet<String> = info
          .symbols
          .into_iter()
          .filter(|s| s.quote_asset == self.quote_asset && s.status == "TRADING")
          .map(|s| s.symbol)
          .collect();
        info!("Found {} tradable {} pairs on the exchange", symbols.len(), self.quote_asset);
        PairSet::new(symbols)
      }
      Err(e) => {
        warn!(
          "Could not fetch the instrument listing: {}. Falling back to the built-in {} pair set",
          e, self.quote_asset
        );
        PairSet::fallback(&self.quote_asset)
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use cc_core::Config;
  use wiremock::matchers::{method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  fn client_for(server: &MockServer) -> Arc<CatalogClient> {
    let mut config = Config::default_local();
    config.binance_base_url = server.uri();
    Arc::new(CatalogClient::new(&config).unwrap())
  }

  #[tokio::test]
  async fn test_filters_by_quote_asset_and_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/api/v3/exchangeInfo"))
      .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "symbols": [
          {"symbol": "BTCUSDC", "quoteAsset": "USDC", "status": "TRADING"},
          {"symbol": "ETHUSDC", "quoteAsset": "USDC", "status": "TRADING"},
          {"symbol": "BNBUSDT", "quoteAsset": "USDT", "status": "TRADING"},
          {"symbol": "SOLUSDC", "quoteAsset": "USDC", "status": "BREAK"},
          {"symbol": "ADAUSDC", "quoteAsset": "USDC", "status": "TRADING"}
        ]
      })))
      .mount(&server)
      .await;

    let registry = PairRegistry::new(client_for(&server), "USDC");
    let pairs = registry.fetch_tradable_pairs().await;

    assert_eq!(pairs.len(), 3);
    assert!(pairs.contains("BTCUSDC"));
    assert!(pairs.contains("ETHUSDC"));
    assert!(pairs.contains("ADAUSDC"));
    assert!(!pairs.contains("BNBUSDT"));
    assert!(!pairs.contains("SOLUSDC"));
    assert!(!pairs.degraded);
  }

  #[tokio::test]
  async fn test_exchange_failure_falls_back_degraded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/api/v3/exchangeInfo"))
      .respond_with(ResponseTemplate::new(451))
      .mount(&server)
      .await;

    let registry = PairRegistry::new(client_for(&server), "USDC");
    let pairs = registry.fetch_tradable_pairs().await;

    assert!(pairs.degraded);
    assert_eq!(pairs.len(), 17);
    assert!(pairs.contains("BTCUSDC"));
    assert!(pairs.contains("UNIUSDC"));
  }

  #[test]
  fn test_fallback_respects_quote_asset() {
    let pairs = PairSet::fallback("USDT");
    assert!(pairs.contains("BTCUSDT"));
    assert!(!pairs.contains("BTCUSDC"));
  }
}
