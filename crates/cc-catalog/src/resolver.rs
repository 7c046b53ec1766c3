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

//! Per-request price resolution with cross-source fallback

use crate::error::{CatalogError, CatalogResult};
use cc_client::CatalogClient;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Which source produced the quote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PriceSource {
  /// The reference exchange answered with a usable price
  Primary,
  /// The market-data source answered; the primary was never attempted
  Fallback,
  /// The primary was attempted and failed; the market-data source answered
  PrimaryWithFallback,
}

/// Ephemeral result of one resolution request; never persisted
#[derive(Debug, Clone, Serialize)]
pub struct PriceQuote {
  pub symbol: String,
  pub price: f64,
  pub source: PriceSource,
}

/// Resolves a price for one asset, preferring the reference exchange for
/// tradable assets and falling back to the market-data source.
///
/// Upstream failures never cross this boundary: a transport error, a
/// non-2xx response or a malformed body all count as "no price" from that
/// source. Neither source is retried.
pub struct PriceResolver {
  client: Arc<CatalogClient>,
  quote_asset: String,
}

impl PriceResolver {
  pub fn new(client: Arc<CatalogClient>, quote_asset: impl Into<String>) -> Self {
    Self { client, quote_asset: quote_asset.into() }
  }

  /// Resolve a quote, failing with `NotFound` when no source yields a
  /// usable positive price.
  #[instrument(skip(self), fields(symbol, coin_id, is_tradable))]
  pub async fn resolve(
    &self,
    symbol: &str,
    coin_id: &str,
    is_tradable: bool,
  ) -> CatalogResult<PriceQuote> {
    let symbol = symbol.to_uppercase();
    let mut primary_attempted = false;

    if is_tradable {
      primary_attempted = true;
      let pair = format!("{}{}", symbol, self.quote_asset);
      match self.client.binance().ticker_price(&pair).await {
        Ok(ticker) => {
          if let Some(price) = ticker.usable_price() {
            return Ok(PriceQuote { symbol, price, source: PriceSource::Primary });
          }
          debug!("Primary source returned an unusable price for {}", pair);
        }
        Err(e) => {
          debug!("Primary price lookup failed for {}: {}", pair, e);
        }
      }
    }

    match self.client.coingecko().simple_price(coin_id).await {
      Ok(prices) => {
        let usd = prices
          .get(coin_id)
          .and_then(|quotes| quotes.get("usd"))
          .copied()
          .filter(|p| p.is_finite() && *p > 0.0);
        if let Some(price) = usd {
          let source = if primary_attempted {
            PriceSource::PrimaryWithFallback
          } else {
            PriceSource::Fallback
          };
          return Ok(PriceQuote { symbol, price, source });
        }
        debug!("Fallback response held no usd price for {}", coin_id);
      }
      Err(e) => {
        debug!("Fallback price lookup failed for {}: {}", coin_id, e);
      }
    }

    Err(CatalogError::NotFound(format!("No source yielded a price for {}", symbol)))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use cc_core::Config;
  use wiremock::matchers::{method, path, query_param};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  async fn resolver_for(server: &MockServer) -> PriceResolver {
    let mut config = Config::default_local();
    config.binance_base_url = server.uri();
    config.coingecko_base_url = server.uri();
    config.rate_limit = 600;
    PriceResolver::new(Arc::new(CatalogClient::new(&config).unwrap()), "USDC")
  }

  fn mock_ticker(price: &str) -> Mock {
    Mock::given(method("GET")).and(path("/api/v3/ticker/price")).respond_with(
      ResponseTemplate::new(200)
        .set_body_json(serde_json::json!({"symbol": "BTCUSDC", "price": price})),
    )
  }

  fn mock_simple_price(body: serde_json::Value) -> Mock {
    Mock::given(method("GET"))
      .and(path("/simple/price"))
      .respond_with(ResponseTemplate::new(200).set_body_json(body))
  }

  #[tokio::test]
  async fn test_tradable_uses_primary() {
    let server = MockServer::start().await;
    mock_ticker("67000.00").mount(&server).await;

    let quote = resolver_for(&server).await.resolve("BTC", "bitcoin", true).await.unwrap();
    assert_eq!(quote.price, 67000.00);
    assert_eq!(quote.source, PriceSource::Primary);
    assert_eq!(quote.symbol, "BTC");
  }

  #[tokio::test]
  async fn test_primary_failure_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/api/v3/ticker/price"))
      .respond_with(ResponseTemplate::new(400))
      .mount(&server)
      .await;
    mock_simple_price(serde_json::json!({"bitcoin": {"usd": 66950.0}})).mount(&server).await;

    let quote = resolver_for(&server).await.resolve("BTC", "bitcoin", true).await.unwrap();
    assert_eq!(quote.price, 66950.0);
    assert_eq!(quote.source, PriceSource::PrimaryWithFallback);
  }

  #[tokio::test]
  async fn test_not_tradable_skips_primary() {
    let server = MockServer::start().await;
    // No ticker mock: a primary attempt would 404 through wiremock and the
    // source label would be wrong.
    mock_simple_price(serde_json::json!({"ripple": {"usd": 0.52}})).mount(&server).await;

    let quote = resolver_for(&server).await.resolve("xrp", "ripple", false).await.unwrap();
    assert_eq!(quote.source, PriceSource::Fallback);
    assert_eq!(quote.symbol, "XRP");
  }

  #[tokio::test]
  async fn test_both_sources_failing_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/api/v3/ticker/price"))
      .respond_with(ResponseTemplate::new(500))
      .mount(&server)
      .await;
    Mock::given(method("GET"))
      .and(path("/simple/price"))
      .respond_with(ResponseTemplate::new(500))
      .mount(&server)
      .await;

    let result = resolver_for(&server).await.resolve("BTC", "bitcoin", true).await;
    assert!(matches!(result, Err(CatalogError::NotFound(_))));
  }

  #[tokio::test]
  async fn test_missing_usd_key_is_no_price() {
    let server = MockServer::start().await;
    mock_simple_price(serde_json::json!({"bitcoin": {"eur": 62000.0}})).mount(&server).await;

    let result = resolver_for(&server).await.resolve("BTC", "bitcoin", false).await;
    assert!(matches!(result, Err(CatalogError::NotFound(_))));
  }

  #[tokio::test]
  async fn test_unusable_primary_price_falls_back() {
    let server = MockServer::start().await;
    mock_ticker("0.00").mount(&server).await;
    mock_simple_price(serde_json::json!({"bitcoin": {"usd": 66950.0}})).mount(&server).await;

    let quote = resolver_for(&server).await.resolve("BTC", "bitcoin", true).await.unwrap();
    assert_eq!(quote.source, PriceSource::PrimaryWithFallback);
  }

  #[test]
  fn test_source_serialization() {
    assert_eq!(
      serde_json::to_value(PriceSource::PrimaryWithFallback).unwrap(),
      "primary-with-fallback"
    );
    assert_eq!(serde_json::to_value(PriceSource::Primary).unwrap(), "primary");
  }

  #[tokio::test]
  async fn test_query_uses_coin_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/simple/price"))
      .and(query_param("ids", "bitcoin"))
      .and(query_param("vs_currencies", "usd"))
      .respond_with(
        ResponseTemplate::new(200).set_body_json(serde_json::json!({"bitcoin": {"usd": 1.0}})),
      )
      .mount(&server)
      .await;

    let quote = resolver_for(&server).await.resolve("BTC", "bitcoin", false).await.unwrap();
    assert_eq!(quote.price, 1.0);
  }
}
