use crate::client::DirectRateLimiter;
use crate::models::{MarketRecord, SimplePrice};
use crate::transport::Transport;
use cc_core::Result;
use std::sync::Arc;
use tracing::{debug, instrument};

/// CoinGecko API endpoints
pub struct CoinGeckoEndpoints {
  transport: Arc<Transport>,
  rate_limiter: Arc<DirectRateLimiter>,
  base_url: String,
}

impl CoinGeckoEndpoints {
  /// Create a new CoinGecko endpoints instance
  pub fn new(
    transport: Arc<Transport>,
    rate_limiter: Arc<DirectRateLimiter>,
    base_url: String,
  ) -> Self {
    Self { transport, rate_limiter, base_url }
  }

  /// Fetch one page of the market listing, ordered by descending market cap
  ///
  /// Waits on the shared rate limiter before the call; a caller that pages
  /// faster than the quota blocks until a slot frees, it never fails.
  #[instrument(skip(self), fields(page, per_page))]
  pub async fn coins_markets(&self, page: u32, per_page: u32) -> Result<Vec<MarketRecord>> {
    self.rate_limiter.until_ready().await;

    debug!("Fetching markets page {} from CoinGecko", page);

    let url = format!("{}/coins/markets", self.base_url);
    self
      .transport
      .get(
        &url,
        &[
          ("vs_currency", "usd".to_string()),
          ("order", "market_cap_desc".to_string()),
          ("per_page", per_page.to_string()),
          ("page", page.to_string()),
          ("sparkline", "false".to_string()),
        ],
      )
      .await
  }

  /// Look up the current USD price for one coin id, e.g. "bitcoin"
  #[instrument(skip(self), fields(coin_id))]
  pub async fn simple_price(&self, coin_id: &str) -> Result<SimplePrice> {
    let url = format!("{}/simple/price", self.base_url);
    self
      .transport
      .get(&url, &[("ids", coin_id.to_string()), ("vs_currencies", "usd".to_string())])
      .await
  }

  /// Base URL this instance talks to
  pub fn base_url(&self) -> &str {
    &self.base_url
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use governor::{Quota, RateLimiter};
  use std::num::NonZeroU32;
  use wiremock::matchers::{method, path, query_param};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  fn endpoints(base_url: String) -> CoinGeckoEndpoints {
    let quota = Quota::per_minute(NonZeroU32::new(600).unwrap());
    CoinGeckoEndpoints::new(
      Arc::new(Transport::new(5).unwrap()),
      Arc::new(RateLimiter::direct(quota)),
      base_url,
    )
  }

  #[tokio::test]
  async fn test_coins_markets_query_shape() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/coins/markets"))
      .and(query_param("vs_currency", "usd"))
      .and(query_param("order", "market_cap_desc"))
      .and(query_param("per_page", "250"))
      .and(query_param("page", "3"))
      .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
        {"id": "bitcoin", "symbol": "btc", "name": "Bitcoin", "market_cap_rank": 1}
      ])))
      .mount(&server)
      .await;

    let records = endpoints(server.uri()).coins_markets(3, 250).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id.as_deref(), Some("bitcoin"));
  }

  #[tokio::test]
  async fn test_simple_price() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/simple/price"))
      .and(query_param("ids", "bitcoin"))
      .and(query_param("vs_currencies", "usd"))
      .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "bitcoin": {"usd": 66950.0}
      })))
      .mount(&server)
      .await;

    let prices = endpoints(server.uri()).simple_price("bitcoin").await.unwrap();
    assert_eq!(prices["bitcoin"]["usd"], 66950.0);
  }

  #[tokio::test]
  async fn test_rate_limiter_blocks_excess_calls() {
    // Burst of one: the second and third calls must wait for refill slots.
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/coins/markets"))
      .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
      .mount(&server)
      .await;

    let quota =
      Quota::per_minute(NonZeroU32::new(240).unwrap()).allow_burst(NonZeroU32::new(1).unwrap());
    let endpoints = CoinGeckoEndpoints::new(
      Arc::new(Transport::new(5).unwrap()),
      Arc::new(RateLimiter::direct(quota)),
      server.uri(),
    );

    let start = std::time::Instant::now();
    for page in 1..=3 {
      endpoints.coins_markets(page, 250).await.unwrap();
    }
    // 240/min = one slot every 250ms beyond the first.
    assert!(start.elapsed() >= std::time::Duration::from_millis(400));
  }
}
