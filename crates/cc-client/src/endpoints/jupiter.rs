use crate::transport::Transport;
use cc_core::Result;
use std::sync::Arc;
use tracing::instrument;

/// Jupiter lend API endpoints
///
/// The catalog only proxies this service; responses are passed through as
/// untyped JSON so upstream schema changes never break the endpoint.
pub struct JupiterEndpoints {
  transport: Arc<Transport>,
  base_url: String,
}

impl JupiterEndpoints {
  /// Create a new Jupiter endpoints instance
  pub fn new(transport: Arc<Transport>, base_url: String) -> Self {
    Self { transport, base_url }
  }

  /// Get the lend/earn positions for one wallet address
  #[instrument(skip(self), fields(wallet))]
  pub async fn lend_positions(&self, wallet: &str) -> Result<serde_json::Value> {
    let url = format!("{}/lend/v1/earn/positions", self.base_url);
    self.transport.get(&url, &[("users", wallet.to_string())]).await
  }

  /// Base URL this instance talks to
  pub fn base_url(&self) -> &str {
    &self.base_url
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use wiremock::matchers::{method, path, query_param};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  #[tokio::test]
  async fn test_lend_positions_passthrough() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/lend/v1/earn/positions"))
      .and(query_param("users", "9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin"))
      .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
        {"token": {"symbol": "jupUSDC"}, "shares": "12.5"}
      ])))
      .mount(&server)
      .await;

    let endpoints =
      JupiterEndpoints::new(Arc::new(Transport::new(5).unwrap()), server.uri());
    let positions = endpoints
      .lend_positions("9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin")
      .await
      .unwrap();
    assert!(positions.is_array());
  }
}
