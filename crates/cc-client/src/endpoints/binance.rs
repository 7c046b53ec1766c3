use crate::models::{ExchangeInfo, TickerPrice};
use crate::transport::Transport;
use cc_core::Result;
use std::sync::Arc;
use tracing::instrument;

/// Binance spot API endpoints
///
/// Only public, unauthenticated endpoints are used; API credentials are
/// not required for any catalog operation.
pub struct BinanceEndpoints {
  transport: Arc<Transport>,
  base_url: String,
}

impl BinanceEndpoints {
  /// Create a new Binance endpoints instance
  pub fn new(transport: Arc<Transport>, base_url: String) -> Self {
    Self { transport, base_url }
  }

  /// Get the full instrument listing
  ///
  /// Returns every pair the exchange lists, with its quote asset and
  /// trading status.
  #[instrument(skip(self))]
  pub async fn exchange_info(&self) -> Result<ExchangeInfo> {
    let url = format!("{}/api/v3/exchangeInfo", self.base_url);
    self.transport.get(&url, &[]).await
  }

  /// Get the last price for one pair symbol, e.g. "BTCUSDC"
  #[instrument(skip(self), fields(symbol))]
  pub async fn ticker_price(&self, symbol: &str) -> Result<TickerPrice> {
    let url = format!("{}/api/v3/ticker/price", self.base_url);
    self.transport.get(&url, &[("symbol", symbol.to_string())]).await
  }

  /// Base URL this instance talks to
  pub fn base_url(&self) -> &str {
    &self.base_url
  }
}
