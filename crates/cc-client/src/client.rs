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

use crate::endpoints::{
  binance::BinanceEndpoints, coingecko::CoinGeckoEndpoints, jupiter::JupiterEndpoints,
};

use crate::transport::Transport;
use cc_core::{Config, Result};
use governor::{
  Quota, RateLimiter,
  clock::DefaultClock,
  middleware::NoOpMiddleware,
  state::{InMemoryState, NotKeyed},
};
use std::num::NonZeroU32;
use std::sync::Arc;

/// Direct (not keyed) governor rate limiter used for CoinGecko calls
pub type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>;

/// Main client for the catalog's upstream collaborators
///
/// Provides access to the Binance, CoinGecko and Jupiter endpoints through
/// organized endpoint modules. Handles rate limiting and transport concerns
/// automatically; the CoinGecko markets listing shares one limiter so a
/// refresh stays inside the public API quota.
pub struct CatalogClient {
  rate_limiter: Arc<DirectRateLimiter>,
  transport: Arc<Transport>,
  coingecko_base_url: String,
  binance_base_url: String,
  jupiter_base_url: String,
}

impl CatalogClient {
  /// Create a new client from configuration
  ///
  /// # Errors
  ///
  /// Returns an error if the HTTP client cannot be created or the
  /// configured rate limit is zero.
  pub fn new(config: &Config) -> Result<Self> {
    let rate_limit = NonZeroU32::new(config.rate_limit).unwrap_or_else(|| {
      NonZeroU32::new(cc_core::DEFAULT_RATE_LIMIT).expect("DEFAULT_RATE_LIMIT must be non-zero")
    });
    let quota = Quota::per_minute(rate_limit);
    let rate_limiter = Arc::new(RateLimiter::direct(quota));

    let transport = Arc::new(Transport::new(config.timeout_secs)?);

    Ok(Self {
      rate_limiter,
      transport,
      coingecko_base_url: config.coingecko_base_url.clone(),
      binance_base_url: config.binance_base_url.clone(),
      jupiter_base_url: config.jupiter_base_url.clone(),
    })
  }

  /// Get access to the Binance endpoints
  pub fn binance(&self) -> BinanceEndpoints {
    BinanceEndpoints::new(self.transport.clone(), self.binance_base_url.clone())
  }

  /// Get access to the CoinGecko endpoints
  ///
  /// The markets listing waits on the shared rate limiter before each call.
  pub fn coingecko(&self) -> CoinGeckoEndpoints {
    CoinGeckoEndpoints::new(
      self.transport.clone(),
      self.rate_limiter.clone(),
      self.coingecko_base_url.clone(),
    )
  }

  /// Get access to the Jupiter lend endpoints
  pub fn jupiter(&self) -> JupiterEndpoints {
    JupiterEndpoints::new(self.transport.clone(), self.jupiter_base_url.clone())
  }
}
