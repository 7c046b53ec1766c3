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

//! HTTP transport layer shared by all endpoint modules

use cc_core::{Error, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error};

/// Thin wrapper around a reqwest client with a bounded timeout.
///
/// Calls are not retried: each component documents its own fallback policy
/// and a failed request surfaces as an [`Error::Http`] for the caller to
/// absorb or report.
pub struct Transport {
  client: Client,
  timeout: Duration,
}

impl Transport {
  /// Create a new transport instance
  pub fn new(timeout_secs: u64) -> Result<Self> {
    let timeout = Duration::from_secs(timeout_secs);
    let client = Client::builder()
      .timeout(timeout)
      .user_agent(concat!("cc-client/", env!("CARGO_PKG_VERSION")))
      .build()
      .map_err(|e| Error::Http(format!("Failed to create HTTP client: {}", e)))?;

    Ok(Self { client, timeout })
  }

  /// Make a GET request and deserialize the JSON response
  pub async fn get<T>(&self, url: &str, query: &[(&str, String)]) -> Result<T>
  where
    T: DeserializeOwned,
  {
    debug!("Making request to: {}", url);

    let response = self
      .client
      .get(url)
      .query(query)
      .header("accept", "application/json")
      .send()
      .await
      .map_err(|e| Error::Http(format!("Request failed: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
      error!("Request to {} failed with status: {}", url, status);
      return Err(Error::Http(format!("HTTP error: {}", status)));
    }

    let text = response
      .text()
      .await
      .map_err(|e| Error::Http(format!("Failed to read response body: {}", e)))?;

    debug!("Response body length: {} bytes", text.len());

    serde_json::from_str::<T>(&text).map_err(|e| {
      error!("Failed to parse JSON response: {}", e);
      Error::Parse(format!(
        "Failed to parse response: {}. Response: {}",
        e,
        &text[..std::cmp::min(200, text.len())]
      ))
    })
  }

  /// Get request timeout duration
  pub fn timeout(&self) -> Duration {
    self.timeout
  }
}
