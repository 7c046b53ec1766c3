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

//! Paginated market-catalog fetch from the market-data source

use crate::progress::RefreshTracker;
use cc_client::{CatalogClient, MarketRecord};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Outcome of a catalog fetch: everything accumulated before the first
/// failure, paired with the failure when one occurred.
pub struct CatalogFetch {
  pub records: Vec<MarketRecord>,
  pub error: Option<cc_core::Error>,
}

/// Pages through the market listing until the requested depth is reached
/// or the source runs out of data.
pub struct MarketCatalogFetcher {
  client: Arc<CatalogClient>,
  page_size: u32,
}

impl MarketCatalogFetcher {
  pub fn new(client: Arc<CatalogClient>) -> Self {
    Self { client, page_size: cc_core::PAGE_SIZE }
  }

  #[cfg(test)]
  fn with_page_size(client: Arc<CatalogClient>, page_size: u32) -> Self {
    Self { client, page_size }
  }

  /// Fetch up to `n` records ordered by descending market cap.
  ///
  /// Page progress is reported through `tracker`. A page failure aborts the
  /// fetch; the caller receives the records accumulated so far together
  /// with the error. A short page means the source has no more data and
  /// ends the fetch cleanly.
  pub async fn fetch_top(&self, n: u32, tracker: &RefreshTracker) -> CatalogFetch {
    let total_pages = n.div_ceil(self.page_size).max(1);
    let mut records: Vec<MarketRecord> = Vec::with_capacity(n as usize);

    for page in 1..=total_pages {
      tracker.set_stage(&format!("Fetching CoinGecko page {}/{}", page, total_pages)).await;
      tracker.set_counts(page, total_pages).await;

      match self.client.coingecko().coins_markets(page, self.page_size).await {
        Ok(batch) => {
          let short_page = (batch.len() as u32) < self.page_size;
          records.extend(batch);
          if short_page {
            debug!("Page {} returned fewer than {} records, stopping", page, self.page_size);
            break;
          }
        }
        Err(e) => {
          warn!("Markets page {} failed: {}; aborting fetch", page, e);
          return CatalogFetch { records, error: Some(e) };
        }
      }
    }

    records.truncate(n as usize);
    info!("Fetched {} market records", records.len());
    CatalogFetch { records, error: None }
  }
}
