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

//! Refresh lifecycle coordination

use crate::cache::CatalogCache;
use crate::error::CatalogResult;
use crate::fetcher::MarketCatalogFetcher;
use crate::pairs::PairRegistry;
use crate::progress::RefreshTracker;
use crate::snapshot::{SnapshotBuilder, SnapshotStore};
use cc_client::CatalogClient;
use cc_core::Config;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Owns the refresh pipeline: single-flight entry, progress reporting,
/// error capture, and cache invalidation on success.
///
/// State machine: `idle -> running -> {complete, error}`. A second refresh
/// while one is `running` is rejected with `Conflict`; it is never queued.
/// Once started, a refresh runs to completion or failure; there is no
/// mid-flight cancellation.
pub struct RefreshCoordinator {
  client: Arc<CatalogClient>,
  tracker: RefreshTracker,
  cache: Arc<CatalogCache>,
  store: SnapshotStore,
  quote_asset: String,
  top_n: u32,
}

impl RefreshCoordinator {
  pub fn new(
    client: Arc<CatalogClient>,
    config: &Config,
    tracker: RefreshTracker,
    cache: Arc<CatalogCache>,
  ) -> Self {
    Self {
      client,
      tracker,
      cache,
      store: SnapshotStore::new(config.snapshot_path.clone()),
      quote_asset: config.quote_asset.clone(),
      top_n: config.top_n,
    }
  }

  pub fn tracker(&self) -> &RefreshTracker {
    &self.tracker
  }

  /// Start a refresh on a detached task.
  ///
  /// Returns `Conflict` without side effects when a refresh is already
  /// running. The spawned task's outcome is observable only through the
  /// progress record.
  pub async fn spawn(self: Arc<Self>) -> CatalogResult<()> {
    self.tracker.try_begin().await?;
    tokio::spawn(async move {
      self.execute().await;
    });
    Ok(())
  }

  /// Run a refresh inline (used by the CLI); same single-flight gate
  pub async fn run(&self) -> CatalogResult<()> {
    self.tracker.try_begin().await?;
    self.execute().await;
    Ok(())
  }

  /// The pipeline body. Assumes the tracker was just reset to `running`.
  async fn execute(&self) {
    self.tracker.set_stage("Fetching Binance symbols").await;
    let registry = PairRegistry::new(Arc::clone(&self.client), self.quote_asset.clone());
    let pairs = registry.fetch_tradable_pairs().await;
    if pairs.degraded {
      warn!("Refreshing with the fallback pair set; tradability accuracy is degraded");
      self.tracker.set_degraded(true).await;
    }

    let fetcher = MarketCatalogFetcher::new(Arc::clone(&self.client));
    let fetch = fetcher.fetch_top(self.top_n, &self.tracker).await;

    if let Some(e) = fetch.error {
      if !fetch.records.is_empty() {
        warn!("Discarding {} records accumulated before the failure", fetch.records.len());
      }
      error!("Refresh failed: {}", e);
      self.tracker.fail(&e.to_string()).await;
      return;
    }

    if fetch.records.is_empty() {
      // Absence of upstream data is not a coordinator fault; the previous
      // snapshot stays in place.
      info!("No data fetched from the market-data source");
      self.tracker.complete("No data fetched").await;
      return;
    }

    self.tracker.set_stage("Processing and saving data").await;
    self.tracker.set_counts(0, fetch.records.len() as u32).await;

    let snapshot = SnapshotBuilder::new(self.quote_asset.clone()).build(&fetch.records, &pairs);
    self.tracker.set_counts(snapshot.count as u32, fetch.records.len() as u32).await;

    if let Err(e) = self.store.write(&snapshot) {
      error!("Refresh failed: {}", e);
      self.tracker.fail(&e.to_string()).await;
      return;
    }

    self.cache.invalidate().await;
    info!("Refresh complete: {} entries", snapshot.count);
    self.tracker.complete("Done").await;
  }
}
