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

//! In-memory snapshot cache with explicit invalidation

use crate::error::CatalogResult;
use crate::snapshot::{Snapshot, SnapshotStore};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Holds the last-loaded snapshot in memory.
///
/// The first `get` after startup or an `invalidate` re-reads durable
/// storage; until then readers share one `Arc<Snapshot>`. Storage errors
/// (no snapshot yet, corrupt document) surface to the caller unchanged.
pub struct CatalogCache {
  store: SnapshotStore,
  cached: RwLock<Option<Arc<Snapshot>>>,
}

impl CatalogCache {
  pub fn new(store: SnapshotStore) -> Self {
    Self { store, cached: RwLock::new(None) }
  }

  /// Get the current snapshot, loading it from storage on first access
  pub async fn get(&self) -> CatalogResult<Arc<Snapshot>> {
    if let Some(snapshot) = self.cached.read().await.as_ref() {
      debug!("Catalog cache hit ({} entries)", snapshot.count);
      return Ok(Arc::clone(snapshot));
    }

    let mut guard = self.cached.write().await;
    // Another task may have loaded while we waited for the write lock.
    if let Some(snapshot) = guard.as_ref() {
      return Ok(Arc::clone(snapshot));
    }

    let snapshot = Arc::new(self.store.read()?);
    info!(
      "Loaded snapshot with {} entries from {}",
      snapshot.count,
      self.store.path().display()
    );
    *guard = Some(Arc::clone(&snapshot));
    Ok(snapshot)
  }

  /// Drop the memoized snapshot; the next `get` re-reads storage
  pub async fn invalidate(&self) {
    let mut guard = self.cached.write().await;
    if guard.take().is_some() {
      debug!("Catalog cache invalidated");
    }
  }
}
