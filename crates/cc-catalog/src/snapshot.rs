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

//! Snapshot build and atomic persistence

use crate::error::{CatalogError, CatalogResult};
use crate::pairs::PairSet;
use cc_client::MarketRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{info, warn};

/// One catalog entry, immutable once built.
///
/// The persisted field name records what the flag actually means; the
/// in-memory name stays short.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
  pub id: String,
  pub name: String,
  pub symbol: String,
  #[serde(rename = "is_tradable_on_binance_vs_usdc")]
  pub is_tradable: bool,
}

/// The full, atomically-replaced result of one refresh cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
  pub timestamp_utc: DateTime<Utc>,
  pub count: usize,
  pub coins: Vec<CatalogEntry>,
}

/// Joins raw market records with the tradable pair set
pub struct SnapshotBuilder {
  quote_asset: String,
}

impl SnapshotBuilder {
  pub fn new(quote_asset: impl Into<String>) -> Self {
    Self { quote_asset: quote_asset.into() }
  }

  /// Build a snapshot from raw records, preserving input order.
  ///
  /// Records missing an id, name or symbol are dropped entirely; an entry
  /// is never partially filled.
  pub fn build(&self, records: &[MarketRecord], pairs: &PairSet) -> Snapshot {
    let mut coins = Vec::with_capacity(records.len());
    let mut dropped = 0usize;

    for record in records {
      let (Some(id), Some(name), Some(symbol)) =
        (record.id.as_deref(), record.name.as_deref(), record.symbol.as_deref())
      else {
        dropped += 1;
        continue;
      };
      if id.is_empty() || name.is_empty() || symbol.is_empty() {
        dropped += 1;
        continue;
      }

      let symbol = symbol.to_uppercase();
      let is_tradable = pairs.contains(&format!("{}{}", symbol, self.quote_asset));
      coins.push(CatalogEntry {
        id: id.to_string(),
        name: name.to_string(),
        symbol,
        is_tradable,
      });
    }

    if dropped > 0 {
      warn!("Dropped {} malformed market records", dropped);
    }

    Snapshot { timestamp_utc: Utc::now(), count: coins.len(), coins }
  }
}

/// Reads and writes the persisted snapshot file with whole-file replace
/// semantics.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
  path: PathBuf,
}

impl SnapshotStore {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Persist a snapshot, fully replacing the previous file.
  ///
  /// The document is written to a temporary file in the destination
  /// directory and renamed over the target, so readers never observe a
  /// partial write and a failure leaves the previous snapshot intact.
  pub fn write(&self, snapshot: &Snapshot) -> CatalogResult<()> {
    let json = serde_json::to_vec_pretty(snapshot)
      .map_err(|e| CatalogError::Persistence(format!("Failed to serialize snapshot: {}", e)))?;

    let dir = self.path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)
      .map_err(|e| CatalogError::Persistence(format!("Failed to create temp file: {}", e)))?;
    tmp
      .write_all(&json)
      .map_err(|e| CatalogError::Persistence(format!("Failed to write snapshot: {}", e)))?;
    tmp
      .persist(&self.path)
      .map_err(|e| CatalogError::Persistence(format!("Failed to replace snapshot: {}", e)))?;

    info!("Saved snapshot with {} entries to {}", snapshot.count, self.path.display());
    Ok(())
  }

  /// Read the persisted snapshot.
  ///
  /// Fails with `NotFound` when no snapshot has been written yet and with
  /// `Corrupt` when the stored document does not parse.
  pub fn read(&self) -> CatalogResult<Snapshot> {
    let data = match std::fs::read(&self.path) {
      Ok(data) => data,
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
        return Err(CatalogError::NotFound(format!(
          "No snapshot at {}; trigger a refresh first",
          self.path.display()
        )));
      }
      Err(e) => {
        return Err(CatalogError::Persistence(format!(
          "Failed to read {}: {}",
          self.path.display(),
          e
        )));
      }
    };

    serde_json::from_slice(&data)
      .map_err(|e| CatalogError::Corrupt(format!("{}: {}", self.path.display(), e)))
  }
}
