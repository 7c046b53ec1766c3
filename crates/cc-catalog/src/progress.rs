//! Shared refresh progress state
//!
//! One writer (the active refresh) and any number of readers (status
//! queries). Readers always get a cloned record, never a partial update.

use crate::error::{CatalogError, CatalogResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Lifecycle of the refresh pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefreshStatus {
  /// No refresh has run since startup
  Idle,
  /// A refresh is in progress
  Running,
  /// The last refresh succeeded
  Complete,
  /// The last refresh failed; `error_message` holds the cause
  Error,
}

/// Snapshot of the refresh progress record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshProgress {
  pub status: RefreshStatus,
  /// Human-readable current phase, e.g. "Fetching CoinGecko page 3/12"
  pub stage: String,
  pub current: u32,
  pub total: u32,
  /// True when the trading-pair source failed and the built-in fallback
  /// set was used for the tradability join
  pub degraded: bool,
  pub error_message: Option<String>,
}

impl Default for RefreshProgress {
  fn default() -> Self {
    Self {
      status: RefreshStatus::Idle,
      stage: String::new(),
      current: 0,
      total: 0,
      degraded: false,
      error_message: None,
    }
  }
}

/// Handle to the process-wide refresh progress record.
///
/// Clones share the same underlying state. All mutation happens through
/// this handle; route handlers only ever call [`RefreshTracker::snapshot`].
#[derive(Clone, Default)]
pub struct RefreshTracker {
  inner: Arc<RwLock<RefreshProgress>>,
}

impl RefreshTracker {
  pub fn new() -> Self {
    Self { inner: Arc::new(RwLock::new(RefreshProgress::default())) }
  }

  /// Clone out the current progress record
  pub async fn snapshot(&self) -> RefreshProgress {
    self.inner.read().await.clone()
  }

  /// Atomic test-and-set entry gate for the single-flight guarantee.
  ///
  /// If a refresh is already running this returns [`CatalogError::Conflict`]
  /// and leaves the active refresh's record untouched; otherwise the record
  /// is reset to a fresh `running` state.
  pub async fn try_begin(&self) -> CatalogResult<()> {
    let mut progress = self.inner.write().await;
    if progress.status == RefreshStatus::Running {
      return Err(CatalogError::Conflict);
    }
    *progress = RefreshProgress {
      status: RefreshStatus::Running,
      stage: "Starting".to_string(),
      ..RefreshProgress::default()
    };
    Ok(())
  }

  pub async fn set_stage(&self, stage: &str) {
    let mut progress = self.inner.write().await;
    progress.stage = stage.to_string();
  }

  pub async fn set_counts(&self, current: u32, total: u32) {
    let mut progress = self.inner.write().await;
    progress.current = current;
    progress.total = total;
  }

  pub async fn set_degraded(&self, degraded: bool) {
    let mut progress = self.inner.write().await;
    progress.degraded = degraded;
  }

  /// Transition to `complete` with a final stage label
  pub async fn complete(&self, stage: &str) {
    let mut progress = self.inner.write().await;
    progress.status = RefreshStatus::Complete;
    progress.stage = stage.to_string();
  }

  /// Transition to `error` capturing a human-readable cause
  pub async fn fail(&self, message: &str) {
    let mut progress = self.inner.write().await;
    progress.status = RefreshStatus::Error;
    progress.error_message = Some(message.to_string());
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_initial_state_is_idle() {
    let tracker = RefreshTracker::new();
    let progress = tracker.snapshot().await;
    assert_eq!(progress.status, RefreshStatus::Idle);
    assert!(progress.error_message.is_none());
  }

  #[tokio::test]
  async fn test_try_begin_resets_record() {
    let tracker = RefreshTracker::new();
    tracker.set_degraded(true).await;
    tracker.fail("previous failure").await;

    tracker.try_begin().await.unwrap();
    let progress = tracker.snapshot().await;
    assert_eq!(progress.status, RefreshStatus::Running);
    assert!(!progress.degraded);
    assert!(progress.error_message.is_none());
  }

  #[tokio::test]
  async fn test_second_begin_conflicts_and_preserves_state() {
    let tracker = RefreshTracker::new();
    tracker.try_begin().await.unwrap();
    tracker.set_stage("Fetching CoinGecko page 2/12").await;
    tracker.set_counts(2, 12).await;

    let result = tracker.try_begin().await;
    assert!(matches!(result, Err(CatalogError::Conflict)));

    // The active refresh's progress record is untouched by the rejection.
    let progress = tracker.snapshot().await;
    assert_eq!(progress.status, RefreshStatus::Running);
    assert_eq!(progress.stage, "Fetching CoinGecko page 2/12");
    assert_eq!(progress.current, 2);
  }

  #[tokio::test]
  async fn test_begin_allowed_after_completion() {
    let tracker = RefreshTracker::new();
    tracker.try_begin().await.unwrap();
    tracker.complete("Done").await;
    assert!(tracker.try_begin().await.is_ok());
  }

  #[tokio::test]
  async fn test_status_serializes_lowercase() {
    let progress = RefreshProgress { status: RefreshStatus::Running, ..Default::default() };
    let json = serde_json::to_value(&progress).unwrap();
    assert_eq!(json["status"], "running");
  }
}
