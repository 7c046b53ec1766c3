use anyhow::Result;
use cc_catalog::{CatalogCache, RefreshCoordinator, RefreshStatus, RefreshTracker, SnapshotStore};
use cc_client::CatalogClient;
use cc_core::Config;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;

#[derive(Args, Debug)]
pub struct RefreshCommand {
  /// Number of top-ranked records to fetch (overrides CC_TOP_N)
  #[arg(long)]
  top_n: Option<u32>,
}

impl RefreshCommand {
  pub async fn execute(self, mut config: Config) -> Result<()> {
    if let Some(top_n) = self.top_n {
      config.top_n = top_n;
    }

    let client = Arc::new(CatalogClient::new(&config)?);
    let tracker = RefreshTracker::new();
    let cache = Arc::new(CatalogCache::new(SnapshotStore::new(&config.snapshot_path)));
    let coordinator =
      Arc::new(RefreshCoordinator::new(client, &config, tracker.clone(), cache));

    let bar = ProgressBar::new(0);
    bar.set_style(
      ProgressStyle::with_template("{spinner:.green} {msg} [{bar:40.cyan/blue}] {pos}/{len}")?
        .progress_chars("=>-"),
    );

    // Mirror the shared progress record onto the terminal while the
    // pipeline runs.
    let poller = {
      let tracker = tracker.clone();
      let bar = bar.clone();
      tokio::spawn(async move {
        loop {
          let progress = tracker.snapshot().await;
          if progress.total > 0 {
            bar.set_length(progress.total as u64);
            bar.set_position(progress.current as u64);
          }
          bar.set_message(progress.stage.clone());
          if matches!(progress.status, RefreshStatus::Complete | RefreshStatus::Error) {
            break;
          }
          tokio::time::sleep(Duration::from_millis(200)).await;
        }
      })
    };

    coordinator.run().await?;
    let _ = poller.await;

    let progress = tracker.snapshot().await;
    match progress.status {
      RefreshStatus::Complete => {
        bar.finish_with_message(progress.stage.clone());
        if progress.degraded {
          println!(
            "Warning: the exchange was unreachable; tradability was joined against the fallback pair set."
          );
        }
        println!("Snapshot written to {}", config.snapshot_path);
        Ok(())
      }
      RefreshStatus::Error => {
        bar.abandon();
        anyhow::bail!(
          "Refresh failed: {}",
          progress.error_message.unwrap_or_else(|| "unknown error".to_string())
        )
      }
      _ => Ok(()),
    }
  }
}
