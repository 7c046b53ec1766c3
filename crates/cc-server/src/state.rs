//! Shared application state for the webserver

use cc_catalog::{CatalogCache, PriceResolver, RefreshCoordinator, RefreshTracker, SnapshotStore};
use cc_client::CatalogClient;
use cc_core::{Config, Result};
use std::sync::Arc;

/// Shared application state passed to all route handlers
#[derive(Clone)]
pub struct AppState {
  pub config: Arc<Config>,
  pub client: Arc<CatalogClient>,
  pub cache: Arc<CatalogCache>,
  pub tracker: RefreshTracker,
  pub coordinator: Arc<RefreshCoordinator>,
  pub resolver: Arc<PriceResolver>,
}

impl AppState {
  /// Wire up the domain objects from configuration
  pub fn from_config(config: Config) -> Result<Self> {
    let client = Arc::new(CatalogClient::new(&config)?);
    let cache = Arc::new(CatalogCache::new(SnapshotStore::new(&config.snapshot_path)));
    let tracker = RefreshTracker::new();
    let coordinator = Arc::new(RefreshCoordinator::new(
      Arc::clone(&client),
      &config,
      tracker.clone(),
      Arc::clone(&cache),
    ));
    let resolver =
      Arc::new(PriceResolver::new(Arc::clone(&client), config.quote_asset.clone()));

    Ok(Self { config: Arc::new(config), client, cache, tracker, coordinator, resolver })
  }
}
