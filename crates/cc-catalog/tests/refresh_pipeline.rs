//! End-to-end refresh pipeline tests against mocked collaborators

use cc_catalog::{
  CatalogCache, CatalogError, RefreshCoordinator, RefreshStatus, RefreshTracker, SnapshotStore,
};
use cc_client::CatalogClient;
use cc_core::Config;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Harness {
  coordinator: Arc<RefreshCoordinator>,
  cache: Arc<CatalogCache>,
  tracker: RefreshTracker,
  store: SnapshotStore,
  _dir: tempfile::TempDir,
}

fn harness(server: &MockServer) -> Harness {
  let dir = tempfile::tempdir().unwrap();
  let snapshot_path = dir.path().join("snapshot.json");

  let mut config = Config::default_local();
  config.binance_base_url = server.uri();
  config.coingecko_base_url = server.uri();
  config.snapshot_path = snapshot_path.to_string_lossy().into_owned();
  config.rate_limit = 600;

  let client = Arc::new(CatalogClient::new(&config).unwrap());
  let tracker = RefreshTracker::new();
  let store = SnapshotStore::new(&config.snapshot_path);
  let cache = Arc::new(CatalogCache::new(store.clone()));
  let coordinator =
    Arc::new(RefreshCoordinator::new(client, &config, tracker.clone(), Arc::clone(&cache)));

  Harness { coordinator, cache, tracker, store, _dir: dir }
}

async fn mount_exchange_info(server: &MockServer) {
  Mock::given(method("GET"))
    .and(path("/api/v3/exchangeInfo"))
    .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
      "symbols": [
        {"symbol": "BTCUSDC", "quoteAsset": "USDC", "status": "TRADING"},
        {"symbol": "ETHUSDC", "quoteAsset": "USDC", "status": "TRADING"}
      ]
    })))
    .mount(server)
    .await;
}

async fn mount_markets(server: &MockServer, body: serde_json::Value) {
  Mock::given(method("GET"))
    .and(path("/coins/markets"))
    .respond_with(ResponseTemplate::new(200).set_body_json(body))
    .mount(server)
    .await;
}

#[tokio::test]
async fn full_refresh_persists_snapshot_and_joins_tradability() {
  let server = MockServer::start().await;
  mount_exchange_info(&server).await;
  mount_markets(
    &server,
    serde_json::json!([
      {"id": "bitcoin", "symbol": "btc", "name": "Bitcoin", "market_cap_rank": 1},
      {"id": "ethereum", "symbol": "eth", "name": "Ethereum", "market_cap_rank": 2},
      {"id": "ripple", "symbol": "xrp", "name": "XRP", "market_cap_rank": 3},
      {"id": null, "symbol": "bad", "name": "Malformed"}
    ]),
  )
  .await;

  let h = harness(&server);
  h.coordinator.run().await.unwrap();

  let progress = h.tracker.snapshot().await;
  assert_eq!(progress.status, RefreshStatus::Complete);
  assert_eq!(progress.stage, "Done");
  assert!(!progress.degraded);
  assert!(progress.error_message.is_none());

  let persisted = h.store.read().unwrap();
  assert_eq!(persisted.count, 3);

  let entries = h.cache.get().await.unwrap();
  let ids: Vec<&str> = entries.coins.iter().map(|c| c.id.as_str()).collect();
  assert_eq!(ids, ["bitcoin", "ethereum", "ripple"]);
  assert!(entries.coins[0].is_tradable);
  assert!(entries.coins[1].is_tradable);
  assert!(!entries.coins[2].is_tradable);
}

#[tokio::test]
async fn successful_refresh_invalidates_the_cache() {
  let server = MockServer::start().await;
  mount_exchange_info(&server).await;
  mount_markets(
    &server,
    serde_json::json!([
      {"id": "bitcoin", "symbol": "btc", "name": "Bitcoin", "market_cap_rank": 1}
    ]),
  )
  .await;

  let h = harness(&server);

  // Seed an older snapshot and warm the cache with it.
  h.coordinator.run().await.unwrap();
  assert_eq!(h.cache.get().await.unwrap().coins.len(), 1);

  // Next refresh observes new upstream data; the warmed cache must not
  // serve the stale entries afterwards.
  server.reset().await;
  mount_exchange_info(&server).await;
  mount_markets(
    &server,
    serde_json::json!([
      {"id": "bitcoin", "symbol": "btc", "name": "Bitcoin", "market_cap_rank": 1},
      {"id": "solana", "symbol": "sol", "name": "Solana", "market_cap_rank": 2}
    ]),
  )
  .await;

  h.coordinator.run().await.unwrap();
  assert_eq!(h.cache.get().await.unwrap().coins.len(), 2);
}

#[tokio::test]
async fn zero_records_completes_with_distinct_stage() {
  let server = MockServer::start().await;
  mount_exchange_info(&server).await;
  mount_markets(&server, serde_json::json!([])).await;

  let h = harness(&server);
  h.coordinator.run().await.unwrap();

  let progress = h.tracker.snapshot().await;
  assert_eq!(progress.status, RefreshStatus::Complete);
  assert_eq!(progress.stage, "No data fetched");

  // No snapshot was written.
  assert!(matches!(h.store.read(), Err(CatalogError::NotFound(_))));
}

#[tokio::test]
async fn concurrent_refresh_is_rejected_with_conflict() {
  let server = MockServer::start().await;
  let h = harness(&server);

  h.tracker.try_begin().await.unwrap();
  h.tracker.set_stage("Fetching CoinGecko page 1/12").await;

  let result = h.coordinator.run().await;
  assert!(matches!(result, Err(CatalogError::Conflict)));

  // The running refresh's progress is untouched by the rejection.
  let progress = h.tracker.snapshot().await;
  assert_eq!(progress.status, RefreshStatus::Running);
  assert_eq!(progress.stage, "Fetching CoinGecko page 1/12");
}

#[tokio::test]
async fn catalog_fetch_failure_lands_in_error_state() {
  let server = MockServer::start().await;
  mount_exchange_info(&server).await;
  Mock::given(method("GET"))
    .and(path("/coins/markets"))
    .respond_with(ResponseTemplate::new(503))
    .mount(&server)
    .await;

  let h = harness(&server);
  h.coordinator.run().await.unwrap();

  let progress = h.tracker.snapshot().await;
  assert_eq!(progress.status, RefreshStatus::Error);
  assert!(progress.error_message.is_some());
}

#[tokio::test]
async fn exchange_outage_degrades_but_completes() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/api/v3/exchangeInfo"))
    .respond_with(ResponseTemplate::new(451))
    .mount(&server)
    .await;
  mount_markets(
    &server,
    serde_json::json!([
      {"id": "bitcoin", "symbol": "btc", "name": "Bitcoin", "market_cap_rank": 1},
      {"id": "tether", "symbol": "usdt", "name": "Tether", "market_cap_rank": 2}
    ]),
  )
  .await;

  let h = harness(&server);
  h.coordinator.run().await.unwrap();

  let progress = h.tracker.snapshot().await;
  assert_eq!(progress.status, RefreshStatus::Complete);
  assert!(progress.degraded);

  // The fallback pair set still marks majors as tradable.
  let entries = h.cache.get().await.unwrap();
  assert!(entries.coins[0].is_tradable);
  assert!(!entries.coins[1].is_tradable);
}

#[tokio::test]
async fn spawned_refresh_reports_through_progress_only() {
  let server = MockServer::start().await;
  mount_exchange_info(&server).await;
  mount_markets(
    &server,
    serde_json::json!([
      {"id": "bitcoin", "symbol": "btc", "name": "Bitcoin", "market_cap_rank": 1}
    ]),
  )
  .await;

  let h = harness(&server);
  Arc::clone(&h.coordinator).spawn().await.unwrap();

  // Poll the tracker until the detached task finishes.
  for _ in 0..100 {
    if h.tracker.snapshot().await.status != RefreshStatus::Running {
      break;
    }
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
  }

  let progress = h.tracker.snapshot().await;
  assert_eq!(progress.status, RefreshStatus::Complete);
  assert_eq!(h.store.read().unwrap().count, 1);
}
