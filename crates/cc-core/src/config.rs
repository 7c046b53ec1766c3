//! Configuration management for the coin catalog service

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;
use dotenvy::dotenv;

/// Main configuration struct for the catalog service
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
  /// Base URL for the CoinGecko API
  pub coingecko_base_url: String,

  /// Base URL for the Binance spot API
  pub binance_base_url: String,

  /// Base URL for the Jupiter lend API
  pub jupiter_base_url: String,

  /// Quote asset used for the tradability check (e.g. "USDC")
  pub quote_asset: String,

  /// How many catalog records a full refresh targets
  pub top_n: u32,

  /// CoinGecko rate limit (requests per minute)
  pub rate_limit: u32,

  /// Request timeout in seconds
  pub timeout_secs: u64,

  /// Path of the persisted snapshot file
  pub snapshot_path: String,

  /// HTTP bind host
  pub host: String,

  /// HTTP bind port
  pub port: u16,

  /// Optional Binance API key (public endpoints work without it)
  pub binance_api_key: Option<String>,

  /// Optional Binance API secret
  pub binance_api_secret: Option<String>,
}

impl Config {
  /// Load configuration from environment variables
  pub fn from_env() -> Result<Self> {

    dotenv().ok();

    let coingecko_base_url =
      env::var("COINGECKO_BASE_URL").unwrap_or_else(|_| crate::COINGECKO_BASE_URL.to_string());

    let binance_base_url =
      env::var("BINANCE_BASE_URL").unwrap_or_else(|_| crate::BINANCE_BASE_URL.to_string());

    let jupiter_base_url =
      env::var("JUPITER_BASE_URL").unwrap_or_else(|_| crate::JUPITER_BASE_URL.to_string());

    let quote_asset =
      env::var("CC_QUOTE_ASSET").unwrap_or_else(|_| crate::DEFAULT_QUOTE_ASSET.to_string());

    let top_n = env::var("CC_TOP_N")
      .unwrap_or_else(|_| crate::DEFAULT_TOP_N.to_string())
      .parse()
      .map_err(|_| Error::Config("Invalid CC_TOP_N".to_string()))?;

    let rate_limit = env::var("CC_RATE_LIMIT")
      .unwrap_or_else(|_| crate::DEFAULT_RATE_LIMIT.to_string())
      .parse()
      .map_err(|_| Error::Config("Invalid CC_RATE_LIMIT".to_string()))?;

    let timeout_secs = env::var("CC_TIMEOUT_SECS")
      .unwrap_or_else(|_| crate::DEFAULT_TIMEOUT_SECS.to_string())
      .parse()
      .map_err(|_| Error::Config("Invalid CC_TIMEOUT_SECS".to_string()))?;

    let snapshot_path =
      env::var("CC_SNAPSHOT_PATH").unwrap_or_else(|_| crate::DEFAULT_SNAPSHOT_FILE.to_string());

    let host = env::var("CC_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

    let port = env::var("CC_PORT")
      .unwrap_or_else(|_| "8000".to_string())
      .parse()
      .map_err(|_| Error::Config("Invalid CC_PORT".to_string()))?;

    let binance_api_key = env::var("BINANCE_API_KEY").ok();
    let binance_api_secret = env::var("BINANCE_API_SECRET").ok();

    Ok(Config {
      coingecko_base_url,
      binance_base_url,
      jupiter_base_url,
      quote_asset,
      top_n,
      rate_limit,
      timeout_secs,
      snapshot_path,
      host,
      port,
      binance_api_key,
      binance_api_secret,
    })
  }

  /// Create a config with default values (for testing)
  pub fn default_local() -> Self {
    Config {
      coingecko_base_url: crate::COINGECKO_BASE_URL.to_string(),
      binance_base_url: crate::BINANCE_BASE_URL.to_string(),
      jupiter_base_url: crate::JUPITER_BASE_URL.to_string(),
      quote_asset: crate::DEFAULT_QUOTE_ASSET.to_string(),
      top_n: crate::DEFAULT_TOP_N,
      rate_limit: crate::DEFAULT_RATE_LIMIT,
      timeout_secs: crate::DEFAULT_TIMEOUT_SECS,
      snapshot_path: crate::DEFAULT_SNAPSHOT_FILE.to_string(),
      host: "127.0.0.1".to_string(),
      port: 8000,
      binance_api_key: None,
      binance_api_secret: None,
    }
  }
}
