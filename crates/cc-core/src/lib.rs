pub mod config;
pub mod error;

pub use config::Config;
pub use error::{Error, Result};

/// Default base URL for the CoinGecko API
pub const COINGECKO_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// Default base URL for the Binance spot API
pub const BINANCE_BASE_URL: &str = "https://api.binance.com";

/// Default base URL for the Jupiter lend API
pub const JUPITER_BASE_URL: &str = "https://lite-api.jup.ag";

/// Quote asset used for the tradability check
pub const DEFAULT_QUOTE_ASSET: &str = "USDC";

/// How many catalog records a full refresh targets
pub const DEFAULT_TOP_N: u32 = 3000;

/// Records per CoinGecko markets page
pub const PAGE_SIZE: u32 = 250;

/// CoinGecko public API allows roughly 10-30 calls per minute;
/// stay on the conservative end.
pub const DEFAULT_RATE_LIMIT: u32 = 10; // requests per minute

/// Outbound request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Snapshot file written next to the working directory unless configured
pub const DEFAULT_SNAPSHOT_FILE: &str = "crypto_tradability.json";
