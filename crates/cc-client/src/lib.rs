//! # cc-client
//!
//! Pure HTTP clients for the catalog's upstream collaborators, with no
//! persistence dependencies.
//!
//! ## Features
//!
//! - **Async/Await**: Built on tokio and reqwest
//! - **Rate Limiting**: Built-in governor rate limiting for the paginated
//!   CoinGecko markets endpoint
//! - **Type Safe**: Strongly typed responses in [`models`]
//! - **Bounded**: Every outbound call carries the configured timeout; no
//!   automatic retries
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cc_client::CatalogClient;
//! use cc_core::Config;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let client = CatalogClient::new(&config)?;
//!
//!     let info = client.binance().exchange_info().await?;
//!     println!("{} instruments listed", info.symbols.len());
//!
//!     let page = client.coingecko().coins_markets(1, 250).await?;
//!     println!("top coin: {:?}", page.first());
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod endpoints;
pub mod models;
pub mod transport;

// Re-export the main client and common types
pub use client::CatalogClient;
pub use cc_core::{Config, Error, Result};
pub use models::*;
