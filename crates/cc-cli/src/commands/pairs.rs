use anyhow::Result;
use cc_catalog::PairRegistry;
use cc_client::CatalogClient;
use cc_core::Config;
use clap::Args;
use std::sync::Arc;

#[derive(Args, Debug)]
pub struct PairsCommand {
  /// Quote asset to filter on (overrides CC_QUOTE_ASSET)
  #[arg(long)]
  quote: Option<String>,

  /// Only print the pair count
  #[arg(long)]
  count: bool,
}

impl PairsCommand {
  pub async fn execute(self, config: Config) -> Result<()> {
    let quote_asset = self.quote.unwrap_or_else(|| config.quote_asset.clone());

    let client = Arc::new(CatalogClient::new(&config)?);
    let registry = PairRegistry::new(client, quote_asset.clone());
    let pairs = registry.fetch_tradable_pairs().await;

    if pairs.degraded {
      println!("Warning: exchange unreachable, showing the built-in fallback set.");
    }

    println!("{} tradable {} pairs", pairs.len(), quote_asset);
    if !self.count {
      let mut sorted: Vec<&String> = pairs.symbols().collect();
      sorted.sort();
      for pair in sorted {
        println!("{}", pair);
      }
    }

    Ok(())
  }
}
