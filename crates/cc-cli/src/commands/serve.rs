use anyhow::Result;
use cc_core::Config;
use clap::Args;

#[derive(Args, Debug)]
pub struct ServeCommand {
  /// Bind host (overrides CC_HOST)
  #[arg(long)]
  host: Option<String>,

  /// Bind port (overrides CC_PORT)
  #[arg(long)]
  port: Option<u16>,
}

impl ServeCommand {
  pub async fn execute(self, mut config: Config) -> Result<()> {
    if let Some(host) = self.host {
      config.host = host;
    }
    if let Some(port) = self.port {
      config.port = port;
    }

    cc_server::start_server(config).await?;
    Ok(())
  }
}
