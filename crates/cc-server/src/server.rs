//! Server lifecycle: bind, serve, graceful shutdown

use crate::routes;
use crate::state::AppState;
use cc_core::{Config, Error, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Start the webserver; blocks until shutdown
pub async fn start_server(config: Config) -> Result<()> {
  let addr: SocketAddr = format!("{}:{}", config.host, config.port)
    .parse()
    .map_err(|e| Error::Config(format!("Invalid bind address: {}", e)))?;

  let state = Arc::new(AppState::from_config(config)?);
  let app = routes::create_router(state);

  let listener = TcpListener::bind(&addr)
    .await
    .map_err(|e| Error::Config(format!("Failed to bind to {}: {}", addr, e)))?;

  info!("Listening on http://{}", addr);
  info!("API endpoints available at http://{}/api", addr);

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|e| Error::Http(format!("Server error: {}", e)))?;

  info!("Server stopped");
  Ok(())
}

async fn shutdown_signal() {
  // Shutdown on ctrl-c; an in-flight refresh task is detached and simply
  // dies with the process, per the no-cancellation model.
  let _ = tokio::signal::ctrl_c().await;
  info!("Received shutdown signal, stopping server...");
}
