//! Tally Server - small HTTP API for data and diagnostic endpoints
//!
//! This binary serves a handful of data endpoints behind bearer-token
//! authentication, with CORS handling and a uniform JSON error envelope.

use server::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = ServerConfig::load()?;

    // Start server
    server::start_server(config).await?;

    Ok(())
}
