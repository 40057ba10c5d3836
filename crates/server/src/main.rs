//! Calculator Server binary.
//!
//! Reads `.env` when present, then loads [`ServerConfig`] and serves until
//! SIGTERM or Ctrl+C.

use server::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = ServerConfig::load()?;

    server::start_server(config).await?;

    Ok(())
}
