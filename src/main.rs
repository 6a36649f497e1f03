//! Entry point: read settings, start logging, serve.

use anyhow::Result;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use yapi_mcp_server::core::{Config, config::LoggingConfig};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_logging(&LoggingConfig::from_env().level);

    let mut config = Config::from_env();
    if let Err(e) = config.validate() {
        error!("{}", e);
        std::process::exit(1);
    }

    info!(
        version = %config.server.version,
        yapi = %config.yapi.base_url,
        cas = config.yapi.cas.is_some(),
        "Starting {}",
        config.server.name
    );

    yapi_mcp_server::core::run(config).await?;

    info!("Server stopped");
    Ok(())
}

/// Log to stderr; stdout carries the STDIO transport.
///
/// `RUST_LOG`, when set, takes precedence over `MCP_LOG_LEVEL`.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
