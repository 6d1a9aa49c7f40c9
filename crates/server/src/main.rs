use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod api;
mod config;

use config::ServerConfig;

#[derive(Parser, Debug)]
#[command(name = "mascarin-mcp")]
#[command(about = "MCP server exposing the Mascarin events and listings API", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, env = "MASCARIN_MCP_CONFIG", default_value = "mascarin-mcp.toml")]
    config: PathBuf,

    /// Port to listen on (overrides MCP_PORT / PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Host to bind to
    #[arg(long)]
    host: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mascarin=info,tower_http=info".into()),
        )
        .with_target(false)
        .init();

    let args = Args::parse();

    tracing::info!("Starting Mascarin MCP server");

    let mut config = ServerConfig::load(&args.config)?;
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(host) = args.host {
        config.host = host;
    }

    tracing::info!("Upstream API: {}", config.api_url);

    api::serve(config).await?;

    Ok(())
}
