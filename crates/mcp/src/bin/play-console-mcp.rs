// Standalone MCP server binary

use anyhow::Result;
use clap::Parser;
use play_console_mcp::{default_registry, McpServer, PublisherSettings};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "play-console-mcp")]
#[command(about = "MCP server for read-only Google Play Console access", long_about = None)]
struct Args {
    /// Path to the Google Cloud service account JSON key file
    #[arg(long, env = "GOOGLE_SERVICE_ACCOUNT_KEY")]
    service_account_key: Option<PathBuf>,

    /// Override the Android Publisher API base URL
    #[arg(long, env = "GOOGLE_PLAY_API_BASE_URL")]
    api_base_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, default_value = "30")]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing; stdout carries the protocol, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .init();

    let args = Args::parse();

    tracing::info!("Play Console MCP server starting...");
    if args.service_account_key.is_none() {
        // Not fatal: each tool call reports the missing credential itself
        tracing::warn!("GOOGLE_SERVICE_ACCOUNT_KEY is not set; tool calls will fail until it is");
    }

    let mut settings = PublisherSettings::from_key_path(args.service_account_key)
        .with_timeout(Duration::from_secs(args.timeout_secs));
    if let Some(url) = args.api_base_url {
        settings = settings.with_base_url(url);
    }

    let registry = default_registry(settings)?;
    tracing::info!("Registered {} tools", registry.len());

    let server = McpServer::new(registry);
    server.start().await?;

    Ok(())
}
