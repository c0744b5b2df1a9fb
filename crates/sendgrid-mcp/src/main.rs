//! `sendgrid-mcp` - SendGrid tools over the Model Context Protocol
//!
//! Speaks JSON-RPC on stdin/stdout; logs go to stderr.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod config;
mod protocol;
mod server;
#[cfg(test)]
mod testing;
mod transport;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sendgrid_mcp_client::SendGridClient;

use config::Config;
use server::McpServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging; stdout carries the protocol
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "sendgrid_mcp=info,sendgrid_mcp_core=info,sendgrid_mcp_client=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env()?;
    let client = SendGridClient::new(config.api_key)?
        .with_base_url(&config.base_url)
        .with_context(|| format!("invalid SendGrid base URL {}", config.base_url))?;

    info!(base_url = %client.base_url(), "SendGrid Minimal MCP server running on stdio");

    let server = McpServer::new(client);
    transport::serve_stdio(&server).await
}
