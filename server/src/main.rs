//! VectorForge MCP Server Entry Point
//!
//! Serves the `store_memory` and `recall_memory` tools over stdio. Logs go
//! to stderr; stdout carries only protocol messages.

use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vectorforge_memory::ProcessEngine;
use vectorforge_mcp::{mcp::McpServer, Cli, ToolBridge};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vectorforge_mcp=info,vectorforge_memory=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match cli.engine_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to resolve VectorForge root: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting VectorForge MCP server");
    tracing::info!("Engine: {:?}", config.binary);
    tracing::info!("Working directory: {:?}", config.working_dir);
    if let Some(timeout) = config.timeout {
        tracing::info!("Engine timeout: {:?}", timeout);
    }

    let bridge = ToolBridge::new(Arc::new(ProcessEngine::new(config)));
    let mut server = McpServer::new(bridge);
    if let Err(e) = server.run().await {
        tracing::error!("Fatal error in MCP server: {}", e);
        std::process::exit(1);
    }
}
