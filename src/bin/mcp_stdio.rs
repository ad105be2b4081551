//! MCP server over stdio: one JSON-RPC message per line on stdin, responses on stdout.

use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use travel_widgets::utils::logger;
use travel_widgets::{CliConfig, McpServer, ToolService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = CliConfig::parse();
    logger::init_stdio_logger(cli.verbose);

    let config = cli.resolve().context("invalid configuration")?;
    let tools = ToolService::from_config(config.as_ref()).context("failed to build tool service")?;

    tracing::info!("MCP stdio server ready");
    McpServer::new(Arc::new(tools))
        .run()
        .await
        .context("MCP stdio loop failed")
}
