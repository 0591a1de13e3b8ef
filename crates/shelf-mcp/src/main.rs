//! Shelf MCP server
//!
//! Serves a read-only, access-controlled document repository to AI agents
//! over the Model Context Protocol.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use shelf_mcp::config_handlers::{ConfigAction, handle_config_command};
use shelf_mcp::{ShelfConfig, Transport, bootstrap};

/// Shelf MCP server
#[derive(Parser, Debug)]
#[command(name = "shelf-mcp", version)]
#[command(about = "MCP server for an access-controlled document repository", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, env = "SHELF_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Run the MCP server (default)
    Serve {
        /// Transport, overriding `server.transport`
        #[arg(long, value_enum)]
        transport: Option<Transport>,
        /// HTTP listen address, overriding `server.addr`
        #[arg(long)]
        addr: Option<String>,
    },
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,shelf=debug".into()),
        )
        .init();

    let args = Args::parse();
    let command = args.command.unwrap_or(Command::Serve {
        transport: None,
        addr: None,
    });

    match command {
        Command::Config { action } => {
            handle_config_command(args.config.as_deref(), action)?;
        }
        Command::Serve { transport, addr } => {
            let mut config =
                ShelfConfig::load(args.config.as_deref()).context("loading configuration")?;
            if let Some(transport) = transport {
                config.server.transport = transport;
            }
            if let Some(addr) = addr {
                config.server.addr = addr;
            }
            serve(config).await?;
        }
    }
    Ok(())
}

async fn serve(config: ShelfConfig) -> Result<()> {
    tracing::info!(
        backend = config.database.backend.as_str(),
        store = %config.database.describe(),
        "Opening document store"
    );
    let stores = bootstrap::open_stores(&config.database)
        .await
        .context("opening document store")?;
    let server = bootstrap::build_server(&config, stores);

    match config.server.transport {
        Transport::Stdio => server.serve_stdio().await?,
        Transport::Http => server.serve_http(&config.server.addr).await?,
    }
    tracing::info!("Server stopped");
    Ok(())
}
