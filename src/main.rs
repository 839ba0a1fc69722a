//! MCP Conformance Harness CLI
//!
//! Launches a server under test, drives it through scripted JSON-RPC
//! exchanges on its standard streams, and validates the responses against
//! the protocol's response schemas.

use clap::Parser;
use mcp_conformance::commands::Commands;
use mcp_conformance::{cli, common};

#[derive(Parser)]
#[command(name = "mcp-conformance", about = "Conformance test harness for MCP servers")]
#[command(version, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    common::logging::init();

    let cli = Cli::parse();

    match cli::dispatch(cli.command).await {
        // Conformance failures and harness errors get distinct exit codes
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    }
}
