//! CLI command definitions
//!
//! Defines the clap commands for the conformance harness.

use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Run the built-in conformance scenarios against a server
    Run {
        /// Server executable to test (falls back to the config file)
        server: Option<String>,

        /// Arguments to pass to the server
        #[arg(last = true)]
        args: Vec<String>,

        /// Run only the named scenario (e.g. "initialize")
        #[arg(long)]
        only: Option<String>,

        /// Seconds to wait for the server to answer a request batch
        #[arg(long)]
        timeout: Option<u64>,

        /// Working directory for the server process
        #[arg(long)]
        cwd: Option<PathBuf>,

        /// Show server stderr and skipped steps
        #[arg(long, short)]
        verbose: bool,
    },

    /// Run scenarios defined in YAML files
    Test {
        /// Paths to YAML scenario files
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Server executable to test (falls back to the config file)
        #[arg(long)]
        server: Option<String>,

        /// Arguments to pass to the server
        #[arg(last = true)]
        args: Vec<String>,

        /// Seconds to wait for the server to answer a request batch
        #[arg(long)]
        timeout: Option<u64>,

        /// Working directory for the server process
        #[arg(long)]
        cwd: Option<PathBuf>,

        /// Show server stderr and skipped steps
        #[arg(long, short)]
        verbose: bool,
    },

    /// List built-in scenarios and registered schemas
    List,
}
