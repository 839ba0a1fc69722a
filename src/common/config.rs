//! Configuration file handling
//!
//! The config file lets a project pin the server-under-test command so the
//! harness can be invoked without repeating it:
//!
//! ```toml
//! [server]
//! command = "cargo"
//! args = ["run", "--bin", "arkavo", "--", "serve"]
//! cwd = "/path/to/server"
//!
//! [timeouts]
//! response_secs = 30
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::paths::config_path;
use super::{Error, Result};

/// Main configuration structure
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Server-under-test launch settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Timeout settings
    #[serde(default)]
    pub timeouts: Timeouts,
}

/// How to launch the server under test
#[derive(Debug, Deserialize, Default, Clone)]
pub struct ServerConfig {
    /// Executable to run (resolved via PATH when not an explicit path)
    pub command: Option<String>,

    /// Arguments to pass to the server
    #[serde(default)]
    pub args: Vec<String>,

    /// Working directory for the server process
    pub cwd: Option<PathBuf>,
}

/// Timeout settings in seconds
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct Timeouts {
    /// How long to wait for the server to answer a request batch and exit.
    /// The 30 second default matches a `cargo run` server that may compile
    /// first; tighten it for prebuilt binaries.
    #[serde(default = "default_response")]
    pub response_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            response_secs: default_response(),
        }
    }
}

fn default_response() -> u64 {
    30
}

impl Config {
    /// Load configuration from the default config file
    ///
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = config_path() {
            if path.exists() {
                let content = std::fs::read_to_string(&path)?;
                return toml::from_str(&content)
                    .map_err(|e| Error::ConfigParse(e.to_string()));
            }
        }
        Ok(Self::default())
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::ConfigParse(e.to_string()))
    }
}

/// Resolve a server command name to an executable path
///
/// Explicit paths are used as-is; bare names are searched on PATH
pub fn resolve_program(command: &str) -> Result<PathBuf> {
    let raw = Path::new(command);
    if raw.components().count() > 1 {
        return Ok(raw.to_path_buf());
    }
    which::which(command).map_err(|_| {
        Error::Config(format!(
            "Server command '{}' not found on PATH",
            command
        ))
    })
}
