//! MCP Conformance Harness
//!
//! Drives an MCP server as a child process through scripted JSON-RPC
//! request batches over its standard streams and validates the responses
//! against declarative schemas, reporting path-qualified diagnostics for
//! every structural mismatch.

pub mod cli;
pub mod commands;
pub mod common;
pub mod scenario;
pub mod schema;
pub mod transport;

// Re-export commonly used types for tests
pub use common::{Error, Result};
pub use schema::{Schema, SchemaRegistry, ValidationResult};
pub use transport::{Exchange, ProcessTransport, ServerCommand};
