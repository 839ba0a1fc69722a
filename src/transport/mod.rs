//! Transport to the server under test
//!
//! The wire contract is line-delimited JSON-RPC over the child process's
//! standard streams: requests down stdin, responses up stdout, one message
//! per newline-terminated line, stderr captured but never interpreted.

pub mod framing;
mod process;

pub use process::{Exchange, ProcessTransport, ServerCommand};
