//! Line framing for the stdio wire protocol
//!
//! The server under test writes one JSON-RPC message per line, but its
//! stdout is not assumed to be pure protocol: banners, progress output and
//! stray log lines are all tolerated and dropped. Decoding is a two-stage
//! pipeline: split into candidate lines, then parse the ones that look like
//! JSON objects. Anything that fails either stage is noise, never an error.

use serde_json::Value;

/// A line must start with this to be considered a protocol message.
///
/// Pretty-printed (multi-line) JSON is out of contract: newline is the sole
/// message delimiter on this wire.
const MESSAGE_PREFIX: char = '{';

/// Decode a raw stdout capture into the protocol messages it contains,
/// preserving their order
pub fn decode_lines(raw: &str) -> Vec<Value> {
    raw.lines().filter_map(parse_candidate).collect()
}

/// Parse a single line as a protocol message, or None if it is noise
fn parse_candidate(line: &str) -> Option<Value> {
    let trimmed = line.trim();
    if !trimmed.starts_with(MESSAGE_PREFIX) {
        return None;
    }
    match serde_json::from_str(trimmed) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!("Discarding unparseable line ({}): {}", e, trimmed);
            None
        }
    }
}
