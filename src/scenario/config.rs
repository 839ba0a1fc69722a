//! Scenario definition types
//!
//! A scenario is one named conformance case: an ordered request batch plus
//! the expectations checked against the positionally-matched responses.
//! Scenarios are either built in (see [`super::builtin`]) or loaded from a
//! YAML file, one scenario per file:
//!
//! ```yaml
//! name: initialize handshake
//! description: the server answers the handshake with a well-formed result
//! steps:
//!   - request:
//!       jsonrpc: "2.0"
//!       id: 1
//!       method: initialize
//!       params:
//!         protocolVersion: "2024-11-05"
//!         capabilities: {}
//!         clientInfo: { name: test-client, version: 1.0.0 }
//!     expect:
//!       schema: InitializeResponse
//! ```

use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

use crate::common::{Error, Result};

/// A complete conformance scenario
#[derive(Deserialize, Debug, Clone)]
pub struct Scenario {
    /// Name of the scenario
    pub name: String,
    /// Optional description of what the scenario verifies
    pub description: Option<String>,
    /// The ordered request steps; all requests are sent as one batch
    pub steps: Vec<Step>,
}

/// A single request step
#[derive(Deserialize, Debug, Clone)]
pub struct Step {
    /// The JSON-RPC request to send
    pub request: Value,
    /// Expectation checked against the response at this step's position;
    /// steps without one only feed the server (e.g. the handshake)
    pub expect: Option<Expectation>,
}

/// What a response must satisfy
#[derive(Deserialize, Debug, Clone, Default)]
pub struct Expectation {
    /// Registry schema name to validate the response against
    pub schema: Option<String>,
    /// Require the response to carry a `result` member (not an `error`)
    #[serde(default)]
    pub require_result: bool,
    /// Require either a `result` or an `error` member to be present
    #[serde(default)]
    pub require_outcome: bool,
}

/// Load a scenario from a YAML file
pub fn load_scenario(path: &Path) -> Result<Scenario> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::scenario_parse(path, e))?;
    serde_yaml::from_str(&content).map_err(|e| Error::scenario_parse(path, e))
}
