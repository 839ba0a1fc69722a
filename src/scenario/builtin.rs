//! The built-in conformance scenarios
//!
//! These cover the three core MCP exchanges: the initialize handshake, the
//! tool listing, and a tool invocation. Request bodies use protocol version
//! 2024-11-05 and a fixed test-client identity.

use serde_json::{json, Value};

use super::config::{Expectation, Scenario, Step};

/// All built-in scenarios, in execution order
pub fn all() -> Vec<Scenario> {
    vec![initialize(), tools_list(), tool_call()]
}

/// The initialize request every scenario opens with
fn initialize_request() -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "initialize",
        "params": {
            "protocolVersion": "2024-11-05",
            "capabilities": {},
            "clientInfo": {
                "name": "test-client",
                "version": "1.0.0"
            }
        }
    })
}

/// Initialize handshake: the response must match `InitializeResponse`
pub fn initialize() -> Scenario {
    Scenario {
        name: "initialize".to_string(),
        description: Some(
            "Initialize response carries protocolVersion, capabilities and serverInfo"
                .to_string(),
        ),
        steps: vec![Step {
            request: initialize_request(),
            expect: Some(Expectation {
                schema: Some("InitializeResponse".to_string()),
                ..Default::default()
            }),
        }],
    }
}

/// Tool listing: handshake first, then tools/list must match `ToolsListResponse`
pub fn tools_list() -> Scenario {
    Scenario {
        name: "tools-list".to_string(),
        description: Some(
            "tools/list returns a tools array whose entries carry name and inputSchema"
                .to_string(),
        ),
        steps: vec![
            Step {
                request: initialize_request(),
                expect: None,
            },
            Step {
                request: json!({
                    "jsonrpc": "2.0",
                    "id": 2,
                    "method": "tools/list",
                    "params": {}
                }),
                expect: Some(Expectation {
                    schema: Some("ToolsListResponse".to_string()),
                    ..Default::default()
                }),
            },
        ],
    }
}

/// Tool invocation: the response must carry a result or an error member.
/// Whether the tool did anything useful is the server's business, not ours.
pub fn tool_call() -> Scenario {
    Scenario {
        name: "tool-call".to_string(),
        description: Some(
            "tools/call produces a well-formed response, successful or not".to_string(),
        ),
        steps: vec![
            Step {
                request: initialize_request(),
                expect: None,
            },
            Step {
                request: json!({
                    "jsonrpc": "2.0",
                    "id": 2,
                    "method": "tools/call",
                    "params": {
                        "name": "screen_capture",
                        "arguments": {
                            "name": "test_screenshot"
                        }
                    }
                }),
                expect: Some(Expectation {
                    require_outcome: true,
                    ..Default::default()
                }),
            },
        ],
    }
}
