//! Mock MCP server binary for integration testing
//!
//! Implements a minimal line-delimited JSON-RPC server over stdio: one
//! request per stdin line, one response per stdout line. Used as the
//! server-under-test so the harness can be exercised without a real MCP
//! implementation.

use serde_json::{json, Value};
use std::io::{BufRead, BufReader, Write};

fn main() {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let reader = BufReader::new(stdin.lock());
    let mut writer = stdout.lock();

    // Startup chatter belongs on stderr; stdout is the protocol stream
    eprintln!("mock-server: listening on stdio");

    let mut state = MockState::default();

    for line in reader.lines() {
        let Ok(line) = line else { break };
        if line.trim().is_empty() {
            continue;
        }
        let request: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(_) => continue,
        };

        let response = state.handle(&request);
        if writeln!(writer, "{}", response).is_err() {
            break;
        }
        let _ = writer.flush();
    }
}

#[derive(Default)]
struct MockState {
    initialized: bool,
}

impl MockState {
    fn handle(&mut self, request: &Value) -> Value {
        let id = request.get("id").cloned().unwrap_or(Value::Null);
        let method = request.get("method").and_then(Value::as_str).unwrap_or("");

        if !self.initialized && method != "initialize" {
            return error_response(id, -32002, "Server not initialized");
        }

        match method {
            "initialize" => {
                self.initialized = true;
                json!({
                    "jsonrpc": "2.0",
                    "id": id,
                    "result": {
                        "protocolVersion": "2024-11-05",
                        "capabilities": {
                            "tools": {}
                        },
                        "serverInfo": {
                            "name": "mock-server",
                            "version": env!("CARGO_PKG_VERSION")
                        }
                    }
                })
            }

            "tools/list" => json!({
                "jsonrpc": "2.0",
                "id": id,
                "result": {
                    "tools": [
                        {
                            "name": "screen_capture",
                            "description": "Capture a screenshot of the current screen",
                            "inputSchema": {
                                "type": "object",
                                "properties": {
                                    "name": { "type": "string" }
                                },
                                "required": ["name"]
                            }
                        },
                        {
                            "name": "ui_query",
                            "inputSchema": {
                                "type": "object",
                                "properties": {}
                            }
                        }
                    ]
                }
            }),

            "tools/call" => {
                let tool = request
                    .pointer("/params/name")
                    .and_then(Value::as_str)
                    .unwrap_or("");
                match tool {
                    "screen_capture" | "ui_query" => json!({
                        "jsonrpc": "2.0",
                        "id": id,
                        "result": {
                            "content": [
                                { "type": "text", "text": format!("{} ok", tool) }
                            ]
                        }
                    }),
                    _ => error_response(id, -32602, &format!("Unknown tool: {}", tool)),
                }
            }

            _ => error_response(id, -32601, &format!("Method not found: {}", method)),
        }
    }
}

fn error_response(id: Value, code: i64, message: &str) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": {
            "code": code,
            "message": message
        }
    })
}
