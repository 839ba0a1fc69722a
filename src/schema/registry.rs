//! The schema registry
//!
//! A read-only table of named schemas, built once at startup. The two
//! built-in entries describe the MCP response shapes the scenarios check:
//! `InitializeResponse` and `ToolsListResponse`.

use std::collections::BTreeMap;

use serde_json::{json, Value};

use crate::common::{Error, Result};

use super::validator::{self, JsonType, Schema, ValidationResult};

/// Immutable mapping from schema name to schema
pub struct SchemaRegistry {
    schemas: BTreeMap<String, Schema>,
}

impl SchemaRegistry {
    /// Build the registry with the built-in MCP response schemas
    pub fn builtin() -> Self {
        let mut schemas = BTreeMap::new();
        schemas.insert("InitializeResponse".to_string(), initialize_response());
        schemas.insert("ToolsListResponse".to_string(), tools_list_response());
        Self { schemas }
    }

    /// Look up a schema by name
    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.schemas.get(name)
    }

    /// Registered schema names, in stable order
    pub fn names(&self) -> Vec<&str> {
        self.schemas.keys().map(String::as_str).collect()
    }

    /// Validate a value against a named schema
    ///
    /// Fails with [`Error::UnknownSchema`] when the name is not registered;
    /// that is a harness configuration bug, distinct from a protocol
    /// mismatch, which is reported inside the returned [`ValidationResult`].
    pub fn validate(&self, value: &Value, name: &str) -> Result<ValidationResult> {
        let schema = self
            .get(name)
            .ok_or_else(|| Error::unknown_schema(name, &self.names()))?;
        Ok(validator::validate(schema, value))
    }
}

/// Fields shared by every JSON-RPC response envelope
fn envelope(result: Schema) -> Schema {
    Schema::object(
        vec![
            ("jsonrpc", Schema::Const(json!("2.0"))),
            (
                "id",
                Schema::Type(vec![JsonType::String, JsonType::Number, JsonType::Null]),
            ),
            ("result", result),
        ],
        &["jsonrpc", "id", "result"],
    )
}

fn initialize_response() -> Schema {
    envelope(Schema::object(
        vec![
            ("protocolVersion", Schema::of_type(JsonType::String)),
            ("capabilities", Schema::of_type(JsonType::Object)),
            (
                "serverInfo",
                Schema::object(
                    vec![
                        ("name", Schema::of_type(JsonType::String)),
                        ("version", Schema::of_type(JsonType::String)),
                    ],
                    &["name", "version"],
                ),
            ),
        ],
        &["protocolVersion", "capabilities", "serverInfo"],
    ))
}

fn tools_list_response() -> Schema {
    envelope(Schema::object(
        vec![(
            "tools",
            Schema::array(Schema::object(
                vec![
                    ("name", Schema::of_type(JsonType::String)),
                    ("description", Schema::of_type(JsonType::String)),
                    ("inputSchema", Schema::of_type(JsonType::Object)),
                ],
                &["name", "inputSchema"],
            )),
        )],
        &["tools"],
    ))
}
