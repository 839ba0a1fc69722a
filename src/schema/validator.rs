//! Structural JSON validation
//!
//! Recursive descent over a schema tree in lock-step with the value tree,
//! accumulating every violation instead of stopping at the first. Object
//! schemas are open-world: properties the schema does not mention are
//! permitted and ignored, so servers can add fields without breaking
//! conformance.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;

/// A structural description of an expected JSON shape
#[derive(Debug, Clone)]
pub enum Schema {
    /// Exact literal match, type and value
    Const(Value),
    /// Runtime JSON type must be one of the listed types
    Type(Vec<JsonType>),
    /// Object with per-property schemas and a required set
    Object {
        properties: BTreeMap<String, Schema>,
        required: Vec<String>,
    },
    /// Array whose every element matches the item schema
    Array { items: Box<Schema> },
    /// Valid when at least one alternative matches
    AnyOf(Vec<Schema>),
}

impl Schema {
    /// Shorthand for a single-type schema
    pub fn of_type(ty: JsonType) -> Self {
        Schema::Type(vec![ty])
    }

    /// Shorthand for an object schema
    pub fn object(properties: Vec<(&str, Schema)>, required: &[&str]) -> Self {
        Schema::Object {
            properties: properties
                .into_iter()
                .map(|(name, schema)| (name.to_string(), schema))
                .collect(),
            required: required.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Shorthand for an array schema
    pub fn array(items: Schema) -> Self {
        Schema::Array {
            items: Box::new(items),
        }
    }
}

/// The runtime type of a JSON value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonType {
    Object,
    Array,
    String,
    Number,
    Boolean,
    Null,
}

impl JsonType {
    /// Classify a value
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Object(_) => JsonType::Object,
            Value::Array(_) => JsonType::Array,
            Value::String(_) => JsonType::String,
            Value::Number(_) => JsonType::Number,
            Value::Bool(_) => JsonType::Boolean,
            Value::Null => JsonType::Null,
        }
    }
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JsonType::Object => "object",
            JsonType::Array => "array",
            JsonType::String => "string",
            JsonType::Number => "number",
            JsonType::Boolean => "boolean",
            JsonType::Null => "null",
        };
        f.write_str(name)
    }
}

/// Outcome of validating one value against one schema
///
/// Diagnostics are ordered and path-qualified; the result is valid exactly
/// when there are none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub diagnostics: Vec<String>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Validate a value against a schema, collecting every violation
pub fn validate(schema: &Schema, value: &Value) -> ValidationResult {
    let mut diagnostics = Vec::new();
    check(schema, value, "", &mut diagnostics);
    ValidationResult { diagnostics }
}

fn check(schema: &Schema, value: &Value, path: &str, out: &mut Vec<String>) {
    match schema {
        Schema::Const(expected) => {
            if value != expected {
                out.push(format!(
                    "expected constant {} at {}, got {}",
                    expected,
                    display_path(path),
                    value
                ));
            }
        }

        Schema::Type(allowed) => {
            let actual = JsonType::of(value);
            if !allowed.contains(&actual) {
                out.push(type_mismatch(allowed, actual, path));
            }
        }

        Schema::Object {
            properties,
            required,
        } => {
            let Some(map) = value.as_object() else {
                out.push(type_mismatch(&[JsonType::Object], JsonType::of(value), path));
                return;
            };
            for name in required {
                if !map.contains_key(name) {
                    out.push(format!(
                        "missing required property '{}' at {}",
                        name,
                        display_path(path)
                    ));
                }
            }
            for (name, nested) in properties {
                if let Some(child) = map.get(name) {
                    check(nested, child, &extend_path(path, name), out);
                }
            }
        }

        Schema::Array { items } => {
            let Some(elements) = value.as_array() else {
                out.push(type_mismatch(&[JsonType::Array], JsonType::of(value), path));
                return;
            };
            for (index, element) in elements.iter().enumerate() {
                check(items, element, &format!("{}[{}]", path, index), out);
            }
        }

        Schema::AnyOf(alternatives) => {
            let matched = alternatives.iter().any(|alt| {
                let mut scratch = Vec::new();
                check(alt, value, path, &mut scratch);
                scratch.is_empty()
            });
            // Only the outermost mismatch is reported; per-branch
            // sub-diagnostics would drown the report.
            if !matched {
                out.push(format!(
                    "value at {} matches none of {} alternatives",
                    display_path(path),
                    alternatives.len()
                ));
            }
        }
    }
}

fn type_mismatch(allowed: &[JsonType], actual: JsonType, path: &str) -> String {
    let set = allowed
        .iter()
        .map(JsonType::to_string)
        .collect::<Vec<_>>()
        .join("|");
    format!(
        "expected type in {{{}}} at {}, got {}",
        set,
        display_path(path),
        actual
    )
}

fn extend_path(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", path, name)
    }
}

fn display_path(path: &str) -> &str {
    if path.is_empty() {
        "$"
    } else {
        path
    }
}
