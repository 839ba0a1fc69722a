//! Declarative schemas and the structural validator

mod registry;
mod validator;

pub use registry::SchemaRegistry;
pub use validator::{validate, JsonType, Schema, ValidationResult};
