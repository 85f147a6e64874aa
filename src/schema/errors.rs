//! Stream schema error types

use serde_json::Value;
use thiserror::Error;

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors raised by schema construction and merging
#[derive(Debug, Clone, Error)]
pub enum SchemaError {
    /// The merge input was not a JSON object
    #[error("schema merge input must be a JSON object, found {found}")]
    TypeMismatch {
        /// JSON type name of the offending input
        found: &'static str,
    },

    /// A present merge key did not deserialize into its field's type
    #[error("schema field '{field}' could not be merged: {reason}")]
    FieldType {
        /// Top-level key that failed
        field: &'static str,
        /// Deserialization failure detail
        reason: String,
    },
}

/// Returns the JSON type name of a value, for error messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
