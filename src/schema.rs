use jsonschema::validator_for;
use serde_json::Value;

/// Frozen JSON Schema (draft 2020-12) for the JSON-RPC 2.0 response envelope
/// the server must emit: an echoed id plus `result` or `error`, never both.
pub const RESPONSE_ENVELOPE_SCHEMA: &str = r#"{
  "$schema": "https://json-schema.org/draft/2020-12/schema",
  "title": "JSON-RPC 2.0 Response Envelope",
  "type": "object",
  "required": ["jsonrpc", "id"],
  "properties": {
    "jsonrpc": { "const": "2.0" },
    "id": { "type": ["integer", "string", "null"] },
    "result": {},
    "error": {
      "type": "object",
      "required": ["code", "message"],
      "properties": {
        "code": { "type": "integer" },
        "message": { "type": "string", "minLength": 1 },
        "data": {}
      }
    }
  },
  "oneOf": [
    { "required": ["result"], "not": { "required": ["error"] } },
    { "required": ["error"], "not": { "required": ["result"] } }
  ]
}"#;

#[derive(Debug, thiserror::Error)]
pub enum SchemaValidationError {
    #[error("Schema parse error: {0}")]
    SchemaParse(#[from] serde_json::Error),
    #[error("Schema compile error: {0}")]
    SchemaCompile(String),
    #[error("Instance validation failed")]
    ValidationFailed,
}

/// Validate a JSON instance against a JSON Schema (draft 2020-12).
pub fn validate_json(schema_str: &str, instance_str: &str) -> Result<(), SchemaValidationError> {
    let schema_json: Value = serde_json::from_str(schema_str)?;
    let instance_json: Value = serde_json::from_str(instance_str)?;

    let validator = validator_for(&schema_json)
        .map_err(|e| SchemaValidationError::SchemaCompile(e.to_string()))?;

    if validator.is_valid(&instance_json) {
        Ok(())
    } else {
        Err(SchemaValidationError::ValidationFailed)
    }
}
