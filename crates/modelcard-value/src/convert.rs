//! Parsing helpers for raw record sources

use crate::value::Value;
use crate::{Error, Result};

/// Parse a JSON document into a value tree.
///
/// # Errors
///
/// Returns an error when the input is not well-formed JSON.
pub fn from_json_str(json: &str) -> Result<Value> {
    let parsed: serde_json::Value =
        serde_json::from_str(json).map_err(|e| Error::Json(e.to_string()))?;
    Ok(Value::from(parsed))
}

/// Parse a YAML document into a value tree.
///
/// # Errors
///
/// Returns an error when the input is not well-formed YAML, or uses YAML
/// constructs that have no value-tree representation (e.g. non-string keys).
pub fn from_yaml_str(yaml: &str) -> Result<Value> {
    serde_yaml::from_str(yaml).map_err(|e| Error::Yaml(e.to_string()))
}
