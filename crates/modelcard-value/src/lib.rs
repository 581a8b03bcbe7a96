//! # modelcard-value
//!
//! Loosely-typed value tree for catalog records.
//!
//! This crate provides the raw-input side of the validation boundary: a
//! generic tree of maps, arrays, and scalars that data parsed from JSON or
//! YAML is converted into before being checked against a schema. Consumers
//! distinguish three presence states per map field: absent (key missing),
//! explicit null, and explicit value.

/// Parsing helpers for turning JSON/YAML text into value trees.
pub mod convert;
/// Core value tree model.
pub mod value;

pub use convert::{from_json_str, from_yaml_str};
pub use value::{Map, Value};

use thiserror::Error;

/// Errors that can occur when building value trees from raw input
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON parse error: {0}")]
    Json(String),

    #[error("YAML parse error: {0}")]
    Yaml(String),
}

pub type Result<T> = std::result::Result<T, Error>;
