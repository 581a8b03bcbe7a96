//! # modelcard-catalog
//!
//! The concrete catalog record for machine-learning model metadata.
//!
//! This crate instantiates the schema engine for one record type: a model
//! card describing identity, provider, token limits, pricing, modalities,
//! and capabilities. It adds a typed [`ModelRecord`] materialized from a
//! validated record, layered resolution (provider defaults, family
//! defaults, model-specific values), an in-memory registry, and a small
//! built-in record set.

/// Compiled-in catalog records.
pub mod builtin;
/// Layered record resolution.
pub mod layering;
/// Typed model record and sub-records.
pub mod record;
/// Concurrent catalog registry with alias lookup.
pub mod registry;
/// The model record schema definition.
pub mod schema;

pub use layering::{resolve_layers, validate_model};
pub use record::{
    Capabilities, Cost, EmbeddingDimensions, EmbeddingSupport, JsonSupport, Limits, ModelRecord,
    Modalities, ReasoningSupport, StreamingSupport, ToolSupport,
};
pub use registry::CatalogRegistry;
pub use schema::model_schema;

use modelcard_schema::ErrorList;
use thiserror::Error;

/// Errors that can occur when working with catalog records
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid model record: {0}")]
    Invalid(#[from] ErrorList),

    #[error("no layers supplied")]
    NoLayers,

    #[error("model not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, Error>;
