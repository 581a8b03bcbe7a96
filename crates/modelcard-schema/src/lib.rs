#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]

//! # modelcard-schema
//!
//! Schema validation engine and deep-merge resolver for catalog records.
//!
//! A schema is a runtime tree of field validators. Validation turns a
//! loosely-typed input tree into an immutable [`Record`], collecting every
//! violation into one [`ErrorList`] instead of failing on the first. The
//! merge resolver composes a complete base record with sparse overrides,
//! inheriting through absent or null fields and merging nested objects
//! field-by-field.
//!
//! ## Example Usage
//!
//! ```rust
//! use modelcard_schema::{validate, FieldValidator, ObjectSchema};
//! use modelcard_value::Value;
//!
//! let schema = ObjectSchema::new("thing")
//!     .field("id", FieldValidator::string())
//!     .field("count", FieldValidator::integer().optional().min(1.0));
//!
//! let input: Value = serde_json::from_str(r#"{"id": "x", "count": "3"}"#).unwrap();
//! let record = validate(&schema, &input).unwrap();
//! assert_eq!(record.get_str("id"), Some("x"));
//! assert_eq!(record.get_i64("count"), Some(3));
//! ```

pub mod coerce;
pub mod engine;
pub mod errors;
pub mod field;
pub mod merge;
pub mod record;

pub use engine::{expect_valid, validate};
pub use errors::{ErrorKind, ErrorList, ValidationError};
pub use field::{FieldValidator, Kind, ObjectSchema, Presence, UnknownFields};
pub use merge::{apply_layers, merge, merge_records, merge_value};
pub use record::Record;
