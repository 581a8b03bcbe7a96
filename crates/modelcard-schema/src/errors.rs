//! Aggregated validation errors

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Classification of a single validation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    /// Required field absent or null
    MissingField,
    /// Value present but wrong primitive kind after coercion
    TypeMismatch,
    /// Value well-typed but outside a declared constraint
    ConstraintViolation,
    /// Value matches none of a union's alternatives
    NoUnionMatch,
    /// Malformed nested input (e.g. scalar where an object was expected)
    UnknownStructure,
}

impl ErrorKind {
    /// Stable name for reporting
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::MissingField => "missing_field",
            ErrorKind::TypeMismatch => "type_mismatch",
            ErrorKind::ConstraintViolation => "constraint_violation",
            ErrorKind::NoUnionMatch => "no_union_match",
            ErrorKind::UnknownStructure => "unknown_structure",
        }
    }
}

/// A single validation failure at a field path
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[error("{path}: {detail}")]
pub struct ValidationError {
    /// Dot-joined field path (`cost.input`, `aliases[1]`)
    pub path: String,
    /// Failure classification
    pub kind: ErrorKind,
    /// Human-readable description
    pub detail: String,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new(path: impl Into<String>, kind: ErrorKind, detail: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind,
            detail: detail.into(),
        }
    }
}

/// Every violation found by a validation pass, in field declaration order.
///
/// Collaborators surfacing errors to users report the whole list, not just
/// the first entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ErrorList {
    errors: Vec<ValidationError>,
}

impl ErrorList {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure
    pub fn push(&mut self, path: impl Into<String>, kind: ErrorKind, detail: impl Into<String>) {
        self.errors.push(ValidationError::new(path, kind, detail));
    }

    /// Absorb all entries from another list
    pub fn merge(&mut self, other: ErrorList) {
        self.errors.extend(other.errors);
    }

    /// Check whether any failure has been recorded
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of recorded failures
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Iterate over recorded failures
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter()
    }

    /// All failures recorded at the given path
    pub fn at_path<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a ValidationError> {
        self.errors.iter().filter(move |e| e.path == path)
    }
}

impl fmt::Display for ErrorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "validation failed with {} error(s):", self.errors.len())?;
        for error in &self.errors {
            writeln!(f, "  - {error}")?;
        }
        Ok(())
    }
}

impl IntoIterator for ErrorList {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl From<Vec<ValidationError>> for ErrorList {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }
}

impl std::error::Error for ErrorList {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_len() {
        let mut errors = ErrorList::new();
        assert!(errors.is_empty());

        errors.push("id", ErrorKind::MissingField, "required field is missing");
        errors.push("cost.input", ErrorKind::ConstraintViolation, "below minimum");

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.at_path("id").count(), 1);
        assert_eq!(errors.at_path("cost.input").count(), 1);
    }

    #[test]
    fn test_display_lists_every_entry() {
        let mut errors = ErrorList::new();
        errors.push("id", ErrorKind::MissingField, "required field is missing");
        errors.push("provider", ErrorKind::MissingField, "required field is missing");

        let rendered = errors.to_string();
        assert!(rendered.contains("2 error(s)"));
        assert!(rendered.contains("id: required field is missing"));
        assert!(rendered.contains("provider: required field is missing"));
    }

    #[test]
    fn test_merge() {
        let mut a = ErrorList::new();
        a.push("id", ErrorKind::MissingField, "required field is missing");

        let mut b = ErrorList::new();
        b.push("limits.context", ErrorKind::TypeMismatch, "expected integer");

        a.merge(b);
        assert_eq!(a.len(), 2);
    }
}
