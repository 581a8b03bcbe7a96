//! Schema validation engine
//!
//! A pure pass over a raw value tree: every declared field is resolved for
//! presence, coerced, and checked, and every violation is collected into one
//! [`ErrorList`]. The pass never stops at the first invalid field, so a
//! caller fixing a rejected record sees the complete picture at once.

use crate::coerce::coerce;
use crate::errors::{ErrorKind, ErrorList};
use crate::field::{FieldValidator, Kind, ObjectSchema, UnknownFields};
use crate::record::Record;
use chrono::NaiveDate;
use modelcard_value::{Map, Value};
use regex::Regex;
use tracing::debug;

/// Path used when the input itself is not an object
const ROOT_PATH: &str = "$";

/// Validate a raw value tree against a schema.
///
/// Returns the validated [`Record`] when no field violates the schema,
/// otherwise the full aggregated [`ErrorList`] with one entry per violated
/// field path.
///
/// # Errors
///
/// Returns the error list when any declared field is missing, mistyped, or
/// out of constraint, or when the input is not an object at all.
pub fn validate(schema: &ObjectSchema, input: &Value) -> Result<Record, ErrorList> {
    let mut errors = ErrorList::new();

    let fields = match input.as_map() {
        Some(map) => validate_object(schema, map, "", &mut errors),
        None => {
            errors.push(
                ROOT_PATH,
                ErrorKind::UnknownStructure,
                format!("expected object, found {}", input.kind_name()),
            );
            Map::new()
        }
    };

    if errors.is_empty() {
        Ok(Record::from_parts(schema.name.clone(), fields))
    } else {
        debug!(
            "validation of '{}' failed with {} error(s)",
            schema.name,
            errors.len()
        );
        Err(errors)
    }
}

/// Validate and return the record directly, aborting the caller on failure.
///
/// Intended for compiled-in data where an invalid record is a programming
/// error, not user input.
///
/// # Panics
///
/// Panics with the rendered error list when validation fails.
pub fn expect_valid(schema: &ObjectSchema, input: &Value) -> Record {
    match validate(schema, input) {
        Ok(record) => record,
        Err(errors) => panic!("invalid {} record: {errors}", schema.name),
    }
}

fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}

fn validate_object(
    schema: &ObjectSchema,
    input: &Map,
    prefix: &str,
    errors: &mut ErrorList,
) -> Map {
    let mut output = Map::new();

    for (name, validator) in schema.fields() {
        let path = join(prefix, name);
        match input.get(name) {
            None => {
                if let Some(default) = &validator.default {
                    output.insert(name.to_string(), default.clone());
                } else if !validator.presence.allow_absent {
                    errors.push(path, ErrorKind::MissingField, "required field is missing");
                }
            }
            Some(Value::Null) => {
                if let Some(default) = &validator.default {
                    output.insert(name.to_string(), default.clone());
                } else if validator.presence.allow_null {
                    output.insert(name.to_string(), Value::Null);
                } else {
                    errors.push(path, ErrorKind::MissingField, "required field is null");
                }
            }
            Some(value) => {
                if let Some(validated) = validate_field(validator, value, &path, errors) {
                    output.insert(name.to_string(), validated);
                }
            }
        }
    }

    if let UnknownFields::Capture(field) = &schema.unknown {
        let mut captured = Map::new();
        for (key, value) in input {
            if schema.declares(key) {
                continue;
            }
            // An input key matching the capture field merges its own
            // entries instead of nesting one level deeper.
            if key == field {
                if let Some(map) = value.as_map() {
                    captured.extend(map.clone());
                    continue;
                }
            }
            captured.insert(key.clone(), value.clone());
        }
        if !captured.is_empty() {
            output.insert(field.clone(), Value::Map(captured));
        }
    }

    output
}

fn validate_field(
    validator: &FieldValidator,
    value: &Value,
    path: &str,
    errors: &mut ErrorList,
) -> Option<Value> {
    match &validator.kind {
        Kind::Object(child) => match value.as_map() {
            Some(map) => Some(Value::Map(validate_object(child, map, path, errors))),
            None => {
                errors.push(
                    path,
                    ErrorKind::UnknownStructure,
                    format!("expected object, found {}", value.kind_name()),
                );
                None
            }
        },
        Kind::Array(element) => match value.as_array() {
            Some(items) => {
                let mut out = Vec::with_capacity(items.len());
                for (idx, item) in items.iter().enumerate() {
                    let item_path = format!("{path}[{idx}]");
                    if item.is_null() {
                        if let Some(default) = &element.default {
                            out.push(default.clone());
                        } else if element.presence.allow_null {
                            out.push(Value::Null);
                        } else {
                            errors.push(
                                item_path,
                                ErrorKind::TypeMismatch,
                                "array element is null",
                            );
                        }
                    } else if let Some(v) = validate_field(element, item, &item_path, errors) {
                        out.push(v);
                    }
                }
                if let Some(min) = validator.min_items {
                    if items.len() < min {
                        errors.push(
                            path,
                            ErrorKind::ConstraintViolation,
                            format!("array has {} item(s), minimum is {min}", items.len()),
                        );
                    }
                }
                Some(Value::Array(out))
            }
            None => {
                errors.push(
                    path,
                    ErrorKind::UnknownStructure,
                    format!("expected array, found {}", value.kind_name()),
                );
                None
            }
        },
        Kind::Union(alternatives) => {
            for alternative in alternatives {
                let mut scratch = ErrorList::new();
                if let Some(v) = validate_field(alternative, value, path, &mut scratch) {
                    if scratch.is_empty() {
                        return Some(v);
                    }
                }
            }
            let names: Vec<&str> = alternatives.iter().map(|a| a.kind.name()).collect();
            errors.push(
                path,
                ErrorKind::NoUnionMatch,
                format!("value matches none of: {}", names.join(", ")),
            );
            None
        }
        primitive => match coerce(value, primitive) {
            Ok(coerced) => {
                check_constraints(validator, &coerced, path, errors);
                Some(coerced)
            }
            Err(detail) => {
                errors.push(path, ErrorKind::TypeMismatch, detail);
                None
            }
        },
    }
}

fn check_constraints(
    validator: &FieldValidator,
    value: &Value,
    path: &str,
    errors: &mut ErrorList,
) {
    if let (Some(min), Some(v)) = (validator.min, value.as_f64()) {
        if v < min {
            errors.push(
                path,
                ErrorKind::ConstraintViolation,
                format!("value {v} is less than minimum {min}"),
            );
        }
    }

    if let (Some(pattern), Some(s)) = (&validator.pattern, value.as_str()) {
        match Regex::new(pattern) {
            Ok(re) => {
                if !re.is_match(s) {
                    errors.push(
                        path,
                        ErrorKind::ConstraintViolation,
                        format!("value '{s}' does not match pattern '{pattern}'"),
                    );
                }
            }
            Err(e) => {
                errors.push(
                    path,
                    ErrorKind::ConstraintViolation,
                    format!("invalid pattern '{pattern}': {e}"),
                );
            }
        }
    }

    if validator.date {
        if let Some(s) = value.as_str() {
            if NaiveDate::parse_from_str(s, "%Y-%m-%d").is_err() {
                errors.push(
                    path,
                    ErrorKind::ConstraintViolation,
                    format!("value '{s}' is not a valid date (expected YYYY-MM-DD)"),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldValidator;
    use serde_json::json;

    fn to_value(json: serde_json::Value) -> Value {
        Value::from(json)
    }

    fn sample_schema() -> ObjectSchema {
        ObjectSchema::new("sample")
            .field("id", FieldValidator::string())
            .field("provider", FieldValidator::ident())
            .field("name", FieldValidator::string().optional())
            .field("note", FieldValidator::string().nullable())
            .field("deprecated", FieldValidator::boolean().default_value(false))
            .field(
                "limits",
                FieldValidator::object(
                    ObjectSchema::new("limits")
                        .field("context", FieldValidator::integer().optional().min(1.0))
                        .field("output", FieldValidator::integer().optional().min(1.0)),
                )
                .optional(),
            )
            .field(
                "aliases",
                FieldValidator::array(FieldValidator::string()).default_value(Value::Array(Vec::new())),
            )
    }

    #[test]
    fn test_minimal_valid_input() {
        let input = to_value(json!({"id": "m1", "provider": "openai", "note": null}));
        let record = validate(&sample_schema(), &input).unwrap();

        assert_eq!(record.get_str("id"), Some("m1"));
        assert_eq!(record.get_bool("deprecated"), Some(false));
        assert_eq!(record.get("aliases"), Some(&Value::Array(vec![])));
        // Optional absent field is omitted; nullable null is preserved.
        assert!(!record.contains("name"));
        assert_eq!(record.get("note"), Some(&Value::Null));
    }

    #[test]
    fn test_all_missing_fields_reported() {
        let input = to_value(json!({"note": null}));
        let errors = validate(&sample_schema(), &input).unwrap_err();

        assert_eq!(errors.len(), 2);
        assert!(errors
            .at_path("id")
            .all(|e| e.kind == ErrorKind::MissingField));
        assert!(errors
            .at_path("provider")
            .all(|e| e.kind == ErrorKind::MissingField));
    }

    #[test]
    fn test_required_null_is_missing_field() {
        let input = to_value(json!({"id": null, "provider": "openai", "note": null}));
        let errors = validate(&sample_schema(), &input).unwrap_err();

        assert_eq!(errors.len(), 1);
        let error = errors.at_path("id").next().unwrap();
        assert_eq!(error.kind, ErrorKind::MissingField);
        assert!(error.detail.contains("null"));
    }

    #[test]
    fn test_default_applies_on_null() {
        let input = to_value(json!({
            "id": "m1", "provider": "openai", "note": null, "deprecated": null
        }));
        let record = validate(&sample_schema(), &input).unwrap();
        assert_eq!(record.get_bool("deprecated"), Some(false));
    }

    #[test]
    fn test_nested_errors_are_path_tagged() {
        let input = to_value(json!({
            "id": "m1", "provider": "openai", "note": null,
            "limits": {"context": 0, "output": "not-a-number"}
        }));
        let errors = validate(&sample_schema(), &input).unwrap_err();

        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.at_path("limits.context").next().unwrap().kind,
            ErrorKind::ConstraintViolation
        );
        assert_eq!(
            errors.at_path("limits.output").next().unwrap().kind,
            ErrorKind::TypeMismatch
        );
    }

    #[test]
    fn test_array_errors_are_index_tagged() {
        let input = to_value(json!({
            "id": "m1", "provider": "openai", "note": null,
            "aliases": ["ok", 3]
        }));
        let errors = validate(&sample_schema(), &input).unwrap_err();

        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.at_path("aliases[1]").next().unwrap().kind,
            ErrorKind::TypeMismatch
        );
    }

    #[test]
    fn test_scalar_where_object_expected() {
        let input = to_value(json!({
            "id": "m1", "provider": "openai", "note": null, "limits": 42
        }));
        let errors = validate(&sample_schema(), &input).unwrap_err();
        assert_eq!(
            errors.at_path("limits").next().unwrap().kind,
            ErrorKind::UnknownStructure
        );
    }

    #[test]
    fn test_scalar_where_array_expected() {
        let input = to_value(json!({
            "id": "m1", "provider": "openai", "note": null, "aliases": "m1-latest"
        }));
        let errors = validate(&sample_schema(), &input).unwrap_err();
        assert_eq!(
            errors.at_path("aliases").next().unwrap().kind,
            ErrorKind::UnknownStructure
        );
    }

    #[test]
    fn test_string_coercion_into_integer() {
        let input = to_value(json!({
            "id": "m1", "provider": "openai", "note": null,
            "limits": {"context": "128000"}
        }));
        let record = validate(&sample_schema(), &input).unwrap();
        assert_eq!(
            record.get_path("limits.context"),
            Some(&Value::Integer(128_000))
        );
    }

    #[test]
    fn test_union_first_match_wins() {
        let schema = ObjectSchema::new("u").field(
            "embeddings",
            FieldValidator::union(vec![
                FieldValidator::boolean(),
                FieldValidator::object(
                    ObjectSchema::new("dims")
                        .field("min_dimensions", FieldValidator::integer().optional().min(1.0)),
                ),
            ]),
        );

        let record = validate(&schema, &to_value(json!({"embeddings": false}))).unwrap();
        assert_eq!(record.get_bool("embeddings"), Some(false));

        let record =
            validate(&schema, &to_value(json!({"embeddings": {"min_dimensions": 256}}))).unwrap();
        assert_eq!(
            record.get_path("embeddings.min_dimensions"),
            Some(&Value::Integer(256))
        );
    }

    #[test]
    fn test_union_no_match_names_alternatives() {
        let schema = ObjectSchema::new("u").field(
            "embeddings",
            FieldValidator::union(vec![
                FieldValidator::boolean(),
                FieldValidator::object(ObjectSchema::new("dims")),
            ]),
        );

        let errors = validate(&schema, &to_value(json!({"embeddings": "yes"}))).unwrap_err();
        let error = errors.at_path("embeddings").next().unwrap();
        assert_eq!(error.kind, ErrorKind::NoUnionMatch);
        assert!(error.detail.contains("boolean"));
        assert!(error.detail.contains("object"));
    }

    #[test]
    fn test_unknown_keys_captured() {
        let schema = ObjectSchema::new("thing")
            .field("id", FieldValidator::string())
            .capture_unknown("extra");

        let record =
            validate(&schema, &to_value(json!({"id": "m1", "foo": "bar", "n": 3}))).unwrap();
        assert_eq!(record.get_path("extra.foo"), Some(&Value::from("bar")));
        assert_eq!(record.get_path("extra.n"), Some(&Value::Integer(3)));
        assert!(record.get("foo").is_none());
    }

    #[test]
    fn test_unknown_keys_ignored_by_default() {
        let schema = ObjectSchema::new("thing").field("id", FieldValidator::string());
        let record = validate(&schema, &to_value(json!({"id": "m1", "foo": "bar"}))).unwrap();
        assert!(record.get("foo").is_none());
        assert!(record.get("extra").is_none());
    }

    #[test]
    fn test_non_object_input() {
        let errors = validate(&sample_schema(), &Value::from("nope")).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.at_path("$").next().unwrap().kind,
            ErrorKind::UnknownStructure
        );
    }

    #[test]
    fn test_date_constraint() {
        let schema =
            ObjectSchema::new("d").field("release_date", FieldValidator::string().date());

        assert!(validate(&schema, &to_value(json!({"release_date": "2025-06-01"}))).is_ok());

        let errors =
            validate(&schema, &to_value(json!({"release_date": "2025-13-40"}))).unwrap_err();
        assert_eq!(
            errors.at_path("release_date").next().unwrap().kind,
            ErrorKind::ConstraintViolation
        );
    }

    #[test]
    fn test_pattern_constraint() {
        let schema = ObjectSchema::new("p")
            .field("knowledge", FieldValidator::string().pattern(r"^\d{4}-\d{2}(-\d{2})?$"));

        assert!(validate(&schema, &to_value(json!({"knowledge": "2024-10"}))).is_ok());
        assert!(validate(&schema, &to_value(json!({"knowledge": "october"}))).is_err());
    }

    #[test]
    fn test_expect_valid_returns_record() {
        let input = to_value(json!({"id": "m1", "provider": "openai", "note": null}));
        let record = expect_valid(&sample_schema(), &input);
        assert_eq!(record.get_str("id"), Some("m1"));
    }

    #[test]
    #[should_panic(expected = "invalid sample record")]
    fn test_expect_valid_panics_with_error_list() {
        let _ = expect_valid(&sample_schema(), &to_value(json!({})));
    }
}
