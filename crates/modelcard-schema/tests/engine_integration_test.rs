//! Integration tests for modelcard-schema
//!
//! These tests drive the engine and the merge resolver together through a
//! multi-level schema, the way the catalog layer composes them.

use modelcard_schema::{
    apply_layers, merge, validate, ErrorKind, FieldValidator, ObjectSchema, Record,
};
use modelcard_value::Value;
use serde_json::json;

fn service_schema() -> ObjectSchema {
    ObjectSchema::new("service")
        .field("id", FieldValidator::string())
        .field("region", FieldValidator::ident())
        .field("replicas", FieldValidator::integer().default_value(1i64).min(1.0))
        .field(
            "endpoints",
            FieldValidator::array(FieldValidator::string()).min_items(1),
        )
        .field(
            "tls",
            FieldValidator::union(vec![
                FieldValidator::boolean(),
                FieldValidator::object(
                    ObjectSchema::new("tls")
                        .field("cert", FieldValidator::string())
                        .field("key", FieldValidator::string()),
                ),
            ])
            .default_value(false),
        )
        .field(
            "limits",
            FieldValidator::object(
                ObjectSchema::new("limits")
                    .field("cpu", FieldValidator::number().optional().min(0.0))
                    .field("memory", FieldValidator::integer().optional().min(1.0)),
            )
            .optional(),
        )
        .capture_unknown("extra")
}

fn valid_base() -> Record {
    validate(
        &service_schema(),
        &Value::from(json!({
            "id": "svc-1",
            "region": "eu-west",
            "endpoints": ["https://a.example"],
            "limits": {"cpu": 0.5, "memory": 512}
        })),
    )
    .unwrap()
}

#[test]
fn test_validate_applies_defaults_and_coercion() {
    let record = validate(
        &service_schema(),
        &Value::from(json!({
            "id": "svc-1",
            "region": "eu-west",
            "replicas": "3",
            "endpoints": ["https://a.example"]
        })),
    )
    .unwrap();

    assert_eq!(record.get_i64("replicas"), Some(3));
    assert_eq!(record.get_bool("tls"), Some(false));
}

#[test]
fn test_every_violation_is_reported_in_one_pass() {
    let errors = validate(
        &service_schema(),
        &Value::from(json!({
            "replicas": 0,
            "endpoints": [],
            "tls": "yes",
            "limits": {"cpu": -1.0, "memory": "lots"}
        })),
    )
    .unwrap_err();

    // id and region missing, replicas below minimum, endpoints too short,
    // tls matches no union alternative, both limits invalid.
    assert_eq!(errors.len(), 7);
    assert_eq!(errors.at_path("id").next().unwrap().kind, ErrorKind::MissingField);
    assert_eq!(errors.at_path("region").next().unwrap().kind, ErrorKind::MissingField);
    assert_eq!(
        errors.at_path("replicas").next().unwrap().kind,
        ErrorKind::ConstraintViolation
    );
    assert_eq!(
        errors.at_path("endpoints").next().unwrap().kind,
        ErrorKind::ConstraintViolation
    );
    assert_eq!(
        errors.at_path("tls").next().unwrap().kind,
        ErrorKind::NoUnionMatch
    );
    assert_eq!(
        errors.at_path("limits.cpu").next().unwrap().kind,
        ErrorKind::ConstraintViolation
    );
    assert_eq!(
        errors.at_path("limits.memory").next().unwrap().kind,
        ErrorKind::TypeMismatch
    );
}

#[test]
fn test_union_object_alternative_validates_recursively() {
    let record = validate(
        &service_schema(),
        &Value::from(json!({
            "id": "svc-1",
            "region": "eu-west",
            "endpoints": ["https://a.example"],
            "tls": {"cert": "/etc/cert.pem", "key": "/etc/key.pem"}
        })),
    )
    .unwrap();

    assert_eq!(
        record.get_path("tls.cert"),
        Some(&Value::from("/etc/cert.pem"))
    );

    // A partial object matches neither alternative.
    let errors = validate(
        &service_schema(),
        &Value::from(json!({
            "id": "svc-1",
            "region": "eu-west",
            "endpoints": ["https://a.example"],
            "tls": {"cert": "/etc/cert.pem"}
        })),
    )
    .unwrap_err();
    assert_eq!(
        errors.at_path("tls").next().unwrap().kind,
        ErrorKind::NoUnionMatch
    );
}

#[test]
fn test_merge_then_revalidate_round_trip() {
    let base = valid_base();
    let merged = merge(
        &base,
        &Value::from(json!({
            "limits": {"memory": 1024},
            "extra": {"team": "infra"}
        })),
    );

    // Inherited, replaced, and captured fields survive a re-validation.
    let revalidated = validate(&service_schema(), &merged.to_value()).unwrap();
    assert_eq!(revalidated.get_path("limits.cpu"), Some(&Value::Number(0.5)));
    assert_eq!(
        revalidated.get_path("limits.memory"),
        Some(&Value::Integer(1024))
    );
    assert_eq!(
        revalidated.get_path("extra.team"),
        Some(&Value::from("infra"))
    );
}

#[test]
fn test_layer_fold_is_deterministic_and_specific_wins() {
    let base = valid_base();
    let layers = vec![
        Value::from(json!({"replicas": 2, "limits": {"cpu": 1.0}})),
        Value::from(json!({"replicas": 4})),
        Value::from(json!({"limits": {"memory": 2048}})),
    ];

    let resolved = apply_layers(&base, &layers);

    assert_eq!(resolved.get_i64("replicas"), Some(4));
    assert_eq!(resolved.get_path("limits.cpu"), Some(&Value::Number(1.0)));
    assert_eq!(
        resolved.get_path("limits.memory"),
        Some(&Value::Integer(2048))
    );

    // Folding again with the same layers yields the same record.
    assert_eq!(apply_layers(&base, &layers), resolved);
}
