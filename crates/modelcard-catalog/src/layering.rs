//! Layered record resolution
//!
//! The intended composition pattern for catalog data: a complete base layer
//! (e.g. provider defaults) folded with increasingly specific overrides
//! (family defaults, then model-specific values). The merge resolver itself
//! never validates, so the composed value is re-validated before the typed
//! record is materialized; that pass catches structural-kind conflicts an
//! override may have introduced.

use crate::record::ModelRecord;
use crate::schema::model_schema;
use crate::{Error, Result};
use modelcard_schema::{apply_layers, validate};
use modelcard_value::Value;
use tracing::debug;

/// Validate a single raw record and materialize the typed form.
///
/// # Errors
///
/// Returns the full aggregated error list when any field violates the
/// schema.
pub fn validate_model(input: &Value) -> Result<ModelRecord> {
    let record = validate(model_schema(), input)?;
    Ok(ModelRecord::from_record(&record))
}

/// Resolve an ordered chain of layers into one validated record.
///
/// The first layer must validate as a complete record; the remaining
/// layers are sparse overrides applied left-to-right, most general first.
///
/// # Errors
///
/// Returns [`Error::NoLayers`] for an empty chain, and the aggregated
/// error list when the base layer or the composed result is invalid.
pub fn resolve_layers(layers: &[Value]) -> Result<ModelRecord> {
    let (base, overlays) = layers.split_first().ok_or(Error::NoLayers)?;

    let base_record = validate(model_schema(), base)?;
    debug!(
        "resolving '{}' from {} layer(s)",
        base_record.get_str("id").unwrap_or("<unknown>"),
        layers.len()
    );

    let merged = apply_layers(&base_record, overlays);
    let revalidated = validate(model_schema(), &merged.to_value())?;
    Ok(ModelRecord::from_record(&revalidated))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_single_layer_is_plain_validation() {
        let model = resolve_layers(&[Value::from(json!({"id": "x", "provider": "p"}))]).unwrap();
        assert_eq!(model.id, "x");
        assert!(model.capabilities.chat);
    }

    #[test]
    fn test_empty_chain_is_rejected() {
        assert!(matches!(resolve_layers(&[]), Err(Error::NoLayers)));
    }

    #[test]
    fn test_provider_family_model_chain() {
        let provider = Value::from(json!({
            "id": "base", "provider": "openai",
            "cost": {"input": 1.0, "output": 2.0},
            "capabilities": {"tools": {"enabled": true}}
        }));
        let family = Value::from(json!({
            "family": "gpt-4",
            "cost": {"output": 3.0}
        }));
        let model = Value::from(json!({
            "id": "gpt-4o",
            "name": "GPT-4o",
            "capabilities": {"tools": {"parallel": true}}
        }));

        let resolved = resolve_layers(&[provider, family, model]).unwrap();

        assert_eq!(resolved.id, "gpt-4o");
        assert_eq!(resolved.family.as_deref(), Some("gpt-4"));
        let cost = resolved.cost.unwrap();
        assert_eq!(cost.input, Some(1.0));
        assert_eq!(cost.output, Some(3.0));
        assert!(resolved.capabilities.tools.enabled);
        assert!(resolved.capabilities.tools.parallel);
    }

    #[test]
    fn test_null_in_override_inherits() {
        let base = Value::from(json!({"id": "x", "provider": "p", "name": "GPT-4"}));
        let overlay = Value::from(json!({"name": null}));

        let resolved = resolve_layers(&[base, overlay]).unwrap();
        assert_eq!(resolved.name.as_deref(), Some("GPT-4"));
    }

    #[test]
    fn test_kind_conflict_caught_by_revalidation() {
        let base = Value::from(json!({
            "id": "x", "provider": "p", "cost": {"input": 1.0}
        }));
        let overlay = Value::from(json!({"cost": "free"}));

        let result = resolve_layers(&[base, overlay]);
        assert!(matches!(result, Err(Error::Invalid(_))));
    }

    #[test]
    fn test_invalid_base_reports_every_field() {
        let base = Value::from(json!({"cost": {"input": -1.0}}));
        match resolve_layers(&[base]) {
            Err(Error::Invalid(errors)) => {
                // id and provider missing plus the negative rate.
                assert_eq!(errors.len(), 3);
            }
            other => panic!("expected Invalid, got {other:?}"),
        }
    }
}
