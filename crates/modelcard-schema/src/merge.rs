//! Deep-merge resolver for layered record composition
//!
//! Combines a complete base record with a sparse override. Unset or null
//! fields in the override inherit the base's value; nested objects compose
//! field-by-field; scalars and arrays replace wholesale. When base and
//! override disagree on structural kind, the override wins unconditionally.
//! Callers that accept unvalidated overrides re-validate the merged result
//! to catch the fallout.
//!
//! The resolver performs no validation of its own and raises no errors;
//! both inputs are borrowed and never mutated.

use crate::record::Record;
use modelcard_value::Value;
use tracing::trace;

/// Merge two loose values, override-biased.
///
/// - override null → base kept
/// - both objects → recursive field-by-field merge
/// - anything else (scalar, array, kind conflict) → override replaces
pub fn merge_value(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (_, Value::Null) => base.clone(),
        (Value::Map(base_map), Value::Map(over_map)) => {
            let mut out = base_map.clone();
            for (key, over_val) in over_map {
                if over_val.is_null() {
                    continue;
                }
                match base_map.get(key) {
                    Some(base_val) => {
                        out.insert(key.clone(), merge_value(base_val, over_val));
                    }
                    None => {
                        out.insert(key.clone(), over_val.clone());
                    }
                }
            }
            Value::Map(out)
        }
        _ => overlay.clone(),
    }
}

/// Merge a validated base record with a (possibly partial) override value.
///
/// The override is expected to be object-shaped; any other value inherits
/// the base unchanged. The result is a fresh record with the base's type
/// name.
pub fn merge(base: &Record, overlay: &Value) -> Record {
    let Some(over_map) = overlay.as_map() else {
        trace!(
            "override for '{}' is not an object; keeping base unchanged",
            base.type_name()
        );
        return base.clone();
    };

    let mut fields = base.fields().clone();
    for (key, over_val) in over_map {
        if over_val.is_null() {
            continue;
        }
        match base.get(key) {
            Some(base_val) => {
                fields.insert(key.clone(), merge_value(base_val, over_val));
            }
            None => {
                fields.insert(key.clone(), over_val.clone());
            }
        }
    }

    Record::from_parts(base.type_name().to_string(), fields)
}

/// Merge two validated records
pub fn merge_records(base: &Record, overlay: &Record) -> Record {
    merge(base, &overlay.to_value())
}

/// Fold an ordered chain of overrides onto a base record.
///
/// Layers are applied left-to-right, most general first, so later layers
/// win on conflict (e.g. provider defaults, then family defaults, then
/// model-specific values).
pub fn apply_layers(base: &Record, overlays: &[Value]) -> Record {
    let mut result = base.clone();
    for (idx, overlay) in overlays.iter().enumerate() {
        trace!("applying layer {} of {}", idx + 1, overlays.len());
        result = merge(&result, overlay);
    }
    result
}
