//! Best-effort coercion of loose values into a validator's target kind
//!
//! Coercion runs before the structural type check: numeric-looking strings
//! become numbers, integral floats become integers, and so on. A value that
//! cannot be coerced is reported as a type mismatch by the engine.

use crate::field::Kind;
use modelcard_value::Value;
use regex::Regex;
use std::sync::OnceLock;

/// Identifier tokens: lowercase atom such as `openai`, `cache_read`, `text`.
fn ident_regex() -> &'static Regex {
    static IDENT_RE: OnceLock<Regex> = OnceLock::new();
    IDENT_RE.get_or_init(|| Regex::new("^[a-z][a-z0-9_-]*$").expect("identifier regex"))
}

/// Coerce a raw value to a primitive kind.
///
/// Only primitive kinds participate; composite kinds (object, array, union)
/// are resolved structurally by the engine. Returns the coerced value, or a
/// description of why the value cannot be the requested kind.
pub fn coerce(value: &Value, kind: &Kind) -> Result<Value, String> {
    match kind {
        Kind::String => match value {
            Value::String(s) => Ok(Value::String(s.clone())),
            other => Err(mismatch("string", other)),
        },
        Kind::Integer => match value {
            Value::Integer(i) => Ok(Value::Integer(*i)),
            Value::Number(n) if n.fract() == 0.0 && in_i64_range(*n) => {
                Ok(Value::Integer(*n as i64))
            }
            Value::Number(n) => Err(format!("value {n} is not a valid integer")),
            Value::String(s) => s
                .trim()
                .parse::<i64>()
                .map(Value::Integer)
                .map_err(|_| format!("value '{s}' is not a valid integer")),
            other => Err(mismatch("integer", other)),
        },
        Kind::Number => match value {
            Value::Number(n) => Ok(Value::Number(*n)),
            Value::Integer(i) => Ok(Value::Number(*i as f64)),
            Value::String(s) => match s.trim().parse::<f64>() {
                Ok(n) if n.is_finite() => Ok(Value::Number(n)),
                _ => Err(format!("value '{s}' is not a valid number")),
            },
            other => Err(mismatch("number", other)),
        },
        Kind::Boolean => match value {
            Value::Bool(b) => Ok(Value::Bool(*b)),
            Value::String(s) => match s.trim() {
                "true" | "1" => Ok(Value::Bool(true)),
                "false" | "0" => Ok(Value::Bool(false)),
                _ => Err(format!("value '{s}' is not a valid boolean")),
            },
            other => Err(mismatch("boolean", other)),
        },
        Kind::Ident => match value {
            Value::String(s) if ident_regex().is_match(s) => Ok(Value::String(s.clone())),
            Value::String(s) => Err(format!("value '{s}' is not a valid identifier")),
            other => Err(mismatch("identifier", other)),
        },
        Kind::Object(_) | Kind::Array(_) | Kind::Union(_) => {
            Err(format!("cannot coerce to composite kind {}", kind.name()))
        }
    }
}

fn in_i64_range(n: f64) -> bool {
    n >= i64::MIN as f64 && n <= i64::MAX as f64
}

fn mismatch(expected: &str, found: &Value) -> String {
    format!("expected {expected}, found {}", found.kind_name())
}
