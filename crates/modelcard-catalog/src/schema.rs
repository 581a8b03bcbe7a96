//! The model record schema definition
//!
//! One explicit validator tree, built once per process. Defaults live on
//! the validator nodes; the `capabilities` default is the fully-expanded
//! sub-record so the field is always present in validated output.

use modelcard_schema::{FieldValidator, ObjectSchema};
use modelcard_value::{Map, Value};
use std::sync::OnceLock;

/// Per-million-token (or per-unit) rate fields accepted under `cost`.
pub const COST_FIELDS: [&str; 13] = [
    "input",
    "output",
    "request",
    "cache_read",
    "cache_write",
    "reasoning",
    "training",
    "image",
    "audio",
    "input_audio",
    "output_audio",
    "input_video",
    "output_video",
];

fn map_of(entries: Vec<(&str, Value)>) -> Value {
    Value::Map(
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect::<Map>(),
    )
}

fn limits_schema() -> ObjectSchema {
    ObjectSchema::new("limits")
        .field("context", FieldValidator::integer().optional().min(1.0))
        .field("output", FieldValidator::integer().optional().min(1.0))
}

fn cost_schema() -> ObjectSchema {
    let mut schema = ObjectSchema::new("cost");
    for name in COST_FIELDS {
        schema = schema.field(name, FieldValidator::number().optional().min(0.0));
    }
    schema
}

fn modalities_schema() -> ObjectSchema {
    ObjectSchema::new("modalities")
        .field(
            "input",
            FieldValidator::array(FieldValidator::ident()).default_value(Value::Array(Vec::new())),
        )
        .field(
            "output",
            FieldValidator::array(FieldValidator::ident()).default_value(Value::Array(Vec::new())),
        )
}

fn embedding_dimensions_schema() -> ObjectSchema {
    ObjectSchema::new("embedding_dimensions")
        .field("min_dimensions", FieldValidator::integer().optional().min(1.0))
        .field("max_dimensions", FieldValidator::integer().optional().min(1.0))
        .field(
            "default_dimensions",
            FieldValidator::integer().optional().min(1.0),
        )
}

fn reasoning_schema() -> ObjectSchema {
    ObjectSchema::new("reasoning")
        .field("enabled", FieldValidator::boolean().default_value(false))
        .field("token_budget", FieldValidator::integer().optional().min(1.0))
}

fn tools_schema() -> ObjectSchema {
    ObjectSchema::new("tools")
        .field("enabled", FieldValidator::boolean().default_value(false))
        .field("streaming", FieldValidator::boolean().default_value(false))
        .field("strict", FieldValidator::boolean().default_value(false))
        .field("parallel", FieldValidator::boolean().default_value(false))
}

fn json_support_schema() -> ObjectSchema {
    ObjectSchema::new("json")
        .field("native", FieldValidator::boolean().default_value(false))
        .field("schema", FieldValidator::boolean().default_value(false))
        .field("strict", FieldValidator::boolean().default_value(false))
}

fn streaming_schema() -> ObjectSchema {
    ObjectSchema::new("streaming")
        .field("text", FieldValidator::boolean().default_value(true))
        .field("tool_calls", FieldValidator::boolean().default_value(false))
}

fn default_reasoning() -> Value {
    map_of(vec![("enabled", Value::Bool(false))])
}

fn default_tools() -> Value {
    map_of(vec![
        ("enabled", Value::Bool(false)),
        ("streaming", Value::Bool(false)),
        ("strict", Value::Bool(false)),
        ("parallel", Value::Bool(false)),
    ])
}

fn default_json_support() -> Value {
    map_of(vec![
        ("native", Value::Bool(false)),
        ("schema", Value::Bool(false)),
        ("strict", Value::Bool(false)),
    ])
}

fn default_streaming() -> Value {
    map_of(vec![
        ("text", Value::Bool(true)),
        ("tool_calls", Value::Bool(false)),
    ])
}

fn default_capabilities() -> Value {
    map_of(vec![
        ("chat", Value::Bool(true)),
        ("embeddings", Value::Bool(false)),
        ("reasoning", default_reasoning()),
        ("tools", default_tools()),
        ("json", default_json_support()),
        ("streaming", default_streaming()),
    ])
}

fn capabilities_schema() -> ObjectSchema {
    ObjectSchema::new("capabilities")
        .field("chat", FieldValidator::boolean().default_value(true))
        .field(
            "embeddings",
            FieldValidator::union(vec![
                FieldValidator::boolean(),
                FieldValidator::object(embedding_dimensions_schema()),
            ])
            .default_value(false),
        )
        .field(
            "reasoning",
            FieldValidator::object(reasoning_schema()).default_value(default_reasoning()),
        )
        .field(
            "tools",
            FieldValidator::object(tools_schema()).default_value(default_tools()),
        )
        .field(
            "json",
            FieldValidator::object(json_support_schema()).default_value(default_json_support()),
        )
        .field(
            "streaming",
            FieldValidator::object(streaming_schema()).default_value(default_streaming()),
        )
}

/// The catalog record schema.
///
/// Unknown top-level keys are preserved verbatim under `extra`, the
/// forward-compatibility escape hatch for unmodeled attributes.
pub fn model_schema() -> &'static ObjectSchema {
    static SCHEMA: OnceLock<ObjectSchema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        ObjectSchema::new("model")
            .field("id", FieldValidator::string())
            .field("provider", FieldValidator::ident())
            .field("provider_model_id", FieldValidator::string().optional())
            .field("name", FieldValidator::string().optional())
            .field("family", FieldValidator::string().optional())
            .field("release_date", FieldValidator::string().optional().date())
            .field("last_updated", FieldValidator::string().optional().date())
            .field(
                "knowledge",
                FieldValidator::string()
                    .optional()
                    .pattern(r"^\d{4}-\d{2}(-\d{2})?$"),
            )
            .field("limits", FieldValidator::object(limits_schema()).optional())
            .field("cost", FieldValidator::object(cost_schema()).optional())
            .field(
                "modalities",
                FieldValidator::object(modalities_schema()).optional(),
            )
            .field(
                "capabilities",
                FieldValidator::object(capabilities_schema())
                    .default_value(default_capabilities()),
            )
            .field(
                "tags",
                FieldValidator::array(FieldValidator::string()).optional(),
            )
            .field("deprecated", FieldValidator::boolean().default_value(false))
            .field(
                "aliases",
                FieldValidator::array(FieldValidator::string())
                    .default_value(Value::Array(Vec::new())),
            )
            .capture_unknown("extra")
    })
}
