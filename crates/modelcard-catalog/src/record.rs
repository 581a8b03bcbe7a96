//! Typed model record and sub-records
//!
//! A [`ModelRecord`] is materialized from a validated schema record. The
//! conversion is infallible because the schema guarantees field shapes;
//! anything optional simply stays `None`.

use modelcard_schema::Record;
use modelcard_value::{Map, Value};
use serde::{Deserialize, Serialize};

/// Token limits for a model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Limits {
    /// Maximum context window size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<u64>,
    /// Maximum output tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<u64>,
}

/// Pricing rates for a model (per million tokens unless noted)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cost {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_read: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_write: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub training: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_audio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_audio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_video: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_video: Option<f64>,
}

/// Input/output modalities for a model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Modalities {
    #[serde(default)]
    pub input: Vec<String>,
    #[serde(default)]
    pub output: Vec<String>,
}

/// Embedding dimension bounds
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingDimensions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_dimensions: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_dimensions: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_dimensions: Option<u64>,
}

/// Embedding support: a plain on/off flag or dimension bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EmbeddingSupport {
    Enabled(bool),
    Dimensions(EmbeddingDimensions),
}

impl Default for EmbeddingSupport {
    fn default() -> Self {
        EmbeddingSupport::Enabled(false)
    }
}

impl EmbeddingSupport {
    /// Whether the model can produce embeddings at all
    pub fn is_supported(&self) -> bool {
        match self {
            EmbeddingSupport::Enabled(enabled) => *enabled,
            EmbeddingSupport::Dimensions(_) => true,
        }
    }
}

/// Extended reasoning support
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReasoningSupport {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_budget: Option<u64>,
}

/// Tool/function calling support
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolSupport {
    pub enabled: bool,
    pub streaming: bool,
    pub strict: bool,
    pub parallel: bool,
}

/// Structured JSON output support
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JsonSupport {
    pub native: bool,
    pub schema: bool,
    pub strict: bool,
}

/// Streaming support
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamingSupport {
    pub text: bool,
    pub tool_calls: bool,
}

impl Default for StreamingSupport {
    fn default() -> Self {
        Self {
            text: true,
            tool_calls: false,
        }
    }
}

/// What a model can do
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Capabilities {
    pub chat: bool,
    pub embeddings: EmbeddingSupport,
    pub reasoning: ReasoningSupport,
    pub tools: ToolSupport,
    pub json: JsonSupport,
    pub streaming: StreamingSupport,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            chat: true,
            embeddings: EmbeddingSupport::default(),
            reasoning: ReasoningSupport::default(),
            tools: ToolSupport::default(),
            json: JsonSupport::default(),
            streaming: StreamingSupport::default(),
        }
    }
}

/// A validated, fully-typed catalog record for one model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelRecord {
    /// Catalog identifier
    pub id: String,
    /// Provider identifier (e.g. `openai`, `anthropic`)
    pub provider: String,
    /// Identifier the provider's own API expects, when it differs from `id`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_model_id: Option<String>,
    /// Human-readable name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Model family (e.g. `gpt-4`, `claude`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    /// Release date (`YYYY-MM-DD`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    /// Last metadata update (`YYYY-MM-DD`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    /// Knowledge cutoff (`YYYY-MM` or `YYYY-MM-DD`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub knowledge: Option<String>,
    /// Token limits
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limits: Option<Limits>,
    /// Pricing rates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<Cost>,
    /// Input/output modalities
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modalities: Option<Modalities>,
    /// Capability flags (always present; defaults applied by the schema)
    #[serde(default)]
    pub capabilities: Capabilities,
    /// Free-form labels
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Whether the model is deprecated
    #[serde(default)]
    pub deprecated: bool,
    /// Alternate identifiers resolving to this record
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    /// Unmodeled attributes preserved verbatim
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extra: Map,
}

impl ModelRecord {
    /// Materialize a typed record from a validated schema record.
    pub fn from_record(record: &Record) -> Self {
        Self {
            id: string_field(record.get("id")),
            provider: string_field(record.get("provider")),
            provider_model_id: opt_string(record.get("provider_model_id")),
            name: opt_string(record.get("name")),
            family: opt_string(record.get("family")),
            release_date: opt_string(record.get("release_date")),
            last_updated: opt_string(record.get("last_updated")),
            knowledge: opt_string(record.get("knowledge")),
            limits: record.get("limits").and_then(Value::as_map).map(limits),
            cost: record.get("cost").and_then(Value::as_map).map(cost),
            modalities: record
                .get("modalities")
                .and_then(Value::as_map)
                .map(modalities),
            capabilities: record
                .get("capabilities")
                .and_then(Value::as_map)
                .map(capabilities)
                .unwrap_or_default(),
            tags: string_array(record.get("tags")),
            deprecated: record.get_bool("deprecated").unwrap_or(false),
            aliases: string_array(record.get("aliases")),
            extra: record
                .get("extra")
                .and_then(Value::as_map)
                .cloned()
                .unwrap_or_default(),
        }
    }

    /// Display name, falling back to the catalog id
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    /// Identifier to send to the provider's API
    pub fn api_model_id(&self) -> &str {
        self.provider_model_id.as_deref().unwrap_or(&self.id)
    }

    /// Whether the model accepts image input
    pub fn supports_vision(&self) -> bool {
        self.has_input_modality("image")
    }

    /// Whether the model supports tool calling
    pub fn supports_tools(&self) -> bool {
        self.capabilities.tools.enabled
    }

    /// Whether the model supports extended reasoning
    pub fn supports_reasoning(&self) -> bool {
        self.capabilities.reasoning.enabled
    }

    /// Coarse modality category: `image`, `multimodal`, or `text`
    pub fn modality_category(&self) -> &'static str {
        if self.has_output_modality("image") {
            "image"
        } else if self.has_input_modality("image")
            || self.has_input_modality("pdf")
            || self.has_input_modality("audio")
        {
            "multimodal"
        } else {
            "text"
        }
    }

    /// Input rate converted from per-million to per-token
    pub fn input_cost_per_token(&self) -> Option<f64> {
        self.cost.as_ref()?.input.map(|rate| rate / 1_000_000.0)
    }

    /// Output rate converted from per-million to per-token
    pub fn output_cost_per_token(&self) -> Option<f64> {
        self.cost.as_ref()?.output.map(|rate| rate / 1_000_000.0)
    }

    fn has_input_modality(&self, modality: &str) -> bool {
        self.modalities
            .as_ref()
            .is_some_and(|m| m.input.iter().any(|i| i == modality))
    }

    fn has_output_modality(&self, modality: &str) -> bool {
        self.modalities
            .as_ref()
            .is_some_and(|m| m.output.iter().any(|o| o == modality))
    }
}

impl From<&Record> for ModelRecord {
    fn from(record: &Record) -> Self {
        Self::from_record(record)
    }
}

fn string_field(value: Option<&Value>) -> String {
    value
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_default()
}

fn opt_string(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(str::to_string)
}

fn opt_u64(map: &Map, key: &str) -> Option<u64> {
    map.get(key)
        .and_then(Value::as_i64)
        .and_then(|i| u64::try_from(i).ok())
}

fn opt_f64(map: &Map, key: &str) -> Option<f64> {
    map.get(key).and_then(Value::as_f64)
}

fn bool_field(map: &Map, key: &str, fallback: bool) -> bool {
    map.get(key).and_then(Value::as_bool).unwrap_or(fallback)
}

fn string_array(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn limits(map: &Map) -> Limits {
    Limits {
        context: opt_u64(map, "context"),
        output: opt_u64(map, "output"),
    }
}

fn cost(map: &Map) -> Cost {
    Cost {
        input: opt_f64(map, "input"),
        output: opt_f64(map, "output"),
        request: opt_f64(map, "request"),
        cache_read: opt_f64(map, "cache_read"),
        cache_write: opt_f64(map, "cache_write"),
        reasoning: opt_f64(map, "reasoning"),
        training: opt_f64(map, "training"),
        image: opt_f64(map, "image"),
        audio: opt_f64(map, "audio"),
        input_audio: opt_f64(map, "input_audio"),
        output_audio: opt_f64(map, "output_audio"),
        input_video: opt_f64(map, "input_video"),
        output_video: opt_f64(map, "output_video"),
    }
}

fn modalities(map: &Map) -> Modalities {
    Modalities {
        input: string_array(map.get("input")),
        output: string_array(map.get("output")),
    }
}

fn embedding_support(value: &Value) -> EmbeddingSupport {
    match value {
        Value::Bool(enabled) => EmbeddingSupport::Enabled(*enabled),
        Value::Map(map) => EmbeddingSupport::Dimensions(EmbeddingDimensions {
            min_dimensions: opt_u64(map, "min_dimensions"),
            max_dimensions: opt_u64(map, "max_dimensions"),
            default_dimensions: opt_u64(map, "default_dimensions"),
        }),
        _ => EmbeddingSupport::default(),
    }
}

fn capabilities(map: &Map) -> Capabilities {
    Capabilities {
        chat: bool_field(map, "chat", true),
        embeddings: map
            .get("embeddings")
            .map(embedding_support)
            .unwrap_or_default(),
        reasoning: map
            .get("reasoning")
            .and_then(Value::as_map)
            .map(|m| ReasoningSupport {
                enabled: bool_field(m, "enabled", false),
                token_budget: opt_u64(m, "token_budget"),
            })
            .unwrap_or_default(),
        tools: map
            .get("tools")
            .and_then(Value::as_map)
            .map(|m| ToolSupport {
                enabled: bool_field(m, "enabled", false),
                streaming: bool_field(m, "streaming", false),
                strict: bool_field(m, "strict", false),
                parallel: bool_field(m, "parallel", false),
            })
            .unwrap_or_default(),
        json: map
            .get("json")
            .and_then(Value::as_map)
            .map(|m| JsonSupport {
                native: bool_field(m, "native", false),
                schema: bool_field(m, "schema", false),
                strict: bool_field(m, "strict", false),
            })
            .unwrap_or_default(),
        streaming: map
            .get("streaming")
            .and_then(Value::as_map)
            .map(|m| StreamingSupport {
                text: bool_field(m, "text", true),
                tool_calls: bool_field(m, "tool_calls", false),
            })
            .unwrap_or_default(),
    }
}
