//! Compiled-in catalog records
//!
//! A small starter set validated at construction time through the fatal
//! variant: an invalid entry here is a programming error, not user input,
//! so it aborts instead of returning an error list.

use crate::record::ModelRecord;
use crate::schema::model_schema;
use modelcard_schema::expect_valid;
use modelcard_value::from_json_str;

const BUILTIN_MODELS: &str = r#"[
  {
    "id": "gpt-4o",
    "provider": "openai",
    "name": "GPT-4o",
    "family": "gpt-4",
    "release_date": "2024-05-13",
    "knowledge": "2023-10",
    "limits": {"context": 128000, "output": 16384},
    "cost": {"input": 2.5, "output": 10.0, "cache_read": 1.25},
    "modalities": {"input": ["text", "image", "audio"], "output": ["text"]},
    "capabilities": {
      "tools": {"enabled": true, "streaming": true, "parallel": true},
      "json": {"native": true, "schema": true},
      "streaming": {"text": true, "tool_calls": true}
    },
    "aliases": ["gpt-4o-latest"],
    "tags": ["flagship", "vision"]
  },
  {
    "id": "claude-sonnet-4-5",
    "provider": "anthropic",
    "name": "Claude Sonnet 4.5",
    "family": "claude",
    "release_date": "2025-09-29",
    "knowledge": "2025-01",
    "limits": {"context": 200000, "output": 64000},
    "cost": {"input": 3.0, "output": 15.0, "cache_read": 0.3, "cache_write": 3.75},
    "modalities": {"input": ["text", "image", "pdf"], "output": ["text"]},
    "capabilities": {
      "reasoning": {"enabled": true, "token_budget": 64000},
      "tools": {"enabled": true, "streaming": true, "strict": true, "parallel": true},
      "json": {"native": true, "schema": true, "strict": true},
      "streaming": {"text": true, "tool_calls": true}
    },
    "tags": ["flagship", "reasoning"]
  },
  {
    "id": "text-embedding-3-small",
    "provider": "openai",
    "name": "Text Embedding 3 Small",
    "release_date": "2024-01-25",
    "limits": {"context": 8191},
    "cost": {"input": 0.02},
    "modalities": {"input": ["text"], "output": ["embedding"]},
    "capabilities": {
      "chat": false,
      "embeddings": {"min_dimensions": 512, "max_dimensions": 1536, "default_dimensions": 1536},
      "streaming": {"text": false}
    },
    "tags": ["embeddings"]
  }
]"#;

/// The built-in record set, validated and typed.
pub fn records() -> Vec<ModelRecord> {
    let parsed = from_json_str(BUILTIN_MODELS).expect("built-in catalog is well-formed JSON");
    let entries = parsed
        .as_array()
        .expect("built-in catalog is a JSON array");

    entries
        .iter()
        .map(|entry| {
            let record = expect_valid(model_schema(), entry);
            ModelRecord::from_record(&record)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::EmbeddingSupport;

    #[test]
    fn test_builtins_validate_cleanly() {
        let records = records();
        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| !r.id.is_empty()));
    }

    #[test]
    fn test_builtin_capabilities() {
        let records = records();

        let gpt4o = records.iter().find(|r| r.id == "gpt-4o").unwrap();
        assert!(gpt4o.supports_tools());
        assert!(gpt4o.supports_vision());
        assert!(gpt4o.capabilities.chat);
        assert!(!gpt4o.supports_reasoning());

        let sonnet = records.iter().find(|r| r.id == "claude-sonnet-4-5").unwrap();
        assert!(sonnet.supports_reasoning());
        assert_eq!(sonnet.capabilities.reasoning.token_budget, Some(64_000));

        let embedding = records
            .iter()
            .find(|r| r.id == "text-embedding-3-small")
            .unwrap();
        assert!(!embedding.capabilities.chat);
        assert!(matches!(
            embedding.capabilities.embeddings,
            EmbeddingSupport::Dimensions(_)
        ));
        assert!(!embedding.capabilities.streaming.text);
    }
}
