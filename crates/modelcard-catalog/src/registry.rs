//! Concurrent catalog registry with alias lookup

use crate::builtin;
use crate::record::ModelRecord;
use crate::{Error, Result};
use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;

/// In-memory index of validated catalog records.
///
/// Records are stored by id; every alias resolves to its record's id. A
/// primary id is never shadowed by another record's alias; for competing
/// aliases the last registration wins.
pub struct CatalogRegistry {
    records: DashMap<String, Arc<ModelRecord>>,
    aliases: DashMap<String, String>,
}

impl CatalogRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
            aliases: DashMap::new(),
        }
    }

    /// Create a registry seeded with the built-in record set
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        for record in builtin::records() {
            registry.insert(record);
        }
        registry
    }

    /// Register a record, indexing its id and every alias
    pub fn insert(&self, record: ModelRecord) {
        let record = Arc::new(record);

        // A record's own id always beats an alias someone registered earlier.
        self.aliases.remove(&record.id);

        for alias in &record.aliases {
            if self.records.contains_key(alias) {
                debug!("alias '{}' would shadow a primary id; skipped", alias);
                continue;
            }
            self.aliases.insert(alias.clone(), record.id.clone());
        }

        debug!("registered model '{}' ({})", record.id, record.provider);
        self.records.insert(record.id.clone(), record);
    }

    /// Look up a record by id or alias
    pub fn get(&self, id_or_alias: &str) -> Option<Arc<ModelRecord>> {
        if let Some(record) = self.records.get(id_or_alias) {
            return Some(Arc::clone(&record));
        }
        let id = self.aliases.get(id_or_alias)?;
        self.records.get(id.value()).map(|r| Arc::clone(&r))
    }

    /// Look up a record, failing when it is unknown
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when neither an id nor an alias matches.
    pub fn require(&self, id_or_alias: &str) -> Result<Arc<ModelRecord>> {
        self.get(id_or_alias)
            .ok_or_else(|| Error::NotFound(id_or_alias.to_string()))
    }

    /// Whether an id or alias is known
    pub fn contains(&self, id_or_alias: &str) -> bool {
        self.records.contains_key(id_or_alias) || self.aliases.contains_key(id_or_alias)
    }

    /// All registered ids, sorted
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.records.iter().map(|e| e.key().clone()).collect();
        ids.sort();
        ids
    }

    /// All records for one provider, sorted by id
    pub fn models_for_provider(&self, provider: &str) -> Vec<Arc<ModelRecord>> {
        let mut records: Vec<Arc<ModelRecord>> = self
            .records
            .iter()
            .filter(|e| e.value().provider == provider)
            .map(|e| Arc::clone(e.value()))
            .collect();
        records.sort_by(|a, b| a.id.cmp(&b.id));
        records
    }

    /// Number of registered records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for CatalogRegistry {
    fn default() -> Self {
        Self::new()
    }
}
