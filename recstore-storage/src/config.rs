//! Store configuration, usually read from a `recstore.toml`.
//!
//! ```toml
//! app_identity = "Todo"
//! data_path = "todo.json"
//!
//! [models.Note]
//! title = "string"
//! price = "number"
//! due = "date"
//! ```

use recstore_model::{FieldType, ModelRegistry, ModelSchema, SchemaField};
use recstore_types::{DEFAULT_NAMESPACE, KeyCodec};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::backend::MemoryBackend;
use crate::error::{StorageError, StorageResult};
use crate::file::FileBackend;

/// Configuration for building a key codec, a registry and a backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_namespace")]
    pub namespace: String,
    pub app_identity: String,
    /// Byte quota over keys and values; unlimited when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quota_bytes: Option<usize>,
    /// Location of the JSON file backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_path: Option<PathBuf>,
    /// Model name → field name → declared type.
    #[serde(default)]
    pub models: BTreeMap<String, BTreeMap<String, FieldType>>,
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

impl StoreConfig {
    /// A configuration with defaults and no models.
    pub fn new(app_identity: impl Into<String>) -> Self {
        Self {
            namespace: default_namespace(),
            app_identity: app_identity.into(),
            quota_bytes: None,
            data_path: None,
            models: BTreeMap::new(),
        }
    }

    pub fn from_toml_str(contents: &str) -> StorageResult<Self> {
        toml::from_str(contents).map_err(|e| StorageError::Config(e.to_string()))
    }

    /// Reads and parses a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        info!(path = %path.display(), models = config.models.len(), "loaded store configuration");
        Ok(config)
    }

    pub fn key_codec(&self) -> StorageResult<KeyCodec> {
        Ok(KeyCodec::new(self.namespace.clone(), self.app_identity.clone())?)
    }

    /// Builds a registry holding one schema per configured model.
    pub fn registry(&self) -> ModelRegistry {
        let mut registry = ModelRegistry::new();
        for (model, fields) in &self.models {
            let schema = fields
                .iter()
                .fold(ModelSchema::new(model.clone()), |schema, (name, field_type)| {
                    schema.with_field(SchemaField::new(name, *field_type))
                });
            registry.register(schema);
        }
        registry
    }

    pub fn memory_backend(&self) -> MemoryBackend {
        match self.quota_bytes {
            Some(limit) => MemoryBackend::with_quota(limit),
            None => MemoryBackend::new(),
        }
    }

    pub fn file_backend(&self) -> StorageResult<FileBackend> {
        let path = self
            .data_path
            .as_ref()
            .ok_or_else(|| StorageError::Config("data_path is not set".into()))?;
        Ok(FileBackend::open_with_quota(path, self.quota_bytes)?)
    }
}
