//! The settings registry.
//!
//! Named records of site-wide settings, each record holding one
//! serialized settings group. This is the explicit stand-in for the
//! host's settings store: callers thread a registry reference instead
//! of reaching for a process-wide lookup. Writes follow last-write-wins
//! semantics; reads of a missing record fall back to the group's
//! defaults, and `install_defaults` bakes those defaults into records
//! on first activation.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::error::{BaseError, BaseResult};
use crate::settings::schema::SettingsSchema;

/// In-memory settings registry with YAML persistence.
#[derive(Debug, Clone, Default)]
pub struct SettingsRegistry {
    records: BTreeMap<String, Value>,
}

impl SettingsRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bake a group's default values into its record unless the record
    /// already exists. Returns whether the record was created.
    pub fn install_defaults<S: SettingsSchema>(&mut self) -> BaseResult<bool> {
        if self.records.contains_key(S::RECORD) {
            return Ok(false);
        }
        let value = serde_json::to_value(S::default())?;
        debug!(record = S::RECORD, "installing default settings record");
        self.records.insert(S::RECORD.to_string(), value);
        Ok(true)
    }

    /// Read a settings group. A missing record yields the defaults.
    pub fn read<S: SettingsSchema>(&self) -> BaseResult<S> {
        match self.records.get(S::RECORD) {
            Some(value) => {
                serde_json::from_value(value.clone()).map_err(|err| BaseError::Registry {
                    record: S::RECORD.to_string(),
                    message: err.to_string(),
                })
            }
            None => Ok(S::default()),
        }
    }

    /// Validate and store a settings group, replacing the whole record.
    pub fn write<S: SettingsSchema>(&mut self, value: &S) -> BaseResult<()> {
        let result = value.validate();
        if !result.is_valid {
            return Err(BaseError::Validation {
                message: result.errors.join("; "),
            });
        }
        self.records
            .insert(S::RECORD.to_string(), serde_json::to_value(value)?);
        Ok(())
    }

    /// True when a record of that name exists.
    pub fn contains(&self, record: &str) -> bool {
        self.records.contains_key(record)
    }

    /// Fetch one field of a record without deserializing the group.
    pub fn get(&self, record: &str, field: &str) -> Option<&Value> {
        self.records.get(record)?.get(field)
    }

    /// Overwrite one field of a record. Creates the record when absent.
    pub fn set(&mut self, record: &str, field: &str, value: Value) -> BaseResult<()> {
        let entry = self
            .records
            .entry(record.to_string())
            .or_insert_with(|| Value::Object(Default::default()));
        match entry.as_object_mut() {
            Some(map) => {
                map.insert(field.to_string(), value);
                Ok(())
            }
            None => Err(BaseError::Registry {
                record: record.to_string(),
                message: format!("record is not an object, cannot set field {field}"),
            }),
        }
    }

    /// Record names currently present.
    pub fn record_names(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    /// Load a registry from a YAML file. A missing file yields an empty
    /// registry.
    pub fn load(path: &Path) -> BaseResult<Self> {
        match std::fs::read_to_string(path) {
            Ok(text) => {
                let records: BTreeMap<String, Value> = serde_yaml::from_str(&text)?;
                Ok(Self { records })
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::new()),
            Err(err) => Err(err.into()),
        }
    }

    /// Persist the registry to a YAML file.
    pub fn save(&self, path: &Path) -> BaseResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let text = serde_yaml::to_string(&self.records)?;
        std::fs::write(path, text)?;
        Ok(())
    }

    /// Default on-disk location of the registry file.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("quill")
            .join("registry.yml")
    }
}
