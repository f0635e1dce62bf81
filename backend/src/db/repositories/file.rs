//! JSON file preference repository.
//!
//! The whole store is one JSON object of string values:
//!
//! ```json
//! {
//!   "handyman-favorites": "[\"tax-calculator\"]",
//!   "handyman-selected-tool": "\"tax-calculator\""
//! }
//! ```
//!
//! The file is read once on open and rewritten after every change. Writes go
//! to a sibling temporary file that is then renamed over the original, so a
//! crash mid-write leaves the previous contents intact.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::db::repository::{
    ErrorContext, PreferenceRepository, RepositoryError, RepositoryResult, ValueUpdate,
};

pub struct FileRepository {
    path: PathBuf,
    values: RwLock<BTreeMap<String, String>>,
}

impl FileRepository {
    /// Open the store at `path`, loading existing values.
    ///
    /// A missing or empty file is an empty store. The file and its parent
    /// directories are created on the first write.
    ///
    /// # Errors
    /// * `StorageError` if the file exists but cannot be read
    /// * `SerializationError` if it is not a JSON object of strings
    pub fn open(path: impl Into<PathBuf>) -> RepositoryResult<Self> {
        let path = path.into();
        let values = Self::load(&path)?;
        log::debug!(
            "opened preference file {} with {} entries",
            path.display(),
            values.len()
        );
        Ok(Self {
            path,
            values: RwLock::new(values),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn context(&self, operation: &str) -> ErrorContext {
        ErrorContext::new(operation)
            .with_entity("store_file")
            .with_entity_id(self.path.display())
    }

    fn load(path: &Path) -> RepositoryResult<BTreeMap<String, String>> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(RepositoryError::storage_with_context(
                    format!("Failed to read preference file: {}", e),
                    ErrorContext::new("open")
                        .with_entity("store_file")
                        .with_entity_id(path.display()),
                ))
            }
        };
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|e| {
            RepositoryError::serialization_with_context(
                format!("Preference file is not a JSON object of strings: {}", e),
                ErrorContext::new("open")
                    .with_entity("store_file")
                    .with_entity_id(path.display()),
            )
        })
    }

    fn persist(&self, values: &BTreeMap<String, String>, operation: &str) -> RepositoryResult<()> {
        let write = || -> std::io::Result<()> {
            if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            let json = serde_json::to_string_pretty(values).map_err(std::io::Error::other)?;
            let mut tmp = self.path.clone().into_os_string();
            tmp.push(".tmp");
            fs::write(&tmp, json)?;
            fs::rename(&tmp, &self.path)
        };
        write().map_err(|e| {
            RepositoryError::storage_with_context(
                format!("Failed to write preference file: {}", e),
                self.context(operation),
            )
        })
    }

    /// Apply `change` to a copy of the map and persist it; the in-memory map
    /// is only replaced once the file is written.
    fn modify<T>(
        &self,
        operation: &str,
        change: impl FnOnce(&mut BTreeMap<String, String>) -> T,
    ) -> RepositoryResult<T> {
        let mut values = self.values.write();
        let mut next = values.clone();
        let result = change(&mut next);
        if next != *values {
            self.persist(&next, operation)?;
            *values = next;
        }
        Ok(result)
    }
}

#[async_trait]
impl PreferenceRepository for FileRepository {
    async fn get(&self, key: &str) -> RepositoryResult<Option<String>> {
        Ok(self.values.read().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> RepositoryResult<()> {
        self.modify("set", |values| {
            values.insert(key.to_string(), value.to_string());
        })
    }

    async fn update<'a>(
        &self,
        key: &str,
        change: ValueUpdate<'a>,
    ) -> RepositoryResult<Option<String>> {
        self.modify("update", |values| {
            let next = change(values.get(key).map(String::as_str))?;
            match &next {
                Some(value) => values.insert(key.to_string(), value.clone()),
                None => values.remove(key),
            };
            Ok(next)
        })?
    }

    async fn remove(&self, key: &str) -> RepositoryResult<bool> {
        self.modify("remove", |values| values.remove(key).is_some())
    }

    async fn health_check(&self) -> RepositoryResult<bool> {
        if self.path.is_dir() {
            return Ok(false);
        }
        // The nearest existing ancestor must be a writable directory.
        let ancestor = self
            .path
            .ancestors()
            .skip(1)
            .filter(|p| !p.as_os_str().is_empty())
            .find(|p| p.exists());
        Ok(match ancestor {
            Some(dir) => fs::metadata(dir)
                .map(|m| m.is_dir() && !m.permissions().readonly())
                .unwrap_or(false),
            None => true,
        })
    }
}
