//! In-memory preference repository.
//!
//! Values live in a `HashMap` behind a lock and vanish with the process.
//! Useful for tests and for running the server without touching disk.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::db::repository::{
    ErrorContext, PreferenceRepository, RepositoryError, RepositoryResult, ValueUpdate,
};

/// In-memory local repository.
///
/// Cloning is cheap and clones share the same map.
///
/// # Example
/// ```
/// use handyman::db::repositories::LocalRepository;
/// use handyman::db::PreferenceRepository;
///
/// #[tokio::main]
/// async fn main() {
///     let repo = LocalRepository::new();
///     repo.set("handyman-selected-tool", "\"tax-calculator\"").await.unwrap();
///     assert!(repo.get("handyman-selected-tool").await.unwrap().is_some());
/// }
/// ```
#[derive(Clone, Default)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    values: HashMap<String, String>,
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            values: HashMap::new(),
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-populated with `values`.
    pub fn with_values<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let repo = Self::new();
        repo.data.write().values = values
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        repo
    }

    /// Simulate an unavailable store. Every later call fails until reset.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.data.read().values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn ensure_healthy(data: &LocalData, operation: &str, key: &str) -> RepositoryResult<()> {
        if data.is_healthy {
            Ok(())
        } else {
            Err(RepositoryError::storage_with_context(
                "local repository is marked unhealthy",
                ErrorContext::new(operation)
                    .with_entity("preference")
                    .with_entity_id(key),
            ))
        }
    }
}

#[async_trait]
impl PreferenceRepository for LocalRepository {
    async fn get(&self, key: &str) -> RepositoryResult<Option<String>> {
        let data = self.data.read();
        Self::ensure_healthy(&data, "get", key)?;
        Ok(data.values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> RepositoryResult<()> {
        let mut data = self.data.write();
        Self::ensure_healthy(&data, "set", key)?;
        data.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn update<'a>(
        &self,
        key: &str,
        change: ValueUpdate<'a>,
    ) -> RepositoryResult<Option<String>> {
        let mut data = self.data.write();
        Self::ensure_healthy(&data, "update", key)?;
        let next = change(data.values.get(key).map(String::as_str))?;
        match &next {
            Some(value) => data.values.insert(key.to_string(), value.clone()),
            None => data.values.remove(key),
        };
        Ok(next)
    }

    async fn remove(&self, key: &str) -> RepositoryResult<bool> {
        let mut data = self.data.write();
        Self::ensure_healthy(&data, "remove", key)?;
        Ok(data.values.remove(key).is_some())
    }

    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }
}
