//! Preference repository trait.
//!
//! The panel persists exactly two things, the favourited tools and the last
//! selected tool, as string values under fixed keys. Backends only need a
//! flat string map; all interpretation of the values lives in
//! [`crate::db::services`].

pub mod error;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

use async_trait::async_trait;

/// Read-modify-write step for [`PreferenceRepository::update`].
///
/// Receives the current value and returns the value to store; `None`
/// deletes the key. An error aborts the update and leaves the value as it
/// was.
pub type ValueUpdate<'a> =
    Box<dyn FnOnce(Option<&str>) -> RepositoryResult<Option<String>> + Send + 'a>;

/// Key-value storage for panel preferences.
///
/// Implementations must be safe to share across request handlers behind an
/// `Arc<dyn PreferenceRepository>`.
#[async_trait]
pub trait PreferenceRepository: Send + Sync {
    /// Fetch the raw value stored under `key`.
    async fn get(&self, key: &str) -> RepositoryResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// The write is durable when this returns.
    async fn set(&self, key: &str, value: &str) -> RepositoryResult<()>;

    /// Atomically replace the value under `key` with `change(current)`.
    ///
    /// No other write to the store can interleave between reading the
    /// current value and storing the new one. Returns the stored value.
    async fn update<'a>(
        &self,
        key: &str,
        change: ValueUpdate<'a>,
    ) -> RepositoryResult<Option<String>>;

    /// Delete `key`. Returns whether a value was present.
    async fn remove(&self, key: &str) -> RepositoryResult<bool>;

    /// Check that the backing store is usable.
    async fn health_check(&self) -> RepositoryResult<bool>;
}
