//! Repository factory for dependency injection.
//!
//! Chooses and constructs the preference backend from configuration so the
//! rest of the application only ever sees `Arc<dyn PreferenceRepository>`.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use crate::config::StorageSettings;

#[cfg(feature = "file-repo")]
use super::repositories::FileRepository;
#[cfg(feature = "local-repo")]
use super::repositories::LocalRepository;
use super::repository::{ErrorContext, PreferenceRepository, RepositoryError, RepositoryResult};

/// Store path used when nothing else is configured.
pub const DEFAULT_STORE_PATH: &str = "handyman-preferences.json";

/// Repository type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// In-memory local repository
    Local,
    /// JSON file on disk
    File,
}

impl FromStr for RepositoryType {
    type Err = String;

    /// Parse repository type from string.
    ///
    /// # Arguments
    /// * `s` - String representation ("local", "memory", "file", "json")
    ///
    /// # Returns
    /// * `Ok(RepositoryType)` if valid
    /// * `Err` if invalid
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" | "memory" => Ok(Self::Local),
            "file" | "json" => Ok(Self::File),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

impl RepositoryType {
    /// Get repository type from environment variable.
    ///
    /// Reads `REPOSITORY_TYPE`. Unset or unrecognised values fall back to
    /// `File` so preferences persist by default.
    pub fn from_env() -> Self {
        std::env::var("REPOSITORY_TYPE")
            .ok()
            .and_then(|val| val.parse().ok())
            .unwrap_or(Self::File)
    }
}

/// Repository factory for creating repository instances.
///
/// # Example
/// ```ignore
/// use handyman::config::AppConfig;
/// use handyman::db::RepositoryFactory;
///
/// let config = AppConfig::load()?;
/// let repo = RepositoryFactory::from_settings(&config.storage)?;
/// ```
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create a repository instance based on type.
    ///
    /// # Arguments
    /// * `repo_type` - Type of repository to create
    /// * `path` - Store file (required for `File`, ignored for `Local`)
    ///
    /// # Returns
    /// * `Ok(Arc<dyn PreferenceRepository>)` - Shared repository instance
    /// * `Err(RepositoryError)` - If creation fails
    pub fn create(
        repo_type: RepositoryType,
        path: Option<&Path>,
    ) -> RepositoryResult<Arc<dyn PreferenceRepository>> {
        match repo_type {
            RepositoryType::Local => {
                let _ = path;
                Self::create_local()
            }
            RepositoryType::File => {
                let path = path.ok_or_else(|| {
                    RepositoryError::configuration_with_context(
                        "File repository requires a store path",
                        ErrorContext::new("create").with_entity("store_file"),
                    )
                })?;
                #[cfg(feature = "file-repo")]
                {
                    let repo = Self::create_file(path)?;
                    Ok(repo as Arc<dyn PreferenceRepository>)
                }
                #[cfg(not(feature = "file-repo"))]
                {
                    let _ = path;
                    Err(RepositoryError::configuration(
                        "File repository feature not enabled",
                    ))
                }
            }
        }
    }

    /// Create an in-memory local repository.
    #[cfg(feature = "local-repo")]
    pub fn create_local() -> RepositoryResult<Arc<dyn PreferenceRepository>> {
        Ok(Arc::new(LocalRepository::new()))
    }

    #[cfg(not(feature = "local-repo"))]
    pub fn create_local() -> RepositoryResult<Arc<dyn PreferenceRepository>> {
        Err(RepositoryError::configuration(
            "Local repository feature not enabled",
        ))
    }

    /// Open (or prepare) a JSON file repository at `path`.
    #[cfg(feature = "file-repo")]
    pub fn create_file(path: &Path) -> RepositoryResult<Arc<FileRepository>> {
        let repo = FileRepository::open(path)?;
        Ok(Arc::new(repo))
    }

    /// Create a repository from the `[storage]` configuration section.
    pub fn from_settings(
        settings: &StorageSettings,
    ) -> RepositoryResult<Arc<dyn PreferenceRepository>> {
        let repo_type = settings.repository_type().map_err(|e| {
            RepositoryError::configuration_with_context(
                format!("Invalid repository type: {}", e),
                ErrorContext::new("from_settings").with_details(settings.repo_type.clone()),
            )
        })?;
        log::info!(
            "Creating {:?} preference repository (path: {})",
            repo_type,
            settings.path.display()
        );
        Self::create(repo_type, Some(&settings.path))
    }

    /// Create repository from environment configuration.
    ///
    /// Reads `REPOSITORY_TYPE` and `HANDYMAN_STORE_PATH`.
    pub fn from_env() -> RepositoryResult<Arc<dyn PreferenceRepository>> {
        let repo_type = RepositoryType::from_env();
        let path = std::env::var("HANDYMAN_STORE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_STORE_PATH));
        Self::create(repo_type, Some(&path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_type_from_str() {
        assert_eq!(
            RepositoryType::from_str("local").unwrap(),
            RepositoryType::Local
        );
        assert_eq!(
            RepositoryType::from_str("File").unwrap(),
            RepositoryType::File
        );
        assert_eq!(
            RepositoryType::from_str(" json ").unwrap(),
            RepositoryType::File
        );
        assert!(RepositoryType::from_str("postgres").is_err());
    }

    #[tokio::test]
    async fn test_create_local_repository() {
        let repo = RepositoryFactory::create(RepositoryType::Local, None).unwrap();
        assert!(repo.health_check().await.unwrap());
    }

    #[test]
    fn test_file_repository_requires_path() {
        let err = RepositoryFactory::create(RepositoryType::File, None)
            .err()
            .unwrap();
        assert!(matches!(err, RepositoryError::ConfigurationError { .. }));
    }

    #[tokio::test]
    async fn test_from_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        let settings = StorageSettings {
            repo_type: "file".to_string(),
            path: dir.path().join("prefs.json"),
        };
        let repo = RepositoryFactory::from_settings(&settings).unwrap();
        repo.set("k", "v").await.unwrap();
        assert!(settings.path.exists());
    }
}
