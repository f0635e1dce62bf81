//! Application configuration.
//!
//! Settings come from a `handyman.toml` file and may be overridden by
//! environment variables:
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//!
//! [storage]
//! type = "file"            # "local" | "file"
//! path = "handyman-preferences.json"
//! ```
//!
//! | Variable              | Overrides        |
//! |-----------------------|------------------|
//! | `HOST`                | `server.host`    |
//! | `PORT`                | `server.port`    |
//! | `REPOSITORY_TYPE`     | `storage.type`   |
//! | `HANDYMAN_STORE_PATH` | `storage.path`   |

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::db::RepositoryType;

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "HANDYMAN_CONFIG";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub storage: StorageSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Preference store settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageSettings {
    #[serde(rename = "type", default = "default_repo_type")]
    pub repo_type: String,
    /// Only used by the `file` backend.
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_repo_type() -> String {
    "file".to_string()
}

fn default_store_path() -> PathBuf {
    PathBuf::from("handyman-preferences.json")
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            repo_type: default_repo_type(),
            path: default_store_path(),
        }
    }
}

impl StorageSettings {
    /// Get the repository type from configuration.
    pub fn repository_type(&self) -> Result<RepositoryType, String> {
        RepositoryType::from_str(&self.repo_type)
    }
}

impl ServerSettings {
    /// `host:port` for binding the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(AppConfig)` if successful; missing keys take their defaults
    /// * `Err(ConfigError)` if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load configuration from the default location.
    ///
    /// Uses `$HANDYMAN_CONFIG` when set (the file must then exist). Otherwise
    /// searches for `handyman.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    ///
    /// Falls back to defaults when no file is found.
    pub fn from_default_location() -> Result<Self, ConfigError> {
        if let Ok(explicit) = env::var(CONFIG_PATH_ENV) {
            return Self::from_file(explicit);
        }

        let search_paths = [
            PathBuf::from("handyman.toml"),
            PathBuf::from("backend/handyman.toml"),
            PathBuf::from("../handyman.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                log::info!("Loading configuration from {}", path.display());
                return Self::from_file(&path);
            }
        }

        log::info!("No handyman.toml found, using default configuration");
        Ok(Self::default())
    }

    /// Default-location config with environment overrides applied.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_default_location()?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Overlay `HOST`, `PORT`, `REPOSITORY_TYPE` and `HANDYMAN_STORE_PATH`.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(host) = env::var("HOST") {
            self.server.host = host;
        }
        if let Ok(port) = env::var("PORT") {
            self.server.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                key: "PORT".to_string(),
                value: port.clone(),
                reason: "must be a valid port number".to_string(),
            })?;
        }
        if let Ok(repo_type) = env::var("REPOSITORY_TYPE") {
            self.storage.repo_type = repo_type;
        }
        if let Ok(path) = env::var("HANDYMAN_STORE_PATH") {
            self.storage.path = PathBuf::from(path);
        }
        Ok(())
    }

    /// Reject settings that would only fail later at startup.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.storage
            .repository_type()
            .map_err(|reason| ConfigError::InvalidValue {
                key: "storage.type".to_string(),
                value: self.storage.repo_type.clone(),
                reason,
            })?;
        if self.storage.path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "storage.path".to_string(),
                value: String::new(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 9000

[storage]
type = "local"
path = "/var/lib/handyman/prefs.json"
"#;

        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.server.bind_address(), "127.0.0.1:9000");
        assert_eq!(
            config.storage.repository_type().unwrap(),
            RepositoryType::Local
        );
        assert_eq!(
            config.storage.path,
            PathBuf::from("/var/lib/handyman/prefs.json")
        );
    }

    #[test]
    fn test_missing_sections_take_defaults() {
        let config: AppConfig = toml::from_str("[server]\nport = 3000\n").unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.storage, StorageSettings::default());
        assert_eq!(config.storage.repository_type().unwrap(), RepositoryType::File);
    }

    #[test]
    fn test_validate_rejects_unknown_storage() {
        let mut config = AppConfig::default();
        config.storage.repo_type = "postgres".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("storage.type"));
    }

    #[test]
    fn test_from_file_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("handyman.toml");
        fs::write(&path, "[server\nport = 1").unwrap();
        assert!(matches!(
            AppConfig::from_file(&path),
            Err(ConfigError::Parse { .. })
        ));
        assert!(matches!(
            AppConfig::from_file(dir.path().join("absent.toml")),
            Err(ConfigError::Read { .. })
        ));
    }
}
