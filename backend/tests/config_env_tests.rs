//! Configuration loading with environment overrides.

mod support;

use std::fs;
use std::path::PathBuf;

use handyman::config::{AppConfig, ConfigError, CONFIG_PATH_ENV};
use handyman::db::RepositoryType;

const ALL_VARS: [&str; 5] = [
    CONFIG_PATH_ENV,
    "HOST",
    "PORT",
    "REPOSITORY_TYPE",
    "HANDYMAN_STORE_PATH",
];

fn cleared<'a>() -> Vec<(&'static str, Option<&'a str>)> {
    ALL_VARS.iter().map(|k| (*k, None)).collect()
}

#[test]
fn test_env_overrides_apply_on_top_of_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("handyman.toml");
    fs::write(
        &path,
        "[server]\nport = 7000\n\n[storage]\ntype = \"file\"\npath = \"from-file.json\"\n",
    )
    .unwrap();
    let path_str = path.to_str().unwrap();

    let mut env = cleared();
    env.push((CONFIG_PATH_ENV, Some(path_str)));
    env.push(("PORT", Some("7100")));
    env.push(("REPOSITORY_TYPE", Some("local")));

    support::with_scoped_env(&env, || {
        let config = AppConfig::load().unwrap();
        assert_eq!(config.server.port, 7100);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(
            config.storage.repository_type().unwrap(),
            RepositoryType::Local
        );
        assert_eq!(config.storage.path, PathBuf::from("from-file.json"));
    });
}

#[test]
fn test_store_path_override() {
    let mut env = cleared();
    env.push(("HANDYMAN_STORE_PATH", Some("/tmp/handyman-test.json")));
    env.push(("HOST", Some("127.0.0.1")));

    support::with_scoped_env(&env, || {
        let mut config = AppConfig::default();
        config.apply_env_overrides().unwrap();
        assert_eq!(config.server.bind_address(), "127.0.0.1:8080");
        assert_eq!(
            config.storage.path,
            PathBuf::from("/tmp/handyman-test.json")
        );
    });
}

#[test]
fn test_invalid_port_is_rejected() {
    let mut env = cleared();
    env.push(("PORT", Some("eighty")));

    support::with_scoped_env(&env, || {
        let err = AppConfig::default().apply_env_overrides().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "PORT"));
    });
}

#[test]
fn test_invalid_repository_type_fails_validation() {
    let mut env = cleared();
    env.push(("REPOSITORY_TYPE", Some("postgres")));

    support::with_scoped_env(&env, || {
        let mut config = AppConfig::default();
        config.apply_env_overrides().unwrap();
        assert!(config.validate().is_err());
    });
}

#[test]
fn test_missing_explicit_config_is_an_error() {
    let mut env = cleared();
    env.push((CONFIG_PATH_ENV, Some("/definitely/not/here/handyman.toml")));

    support::with_scoped_env(&env, || {
        assert!(matches!(
            AppConfig::from_default_location(),
            Err(ConfigError::Read { .. })
        ));
    });
}
