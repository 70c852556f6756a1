//! Configuration management for Repolist

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ConfigError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the listing API, without a trailing slash.
    pub base_url: String,
    /// User agent sent with every request. The upstream API rejects
    /// requests without one.
    pub user_agent: String,
}

impl Config {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        let config_path = resolve_config_path()?;
        Self::load_from_path(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::ParseError)?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults when no file exists.
    ///
    /// Any other failure (unreadable file, parse error) is still surfaced,
    /// so a broken config never silently degrades to defaults.
    pub fn load_or_default() -> Result<Self> {
        let config_path = resolve_config_path()?;
        if !config_path.exists() {
            return Ok(Self::default_config());
        }
        Self::load_from_path(&config_path)
    }

    /// Create a default configuration
    pub fn default_config() -> Self {
        Self {
            api: ApiConfig {
                base_url: "https://api.github.com".to_string(),
                user_agent: "repo-list".to_string(),
            },
        }
    }
}

/// Resolve the configuration file path following XDG Base Directory spec
pub fn resolve_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("REPOLIST_CONFIG") {
        return Ok(PathBuf::from(shellexpand::tilde(&path).to_string()));
    }

    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::MissingField("config directory".to_string()))?;

    Ok(config_dir.join("repolist").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default_config();
        assert_eq!(config.api.base_url, "https://api.github.com");
        assert_eq!(config.api.user_agent, "repo-list");
    }

    #[test]
    fn test_load_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
[api]
base_url = "http://localhost:8080"
user_agent = "repo-list-test"
"#
        )
        .unwrap();

        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8080");
        assert_eq!(config.api.user_agent, "repo-list-test");
    }

    #[test]
    fn test_load_from_path_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does-not-exist.toml");

        let result = Config::load_from_path(&path);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_path_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "not [valid toml").unwrap();

        let result = Config::load_from_path(&path);
        assert!(result.is_err());
        let message = format!("{}", result.unwrap_err());
        assert!(message.contains("Failed to parse config"));
    }

    #[test]
    #[serial]
    fn test_resolve_config_path_env_override() {
        std::env::set_var("REPOLIST_CONFIG", "/tmp/custom-repolist.toml");
        let path = resolve_config_path().unwrap();
        std::env::remove_var("REPOLIST_CONFIG");

        assert_eq!(path, PathBuf::from("/tmp/custom-repolist.toml"));
    }

    #[test]
    #[serial]
    fn test_resolve_config_path_default_location() {
        std::env::remove_var("REPOLIST_CONFIG");
        let path = resolve_config_path().unwrap();

        assert!(path.ends_with("repolist/config.toml"));
    }

    #[test]
    #[serial]
    fn test_load_or_default_missing_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        std::env::set_var("REPOLIST_CONFIG", path.to_str().unwrap());

        let config = Config::load_or_default().unwrap();
        std::env::remove_var("REPOLIST_CONFIG");

        assert_eq!(config.api.base_url, "https://api.github.com");
    }

    #[test]
    #[serial]
    fn test_load_or_default_broken_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "api = 3").unwrap();
        std::env::set_var("REPOLIST_CONFIG", path.to_str().unwrap());

        let result = Config::load_or_default();
        std::env::remove_var("REPOLIST_CONFIG");

        assert!(result.is_err());
    }

    #[test]
    fn test_config_round_trip() {
        let config = Config::default_config();
        let toml = toml::to_string(&config).unwrap();
        let back: Config = toml::from_str(&toml).unwrap();

        assert_eq!(back.api.base_url, config.api.base_url);
        assert_eq!(back.api.user_agent, config.api.user_agent);
    }
}
