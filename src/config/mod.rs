//! Configuration Management
//!
//! This module resolves the MySQL connection parameters used by the menu loop.
//!
//! # Resolution Precedence
//! 1. Local config file (`.staffdesk/config.json` in the working directory)
//! 2. Global config file (`<user config dir>/staffdesk/config.json`)
//! 3. Environment variables (`DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASSWORD`,
//!    `DB_NAME`)
//! 4. Built-in defaults (`localhost:3306`, `root`/`password`, `company_db`)
//!
//! Config files may reference the password through an environment variable
//! name (`password_env`) instead of storing it inline. Fields omitted from a
//! config file fall back to the environment/default value.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, StaffdeskError};

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 3306;
pub const DEFAULT_USER: &str = "root";
pub const DEFAULT_PASSWORD: &str = "password";
pub const DEFAULT_DATABASE: &str = "company_db";

/// Fully resolved connection configuration
///
/// Passed to the store at startup; the connection parameters never change
/// for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbConfig {
    /// MySQL hostname
    pub host: String,

    /// MySQL TCP port
    pub port: u16,

    /// Username
    pub user: String,

    /// Password
    /// WARNING: Sensitive data, do not log or include in error messages
    pub password: String,

    /// Database name
    pub database: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            user: DEFAULT_USER.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
            database: DEFAULT_DATABASE.to_string(),
        }
    }
}

/// Partial configuration as stored on disk
///
/// Every field is optional; missing fields fall back to the
/// environment-derived base config during [`FileConfig::apply`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,

    /// Environment variable name for password (if not storing it directly)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_env: Option<String>,
}

impl FileConfig {
    /// Layer this file config over a base config
    ///
    /// `password_env` takes precedence over an inline `password`; a missing
    /// environment variable is a configuration error.
    pub fn apply(self, mut base: DbConfig) -> Result<DbConfig> {
        if let Some(host) = self.host {
            base.host = host;
        }
        if let Some(port) = self.port {
            base.port = port;
        }
        if let Some(user) = self.user {
            base.user = user;
        }
        if let Some(env_var) = self.password_env {
            base.password = std::env::var(&env_var).map_err(|_| {
                StaffdeskError::config_error(format!(
                    "Environment variable {env_var} not found for password"
                ))
            })?;
        } else if let Some(password) = self.password {
            base.password = password;
        }
        if let Some(database) = self.database {
            base.database = database;
        }
        Ok(base)
    }
}

/// Build a config from environment variables over the built-in defaults
pub fn from_env() -> Result<DbConfig> {
    let mut config = DbConfig::default();

    if let Ok(host) = std::env::var("DB_HOST") {
        config.host = host;
    }
    if let Ok(port) = std::env::var("DB_PORT") {
        config.port = port.parse().map_err(|_| {
            StaffdeskError::config_error(format!("DB_PORT is not a valid port number: {port}"))
        })?;
    }
    if let Ok(user) = std::env::var("DB_USER") {
        config.user = user;
    }
    if let Ok(password) = std::env::var("DB_PASSWORD") {
        config.password = password;
    }
    if let Ok(database) = std::env::var("DB_NAME") {
        config.database = database;
    }

    Ok(config)
}

/// Get path to the local config file (`.staffdesk/config.json`)
pub fn local_config_path() -> Result<PathBuf> {
    let current_dir = std::env::current_dir().map_err(|e| {
        StaffdeskError::config_error(format!("Could not determine current directory: {e}"))
    })?;

    Ok(current_dir.join(".staffdesk").join("config.json"))
}

/// Get path to the global config file (`~/.config/staffdesk/config.json`)
pub fn global_config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().ok_or_else(|| {
        StaffdeskError::config_error("Could not determine user config directory")
    })?;

    Ok(config_dir.join("staffdesk").join("config.json"))
}

/// Load a config file, returning `None` if it does not exist
pub fn load_file(path: &Path) -> Result<Option<FileConfig>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path)
        .map_err(|e| StaffdeskError::config_error(format!("Could not read config file: {e}")))?;

    let file_config = serde_json::from_str::<FileConfig>(&contents)
        .map_err(|e| StaffdeskError::config_error(format!("Invalid config file format: {e}")))?;

    Ok(Some(file_config))
}

/// Resolve a config from explicit file locations
///
/// The first config file that exists wins; its missing fields fall back to
/// the environment-derived base.
pub fn resolve_from(local: &Path, global: &Path) -> Result<DbConfig> {
    let base = from_env()?;

    if let Some(file_config) = load_file(local)? {
        return file_config.apply(base);
    }
    if let Some(file_config) = load_file(global)? {
        return file_config.apply(base);
    }

    Ok(base)
}

/// Resolve the connection config using the standard file locations
pub fn resolve() -> Result<DbConfig> {
    resolve_from(&local_config_path()?, &global_config_path()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = DbConfig::default();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 3306);
        assert_eq!(config.user, "root");
        assert_eq!(config.database, "company_db");
    }

    #[test]
    fn test_file_config_overrides_base() {
        let file_config = FileConfig {
            host: Some("db.internal".to_string()),
            port: Some(3307),
            database: Some("company_test".to_string()),
            ..Default::default()
        };

        let config = file_config.apply(DbConfig::default()).unwrap();
        assert_eq!(config.host, "db.internal");
        assert_eq!(config.port, 3307);
        assert_eq!(config.database, "company_test");
        // Untouched fields keep their base values
        assert_eq!(config.user, "root");
        assert_eq!(config.password, "password");
    }

    #[test]
    fn test_password_env_resolution() {
        std::env::set_var("STAFFDESK_TEST_PASSWORD", "secret");

        let file_config = FileConfig {
            password: Some("ignored".to_string()),
            password_env: Some("STAFFDESK_TEST_PASSWORD".to_string()),
            ..Default::default()
        };

        let config = file_config.apply(DbConfig::default()).unwrap();
        assert_eq!(config.password, "secret");

        std::env::remove_var("STAFFDESK_TEST_PASSWORD");
    }

    #[test]
    fn test_password_env_missing() {
        let file_config = FileConfig {
            password_env: Some("STAFFDESK_TEST_MISSING_VAR".to_string()),
            ..Default::default()
        };

        let result = file_config.apply(DbConfig::default());
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("STAFFDESK_TEST_MISSING_VAR"));
    }

    #[test]
    fn test_load_file_missing_returns_none() {
        let path = std::env::temp_dir().join("staffdesk_test_does_not_exist.json");
        let result = load_file(&path).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_load_file_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let result = load_file(&path);
        assert!(matches!(result, Err(StaffdeskError::ConfigError(_))));
    }

    #[test]
    fn test_resolve_from_prefers_local_over_global() {
        let dir = tempfile::tempdir().unwrap();
        let local = dir.path().join("local.json");
        let global = dir.path().join("global.json");
        std::fs::write(&local, r#"{"database": "from_local"}"#).unwrap();
        std::fs::write(&global, r#"{"database": "from_global"}"#).unwrap();

        let config = resolve_from(&local, &global).unwrap();
        assert_eq!(config.database, "from_local");
    }

    #[test]
    fn test_resolve_from_falls_back_to_global() {
        let dir = tempfile::tempdir().unwrap();
        let local = dir.path().join("local.json");
        let global = dir.path().join("global.json");
        std::fs::write(&global, r#"{"database": "from_global", "port": 3310}"#).unwrap();

        let config = resolve_from(&local, &global).unwrap();
        assert_eq!(config.database, "from_global");
        assert_eq!(config.port, 3310);
    }
}
