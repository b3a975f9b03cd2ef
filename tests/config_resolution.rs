//! Configuration Resolution
//!
//! Validates the precedence chain: local config file over global config
//! file over environment variables over built-in defaults, plus the
//! `password_env` indirection.

use std::fs;

use pretty_assertions::assert_eq;
use staffdesk::config::{load_file, resolve_from, DbConfig};
use staffdesk::StaffdeskError;

#[test]
fn defaults_match_the_stock_local_setup() {
    let config = DbConfig::default();
    assert_eq!(config.host, "localhost");
    assert_eq!(config.port, 3306);
    assert_eq!(config.user, "root");
    assert_eq!(config.password, "password");
    assert_eq!(config.database, "company_db");
}

#[test]
fn local_file_wins_over_global() {
    let dir = tempfile::tempdir().unwrap();
    let local = dir.path().join("local.json");
    let global = dir.path().join("global.json");
    fs::write(&local, r#"{"host": "local-db", "port": 3307}"#).unwrap();
    fs::write(&global, r#"{"host": "global-db"}"#).unwrap();

    let config = resolve_from(&local, &global).unwrap();
    assert_eq!(config.host, "local-db");
    assert_eq!(config.port, 3307);
}

#[test]
fn global_file_applies_when_local_is_absent() {
    let dir = tempfile::tempdir().unwrap();
    let local = dir.path().join("local.json");
    let global = dir.path().join("global.json");
    fs::write(&global, r#"{"user": "hr_app", "database": "company_prod"}"#).unwrap();

    let config = resolve_from(&local, &global).unwrap();
    assert_eq!(config.user, "hr_app");
    assert_eq!(config.database, "company_prod");
    // Fields the file omits keep their base values
    assert_eq!(config.host, "localhost");
}

#[test]
fn no_files_falls_through_to_base() {
    let dir = tempfile::tempdir().unwrap();
    let local = dir.path().join("local.json");
    let global = dir.path().join("global.json");

    let config = resolve_from(&local, &global).unwrap();
    assert_eq!(config.database, "company_db");
}

#[test]
fn password_env_indirection() {
    std::env::set_var("STAFFDESK_IT_PASSWORD", "hunter2");

    let dir = tempfile::tempdir().unwrap();
    let local = dir.path().join("local.json");
    let global = dir.path().join("global.json");
    fs::write(&local, r#"{"password_env": "STAFFDESK_IT_PASSWORD"}"#).unwrap();

    let config = resolve_from(&local, &global).unwrap();
    assert_eq!(config.password, "hunter2");

    std::env::remove_var("STAFFDESK_IT_PASSWORD");
}

#[test]
fn missing_password_env_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let local = dir.path().join("local.json");
    let global = dir.path().join("global.json");
    fs::write(&local, r#"{"password_env": "STAFFDESK_IT_NO_SUCH_VAR"}"#).unwrap();

    let result = resolve_from(&local, &global);
    assert!(matches!(result, Err(StaffdeskError::ConfigError(_))));
}

#[test]
fn malformed_config_file_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, "{ host: nope").unwrap();

    let result = load_file(&path);
    assert!(matches!(result, Err(StaffdeskError::ConfigError(_))));
}

#[test]
fn unknown_file_fields_are_tolerated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{"host": "db", "comment": "staging box"}"#).unwrap();

    let file_config = load_file(&path).unwrap().unwrap();
    assert_eq!(file_config.host.as_deref(), Some("db"));
}
