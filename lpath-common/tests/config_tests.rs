//! Configuration loading and priority resolution
//!
//! Tests that touch LPATH_* environment variables are marked `#[serial]`
//! so they never race each other.

use lpath_common::config::{
    load_toml, resolve_config_path, resolve_course_id, resolve_setting, TomlConfig,
    CONFIG_ENV_VAR, COURSE_ENV_VAR, DEFAULT_API_URL, TOKEN_ENV_VAR,
};
use lpath_common::Error;
use serial_test::serial;
use std::env;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

#[test]
fn test_load_full_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
api_url = "https://courses.example.com"
token = "abc"
course_id = 2

[logging]
level = "debug"
"#
    )
    .unwrap();

    let config: TomlConfig = load_toml(Some(file.path())).unwrap();
    assert_eq!(config.api_url, "https://courses.example.com");
    assert_eq!(config.token.as_deref(), Some("abc"));
    assert_eq!(config.course_id, Some(2));
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_missing_file_degrades_to_defaults() {
    let config: TomlConfig = load_toml(Some(Path::new("/nonexistent/lpath/config.toml"))).unwrap();
    assert_eq!(config.api_url, DEFAULT_API_URL);
}

#[test]
fn test_malformed_file_is_config_error() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "course_id = \"not a number\"").unwrap();

    let result: Result<TomlConfig, _> = load_toml(Some(file.path()));
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
#[serial]
fn test_setting_priority_order() {
    env::remove_var(TOKEN_ENV_VAR);

    // TOML only
    assert_eq!(
        resolve_setting(None, TOKEN_ENV_VAR, Some("from-toml")).as_deref(),
        Some("from-toml")
    );

    // Environment beats TOML
    env::set_var(TOKEN_ENV_VAR, "from-env");
    assert_eq!(
        resolve_setting(None, TOKEN_ENV_VAR, Some("from-toml")).as_deref(),
        Some("from-env")
    );

    // CLI beats environment
    assert_eq!(
        resolve_setting(Some("from-cli"), TOKEN_ENV_VAR, Some("from-toml")).as_deref(),
        Some("from-cli")
    );

    env::remove_var(TOKEN_ENV_VAR);
}

#[test]
#[serial]
fn test_empty_values_are_unset() {
    env::set_var(TOKEN_ENV_VAR, "");
    assert_eq!(resolve_setting(Some(""), TOKEN_ENV_VAR, Some("")), None);
    env::remove_var(TOKEN_ENV_VAR);
}

#[test]
#[serial]
fn test_config_path_resolution() {
    env::remove_var(CONFIG_ENV_VAR);

    let explicit = Path::new("/tmp/explicit.toml");
    assert_eq!(resolve_config_path(Some(explicit)).as_deref(), Some(explicit));

    env::set_var(CONFIG_ENV_VAR, "/tmp/from-env.toml");
    assert_eq!(
        resolve_config_path(None).as_deref(),
        Some(Path::new("/tmp/from-env.toml"))
    );
    // CLI still wins
    assert_eq!(resolve_config_path(Some(explicit)).as_deref(), Some(explicit));

    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial]
fn test_course_id_priority_order() {
    env::remove_var(COURSE_ENV_VAR);
    assert_eq!(resolve_course_id(None, Some(2)).unwrap(), Some(2));
    assert_eq!(resolve_course_id(None, None).unwrap(), None);

    env::set_var(COURSE_ENV_VAR, "7");
    assert_eq!(resolve_course_id(None, Some(2)).unwrap(), Some(7));
    assert_eq!(resolve_course_id(Some(9), Some(2)).unwrap(), Some(9));

    // Empty means unset
    env::set_var(COURSE_ENV_VAR, "");
    assert_eq!(resolve_course_id(None, Some(2)).unwrap(), Some(2));

    env::remove_var(COURSE_ENV_VAR);
}

#[test]
#[serial]
fn test_malformed_course_env_is_config_error() {
    env::set_var(COURSE_ENV_VAR, "rust-101");
    let result = resolve_course_id(None, Some(2));
    assert!(matches!(result, Err(Error::Config(msg)) if msg.contains(COURSE_ENV_VAR)));

    // CLI still wins without looking at the environment
    assert_eq!(resolve_course_id(Some(3), None).unwrap(), Some(3));
    env::remove_var(COURSE_ENV_VAR);
}
