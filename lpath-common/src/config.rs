//! Bootstrap configuration loading
//!
//! Settings are resolved in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing config file is not an error: the caller gets a warning in the
//! log and the compiled defaults.

use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Course API used when nothing else is configured
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "LPATH_CONFIG";

/// Environment variable overriding the API base URL
pub const API_URL_ENV_VAR: &str = "LPATH_API_URL";

/// Environment variable carrying the bearer token
pub const TOKEN_ENV_VAR: &str = "LPATH_TOKEN";

/// Environment variable selecting the course
pub const COURSE_ENV_VAR: &str = "LPATH_COURSE_ID";

/// Shared bootstrap configuration loaded from TOML
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TomlConfig {
    /// Base URL of the course API
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Bearer token from a previous login (optional)
    #[serde(default)]
    pub token: Option<String>,

    /// Course whose path is shown; `None` selects the user's default path
    #[serde(default)]
    pub course_id: Option<u64>,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            token: None,
            course_id: None,
            logging: LoggingConfig::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Per-user config file location (`<config_dir>/lpath/config.toml`)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("lpath").join("config.toml"))
}

/// Pick the config file to read.
///
/// An explicit path (CLI or `LPATH_CONFIG`) is returned even if it does not
/// exist so the loader can warn about it; the per-user default is returned
/// only when present.
pub fn resolve_config_path(cli_arg: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    default_config_path().filter(|p| p.exists())
}

/// Load a TOML config file into `T`, falling back to `T::default()`.
///
/// Missing files degrade to defaults with a warning. A file that exists but
/// cannot be read or parsed is a `Error::Config`.
pub fn load_toml<T>(path: Option<&Path>) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    let Some(path) = path else {
        info!("No config file found, using compiled defaults");
        return Ok(T::default());
    };

    if !path.exists() {
        warn!(
            "Config file {} not found, using compiled defaults",
            path.display()
        );
        return Ok(T::default());
    }

    let content = std::fs::read_to_string(path)?;
    let config = toml::from_str::<T>(&content)
        .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;

    info!("Loaded config from {}", path.display());
    Ok(config)
}

/// Resolve one string setting by priority: CLI, environment, TOML.
///
/// Empty values are treated as unset at every level.
pub fn resolve_setting(
    cli_arg: Option<&str>,
    env_var_name: &str,
    toml_value: Option<&str>,
) -> Option<String> {
    if let Some(value) = cli_arg.filter(|v| !v.is_empty()) {
        return Some(value.to_string());
    }

    if let Ok(value) = std::env::var(env_var_name) {
        if !value.is_empty() {
            return Some(value);
        }
    }

    toml_value.filter(|v| !v.is_empty()).map(str::to_string)
}

/// Resolve the course id by priority: CLI, `LPATH_COURSE_ID`, TOML.
///
/// An environment value that is not a course id is an `Error::Config`
/// rather than being skipped.
pub fn resolve_course_id(cli_arg: Option<u64>, toml_value: Option<u64>) -> Result<Option<u64>> {
    if cli_arg.is_some() {
        return Ok(cli_arg);
    }

    if let Ok(value) = std::env::var(COURSE_ENV_VAR) {
        let value = value.trim();
        if !value.is_empty() {
            let id = value.parse::<u64>().map_err(|e| {
                Error::Config(format!("{}={:?}: {}", COURSE_ENV_VAR, value, e))
            })?;
            return Ok(Some(id));
        }
    }

    Ok(toml_value)
}
