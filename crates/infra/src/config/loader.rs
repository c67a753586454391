//! Configuration loader
//!
//! Loads application configuration from files and environment variables.
//!
//! ## Loading Strategy
//! 1. Probes multiple paths for a config file
//! 2. Falls back to built-in defaults when none is found
//! 3. Applies environment variable overrides on top
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `ROTABOARD_BASE_INTERVAL_MS`: Base interval between cycles
//! - `ROTABOARD_RETRY_DELAY_MS`: Delay after a failed cycle
//! - `ROTABOARD_WIDGET_TIMEOUT_MS`: Upper bound on one widget call
//! - `ROTABOARD_JOIN_TIMEOUT_MS`: Time `stop` waits for the loop task
//!
//! Widgets can only be declared in a file.
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./rotaboard.toml`, `./rotaboard.json`, `./config.toml`,
//!    `./config.json` (current working directory)
//! 2. The same names in the parent and grandparent directories
//! 3. The same names relative to the executable location

use std::env::VarError;
use std::path::{Path, PathBuf};

use rotaboard_domain::{Config, Result, RotaboardError};

const CONFIG_FILE_NAMES: [&str; 4] =
    ["rotaboard.toml", "rotaboard.json", "config.toml", "config.json"];

const ENV_BASE_INTERVAL_MS: &str = "ROTABOARD_BASE_INTERVAL_MS";
const ENV_RETRY_DELAY_MS: &str = "ROTABOARD_RETRY_DELAY_MS";
const ENV_WIDGET_TIMEOUT_MS: &str = "ROTABOARD_WIDGET_TIMEOUT_MS";
const ENV_JOIN_TIMEOUT_MS: &str = "ROTABOARD_JOIN_TIMEOUT_MS";

/// Load configuration with automatic fallback strategy
///
/// Uses the first config file found by [`probe_config_paths`], or the
/// defaults if there is none, then applies environment overrides.
///
/// # Errors
/// Returns `RotaboardError::Config` if a file is found but cannot be read or
/// parsed, or an override holds an invalid value.
pub fn load() -> Result<Config> {
    let config = match probe_config_paths() {
        Some(path) => load_from_file(Some(path))?,
        None => {
            tracing::info!("No config file found, using defaults");
            Config::default()
        }
    };

    apply_env_overrides(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `RotaboardError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(RotaboardError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            RotaboardError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| RotaboardError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Apply `ROTABOARD_*` environment overrides to `config`
///
/// # Errors
/// Returns `RotaboardError::Config` if a variable is set but is not a
/// non-negative integer.
pub fn apply_env_overrides(mut config: Config) -> Result<Config> {
    let rotation = &mut config.rotation;
    let overrides: [(&str, &mut u64); 4] = [
        (ENV_BASE_INTERVAL_MS, &mut rotation.base_interval_ms),
        (ENV_RETRY_DELAY_MS, &mut rotation.retry_delay_ms),
        (ENV_WIDGET_TIMEOUT_MS, &mut rotation.widget_timeout_ms),
        (ENV_JOIN_TIMEOUT_MS, &mut rotation.join_timeout_ms),
    ];

    for (key, field) in overrides {
        if let Some(value) = env_u64(key)? {
            tracing::debug!(key, value, "Applying environment override");
            *field = value;
        }
    }

    Ok(config)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
///
/// # Errors
/// Returns `RotaboardError::Config` if format is invalid or parsing fails.
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| RotaboardError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| RotaboardError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(RotaboardError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.extend([cwd.clone(), cwd.join(".."), cwd.join("../..")]);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            roots.extend([exe_dir.to_path_buf(), exe_dir.join(".."), exe_dir.join("../..")]);
        }
    }

    roots
        .iter()
        .flat_map(|root| CONFIG_FILE_NAMES.iter().map(move |name| root.join(name)))
        .find(|path| path.exists())
}

/// Parse an optional integer environment variable
///
/// # Errors
/// Returns `RotaboardError::Config` if the variable is set but invalid.
fn env_u64(key: &str) -> Result<Option<u64>> {
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse::<u64>().map(Some).map_err(|e| {
            RotaboardError::Config(format!("Invalid value for {}: {:?} ({})", key, raw, e))
        }),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(raw)) => Err(RotaboardError::Config(format!(
            "Invalid value for {}: {:?} (not UTF-8)",
            key, raw
        ))),
    }
}
