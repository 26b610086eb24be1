//! Configuration file loading with precedence handling.

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "MCLOGVIEW_CONFIG";
/// Environment variable overriding the logs directory.
pub const LOGS_DIR_ENV: &str = "MCLOGVIEW_LOGS_DIR";
/// Environment variable overriding the output directory.
pub const OUTPUT_DIR_ENV: &str = "MCLOGVIEW_OUTPUT_DIR";

const APP_DIR: &str = "mclogview";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional. Corresponds to `~/.config/mclogview/config.toml`:
///
/// ```toml
/// logs_dir = "/srv/minecraft/logs"
/// output_dir = "/srv/minecraft/exports"
/// rescan_interval_secs = 5
/// coreprotect_mode = false
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Directory scanned for `.log` and `.log.gz` files.
    #[serde(default)]
    pub logs_dir: Option<PathBuf>,

    /// Directory receiving saved exports.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Seconds between background rescans of the logs directory.
    #[serde(default)]
    pub rescan_interval_secs: Option<u64>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Start with CoreProtect parsing enabled.
    #[serde(default)]
    pub coreprotect_mode: Option<bool>,

    /// File receiving keystrokes emitted by macros.
    #[serde(default)]
    pub transcript_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Logs directory.
    pub logs_dir: PathBuf,
    /// Export directory.
    pub output_dir: PathBuf,
    /// Rescan period. Never zero.
    pub rescan_interval: Duration,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
    /// Initial CoreProtect mode.
    pub coreprotect_mode: bool,
    /// Macro keystroke transcript.
    pub transcript_path: PathBuf,
}

/// Default rescan period.
pub const DEFAULT_RESCAN_INTERVAL: Duration = Duration::from_secs(5);

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            logs_dir: PathBuf::from("logs"),
            output_dir: PathBuf::from("output"),
            rescan_interval: DEFAULT_RESCAN_INTERVAL,
            log_file_path: default_log_path(),
            coreprotect_mode: false,
            transcript_path: default_transcript_path(),
        }
    }
}

fn state_file(name: &str) -> PathBuf {
    match dirs::state_dir() {
        Some(state_dir) => state_dir.join(APP_DIR).join(name),
        None => PathBuf::from(name),
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/mclogview/mclogview.log` on Unix-like systems.
/// Falls back to the current directory when no state directory exists.
pub fn default_log_path() -> PathBuf {
    state_file("mclogview.log")
}

/// Resolve default macro transcript path, next to the log file.
pub fn default_transcript_path() -> PathBuf {
    state_file("macro-transcript.log")
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/mclogview/config.toml` on Unix.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `MCLOGVIEW_CONFIG` environment variable
/// 3. Default path `~/.config/mclogview/config.toml`
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Some(env_path) = std::env::var_os(CONFIG_ENV) {
        if env_path.is_empty() {
            return Err(ConfigError::InvalidPath(format!("{CONFIG_ENV} is empty")));
        }
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// A zero `rescan_interval_secs` is treated as unset.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        logs_dir: config.logs_dir.unwrap_or(defaults.logs_dir),
        output_dir: config.output_dir.unwrap_or(defaults.output_dir),
        rescan_interval: config
            .rescan_interval_secs
            .filter(|&secs| secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.rescan_interval),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        coreprotect_mode: config.coreprotect_mode.unwrap_or(defaults.coreprotect_mode),
        transcript_path: config.transcript_path.unwrap_or(defaults.transcript_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks `MCLOGVIEW_LOGS_DIR` and `MCLOGVIEW_OUTPUT_DIR`. Empty values are ignored.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Some(dir) = std::env::var_os(LOGS_DIR_ENV).filter(|v| !v.is_empty()) {
        config.logs_dir = PathBuf::from(dir);
    }
    if let Some(dir) = std::env::var_os(OUTPUT_DIR_ENV).filter(|v| !v.is_empty()) {
        config.output_dir = PathBuf::from(dir);
    }
    config
}

/// Flags explicitly set on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// `--logs-dir`
    pub logs_dir: Option<PathBuf>,
    /// `--output-dir`
    pub output_dir: Option<PathBuf>,
    /// `--rescan-interval`, in seconds
    pub rescan_interval_secs: Option<u64>,
    /// `--coreprotect`
    pub coreprotect_mode: Option<bool>,
}

/// Apply CLI argument overrides to resolved config.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(mut config: ResolvedConfig, cli: CliOverrides) -> ResolvedConfig {
    if let Some(dir) = cli.logs_dir {
        config.logs_dir = dir;
    }
    if let Some(dir) = cli.output_dir {
        config.output_dir = dir;
    }
    if let Some(secs) = cli.rescan_interval_secs.filter(|&secs| secs > 0) {
        config.rescan_interval = Duration::from_secs(secs);
    }
    if let Some(mode) = cli.coreprotect_mode {
        config.coreprotect_mode = mode;
    }
    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
