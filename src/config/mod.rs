//! Configuration module.
//!
//! Settings resolve through Defaults → Config File → Env Vars → CLI Args.

pub mod loader;

pub use loader::{
    apply_cli_overrides, apply_env_overrides, default_config_path, load_config_with_precedence,
    merge_config, CliOverrides, ConfigError, ConfigFile, ResolvedConfig,
};
