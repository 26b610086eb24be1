//! Minecraft Log Viewer - Entry Point

use clap::Parser;
use mclogview::config::{
    apply_cli_overrides, apply_env_overrides, load_config_with_precedence, merge_config,
    CliOverrides,
};
use mclogview::model::AppError;
use std::path::PathBuf;
use tracing::info;

/// Minecraft Log Viewer - TUI for browsing server logs and CoreProtect lookups
#[derive(Parser, Debug)]
#[command(name = "mclogview")]
#[command(version)]
#[command(about = "TUI application for browsing Minecraft server logs")]
pub struct Args {
    /// Directory containing .log and .log.gz files
    #[arg(long)]
    pub logs_dir: Option<PathBuf>,

    /// Directory where saved logs are written
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Start with CoreProtect parsing enabled
    #[arg(long)]
    pub coreprotect: bool,

    /// Seconds between rescans of the logs directory (must be positive)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub rescan_interval: Option<u64>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Flags the user set explicitly.
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            logs_dir: self.logs_dir.clone(),
            output_dir: self.output_dir.clone(),
            rescan_interval_secs: self.rescan_interval,
            coreprotect_mode: self.coreprotect.then_some(true),
        }
    }
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = load_config_with_precedence(args.config.clone())?;
        let merged = merge_config(config_file);
        let with_env = apply_env_overrides(merged);
        apply_cli_overrides(with_env, args.overrides())
    };

    mclogview::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    mclogview::view::run_app(&config)?;

    Ok(())
}
