//! CLI argument definitions for the Xiaoxian demo binary.
//!
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::Parser;
use std::path::PathBuf;

/// Log level used until the config file has been read.
pub const BOOTSTRAP_LOG_LEVEL: &str = "info";

/// 小仙: a scripted shopping-assistant chat demo.
#[derive(Parser, Debug)]
#[command(name = "xiaoxian", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    /// Print the view state as JSON instead of text.
    #[arg(long = "json")]
    pub json: bool,

    /// Send these messages in order, print the result and exit.
    #[arg(short = 'm', long = "message")]
    pub message: Vec<String>,
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > XIAOXIAN_CONFIG env var > ~/.xiaoxian/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("XIAOXIAN_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the log level.
    ///
    /// Priority: --log-level flag > config file value.
    pub fn resolve_log_level(&self, config_level: &str) -> String {
        self.log_level
            .clone()
            .unwrap_or_else(|| config_level.to_string())
    }

    /// Level for the subscriber installed before the config is loaded.
    ///
    /// Priority: --log-level flag > `BOOTSTRAP_LOG_LEVEL`.
    pub fn bootstrap_log_level(&self) -> String {
        self.resolve_log_level(BOOTSTRAP_LOG_LEVEL)
    }

    /// Whether the config file's `general.log_level` should replace the
    /// bootstrap filter. `RUST_LOG` and `--log-level` both take precedence.
    pub fn defers_to_config_log_level(&self, rust_log_set: bool) -> bool {
        !rust_log_set && self.log_level.is_none()
    }

    /// Whether to run once over `--message` instead of starting the REPL.
    pub fn is_one_shot(&self) -> bool {
        !self.message.is_empty()
    }
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".xiaoxian").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".xiaoxian").join("config.toml");
    }
    PathBuf::from("config.toml")
}
