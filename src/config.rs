//! Application configuration.
//!
//! Handles loading configuration from environment variables and .env files.
//! Command-line flags are applied on top by `main`.

use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::async_tasks::DEFAULT_POLL_MS;
use crate::error::{Error, Result};
use crate::settings::SETTINGS_FILE;

/// Log file name inside the log directory.
pub const LOG_FILE: &str = "slidetext.log";

/// Configuration for the application.
#[derive(Debug, Clone)]
pub struct Config {
    /// The application name
    app_name: String,
    /// The application version
    app_version: String,
    /// Where the settings file lives
    pub settings_path: PathBuf,
    /// Directory for the log file; `None` disables file logging
    pub log_dir: Option<PathBuf>,
    /// How often the clipboard watcher polls
    pub poll_interval: Duration,
}

impl Config {
    /// Get the application name.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Get the application version.
    #[must_use]
    pub fn app_version(&self) -> &str {
        &self.app_version
    }

    /// Full path of the log file, if logging to a file.
    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_dir.as_ref().map(|d| d.join(LOG_FILE))
    }
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = app_data_dir();
        Self {
            app_name: env!("CARGO_PKG_NAME").to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            settings_path: data_dir
                .as_ref()
                .map_or_else(|| PathBuf::from(SETTINGS_FILE), |d| d.join(SETTINGS_FILE)),
            log_dir: data_dir,
            poll_interval: Duration::from_millis(DEFAULT_POLL_MS),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();

        let mut config = Self::default();

        if let Ok(path) = env::var("SLIDETEXT_SETTINGS") {
            config.settings_path = expand_path(&path);
        }

        if let Ok(dir) = env::var("SLIDETEXT_LOG_DIR") {
            config.log_dir = (!dir.trim().is_empty()).then(|| expand_path(&dir));
        }

        if let Ok(ms) = env::var("SLIDETEXT_POLL_MS") {
            config.poll_interval = parse_poll_interval(&ms)?;
        }

        Ok(config)
    }
}

/// Parse a clipboard poll interval given in milliseconds.
pub fn parse_poll_interval(raw: &str) -> Result<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(ms) if ms > 0 => Ok(Duration::from_millis(ms)),
        _ => Err(Error::config(
            format!("invalid clipboard poll interval {raw:?}"),
            "Set SLIDETEXT_POLL_MS to a positive number of milliseconds",
        )),
    }
}

/// Expand `~` and turn the result into a path.
pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).to_string())
}

/// `~/Library/Application Support/slidetext` on macOS, `$XDG_DATA_HOME/slidetext` on Linux.
fn app_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join(env!("CARGO_PKG_NAME")))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn test_parse_poll_interval() {
        assert_eq!(parse_poll_interval("250").unwrap(), Duration::from_millis(250));
        assert!(parse_poll_interval("0").is_err());
        assert!(parse_poll_interval("soon").is_err());
    }

    #[test]
    fn test_defaults_point_at_settings_file() {
        let config = Config::default();
        assert!(config.settings_path.ends_with(SETTINGS_FILE));
        assert_eq!(config.app_name(), "slidetext");
    }

    #[test]
    fn test_expand_path_leaves_plain_paths() {
        assert_eq!(expand_path("/tmp/settings.json"), PathBuf::from("/tmp/settings.json"));
    }
}
