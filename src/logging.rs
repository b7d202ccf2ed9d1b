//! Log setup.
//!
//! The terminal belongs to the slide view, so logs go to a file in the
//! application data directory. `SLIDETEXT_LOG` takes an `EnvFilter` directive
//! (default `info`).

use fs_err as fs;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::error::{Error, Result};

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "SLIDETEXT_LOG";

/// Install the global subscriber writing to the configured log file.
///
/// Does nothing when file logging is disabled. Calling it twice is harmless.
pub fn init(config: &Config) -> Result<()> {
    let (Some(dir), Some(path)) = (config.log_dir.as_ref(), config.log_path()) else {
        return Ok(());
    };

    fs::create_dir_all(dir).map_err(|e| Error::io(e, dir.clone()))?;
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| Error::io(e, path.clone()))?;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!("Logging to {}", path.display());
    }
    Ok(())
}
