//! src/telemetry.rs
//!
//! File-backed `tracing` setup. The terminal is owned by the UI, so logs only
//! go somewhere when a log file is configured.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Install the global subscriber if `cfg.file` is set.
///
/// `RUST_LOG` takes precedence over `cfg.filter`. Returns `Ok(false)` when
/// logging is disabled or a subscriber was already installed.
pub fn init_tracing(cfg: &LoggingConfig) -> std::io::Result<bool> {
    let Some(path) = &cfg.file else {
        return Ok(false);
    };
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cfg.filter.as_str()));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .compact()
        .try_init()
        .is_ok();
    Ok(installed)
}
