//! src/config.rs
//!
//! Command-line arguments and the optional TOML settings file.
//!
//! Precedence: built-in defaults, then the file given with `--config`,
//! then individual command-line flags.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::Parser;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::graph::GraphConfig;
use crate::graph::grid::{Bounds, BoundsError};
use crate::graph::window::format_date;

#[derive(Debug, Parser)]
#[command(name = "weekly-graph", version, about = "Weekly value tracker with a scrolling chart")]
pub struct Args {
    /// TOML settings file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Title for the first graph
    #[arg(short, long)]
    pub title: Option<String>,

    /// Date of week 0 (YYYY-MM-DD)
    #[arg(short, long)]
    pub start_date: Option<NaiveDate>,

    /// Write logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid graph bounds: {0}")]
    Bounds(#[from] BoundsError),

    #[error("date_format {0:?} cannot render a calendar date")]
    DateFormat(String),
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log destination; logging stays off when unset.
    pub file: Option<PathBuf>,

    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: None,
            filter: "info".to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub graph: GraphConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Parse settings from TOML text. `path` is only used in errors.
    pub fn from_toml(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Bounds::new(cfg.graph.min, cfg.graph.max).validate()?;
        if format_date(NaiveDate::default(), &cfg.graph.date_format).is_none() {
            return Err(ConfigError::DateFormat(cfg.graph.date_format));
        }
        Ok(cfg)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text, path)
    }

    /// Defaults, overlaid with the `--config` file, overlaid with flags.
    pub fn resolve(args: &Args) -> Result<Self, ConfigError> {
        let mut cfg = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        if let Some(title) = &args.title {
            cfg.graph.title = title.clone();
        }
        if let Some(date) = args.start_date {
            cfg.graph.start_date = Some(date);
        }
        if let Some(file) = &args.log_file {
            cfg.logging.file = Some(file.clone());
        }
        Ok(cfg)
    }

    /// Log where the settings came from, once tracing is up.
    pub fn log_summary(&self, args: &Args) {
        info!(
            config = ?args.config,
            title = %self.graph.title,
            min = self.graph.min,
            max = self.graph.max,
            start_date = ?self.graph.start_date,
            "configuration loaded"
        );
    }
}
