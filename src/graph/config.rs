//! src/graph/config.rs
//!
//! Configuration values every new graph widget starts from.
//!
//! Centralized defaults for the seeded series, bounds, title, and date labels.

use chrono::NaiveDate;
use serde::Deserialize;

/// Number of weeks shown at once in the chart window.
pub const VISIBLE_WEEKS: usize = 8;

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct GraphConfig {
    /// Title given to freshly created graphs.
    pub title: String,

    /// The single value a new series is seeded with.
    pub seed_value: f64,

    /// Initial lower bound of the value axis.
    pub min: f64,

    /// Initial upper bound of the value axis.
    pub max: f64,

    /// Optional start date applied to new graphs.
    pub start_date: Option<NaiveDate>,

    /// chrono format string used for week labels.
    pub date_format: String,
}

impl GraphConfig {
    /// Create a new `GraphConfig` with the default label format and no start date.
    pub fn new(title: &str, seed_value: f64, bounds: (f64, f64)) -> Self {
        Self {
            title: title.to_string(),
            seed_value,
            min: bounds.0,
            max: bounds.1,
            ..Self::default()
        }
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            title: "Weekly Productivity".to_string(),
            seed_value: 832_820.0,
            min: 0.0,
            max: 1_000_000.0,
            start_date: None,
            date_format: "%b %-d".to_string(),
        }
    }
}
