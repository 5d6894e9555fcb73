//! src/graph/window.rs
//!
//! The 8-week scroll window and the `{labels, values, axis}` projection
//! handed to the renderer.

use std::fmt::Write as _;
use std::ops::Range;

use chrono::NaiveDate;

use super::config::VISIBLE_WEEKS;
use super::grid::AxisSpec;
use super::series::SeriesStore;

/// New display start that keeps `selected` inside the window.
///
/// Scrolls forward just enough to put the selection in the last slot, or
/// backward so it becomes the first slot. Otherwise the window stays put.
pub fn rescroll(selected: usize, display_start: usize) -> usize {
    if selected >= display_start + VISIBLE_WEEKS {
        selected + 1 - VISIBLE_WEEKS
    } else if selected < display_start {
        selected
    } else {
        display_start
    }
}

/// Number of week slots that exist for a series of `len` values: one per
/// value, one pending slot, and never fewer than a full window.
pub fn week_count(len: usize) -> usize {
    (len + 1).max(VISIBLE_WEEKS)
}

/// `start .. start + 8` clipped to `total`.
pub fn visible_range(display_start: usize, total: usize) -> Range<usize> {
    let start = display_start.min(total);
    start..(start + VISIBLE_WEEKS).min(total)
}

/// Fallback when a label format cannot render a date.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Render `date` with a strftime-style format.
///
/// `None` when the format has items a plain date cannot fill (`%H`) or is
/// malformed (`%Q`).
pub fn format_date(date: NaiveDate, date_format: &str) -> Option<String> {
    let mut out = String::new();
    write!(out, "{}", date.format(date_format)).ok()?;
    Some(out)
}

/// Week label: the formatted date when known, `#n` otherwise.
pub fn week_label(index: usize, date: Option<NaiveDate>, date_format: &str) -> String {
    match date {
        Some(d) => format_date(d, date_format)
            .unwrap_or_else(|| d.format(ISO_DATE_FORMAT).to_string()),
        None => format!("#{}", index + 1),
    }
}

/// What the chart surface draws for one graph.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartProjection {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub axis: AxisSpec,
}

impl ChartProjection {
    /// Project the store's current window.
    pub fn from_store(store: &SeriesStore, date_format: &str) -> Self {
        let start = store.display_start();
        let values = store.values()[visible_range(start, store.len())].to_vec();

        let dates = store.week_dates();
        let labels = visible_range(start, week_count(store.len()))
            .map(|i| week_label(i, dates.get(i).copied(), date_format))
            .collect();

        Self {
            labels,
            values,
            axis: AxisSpec::from_bounds(store.bounds()),
        }
    }

    /// `(x, y)` points with x relative to the window start.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.values
            .iter()
            .enumerate()
            .map(|(i, v)| (i as f64, *v))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rescroll_forward_puts_selection_last() {
        assert_eq!(rescroll(9, 0), 2);
        assert_eq!(rescroll(8, 0), 1);
    }

    #[test]
    fn rescroll_inside_window_is_stable() {
        // The last slot of the window does not trigger a scroll.
        assert_eq!(rescroll(7, 0), 0);
        assert_eq!(rescroll(3, 2), 2);
    }

    #[test]
    fn rescroll_backward_puts_selection_first() {
        assert_eq!(rescroll(1, 4), 1);
        assert_eq!(rescroll(0, 4), 0);
    }

    #[test]
    fn visible_range_clips_at_end() {
        assert_eq!(visible_range(0, 3), 0..3);
        assert_eq!(visible_range(2, 10), 2..10);
        assert_eq!(visible_range(5, 20), 5..13);
        assert_eq!(visible_range(12, 10), 10..10);
    }

    #[test]
    fn week_count_never_below_window() {
        assert_eq!(week_count(1), VISIBLE_WEEKS);
        assert_eq!(week_count(7), VISIBLE_WEEKS);
        assert_eq!(week_count(8), 9);
    }

    #[test]
    fn labels_fall_back_to_week_numbers() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 8);
        assert_eq!(week_label(1, d, "%b %-d"), "Jan 8");
        assert_eq!(week_label(1, None, "%b %-d"), "#2");
    }

    #[test]
    fn unrenderable_format_falls_back_to_iso() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 8);
        assert_eq!(week_label(1, d, "%H:%M"), "2024-01-08");
        assert_eq!(week_label(1, d, "%Q"), "2024-01-08");
        assert_eq!(format_date(NaiveDate::default(), "%H"), None);
    }

    #[test]
    fn projection_survives_time_only_format() {
        let cfg = crate::graph::GraphConfig {
            date_format: "%H:%M".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            ..Default::default()
        };
        let store = SeriesStore::new(&cfg);
        let p = ChartProjection::from_store(&store, &cfg.date_format);
        assert_eq!(p.labels[0], "2024-01-01");
        assert_eq!(p.labels[1], "2024-01-08");
    }
}
