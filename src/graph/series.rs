//! src/graph/series.rs
//!
//! The weekly series store: values, start date, bounds, selection, and the
//! derived week dates. Every mutation keeps the selection inside the
//! visible window.

use chrono::{Days, NaiveDate};
use tracing::debug;

use super::config::GraphConfig;
use super::grid::Bounds;
use super::window::{rescroll, week_count};

/// Parse user input as a number; anything unusable becomes 0.
///
/// Empty text, non-numeric text, NaN and infinities all coerce to `0.0`.
pub fn parse_number(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

#[derive(Clone, Debug)]
pub struct SeriesStore {
    values: Vec<f64>,
    start_date: Option<NaiveDate>,
    bounds: Bounds,
    selected: usize,
    display_start: usize,
    week_dates: Vec<NaiveDate>,
    title: String,
}

impl SeriesStore {
    /// A store holding just the seed value, with the selection on week 0.
    pub fn new(cfg: &GraphConfig) -> Self {
        let mut store = Self {
            values: vec![cfg.seed_value],
            start_date: None,
            bounds: Bounds::new(cfg.min, cfg.max),
            selected: 0,
            display_start: 0,
            week_dates: Vec::new(),
            title: cfg.title.clone(),
        };
        store.set_start_date(cfg.start_date);
        store
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn display_start(&self) -> usize {
        self.display_start
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    /// Empty until a start date is set.
    pub fn week_dates(&self) -> &[NaiveDate] {
        &self.week_dates
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// True when the selection sits one past the last value.
    pub fn is_pending(&self) -> bool {
        self.selected == self.values.len()
    }

    /// Value under the selection, `None` while pending.
    pub fn selected_value(&self) -> Option<f64> {
        self.values.get(self.selected).copied()
    }

    /// Parse `raw` and store it at `index`.
    ///
    /// Returns `false` (and leaves the series alone) when `index` is not an
    /// existing week.
    pub fn set_value(&mut self, index: usize, raw: &str) -> bool {
        let Some(slot) = self.values.get_mut(index) else {
            debug!(index, len = self.values.len(), "ignoring value for missing week");
            return false;
        };
        *slot = parse_number(raw);
        debug!(index, value = *slot, "value set");
        self.display_start = rescroll(self.selected, self.display_start);
        true
    }

    /// Append a zero week. Only allowed from the pending slot.
    pub fn append_week(&mut self) -> bool {
        if !self.is_pending() {
            return false;
        }
        self.values.push(0.0);
        debug!(len = self.values.len(), "week appended");
        self.recompute_week_dates();
        true
    }

    /// Select a week; `len()` selects the pending slot. Larger indices clamp.
    pub fn select_week(&mut self, index: usize) {
        self.selected = index.min(self.values.len());
        self.display_start = rescroll(self.selected, self.display_start);
        debug!(
            selected = self.selected,
            display_start = self.display_start,
            "week selected"
        );
    }

    pub fn set_min(&mut self, min: f64) {
        self.bounds.min = min;
    }

    pub fn set_max(&mut self, max: f64) {
        self.bounds.max = max;
    }

    pub fn set_min_raw(&mut self, raw: &str) {
        self.set_min(parse_number(raw));
    }

    pub fn set_max_raw(&mut self, raw: &str) {
        self.set_max(parse_number(raw));
    }

    /// Replace both bounds. No ordering is enforced here.
    pub fn set_bounds(&mut self, min: f64, max: f64) {
        self.bounds = Bounds::new(min, max);
    }

    pub fn set_start_date(&mut self, date: Option<NaiveDate>) {
        self.start_date = date;
        self.recompute_week_dates();
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    /// Mutable access for in-place title editing.
    pub fn title_mut(&mut self) -> &mut String {
        &mut self.title
    }

    fn recompute_week_dates(&mut self) {
        self.week_dates.clear();
        let Some(start) = self.start_date else {
            return;
        };
        for i in 0..week_count(self.values.len()) {
            match start.checked_add_days(Days::new(7 * i as u64)) {
                Some(d) => self.week_dates.push(d),
                None => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::config::VISIBLE_WEEKS;
    use proptest::prelude::*;

    fn store_with_len(len: usize) -> SeriesStore {
        let mut s = SeriesStore::new(&GraphConfig::default());
        while s.len() < len {
            s.select_week(s.len());
            s.append_week();
        }
        s.select_week(0);
        s
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn new_store_is_seeded() {
        let s = SeriesStore::new(&GraphConfig::default());
        assert_eq!(s.values(), &[832_820.0]);
        assert_eq!(s.selected(), 0);
        assert_eq!(s.display_start(), 0);
        assert!(s.week_dates().is_empty());
        assert_eq!(s.title(), "Weekly Productivity");
        assert_eq!(s.bounds(), Bounds::new(0.0, 1_000_000.0));
    }

    #[test]
    fn parse_number_coerces_garbage_to_zero() {
        assert_eq!(parse_number("42"), 42.0);
        assert_eq!(parse_number(" 12.5 "), 12.5);
        assert_eq!(parse_number("-3"), -3.0);
        assert_eq!(parse_number("1e3"), 1000.0);
        assert_eq!(parse_number(""), 0.0);
        assert_eq!(parse_number("abc"), 0.0);
        assert_eq!(parse_number("NaN"), 0.0);
        assert_eq!(parse_number("inf"), 0.0);
    }

    #[test]
    fn set_value_parses_input() {
        let mut s = store_with_len(3);
        assert!(s.set_value(1, "abc"));
        assert_eq!(s.values()[1], 0.0);
        assert!(s.set_value(1, "42"));
        assert_eq!(s.values()[1], 42.0);
        assert_eq!(s.values()[0], 832_820.0);
        assert_eq!(s.values()[2], 0.0);
    }

    #[test]
    fn set_value_out_of_range_is_ignored() {
        let mut s = store_with_len(2);
        assert!(!s.set_value(2, "7"));
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn append_week_only_from_pending_slot() {
        let mut s = SeriesStore::new(&GraphConfig::default());
        assert!(!s.append_week());
        assert_eq!(s.len(), 1);

        s.select_week(1);
        assert!(s.is_pending());
        assert_eq!(s.selected_value(), None);
        assert!(s.append_week());
        assert_eq!(s.len(), 2);
        assert_eq!(s.values()[1], 0.0);
        // selection now points at the new week
        assert!(!s.is_pending());
        assert_eq!(s.selected_value(), Some(0.0));
    }

    #[test]
    fn select_week_clamps_to_pending_slot() {
        let mut s = store_with_len(3);
        s.select_week(99);
        assert_eq!(s.selected(), 3);
        assert!(s.is_pending());
    }

    #[test]
    fn week_dates_follow_start_date_and_length() {
        let mut s = store_with_len(3);
        s.set_start_date(Some(ymd(2024, 1, 1)));
        let dates = s.week_dates();
        assert_eq!(dates.len(), VISIBLE_WEEKS);
        assert_eq!(
            &dates[..4],
            &[
                ymd(2024, 1, 1),
                ymd(2024, 1, 8),
                ymd(2024, 1, 15),
                ymd(2024, 1, 22)
            ]
        );

        let mut long = store_with_len(9);
        long.set_start_date(Some(ymd(2024, 1, 1)));
        assert_eq!(long.week_dates().len(), 10);
        long.select_week(9);
        long.append_week();
        assert_eq!(long.week_dates().len(), 11);
        assert_eq!(long.week_dates()[10], ymd(2024, 3, 11));
    }

    #[test]
    fn clearing_start_date_clears_week_dates() {
        let mut s = store_with_len(2);
        s.set_start_date(Some(ymd(2024, 1, 1)));
        s.set_start_date(None);
        assert!(s.week_dates().is_empty());
    }

    #[test]
    fn selecting_past_window_scrolls_forward() {
        let mut s = store_with_len(10);
        assert_eq!(s.display_start(), 0);
        s.select_week(9);
        assert_eq!(s.display_start(), 2);
        s.select_week(7);
        assert_eq!(s.display_start(), 2);
        s.select_week(1);
        assert_eq!(s.display_start(), 1);
    }

    #[test]
    fn editing_last_visible_week_does_not_scroll() {
        let mut s = store_with_len(10);
        s.select_week(7);
        s.set_value(7, "5");
        assert_eq!(s.display_start(), 0);
    }

    #[test]
    fn bounds_setters_are_independent() {
        let mut s = SeriesStore::new(&GraphConfig::default());
        s.set_min(2_000_000.0);
        assert_eq!(s.bounds(), Bounds::new(2_000_000.0, 1_000_000.0));
        s.set_max_raw("oops");
        assert_eq!(s.bounds().max, 0.0);
        s.set_bounds(1.0, 2.0);
        s.set_min_raw("-5");
        assert_eq!(s.bounds(), Bounds::new(-5.0, 2.0));
    }

    #[test]
    fn set_title_accepts_any_text() {
        let mut s = SeriesStore::new(&GraphConfig::default());
        s.set_title("Q3 output (units)");
        assert_eq!(s.title(), "Q3 output (units)");
        s.set_title("");
        assert_eq!(s.title(), "");
        assert_eq!(s.values(), &[832_820.0]);
    }

    #[derive(Clone, Debug)]
    enum Op {
        Select(usize),
        Set(usize, i32),
        Append,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0usize..40).prop_map(Op::Select),
            (0usize..40, any::<i32>()).prop_map(|(i, v)| Op::Set(i, v)),
            Just(Op::Append),
        ]
    }

    proptest! {
        #[test]
        fn selection_stays_inside_window(ops in prop::collection::vec(op(), 0..80)) {
            let mut s = SeriesStore::new(&GraphConfig::default());
            for op in ops {
                let before = s.len();
                match op {
                    Op::Select(i) => s.select_week(i),
                    Op::Set(i, v) => { s.set_value(i, &v.to_string()); }
                    Op::Append => {
                        let appended = s.append_week();
                        prop_assert_eq!(s.len(), before + usize::from(appended));
                    }
                }
                prop_assert!(s.selected() <= s.len());
                prop_assert!(s.display_start() <= s.selected());
                prop_assert!(s.selected() < s.display_start() + VISIBLE_WEEKS);
            }
        }
    }
}
