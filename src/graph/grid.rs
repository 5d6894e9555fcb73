//! src/graph/grid.rs
//!
//! Value-axis projection: bounds, the 10 major / 5 minor tick scheme, and
//! the label formatting used for major gridlines and unit production.

use thiserror::Error;

/// Number of major intervals the value range is split into.
pub const MAJOR_DIVISIONS: usize = 10;

/// Minor subdivisions inside each major interval.
pub const MINOR_SUBDIVISIONS: usize = 5;

/// Total tick count for a non-degenerate range (both ends included).
pub const TICK_COUNT: usize = MAJOR_DIVISIONS * MINOR_SUBDIVISIONS + 1;

/// Squares the range is divided into when computing unit production.
pub const UNIT_SQUARES: f64 = 25.0;

/// How far (in units of the major interval) a tick may sit from a major
/// position and still count as major.
const MAJOR_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum BoundsError {
    #[error("min ({min}) is greater than max ({max})")]
    Inverted { min: f64, max: f64 },

    #[error("min and max are both {0}; the range is empty")]
    Empty(f64),

    #[error("bounds and their range must be finite numbers")]
    NotFinite,
}

/// Value-axis bounds. Stored as entered; nothing forces `min < max`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Signed width of the range.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// True when min and max are equal up to floating-point noise.
    pub fn is_degenerate(&self) -> bool {
        let scale = self.min.abs().max(self.max.abs()).max(1.0);
        self.span().abs() <= f64::EPSILON * scale
    }

    /// The pair sorted ascending, for renderers that need `lo < hi`.
    pub fn ordered(&self) -> (f64, f64) {
        if self.min <= self.max {
            (self.min, self.max)
        } else {
            (self.max, self.min)
        }
    }

    /// Checks the cross-field invariant the setters leave alone.
    pub fn validate(&self) -> Result<(), BoundsError> {
        if !self.span().is_finite() {
            return Err(BoundsError::NotFinite);
        }
        if self.is_degenerate() {
            return Err(BoundsError::Empty(self.min));
        }
        if self.min > self.max {
            return Err(BoundsError::Inverted {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    /// `(max - min) / 25`, shown next to the title.
    pub fn unit_production(&self) -> f64 {
        self.span() / UNIT_SQUARES
    }

    /// Distance between two major gridlines; zero for a degenerate range or
    /// one too wide to represent.
    pub fn main_interval(&self) -> f64 {
        if self.is_degenerate() || !self.span().is_finite() {
            0.0
        } else {
            self.span() / MAJOR_DIVISIONS as f64
        }
    }
}

/// Visual weight of a gridline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Emphasis {
    Major,
    Minor,
}

impl Emphasis {
    /// Line opacity hint. Terminal renderers dim anything below the major
    /// opacity.
    pub fn opacity(self) -> f64 {
        match self {
            Emphasis::Major => 0.1,
            Emphasis::Minor => 0.05,
        }
    }

    /// Line width hint. Terminal renderers pick a finer marker below 1.0.
    pub fn line_width(self) -> f64 {
        match self {
            Emphasis::Major => 1.0,
            Emphasis::Minor => 0.5,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub emphasis: Emphasis,
    /// Present on major ticks only.
    pub label: Option<String>,
}

impl Tick {
    pub fn is_major(&self) -> bool {
        self.emphasis == Emphasis::Major
    }
}

/// Everything a renderer needs to draw the value axis.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisSpec {
    pub min: f64,
    pub max: f64,
    pub main_interval: f64,
    pub ticks: Vec<Tick>,
}

impl AxisSpec {
    /// Build the tick layout for `bounds`.
    ///
    /// A degenerate or overflowing range yields a single labelled major tick
    /// at `min`.
    /// Inverted bounds are laid out with the same formula, so ticks run from
    /// `min` down to `max`.
    pub fn from_bounds(bounds: Bounds) -> Self {
        let main_interval = bounds.main_interval();
        if main_interval == 0.0 {
            return Self {
                min: bounds.min,
                max: bounds.max,
                main_interval,
                ticks: vec![Tick {
                    value: bounds.min,
                    emphasis: Emphasis::Major,
                    label: Some(format_grouped(bounds.min)),
                }],
            };
        }

        let steps = (TICK_COUNT - 1) as f64;
        let ticks = (0..TICK_COUNT)
            .map(|i| {
                let value = bounds.min + bounds.span() * (i as f64) / steps;
                if is_major(value, bounds.min, main_interval) {
                    Tick {
                        value,
                        emphasis: Emphasis::Major,
                        label: Some(format_grouped(value)),
                    }
                } else {
                    Tick {
                        value,
                        emphasis: Emphasis::Minor,
                        label: None,
                    }
                }
            })
            .collect();

        Self {
            min: bounds.min,
            max: bounds.max,
            main_interval,
            ticks,
        }
    }

    pub fn major_ticks(&self) -> impl Iterator<Item = &Tick> {
        self.ticks.iter().filter(|t| t.is_major())
    }

    pub fn minor_ticks(&self) -> impl Iterator<Item = &Tick> {
        self.ticks.iter().filter(|t| !t.is_major())
    }
}

/// Whether `value` lies on a major gridline of a range starting at `min`.
///
/// Compares the offset in units of `main_interval` against the nearest whole
/// number instead of using `%`, which misses ticks produced by float steps.
pub fn is_major(value: f64, min: f64, main_interval: f64) -> bool {
    if main_interval == 0.0 || !main_interval.is_finite() {
        return true;
    }
    let steps = (value - min) / main_interval;
    (steps - steps.round()).abs() < MAJOR_TOLERANCE
}

/// Format with grouped thousands and at most three fraction digits,
/// e.g. `1,000,000`, `-250,000`, `33,313.6`.
pub fn format_grouped(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let fixed = format!("{:.3}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let negative = value < 0.0 && (int_part != "0" || !frac.is_empty());
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if !frac.is_empty() {
        out.push('.');
        out.push_str(frac);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn default_range_has_hundred_thousand_interval() {
        let axis = AxisSpec::from_bounds(Bounds::new(0.0, 1_000_000.0));
        assert_relative_eq!(axis.main_interval, 100_000.0);
        assert_eq!(axis.ticks.len(), TICK_COUNT);
        assert_eq!(axis.major_ticks().count(), MAJOR_DIVISIONS + 1);
        assert_eq!(axis.minor_ticks().count(), TICK_COUNT - MAJOR_DIVISIONS - 1);

        let first = &axis.ticks[0];
        assert_eq!(first.value, 0.0);
        assert!(first.is_major());
        assert_eq!(first.label.as_deref(), Some("0"));

        for tick in axis.major_ticks() {
            let k = tick.value / 100_000.0;
            assert_relative_eq!(k, k.round(), epsilon = 1e-9);
        }
        let last = axis.ticks.last().unwrap();
        assert_eq!(last.label.as_deref(), Some("1,000,000"));
    }

    #[test]
    fn minor_ticks_have_no_label() {
        let axis = AxisSpec::from_bounds(Bounds::new(0.0, 1_000_000.0));
        assert!(axis.minor_ticks().all(|t| t.label.is_none()));
        assert_eq!(axis.ticks[1].emphasis, Emphasis::Minor);
        assert_relative_eq!(axis.ticks[1].value, 20_000.0);
    }

    #[test]
    fn degenerate_range_emits_single_major_tick() {
        let axis = AxisSpec::from_bounds(Bounds::new(500.0, 500.0));
        assert_eq!(axis.main_interval, 0.0);
        assert_eq!(axis.ticks.len(), 1);
        assert_eq!(axis.ticks[0].value, 500.0);
        assert!(axis.ticks[0].is_major());
        assert_eq!(axis.ticks[0].label.as_deref(), Some("500"));
    }

    #[test]
    fn inverted_range_is_still_laid_out() {
        let axis = AxisSpec::from_bounds(Bounds::new(100.0, 0.0));
        assert_eq!(axis.ticks.len(), TICK_COUNT);
        assert_relative_eq!(axis.main_interval, -10.0);
        assert_eq!(axis.ticks[0].value, 100.0);
        assert_relative_eq!(axis.ticks[TICK_COUNT - 1].value, 0.0);
        assert_eq!(axis.major_ticks().count(), MAJOR_DIVISIONS + 1);
    }

    #[test]
    fn float_steps_still_classify_as_major() {
        // 0.1 steps are not exactly representable.
        let axis = AxisSpec::from_bounds(Bounds::new(0.0, 1.0));
        assert_eq!(axis.major_ticks().count(), MAJOR_DIVISIONS + 1);
    }

    #[test]
    fn validate_reports_cross_field_problems() {
        assert!(Bounds::new(0.0, 10.0).validate().is_ok());
        assert_eq!(
            Bounds::new(10.0, 0.0).validate(),
            Err(BoundsError::Inverted {
                min: 10.0,
                max: 0.0
            })
        );
        assert_eq!(Bounds::new(3.0, 3.0).validate(), Err(BoundsError::Empty(3.0)));
        assert_eq!(
            Bounds::new(f64::NAN, 3.0).validate(),
            Err(BoundsError::NotFinite)
        );
        assert_eq!(Bounds::new(10.0, 0.0).ordered(), (0.0, 10.0));
    }

    #[test]
    fn overflowing_span_is_not_finite() {
        let b = Bounds::new(-1e308, 1e308);
        assert_eq!(b.validate(), Err(BoundsError::NotFinite));

        let axis = AxisSpec::from_bounds(b);
        assert_eq!(axis.main_interval, 0.0);
        assert_eq!(axis.ticks.len(), 1);
        assert_eq!(axis.ticks[0].value, -1e308);
        assert!(axis.ticks.iter().all(|t| t.value.is_finite()));
    }

    #[test]
    fn major_gridlines_outweigh_minor() {
        assert!(Emphasis::Major.opacity() > Emphasis::Minor.opacity());
        assert!(Emphasis::Major.line_width() > Emphasis::Minor.line_width());
        assert_relative_eq!(Emphasis::Major.opacity(), 0.1);
        assert_relative_eq!(Emphasis::Minor.line_width(), 0.5);
    }

    #[test]
    fn unit_production_is_span_over_25() {
        assert_relative_eq!(Bounds::new(0.0, 1_000_000.0).unit_production(), 40_000.0);
        assert_relative_eq!(Bounds::new(100.0, 0.0).unit_production(), -4.0);
    }

    #[test]
    fn grouped_formatting() {
        assert_eq!(format_grouped(0.0), "0");
        assert_eq!(format_grouped(999.0), "999");
        assert_eq!(format_grouped(1_000.0), "1,000");
        assert_eq!(format_grouped(832_820.0), "832,820");
        assert_eq!(format_grouped(-250_000.0), "-250,000");
        assert_eq!(format_grouped(12.5), "12.5");
        assert_eq!(format_grouped(33_313.6), "33,313.6");
        assert_eq!(format_grouped(0.12345), "0.123");
        assert_eq!(format_grouped(-0.0001), "0");
    }

    proptest! {
        #[test]
        fn majors_are_every_fifth_tick(
            min in -1_000_000.0f64..1_000_000.0,
            span in 1.0f64..2_000_000.0,
        ) {
            let axis = AxisSpec::from_bounds(Bounds::new(min, min + span));
            prop_assert_eq!(axis.ticks.len(), TICK_COUNT);
            for (i, tick) in axis.ticks.iter().enumerate() {
                prop_assert_eq!(tick.is_major(), i % MINOR_SUBDIVISIONS == 0);
                prop_assert_eq!(tick.label.is_some(), tick.is_major());
            }
        }
    }
}
