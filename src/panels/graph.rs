//! src/panels/graph.rs
//!
//! Graph panel: renders the stats row and the windowed line chart with its
//! major/minor gridlines.
//!
//! All numbers come from the widget's `ChartProjection`; this file only maps
//! them onto ratatui datasets and axes.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
};

use crate::graph::WeeklyGraph;
use crate::graph::grid::{Bounds, Emphasis, Tick};

/// Renders one graph's chart.
pub struct GraphPanel<'a> {
    pub graph: &'a WeeklyGraph,
    pub highlighted: bool,
}

impl<'a> GraphPanel<'a> {
    pub fn new(graph: &'a WeeklyGraph, highlighted: bool) -> Self {
        Self { graph, highlighted }
    }

    /// Axis bounds for ratatui, which needs `lo < hi`.
    ///
    /// A degenerate range is padded the way flat data is padded elsewhere:
    /// 10% of the magnitude, at least 1.
    fn y_bounds(bounds: Bounds) -> (f64, f64) {
        let (lo, hi) = bounds.ordered();
        if bounds.is_degenerate() {
            let pad = lo.abs().max(1.0) * 0.1;
            (lo - pad, hi + pad)
        } else {
            (lo, hi)
        }
    }

    /// Keep every n-th major label so they fit in `rows` lines.
    ///
    /// Only strides that divide the 10 major intervals evenly are used, so
    /// the kept labels stay evenly spaced.
    fn label_stride(label_count: usize, rows: usize) -> usize {
        [1, 2, 5, 10]
            .into_iter()
            .find(|s| label_count.div_ceil(*s) <= rows.max(2))
            .unwrap_or(10)
    }

    /// Terminal rendition of the emphasis hints: faint lines are dimmed.
    fn gridline_style(emphasis: Emphasis) -> Style {
        let style = Style::default().fg(Color::DarkGray);
        if emphasis.opacity() < Emphasis::Major.opacity() {
            style.add_modifier(Modifier::DIM)
        } else {
            style
        }
    }

    /// Thin lines use braille dots, full-width lines the plain dot.
    fn gridline_marker(emphasis: Emphasis) -> symbols::Marker {
        if emphasis.line_width() < 1.0 {
            symbols::Marker::Braille
        } else {
            symbols::Marker::Dot
        }
    }
}

impl crate::ui::Panel for GraphPanel<'_> {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let store = &self.graph.store;
        let projection = self.graph.projection();

        // Stats row
        let week = if store.is_pending() {
            format!("new week {}", store.selected() + 1)
        } else {
            format!("week {}/{}", store.selected() + 1, store.len())
        };
        let stats_text = format!(
            "Unit Production: {}  |  {}",
            self.graph.unit_production_label(),
            week
        );
        let mut stats_block = Block::default()
            .title(store.title().to_string())
            .borders(Borders::ALL);
        if self.highlighted {
            stats_block = stats_block.border_style(Style::default().fg(Color::Yellow));
        }
        f.render_widget(Paragraph::new(stats_text).block(stats_block), chunks[0]);

        let (ymin, ymax) = Self::y_bounds(store.bounds());
        let x_max = (projection.labels.len().max(2) - 1) as f64;
        let plot_rows = chunks[1].height.saturating_sub(3) as usize;

        // Minor gridlines only when every tick gets its own row.
        let show_minor = plot_rows >= projection.axis.ticks.len();
        let gridlines: Vec<(Emphasis, Vec<(f64, f64)>)> = projection
            .axis
            .ticks
            .iter()
            .filter(|t| t.is_major() || show_minor)
            .map(|t| (t.emphasis, vec![(0.0, t.value), (x_max, t.value)]))
            .collect();

        let series = projection.points();
        let selected_point: Vec<(f64, f64)> = store
            .selected_value()
            .map(|v| vec![((store.selected() - store.display_start()) as f64, v)])
            .unwrap_or_default();

        let mut datasets: Vec<Dataset> = gridlines
            .iter()
            .map(|(emphasis, line)| {
                Dataset::default()
                    .marker(Self::gridline_marker(*emphasis))
                    .graph_type(GraphType::Line)
                    .style(Self::gridline_style(*emphasis))
                    .data(line.as_slice())
            })
            .collect();
        datasets.push(
            Dataset::default()
                .name("Unit Production")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Cyan))
                .data(series.as_slice()),
        );
        if !selected_point.is_empty() {
            datasets.push(
                Dataset::default()
                    .marker(symbols::Marker::Block)
                    .graph_type(GraphType::Scatter)
                    .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
                    .data(selected_point.as_slice()),
            );
        }

        // y-axis labels from the major ticks, ascending
        let mut majors: Vec<&Tick> = projection.axis.major_ticks().collect();
        majors.sort_by(|a, b| a.value.total_cmp(&b.value));
        let stride = Self::label_stride(majors.len(), plot_rows);
        let y_labels: Vec<String> = majors
            .iter()
            .step_by(stride)
            .filter_map(|t| t.label.clone())
            .collect();

        let chart = Chart::new(datasets)
            .block(Block::default().borders(Borders::ALL))
            .x_axis(
                Axis::default()
                    .bounds([0.0, x_max])
                    .labels(projection.labels.clone()),
            )
            .y_axis(Axis::default().bounds([ymin, ymax]).labels(y_labels));

        f.render_widget(chart, chunks[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_bounds_get_padded() {
        assert_eq!(GraphPanel::y_bounds(Bounds::new(500.0, 500.0)), (450.0, 550.0));
        assert_eq!(GraphPanel::y_bounds(Bounds::new(0.0, 0.0)), (-0.1, 0.1));
        assert_eq!(GraphPanel::y_bounds(Bounds::new(10.0, 0.0)), (0.0, 10.0));
    }

    #[test]
    fn minor_gridlines_are_fainter() {
        let major = GraphPanel::gridline_style(Emphasis::Major);
        let minor = GraphPanel::gridline_style(Emphasis::Minor);
        assert!(!major.add_modifier.contains(Modifier::DIM));
        assert!(minor.add_modifier.contains(Modifier::DIM));
        assert_eq!(GraphPanel::gridline_marker(Emphasis::Major), symbols::Marker::Dot);
        assert_eq!(GraphPanel::gridline_marker(Emphasis::Minor), symbols::Marker::Braille);
    }

    #[test]
    fn label_stride_keeps_labels_evenly_spaced() {
        assert_eq!(GraphPanel::label_stride(11, 20), 1);
        assert_eq!(GraphPanel::label_stride(11, 8), 2);
        assert_eq!(GraphPanel::label_stride(11, 3), 5);
        assert_eq!(GraphPanel::label_stride(11, 0), 10);
        assert_eq!(GraphPanel::label_stride(1, 0), 1);
    }
}
