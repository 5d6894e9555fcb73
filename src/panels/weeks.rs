//! src/panels/weeks.rs
//!
//! Weeks panel: every entered week with its label and value, scrolled so the
//! selection stays on screen.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::graph::WeeklyGraph;
use crate::graph::grid::format_grouped;
use crate::graph::window::{visible_range, week_count, week_label};

/// Lists all weeks plus the pending slot. Weeks inside the chart window are
/// drawn brighter than the rest; the selection is bold red.
pub struct WeeksPanel<'a> {
    pub graph: &'a WeeklyGraph,
}

impl<'a> WeeksPanel<'a> {
    pub fn new(graph: &'a WeeklyGraph) -> Self {
        Self { graph }
    }
}

/// First row to show so that `selected` fits in `height` rows.
fn scroll_offset(selected: usize, rows: usize, height: usize) -> usize {
    if height == 0 {
        return selected;
    }
    let max_start = rows.saturating_sub(height);
    selected.saturating_sub(height - 1).min(max_start)
}

impl crate::ui::Panel for WeeksPanel<'_> {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let store = &self.graph.store;
        let rows = store.len() + 1;
        let height = area.height.saturating_sub(2) as usize;
        let start = scroll_offset(store.selected(), rows, height);
        let window = visible_range(store.display_start(), week_count(store.len()));

        let lines: Vec<Line> = (start..rows)
            .take(height)
            .map(|i| {
                let label = week_label(
                    i,
                    store.week_dates().get(i).copied(),
                    self.graph.date_format(),
                );
                let value = store
                    .values()
                    .get(i)
                    .map(|v| format_grouped(*v))
                    .unwrap_or_else(|| "+ add".to_string());
                let style = if i == store.selected() {
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
                } else if window.contains(&i) {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default().fg(Color::Green)
                };
                Line::from(vec![
                    Span::styled(format!("{:>8} ", label), Style::default().fg(Color::Yellow)),
                    Span::styled(value, style),
                ])
            })
            .collect();

        let block = Block::default().title("Weeks").borders(Borders::ALL);
        f.render_widget(Paragraph::new(lines).block(block), area);
    }
}
