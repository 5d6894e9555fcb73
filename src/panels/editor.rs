//! src/panels/editor.rs
//!
//! Editor panel: the start date, bounds, week selector and value fields of
//! one graph, with the in-progress input shown in place of the field being
//! edited.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::Field;
use crate::graph::WeeklyGraph;
use crate::graph::grid::format_grouped;
use crate::graph::window::week_label;

/// Read-only view of the input fields; `highlighted` marks the focused graph.
pub struct EditorPanel<'a> {
    pub graph: &'a WeeklyGraph,
    pub highlighted: bool,
    /// Field currently being typed into, with its buffer.
    pub editing: Option<(Field, &'a str)>,
}

impl<'a> EditorPanel<'a> {
    pub fn new(
        graph: &'a WeeklyGraph,
        highlighted: bool,
        editing: Option<(Field, &'a str)>,
    ) -> Self {
        Self {
            graph,
            highlighted,
            editing,
        }
    }

    fn row(&self, field: Field, key: &str, current: String) -> Line<'a> {
        let label = Span::styled(
            format!("{:<12}", field.label()),
            Style::default().fg(Color::Yellow),
        );
        let key = Span::styled(format!("[{}] ", key), Style::default().fg(Color::DarkGray));
        match self.editing {
            Some((f, buf)) if f == field => Line::from(vec![
                key,
                label,
                Span::styled(
                    format!("{}_", buf),
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            _ => Line::from(vec![key, label, Span::raw(current)]),
        }
    }
}

impl crate::ui::Panel for EditorPanel<'_> {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let store = &self.graph.store;

        let start = store
            .start_date()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "(not set)".to_string());

        let selected = store.selected();
        let week = week_label(
            selected,
            store.week_dates().get(selected).copied(),
            self.graph.date_format(),
        );
        let week = if store.is_pending() {
            format!("{}  (new; press a to add)", week)
        } else {
            week
        };

        let value = store
            .selected_value()
            .map(format_grouped)
            .unwrap_or_else(|| "-".to_string());

        let mut lines = vec![
            self.row(Field::StartDate, "d", start),
            self.row(Field::Min, "m", format_grouped(store.bounds().min)),
            self.row(Field::Max, "M", format_grouped(store.bounds().max)),
            Line::from(vec![
                Span::styled("[←→] ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    format!("{:<12}", "Select Week"),
                    Style::default().fg(Color::Yellow),
                ),
                Span::raw(week),
            ]),
            self.row(Field::Value, "v", value),
        ];

        if let Err(e) = store.bounds().validate() {
            lines.push(Line::from(Span::styled(
                format!("warning: {}", e),
                Style::default().fg(Color::Red),
            )));
        }
        if self.graph.is_editing_title() {
            lines.push(Line::from(Span::styled(
                "editing title (Enter to finish)",
                Style::default().fg(Color::Magenta),
            )));
        }

        let mut block = Block::default().title("Editor").borders(Borders::ALL);
        if self.highlighted {
            block = block.style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
        }

        f.render_widget(Paragraph::new(lines).block(block), area);
    }
}
