//! src/panels/title.rs
//!
//! Header bar: application name, graph count and the focused graph.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub struct TitlePanel {
    pub graph_count: usize,
    pub focused: usize,
    pub focused_title: String,
}

impl TitlePanel {
    pub fn new(graph_count: usize, focused: usize, focused_title: &str) -> Self {
        Self {
            graph_count,
            focused,
            focused_title: focused_title.to_string(),
        }
    }
}

impl crate::ui::Panel for TitlePanel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let line = Line::from(vec![
            Span::styled("Weekly Graphs", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!(
                "  {} graph{}  focus: ",
                self.graph_count,
                if self.graph_count == 1 { "" } else { "s" }
            )),
            Span::styled(
                format!("{} ({}/{})", self.focused_title, self.focused + 1, self.graph_count),
                Style::default().fg(Color::Yellow),
            ),
        ]);
        f.render_widget(
            Paragraph::new(line).block(Block::default().borders(Borders::ALL)),
            area,
        );
    }
}
