//! src/panels/confirm.rs
//!
//! Delete confirmation popup drawn over the focused graph.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

pub struct ConfirmPanel {
    pub title: String,
}

impl ConfirmPanel {
    pub fn new(graph_title: &str) -> Self {
        Self {
            title: graph_title.to_string(),
        }
    }
}

impl crate::ui::Panel for ConfirmPanel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let lines = vec![
            Line::from(format!(
                "Are you sure you want to delete \"{}\"? All data associated with it will be permanently removed.",
                self.title
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    "[y] Delete",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::raw("    "),
                Span::raw("[n] Cancel"),
            ]),
        ];
        let block = Block::default()
            .title("Confirm Deletion")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red));

        f.render_widget(Clear, area);
        f.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .alignment(Alignment::Center)
                .block(block),
            area,
        );
    }
}
