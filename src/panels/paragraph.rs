//! src/panels/paragraph.rs
//!
//! Text panel used for the key help and the status line.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub struct ParagraphPanel {
    pub text: String,
    pub title: String,
    pub style: Style,
}

impl ParagraphPanel {
    pub fn new(text: &str, title: &str) -> Self {
        Self {
            text: text.to_string(),
            title: title.to_string(),
            style: Style::default(),
        }
    }

    /// A status message, drawn in red.
    pub fn warning(text: &str, title: &str) -> Self {
        Self {
            style: Style::default().fg(Color::Red),
            ..Self::new(text, title)
        }
    }
}

impl crate::ui::Panel for ParagraphPanel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let p = Paragraph::new(self.text.as_str())
            .style(self.style)
            .wrap(Wrap { trim: true })
            .block(Block::default().title(self.title.as_str()).borders(Borders::ALL));
        f.render_widget(p, area);
    }
}
