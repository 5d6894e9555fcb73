//! src/app.rs
//!
//! Weekly graph editor: a terminal front end for one or more independent
//! weekly value series.
//!
//! # Top-Level Application (`app.rs`)
//!
//! Builds the graph host from the resolved configuration and runs the UI main
//! loop. Every key press is applied to the focused graph, which re-derives its
//! window and axis before the next frame is drawn.
//!
//! ## Overview
//! Each graph shows:
//! - a line chart of the 8 weeks around the selected week, with 10 major and
//!   5 minor gridlines per major interval between the configured bounds,
//! - the unit production for the current bounds (`(max - min) / 25`),
//! - an editor with the start date, bounds, selected week and its value,
//! - a list of all weeks entered so far.
//!
//! # Building and Running
//!
//! ```text
//! cargo run --release -- --start-date 2024-01-01
//! cargo run --release -- --config weekly-graph.toml --log-file graph.log
//! ```
//!
//! # Keyboard Controls
//!
//! - **Tab / Shift-Tab** — Cycle focus among graphs.
//! - **← / →** — Select the previous / next week. One step past the last week
//!   is the *new week* slot.
//! - **Home / End** — Jump to the first week / the new week slot.
//! - **a** — Add the new week (only while the new week slot is selected).
//! - **v** — Edit the selected week's value. Non-numeric input becomes 0.
//! - **m / M** — Edit the min / max bound. Input that leaves min ≥ max is kept,
//!   and a warning is shown until it is fixed.
//! - **d** — Edit the start date (`YYYY-MM-DD`; empty clears it).
//! - **t** — Edit the graph title in place; Enter or Esc finishes.
//! - **n** — Add a new graph.
//! - **x / Delete** — Delete the focused graph after confirmation
//!   (`y`/Enter deletes, `n`/Esc cancels). The first graph cannot be deleted.
//! - **q** — Quit and restore terminal state.
//!
//! While a field is being edited, characters are appended, Backspace removes
//! the last one, Enter commits and Esc discards the input.

use chrono::NaiveDate;
use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Direction},
};
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::graph::{GraphConfig, GraphHost, WeeklyGraph};
use crate::panels::{
    ConfirmPanel, EditorPanel, GraphPanel, ParagraphPanel, TitlePanel, WeeksPanel,
};
use crate::ui::{Node, Panel, centered, group, leaf};

const HELP: &str = "TAB=Focus  ←/→=Week  A=Add week  V=Value  m/M=Min/Max  D=Start date  \
                    T=Title  N=New graph  X=Delete  Q=Quit";

/// Input fields that are edited through a text buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    StartDate,
    Min,
    Max,
    Value,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::StartDate => "Start Date",
            Field::Min => "Min Value",
            Field::Max => "Max Value",
            Field::Value => "Value",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Editing { field: Field, buffer: String },
}

pub struct App {
    pub host: GraphHost,
    pub focused: usize,
    pub mode: Mode,
    /// One-shot message shown in the footer until the next key press.
    pub status: Option<String>,
    pub running: bool,
}

/// Text placed in the value buffer when editing starts; zero shows as empty.
fn input_text(value: f64) -> String {
    if value == 0.0 {
        String::new()
    } else {
        value.to_string()
    }
}

impl App {
    pub fn new(template: GraphConfig) -> Self {
        Self {
            host: GraphHost::new(template),
            focused: 0,
            mode: Mode::Normal,
            status: None,
            running: true,
        }
    }

    pub fn focused_graph(&self) -> Option<&WeeklyGraph> {
        self.host.iter().nth(self.focused).map(|(_, g)| g)
    }

    fn focused_graph_mut(&mut self) -> Option<&mut WeeklyGraph> {
        self.host.nth_mut(self.focused)
    }

    /// Apply one key event to the focused graph.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        let Some(graph) = self.focused_graph() else {
            return;
        };
        let (confirming, editing_title) = (graph.is_confirming_delete(), graph.is_editing_title());
        self.status = None;

        if confirming {
            self.handle_confirm(key);
        } else if editing_title {
            self.handle_title(key);
        } else if matches!(self.mode, Mode::Editing { .. }) {
            self.handle_field(key);
        } else {
            self.handle_normal(key);
        }

        if self.host.process_deletions() > 0 {
            self.focused = self.focused.min(self.host.len().saturating_sub(1));
        }
    }

    fn handle_normal(&mut self, key: KeyEvent) {
        let count = self.host.len();
        match key.code {
            KeyCode::Char('q') => self.running = false,
            KeyCode::Tab => self.focused = (self.focused + 1) % count,
            KeyCode::BackTab => self.focused = (self.focused + count - 1) % count,
            KeyCode::Char('n') => {
                self.host.add();
                self.focused = self.host.len() - 1;
            }
            _ => {
                if let Some(graph) = self.focused_graph_mut() {
                    let status = Self::handle_graph_key(graph, key.code);
                    match status {
                        GraphKey::Edit(field, buffer) => {
                            self.mode = Mode::Editing { field, buffer };
                        }
                        GraphKey::Status(msg) => self.status = Some(msg.to_string()),
                        GraphKey::Done => {}
                    }
                }
            }
        }
    }

    fn handle_graph_key(graph: &mut WeeklyGraph, code: KeyCode) -> GraphKey {
        let store = &mut graph.store;
        match code {
            KeyCode::Left => store.select_week(store.selected().saturating_sub(1)),
            KeyCode::Right => store.select_week(store.selected() + 1),
            KeyCode::Home => store.select_week(0),
            KeyCode::End => store.select_week(store.len()),
            KeyCode::Char('a') => {
                if !store.append_week() {
                    return GraphKey::Status("Select the new week slot (End) to add a week");
                }
            }
            KeyCode::Char('v') => {
                return match store.selected_value() {
                    Some(v) => GraphKey::Edit(Field::Value, input_text(v)),
                    None => GraphKey::Status("Press a to add this week before entering a value"),
                };
            }
            KeyCode::Char('m') => {
                return GraphKey::Edit(Field::Min, store.bounds().min.to_string());
            }
            KeyCode::Char('M') => {
                return GraphKey::Edit(Field::Max, store.bounds().max.to_string());
            }
            KeyCode::Char('d') => {
                let current = store
                    .start_date()
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default();
                return GraphKey::Edit(Field::StartDate, current);
            }
            KeyCode::Char('t') => graph.begin_title_edit(),
            KeyCode::Char('x') | KeyCode::Delete => {
                if !graph.is_deletable() {
                    return GraphKey::Status("The original graph cannot be deleted");
                }
                graph.request_delete();
            }
            _ => {}
        }
        GraphKey::Done
    }

    fn handle_field(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) => {
                if let Mode::Editing { buffer, .. } = &mut self.mode {
                    buffer.push(c);
                }
            }
            KeyCode::Backspace => {
                if let Mode::Editing { buffer, .. } = &mut self.mode {
                    buffer.pop();
                }
            }
            KeyCode::Esc => self.mode = Mode::Normal,
            KeyCode::Enter => {
                if let Mode::Editing { field, buffer } =
                    std::mem::replace(&mut self.mode, Mode::Normal)
                {
                    self.commit(field, &buffer);
                }
            }
            _ => {}
        }
    }

    fn commit(&mut self, field: Field, input: &str) {
        let Some(graph) = self.focused_graph_mut() else {
            return;
        };
        let store = &mut graph.store;
        let status = match field {
            Field::Value => {
                let index = store.selected();
                store.set_value(index, input);
                None
            }
            Field::Min | Field::Max => {
                if field == Field::Min {
                    store.set_min_raw(input);
                } else {
                    store.set_max_raw(input);
                }
                let bounds = store.bounds();
                debug!(min = bounds.min, max = bounds.max, "bounds changed");
                bounds.validate().err().map(|e| e.to_string())
            }
            Field::StartDate => {
                let text = input.trim();
                if text.is_empty() {
                    store.set_start_date(None);
                    None
                } else {
                    match NaiveDate::parse_from_str(text, "%Y-%m-%d") {
                        Ok(date) => {
                            store.set_start_date(Some(date));
                            None
                        }
                        Err(e) => {
                            warn!(input = text, error = %e, "rejected start date");
                            Some(format!("Invalid date \"{}\", expected YYYY-MM-DD", text))
                        }
                    }
                }
            }
        };
        self.status = status;
    }

    fn handle_title(&mut self, key: KeyEvent) {
        let Some(graph) = self.focused_graph_mut() else {
            return;
        };
        match key.code {
            KeyCode::Char(c) => graph.store.title_mut().push(c),
            KeyCode::Backspace => {
                graph.store.title_mut().pop();
            }
            KeyCode::Enter | KeyCode::Esc => graph.end_title_edit(),
            _ => {}
        }
    }

    fn handle_confirm(&mut self, key: KeyEvent) {
        let Some(graph) = self.focused_graph_mut() else {
            return;
        };
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                graph.confirm_delete();
            }
            KeyCode::Char('n') | KeyCode::Esc => graph.cancel_delete(),
            _ => {}
        }
    }

    /// Lay out every graph side by side, then the confirmation popup if the
    /// focused graph asked for one.
    pub fn draw(&self, f: &mut Frame<'_>) {
        let area = f.area();
        let count = self.host.len().max(1) as u32;

        let columns: Vec<Node> = self
            .host
            .iter()
            .enumerate()
            .map(|(i, (_, g))| {
                let highlighted = i == self.focused;
                let editing = match &self.mode {
                    Mode::Editing { field, buffer } if highlighted => {
                        Some((*field, buffer.as_str()))
                    }
                    _ => None,
                };
                group(
                    Direction::Vertical,
                    vec![Constraint::Percentage(65), Constraint::Percentage(35)],
                    vec![
                        leaf(GraphPanel::new(g, highlighted)),
                        group(
                            Direction::Horizontal,
                            vec![Constraint::Percentage(60), Constraint::Percentage(40)],
                            vec![
                                leaf(EditorPanel::new(g, highlighted, editing)),
                                leaf(WeeksPanel::new(g)),
                            ],
                        ),
                    ],
                )
            })
            .collect();

        let footer = match &self.status {
            Some(msg) => ParagraphPanel::warning(msg, "Status"),
            None => ParagraphPanel::new(HELP, "Controls"),
        };
        let focused_title = self
            .focused_graph()
            .map(|g| g.store.title())
            .unwrap_or_default();

        let root = group(
            Direction::Vertical,
            vec![
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(4),
            ],
            vec![
                leaf(TitlePanel::new(self.host.len(), self.focused, focused_title)),
                group(
                    Direction::Horizontal,
                    vec![Constraint::Ratio(1, count); count as usize],
                    columns,
                ),
                leaf(footer),
            ],
        );
        root.draw(f, area);

        if let Some(g) = self.focused_graph().filter(|g| g.is_confirming_delete()) {
            ConfirmPanel::new(g.store.title()).draw(f, centered(area, 60, 7));
        }
    }

    fn event_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while self.running {
            terminal.draw(|f| self.draw(f))?;
            if let Event::Key(key) = event::read()? {
                self.handle_key(key);
            }
        }
        Ok(())
    }
}

/// Outcome of a key applied to a single graph in normal mode.
enum GraphKey {
    Done,
    Edit(Field, String),
    Status(&'static str),
}

pub fn run(cfg: &AppConfig) -> Result<()> {
    let mut app = App::new(cfg.graph.clone());
    info!(graphs = app.host.len(), "starting UI");

    let mut terminal = ratatui::init();
    let result = app.event_loop(&mut terminal);
    ratatui::restore();

    info!(graphs = app.host.len(), "exiting");
    result
}
