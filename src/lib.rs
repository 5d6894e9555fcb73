//! Weekly graph editor.
//!
//! A weekly numeric series with a start date and min/max bounds, shown as a
//! line chart over a sliding 8-week window with a 10-major / 5-minor
//! gridline scheme. The model (`graph`) is independent of the terminal
//! front end (`app`, `panels`, `ui`).

pub mod app;
pub mod config;
pub mod graph;
pub mod panels;
pub mod telemetry;
pub mod ui;
