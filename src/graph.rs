//! src/graph.rs
//!
//! Top-level `graph` module: the weekly series model, its window and grid
//! projection, and the widget/host layer around it.

pub mod config;
pub mod grid;
pub mod host;
pub mod series;
pub mod widget;
pub mod window;

/// Re-exports
pub use config::GraphConfig;
pub use host::{GraphHost, WidgetId};
pub use widget::WeeklyGraph;
