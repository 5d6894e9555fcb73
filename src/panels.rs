//! src/panels.rs
//!
//! Top-level panels module and re-exports.

pub mod confirm;
pub mod editor;
pub mod graph;
pub mod paragraph;
pub mod title;
pub mod weeks;

pub use confirm::ConfirmPanel;
pub use editor::EditorPanel;
pub use graph::GraphPanel;
pub use paragraph::ParagraphPanel;
pub use title::TitlePanel;
pub use weeks::WeeksPanel;
