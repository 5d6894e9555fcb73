//! src/ui.rs
//!
//! Top-level UI module re-exporting node helpers.

pub mod node;

pub use node::{Node, Panel, centered, group, leaf};
