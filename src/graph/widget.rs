//! src/graph/widget.rs
//!
//! One weekly graph: its series store plus the transient view flags
//! (title editing, delete confirmation) and the delete callback.

use tracing::{debug, info};

use super::config::GraphConfig;
use super::grid::format_grouped;
use super::series::SeriesStore;
use super::window::ChartProjection;

/// Invoked once the user confirms deletion of a deletable graph.
pub type DeleteCallback = Box<dyn FnMut()>;

pub struct WeeklyGraph {
    pub store: SeriesStore,
    date_format: String,
    deletable: bool,
    editing_title: bool,
    confirming_delete: bool,
    on_delete: Option<DeleteCallback>,
}

impl WeeklyGraph {
    /// Create a graph with default settings and the given title.
    pub fn create(
        initial_title: &str,
        is_deletable: bool,
        on_delete: Option<DeleteCallback>,
    ) -> Self {
        let mut cfg = GraphConfig::default();
        cfg.title = initial_title.to_string();
        Self::from_config(&cfg, is_deletable, on_delete)
    }

    pub fn from_config(
        cfg: &GraphConfig,
        is_deletable: bool,
        on_delete: Option<DeleteCallback>,
    ) -> Self {
        Self {
            store: SeriesStore::new(cfg),
            date_format: cfg.date_format.clone(),
            deletable: is_deletable,
            editing_title: false,
            confirming_delete: false,
            on_delete,
        }
    }

    pub fn is_deletable(&self) -> bool {
        self.deletable
    }

    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    /// The `{labels, values, axis}` tuple for the chart surface.
    pub fn projection(&self) -> ChartProjection {
        ChartProjection::from_store(&self.store, &self.date_format)
    }

    /// Unit production formatted for display.
    pub fn unit_production_label(&self) -> String {
        format_grouped(self.store.bounds().unit_production())
    }

    pub fn is_editing_title(&self) -> bool {
        self.editing_title
    }

    pub fn begin_title_edit(&mut self) {
        self.editing_title = true;
    }

    pub fn end_title_edit(&mut self) {
        self.editing_title = false;
    }

    pub fn is_confirming_delete(&self) -> bool {
        self.confirming_delete
    }

    /// Open the confirmation prompt. Does nothing for non-deletable graphs.
    pub fn request_delete(&mut self) {
        if self.deletable {
            self.confirming_delete = true;
        } else {
            debug!(title = self.store.title(), "delete requested on non-deletable graph");
        }
    }

    pub fn cancel_delete(&mut self) {
        self.confirming_delete = false;
    }

    /// Close the prompt and fire `on_delete` if this graph may be deleted.
    ///
    /// Returns whether the callback ran.
    pub fn confirm_delete(&mut self) -> bool {
        let was_open = std::mem::take(&mut self.confirming_delete);
        if !self.deletable || !was_open {
            return false;
        }
        match self.on_delete.as_mut() {
            Some(cb) => {
                info!(title = self.store.title(), "graph deletion confirmed");
                cb();
                true
            }
            None => false,
        }
    }
}
