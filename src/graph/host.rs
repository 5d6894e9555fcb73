//! src/graph/host.rs
//!
//! Arena of independent graph widgets keyed by opaque ids.
//!
//! Widgets never point back at the host. Each one gets a delete callback
//! that posts its id on a channel; the host drains it after every event.

use std::fmt;
use std::sync::mpsc::{self, Receiver, Sender};

use tracing::info;

use super::config::GraphConfig;
use super::widget::{DeleteCallback, WeeklyGraph};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WidgetId(u64);

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

pub struct GraphHost {
    graphs: Vec<(WidgetId, WeeklyGraph)>,
    template: GraphConfig,
    deletions_tx: Sender<WidgetId>,
    deletions_rx: Receiver<WidgetId>,
}

impl GraphHost {
    /// Host seeded with the one non-deletable graph.
    pub fn new(template: GraphConfig) -> Self {
        let (deletions_tx, deletions_rx) = mpsc::channel();
        let mut host = Self {
            graphs: Vec::new(),
            template,
            deletions_tx,
            deletions_rx,
        };
        let id = host.fresh_id();
        let original = WeeklyGraph::from_config(&host.template, false, None);
        host.graphs.push((id, original));
        host
    }

    /// Add a fresh deletable graph built from the template.
    pub fn add(&mut self) -> WidgetId {
        let id = self.fresh_id();
        let tx = self.deletions_tx.clone();
        let on_delete: DeleteCallback = Box::new(move || {
            // The receiver lives as long as the host, which owns this widget.
            let _ = tx.send(id);
        });
        self.graphs
            .push((id, WeeklyGraph::from_config(&self.template, true, Some(on_delete))));
        info!(%id, count = self.graphs.len(), "graph added");
        id
    }

    /// Remove a graph; returns whether it existed.
    pub fn remove(&mut self, id: WidgetId) -> bool {
        let before = self.graphs.len();
        self.graphs.retain(|(gid, _)| *gid != id);
        let removed = self.graphs.len() != before;
        if removed {
            info!(%id, count = self.graphs.len(), "graph removed");
        }
        removed
    }

    /// Remove every graph whose delete callback fired since the last call.
    pub fn process_deletions(&mut self) -> usize {
        let pending: Vec<WidgetId> = self.deletions_rx.try_iter().collect();
        pending.into_iter().filter(|id| self.remove(*id)).count()
    }

    pub fn len(&self) -> usize {
        self.graphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graphs.is_empty()
    }

    pub fn get(&self, id: WidgetId) -> Option<&WeeklyGraph> {
        self.graphs.iter().find(|(gid, _)| *gid == id).map(|(_, g)| g)
    }

    pub fn get_mut(&mut self, id: WidgetId) -> Option<&mut WeeklyGraph> {
        self.graphs
            .iter_mut()
            .find(|(gid, _)| *gid == id)
            .map(|(_, g)| g)
    }

    /// Graph at a display position.
    pub fn nth_mut(&mut self, index: usize) -> Option<&mut WeeklyGraph> {
        self.graphs.get_mut(index).map(|(_, g)| g)
    }

    /// Graphs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (WidgetId, &WeeklyGraph)> {
        self.graphs.iter().map(|(id, g)| (*id, g))
    }

    fn fresh_id(&self) -> WidgetId {
        loop {
            let id = WidgetId(rand::random());
            if self.graphs.iter().all(|(gid, _)| *gid != id) {
                return id;
            }
        }
    }
}
