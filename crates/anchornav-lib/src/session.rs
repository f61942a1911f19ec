//! Application-level navigation session.
//!
//! A [`NavigationSession`] owns the in-memory [`NavigationGraph`] together
//! with the [`GraphStore`] it was loaded from, and applies every change to
//! both: waypoints are persisted the moment they are placed, edges rewrite
//! the records of both endpoints, and clearing empties graph and store.

use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::graph::NavigationGraph;
use crate::legacy::AnchorParameters;
use crate::output::PathSummary;
use crate::path::{find_path, PathResult};
use crate::records::{load, save, WaypointRecord};
use crate::store::GraphStore;
use crate::waypoint::{Position, Waypoint, WaypointId, WaypointKind};

/// Outcome of importing legacy anchor parameter lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegacyImport {
    /// Waypoints created, in input order.
    pub imported: Vec<WaypointId>,
    /// Non-empty lines that could not be parsed.
    pub skipped: usize,
}

/// Navigation graph kept in step with a persistence backend.
#[derive(Debug)]
pub struct NavigationSession<S: GraphStore> {
    graph: NavigationGraph,
    store: S,
}

impl<S: GraphStore> NavigationSession<S> {
    /// Load every record from `store` and build the graph.
    pub fn open(mut store: S) -> Result<Self> {
        let records = store.load_all()?;
        let graph = load(&records)?;
        info!(
            waypoints = graph.len(),
            edges = graph.edge_count(),
            "opened navigation session"
        );
        Ok(Self { graph, store })
    }

    pub fn graph(&self) -> &NavigationGraph {
        &self.graph
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Place a named destination and persist it.
    pub fn place_destination(&mut self, position: Position, label: &str) -> Result<WaypointId> {
        let label = self.validate_label(label)?;
        self.place(position, WaypointKind::Destination { label })
    }

    /// Place an unnamed walkable point and persist it.
    pub fn place_walkable(&mut self, position: Position) -> Result<WaypointId> {
        self.place(position, WaypointKind::Walkable)
    }

    /// Connect two waypoints and persist both updated records.
    ///
    /// Returns `false` when the waypoints were already connected, in which
    /// case nothing is written. If the store rejects the update the graph is
    /// left unchanged and the first record is written back.
    pub fn connect(&mut self, a: WaypointId, b: WaypointId) -> Result<bool> {
        let neighbours_a = self.graph.neighbours(a)?;
        let neighbours_b = self.graph.neighbours(b)?;
        if a == b {
            return Err(Error::SelfLoop { id: a });
        }
        if neighbours_a.contains(&b) {
            return Ok(false);
        }

        let previous_a = WaypointRecord::from_waypoint(self.graph.waypoint(a)?, neighbours_a);
        let mut record_a = previous_a.clone();
        let mut record_b = WaypointRecord::from_waypoint(self.graph.waypoint(b)?, neighbours_b);
        record_a.neighbors.push(b);
        record_b.neighbors.push(a);

        if let Err(err) = self.store.update_pair(&record_a, &record_b) {
            // A store without atomic pair updates may have written `a` already.
            if let Err(restore) = self.store.update(&previous_a) {
                warn!(a, error = %restore, "failed to restore waypoint record");
            }
            return Err(err);
        }
        let inserted = self.graph.add_edge(a, b)?;
        info!(a, b, "connected waypoints");
        Ok(inserted)
    }

    /// Remove every waypoint from graph and store, returning how many were removed.
    pub fn clear(&mut self) -> Result<usize> {
        let removed = self.graph.len();
        self.store.delete_all()?;
        self.graph.remove_all_waypoints();
        info!(removed, "cleared navigation graph");
        Ok(removed)
    }

    /// Replace graph and store contents with a batch of records.
    pub fn replace_all(&mut self, records: &[WaypointRecord]) -> Result<()> {
        let graph = load(records)?;
        self.store.replace_all(&save(&graph))?;
        info!(
            waypoints = graph.len(),
            edges = graph.edge_count(),
            "replaced navigation graph"
        );
        self.graph = graph;
        Ok(())
    }

    /// Records describing the current graph.
    pub fn export(&self) -> Vec<WaypointRecord> {
        save(&self.graph)
    }

    pub fn find_path(&self, source: WaypointId, destination: WaypointId) -> Result<PathResult> {
        find_path(&self.graph, source, destination)
    }

    /// Resolve two ids or destination labels and summarise the path between them.
    pub fn find_path_by_name(&self, from: &str, to: &str) -> Result<PathSummary> {
        let source = self.graph.resolve(from)?;
        let destination = self.graph.resolve(to)?;
        let result = self.find_path(source, destination)?;
        PathSummary::from_result(&self.graph, source, destination, &result)
    }

    /// Place a walkable waypoint for every parsable legacy anchor line.
    pub fn import_legacy<I, L>(&mut self, lines: I) -> Result<LegacyImport>
    where
        I: IntoIterator<Item = L>,
        L: AsRef<str>,
    {
        let mut outcome = LegacyImport::default();
        for line in lines {
            let line = line.as_ref().trim();
            if line.is_empty() {
                continue;
            }
            match line.parse::<AnchorParameters>() {
                Ok(params) => {
                    let id = self.place_walkable(params.position())?;
                    outcome.imported.push(id);
                }
                Err(err) => {
                    warn!(error = %err, "skipping malformed anchor parameters");
                    outcome.skipped += 1;
                }
            }
        }
        Ok(outcome)
    }

    fn place(&mut self, position: Position, kind: WaypointKind) -> Result<WaypointId> {
        let waypoint = Waypoint {
            id: self.graph.next_id(),
            position,
            kind,
        };
        self.store
            .insert(&WaypointRecord::from_waypoint(&waypoint, &[]))?;
        let id = waypoint.id;
        info!(
            id,
            label = waypoint.label().unwrap_or("<walkable>"),
            "placed waypoint"
        );
        self.graph.add_waypoint(waypoint)?;
        Ok(id)
    }

    fn validate_label(&self, label: &str) -> Result<String> {
        let label = label.trim();
        if label.is_empty() {
            return Err(Error::InvalidLabel {
                label: label.to_string(),
                reason: "label is empty",
            });
        }
        if label.parse::<WaypointId>().is_ok() {
            return Err(Error::InvalidLabel {
                label: label.to_string(),
                reason: "numeric labels are reserved for waypoint ids",
            });
        }
        if let Some(existing) = self.graph.find_by_label(label) {
            return Err(Error::DuplicateLabel {
                label: label.to_string(),
                existing: existing.id,
            });
        }
        Ok(label.to_string())
    }
}
