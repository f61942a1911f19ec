use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::{Error, Result};
use crate::path::{find_path, PathResult};
use crate::waypoint::{Waypoint, WaypointId};

/// Minimum Jaro-Winkler similarity for a label to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Maximum number of label suggestions attached to [`Error::UnknownLabel`].
const MAX_SUGGESTIONS: usize = 3;

/// Undirected navigation graph over waypoints.
///
/// Waypoints live in an arena addressed by their identifier; adjacency is kept
/// as one neighbour list per waypoint. Lists preserve insertion order so
/// traversal is reproducible, and every edge is stored on both endpoints.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavigationGraph {
    waypoints: Vec<Waypoint>,
    adjacency: Vec<Vec<WaypointId>>,
    index: HashMap<WaypointId, usize>,
}

impl NavigationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new waypoint with no neighbours.
    pub fn add_waypoint(&mut self, waypoint: Waypoint) -> Result<()> {
        if self.index.contains_key(&waypoint.id) {
            return Err(Error::DuplicateId { id: waypoint.id });
        }
        self.index.insert(waypoint.id, self.waypoints.len());
        self.waypoints.push(waypoint);
        self.adjacency.push(Vec::new());
        Ok(())
    }

    /// Connect two waypoints in both directions.
    ///
    /// Both endpoints are validated before either list is touched, so a failed
    /// call leaves the graph unchanged. Returns `false` when the edge already
    /// existed.
    pub fn add_edge(&mut self, a: WaypointId, b: WaypointId) -> Result<bool> {
        let slot_a = self.slot(a)?;
        let slot_b = self.slot(b)?;
        if a == b {
            return Err(Error::SelfLoop { id: a });
        }

        let inserted_a = push_unique(&mut self.adjacency[slot_a], b);
        let inserted_b = push_unique(&mut self.adjacency[slot_b], a);
        debug_assert_eq!(inserted_a, inserted_b, "adjacency must stay symmetric");
        Ok(inserted_a)
    }

    /// Remove every waypoint and edge.
    pub fn remove_all_waypoints(&mut self) {
        self.waypoints.clear();
        self.adjacency.clear();
        self.index.clear();
    }

    /// Look up a waypoint by identifier.
    pub fn waypoint(&self, id: WaypointId) -> Result<&Waypoint> {
        self.slot(id).map(|slot| &self.waypoints[slot])
    }

    /// Return the neighbours of a waypoint in the order the edges were added.
    pub fn neighbours(&self, id: WaypointId) -> Result<&[WaypointId]> {
        self.slot(id).map(|slot| self.adjacency[slot].as_slice())
    }

    /// Iterate over all waypoints in insertion order.
    pub fn waypoints(&self) -> impl Iterator<Item = &Waypoint> + '_ {
        self.waypoints.iter()
    }

    pub fn contains(&self, id: WaypointId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// Iterate over each undirected edge once. The endpoint that was inserted
    /// into the graph first is reported first.
    pub fn edges(&self) -> impl Iterator<Item = (WaypointId, WaypointId)> + '_ {
        self.waypoints
            .iter()
            .zip(&self.adjacency)
            .enumerate()
            .flat_map(move |(slot, (waypoint, neighbours))| {
                neighbours
                    .iter()
                    .filter(move |neighbour| self.index[*neighbour] > slot)
                    .map(move |neighbour| (waypoint.id, *neighbour))
            })
    }

    /// Identifier the next placed waypoint should receive.
    pub fn next_id(&self) -> WaypointId {
        self.waypoints
            .iter()
            .map(|waypoint| waypoint.id)
            .max()
            .map_or(1, |max| max + 1)
    }

    /// Find a destination by its exact label.
    pub fn find_by_label(&self, label: &str) -> Option<&Waypoint> {
        self.waypoints
            .iter()
            .find(|waypoint| waypoint.label() == Some(label))
    }

    /// Resolve a user supplied reference to a waypoint identifier.
    ///
    /// Numeric input is treated as an identifier; anything else is matched
    /// against destination labels, first exactly and then ignoring case.
    pub fn resolve(&self, query: &str) -> Result<WaypointId> {
        let query = query.trim();
        if let Ok(id) = query.parse::<WaypointId>() {
            return self.slot(id).map(|_| id);
        }

        if let Some(waypoint) = self.find_by_label(query) {
            return Ok(waypoint.id);
        }

        let lowered = query.to_lowercase();
        if let Some(waypoint) = self.waypoints.iter().find(|waypoint| {
            waypoint
                .label()
                .is_some_and(|label| label.to_lowercase() == lowered)
        }) {
            return Ok(waypoint.id);
        }

        Err(Error::UnknownLabel {
            label: query.to_string(),
            suggestions: self.label_suggestions(query),
        })
    }

    /// Destination labels that look similar to `query`, best match first.
    pub fn label_suggestions(&self, query: &str) -> Vec<String> {
        let lowered = query.to_lowercase();
        let mut scored: Vec<(f64, &str)> = self
            .waypoints
            .iter()
            .filter_map(Waypoint::label)
            .map(|label| (strsim::jaro_winkler(&lowered, &label.to_lowercase()), label))
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(MAX_SUGGESTIONS)
            .map(|(_, label)| label.to_string())
            .collect()
    }

    /// Record `neighbour` on `id` without touching the reverse direction.
    ///
    /// Only used while rebuilding a graph from records, where the caller
    /// restores symmetry before handing the graph out.
    pub(crate) fn push_half_edge(&mut self, id: WaypointId, neighbour: WaypointId) -> Result<()> {
        let slot = self.slot(id)?;
        push_unique(&mut self.adjacency[slot], neighbour);
        Ok(())
    }

    fn slot(&self, id: WaypointId) -> Result<usize> {
        self.index
            .get(&id)
            .copied()
            .ok_or(Error::UnknownNode { id })
    }
}

fn push_unique(list: &mut Vec<WaypointId>, id: WaypointId) -> bool {
    if list.contains(&id) {
        return false;
    }
    list.push(id);
    true
}

/// Navigation graph shared between threads behind a single lock.
///
/// Every mutation takes the write lock once, and path queries run over a
/// snapshot cloned under the read lock, so a query never observes a half
/// applied edge.
#[derive(Debug, Clone, Default)]
pub struct SharedGraph {
    inner: Arc<RwLock<NavigationGraph>>,
}

impl SharedGraph {
    pub fn new(graph: NavigationGraph) -> Self {
        Self {
            inner: Arc::new(RwLock::new(graph)),
        }
    }

    pub fn add_waypoint(&self, waypoint: Waypoint) -> Result<()> {
        let mut graph = self.inner.write().map_err(|_| Error::LockPoisoned)?;
        graph.add_waypoint(waypoint)
    }

    pub fn add_edge(&self, a: WaypointId, b: WaypointId) -> Result<bool> {
        let mut graph = self.inner.write().map_err(|_| Error::LockPoisoned)?;
        graph.add_edge(a, b)
    }

    pub fn remove_all_waypoints(&self) -> Result<()> {
        let mut graph = self.inner.write().map_err(|_| Error::LockPoisoned)?;
        graph.remove_all_waypoints();
        Ok(())
    }

    /// Clone the current graph under the read lock.
    pub fn snapshot(&self) -> Result<NavigationGraph> {
        let graph = self.inner.read().map_err(|_| Error::LockPoisoned)?;
        Ok(graph.clone())
    }

    /// Run a path query against a consistent snapshot.
    pub fn find_path(&self, source: WaypointId, destination: WaypointId) -> Result<PathResult> {
        let snapshot = self.snapshot()?;
        find_path(&snapshot, source, destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::waypoint::Position;

    fn graph_with(ids: &[WaypointId]) -> NavigationGraph {
        let mut graph = NavigationGraph::new();
        for &id in ids {
            graph
                .add_waypoint(Waypoint::walkable(id, Position::default()))
                .expect("unique id");
        }
        graph
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut graph = graph_with(&[1]);
        let err = graph
            .add_waypoint(Waypoint::walkable(1, Position::default()))
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateId { id: 1 }));
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn failed_edge_leaves_graph_untouched() {
        let mut graph = graph_with(&[1, 2]);
        let before = graph.clone();

        assert!(matches!(
            graph.add_edge(1, 42),
            Err(Error::UnknownNode { id: 42 })
        ));
        assert!(matches!(
            graph.add_edge(42, 1),
            Err(Error::UnknownNode { id: 42 })
        ));
        assert!(matches!(graph.add_edge(2, 2), Err(Error::SelfLoop { id: 2 })));
        assert_eq!(graph, before);
    }

    #[test]
    fn edges_are_listed_once() {
        let mut graph = graph_with(&[1, 2, 3]);
        graph.add_edge(1, 2).unwrap();
        graph.add_edge(3, 1).unwrap();
        graph.add_edge(2, 3).unwrap();

        let edges: Vec<_> = graph.edges().collect();
        assert_eq!(edges, vec![(1, 2), (1, 3), (2, 3)]);
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn next_id_follows_highest_identifier() {
        assert_eq!(NavigationGraph::new().next_id(), 1);
        assert_eq!(graph_with(&[4, 9, 2]).next_id(), 10);
    }

    #[test]
    fn resolve_accepts_ids_and_labels() {
        let mut graph = graph_with(&[1]);
        graph
            .add_waypoint(Waypoint::destination(2, Position::default(), "Main Entrance"))
            .unwrap();

        assert_eq!(graph.resolve("1").unwrap(), 1);
        assert_eq!(graph.resolve("Main Entrance").unwrap(), 2);
        assert_eq!(graph.resolve("main entrance").unwrap(), 2);
        assert!(matches!(
            graph.resolve("7"),
            Err(Error::UnknownNode { id: 7 })
        ));

        match graph.resolve("Main Entrence") {
            Err(Error::UnknownLabel { suggestions, .. }) => {
                assert_eq!(suggestions, vec!["Main Entrance".to_string()]);
            }
            other => panic!("expected unknown label, got {other:?}"),
        }
    }

    #[test]
    fn shared_graph_queries_snapshot() {
        let shared = SharedGraph::default();
        shared
            .add_waypoint(Waypoint::walkable(1, Position::default()))
            .unwrap();
        shared
            .add_waypoint(Waypoint::walkable(2, Position::default()))
            .unwrap();
        assert!(shared.add_edge(1, 2).unwrap());

        assert_eq!(
            shared.find_path(1, 2).unwrap(),
            PathResult::Found(vec![1, 2])
        );

        let snapshot = shared.snapshot().unwrap();
        shared.remove_all_waypoints().unwrap();
        assert_eq!(snapshot.len(), 2);
        assert!(shared.snapshot().unwrap().is_empty());
    }
}
