use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use serde::Serialize;

use crate::error::Result;
use crate::graph::NavigationGraph;
use crate::waypoint::WaypointId;

/// Outcome of a path query.
///
/// An unreachable destination is a regular answer rather than an error, and is
/// kept apart from the single-step path returned when source and destination
/// coincide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "steps", rename_all = "snake_case")]
pub enum PathResult {
    /// Waypoints from source to destination, both inclusive.
    Found(Vec<WaypointId>),
    /// The destination cannot be reached from the source.
    NoPath,
}

impl PathResult {
    /// Steps of the path when one exists.
    pub fn steps(&self) -> Option<&[WaypointId]> {
        match self {
            PathResult::Found(steps) => Some(steps),
            PathResult::NoPath => None,
        }
    }

    /// Number of edges traversed by the path.
    pub fn hop_count(&self) -> Option<usize> {
        self.steps().map(|steps| steps.len().saturating_sub(1))
    }

    pub fn is_found(&self) -> bool {
        matches!(self, PathResult::Found(_))
    }
}

/// Find the path with the fewest edges between `source` and `destination`.
///
/// Fails with [`crate::Error::UnknownNode`] when either endpoint is missing.
pub fn find_path(
    graph: &NavigationGraph,
    source: WaypointId,
    destination: WaypointId,
) -> Result<PathResult> {
    find_path_observed(graph, source, destination, |_| {})
}

/// Same as [`find_path`], calling `on_finalize` each time a waypoint's
/// distance becomes final.
///
/// Every edge costs one. The frontier is a min-heap keyed on distance with
/// ties broken by push order, so neighbours are expanded in the order their
/// edges were added. A waypoint is finalised at most once; heap entries for
/// waypoints that are already final are discarded when popped.
pub fn find_path_observed<F>(
    graph: &NavigationGraph,
    source: WaypointId,
    destination: WaypointId,
    mut on_finalize: F,
) -> Result<PathResult>
where
    F: FnMut(WaypointId),
{
    graph.waypoint(source)?;
    graph.waypoint(destination)?;

    let mut distances: HashMap<WaypointId, usize> = HashMap::new();
    let mut parents: HashMap<WaypointId, WaypointId> = HashMap::new();
    let mut frontier = Frontier::default();

    distances.insert(source, 0);
    frontier.push(source, 0);

    while let Some(entry) = frontier.finalize_next() {
        on_finalize(entry.node);

        if entry.node == destination {
            return Ok(PathResult::Found(reconstruct_path(
                &parents,
                source,
                destination,
            )));
        }

        let next_cost = entry.cost + 1;
        for &next in graph.neighbours(entry.node)? {
            if frontier.is_final(next) {
                continue;
            }
            if next_cost < distances.get(&next).copied().unwrap_or(usize::MAX) {
                distances.insert(next, next_cost);
                parents.insert(next, entry.node);
                frontier.push(next, next_cost);
            }
        }
    }

    Ok(PathResult::NoPath)
}

fn reconstruct_path(
    parents: &HashMap<WaypointId, WaypointId>,
    start: WaypointId,
    goal: WaypointId,
) -> Vec<WaypointId> {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        let Some(&parent) = parents.get(&current) else {
            break;
        };
        path.push(parent);
        current = parent;
    }
    path.reverse();
    path
}

/// Min-heap of tentative distances plus the set of finalised waypoints.
#[derive(Debug, Default)]
struct Frontier {
    heap: BinaryHeap<QueueEntry>,
    finalized: HashSet<WaypointId>,
    pushes: u64,
}

impl Frontier {
    fn push(&mut self, node: WaypointId, cost: usize) {
        self.heap.push(QueueEntry::new(node, cost, self.pushes));
        self.pushes += 1;
    }

    /// Pop the cheapest entry whose waypoint is not final yet and finalise it.
    /// Stale entries for waypoints finalised earlier are dropped.
    fn finalize_next(&mut self) -> Option<QueueEntry> {
        while let Some(entry) = self.heap.pop() {
            if self.finalized.insert(entry.node) {
                return Some(entry);
            }
        }
        None
    }

    fn is_final(&self, node: WaypointId) -> bool {
        self.finalized.contains(&node)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    node: WaypointId,
    cost: usize,
    sequence: u64,
}

impl QueueEntry {
    fn new(node: WaypointId, cost: usize, sequence: u64) -> Self {
        Self {
            node,
            cost,
            sequence,
        }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a FIFO min-heap by cost.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
