//! Flat record shape exchanged with persistence backends.
//!
//! [`load`] rebuilds a [`NavigationGraph`] from a batch of records and [`save`]
//! produces the same shape from a graph. The two are inverses: saving a loaded
//! graph returns the records it was built from, up to the symmetrisation that
//! `load` applies to one-sided neighbour listings.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::NavigationGraph;
use crate::waypoint::{Position, Waypoint, WaypointId, WaypointKind};

/// Persisted form of a waypoint.
///
/// A missing `label` marks a walkable waypoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaypointRecord {
    pub id: WaypointId,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub neighbors: Vec<WaypointId>,
}

impl WaypointRecord {
    /// Build the record for a waypoint and its neighbour list.
    pub fn from_waypoint(waypoint: &Waypoint, neighbors: &[WaypointId]) -> Self {
        Self {
            id: waypoint.id,
            x: waypoint.position.x,
            y: waypoint.position.y,
            z: waypoint.position.z,
            label: waypoint.label().map(str::to_string),
            neighbors: neighbors.to_vec(),
        }
    }

    /// Waypoint described by this record, without its neighbours.
    pub fn to_waypoint(&self) -> Waypoint {
        Waypoint {
            id: self.id,
            position: Position::new(self.x, self.y, self.z),
            kind: WaypointKind::from_label(self.label.clone()),
        }
    }
}

/// Rebuild a navigation graph from a batch of records.
///
/// Every neighbour must be another record of the same batch; dangling or
/// self-referencing neighbours fail with [`Error::InconsistentGraph`] instead
/// of being dropped. Edges listed on only one side are added to both.
pub fn load<'a, I>(records: I) -> Result<NavigationGraph>
where
    I: IntoIterator<Item = &'a WaypointRecord>,
{
    let records: Vec<&WaypointRecord> = records.into_iter().collect();
    let mut graph = NavigationGraph::new();

    for record in &records {
        graph.add_waypoint(record.to_waypoint())?;
    }

    for record in &records {
        for &neighbor in &record.neighbors {
            if neighbor == record.id {
                return Err(Error::InconsistentGraph {
                    id: record.id,
                    neighbor,
                    reason: "which is itself",
                });
            }
            if !graph.contains(neighbor) {
                return Err(Error::InconsistentGraph {
                    id: record.id,
                    neighbor,
                    reason: "which is not part of the batch",
                });
            }
            graph.push_half_edge(record.id, neighbor)?;
        }
    }

    // Restore the reverse direction for edges only one endpoint listed.
    for record in &records {
        for &neighbor in &record.neighbors {
            graph.push_half_edge(neighbor, record.id)?;
        }
    }

    debug!(
        waypoints = graph.len(),
        edges = graph.edge_count(),
        "loaded navigation graph from records"
    );
    Ok(graph)
}

/// Flatten a navigation graph into records, in waypoint insertion order.
pub fn save(graph: &NavigationGraph) -> Vec<WaypointRecord> {
    graph
        .waypoints()
        .map(|waypoint| {
            let neighbors = graph.neighbours(waypoint.id).unwrap_or(&[]);
            WaypointRecord::from_waypoint(waypoint, neighbors)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: WaypointId, label: Option<&str>, neighbors: &[WaypointId]) -> WaypointRecord {
        WaypointRecord {
            id,
            x: id as f64,
            y: 0.5,
            z: -1.0,
            label: label.map(str::to_string),
            neighbors: neighbors.to_vec(),
        }
    }

    #[test]
    fn one_sided_edges_are_symmetrised() {
        let records = vec![record(1, Some("Lobby"), &[2]), record(2, None, &[])];
        let graph = load(&records).expect("valid batch");

        assert_eq!(graph.neighbours(1).unwrap(), &[2]);
        assert_eq!(graph.neighbours(2).unwrap(), &[1]);
        assert!(graph.waypoint(2).unwrap().kind.is_walkable());
    }

    #[test]
    fn self_reference_is_inconsistent() {
        let records = vec![record(1, None, &[1])];
        let err = load(&records).unwrap_err();
        assert!(matches!(
            err,
            Error::InconsistentGraph {
                id: 1,
                neighbor: 1,
                ..
            }
        ));
    }

    #[test]
    fn duplicate_records_are_rejected() {
        let records = vec![record(3, None, &[]), record(3, Some("Exit"), &[])];
        assert!(matches!(
            load(&records).unwrap_err(),
            Error::DuplicateId { id: 3 }
        ));
    }

    #[test]
    fn records_serialise_without_missing_label() {
        let json = serde_json::to_string(&record(4, None, &[5])).unwrap();
        assert_eq!(json, r#"{"id":4,"x":4.0,"y":0.5,"z":-1.0,"neighbors":[5]}"#);

        let parsed: WaypointRecord = serde_json::from_str(r#"{"id":9,"x":1,"y":2,"z":3}"#)
            .expect("label and neighbours default");
        assert_eq!(parsed.label, None);
        assert!(parsed.neighbors.is_empty());
    }
}
