//! Common test utilities and fixture graphs.

use anchornav_lib::{NavigationGraph, Position, Waypoint, WaypointId};

/// Build a graph of walkable waypoints with the given ids and edges.
pub fn graph_from_edges(ids: &[WaypointId], edges: &[(WaypointId, WaypointId)]) -> NavigationGraph {
    let mut graph = NavigationGraph::new();
    for &id in ids {
        graph
            .add_waypoint(Waypoint::walkable(id, Position::new(id as f64, 0.0, 0.0)))
            .expect("fixture ids are unique");
    }
    for &(a, b) in edges {
        graph.add_edge(a, b).expect("fixture edges reference known ids");
    }
    graph
}

/// Six waypoints whose fewest-hop path from 1 to 6 takes three edges.
#[allow(dead_code)]
pub fn six_node_graph() -> NavigationGraph {
    graph_from_edges(
        &[1, 2, 3, 4, 5, 6],
        &[
            (1, 2),
            (1, 3),
            (1, 4),
            (2, 4),
            (2, 5),
            (3, 4),
            (3, 5),
            (5, 6),
        ],
    )
}
