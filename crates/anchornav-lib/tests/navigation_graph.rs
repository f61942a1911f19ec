mod common;

use anchornav_lib::{Error, NavigationGraph, Position, Waypoint, WaypointKind};
use common::graph_from_edges;

#[test]
fn add_edge_is_symmetric() {
    let mut graph = graph_from_edges(&[10, 20, 30], &[]);
    graph.add_edge(10, 30).expect("known ids");

    assert!(graph.neighbours(10).unwrap().contains(&30));
    assert!(graph.neighbours(30).unwrap().contains(&10));
    assert!(graph.neighbours(20).unwrap().is_empty());

    for waypoint in graph.waypoints() {
        for &neighbour in graph.neighbours(waypoint.id).unwrap() {
            assert!(
                graph.neighbours(neighbour).unwrap().contains(&waypoint.id),
                "edge {} -> {} has no reverse",
                waypoint.id,
                neighbour
            );
        }
    }
}

#[test]
fn add_edge_twice_matches_once() {
    let mut once = graph_from_edges(&[1, 2], &[]);
    once.add_edge(1, 2).unwrap();

    let mut twice = graph_from_edges(&[1, 2], &[]);
    assert!(twice.add_edge(1, 2).unwrap());
    assert!(!twice.add_edge(1, 2).unwrap());
    assert!(!twice.add_edge(2, 1).unwrap());

    assert_eq!(once, twice);
    assert_eq!(twice.neighbours(1).unwrap(), &[2]);
    assert_eq!(twice.edge_count(), 1);
}

#[test]
fn unknown_ids_are_reported() {
    let mut graph = graph_from_edges(&[1], &[]);

    assert!(matches!(
        graph.waypoint(5),
        Err(Error::UnknownNode { id: 5 })
    ));
    assert!(matches!(
        graph.add_edge(1, 5),
        Err(Error::UnknownNode { id: 5 })
    ));
    assert!(graph.neighbours(1).unwrap().is_empty());
}

#[test]
fn remove_all_waypoints_empties_graph() {
    let mut graph = graph_from_edges(&[1, 2, 3], &[(1, 2), (2, 3)]);
    graph.remove_all_waypoints();

    assert!(graph.is_empty());
    assert_eq!(graph.edge_count(), 0);
    assert!(!graph.contains(1));

    graph.remove_all_waypoints();
    assert_eq!(graph, NavigationGraph::new());
}

#[test]
fn waypoints_keep_insertion_order_and_kind() {
    let mut graph = NavigationGraph::new();
    graph
        .add_waypoint(Waypoint::destination(7, Position::new(1.0, 2.0, 3.0), "Exit"))
        .unwrap();
    graph
        .add_waypoint(Waypoint::walkable(3, Position::default()))
        .unwrap();

    let ids: Vec<_> = graph.waypoints().map(|w| w.id).collect();
    assert_eq!(ids, vec![7, 3]);
    assert_eq!(
        graph.waypoint(7).unwrap().kind,
        WaypointKind::Destination {
            label: "Exit".to_string()
        }
    );
    assert_eq!(graph.find_by_label("Exit").map(|w| w.id), Some(7));
    assert!(graph.find_by_label("Entrance").is_none());
}
