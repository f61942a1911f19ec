mod common;

use std::collections::HashMap;

use anchornav_lib::{find_path, find_path_observed, Error, PathResult};
use common::{graph_from_edges, six_node_graph};

#[test]
fn path_to_self_is_single_step() {
    let graph = six_node_graph();
    for id in 1..=6 {
        assert_eq!(find_path(&graph, id, id).unwrap(), PathResult::Found(vec![id]));
    }

    let isolated = graph_from_edges(&[42], &[]);
    assert_eq!(
        find_path(&isolated, 42, 42).unwrap(),
        PathResult::Found(vec![42])
    );
}

#[test]
fn disconnected_components_have_no_path() {
    let graph = graph_from_edges(&[1, 2, 3, 4], &[(1, 2), (3, 4)]);

    assert_eq!(find_path(&graph, 1, 3).unwrap(), PathResult::NoPath);
    assert_eq!(find_path(&graph, 4, 2).unwrap(), PathResult::NoPath);
    assert_eq!(
        find_path(&graph, 3, 4).unwrap(),
        PathResult::Found(vec![3, 4])
    );
}

#[test]
fn fewest_hops_are_chosen() {
    let graph = six_node_graph();
    let result = find_path(&graph, 1, 6).unwrap();

    assert_eq!(result.hop_count(), Some(3));
    // Neighbours are expanded in edge insertion order, so 2 is reached before 3.
    assert_eq!(result, PathResult::Found(vec![1, 2, 5, 6]));

    let reverse = find_path(&graph, 6, 1).unwrap();
    assert_eq!(reverse.hop_count(), Some(3));
    let steps = reverse.steps().unwrap();
    assert_eq!(steps.first(), Some(&6));
    assert_eq!(steps.last(), Some(&1));
}

#[test]
fn result_is_deterministic() {
    let graph = six_node_graph();
    let first = find_path(&graph, 4, 6).unwrap();
    for _ in 0..10 {
        assert_eq!(find_path(&graph, 4, 6).unwrap(), first);
    }
    assert_eq!(first.hop_count(), Some(3));
}

#[test]
fn path_steps_follow_edges() {
    let graph = six_node_graph();
    for source in 1..=6 {
        for destination in 1..=6 {
            let result = find_path(&graph, source, destination).unwrap();
            let steps = result.steps().expect("graph is connected");
            for pair in steps.windows(2) {
                assert!(graph.neighbours(pair[0]).unwrap().contains(&pair[1]));
            }
        }
    }
}

#[test]
fn unknown_endpoints_are_errors() {
    let graph = six_node_graph();

    assert!(matches!(
        find_path(&graph, 1, 999),
        Err(Error::UnknownNode { id: 999 })
    ));
    assert!(matches!(
        find_path(&graph, 999, 1),
        Err(Error::UnknownNode { id: 999 })
    ));
}

#[test]
fn each_waypoint_is_finalised_once() {
    // Square with a diagonal, a tail, and an unreachable waypoint so the whole
    // component is explored.
    let graph = graph_from_edges(
        &[1, 2, 3, 4, 5, 6],
        &[(1, 2), (2, 3), (3, 4), (4, 1), (1, 3), (4, 5)],
    );

    let mut counts: HashMap<i64, usize> = HashMap::new();
    let result = find_path_observed(&graph, 1, 6, |id| *counts.entry(id).or_default() += 1).unwrap();

    assert_eq!(result, PathResult::NoPath);
    assert_eq!(counts.len(), 5);
    assert!(counts.values().all(|&count| count == 1), "{counts:?}");
    assert!(!counts.contains_key(&6));
}

#[test]
fn search_stops_at_destination() {
    let graph = six_node_graph();
    let mut order = Vec::new();
    let result = find_path_observed(&graph, 1, 2, |id| order.push(id)).unwrap();

    assert_eq!(result, PathResult::Found(vec![1, 2]));
    assert_eq!(order, vec![1, 2]);
}

#[test]
fn query_does_not_mutate_graph() {
    let graph = six_node_graph();
    let before = graph.clone();
    let _ = find_path(&graph, 1, 6).unwrap();
    assert_eq!(graph, before);
}
