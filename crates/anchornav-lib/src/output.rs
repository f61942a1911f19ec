use std::fmt::{self, Write};

use serde::Serialize;

use crate::error::Result;
use crate::graph::NavigationGraph;
use crate::path::PathResult;
use crate::waypoint::{write_name, Waypoint, WaypointId};

/// Whether a path query reached its destination.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PathStatus {
    Found,
    NoPath,
}

/// Presentation style for turning a [`PathSummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathRenderMode {
    /// Header line followed by one numbered line per step.
    PlainText,
    /// Single line with steps joined by arrows.
    Compact,
}

/// Endpoint or intermediate step of a path.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PathStep {
    pub index: usize,
    pub id: WaypointId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl PathStep {
    fn new(index: usize, waypoint: &Waypoint) -> Self {
        Self {
            index,
            id: waypoint.id,
            label: waypoint.label().map(str::to_string),
        }
    }
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_name(f, self.id, self.label.as_deref())
    }
}

/// Structured representation of a path query that consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PathSummary {
    pub status: PathStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hops: Option<usize>,
    pub source: PathStep,
    pub destination: PathStep,
    pub steps: Vec<PathStep>,
}

impl PathSummary {
    /// Resolve the waypoints of a query result against the graph it ran on.
    pub fn from_result(
        graph: &NavigationGraph,
        source: WaypointId,
        destination: WaypointId,
        result: &PathResult,
    ) -> Result<Self> {
        let steps = match result.steps() {
            Some(ids) => ids
                .iter()
                .enumerate()
                .map(|(index, id)| graph.waypoint(*id).map(|w| PathStep::new(index, w)))
                .collect::<Result<Vec<_>>>()?,
            None => Vec::new(),
        };

        Ok(Self {
            status: if result.is_found() {
                PathStatus::Found
            } else {
                PathStatus::NoPath
            },
            hops: result.hop_count(),
            source: PathStep::new(0, graph.waypoint(source)?),
            destination: PathStep::new(
                steps.len().saturating_sub(1),
                graph.waypoint(destination)?,
            ),
            steps,
        })
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: PathRenderMode) -> String {
        let mut buffer = String::new();
        let Some(hops) = self.hops else {
            let _ = writeln!(
                buffer,
                "No path: {} -> {}",
                self.source,
                self.destination
            );
            return buffer;
        };

        match mode {
            PathRenderMode::PlainText => {
                let _ = writeln!(
                    buffer,
                    "Path: {} -> {} ({} hops)",
                    self.source,
                    self.destination,
                    hops
                );
                for step in &self.steps {
                    let _ = writeln!(buffer, "{:>3}: {}", step.index, step);
                }
            }
            PathRenderMode::Compact => {
                let joined = self
                    .steps
                    .iter()
                    .map(PathStep::to_string)
                    .collect::<Vec<_>>()
                    .join(" -> ");
                let _ = writeln!(buffer, "{joined}");
            }
        }
        buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::waypoint::Position;

    fn graph() -> NavigationGraph {
        let mut graph = NavigationGraph::new();
        graph
            .add_waypoint(Waypoint::destination(1, Position::default(), "Lobby"))
            .unwrap();
        graph
            .add_waypoint(Waypoint::walkable(2, Position::default()))
            .unwrap();
        graph
            .add_waypoint(Waypoint::destination(3, Position::default(), "Cafe"))
            .unwrap();
        graph.add_edge(1, 2).unwrap();
        graph.add_edge(2, 3).unwrap();
        graph
    }

    #[test]
    fn renders_found_path() {
        let summary =
            PathSummary::from_result(&graph(), 1, 3, &PathResult::Found(vec![1, 2, 3])).unwrap();
        assert_eq!(summary.hops, Some(2));
        assert_eq!(summary.destination.index, 2);

        assert_eq!(
            summary.render(PathRenderMode::PlainText),
            "Path: Lobby (1) -> Cafe (3) (2 hops)\n  0: Lobby (1)\n  1: walkable (2)\n  2: Cafe (3)\n"
        );
        assert_eq!(
            summary.render(PathRenderMode::Compact),
            "Lobby (1) -> walkable (2) -> Cafe (3)\n"
        );
    }

    #[test]
    fn renders_missing_path() {
        let summary = PathSummary::from_result(&graph(), 3, 1, &PathResult::NoPath).unwrap();
        assert_eq!(summary.status, PathStatus::NoPath);
        assert!(summary.steps.is_empty());
        assert_eq!(
            summary.render(PathRenderMode::Compact),
            "No path: Cafe (3) -> Lobby (1)\n"
        );

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["status"], "no_path");
        assert!(json.get("hops").is_none());
    }
}
