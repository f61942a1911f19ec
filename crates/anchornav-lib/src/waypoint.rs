use std::fmt;

use serde::{Deserialize, Serialize};

/// Numeric identifier for a waypoint.
pub type WaypointId = i64;

/// Coordinates of a waypoint. The graph treats them as opaque values; they may
/// be geodetic (latitude, longitude, altitude) or a local frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Classification of a waypoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WaypointKind {
    /// A named point the user can navigate to.
    Destination { label: String },
    /// An unnamed point that only exists to be walked through.
    Walkable,
}

impl WaypointKind {
    /// Label of a destination, `None` for walkable points.
    pub fn label(&self) -> Option<&str> {
        match self {
            WaypointKind::Destination { label } => Some(label),
            WaypointKind::Walkable => None,
        }
    }

    /// Persisted records mark walkable points by the absence of a label.
    pub fn from_label(label: Option<String>) -> Self {
        match label {
            Some(label) => WaypointKind::Destination { label },
            None => WaypointKind::Walkable,
        }
    }

    pub fn is_walkable(&self) -> bool {
        matches!(self, WaypointKind::Walkable)
    }
}

/// A placed anchor within the navigation graph.
///
/// Adjacency is owned by [`crate::NavigationGraph`]; a waypoint only carries
/// the data fixed at creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub id: WaypointId,
    pub position: Position,
    pub kind: WaypointKind,
}

impl Waypoint {
    /// Create a destination waypoint with the given label.
    pub fn destination(id: WaypointId, position: Position, label: impl Into<String>) -> Self {
        Self {
            id,
            position,
            kind: WaypointKind::Destination {
                label: label.into(),
            },
        }
    }

    /// Create a walkable waypoint.
    pub fn walkable(id: WaypointId, position: Position) -> Self {
        Self {
            id,
            position,
            kind: WaypointKind::Walkable,
        }
    }

    pub fn label(&self) -> Option<&str> {
        self.kind.label()
    }
}

/// Renders as `Label (id)` for destinations and `walkable (id)` otherwise.
impl fmt::Display for Waypoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_name(f, self.id, self.label())
    }
}

pub(crate) fn write_name(
    f: &mut fmt::Formatter<'_>,
    id: WaypointId,
    label: Option<&str>,
) -> fmt::Result {
    match label {
        Some(label) => write!(f, "{label} ({id})"),
        None => write!(f, "walkable ({id})"),
    }
}
