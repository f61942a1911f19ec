//! anchornav library entry points.
//!
//! This crate maintains the navigation graph built from placed AR anchors,
//! answers fewest-hop path queries over it, and converts the graph to and from
//! the flat records persistence backends store. Higher-level consumers (the
//! CLI, the AR session) should only depend on the items exported here instead
//! of reimplementing behavior.
//!

#![deny(warnings)]

pub mod error;
pub mod graph;
pub mod legacy;
pub mod output;
pub mod path;
pub mod records;
pub mod session;
pub mod store;
pub mod store_path;
pub mod waypoint;

pub use error::{Error, Result};
pub use graph::{NavigationGraph, SharedGraph};
pub use legacy::AnchorParameters;
pub use output::{PathRenderMode, PathStatus, PathStep, PathSummary};
pub use path::{find_path, find_path_observed, PathResult};
pub use records::{load, save, WaypointRecord};
pub use session::{LegacyImport, NavigationSession};
pub use store::{GraphStore, MemoryStore, SqliteStore};
pub use store_path::{default_store_path, resolve_store_path, STORE_ENV_VAR};
pub use waypoint::{Position, Waypoint, WaypointId, WaypointKind};
