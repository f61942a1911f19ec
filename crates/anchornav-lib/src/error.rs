use crate::waypoint::WaypointId;

use thiserror::Error;

/// Convenient result alias for the anchornav library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when inserting a waypoint whose identifier is already taken.
    #[error("waypoint {id} already exists")]
    DuplicateId { id: WaypointId },

    /// Raised when an operation references a waypoint that is not in the graph.
    #[error("unknown waypoint {id}")]
    UnknownNode { id: WaypointId },

    /// Raised when a batch of records references waypoints outside the batch.
    #[error("inconsistent graph: waypoint {id} lists neighbour {neighbor}, {reason}")]
    InconsistentGraph {
        id: WaypointId,
        neighbor: WaypointId,
        reason: &'static str,
    },

    /// Raised when connecting a waypoint to itself.
    #[error("waypoint {id} cannot be connected to itself")]
    SelfLoop { id: WaypointId },

    /// Raised when a destination label could not be found in the graph.
    #[error("unknown waypoint '{label}'{}", format_suggestions(.suggestions))]
    UnknownLabel {
        label: String,
        suggestions: Vec<String>,
    },

    /// Raised when a destination label is already used by another waypoint.
    #[error("destination label '{label}' is already used by waypoint {existing}")]
    DuplicateLabel { label: String, existing: WaypointId },

    /// Raised when a destination label cannot be used to refer to a waypoint.
    #[error("invalid destination label '{label}': {reason}")]
    InvalidLabel { label: String, reason: &'static str },

    /// Raised when a legacy anchor parameter string cannot be parsed.
    #[error("invalid anchor parameters '{input}': {message}")]
    InvalidAnchorParameters { input: String, message: String },

    /// Raised when the lock guarding a shared graph was poisoned by a panic.
    #[error("navigation graph lock poisoned")]
    LockPoisoned,

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for the waypoint store")]
    ProjectDirsUnavailable,

    /// Wrapper for SQLite errors.
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    /// Wrapper for JSON encoding errors of the neighbour column.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
