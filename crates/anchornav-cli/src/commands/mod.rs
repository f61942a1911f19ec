// Module exports for CLI subcommands.
//
// Each module handles a group of related subcommands; main.rs dispatches to
// them after parsing.

pub mod path;
pub mod transfer;
pub mod waypoints;

use std::path::Path;

use anyhow::{Context, Result};

use anchornav_lib::{resolve_store_path, NavigationSession, SqliteStore};

/// Open the navigation session backed by the resolved SQLite store.
pub fn open_session(store: Option<&Path>) -> Result<NavigationSession<SqliteStore>> {
    let path = resolve_store_path(store).context("failed to resolve the waypoint store path")?;
    let sqlite = SqliteStore::open(&path)
        .with_context(|| format!("failed to open waypoint store at {}", path.display()))?;
    NavigationSession::open(sqlite)
        .with_context(|| format!("failed to load waypoints from {}", path.display()))
}
