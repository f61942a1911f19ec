//! Persistence backends for waypoint records.
//!
//! The navigation core only needs a handful of operations from storage, which
//! are captured by the [`GraphStore`] trait. [`SqliteStore`] keeps records in a
//! single SQLite table with the neighbour list JSON-encoded in one column;
//! [`MemoryStore`] keeps them in a vector.

use std::fs;
use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use crate::error::{Error, Result};
use crate::records::WaypointRecord;
use crate::waypoint::WaypointId;

// `seq` records insertion order; `id` is the waypoint identifier.
const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS waypoints (
    seq INTEGER PRIMARY KEY AUTOINCREMENT,
    id INTEGER NOT NULL UNIQUE,
    x REAL NOT NULL,
    y REAL NOT NULL,
    z REAL NOT NULL,
    name TEXT,
    adj TEXT
)";

/// Storage operations required by [`crate::NavigationSession`].
pub trait GraphStore {
    /// Return every stored record.
    fn load_all(&mut self) -> Result<Vec<WaypointRecord>>;

    /// Store a new record. Fails with [`Error::DuplicateId`] if the id exists.
    fn insert(&mut self, record: &WaypointRecord) -> Result<()>;

    /// Overwrite an existing record. Fails with [`Error::UnknownNode`] if absent.
    fn update(&mut self, record: &WaypointRecord) -> Result<()>;

    /// Overwrite two existing records as one change.
    ///
    /// The default runs two [`GraphStore::update`] calls in sequence; stores
    /// that can apply both atomically override it.
    fn update_pair(&mut self, first: &WaypointRecord, second: &WaypointRecord) -> Result<()> {
        self.update(first)?;
        self.update(second)
    }

    /// Remove one record. Fails with [`Error::UnknownNode`] if absent.
    fn delete(&mut self, id: WaypointId) -> Result<()>;

    /// Remove every record, returning how many were deleted.
    fn delete_all(&mut self) -> Result<usize>;

    /// Replace the stored contents with `records`.
    fn replace_all(&mut self, records: &[WaypointRecord]) -> Result<()> {
        self.delete_all()?;
        for record in records {
            self.insert(record)?;
        }
        Ok(())
    }
}

/// SQLite-backed waypoint store.
#[derive(Debug)]
pub struct SqliteStore {
    connection: Connection,
}

impl SqliteStore {
    /// Open (or create) a store at `path`, creating parent directories as needed.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        debug!(path = %path.display(), "opening waypoint store");
        Self::with_connection(Connection::open(path)?)
    }

    /// Open a store that lives only as long as the returned value.
    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(connection: Connection) -> Result<Self> {
        connection.execute_batch(SCHEMA)?;
        Ok(Self { connection })
    }

    fn exists(&self, id: WaypointId) -> Result<bool> {
        let found = self
            .connection
            .query_row("SELECT 1 FROM waypoints WHERE id = ?1", [id], |_| Ok(()))
            .optional()?;
        Ok(found.is_some())
    }
}

impl GraphStore for SqliteStore {
    fn load_all(&mut self) -> Result<Vec<WaypointRecord>> {
        let mut stmt = self
            .connection
            .prepare("SELECT id, x, y, z, name, adj FROM waypoints ORDER BY seq")?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, WaypointId>(0)?,
                row.get::<_, f64>(1)?,
                row.get::<_, f64>(2)?,
                row.get::<_, f64>(3)?,
                row.get::<_, Option<String>>(4)?,
                row.get::<_, Option<String>>(5)?,
            ))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (id, x, y, z, label, adj) = row?;
            records.push(WaypointRecord {
                id,
                x,
                y,
                z,
                label,
                neighbors: decode_neighbors(adj.as_deref())?,
            });
        }
        debug!(records = records.len(), "loaded waypoint records");
        Ok(records)
    }

    fn insert(&mut self, record: &WaypointRecord) -> Result<()> {
        if self.exists(record.id)? {
            return Err(Error::DuplicateId { id: record.id });
        }
        self.connection.execute(
            "INSERT INTO waypoints (id, x, y, z, name, adj) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                record.id,
                record.x,
                record.y,
                record.z,
                record.label,
                encode_neighbors(&record.neighbors)?
            ],
        )?;
        Ok(())
    }

    fn update(&mut self, record: &WaypointRecord) -> Result<()> {
        update_row(&self.connection, record)
    }

    fn update_pair(&mut self, first: &WaypointRecord, second: &WaypointRecord) -> Result<()> {
        let tx = self.connection.transaction()?;
        update_row(&tx, first)?;
        update_row(&tx, second)?;
        tx.commit()?;
        Ok(())
    }

    fn delete(&mut self, id: WaypointId) -> Result<()> {
        let changed = self
            .connection
            .execute("DELETE FROM waypoints WHERE id = ?1", [id])?;
        if changed == 0 {
            return Err(Error::UnknownNode { id });
        }
        Ok(())
    }

    fn delete_all(&mut self) -> Result<usize> {
        let deleted = self.connection.execute("DELETE FROM waypoints", [])?;
        debug!(deleted, "cleared waypoint store");
        Ok(deleted)
    }

    fn replace_all(&mut self, records: &[WaypointRecord]) -> Result<()> {
        let tx = self.connection.transaction()?;
        tx.execute("DELETE FROM waypoints", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO waypoints (id, x, y, z, name, adj) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for record in records {
                stmt.execute(params![
                    record.id,
                    record.x,
                    record.y,
                    record.z,
                    record.label,
                    encode_neighbors(&record.neighbors)?
                ])
                .map_err(|err| match err {
                    rusqlite::Error::SqliteFailure(code, _)
                        if code.code == rusqlite::ErrorCode::ConstraintViolation =>
                    {
                        Error::DuplicateId { id: record.id }
                    }
                    other => Error::Sqlite(other),
                })?;
            }
        }
        tx.commit()?;
        debug!(records = records.len(), "replaced waypoint store contents");
        Ok(())
    }
}

fn update_row(connection: &Connection, record: &WaypointRecord) -> Result<()> {
    let changed = connection.execute(
        "UPDATE waypoints SET x = ?2, y = ?3, z = ?4, name = ?5, adj = ?6 WHERE id = ?1",
        params![
            record.id,
            record.x,
            record.y,
            record.z,
            record.label,
            encode_neighbors(&record.neighbors)?
        ],
    )?;
    if changed == 0 {
        return Err(Error::UnknownNode { id: record.id });
    }
    Ok(())
}

fn encode_neighbors(neighbors: &[WaypointId]) -> Result<Option<String>> {
    if neighbors.is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::to_string(neighbors)?))
}

fn decode_neighbors(adj: Option<&str>) -> Result<Vec<WaypointId>> {
    match adj {
        Some(text) if !text.trim().is_empty() => Ok(serde_json::from_str(text)?),
        _ => Ok(Vec::new()),
    }
}

/// In-memory waypoint store that keeps records in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<WaypointRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records currently held by the store.
    pub fn records(&self) -> &[WaypointRecord] {
        &self.records
    }

    fn position(&self, id: WaypointId) -> Option<usize> {
        self.records.iter().position(|record| record.id == id)
    }
}

impl GraphStore for MemoryStore {
    fn load_all(&mut self) -> Result<Vec<WaypointRecord>> {
        Ok(self.records.clone())
    }

    fn insert(&mut self, record: &WaypointRecord) -> Result<()> {
        if self.position(record.id).is_some() {
            return Err(Error::DuplicateId { id: record.id });
        }
        self.records.push(record.clone());
        Ok(())
    }

    fn update(&mut self, record: &WaypointRecord) -> Result<()> {
        let slot = self
            .position(record.id)
            .ok_or(Error::UnknownNode { id: record.id })?;
        self.records[slot] = record.clone();
        Ok(())
    }

    fn update_pair(&mut self, first: &WaypointRecord, second: &WaypointRecord) -> Result<()> {
        let first_slot = self
            .position(first.id)
            .ok_or(Error::UnknownNode { id: first.id })?;
        let second_slot = self
            .position(second.id)
            .ok_or(Error::UnknownNode { id: second.id })?;
        self.records[first_slot] = first.clone();
        self.records[second_slot] = second.clone();
        Ok(())
    }

    fn delete(&mut self, id: WaypointId) -> Result<()> {
        let slot = self.position(id).ok_or(Error::UnknownNode { id })?;
        self.records.remove(slot);
        Ok(())
    }

    fn delete_all(&mut self) -> Result<usize> {
        let deleted = self.records.len();
        self.records.clear();
        Ok(deleted)
    }
}
