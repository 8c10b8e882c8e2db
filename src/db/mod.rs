//! Record store for finished project plans.
//!
//! [`ProjectStore`] is the contract the HTTP layer depends on. [`Database`]
//! persists records in SQLite; [`MemoryStore`] keeps them in a map for
//! throwaway servers and tests.

mod memory;
mod schema;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use rusqlite::types::Type;
use rusqlite::{Connection, Row};
use serde_json::Value;

use crate::models::*;

pub use memory::MemoryStore;

/// Create/read/update/delete/list over project records keyed by a
/// sequential integer id.
///
/// Each call is atomic on its own; there are no cross-call transactions.
pub trait ProjectStore: Send + Sync {
    /// Stores `input` under the next id (starting at 1).
    fn create_project(&self, input: InsertProject) -> Result<ProjectRecord>;

    fn get_project(&self, id: i64) -> Result<Option<ProjectRecord>>;

    /// All records, ascending by id.
    fn get_all_projects(&self) -> Result<Vec<ProjectRecord>>;

    /// Replaces the record if it exists, keeping its id.
    fn update_project(&self, id: i64, input: InsertProject) -> Result<Option<ProjectRecord>>;

    /// Returns `false` when no record had that id.
    fn delete_project(&self, id: i64) -> Result<bool>;
}

#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: PathBuf) -> Result<Self> {
        let parent = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Database path has no parent directory"))?;
        std::fs::create_dir_all(parent)?;
        let conn = Connection::open(&path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn default_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "plan-wizard")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        Ok(dirs.data_dir().join("plan-wizard.db"))
    }

    pub fn open_default() -> Result<Self> {
        Self::open(Self::default_path()?)
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().expect("database lock poisoned");
        schema::run_migrations(&conn)
    }
}

impl ProjectStore for Database {
    fn create_project(&self, input: InsertProject) -> Result<ProjectRecord> {
        let conn = self.conn.lock().expect("database lock poisoned");

        conn.execute(
            "INSERT INTO projects (name, description, type, features, tech_stack, timeline, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            (
                &input.name,
                &input.description,
                &input.project_type,
                input.features.to_string(),
                input.tech_stack.to_string(),
                input.timeline.to_string(),
                &input.created_at,
            ),
        )?;

        let id = conn.last_insert_rowid();
        tracing::debug!(id, "Created project record");
        Ok(input.into_record(id))
    }

    fn get_project(&self, id: i64) -> Result<Option<ProjectRecord>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, name, description, type, features, tech_stack, timeline, created_at
             FROM projects WHERE id = ?",
        )?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            Ok(Some(read_project(row)?))
        } else {
            Ok(None)
        }
    }

    fn get_all_projects(&self) -> Result<Vec<ProjectRecord>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, name, description, type, features, tech_stack, timeline, created_at
             FROM projects ORDER BY id",
        )?;

        let projects = stmt
            .query_map([], read_project)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(projects)
    }

    fn update_project(&self, id: i64, input: InsertProject) -> Result<Option<ProjectRecord>> {
        let conn = self.conn.lock().expect("database lock poisoned");

        let changed = conn.execute(
            "UPDATE projects
             SET name = ?, description = ?, type = ?, features = ?, tech_stack = ?, timeline = ?, created_at = ?
             WHERE id = ?",
            (
                &input.name,
                &input.description,
                &input.project_type,
                input.features.to_string(),
                input.tech_stack.to_string(),
                input.timeline.to_string(),
                &input.created_at,
                id,
            ),
        )?;

        if changed == 0 {
            return Ok(None);
        }
        Ok(Some(input.into_record(id)))
    }

    fn delete_project(&self, id: i64) -> Result<bool> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let rows = conn.execute("DELETE FROM projects WHERE id = ?", [id])?;
        Ok(rows > 0)
    }
}

fn read_project(row: &Row<'_>) -> rusqlite::Result<ProjectRecord> {
    Ok(ProjectRecord {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        project_type: row.get(3)?,
        features: json_column(row, 4)?,
        tech_stack: json_column(row, 5)?,
        timeline: json_column(row, 6)?,
        created_at: row.get(7)?,
    })
}

fn json_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Value> {
    let raw: String = row.get(idx)?;
    serde_json::from_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
