//! Database Connection and Setup
//!
//! Manages the SQLite cache connection and migrations.

use rusqlite::Connection;
use std::path::Path;
use std::time::Duration;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::StoreResult;

/// How long a query waits on a database locked by another connection
pub const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Database state wrapper
pub struct DbState {
    conn: Arc<Mutex<Option<Connection>>>,
}

impl DbState {
    /// Shared handle for repositories
    pub fn connection(&self) -> Arc<Mutex<Option<Connection>>> {
        self.conn.clone()
    }

    /// Drop the connection; later queries fail with `NotInitialized`
    pub async fn close(&self) {
        self.conn.lock().await.take();
    }
}

/// Open (or create) the database at `db_path` and migrate it.
/// `:memory:` opens a private in-memory database.
pub async fn init_db(db_path: &Path) -> StoreResult<DbState> {
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let conn = Connection::open(db_path)?;
    conn.busy_timeout(BUSY_TIMEOUT)?;

    run_migrations(&conn)?;
    log::debug!("opened inspection cache at {}", db_path.display());

    Ok(DbState {
        conn: Arc::new(Mutex::new(Some(conn))),
    })
}

/// Check if a column exists in a table
fn column_exists(conn: &Connection, table: &str, column: &str) -> StoreResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
    let names = stmt.query_map([], |row| row.get::<_, String>(1))?;
    for name in names {
        if name? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Run database migrations
fn run_migrations(conn: &Connection) -> StoreResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS inspections (
            id TEXT PRIMARY KEY,
            data TEXT NOT NULL,
            created_at TEXT NOT NULL
        )",
        [],
    )?;

    // Added after the first release
    if !column_exists(conn, "inspections", "updated_at")? {
        conn.execute(
            "ALTER TABLE inspections ADD COLUMN updated_at TEXT NOT NULL DEFAULT ''",
            [],
        )?;
    }

    Ok(())
}
