//! SQLite Inspection Cache
//!
//! Local copy of each inspection as a JSON document, one row per id.
//! Queries run on the blocking pool so a busy database never stalls the runtime.

use async_trait::async_trait;
use inspection_checklist::Inspection;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::Arc;
use tokio::sync::Mutex;

use super::traits::{InspectionStore, SaveOutcome, SaveSource};
use crate::domain::{StoreError, StoreResult};

pub struct SqliteCache {
    conn: Arc<Mutex<Option<Connection>>>,
}

impl SqliteCache {
    pub fn new(conn: Arc<Mutex<Option<Connection>>>) -> Self {
        Self { conn }
    }

    /// Run `query` against the connection on the blocking pool
    async fn with_conn<T, F>(&self, query: F) -> StoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> StoreResult<T> + Send + 'static,
    {
        let conn = self.conn.clone();
        tokio::task::spawn_blocking(move || {
            let guard = conn.blocking_lock();
            let conn = guard.as_ref().ok_or(StoreError::NotInitialized)?;
            query(conn)
        })
        .await?
    }

    /// Stored ids, most recently updated first
    pub async fn list_ids(&self) -> StoreResult<Vec<String>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT id FROM inspections ORDER BY updated_at DESC, id")?;
            let ids = stmt
                .query_map([], |row| row.get::<_, String>(0))?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(ids)
        })
        .await
    }

    pub async fn delete(&self, id: &str) -> StoreResult<()> {
        let id = id.to_string();
        self.with_conn(move |conn| {
            conn.execute("DELETE FROM inspections WHERE id = ?1", params![id])?;
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl InspectionStore for SqliteCache {
    async fn save(&self, id: &str, inspection: &Inspection) -> StoreResult<SaveOutcome> {
        let data = serde_json::to_string(inspection)?;
        let now = chrono::Utc::now().to_rfc3339();
        let id = id.to_string();

        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO inspections (id, data, created_at, updated_at) VALUES (?1, ?2, ?3, ?3)
                 ON CONFLICT(id) DO UPDATE SET data = excluded.data, updated_at = excluded.updated_at",
                params![id, data, now],
            )?;
            Ok(())
        })
        .await?;

        Ok(SaveOutcome::saved(SaveSource::LocalCache))
    }

    async fn load(&self, id: &str) -> StoreResult<Option<Inspection>> {
        let key = id.to_string();
        let data: Option<String> = self
            .with_conn(move |conn| {
                let data = conn
                    .query_row(
                        "SELECT data FROM inspections WHERE id = ?1",
                        params![key],
                        |row| row.get(0),
                    )
                    .optional()?;
                Ok(data)
            })
            .await?;

        let Some(data) = data else {
            return Ok(None);
        };
        match serde_json::from_str(&data) {
            Ok(inspection) => Ok(Some(inspection)),
            Err(e) => {
                log::warn!("cached inspection {} is malformed: {}", id, e);
                Ok(None)
            }
        }
    }
}
