//! In-Memory Inspection Store
//!
//! Keeps serialized documents in a map; used offline and in tests.

use async_trait::async_trait;
use inspection_checklist::Inspection;
use std::collections::HashMap;
use tokio::sync::Mutex;

use super::traits::{InspectionStore, SaveOutcome, SaveSource};
use crate::domain::StoreResult;

#[derive(Default)]
pub struct MemoryStore {
    docs: Mutex<HashMap<String, String>>,
    saves: Mutex<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful saves so far
    pub async fn save_count(&self) -> usize {
        *self.saves.lock().await
    }

    pub async fn contains(&self, id: &str) -> bool {
        self.docs.lock().await.contains_key(id)
    }

    /// Store raw text under `id`, bypassing serialization
    pub async fn insert_raw(&self, id: &str, data: &str) {
        self.docs.lock().await.insert(id.to_string(), data.to_string());
    }
}

#[async_trait]
impl InspectionStore for MemoryStore {
    async fn save(&self, id: &str, inspection: &Inspection) -> StoreResult<SaveOutcome> {
        let data = serde_json::to_string(inspection)?;
        self.docs.lock().await.insert(id.to_string(), data);
        *self.saves.lock().await += 1;
        Ok(SaveOutcome::saved(SaveSource::LocalCache))
    }

    async fn load(&self, id: &str) -> StoreResult<Option<Inspection>> {
        let docs = self.docs.lock().await;
        match docs.get(id) {
            Some(data) => Ok(Some(serde_json::from_str(data)?)),
            None => Ok(None),
        }
    }
}
