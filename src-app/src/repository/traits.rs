//! Repository Layer - Core Traits
//!
//! Defines the abstract persistence interface.
//! Implementations can use SQLite, in-memory, HTTP, etc.

use async_trait::async_trait;
use inspection_checklist::Inspection;
use serde::{Deserialize, Serialize};

use crate::domain::StoreResult;

/// Where a save landed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SaveSource {
    Remote,
    LocalCache,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveOutcome {
    pub success: bool,
    pub source: SaveSource,
}

impl SaveOutcome {
    pub fn saved(source: SaveSource) -> Self {
        Self {
            success: true,
            source,
        }
    }
}

/// Key-value persistence of whole inspection documents
///
/// All operations are async to support local and remote backends.
#[async_trait]
pub trait InspectionStore: Send + Sync {
    /// Store `inspection` under `id`, replacing any previous copy
    async fn save(&self, id: &str, inspection: &Inspection) -> StoreResult<SaveOutcome>;

    /// Fetch the copy stored under `id`
    async fn load(&self, id: &str) -> StoreResult<Option<Inspection>>;
}
