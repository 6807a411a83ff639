//! Domain Layer - Core Entity Trait
//!
//! Anything a store persists must expose a stable key.

use inspection_checklist::Inspection;

/// Core trait for persisted documents
pub trait Entity: Sized + Send + Sync + Clone {
    /// The type of the entity's unique identifier
    type Id: Clone + Eq + std::hash::Hash + Send + Sync + std::fmt::Display;

    /// Returns the entity's unique identifier
    fn id(&self) -> Self::Id;
}

impl Entity for Inspection {
    type Id = String;

    fn id(&self) -> String {
        self.id.clone()
    }
}
