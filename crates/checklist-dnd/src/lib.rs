//! Checklist DragDrop Utilities
//!
//! Typed drag-and-drop vocabulary for the inspection checklist:
//! container references, the drag-end event, and a pointer gesture tracker.

mod container;
mod gesture;

pub use container::{ContainerRef, ContainerRefError, ListKind};
pub use gesture::{DragSource, DragTracker, DropTarget, DRAG_THRESHOLD_PX};

use serde::{Deserialize, Serialize};

/// Kind of entity being dragged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DraggedType {
    Section,
    Item,
    SubsectionItem,
    Photo,
}

/// A completed drag gesture
///
/// Serializes to the wire shape UI layers send:
/// `{ draggedType, sourceContainerId, destContainerId, sourceIndex, destIndex, draggedId }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragEnd {
    pub dragged_type: DraggedType,
    #[serde(rename = "sourceContainerId")]
    pub source: ContainerRef,
    /// None when dropped outside any container
    #[serde(rename = "destContainerId")]
    pub destination: Option<ContainerRef>,
    pub source_index: usize,
    pub dest_index: usize,
    pub dragged_id: String,
}

impl DragEnd {
    /// Dropped back exactly where it started
    pub fn is_in_place(&self) -> bool {
        self.destination.as_ref() == Some(&self.source) && self.dest_index == self.source_index
    }
}
