//! Drag-Reorder Protocol
//!
//! Maps one completed drag gesture to at most one mutation.
//! Planning is separate from applying so the decision can be inspected
//! (and logged) without touching the inspection.

use checklist_dnd::{ContainerRef, DragEnd, DraggedType, ListKind};

use crate::models::{Inspection, PhotoItem};
use crate::store;

/// Computed drop action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropAction {
    /// Dropped outside any container
    Cancelled,
    /// Dropped exactly where it started
    InPlace,
    /// Copy a gallery photo into a section or subsection photo list
    CopyGalleryPhoto { photo_id: String, into: ContainerRef },
    /// Splice one element within a single list
    Reorder {
        list: ContainerRef,
        from: usize,
        to: usize,
    },
    /// Cross-container moves and anything else this protocol does not do
    Unsupported,
}

impl DropAction {
    /// Whether applying this action can change the inspection
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            DropAction::CopyGalleryPhoto { .. } | DropAction::Reorder { .. }
        )
    }
}

/// Decide what a drag-end event means
pub fn plan_drop(event: &DragEnd) -> DropAction {
    let Some(destination) = &event.destination else {
        return DropAction::Cancelled;
    };
    if event.is_in_place() {
        return DropAction::InPlace;
    }

    match event.dragged_type {
        DraggedType::Photo if event.source.is_gallery() => match destination {
            ContainerRef::Section { list: ListKind::Photos, .. }
            | ContainerRef::Subsection { list: ListKind::Photos, .. } => {
                DropAction::CopyGalleryPhoto {
                    photo_id: event.dragged_id.clone(),
                    into: destination.clone(),
                }
            }
            _ => DropAction::Unsupported,
        },
        DraggedType::Section => DropAction::Reorder {
            list: ContainerRef::Sections,
            from: event.source_index,
            to: event.dest_index,
        },
        DraggedType::Item | DraggedType::SubsectionItem | DraggedType::Photo
            if *destination == event.source =>
        {
            DropAction::Reorder {
                list: event.source.clone(),
                from: event.source_index,
                to: event.dest_index,
            }
        }
        _ => DropAction::Unsupported,
    }
}

/// Apply a planned action; the gallery is only read
pub fn apply_drop(inspection: &Inspection, gallery: &[PhotoItem], action: &DropAction) -> Inspection {
    match action {
        DropAction::CopyGalleryPhoto { photo_id, into } => {
            match gallery.iter().find(|p| &p.id == photo_id) {
                Some(photo) => store::add_photo_at(inspection, into, photo.copy_of()),
                None => {
                    log::warn!("drop: gallery photo {} not found", photo_id);
                    inspection.clone()
                }
            }
        }
        DropAction::Reorder { list, from, to } => store::reorder(inspection, list, *from, *to),
        DropAction::Cancelled | DropAction::InPlace | DropAction::Unsupported => inspection.clone(),
    }
}

/// Plan and apply one drag-end event
pub fn handle_drag_end(inspection: &Inspection, gallery: &[PhotoItem], event: &DragEnd) -> Inspection {
    let action = plan_drop(event);
    log::debug!("drag end {:?} -> {:?}", event.dragged_type, action);
    apply_drop(inspection, gallery, &action)
}
