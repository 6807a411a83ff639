//! Pointer Gesture Tracking
//!
//! Turns raw pointer input into a single [`DragEnd`] event.
//! Uses a movement threshold to distinguish click from drag.

use crate::{ContainerRef, DragEnd, DraggedType};

/// Movement threshold in pixels to start dragging
pub const DRAG_THRESHOLD_PX: i32 = 5;

/// Where a drag started
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSource {
    pub dragged_type: DraggedType,
    pub dragged_id: String,
    pub container: ContainerRef,
    pub index: usize,
}

/// Drop position under the pointer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropTarget {
    pub container: ContainerRef,
    pub index: usize,
}

/// Pending press (mousedown but not yet dragging)
#[derive(Debug, Clone)]
struct Pending {
    source: DragSource,
    start_x: i32,
    start_y: i32,
}

/// Gesture state for one pointer
#[derive(Debug, Default)]
pub struct DragTracker {
    pending: Option<Pending>,
    dragging: Option<DragSource>,
    drop_target: Option<DropTarget>,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a press on a draggable element
    pub fn press(&mut self, source: DragSource, x: i32, y: i32) {
        self.pending = Some(Pending {
            source,
            start_x: x,
            start_y: y,
        });
        self.dragging = None;
        self.drop_target = None;
    }

    /// Pointer moved; returns true when this movement started the drag
    pub fn pointer_move(&mut self, x: i32, y: i32) -> bool {
        if self.dragging.is_some() {
            return false;
        }
        let Some(pending) = &self.pending else {
            return false;
        };

        let dx = (x - pending.start_x).abs();
        let dy = (y - pending.start_y).abs();
        if dx > DRAG_THRESHOLD_PX || dy > DRAG_THRESHOLD_PX {
            self.dragging = self.pending.take().map(|p| p.source);
            return true;
        }
        false
    }

    /// Pointer entered a drop position
    pub fn enter(&mut self, target: DropTarget) {
        if self.dragging.is_some() {
            self.drop_target = Some(target);
        }
    }

    /// Pointer left the current drop position
    pub fn leave(&mut self) {
        if self.dragging.is_some() {
            self.drop_target = None;
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging.is_some()
    }

    pub fn dragging(&self) -> Option<&DragSource> {
        self.dragging.as_ref()
    }

    pub fn drop_target(&self) -> Option<&DropTarget> {
        self.drop_target.as_ref()
    }

    /// Pointer released. Returns the completed drag, or None for a plain click.
    pub fn release(&mut self) -> Option<DragEnd> {
        self.pending = None;
        let source = self.dragging.take()?;
        let target = self.drop_target.take();

        Some(DragEnd {
            dragged_type: source.dragged_type,
            dest_index: target.as_ref().map_or(source.index, |t| t.index),
            destination: target.map(|t| t.container),
            source: source.container,
            source_index: source.index,
            dragged_id: source.dragged_id,
        })
    }

    /// Abort without producing an event (e.g. Escape pressed)
    pub fn cancel(&mut self) {
        self.pending = None;
        self.dragging = None;
        self.drop_target = None;
    }
}
