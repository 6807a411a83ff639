//! Inspection Checklist
//!
//! In-memory model of a property inspection:
//! - models: entities of the inspection tree
//! - tree: recursive walks over sections and subsections
//! - store: pure edit operations
//! - drag: drag-end event → edit
//! - progress: derived completion percentages
//! - context: working copy and section selection
//! - gallery / template: display ordering and the built-in template

pub mod context;
pub mod drag;
pub mod gallery;
pub mod models;
pub mod progress;
pub mod store;
pub mod template;
pub mod tree;

pub use checklist_dnd::{ContainerRef, DragEnd, DraggedType, ListKind};
pub use context::{Editor, Selection};
pub use drag::{handle_drag_end, plan_drop, DropAction};
pub use models::{ChecklistItem, Inspection, PhotoItem, Section, Subsection};
pub use progress::{container_progress, inspection_progress, progress, Tally};
pub use template::{default_inspection, DEFAULT_INSPECTION_ID};
pub use tree::Container;
