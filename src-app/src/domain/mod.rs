//! Domain Layer
//!
//! Identity contract for persisted documents and the shell's error type.
//! The inspection tree itself lives in the `inspection-checklist` crate.

mod entity;
mod error;

pub use entity::Entity;
pub use error::{StoreError, StoreResult};
