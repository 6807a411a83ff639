//! Repository Layer
//!
//! Persistence port for inspections and its implementations.

mod db;
mod fallback;
mod memory;
mod remote;
mod sqlite_cache;
mod traits;


pub use db::{init_db, DbState};
pub use fallback::FallbackStore;
pub use memory::MemoryStore;
pub use remote::RemoteStore;
pub use sqlite_cache::SqliteCache;
pub use traits::{InspectionStore, SaveOutcome, SaveSource};
