//! Inspection Session
//!
//! Owns the editor for one inspection and keeps the store in step with it.
//! Opening never fails: an unreadable or slow store yields the template and
//! an unreachable photo source yields an empty gallery.

use checklist_dnd::DragEnd;
use inspection_checklist::{default_inspection, Editor, Inspection};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::{StoreError, StoreResult};
use crate::photo_source::PhotoSource;
use crate::repository::{InspectionStore, SaveOutcome};
use crate::scheduler::{SaveScheduler, DEFAULT_DEBOUNCE};

pub const DEFAULT_LOAD_TIMEOUT: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    pub debounce: Duration,
    pub load_timeout: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            load_timeout: DEFAULT_LOAD_TIMEOUT,
        }
    }
}

pub struct InspectionSession {
    editor: Editor,
    scheduler: SaveScheduler,
}

async fn bounded<T, F>(limit: Duration, fut: F) -> StoreResult<T>
where
    F: Future<Output = StoreResult<T>>,
{
    tokio::time::timeout(limit, fut)
        .await
        .map_err(|_| StoreError::Timeout(limit.as_millis() as u64))?
}

impl InspectionSession {
    /// Load inspection `id` (or start from the template) and its property's gallery
    pub async fn open(
        id: &str,
        property: &str,
        store: Arc<dyn InspectionStore>,
        photos: &dyn PhotoSource,
        options: SessionOptions,
    ) -> Self {
        let inspection = match bounded(options.load_timeout, store.load(id)).await {
            Ok(Some(inspection)) => {
                log::info!("loaded inspection {}", id);
                inspection
            }
            Ok(None) => {
                log::info!("no saved inspection {}, starting from template", id);
                template_for(id, property)
            }
            Err(e) => {
                log::warn!("could not load inspection {}: {}; starting from template", id, e);
                template_for(id, property)
            }
        };

        let gallery = match bounded(
            options.load_timeout,
            photos.list_photos_for_property(&inspection.property),
        )
        .await
        {
            Ok(photos) => photos,
            Err(e) => {
                log::warn!("gallery unavailable for {}: {}", inspection.property, e);
                Vec::new()
            }
        };

        let mut editor = Editor::new(inspection);
        editor.set_gallery(gallery);

        Self {
            editor,
            scheduler: SaveScheduler::spawn(store, options.debounce),
        }
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn inspection(&self) -> &Inspection {
        self.editor.inspection()
    }

    /// Run one edit; schedule a save if it changed anything
    pub fn edit<F>(&mut self, f: F) -> bool
    where
        F: FnOnce(&mut Editor) -> bool,
    {
        let changed = f(&mut self.editor);
        if changed {
            self.scheduler.mark_dirty(self.editor.inspection().clone());
        }
        changed
    }

    /// Navigation only, never persisted
    pub fn select_section(&mut self, section_id: &str) {
        self.editor.select_section(section_id);
    }

    pub fn clear_selection(&mut self) {
        self.editor.clear_selection();
    }

    pub fn drag_end(&mut self, event: &DragEnd) -> bool {
        self.edit(|editor| editor.drag_end(event))
    }

    /// Drag-end event as JSON (`draggedType`, `sourceContainerId`, ...).
    /// An undecodable event is logged and ignored.
    pub fn drag_end_json(&mut self, json: &str) -> bool {
        match serde_json::from_str::<DragEnd>(json) {
            Ok(event) => self.drag_end(&event),
            Err(e) => {
                log::warn!("ignoring undecodable drag event: {}", e);
                false
            }
        }
    }

    /// Save pending edits now
    pub async fn flush(&self) -> Option<SaveOutcome> {
        self.scheduler.flush().await
    }

    /// Save pending edits and stop the scheduler
    pub async fn close(self) {
        self.scheduler.shutdown().await;
    }
}

fn template_for(id: &str, property: &str) -> Inspection {
    let mut inspection = default_inspection();
    inspection.id = id.to_string();
    inspection.property = property.to_string();
    inspection
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::photo_source::StaticPhotoSource;
    use crate::repository::{MemoryStore, SaveSource};
    use async_trait::async_trait;
    use inspection_checklist::PhotoItem;

    struct SlowStore;

    #[async_trait]
    impl InspectionStore for SlowStore {
        async fn save(&self, _id: &str, _inspection: &Inspection) -> StoreResult<SaveOutcome> {
            Ok(SaveOutcome::saved(SaveSource::Remote))
        }

        async fn load(&self, _id: &str) -> StoreResult<Option<Inspection>> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(None)
        }
    }

    struct BrokenPhotos;

    #[async_trait]
    impl PhotoSource for BrokenPhotos {
        async fn list_photos_for_property(&self, _property: &str) -> StoreResult<Vec<PhotoItem>> {
            Err(StoreError::RemoteStatus {
                status: 500,
                body: String::new(),
            })
        }
    }

    fn gallery() -> StaticPhotoSource {
        StaticPhotoSource::new().with_photos(
            "Villa",
            vec![PhotoItem::new("u2", "Foto 2"), PhotoItem::new("u1", "Foto 1")],
        )
    }

    #[tokio::test]
    async fn test_open_empty_store_uses_template() {
        let store = Arc::new(MemoryStore::new());
        let session = InspectionSession::open("mine", "Villa", store, &gallery(), SessionOptions::default()).await;

        assert_eq!(session.inspection().id, "mine");
        assert_eq!(session.inspection().property, "Villa");
        assert!(!session.inspection().sections.is_empty());
        let captions: Vec<&str> = session.editor().gallery().iter().map(|p| p.caption.as_str()).collect();
        assert_eq!(captions, vec!["Foto 1", "Foto 2"]);
    }

    #[tokio::test]
    async fn test_open_loads_saved_copy() {
        let store = Arc::new(MemoryStore::new());
        let saved = Inspection::new("mine", "Saved", "2025-05-04", "Villa");
        store.save("mine", &saved).await.unwrap();

        let session = InspectionSession::open("mine", "Villa", store, &gallery(), SessionOptions::default()).await;
        assert_eq!(session.inspection(), &saved);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_store_times_out_to_template() {
        let session = InspectionSession::open(
            "mine",
            "Villa",
            Arc::new(SlowStore),
            &BrokenPhotos,
            SessionOptions::default(),
        )
        .await;
        assert_eq!(session.inspection().id, "mine");
        assert!(!session.inspection().sections.is_empty());
        assert!(session.editor().gallery().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_edits_are_saved_after_debounce() {
        let store = Arc::new(MemoryStore::new());
        let mut session =
            InspectionSession::open("mine", "Villa", store.clone(), &gallery(), SessionOptions::default()).await;

        let section_id = session.inspection().sections[0].id.clone();
        assert!(session.edit(|e| e.add_item(&section_id)));
        assert!(!session.edit(|e| e.toggle_item("missing")));

        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert_eq!(store.save_count().await, 1);
        let saved = store.load("mine").await.unwrap().unwrap();
        assert_eq!(&saved, session.inspection());
    }

    #[tokio::test]
    async fn test_drag_json_copies_gallery_photo() {
        let store = Arc::new(MemoryStore::new());
        let mut session =
            InspectionSession::open("mine", "Villa", store.clone(), &gallery(), SessionOptions::default()).await;
        let section_id = session.inspection().sections[0].id.clone();
        let photo_id = session.editor().gallery()[0].id.clone();
        let before = session.inspection().sections[0].photos.len();

        let json = format!(
            r#"{{"draggedType":"photo","sourceContainerId":"gallery","destContainerId":"section:{}:photos","sourceIndex":0,"destIndex":0,"draggedId":"{}"}}"#,
            section_id, photo_id
        );
        assert!(session.drag_end_json(&json));
        assert_eq!(session.inspection().sections[0].photos.len(), before + 1);
        assert_eq!(session.inspection().sections[0].photos.last().unwrap().url, "u1");

        let snapshot = session.inspection().clone();
        assert!(!session.drag_end_json("{"));
        assert!(!session.drag_end_json(r#"{"draggedType":"photo","sourceContainerId":"section::bogus"}"#));
        assert_eq!(session.inspection(), &snapshot);

        session.close().await;
        assert!(store.contains("mine").await);
    }

    #[tokio::test]
    async fn test_selection_is_not_persisted() {
        let store = Arc::new(MemoryStore::new());
        let mut session =
            InspectionSession::open("mine", "Villa", store.clone(), &gallery(), SessionOptions::default()).await;
        let section_id = session.inspection().sections[1].id.clone();
        session.select_section(&section_id);
        assert!(session.editor().selection().is_selected(&section_id));
        assert_eq!(session.flush().await, None);
        assert_eq!(store.save_count().await, 0);
    }
}
