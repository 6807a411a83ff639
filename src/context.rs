//! Editing Context
//!
//! The single working copy of an inspection together with the navigation
//! state around it. Every edit goes through the pure operations in
//! [`crate::store`] and [`crate::drag`]; this type only swaps in the result.

use checklist_dnd::{ContainerRef, DragEnd};

use crate::drag;
use crate::gallery;
use crate::models::{Inspection, PhotoItem, Section};
use crate::store;

/// Which section is open for editing (at most one)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    section_id: String,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, section_id: impl Into<String>) {
        self.section_id = section_id.into();
    }

    pub fn clear(&mut self) {
        self.section_id.clear();
    }

    /// Selected id, or None when nothing is selected
    pub fn selected_id(&self) -> Option<&str> {
        if self.section_id.is_empty() {
            None
        } else {
            Some(&self.section_id)
        }
    }

    pub fn is_selected(&self, section_id: &str) -> bool {
        !self.section_id.is_empty() && self.section_id == section_id
    }

    /// Clear the selection if it points at a removed section
    pub fn forget(&mut self, removed_section_id: &str) {
        if self.is_selected(removed_section_id) {
            self.clear();
        }
    }

    /// The selected section, if it still exists
    pub fn resolve<'a>(&self, inspection: &'a Inspection) -> Option<&'a Section> {
        self.selected_id().and_then(|id| inspection.section(id))
    }
}

/// Working copy, selection and gallery of one editing session
#[derive(Debug, Clone)]
pub struct Editor {
    inspection: Inspection,
    selection: Selection,
    gallery: Vec<PhotoItem>,
    /// Bumped on every effective edit
    revision: u64,
}

impl Editor {
    pub fn new(inspection: Inspection) -> Self {
        Self {
            inspection,
            selection: Selection::new(),
            gallery: Vec::new(),
            revision: 0,
        }
    }

    pub fn inspection(&self) -> &Inspection {
        &self.inspection
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn gallery(&self) -> &[PhotoItem] {
        &self.gallery
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn selected_section(&self) -> Option<&Section> {
        self.selection.resolve(&self.inspection)
    }

    pub fn select_section(&mut self, section_id: &str) {
        self.selection.select(section_id);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Replace the gallery, ordered for display
    pub fn set_gallery(&mut self, mut photos: Vec<PhotoItem>) {
        gallery::sort_for_display(&mut photos);
        self.gallery = photos;
    }

    /// Swap in a freshly loaded inspection wholesale
    pub fn replace(&mut self, inspection: Inspection) {
        self.inspection = inspection;
        if self.selected_section().is_none() {
            self.selection.clear();
        }
        self.revision += 1;
    }

    /// Install `next` if it differs; stamps `last_update`. Returns whether it changed.
    fn commit(&mut self, mut next: Inspection) -> bool {
        if next == self.inspection {
            return false;
        }
        next.last_update = Some(chrono::Utc::now().timestamp_millis());
        self.inspection = next;
        self.revision += 1;
        true
    }

    // ========================
    // Edits
    // ========================

    pub fn toggle_item(&mut self, item_id: &str) -> bool {
        let next = store::toggle_item(&self.inspection, item_id);
        self.commit(next)
    }

    pub fn update_item_text(&mut self, container_id: &str, item_id: &str, text: &str) -> bool {
        let next = store::update_item_text(&self.inspection, container_id, item_id, text);
        self.commit(next)
    }

    pub fn add_item(&mut self, container_id: &str) -> bool {
        let next = store::add_item(&self.inspection, container_id);
        self.commit(next)
    }

    pub fn remove_item(&mut self, container_id: &str, item_id: &str) -> bool {
        let next = store::remove_item(&self.inspection, container_id, item_id);
        self.commit(next)
    }

    /// Append a section and select it; returns the new section's id
    pub fn add_section(&mut self) -> Option<String> {
        let next = store::add_section(&self.inspection);
        let new_id = next.sections.last().map(|s| s.id.clone())?;
        self.commit(next);
        self.selection.select(new_id.clone());
        Some(new_id)
    }

    pub fn remove_section(&mut self, section_id: &str) -> bool {
        let next = store::remove_section(&self.inspection, section_id);
        self.selection.forget(section_id);
        self.commit(next)
    }

    pub fn rename_section(&mut self, section_id: &str, title: &str) -> bool {
        let next = store::rename_section(&self.inspection, section_id, title);
        self.commit(next)
    }

    pub fn add_subsection(&mut self, parent_id: &str) -> bool {
        let next = store::add_subsection(&self.inspection, parent_id);
        self.commit(next)
    }

    pub fn remove_subsection(&mut self, section_id: &str, subsection_id: &str) -> bool {
        let next = store::remove_subsection(&self.inspection, section_id, subsection_id);
        self.commit(next)
    }

    pub fn rename_subsection(&mut self, section_id: &str, subsection_id: &str, title: &str) -> bool {
        let next = store::rename_subsection(&self.inspection, section_id, subsection_id, title);
        self.commit(next)
    }

    pub fn add_photo(&mut self, container_id: &str, photo: PhotoItem) -> bool {
        let next = store::add_photo(&self.inspection, container_id, photo);
        self.commit(next)
    }

    pub fn attach_uploaded_photo(&mut self, container_id: &str, url: &str) -> bool {
        let next = store::attach_uploaded_photo(&self.inspection, container_id, url);
        self.commit(next)
    }

    pub fn remove_photo(&mut self, container_id: &str, photo_id: &str) -> bool {
        let next = store::remove_photo(&self.inspection, container_id, photo_id);
        self.commit(next)
    }

    pub fn reorder(&mut self, list: &ContainerRef, from: usize, to: usize) -> bool {
        let next = store::reorder(&self.inspection, list, from, to);
        self.commit(next)
    }

    pub fn set_completed(&mut self, completed: bool) -> bool {
        let next = store::set_completed(&self.inspection, completed);
        self.commit(next)
    }

    /// Apply a completed drag gesture against the current gallery
    pub fn drag_end(&mut self, event: &DragEnd) -> bool {
        let next = drag::handle_drag_end(&self.inspection, &self.gallery, event);
        self.commit(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use checklist_dnd::{DraggedType, ListKind};

    fn sample() -> Inspection {
        let mut inspection = Inspection::new("insp", "Inspection", "2025-05-04", "Villa");
        for id in ["S1", "S2"] {
            let mut section = Section::new(id);
            section.id = id.to_string();
            inspection.sections.push(section);
        }
        inspection
    }

    #[test]
    fn test_selection_basics() {
        let mut selection = Selection::new();
        assert_eq!(selection.selected_id(), None);
        selection.select("S1");
        assert!(selection.is_selected("S1"));
        selection.forget("S2");
        assert_eq!(selection.selected_id(), Some("S1"));
        selection.forget("S1");
        assert_eq!(selection.selected_id(), None);
        assert!(!selection.is_selected(""));
    }

    #[test]
    fn test_removing_selected_section_clears_selection() {
        let mut editor = Editor::new(sample());
        editor.select_section("S1");
        assert!(editor.remove_section("S1"));
        assert_eq!(editor.selection().selected_id(), None);
        assert!(editor.selected_section().is_none());
    }

    #[test]
    fn test_removing_other_section_keeps_selection() {
        let mut editor = Editor::new(sample());
        editor.select_section("S1");
        editor.remove_section("S2");
        assert_eq!(editor.selected_section().map(|s| s.id.as_str()), Some("S1"));
    }

    #[test]
    fn test_add_section_selects_it() {
        let mut editor = Editor::new(sample());
        let id = editor.add_section().unwrap();
        assert_eq!(editor.selection().selected_id(), Some(id.as_str()));
        assert_eq!(editor.inspection().sections.len(), 3);
    }

    #[test]
    fn test_edits_bump_revision_and_stamp() {
        let mut editor = Editor::new(sample());
        assert!(!editor.toggle_item("missing"));
        assert_eq!(editor.revision(), 0);
        assert_eq!(editor.inspection().last_update, None);

        assert!(editor.add_item("S1"));
        assert_eq!(editor.revision(), 1);
        assert!(editor.inspection().last_update.is_some());

        let item_id = editor.inspection().sections[0].items[0].id.clone();
        assert!(editor.toggle_item(&item_id));
        assert!(editor.inspection().sections[0].items[0].checked);
    }

    #[test]
    fn test_gallery_drop_through_editor() {
        let mut editor = Editor::new(sample());
        editor.set_gallery(vec![
            PhotoItem {
                id: "g10".to_string(),
                url: "u10".to_string(),
                caption: "Foto 10".to_string(),
            },
            PhotoItem {
                id: "g1".to_string(),
                url: "u1".to_string(),
                caption: "Foto 1".to_string(),
            },
        ]);
        assert_eq!(editor.gallery()[0].id, "g1");

        let event = DragEnd {
            dragged_type: DraggedType::Photo,
            source: ContainerRef::Gallery,
            destination: Some(ContainerRef::section("S2", ListKind::Photos)),
            source_index: 0,
            dest_index: 0,
            dragged_id: "g10".to_string(),
        };
        assert!(editor.drag_end(&event));
        assert_eq!(editor.inspection().sections[1].photos[0].url, "u10");
        assert_eq!(editor.gallery().len(), 2);
    }

    #[test]
    fn test_replace_drops_stale_selection() {
        let mut editor = Editor::new(sample());
        editor.select_section("S2");
        let mut loaded = sample();
        loaded.sections.truncate(1);
        editor.replace(loaded);
        assert_eq!(editor.selection().selected_id(), None);
    }
}
