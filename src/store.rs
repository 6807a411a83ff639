//! Inspection Mutations
//!
//! Pure edit operations. Each one takes the current inspection and returns
//! a new value with exactly one logical change applied. Addressing an id
//! that does not exist returns an equal value; nothing here panics or
//! returns an error.

use checklist_dnd::{ContainerRef, ListKind};

use crate::models::{
    ChecklistItem, Inspection, PhotoItem, Section, Subsection, DEFAULT_ITEM_TEXT,
    DEFAULT_SECTION_TITLE, DEFAULT_SUBSECTION_TITLE,
};
use crate::tree::{
    find_container_mut, find_section_mut, find_subsection_mut, resolve_owner_mut,
    visit_containers_mut, Container,
};

// ========================
// Helpers
// ========================

/// Move the element at `from` to `to`, shifting the ones in between.
/// Returns false (and leaves the list alone) when an index is out of range.
pub fn move_index<T>(list: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= list.len() || to >= list.len() {
        return false;
    }
    if from != to {
        let moved = list.remove(from);
        list.insert(to, moved);
    }
    true
}

/// Clone, apply `edit` to the container with `container_id`, return the clone
fn edit_container<F>(inspection: &Inspection, container_id: &str, edit: F) -> Inspection
where
    F: FnOnce(&mut dyn Container),
{
    let mut next = inspection.clone();
    match find_container_mut(&mut next, container_id) {
        Some(container) => edit(container),
        None => log::debug!("container {} not found, edit skipped", container_id),
    }
    next
}

fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

// ========================
// Checklist Items
// ========================

/// Flip `checked` on the item with `item_id`, wherever it lives
pub fn toggle_item(inspection: &Inspection, item_id: &str) -> Inspection {
    let mut next = inspection.clone();
    let mut found = false;
    for section in next.sections.iter_mut() {
        visit_containers_mut(section, &mut |container: &mut dyn Container| {
            for item in container.items_mut().iter_mut().filter(|i| i.id == item_id) {
                item.checked = !item.checked;
                found = true;
            }
        });
    }
    if !found {
        log::debug!("toggle: item {} not found", item_id);
    }
    next
}

/// Replace the text of an item in the container or any of its subsections.
/// Blank text is ignored.
pub fn update_item_text(
    inspection: &Inspection,
    container_id: &str,
    item_id: &str,
    text: &str,
) -> Inspection {
    if is_blank(text) {
        log::debug!("update: blank text for item {} ignored", item_id);
        return inspection.clone();
    }
    edit_container(inspection, container_id, |container| {
        visit_containers_mut(container, &mut |c: &mut dyn Container| {
            for item in c.items_mut().iter_mut().filter(|i| i.id == item_id) {
                item.text = text.to_string();
            }
        });
    })
}

/// Append a fresh unchecked item to a section or subsection
pub fn add_item(inspection: &Inspection, container_id: &str) -> Inspection {
    edit_container(inspection, container_id, |container| {
        container.items_mut().push(ChecklistItem::new(DEFAULT_ITEM_TEXT));
    })
}

/// Delete an item from the container and from all of its subsections
pub fn remove_item(inspection: &Inspection, container_id: &str, item_id: &str) -> Inspection {
    edit_container(inspection, container_id, |container| {
        visit_containers_mut(container, &mut |c: &mut dyn Container| {
            c.items_mut().retain(|i| i.id != item_id);
        });
    })
}

// ========================
// Sections
// ========================

/// Append a new empty section
pub fn add_section(inspection: &Inspection) -> Inspection {
    let mut next = inspection.clone();
    next.sections.push(Section::new(DEFAULT_SECTION_TITLE));
    next
}

pub fn remove_section(inspection: &Inspection, section_id: &str) -> Inspection {
    let mut next = inspection.clone();
    next.sections.retain(|s| s.id != section_id);
    if next.sections.len() == inspection.sections.len() {
        log::debug!("remove: section {} not found", section_id);
    }
    next
}

/// Rename a section; blank titles are ignored
pub fn rename_section(inspection: &Inspection, section_id: &str, title: &str) -> Inspection {
    let mut next = inspection.clone();
    if is_blank(title) {
        return next;
    }
    match find_section_mut(&mut next, section_id) {
        Some(section) => section.title = title.to_string(),
        None => log::debug!("rename: section {} not found", section_id),
    }
    next
}

// ========================
// Subsections
// ========================

/// Append a new empty subsection under a section (or under a subsection)
pub fn add_subsection(inspection: &Inspection, parent_id: &str) -> Inspection {
    edit_container(inspection, parent_id, |container| {
        container
            .subsections_mut()
            .push(Subsection::new(DEFAULT_SUBSECTION_TITLE));
    })
}

fn remove_subsection_in(subsections: &mut Vec<Subsection>, id: &str) -> bool {
    let before = subsections.len();
    subsections.retain(|s| s.id != id);
    if subsections.len() != before {
        return true;
    }
    subsections
        .iter_mut()
        .any(|s| remove_subsection_in(&mut s.subsections, id))
}

/// Remove a subsection found anywhere inside the given section
pub fn remove_subsection(inspection: &Inspection, section_id: &str, subsection_id: &str) -> Inspection {
    let mut next = inspection.clone();
    let removed = find_section_mut(&mut next, section_id)
        .map(|section| remove_subsection_in(&mut section.subsections, subsection_id))
        .unwrap_or(false);
    if !removed {
        log::debug!("remove: subsection {} not found in section {}", subsection_id, section_id);
    }
    next
}

/// Rename a subsection found anywhere inside the given section; blank titles are ignored
pub fn rename_subsection(
    inspection: &Inspection,
    section_id: &str,
    subsection_id: &str,
    title: &str,
) -> Inspection {
    let mut next = inspection.clone();
    if is_blank(title) {
        return next;
    }
    let target = find_section_mut(&mut next, section_id)
        .and_then(|section| find_subsection_mut(&mut section.subsections, subsection_id));
    match target {
        Some(sub) => sub.title = title.to_string(),
        None => log::debug!("rename: subsection {} not found in section {}", subsection_id, section_id),
    }
    next
}

// ========================
// Photos
// ========================

/// Append a photo to a section or subsection
pub fn add_photo(inspection: &Inspection, container_id: &str, photo: PhotoItem) -> Inspection {
    edit_container(inspection, container_id, |container| {
        container.photos_mut().push(photo);
    })
}

/// Append a photo to the photo list a container reference points at
pub fn add_photo_at(inspection: &Inspection, target: &ContainerRef, photo: PhotoItem) -> Inspection {
    let mut next = inspection.clone();
    match resolve_owner_mut(&mut next, target) {
        Some(container) => container.photos_mut().push(photo),
        None => log::debug!("add photo: target {} not found", target),
    }
    next
}

/// Add a just-uploaded image, captioned by its position in the list
pub fn attach_uploaded_photo(inspection: &Inspection, container_id: &str, url: &str) -> Inspection {
    edit_container(inspection, container_id, |container| {
        let ordinal = container.photos().len() + 1;
        container.photos_mut().push(PhotoItem::uploaded(url, ordinal));
    })
}

pub fn remove_photo(inspection: &Inspection, container_id: &str, photo_id: &str) -> Inspection {
    edit_container(inspection, container_id, |container| {
        container.photos_mut().retain(|p| p.id != photo_id);
    })
}

// ========================
// Ordering
// ========================

/// Splice one element of an ordered list from `from` to `to`
pub fn reorder(inspection: &Inspection, list: &ContainerRef, from: usize, to: usize) -> Inspection {
    let mut next = inspection.clone();
    let moved = match list {
        ContainerRef::Sections => move_index(&mut next.sections, from, to),
        ContainerRef::Gallery => {
            log::warn!("reorder: the gallery is read-only");
            false
        }
        ContainerRef::Section { list: kind, .. } | ContainerRef::Subsection { list: kind, .. } => {
            match resolve_owner_mut(&mut next, list) {
                Some(owner) => match kind {
                    ListKind::Items => move_index(owner.items_mut(), from, to),
                    ListKind::Photos => move_index(owner.photos_mut(), from, to),
                    ListKind::Subsections => move_index(owner.subsections_mut(), from, to),
                },
                None => false,
            }
        }
    };
    if !moved {
        log::debug!("reorder: {} [{} -> {}] skipped", list, from, to);
    }
    next
}

// ========================
// Inspection
// ========================

pub fn set_completed(inspection: &Inspection, completed: bool) -> Inspection {
    Inspection {
        completed,
        ..inspection.clone()
    }
}
