//! Tree Utilities
//!
//! Recursive walks over the section/subsection tree. Subsections nest to any
//! depth, so every lookup here descends all the way down.

use checklist_dnd::ContainerRef;

use crate::models::{ChecklistItem, Inspection, PhotoItem, Section, Subsection};

/// Anything that owns items, photos and child subsections
pub trait Container {
    fn id(&self) -> &str;
    fn title(&self) -> &str;
    fn set_title(&mut self, title: String);
    fn items(&self) -> &[ChecklistItem];
    fn items_mut(&mut self) -> &mut Vec<ChecklistItem>;
    fn photos(&self) -> &[PhotoItem];
    fn photos_mut(&mut self) -> &mut Vec<PhotoItem>;
    fn subsections(&self) -> &[Subsection];
    fn subsections_mut(&mut self) -> &mut Vec<Subsection>;
}

macro_rules! impl_container {
    ($ty:ty) => {
        impl Container for $ty {
            fn id(&self) -> &str {
                &self.id
            }
            fn title(&self) -> &str {
                &self.title
            }
            fn set_title(&mut self, title: String) {
                self.title = title;
            }
            fn items(&self) -> &[ChecklistItem] {
                &self.items
            }
            fn items_mut(&mut self) -> &mut Vec<ChecklistItem> {
                &mut self.items
            }
            fn photos(&self) -> &[PhotoItem] {
                &self.photos
            }
            fn photos_mut(&mut self) -> &mut Vec<PhotoItem> {
                &mut self.photos
            }
            fn subsections(&self) -> &[Subsection] {
                &self.subsections
            }
            fn subsections_mut(&mut self) -> &mut Vec<Subsection> {
                &mut self.subsections
            }
        }
    };
}

impl_container!(Section);
impl_container!(Subsection);

/// Call `f` on `container` and every descendant (pre-order DFS)
pub fn visit_containers<F>(container: &dyn Container, f: &mut F)
where
    F: FnMut(&dyn Container),
{
    f(container);
    for sub in container.subsections() {
        visit_containers(sub, f);
    }
}

/// Mutable variant of [`visit_containers`]
pub fn visit_containers_mut<F>(container: &mut dyn Container, f: &mut F)
where
    F: FnMut(&mut dyn Container),
{
    f(&mut *container);
    for sub in container.subsections_mut().iter_mut() {
        visit_containers_mut(sub, f);
    }
}

/// Every item in a subtree, in display order (for counting; the tree is untouched)
pub fn items_in(container: &dyn Container) -> Vec<&ChecklistItem> {
    fn collect<'a>(container: &'a dyn Container, out: &mut Vec<&'a ChecklistItem>) {
        out.extend(container.items());
        for sub in container.subsections() {
            collect(sub, out);
        }
    }

    let mut out = Vec::new();
    collect(container, &mut out);
    out
}

pub fn find_section_mut<'a>(inspection: &'a mut Inspection, id: &str) -> Option<&'a mut Section> {
    inspection.sections.iter_mut().find(|s| s.id == id)
}

/// Subsection with `id` anywhere below `subsections`
pub fn find_subsection<'a>(subsections: &'a [Subsection], id: &str) -> Option<&'a Subsection> {
    for sub in subsections {
        if sub.id == id {
            return Some(sub);
        }
        if let Some(found) = find_subsection(&sub.subsections, id) {
            return Some(found);
        }
    }
    None
}

/// Mutable variant of [`find_subsection`]
pub fn find_subsection_mut<'a>(
    subsections: &'a mut [Subsection],
    id: &str,
) -> Option<&'a mut Subsection> {
    for sub in subsections.iter_mut() {
        if sub.id == id {
            return Some(sub);
        }
        if let Some(found) = find_subsection_mut(&mut sub.subsections, id) {
            return Some(found);
        }
    }
    None
}

/// Section or subsection with `id`, at any depth
pub fn find_container<'a>(inspection: &'a Inspection, id: &str) -> Option<&'a dyn Container> {
    for section in &inspection.sections {
        if section.id == id {
            return Some(section as &dyn Container);
        }
        if let Some(sub) = find_subsection(&section.subsections, id) {
            return Some(sub as &dyn Container);
        }
    }
    None
}

/// Mutable variant of [`find_container`]
pub fn find_container_mut<'a>(
    inspection: &'a mut Inspection,
    id: &str,
) -> Option<&'a mut dyn Container> {
    for section in inspection.sections.iter_mut() {
        if section.id == id {
            return Some(section as &mut dyn Container);
        }
        if let Some(sub) = find_subsection_mut(&mut section.subsections, id) {
            return Some(sub as &mut dyn Container);
        }
    }
    None
}

/// Owner of the list a container reference points at
///
/// Subsection references are resolved inside their section only.
pub fn resolve_owner_mut<'a>(
    inspection: &'a mut Inspection,
    container: &ContainerRef,
) -> Option<&'a mut dyn Container> {
    match container {
        ContainerRef::Section { section_id, .. } => {
            find_section_mut(inspection, section_id).map(|s| s as &mut dyn Container)
        }
        ContainerRef::Subsection {
            section_id,
            subsection_id,
            ..
        } => {
            let section = find_section_mut(inspection, section_id)?;
            find_subsection_mut(&mut section.subsections, subsection_id)
                .map(|s| s as &mut dyn Container)
        }
        ContainerRef::Sections | ContainerRef::Gallery => None,
    }
}

/// Render containers as an indented outline using recursive DFS
/// Returns (container, depth) pairs in display order
pub fn flatten_tree(sections: &[Section]) -> Vec<(&dyn Container, usize)> {
    fn collect<'a>(
        container: &'a dyn Container,
        depth: usize,
        result: &mut Vec<(&'a dyn Container, usize)>,
    ) {
        result.push((container, depth));
        for sub in container.subsections() {
            collect(sub, depth + 1, result);
        }
    }

    let mut result = Vec::new();
    for section in sections {
        collect(section, 0, &mut result);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use checklist_dnd::ListKind;

    fn sub(id: &str, children: Vec<Subsection>) -> Subsection {
        Subsection {
            id: id.to_string(),
            title: format!("Sub {}", id),
            items: vec![ChecklistItem {
                id: format!("{}-item", id),
                text: "check".to_string(),
                checked: false,
            }],
            photos: Vec::new(),
            subsections: children,
        }
    }

    fn sample() -> Inspection {
        let mut inspection = Inspection::new("insp", "Inspection", "2025-05-04", "Villa");
        let mut s1 = Section::new("General");
        s1.id = "S1".to_string();
        let mut s2 = Section::new("Social Areas");
        s2.id = "S2".to_string();
        s2.subsections = vec![
            sub("A", vec![sub("A1", vec![sub("A1a", vec![])])]),
            sub("B", vec![]),
        ];
        inspection.sections = vec![s1, s2];
        inspection
    }

    #[test]
    fn test_find_container_at_any_depth() {
        let inspection = sample();
        assert_eq!(find_container(&inspection, "S1").map(|c| c.title()), Some("General"));
        assert_eq!(find_container(&inspection, "A1a").map(|c| c.id()), Some("A1a"));
        assert!(find_container(&inspection, "missing").is_none());
    }

    #[test]
    fn test_find_container_mut_edits_deep_node() {
        let mut inspection = sample();
        let container = find_container_mut(&mut inspection, "A1a").unwrap();
        container.set_title("Drawer".to_string());
        let s2 = &inspection.sections[1];
        assert_eq!(s2.subsections[0].subsections[0].subsections[0].title, "Drawer");
    }

    #[test]
    fn test_items_in_counts_all_depths() {
        let inspection = sample();
        let ids: Vec<&str> = items_in(&inspection.sections[1])
            .into_iter()
            .map(|i| i.id.as_str())
            .collect();
        assert_eq!(ids, vec!["A-item", "A1-item", "A1a-item", "B-item"]);
    }

    #[test]
    fn test_visit_containers_mut_reaches_every_node() {
        let mut inspection = sample();
        let mut visited = 0;
        visit_containers_mut(&mut inspection.sections[1], &mut |c| {
            visited += 1;
            for item in c.items_mut().iter_mut() {
                item.checked = true;
            }
        });
        assert_eq!(visited, 5);
        assert!(items_in(&inspection.sections[1]).iter().all(|i| i.checked));
    }

    #[test]
    fn test_resolve_owner_is_scoped_to_section() {
        let mut inspection = sample();
        let inside = ContainerRef::subsection("S2", "A1", ListKind::Items);
        assert_eq!(resolve_owner_mut(&mut inspection, &inside).map(|c| c.id().to_string()), Some("A1".to_string()));

        let wrong_section = ContainerRef::subsection("S1", "A1", ListKind::Items);
        assert!(resolve_owner_mut(&mut inspection, &wrong_section).is_none());
        assert!(resolve_owner_mut(&mut inspection, &ContainerRef::Gallery).is_none());
    }

    #[test]
    fn test_flatten_tree() {
        let inspection = sample();
        let tree = flatten_tree(&inspection.sections);

        // Should be: S1 (0), S2 (0), A (1), A1 (2), A1a (3), B (1)
        let outline: Vec<(&str, usize)> = tree.iter().map(|(c, d)| (c.id(), *d)).collect();
        assert_eq!(
            outline,
            vec![("S1", 0), ("S2", 0), ("A", 1), ("A1", 2), ("A1a", 3), ("B", 1)]
        );
    }
}
