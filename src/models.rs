//! Inspection Models
//!
//! Data structures of one property inspection. Field names match the JSON
//! documents stored by the persistence layer.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_ITEM_TEXT: &str = "New item";
pub const DEFAULT_SECTION_TITLE: &str = "New section";
pub const DEFAULT_SUBSECTION_TITLE: &str = "New subsection";
pub const UNTITLED_PHOTO_CAPTION: &str = "Untitled photo";

/// Fresh globally unique id (UUID v4)
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Id derived from an existing one plus a uniqueness suffix
pub fn derived_id(base: &str) -> String {
    format!("{}-{}", base, Uuid::new_v4().simple())
}

/// A single yes/no task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: String,
    pub text: String,
    pub checked: bool,
}

impl ChecklistItem {
    /// Create an unchecked item with a fresh id
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            text: text.into(),
            checked: false,
        }
    }
}

/// Reference to an externally hosted image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoItem {
    pub id: String,
    pub url: String,
    #[serde(default)]
    pub caption: String,
}

impl PhotoItem {
    pub fn new(url: impl Into<String>, caption: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            url: url.into(),
            caption: caption.into(),
        }
    }

    /// Photo for a freshly uploaded image; `ordinal` is its 1-based position
    pub fn uploaded(url: impl Into<String>, ordinal: usize) -> Self {
        Self::new(url, format!("Photo {}", ordinal))
    }

    /// Copy with a derived id, as placed into a section from the gallery
    pub fn copy_of(&self) -> Self {
        let caption = if self.caption.trim().is_empty() {
            UNTITLED_PHOTO_CAPTION.to_string()
        } else {
            self.caption.clone()
        };
        Self {
            id: derived_id(&self.id),
            url: self.url.clone(),
            caption,
        }
    }
}

/// Nestable grouping inside a section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subsection {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub items: Vec<ChecklistItem>,
    #[serde(default)]
    pub photos: Vec<PhotoItem>,
    /// Child subsections (absent in stored documents when empty)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subsections: Vec<Subsection>,
}

impl Subsection {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            title: title.into(),
            items: Vec::new(),
            photos: Vec::new(),
            subsections: Vec::new(),
        }
    }
}

/// Top-level grouping directly under the inspection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub items: Vec<ChecklistItem>,
    #[serde(default)]
    pub subsections: Vec<Subsection>,
    #[serde(default)]
    pub photos: Vec<PhotoItem>,
}

impl Section {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            title: title.into(),
            items: Vec::new(),
            subsections: Vec::new(),
            photos: Vec::new(),
        }
    }
}

/// Root aggregate: one inspection run of one property
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inspection {
    pub id: String,
    pub title: String,
    /// Calendar date, `YYYY-MM-DD`
    pub date: String,
    pub property: String,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub completed: bool,
    /// Milliseconds since the epoch of the last effective edit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update: Option<i64>,
}

impl Inspection {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        date: impl Into<String>,
        property: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            date: date.into(),
            property: property.into(),
            sections: Vec::new(),
            completed: false,
            last_update: None,
        }
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_creation() {
        let item = ChecklistItem::new("Doorbell works");
        assert_eq!(item.text, "Doorbell works");
        assert!(!item.checked);
        assert_ne!(item.id, ChecklistItem::new("Doorbell works").id);
    }

    #[test]
    fn test_photo_copy_keeps_url_and_caption() {
        let original = PhotoItem {
            id: "g1".to_string(),
            url: "https://example.test/Foto%205.jpg".to_string(),
            caption: "Foto 5".to_string(),
        };
        let copy = original.copy_of();
        assert_ne!(copy.id, "g1");
        assert!(copy.id.starts_with("g1-"));
        assert_eq!(copy.url, original.url);
        assert_eq!(copy.caption, "Foto 5");
    }

    #[test]
    fn test_photo_copy_names_untitled() {
        let original = PhotoItem {
            id: "g2".to_string(),
            url: "u".to_string(),
            caption: "  ".to_string(),
        };
        assert_eq!(original.copy_of().caption, UNTITLED_PHOTO_CAPTION);
        assert_eq!(PhotoItem::uploaded("u", 3).caption, "Photo 3");
    }

    #[test]
    fn test_inspection_json_shape() {
        let json = r#"{
            "id": "insp-1",
            "title": "Property Inspection",
            "date": "2025-05-04",
            "property": "Villa Palacio",
            "completed": false,
            "lastUpdate": 1746380000000,
            "sections": [{
                "id": "S1",
                "title": "General",
                "items": [{ "id": "i1", "text": "Doorbell", "checked": true }],
                "photos": [],
                "subsections": [{ "id": "X", "title": "Entry", "items": [], "photos": [] }]
            }]
        }"#;
        let inspection: Inspection = serde_json::from_str(json).unwrap();
        assert_eq!(inspection.last_update, Some(1746380000000));
        assert!(inspection.sections[0].subsections[0].subsections.is_empty());

        let value = serde_json::to_value(&inspection).unwrap();
        assert!(value["sections"][0]["subsections"][0].get("subsections").is_none());
        assert_eq!(value["lastUpdate"], 1746380000000_i64);
    }
}
