//! Photo Sources
//!
//! Where the gallery comes from. The gallery is read-only: photos are only
//! ever copied out of it into sections.

use async_trait::async_trait;
use inspection_checklist::PhotoItem;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use std::collections::HashMap;

use crate::domain::StoreResult;

/// Characters escaped in a storage object name
const OBJECT_NAME: &AsciiSet = &CONTROLS.add(b' ').add(b'#').add(b'?').add(b'%');

#[async_trait]
pub trait PhotoSource: Send + Sync {
    /// Candidate photos for `property`, in source order
    async fn list_photos_for_property(&self, property: &str) -> StoreResult<Vec<PhotoItem>>;
}

/// Fixed photo lists keyed by property name
#[derive(Debug, Clone, Default)]
pub struct StaticPhotoSource {
    by_property: HashMap<String, Vec<PhotoItem>>,
}

impl StaticPhotoSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_photos(mut self, property: &str, photos: Vec<PhotoItem>) -> Self {
        self.by_property.insert(property.to_string(), photos);
        self
    }
}

#[async_trait]
impl PhotoSource for StaticPhotoSource {
    async fn list_photos_for_property(&self, property: &str) -> StoreResult<Vec<PhotoItem>> {
        Ok(self.by_property.get(property).cloned().unwrap_or_default())
    }
}

/// Numbered images in a public storage folder named after the property:
/// `{base_url}/{folder}/{prefix} {n}.jpg` for n in 1..=count
#[derive(Debug, Clone)]
pub struct SequentialPhotoSource {
    base_url: String,
    prefix: String,
    count: usize,
}

impl SequentialPhotoSource {
    pub fn new(base_url: &str, prefix: &str, count: usize) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            prefix: prefix.to_string(),
            count,
        }
    }

    pub fn photos(&self, property: &str) -> Vec<PhotoItem> {
        let folder = folder_name(property);
        (1..=self.count)
            .map(|n| {
                let caption = format!("{} {}", self.prefix, n);
                let object = format!("{}.jpg", caption);
                PhotoItem {
                    id: format!("photo-{}", n),
                    url: format!(
                        "{}/{}/{}",
                        self.base_url,
                        folder,
                        utf8_percent_encode(&object, OBJECT_NAME)
                    ),
                    caption,
                }
            })
            .collect()
    }
}

/// Storage folder for a property: lowercase, whitespace removed
pub fn folder_name(property: &str) -> String {
    property
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

#[async_trait]
impl PhotoSource for SequentialPhotoSource {
    async fn list_photos_for_property(&self, property: &str) -> StoreResult<Vec<PhotoItem>> {
        Ok(self.photos(property))
    }
}
