//! Container References
//!
//! Typed addresses for every droppable list of an inspection, plus the
//! string form used by UI layers that can only carry plain identifiers.
//!
//! String form, one segment per `:`:
//! - `sections`
//! - `gallery`
//! - `section:<section id>:<list>`
//! - `subsection:<section id>:<subsection id>:<list>`
//!
//! Id segments are percent-encoded, so ids may contain any character.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Characters escaped inside an id segment
const SEGMENT: &AsciiSet = &CONTROLS.add(b':').add(b'%').add(b' ');

/// Which ordered list of a section or subsection is addressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    /// Checklist items
    Items,
    /// Attached photos
    Photos,
    /// Child subsections
    Subsections,
}

impl ListKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListKind::Items => "items",
            ListKind::Photos => "photos",
            ListKind::Subsections => "subsections",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "items" => Some(ListKind::Items),
            "photos" => Some(ListKind::Photos),
            "subsections" => Some(ListKind::Subsections),
            _ => None,
        }
    }
}

/// Address of one droppable list
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContainerRef {
    /// The inspection's top-level section list
    Sections,
    /// The read-only photo gallery; never a mutation target
    Gallery,
    /// One list owned directly by a section
    Section { section_id: String, list: ListKind },
    /// One list owned by a subsection (at any depth) of a section
    Subsection {
        section_id: String,
        subsection_id: String,
        list: ListKind,
    },
}

/// Errors from decoding the string form
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContainerRefError {
    #[error("malformed container reference: {0:?}")]
    Malformed(String),
    #[error("unknown list kind {0:?}")]
    UnknownList(String),
    #[error("empty id segment in {0:?}")]
    EmptyId(String),
    #[error("id segment is not valid UTF-8 in {0:?}")]
    InvalidEncoding(String),
}

impl ContainerRef {
    pub fn section(section_id: impl Into<String>, list: ListKind) -> Self {
        ContainerRef::Section {
            section_id: section_id.into(),
            list,
        }
    }

    pub fn subsection(
        section_id: impl Into<String>,
        subsection_id: impl Into<String>,
        list: ListKind,
    ) -> Self {
        ContainerRef::Subsection {
            section_id: section_id.into(),
            subsection_id: subsection_id.into(),
            list,
        }
    }

    pub fn is_gallery(&self) -> bool {
        matches!(self, ContainerRef::Gallery)
    }

    /// List addressed inside a section or subsection
    pub fn list(&self) -> Option<ListKind> {
        match self {
            ContainerRef::Section { list, .. } | ContainerRef::Subsection { list, .. } => {
                Some(*list)
            }
            ContainerRef::Sections | ContainerRef::Gallery => None,
        }
    }

    /// Id of the section or subsection that owns the addressed list
    pub fn owner_id(&self) -> Option<&str> {
        match self {
            ContainerRef::Section { section_id, .. } => Some(section_id),
            ContainerRef::Subsection { subsection_id, .. } => Some(subsection_id),
            ContainerRef::Sections | ContainerRef::Gallery => None,
        }
    }

    /// Id of the top-level section the list lives under
    pub fn section_id(&self) -> Option<&str> {
        match self {
            ContainerRef::Section { section_id, .. }
            | ContainerRef::Subsection { section_id, .. } => Some(section_id),
            ContainerRef::Sections | ContainerRef::Gallery => None,
        }
    }

    pub fn encode(&self) -> String {
        match self {
            ContainerRef::Sections => "sections".to_string(),
            ContainerRef::Gallery => "gallery".to_string(),
            ContainerRef::Section { section_id, list } => {
                format!("section:{}:{}", encode_segment(section_id), list.as_str())
            }
            ContainerRef::Subsection {
                section_id,
                subsection_id,
                list,
            } => format!(
                "subsection:{}:{}:{}",
                encode_segment(section_id),
                encode_segment(subsection_id),
                list.as_str()
            ),
        }
    }

    pub fn parse(raw: &str) -> Result<Self, ContainerRefError> {
        let parts: Vec<&str> = raw.split(':').collect();
        match parts.as_slice() {
            ["sections"] => Ok(ContainerRef::Sections),
            ["gallery"] => Ok(ContainerRef::Gallery),
            ["section", section_id, list] => Ok(ContainerRef::Section {
                section_id: decode_segment(section_id, raw)?,
                list: parse_list(list)?,
            }),
            ["subsection", section_id, subsection_id, list] => Ok(ContainerRef::Subsection {
                section_id: decode_segment(section_id, raw)?,
                subsection_id: decode_segment(subsection_id, raw)?,
                list: parse_list(list)?,
            }),
            _ => Err(ContainerRefError::Malformed(raw.to_string())),
        }
    }
}

fn encode_segment(id: &str) -> String {
    utf8_percent_encode(id, SEGMENT).to_string()
}

fn decode_segment(segment: &str, raw: &str) -> Result<String, ContainerRefError> {
    if segment.is_empty() {
        return Err(ContainerRefError::EmptyId(raw.to_string()));
    }
    percent_decode_str(segment)
        .decode_utf8()
        .map(|id| id.into_owned())
        .map_err(|_| ContainerRefError::InvalidEncoding(raw.to_string()))
}

fn parse_list(list: &str) -> Result<ListKind, ContainerRefError> {
    ListKind::parse(list).ok_or_else(|| ContainerRefError::UnknownList(list.to_string()))
}

impl fmt::Display for ContainerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for ContainerRef {
    type Err = ContainerRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContainerRef::parse(s)
    }
}

impl Serialize for ContainerRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for ContainerRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        ContainerRef::parse(&raw).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_parse_section() {
        let container = ContainerRef::section("S1", ListKind::Photos);
        assert_eq!(container.encode(), "section:S1:photos");
        assert_eq!(ContainerRef::parse("section:S1:photos").unwrap(), container);
    }

    #[test]
    fn test_ids_with_delimiters_survive() {
        // UUIDs carry '-', and hand-written ids may carry ':' or '%'
        let container = ContainerRef::subsection("a-b:c", "50%:off", ListKind::Items);
        let encoded = container.encode();
        assert_eq!(encoded.matches(':').count(), 3);
        assert_eq!(encoded.parse::<ContainerRef>().unwrap(), container);
    }

    #[test]
    fn test_fixed_containers() {
        assert_eq!(ContainerRef::parse("sections").unwrap(), ContainerRef::Sections);
        assert!(ContainerRef::parse("gallery").unwrap().is_gallery());
        assert_eq!(ContainerRef::Gallery.list(), None);
        assert_eq!(ContainerRef::Sections.owner_id(), None);
    }

    #[test]
    fn test_owner_and_section_ids() {
        let sub = ContainerRef::subsection("S1", "X", ListKind::Photos);
        assert_eq!(sub.owner_id(), Some("X"));
        assert_eq!(sub.section_id(), Some("S1"));
        assert_eq!(sub.list(), Some(ListKind::Photos));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            ContainerRef::parse("section-S1"),
            Err(ContainerRefError::Malformed("section-S1".to_string()))
        );
        assert_eq!(
            ContainerRef::parse("section:S1:notes"),
            Err(ContainerRefError::UnknownList("notes".to_string()))
        );
        assert_eq!(
            ContainerRef::parse("section::items"),
            Err(ContainerRefError::EmptyId("section::items".to_string()))
        );
        assert!(matches!(
            ContainerRef::parse("section:%FF:items"),
            Err(ContainerRefError::InvalidEncoding(_))
        ));
    }

    #[test]
    fn test_serde_as_string() {
        let container = ContainerRef::section("S1", ListKind::Items);
        let json = serde_json::to_string(&container).unwrap();
        assert_eq!(json, "\"section:S1:items\"");
        let back: ContainerRef = serde_json::from_str(&json).unwrap();
        assert_eq!(back, container);
        assert!(serde_json::from_str::<ContainerRef>("\"bogus\"").is_err());
    }
}
