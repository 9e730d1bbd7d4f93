//! Book document model.
//!
//! This module defines the structures decoded from the book JSON served by the
//! backend: [`BookDocument`], [`BookMeta`], [`Chapter`], [`Section`], and
//! [`SummaryVideo`]. Field names serialise exactly as they appear on the wire
//! (`book_id`, `chapter_title`, `section_number`, ...).
//!
//! # Lenient decoding
//!
//! The document sits upstream of a viewer that must always render something,
//! so decoding never fails on shape. Only invalid JSON syntax is an error:
//!
//! - a field with the wrong shape (e.g. `"chapters": 7`) decodes to its empty default;
//! - numbers are accepted wherever text is expected;
//! - non-object array elements decode to an all-default record, so array
//!   lengths are preserved.

use std::fmt;

use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::locate::NavigationPosition;

/// A chapter or section number: the wire format allows either an integer
/// or a string (e.g. `3` or `"3.2"`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Ordinal {
    Int(i64),
    Text(String),
}

impl fmt::Display for Ordinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ordinal::Int(n) => write!(f, "{}", n),
            Ordinal::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for Ordinal {
    fn from(n: i64) -> Self {
        Ordinal::Int(n)
    }
}

impl From<&str> for Ordinal {
    fn from(s: &str) -> Self {
        Ordinal::Text(s.to_string())
    }
}

/// The `book` header object: identity and display title.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BookMeta {
    #[serde(
        rename = "book_id",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,
}

impl BookMeta {
    /// The book id, treating an empty string as absent.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref().filter(|s| !s.is_empty())
    }

    /// The book title, treating an empty string as absent.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|s| !s.is_empty())
    }
}

/// Optional explainer video attached to a section.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SummaryVideo {
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub youtube_id: Option<String>,
}

/// One readable unit of a chapter.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Section {
    #[serde(
        rename = "section_id",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,

    #[serde(
        rename = "section_number",
        default,
        deserialize_with = "lenient::ordinal",
        skip_serializing_if = "Option::is_none"
    )]
    pub number: Option<Ordinal>,

    #[serde(
        rename = "section_title",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub summary: Option<String>,

    #[serde(default, deserialize_with = "lenient::texts")]
    pub keywords: Vec<String>,

    /// Body paragraphs, in reading order.
    #[serde(default, deserialize_with = "lenient::texts")]
    pub content: Vec<String>,

    #[serde(
        default,
        deserialize_with = "lenient::optional_record",
        skip_serializing_if = "Option::is_none"
    )]
    pub summary_video: Option<SummaryVideo>,
}

impl Section {
    /// The YouTube id of the summary video, if one is attached and non-empty.
    pub fn video_id(&self) -> Option<&str> {
        self.summary_video
            .as_ref()
            .and_then(|v| v.youtube_id.as_deref())
            .filter(|id| !id.is_empty())
    }
}

/// A chapter: a numbered, titled, ordered group of sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Chapter {
    #[serde(
        rename = "chapter_id",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,

    #[serde(
        rename = "chapter_number",
        default,
        deserialize_with = "lenient::ordinal",
        skip_serializing_if = "Option::is_none"
    )]
    pub number: Option<Ordinal>,

    #[serde(
        rename = "chapter_title",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "lenient::records")]
    pub sections: Vec<Section>,
}

/// The full nested book document: header plus ordered chapters.
///
/// Read-only once loaded. Hosts replace it wholesale (typically behind an
/// `Arc`) instead of mutating it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BookDocument {
    #[serde(default, deserialize_with = "lenient::record")]
    pub book: BookMeta,

    #[serde(default, deserialize_with = "lenient::records")]
    pub chapters: Vec<Chapter>,
}

impl BookDocument {
    /// Decode a document from JSON text.
    ///
    /// Fails only when `json` is not syntactically valid JSON. Any JSON value
    /// decodes, including a non-object root (which yields an empty document).
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(json)?;
        Ok(Self::from_value(value))
    }

    /// Decode a document from an already-parsed JSON value. Total.
    pub fn from_value(value: Value) -> Self {
        lenient::coerce_record(value)
    }

    /// Total number of sections across all chapters.
    pub fn section_count(&self) -> usize {
        self.chapters.iter().map(|c| c.sections.len()).sum()
    }

    /// Iterate over every section in document order with its position.
    pub fn sections(&self) -> impl Iterator<Item = (NavigationPosition, &Chapter, &Section)> {
        self.chapters.iter().enumerate().flat_map(|(c, chapter)| {
            chapter
                .sections
                .iter()
                .enumerate()
                .map(move |(s, section)| (NavigationPosition::new(c, s), chapter, section))
        })
    }
}

/// `deserialize_with` helpers implementing the coercion rules described in the
/// module docs.
mod lenient {
    use super::*;

    pub(super) fn coerce_record<T: DeserializeOwned + Default>(value: Value) -> T {
        match value {
            Value::Object(_) => serde_json::from_value(value).unwrap_or_default(),
            _ => T::default(),
        }
    }

    fn coerce_text(value: Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub(super) fn record<'de, D, T>(d: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Default,
    {
        Ok(coerce_record(Value::deserialize(d)?))
    }

    pub(super) fn optional_record<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Default,
    {
        Ok(match Value::deserialize(d)? {
            value @ Value::Object(_) => Some(coerce_record(value)),
            _ => None,
        })
    }

    pub(super) fn records<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Default,
    {
        Ok(match Value::deserialize(d)? {
            Value::Array(items) => items.into_iter().map(coerce_record).collect(),
            _ => Vec::new(),
        })
    }

    pub(super) fn text<'de, D>(d: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(coerce_text(Value::deserialize(d)?))
    }

    pub(super) fn texts<'de, D>(d: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(d)? {
            Value::Array(items) => items.into_iter().filter_map(coerce_text).collect(),
            _ => Vec::new(),
        })
    }

    pub(super) fn ordinal<'de, D>(d: D) -> Result<Option<Ordinal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(d)? {
            Value::Number(n) => Some(match n.as_i64() {
                Some(i) => Ordinal::Int(i),
                None => Ordinal::Text(n.to_string()),
            }),
            Value::String(s) => Some(Ordinal::Text(s)),
            _ => None,
        })
    }
}

// --- tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "book": { "book_id": "stats_py", "title": "Statistics with Python" },
        "chapters": [
            {
                "chapter_id": "ch-1", "chapter_number": 1, "chapter_title": "Basics",
                "sections": [
                    {
                        "section_id": "sec-1", "section_number": "1.1",
                        "section_title": "Mean", "summary": "Averages.",
                        "keywords": ["Mean", "Central Tendency"],
                        "content": ["First paragraph.", "Second paragraph."],
                        "summary_video": { "youtube_id": "abc123" }
                    }
                ]
            }
        ]
    }"#;

    #[test]
    fn decodes_wire_format() {
        let doc = BookDocument::from_json(SAMPLE).unwrap();
        assert_eq!(doc.book.id(), Some("stats_py"));
        assert_eq!(doc.book.title(), Some("Statistics with Python"));
        assert_eq!(doc.chapters.len(), 1);

        let chapter = &doc.chapters[0];
        assert_eq!(chapter.id.as_deref(), Some("ch-1"));
        assert_eq!(chapter.number, Some(Ordinal::Int(1)));

        let section = &chapter.sections[0];
        assert_eq!(section.number, Some(Ordinal::Text("1.1".into())));
        assert_eq!(section.keywords, vec!["Mean", "Central Tendency"]);
        assert_eq!(section.content.len(), 2);
        assert_eq!(section.video_id(), Some("abc123"));
    }

    #[test]
    fn wrong_shapes_coerce_to_empty() {
        let doc = BookDocument::from_json(
            r#"{ "book": "nope", "chapters": { "not": "an array" } }"#,
        )
        .unwrap();
        assert_eq!(doc, BookDocument::default());
    }

    #[test]
    fn non_object_elements_keep_their_slot() {
        let doc = BookDocument::from_json(r#"{ "chapters": [42, {"chapter_id": "c2"}] }"#).unwrap();
        assert_eq!(doc.chapters.len(), 2);
        assert_eq!(doc.chapters[0], Chapter::default());
        assert_eq!(doc.chapters[1].id.as_deref(), Some("c2"));
    }

    #[test]
    fn numbers_accepted_as_text() {
        let doc = BookDocument::from_json(
            r#"{ "book": { "book_id": 7 }, "chapters": [ { "sections": [ { "section_id": 12, "keywords": ["a", 3, null] } ] } ] }"#,
        )
        .unwrap();
        assert_eq!(doc.book.id(), Some("7"));
        let section = &doc.chapters[0].sections[0];
        assert_eq!(section.id.as_deref(), Some("12"));
        assert_eq!(section.keywords, vec!["a", "3"]);
    }

    #[test]
    fn non_object_root_is_empty_document() {
        assert_eq!(BookDocument::from_json("[1, 2]").unwrap(), BookDocument::default());
        assert!(BookDocument::from_json("{ not json").is_err());
    }

    #[test]
    fn empty_header_fields_count_as_absent() {
        let doc = BookDocument::from_json(r#"{ "book": { "book_id": "", "title": "" } }"#).unwrap();
        assert_eq!(doc.book.id(), None);
        assert_eq!(doc.book.title(), None);
    }

    #[test]
    fn blank_video_id_is_ignored() {
        let doc = BookDocument::from_json(
            r#"{ "chapters": [ { "sections": [ { "summary_video": { "youtube_id": "" } } ] } ] }"#,
        )
        .unwrap();
        assert_eq!(doc.chapters[0].sections[0].video_id(), None);
    }

    #[test]
    fn sections_iterates_in_document_order() {
        let doc = BookDocument::from_json(
            r#"{ "chapters": [
                { "sections": [ {"section_id": "a"}, {"section_id": "b"} ] },
                { "sections": [ {"section_id": "c"} ] }
            ] }"#,
        )
        .unwrap();
        let ids: Vec<_> = doc
            .sections()
            .map(|(pos, _, s)| (pos.chapter_index, pos.section_index, s.id.clone().unwrap()))
            .collect();
        assert_eq!(
            ids,
            vec![(0, 0, "a".into()), (0, 1, "b".into()), (1, 0, "c".into())]
        );
        assert_eq!(doc.section_count(), 3);
    }

    #[test]
    fn serialises_with_wire_names() {
        let doc = BookDocument::from_json(SAMPLE).unwrap();
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["book"]["book_id"], "stats_py");
        assert_eq!(value["chapters"][0]["chapter_number"], 1);
        assert_eq!(value["chapters"][0]["sections"][0]["section_number"], "1.1");
    }
}
