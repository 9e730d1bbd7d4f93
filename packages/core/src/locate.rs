//! Reading positions and section lookup.

use serde::{Deserialize, Serialize};

use crate::types::{BookDocument, Chapter, Section};

/// A (chapter, section) index pair identifying the section being read.
///
/// Only meaningful relative to a document: it is valid when
/// `chapters[chapter_index].sections[section_index]` exists. The default
/// position `{0, 0}` is the fallback for every unresolvable route.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationPosition {
    pub chapter_index: usize,
    pub section_index: usize,
}

impl NavigationPosition {
    pub const fn new(chapter_index: usize, section_index: usize) -> Self {
        Self {
            chapter_index,
            section_index,
        }
    }

    /// Whether this position names an existing section of `doc`.
    pub fn is_valid_in(&self, doc: &BookDocument) -> bool {
        section_at(doc, *self).is_some()
    }
}

/// Find the position of the section whose id is `section_id`.
///
/// Scans chapters in order, then sections in order within each chapter, and
/// returns the first match. A document that repeats a section id therefore
/// always resolves to the earliest occurrence.
pub fn find_section_by_id(doc: &BookDocument, section_id: &str) -> Option<NavigationPosition> {
    doc.sections()
        .find(|(_, _, section)| section.id.as_deref() == Some(section_id))
        .map(|(position, _, _)| position)
}

/// Resolve a position to its chapter and section records.
pub fn section_at(doc: &BookDocument, position: NavigationPosition) -> Option<(&Chapter, &Section)> {
    let chapter = doc.chapters.get(position.chapter_index)?;
    let section = chapter.sections.get(position.section_index)?;
    Some((chapter, section))
}

// --- tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> BookDocument {
        BookDocument::from_json(
            r#"{
                "book": { "book_id": "b1" },
                "chapters": [
                    { "chapter_id": "c1", "sections": [ {"section_id": "s1"}, {"section_id": "dup"} ] },
                    { "chapter_id": "c2", "sections": [ {"section_id": "dup"}, {"section_id": "s4"} ] }
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn finds_sections_by_id() {
        let doc = doc();
        assert_eq!(find_section_by_id(&doc, "s1"), Some(NavigationPosition::new(0, 0)));
        assert_eq!(find_section_by_id(&doc, "s4"), Some(NavigationPosition::new(1, 1)));
        assert_eq!(find_section_by_id(&doc, "missing"), None);
    }

    #[test]
    fn duplicate_id_resolves_to_first_occurrence() {
        let doc = doc();
        for _ in 0..3 {
            assert_eq!(find_section_by_id(&doc, "dup"), Some(NavigationPosition::new(0, 1)));
        }
    }

    #[test]
    fn section_at_checks_bounds() {
        let doc = doc();
        let (chapter, section) = section_at(&doc, NavigationPosition::new(1, 0)).unwrap();
        assert_eq!(chapter.id.as_deref(), Some("c2"));
        assert_eq!(section.id.as_deref(), Some("dup"));
        assert!(section_at(&doc, NavigationPosition::new(0, 2)).is_none());
        assert!(section_at(&doc, NavigationPosition::new(2, 0)).is_none());
        assert!(!NavigationPosition::default().is_valid_in(&BookDocument::default()));
    }
}
