use std::collections::HashSet;

use thiserror::Error;

use crate::graph::build_graph;
use crate::types::BookDocument;

/// Errors returned when a [`BookDocument`] breaks one of its structural
/// invariants.
///
/// The builder and router tolerate all of these. Validation exists to catch
/// bad documents before they are published, not to gate rendering.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("book.book_id must not be empty")]
    MissingBookId,

    #[error("book.book_id must not contain `$` (it would break deep links), got {0:?}")]
    UnroutableBookId(String),

    #[error("chapter at index {0} has no chapter_id")]
    MissingChapterId(usize),

    #[error("section {section} of chapter {chapter} has no section_id")]
    MissingSectionId { chapter: usize, section: usize },

    #[error("section_id must not contain `$` (it would break deep links), got {0:?}")]
    UnroutableSectionId(String),

    #[error("id {0:?} is used more than once")]
    DuplicateId(String),

    #[error("graph node id {0:?} is produced more than once (check keywords)")]
    DuplicateNodeId(String),
}

/// Validate a [`BookDocument`] against its invariants.
///
/// Returns `Ok(())` if the document is well-formed, or the first
/// [`ValidationError`] found. Checks run in document order: header first,
/// then each chapter followed by its sections, then the derived graph ids.
pub fn validate_document(doc: &BookDocument) -> Result<(), ValidationError> {
    let book_id = doc.book.id().ok_or(ValidationError::MissingBookId)?;
    if book_id.contains('$') {
        return Err(ValidationError::UnroutableBookId(book_id.to_string()));
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for (c, chapter) in doc.chapters.iter().enumerate() {
        let chapter_id = chapter
            .id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or(ValidationError::MissingChapterId(c))?;
        if !seen.insert(chapter_id) {
            return Err(ValidationError::DuplicateId(chapter_id.to_string()));
        }

        for (s, section) in chapter.sections.iter().enumerate() {
            let section_id = section
                .id
                .as_deref()
                .filter(|id| !id.is_empty())
                .ok_or(ValidationError::MissingSectionId {
                    chapter: c,
                    section: s,
                })?;
            if section_id.contains('$') {
                return Err(ValidationError::UnroutableSectionId(section_id.to_string()));
            }
            if !seen.insert(section_id) {
                return Err(ValidationError::DuplicateId(section_id.to_string()));
            }
        }
    }

    // Keyword ids are derived, so collisions only show up in the graph.
    let graph = build_graph(doc);
    let mut node_ids: HashSet<&str> = HashSet::new();
    for node in &graph.nodes {
        if !node_ids.insert(&node.id) {
            return Err(ValidationError::DuplicateNodeId(node.id.clone()));
        }
    }

    Ok(())
}

// --- tests -------------------------------------------------------------------
