//! Book summary type — `GET /v1/book`.

use serde::{Deserialize, Serialize};

use leobook::{render::book_title, BookDocument};

/// A short description of the loaded document.
///
/// # Example
///
/// ```json
/// {
///   "book_id": "stats_py_malato_2025",
///   "title": "Statistics with Python",
///   "chapters": 4,
///   "sections": 37,
///   "endpoint": "/webapp/data/book-demo.json"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookInfo {
    /// Absent when the document carries no `book_id`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book_id: Option<String>,

    /// Display title (falls back to the default viewer title).
    pub title: String,

    pub chapters: usize,

    pub sections: usize,

    /// Path the raw document is served from.
    pub endpoint: String,
}

impl BookInfo {
    pub fn describe(doc: &BookDocument, endpoint: impl Into<String>) -> Self {
        Self {
            book_id: doc.book.id().map(str::to_string),
            title: book_title(doc).to_string(),
            chapters: doc.chapters.len(),
            sections: doc.section_count(),
            endpoint: endpoint.into(),
        }
    }
}
