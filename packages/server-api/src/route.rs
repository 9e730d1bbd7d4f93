//! Routing and reading types — `GET /v1/route`, `GET /v1/link/{section_id}`,
//! and `GET /v1/read`.

use serde::{Deserialize, Serialize};

use leobook::{route_with_reason, section_at, section_fragment, BookDocument, NavigationPosition};

/// Query parameters for `GET /v1/route` and `GET /v1/read`.
///
/// `fragment` is the location fragment including its leading `#`, and must be
/// percent-encoded in the query string (`#` → `%23`, `$` → `%24`). Absent
/// means "no position requested".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RouteQuery {
    #[serde(default)]
    pub fragment: Option<String>,
}

impl RouteQuery {
    pub fn fragment(&self) -> &str {
        self.fragment.as_deref().unwrap_or_default()
    }
}

/// Response body for `GET /v1/route`.
///
/// Routing never fails: an unroutable fragment resolves to the first section
/// and `fallback` says why.
///
/// ```json
/// {
///   "chapter_index": 0,
///   "section_index": 1,
///   "section_id": "sec-3",
///   "fragment": "book$b1$sec-3"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RouteResponse {
    pub chapter_index: usize,
    pub section_index: usize,

    /// Id of the section at the resolved position. Absent if the document
    /// has no sections or the section has no id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_id: Option<String>,

    /// Canonical fragment (no leading `#`) for the resolved section.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fragment: Option<String>,

    /// Why the default position was used instead of the requested one.
    /// Absent when the fragment resolved, or when none was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,
}

impl RouteResponse {
    pub fn resolve(doc: &BookDocument, fragment: &str) -> Self {
        let (position, reason) = route_with_reason(fragment, doc);
        let section_id = section_at(doc, position).and_then(|(_, s)| s.id.clone());
        let fragment = section_id
            .as_deref()
            .and_then(|sid| section_fragment(doc, sid));
        Self {
            chapter_index: position.chapter_index,
            section_index: position.section_index,
            section_id,
            fragment,
            fallback: reason.map(|e| e.to_string()),
        }
    }

    pub fn position(&self) -> NavigationPosition {
        NavigationPosition::new(self.chapter_index, self.section_index)
    }
}

/// Response body for `GET /v1/link/{section_id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LinkResponse {
    pub section_id: String,
    pub chapter_index: usize,
    pub section_index: usize,
    /// Fragment to assign to the location (no leading `#`).
    pub fragment: String,
}

/// Response body for `GET /v1/read`: the rendered reading view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReadResponse {
    pub chapter_index: usize,
    pub section_index: usize,
    pub page_title: String,
    pub breadcrumb: String,
    /// Plain-text section body.
    pub text: String,
}
