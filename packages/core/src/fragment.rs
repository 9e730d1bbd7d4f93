//! URL-fragment codec for deep links into a book.
//!
//! The only addressable form is `#book$<book_id>$<section_id>`. Anything else
//! means "no specific position requested".
//!
//! Two layers are exposed:
//!
//! - [`parse_fragment`] / [`resolve_fragment`] return typed [`FragmentError`]s
//!   and never log;
//! - [`route_from_fragment`] is the total routing entry point. Every failure
//!   falls back to the default position, and malformed or unresolvable
//!   addresses are logged as warnings. [`route_with_reason`] does the same
//!   and also hands back the error that caused the fallback.

use thiserror::Error;

use crate::locate::{find_section_by_id, NavigationPosition};
use crate::types::BookDocument;

/// Every addressable fragment starts with this literal.
pub const FRAGMENT_PREFIX: &str = "#book$";

const SEPARATOR: char = '$';

/// The parts of a well-formed book fragment, borrowed from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FragmentRef<'a> {
    pub book_id: &'a str,
    pub section_id: &'a str,
}

/// Why a fragment did not resolve to a position.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FragmentError {
    /// Empty, or not prefixed with `#book$`. Not an error condition for the
    /// router; the fragment simply does not address anything.
    #[error("fragment does not address a book section")]
    NotAddressable,

    #[error("invalid fragment format: expected 3 `$`-separated parts, got {parts}")]
    Malformed { parts: usize },

    #[error("book id mismatch: fragment names {found:?}, loaded document is {expected:?}")]
    UnknownBook {
        expected: Option<String>,
        found: String,
    },

    #[error("section not found: {0:?}")]
    UnknownSection(String),
}

/// Split a fragment of the form `#book$<book_id>$<section_id>` into its parts.
pub fn parse_fragment(fragment: &str) -> Result<FragmentRef<'_>, FragmentError> {
    if !fragment.starts_with(FRAGMENT_PREFIX) {
        return Err(FragmentError::NotAddressable);
    }

    let parts: Vec<&str> = fragment[1..].split(SEPARATOR).collect();
    match parts[..] {
        [_, book_id, section_id] => Ok(FragmentRef {
            book_id,
            section_id,
        }),
        _ => Err(FragmentError::Malformed { parts: parts.len() }),
    }
}

/// Resolve a fragment against `doc`, reporting exactly why it failed.
///
/// The book id must match the loaded document: positions belonging to another
/// book are refused rather than guessed at.
pub fn resolve_fragment(
    fragment: &str,
    doc: &BookDocument,
) -> Result<NavigationPosition, FragmentError> {
    let FragmentRef {
        book_id,
        section_id,
    } = parse_fragment(fragment)?;

    if doc.book.id.as_deref() != Some(book_id) {
        return Err(FragmentError::UnknownBook {
            expected: doc.book.id.clone(),
            found: book_id.to_string(),
        });
    }

    find_section_by_id(doc, section_id)
        .ok_or_else(|| FragmentError::UnknownSection(section_id.to_string()))
}

/// Map a fragment to a reading position, falling back to `{0, 0}`.
///
/// A wrong book id and an unknown section id are treated the same way: both
/// are logged and both yield the default position.
pub fn route_from_fragment(fragment: &str, doc: &BookDocument) -> NavigationPosition {
    route_with_reason(fragment, doc).0
}

/// [`route_from_fragment`], plus the reason the fragment fell back.
///
/// The reason is `None` when the fragment resolved or did not address a
/// section at all.
pub fn route_with_reason(
    fragment: &str,
    doc: &BookDocument,
) -> (NavigationPosition, Option<FragmentError>) {
    match resolve_fragment(fragment, doc) {
        Ok(position) => (position, None),
        Err(FragmentError::NotAddressable) => (NavigationPosition::default(), None),
        Err(error) => {
            tracing::warn!(%fragment, %error, "unroutable fragment, showing first section");
            (NavigationPosition::default(), Some(error))
        }
    }
}

/// Encode a deep link to `section_id`, without the leading `#`.
///
/// Assigning the result to a location fragment yields a value that
/// [`route_from_fragment`] resolves back to the section.
pub fn position_to_fragment(book_id: &str, section_id: &str) -> String {
    format!("book{SEPARATOR}{book_id}{SEPARATOR}{section_id}")
}

/// Deep link to `section_id` within `doc`, or `None` if the document has no
/// book id. Without one, no fragment could resolve back to the section.
pub fn section_fragment(doc: &BookDocument, section_id: &str) -> Option<String> {
    let book_id = doc.book.id.as_deref()?;
    Some(position_to_fragment(book_id, section_id))
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
                    { "chapter_id": "c1", "sections": [ {"section_id": "sec-1"}, {"section_id": "sec-3"} ] },
                    { "chapter_id": "c2", "sections": [ {"section_id": "sec-7"}, {"section_id": "sec-1"} ] }
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn routes_to_located_section() {
        assert_eq!(
            route_from_fragment("#book$b1$sec-3", &doc()),
            NavigationPosition::new(0, 1)
        );
        assert_eq!(
            route_from_fragment("#book$b1$sec-7", &doc()),
            NavigationPosition::new(1, 0)
        );
    }

    #[test]
    fn unroutable_fragments_fall_back_to_default() {
        let doc = doc();
        for fragment in [
            "",
            "#",
            "#random",
            "#book",
            "book$b1$sec-3",
            "#book$wrong$sec-3",
            "#book$b1$nope",
            "#book$b1",
            "#book$b1$sec-3$extra",
        ] {
            assert_eq!(
                route_from_fragment(fragment, &doc),
                NavigationPosition::default(),
                "{fragment:?}"
            );
        }
    }

    #[test]
    fn typed_errors_distinguish_failures() {
        let doc = doc();
        assert_eq!(resolve_fragment("#random", &doc), Err(FragmentError::NotAddressable));
        assert_eq!(
            resolve_fragment("#book$b1", &doc),
            Err(FragmentError::Malformed { parts: 2 })
        );
        assert_eq!(
            resolve_fragment("#book$b1$a$b", &doc),
            Err(FragmentError::Malformed { parts: 4 })
        );
        assert_eq!(
            resolve_fragment("#book$b2$sec-3", &doc),
            Err(FragmentError::UnknownBook {
                expected: Some("b1".into()),
                found: "b2".into()
            })
        );
        assert_eq!(
            resolve_fragment("#book$b1$sec-9", &doc),
            Err(FragmentError::UnknownSection("sec-9".into()))
        );
    }

    #[test]
    fn document_without_book_id_refuses_every_address() {
        let doc = BookDocument::from_json(
            r#"{ "chapters": [ { "sections": [ {"section_id": "s"} ] } ] }"#,
        )
        .unwrap();
        assert!(matches!(
            resolve_fragment("#book$book-root$s", &doc),
            Err(FragmentError::UnknownBook { expected: None, .. })
        ));
    }

    #[test]
    fn fallback_reason_is_reported_once() {
        let doc = doc();
        assert_eq!(
            route_with_reason("#book$b1$sec-7", &doc),
            (NavigationPosition::new(1, 0), None)
        );
        assert_eq!(
            route_with_reason("#random", &doc),
            (NavigationPosition::default(), None)
        );
        assert_eq!(
            route_with_reason("#book$b1$sec-9", &doc),
            (
                NavigationPosition::default(),
                Some(FragmentError::UnknownSection("sec-9".into()))
            )
        );
    }

    #[test]
    fn section_fragment_needs_a_book_id() {
        assert_eq!(section_fragment(&doc(), "sec-3").as_deref(), Some("book$b1$sec-3"));

        let anonymous = BookDocument::from_json(
            r#"{ "chapters": [ { "sections": [ {"section_id": "s"} ] } ] }"#,
        )
        .unwrap();
        assert_eq!(section_fragment(&anonymous, "s"), None);
    }

    #[test]
    fn parse_borrows_parts() {
        let parsed = parse_fragment("#book$b1$sec-3").unwrap();
        assert_eq!(parsed.book_id, "b1");
        assert_eq!(parsed.section_id, "sec-3");
        // Empty parts are still three parts.
        let parsed = parse_fragment("#book$$").unwrap();
        assert_eq!(parsed.book_id, "");
        assert_eq!(parsed.section_id, "");
    }

    #[test]
    fn encodes_without_hash() {
        assert_eq!(position_to_fragment("b1", "sec-3"), "book$b1$sec-3");
    }

    #[test]
    fn every_section_round_trips() {
        let doc = doc();
        for (_, _, section) in doc.sections() {
            let sid = section.id.as_deref().unwrap();
            let fragment = format!("#{}", position_to_fragment("b1", sid));
            assert_eq!(
                Some(route_from_fragment(&fragment, &doc)),
                find_section_by_id(&doc, sid)
            );
        }
    }
}
