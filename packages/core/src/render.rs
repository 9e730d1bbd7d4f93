//! Plain-text rendering of the reading view and the graph.
//!
//! These functions are the text counterpart of the page templates: book
//! title, breadcrumb, table of contents with the active entry, and the
//! section body. The output is stable plain text suitable for terminals,
//! logs, or server responses. It is not a canonical format.

use crate::graph::{GraphModel, NodeKind};
use crate::locate::NavigationPosition;
use crate::router::ReaderState;
use crate::types::{BookDocument, Chapter, Section};

/// Title shown when the document does not carry one.
pub const DEFAULT_BOOK_TITLE: &str = "LEO LIVE BOOK";

const PAGE_TITLE_SUFFIX: &str = " | AI Learning";

const YOUTUBE_EMBED: &str = "https://www.youtube.com/embed/";

pub fn book_title(doc: &BookDocument) -> &str {
    doc.book.title().unwrap_or(DEFAULT_BOOK_TITLE)
}

/// The browser tab title: `<book title> | AI Learning`.
pub fn page_title(doc: &BookDocument) -> String {
    format!("{}{}", book_title(doc), PAGE_TITLE_SUFFIX)
}

/// Embed URL for a section's summary video.
pub fn video_embed_url(section: &Section) -> Option<String> {
    section.video_id().map(|id| format!("{YOUTUBE_EMBED}{id}"))
}

/// `<chapter title> › <section number> <section title>`
pub fn render_breadcrumb(chapter: &Chapter, section: &Section) -> String {
    format!(
        "{} › {}",
        chapter.title.as_deref().unwrap_or_default(),
        section_heading(section)
    )
}

/// The sidebar: chapters with their sections indented beneath, the current
/// section marked with `▸`.
///
/// ```text
/// 1. Foundations
///   ▸ 1.1 Perceptrons
///     1.2 Backprop
/// 2. Practice
///     2.1 Training
/// ```
pub fn render_toc(doc: &BookDocument, current: Option<NavigationPosition>) -> String {
    let mut out = String::new();
    for (c, chapter) in doc.chapters.iter().enumerate() {
        out.push_str(&format!(
            "{}. {}\n",
            chapter
                .number
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            chapter.title.as_deref().unwrap_or_default()
        ));
        for (s, section) in chapter.sections.iter().enumerate() {
            let marker = if current == Some(NavigationPosition::new(c, s)) {
                "▸"
            } else {
                " "
            };
            out.push_str(&format!("  {} {}\n", marker, section_heading(section)));
        }
    }
    out
}

/// The reader card for one section.
///
/// ```text
/// Perceptrons
/// ===========
///
/// A single artificial neuron.
///
/// Video: https://www.youtube.com/embed/abc123
///
/// The perceptron computes a weighted sum of its inputs and ...
///
/// Keywords: Neural Nets, Weights
/// ```
pub fn render_section(section: &Section) -> String {
    let title = section.title.as_deref().unwrap_or_default();
    let mut out = format!("{}\n{}\n", title, "=".repeat(title.chars().count()));

    if let Some(summary) = section.summary.as_deref().filter(|s| !s.is_empty()) {
        out.push('\n');
        out.push_str(&wrap(summary, 80));
        out.push('\n');
    }

    if let Some(url) = video_embed_url(section) {
        out.push('\n');
        out.push_str(&format!("Video: {}\n", url));
    }

    for paragraph in &section.content {
        out.push('\n');
        out.push_str(&wrap(paragraph, 80));
        out.push('\n');
    }

    if !section.keywords.is_empty() {
        out.push('\n');
        out.push_str(&format!("Keywords: {}\n", section.keywords.join(", ")));
    }

    out
}

/// Breadcrumb followed by the section body for the current position.
pub fn render_reader(state: &ReaderState) -> String {
    format!(
        "{}\n\n{}",
        render_breadcrumb(state.chapter(), state.section()),
        render_section(state.section())
    )
}

/// Summarise a [`GraphModel`] grouped by node kind.
///
/// ```text
/// Book graph  9 nodes, 8 edges
/// ────────────────────────────
///
/// BOOK (1)
///   b1  "Deep Learning"
///
/// CHAPTERS (2)
///   c1  "Chapter 1 / Foundations"
/// ```
pub fn render_graph(graph: &GraphModel) -> String {
    let total = graph.len();
    let edges = graph.edge_count();
    let header = format!(
        "Book graph  {} node{}, {} edge{}",
        total,
        if total == 1 { "" } else { "s" },
        edges,
        if edges == 1 { "" } else { "s" }
    );
    let rule = "─".repeat(header.chars().count());

    let mut out = format!("{}\n{}\n", header, rule);

    let groups = [
        (NodeKind::Book, "BOOK"),
        (NodeKind::Chapter, "CHAPTERS"),
        (NodeKind::Section, "SECTIONS"),
        (NodeKind::Keyword, "KEYWORDS"),
    ];

    for (kind, label) in groups {
        let nodes = graph.by_kind(kind);
        if nodes.is_empty() {
            continue;
        }
        out.push('\n');
        out.push_str(&format!("{} ({})\n", label, nodes.len()));
        for n in nodes {
            // Multi-line labels are flattened onto one line.
            let label = n.label.replace('\n', " / ");
            out.push_str(&format!("  {}  \"{}\"\n", n.id, truncate(&label, 72)));
        }
    }

    out
}

// --- helpers -----------------------------------------------------------------

fn section_heading(section: &Section) -> String {
    let number = section
        .number
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_default();
    let title = section.title.as_deref().unwrap_or_default();
    match (number.is_empty(), title.is_empty()) {
        (true, _) => title.to_string(),
        (false, true) => number,
        (false, false) => format!("{} {}", number, title),
    }
}

fn wrap(text: &str, width: usize) -> String {
    let mut result = String::new();
    let mut line_len = 0usize;
    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if line_len > 0 && line_len + word_len + 1 > width {
            result.push('\n');
            line_len = 0;
        } else if line_len > 0 {
            result.push(' ');
            line_len += 1;
        }
        result.push_str(word);
        line_len += word_len;
    }
    result
}

fn truncate(s: &str, max: usize) -> String {
    let s = s.trim();
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max - 1).collect();
        format!("{}…", kept)
    }
}

// --- tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::build_graph;
    use std::sync::Arc;

    fn doc() -> BookDocument {
        BookDocument::from_json(
            r#"{
                "book": { "book_id": "b1", "title": "Deep Learning" },
                "chapters": [
                    {
                        "chapter_id": "c1", "chapter_number": 1, "chapter_title": "Foundations",
                        "sections": [
                            { "section_id": "s1", "section_number": "1.1", "section_title": "Perceptrons",
                              "summary": "A single artificial neuron.",
                              "keywords": ["Neural Nets", "Weights"],
                              "content": ["The perceptron computes a weighted sum.", "Then it thresholds."],
                              "summary_video": { "youtube_id": "abc123" } },
                            { "section_id": "s2", "section_number": "1.2", "section_title": "Backprop" }
                        ]
                    }
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn titles() {
        let d = doc();
        assert_eq!(book_title(&d), "Deep Learning");
        assert_eq!(page_title(&d), "Deep Learning | AI Learning");
        assert_eq!(book_title(&BookDocument::default()), "LEO LIVE BOOK");
        assert_eq!(page_title(&BookDocument::default()), "LEO LIVE BOOK | AI Learning");
    }

    #[test]
    fn breadcrumb() {
        let d = doc();
        let chapter = &d.chapters[0];
        assert_eq!(
            render_breadcrumb(chapter, &chapter.sections[1]),
            "Foundations › 1.2 Backprop"
        );
    }

    #[test]
    fn toc_marks_current_section() {
        let toc = render_toc(&doc(), Some(NavigationPosition::new(0, 1)));
        assert_eq!(toc, "1. Foundations\n    1.1 Perceptrons\n  ▸ 1.2 Backprop\n");
    }

    #[test]
    fn section_includes_all_parts() {
        let d = doc();
        let rendered = render_section(&d.chapters[0].sections[0]);
        assert!(rendered.starts_with("Perceptrons\n===========\n"));
        assert!(rendered.contains("A single artificial neuron."));
        assert!(rendered.contains("Video: https://www.youtube.com/embed/abc123"));
        assert!(rendered.contains("\nThe perceptron computes a weighted sum.\n"));
        assert!(rendered.contains("Keywords: Neural Nets, Weights"));
    }

    #[test]
    fn bare_section_omits_optional_parts() {
        let d = doc();
        let rendered = render_section(&d.chapters[0].sections[1]);
        assert_eq!(rendered, "Backprop\n========\n");
    }

    #[test]
    fn reader_prefixes_breadcrumb() {
        let state = ReaderState::new(Arc::new(doc()), NavigationPosition::new(0, 0)).unwrap();
        let rendered = render_reader(&state);
        assert!(rendered.starts_with("Foundations › 1.1 Perceptrons\n\nPerceptrons\n"));
    }

    #[test]
    fn long_paragraphs_wrap() {
        let text = "word ".repeat(40);
        let wrapped = wrap(&text, 80);
        assert!(wrapped.lines().count() > 1);
        assert!(wrapped.lines().all(|l| l.chars().count() <= 80));
    }

    #[test]
    fn graph_summary_groups_by_kind() {
        let rendered = render_graph(&build_graph(&doc()));
        assert!(rendered.starts_with("Book graph  6 nodes, 5 edges\n"));
        assert!(rendered.contains("CHAPTERS (1)"));
        assert!(rendered.contains("c1  \"Chapter 1 / Foundations\""));
        assert!(rendered.contains("KEYWORDS (2)"));
    }
}
