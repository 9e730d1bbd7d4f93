//! Knowledge-graph model derived from a [`BookDocument`].
//!
//! [`build_graph`] flattens the book hierarchy into a tree of
//! [`GraphNode`]s and [`GraphEdge`]s rooted at the book node:
//!
//! ```text
//! book ─┬─ chapter ─┬─ section ─┬─ keyword
//!       │           │           └─ keyword
//!       │           └─ section
//!       └─ chapter
//! ```
//!
//! The builder is pure and total. Node and edge order follow document order,
//! so identical input always yields an identical model.

use std::collections::{HashSet, VecDeque};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::types::BookDocument;

/// Root id used when the document carries no `book_id`.
pub const ROOT_SENTINEL: &str = "book-root";

/// Root label used when the document carries no title.
pub const TITLE_PLACEHOLDER: &str = "Book";

/// The level of the book hierarchy a node stands for.
///
/// Serialises as a lowercase string. The styling layer selects on these
/// values, so they are part of the rendering contract.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Book,
    Chapter,
    Section,
    Keyword,
}

impl NodeKind {
    pub const ALL: [NodeKind; 4] = [
        NodeKind::Book,
        NodeKind::Chapter,
        NodeKind::Section,
        NodeKind::Keyword,
    ];
}

/// Formats the kind as its lowercase wire-format string (e.g. `"keyword"`).
impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeKind::Book => write!(f, "book"),
            NodeKind::Chapter => write!(f, "chapter"),
            NodeKind::Section => write!(f, "section"),
            NodeKind::Keyword => write!(f, "keyword"),
        }
    }
}

/// Parses a [`NodeKind`] from its lowercase wire-format string.
impl std::str::FromStr for NodeKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "book" => Ok(NodeKind::Book),
            "chapter" => Ok(NodeKind::Chapter),
            "section" => Ok(NodeKind::Section),
            "keyword" => Ok(NodeKind::Keyword),
            _ => Err(format!(
                "unknown node kind {:?}; expected one of: book, chapter, section, keyword",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub kind: NodeKind,
}

/// A parent → child link.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
}

/// The flattened node/edge representation of a book.
///
/// Serialises as `{ "nodes": [...], "edges": [...], "rootId": "..." }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GraphModel {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    pub root_id: String,
}

impl GraphModel {
    /// Total number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Retrieve a node by id.
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// The root book node.
    pub fn root(&self) -> Option<&GraphNode> {
        self.node(&self.root_id)
    }

    /// All nodes of a given kind, in document order.
    pub fn by_kind(&self, kind: NodeKind) -> Vec<&GraphNode> {
        self.nodes.iter().filter(|n| n.kind == kind).collect()
    }

    /// The direct children of `id`, in document order.
    pub fn children(&self, id: &str) -> Vec<&GraphNode> {
        self.edges
            .iter()
            .filter(|e| e.source == id)
            .filter_map(|e| self.node(&e.target))
            .collect()
    }

    /// The parent of `id`. `None` for the root and for unknown ids.
    pub fn parent(&self, id: &str) -> Option<&GraphNode> {
        self.edges
            .iter()
            .find(|e| e.target == id)
            .and_then(|e| self.node(&e.source))
    }

    /// Everything below `id`, breadth first, excluding `id` itself.
    pub fn descendants(&self, id: &str) -> Vec<&GraphNode> {
        let mut visited: HashSet<&str> = HashSet::new();
        let mut queue: VecDeque<&str> = VecDeque::new();
        let mut result: Vec<&GraphNode> = Vec::new();

        visited.insert(id);
        queue.push_back(id);
        while let Some(current) = queue.pop_front() {
            for child in self.children(current) {
                if visited.insert(child.id.as_str()) {
                    queue.push_back(&child.id);
                    result.push(child);
                }
            }
        }

        result
    }

    /// The element array handed to Cytoscape: every node, then every edge,
    /// each wrapped as `{ "data": {...} }`.
    ///
    /// The node kind is emitted under the key `type`, which is what the
    /// stylesheet selectors (`node[type="chapter"]`) match on.
    pub fn elements(&self) -> Vec<Value> {
        let nodes = self.nodes.iter().map(|n| {
            json!({ "data": { "id": n.id, "label": n.label, "type": n.kind } })
        });
        let edges = self
            .edges
            .iter()
            .map(|e| json!({ "data": { "source": e.source, "target": e.target } }));
        nodes.chain(edges).collect()
    }
}

/// Lower-case `keyword` and collapse each run of whitespace into one hyphen.
///
/// ```text
/// "Neural  Nets"   → "neural-nets"
/// " Deep Learning" → "-deep-learning"
/// ```
pub fn normalize_keyword(keyword: &str) -> String {
    WHITESPACE_RE
        .replace_all(&keyword.to_lowercase(), "-")
        .into_owned()
}

/// The node id of `keyword` under the section `section_id`.
///
/// Keyword nodes are namespaced by their section: the same keyword in two
/// sections yields two distinct nodes.
pub fn keyword_node_id(section_id: &str, keyword: &str) -> String {
    format!("{}-{}", section_id, normalize_keyword(keyword))
}

/// Build the graph model for `doc`.
pub fn build_graph(doc: &BookDocument) -> GraphModel {
    let root_id = doc.book.id().unwrap_or(ROOT_SENTINEL).to_string();
    let mut graph = GraphModel {
        nodes: Vec::new(),
        edges: Vec::new(),
        root_id: root_id.clone(),
    };

    graph.push_node(
        root_id.clone(),
        doc.book.title().unwrap_or(TITLE_PLACEHOLDER).to_string(),
        NodeKind::Book,
    );

    for (c, chapter) in doc.chapters.iter().enumerate() {
        let chapter_id = chapter
            .id
            .clone()
            .unwrap_or_else(|| format!("{}-chapter-{}", root_id, c));
        graph.push_node(
            chapter_id.clone(),
            format!(
                "Chapter {}\n{}",
                display_or_empty(&chapter.number),
                chapter.title.as_deref().unwrap_or_default()
            ),
            NodeKind::Chapter,
        );
        graph.push_edge(&root_id, &chapter_id);

        for (s, section) in chapter.sections.iter().enumerate() {
            let section_id = section
                .id
                .clone()
                .unwrap_or_else(|| format!("{}-section-{}", chapter_id, s));
            graph.push_node(
                section_id.clone(),
                format!(
                    "{}\n{}",
                    display_or_empty(&section.number),
                    section.title.as_deref().unwrap_or_default()
                ),
                NodeKind::Section,
            );
            graph.push_edge(&chapter_id, &section_id);

            for keyword in &section.keywords {
                let keyword_id = keyword_node_id(&section_id, keyword);
                graph.push_node(keyword_id.clone(), keyword.clone(), NodeKind::Keyword);
                graph.push_edge(&section_id, &keyword_id);
            }
        }
    }

    tracing::debug!(
        root = %graph.root_id,
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        "built book graph"
    );
    graph
}

impl GraphModel {
    fn push_node(&mut self, id: String, label: String, kind: NodeKind) {
        self.nodes.push(GraphNode { id, label, kind });
    }

    fn push_edge(&mut self, source: &str, target: &str) {
        self.edges.push(GraphEdge {
            source: source.to_string(),
            target: target.to_string(),
        });
    }
}

fn display_or_empty<T: std::fmt::Display>(value: &Option<T>) -> String {
    value.as_ref().map(ToString::to_string).unwrap_or_default()
}

/// `\s+`
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("invalid whitespace regex"));

// --- tests -------------------------------------------------------------------
