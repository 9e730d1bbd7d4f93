//! Core of the LEO live book viewer.
//!
//! A book is a nested JSON document (book → chapters → sections → keywords)
//! shown two ways: as a node-link knowledge graph and as a paginated reading
//! view addressed by the URL fragment. This crate holds all of the logic
//! behind both. It has no I/O and compiles to native or WASM. The
//! `leobook-server`, `leobook` CLI, and `leobook-wasm` crates are thin
//! surfaces over it.
//!
//! # Crate layout
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`types`] | Lenient document model: [`BookDocument`], [`Chapter`], [`Section`] |
//! | [`graph`] | [`build_graph`]: document → [`GraphModel`] tree |
//! | [`locate`] | [`NavigationPosition`] and [`find_section_by_id`] |
//! | [`fragment`] | `#book$<book>$<section>` codec: [`route_from_fragment`], [`position_to_fragment`] |
//! | [`router`] | [`NavigationRouter`] state machine and [`ReaderState`] snapshots |
//! | [`session`] | [`Session`]: load sequencing around the router |
//! | [`presenter`] | [`Presenter`] lifetime scoping over a [`GraphSurface`], zoom rules |
//! | [`render`] | Plain-text reading view and graph summary |
//! | [`validation`] | Document invariant checks via [`validate_document`] |
//!
//! # Quick start
//!
//! ```rust,ignore
//! use leobook::{build_graph, route_from_fragment, BookDocument};
//!
//! let doc = BookDocument::from_json(&body)?;
//! let graph = build_graph(&doc);
//! let position = route_from_fragment("#book$stats_py$sec-3", &doc);
//! ```

pub mod fragment;
pub mod graph;
pub mod locate;
pub mod presenter;
pub mod render;
pub mod router;
pub mod session;
pub mod types;
pub mod validation;

pub use fragment::{
    parse_fragment, position_to_fragment, resolve_fragment, route_from_fragment,
    route_with_reason, section_fragment, FragmentError, FragmentRef,
};
pub use graph::{build_graph, keyword_node_id, normalize_keyword, GraphEdge, GraphModel, GraphNode, NodeKind};
pub use locate::{find_section_by_id, section_at, NavigationPosition};
pub use presenter::{GraphSurface, LayoutOptions, Presenter, Viewport};
pub use router::{NavigationRouter, PositionChangeCause, ReaderState, SubscriptionId};
pub use session::{LoadError, LoadOutcome, LoadTicket, Session};
pub use types::{BookDocument, BookMeta, Chapter, Ordinal, Section, SummaryVideo};
pub use validation::{validate_document, ValidationError};
