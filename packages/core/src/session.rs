//! Host-owned application state: the loaded document, the router, and the
//! sequencing of document loads against fragment changes.
//!
//! The fetch itself is the host's business (browser `fetch`, `reqwest`, a file
//! read). The session only sees it as a pair of calls:
//!
//! ```rust,ignore
//! let ticket = session.begin_load();
//! // ... await the response ...
//! match session.finish_load(ticket, result) {
//!     LoadOutcome::Loaded { graph } => presenter.present(&graph),
//!     LoadOutcome::Failed(err) => show_blocking_notice(&err),
//!     LoadOutcome::Stale => {}
//! }
//! ```
//!
//! # Ordering
//!
//! - Fragment changes that arrive while no document is loaded are recorded,
//!   and only the most recent one is resolved once the document arrives.
//! - Each `begin_load` supersedes the loads before it. A response for a
//!   superseded ticket is discarded on arrival.
//! - A failed load changes nothing: the previous document and position stay.

use std::sync::Arc;

use thiserror::Error;

use crate::graph::{build_graph, GraphModel};
use crate::locate::NavigationPosition;
use crate::router::{NavigationRouter, ReaderState};
use crate::types::BookDocument;

/// The document could not be obtained.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Transport-level failure reported by the host (network error, non-2xx
    /// status, unreadable file).
    #[error("failed to fetch book document: {0}")]
    Fetch(String),

    #[error("book document is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Identifies one load request. Later tickets compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadTicket(u64);

#[derive(Debug)]
pub enum LoadOutcome {
    /// The document was installed and routed. `graph` is ready for the presenter.
    Loaded { graph: GraphModel },
    /// A newer load was started after this one; the result was dropped.
    Stale,
    /// The load failed; nothing was rendered or replaced.
    Failed(LoadError),
}

#[derive(Debug, Default)]
pub struct Session {
    router: NavigationRouter,
    fragment: String,
    latest_ticket: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session with the location fragment present at startup.
    pub fn with_fragment(fragment: impl Into<String>) -> Self {
        Self {
            fragment: fragment.into(),
            ..Self::default()
        }
    }

    pub fn router(&self) -> &NavigationRouter {
        &self.router
    }

    /// Mutable access, for subscribing listeners.
    pub fn router_mut(&mut self) -> &mut NavigationRouter {
        &mut self.router
    }

    pub fn document(&self) -> Option<&Arc<BookDocument>> {
        self.router.document()
    }

    pub fn state(&self) -> Option<&Arc<ReaderState>> {
        self.router.state()
    }

    /// The last location fragment the host reported or the session wrote.
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// Record a location fragment change and route to it if a document is
    /// loaded. Before that, the fragment is just remembered (last write wins).
    pub fn fragment_changed(&mut self, fragment: impl Into<String>) -> Option<NavigationPosition> {
        self.fragment = fragment.into();
        if self.router.document().is_none() {
            tracing::debug!(fragment = %self.fragment, "document not loaded yet, deferring route");
            return None;
        }
        self.router.fragment_changed(&self.fragment)
    }

    /// Navigate in-app. Returns the fragment (without `#`) the host should
    /// write to the location.
    ///
    /// A move to a section that cannot be addressed (no section id, or no
    /// book id) clears the recorded fragment, so a reload starts from the
    /// first section instead of the position before the move.
    pub fn navigate(&mut self, position: NavigationPosition) -> Option<String> {
        let fragment = self.router.navigate(position);
        match &fragment {
            Some(fragment) => self.fragment = format!("#{fragment}"),
            None if self.router.position() == Some(position) => self.fragment.clear(),
            None => {}
        }
        fragment
    }

    /// Begin a load, superseding any load still in flight.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.latest_ticket += 1;
        LoadTicket(self.latest_ticket)
    }

    /// Complete the load identified by `ticket`.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<BookDocument, LoadError>,
    ) -> LoadOutcome {
        if ticket.0 < self.latest_ticket {
            tracing::debug!(ticket = ticket.0, latest = self.latest_ticket, "discarding stale load");
            return LoadOutcome::Stale;
        }

        let document = match result {
            Ok(document) => Arc::new(document),
            Err(error) => {
                tracing::error!(%error, "book document load failed");
                return LoadOutcome::Failed(error);
            }
        };

        let graph = build_graph(&document);
        let position = self.router.load(document, &self.fragment);
        tracing::info!(
            book = %graph.root_id,
            nodes = graph.len(),
            ?position,
            "book document loaded"
        );
        LoadOutcome::Loaded { graph }
    }

    /// [`finish_load`](Self::finish_load) for a raw JSON response body.
    pub fn finish_load_json(&mut self, ticket: LoadTicket, body: &str) -> LoadOutcome {
        let result = BookDocument::from_json(body).map_err(LoadError::from);
        self.finish_load(ticket, result)
    }
}

// --- tests -------------------------------------------------------------------
