//! Assembles the Axum [`Router`] from all handler modules.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{
    config::ServerConfig,
    handlers::{book, graph, route, AppState},
    storage::DocumentStore,
};

/// Build the complete application router with shared state.
///
/// `config.endpoint_path` must not collide with the `/v1` routes;
/// [`ServerConfig::from_lookup`] refuses such paths.
pub fn build_router(store: Arc<dyn DocumentStore>, config: ServerConfig) -> Router {
    let endpoint = config.endpoint_path.clone();
    let state = AppState { store, config };

    Router::new()
        // Raw document, fetched by the viewer on startup
        .route(&endpoint, get(book::document))
        .route("/v1/book", get(book::info))
        .route("/v1/reload", post(book::reload))
        // Graph
        .route("/v1/graph", get(graph::graph))
        .route("/v1/graph/elements", get(graph::elements))
        // Navigation
        .route("/v1/route", get(route::route))
        .route("/v1/link/{section_id}", get(route::link))
        .route("/v1/read", get(route::read))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
