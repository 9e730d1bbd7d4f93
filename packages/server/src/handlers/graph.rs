//! Graph handlers — `GET /v1/graph` and `GET /v1/graph/elements`.

use axum::{extract::State, Json};
use leobook::GraphModel;
use serde_json::Value;

use super::AppState;

/// `GET /v1/graph`
///
/// The node/edge model derived from the current document. It is built once
/// per load, not per request.
pub async fn graph(State(state): State<AppState>) -> Json<GraphModel> {
    Json(state.store.current().await.graph.clone())
}

/// `GET /v1/graph/elements`
///
/// The same graph as a Cytoscape element array, ready to hand to the
/// renderer.
pub async fn elements(State(state): State<AppState>) -> Json<Vec<Value>> {
    Json(state.store.current().await.graph.elements())
}
