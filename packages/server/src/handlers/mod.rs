//! HTTP request handlers for the book server.
//!
//! Each submodule covers a logical group of endpoints. Handlers are pure
//! async functions that receive Axum extractors and return
//! `Result<impl IntoResponse, AppError>`. Every request works on one
//! [`LoadedDocument`](crate::storage::LoadedDocument) snapshot, so a
//! concurrent reload never changes the document halfway through a response.

pub mod book;
pub mod graph;
pub mod route;

use std::sync::Arc;

use crate::{config::ServerConfig, storage::DocumentStore};

/// Shared application state threaded through all Axum handlers via [`axum::extract::State`].
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub config: ServerConfig,
}
