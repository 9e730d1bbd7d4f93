//! Document handlers: the raw book endpoint, `GET /v1/book`, and
//! `POST /v1/reload`.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use leobook_api::BookInfo;

use super::AppState;
use crate::error::AppError;

/// `GET <endpoint path>`
///
/// Serves the document body exactly as it was read. Viewers always fetch a
/// fresh copy, so caching is disabled.
pub async fn document(State(state): State<AppState>) -> Response {
    let loaded = state.store.current().await;
    (
        [
            (header::CONTENT_TYPE, "application/json"),
            (header::CACHE_CONTROL, "no-store"),
        ],
        loaded.raw.clone(),
    )
        .into_response()
}

/// `GET /v1/book`
pub async fn info(State(state): State<AppState>) -> Json<BookInfo> {
    let loaded = state.store.current().await;
    Json(BookInfo::describe(
        &loaded.document,
        &state.config.endpoint_path,
    ))
}

/// `POST /v1/reload`
///
/// Re-reads the document from its source. On failure the previous document
/// keeps being served and the error is reported as `load_failed`.
pub async fn reload(State(state): State<AppState>) -> Result<Json<BookInfo>, AppError> {
    let loaded = state.store.reload().await?;
    Ok(Json(BookInfo::describe(
        &loaded.document,
        &state.config.endpoint_path,
    )))
}
