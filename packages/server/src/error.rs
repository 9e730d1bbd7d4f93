//! Application-level error type returned by handlers.
//!
//! All variants serialise to the [`ErrorResponse`] JSON body and map to the
//! appropriate HTTP status code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use leobook_api::{error::codes, ErrorResponse};

use crate::storage::StoreError;

/// An error that a handler can return; converts directly to an HTTP response.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    /// The document could not be (re)loaded. The previous one is still served.
    LoadFailed(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, codes::NOT_FOUND, msg),
            AppError::LoadFailed(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, codes::LOAD_FAILED, msg)
            }
        };
        let body = ErrorResponse::new(code, message);
        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::LoadFailed(e.to_string())
    }
}
