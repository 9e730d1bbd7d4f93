//! Navigation handlers — `GET /v1/route`, `GET /v1/link/{section_id}`, and
//! `GET /v1/read`.
//!
//! The fragment travels in the `fragment` query parameter because browsers
//! never send the real URL fragment to the server.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use leobook::{
    find_section_by_id,
    render::{page_title, render_breadcrumb, render_section},
    section_at, section_fragment,
};
use leobook_api::{LinkResponse, ReadResponse, RouteQuery, RouteResponse};

use super::AppState;
use crate::error::AppError;

/// `GET /v1/route?fragment=<fragment>`
///
/// Always succeeds. Unroutable fragments fall back to the first section and
/// the response says why.
pub async fn route(
    State(state): State<AppState>,
    Query(query): Query<RouteQuery>,
) -> Json<RouteResponse> {
    let loaded = state.store.current().await;
    Json(RouteResponse::resolve(&loaded.document, query.fragment()))
}

/// `GET /v1/link/{section_id}`
///
/// The fragment an in-app navigation to `section_id` assigns to the location.
/// 404 if the section is unknown, or if the book has no id to address it by.
pub async fn link(
    State(state): State<AppState>,
    Path(section_id): Path<String>,
) -> Result<Json<LinkResponse>, AppError> {
    let loaded = state.store.current().await;
    let doc = &loaded.document;
    let position = find_section_by_id(doc, &section_id)
        .ok_or_else(|| AppError::NotFound(format!("section not found: {section_id:?}")))?;
    let fragment = section_fragment(doc, &section_id).ok_or_else(|| {
        AppError::NotFound("book has no book_id; its sections cannot be linked".into())
    })?;
    Ok(Json(LinkResponse {
        section_id,
        chapter_index: position.chapter_index,
        section_index: position.section_index,
        fragment,
    }))
}

/// `GET /v1/read?fragment=<fragment>`
///
/// The reading view for the section the fragment routes to.
pub async fn read(
    State(state): State<AppState>,
    Query(query): Query<RouteQuery>,
) -> Result<Json<ReadResponse>, AppError> {
    let loaded = state.store.current().await;
    let doc = &loaded.document;
    let position = RouteResponse::resolve(doc, query.fragment()).position();
    let (chapter, section) = section_at(doc, position)
        .ok_or_else(|| AppError::NotFound("document has no sections".into()))?;
    Ok(Json(ReadResponse {
        chapter_index: position.chapter_index,
        section_index: position.section_index,
        page_title: page_title(doc),
        breadcrumb: render_breadcrumb(chapter, section),
        text: render_section(section),
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;

    use super::super::testing::{body_json, build_app, build_app_with, get};
    use crate::storage::memory::MemoryStore;

    #[tokio::test]
    async fn route_resolves_encoded_fragment() {
        let resp = get(build_app(), "/v1/route?fragment=%23book%24b1%24sec-3").await;
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["chapter_index"], 0);
        assert_eq!(json["section_index"], 1);
        assert_eq!(json["section_id"], "sec-3");
        assert_eq!(json["fragment"], "book$b1$sec-3");
        assert!(json.get("fallback").is_none());
    }

    #[tokio::test]
    async fn route_falls_back_on_wrong_book() {
        let json = body_json(get(build_app(), "/v1/route?fragment=%23book%24other%24s4").await).await;
        assert_eq!(json["chapter_index"], 0);
        assert_eq!(json["section_index"], 0);
        assert_eq!(json["section_id"], "s1");
        assert!(json["fallback"].is_string());
    }

    #[tokio::test]
    async fn route_without_fragment_is_first_section() {
        let json = body_json(get(build_app(), "/v1/route").await).await;
        assert_eq!(json["section_id"], "s1");
        assert!(json.get("fallback").is_none());
    }

    #[tokio::test]
    async fn link_builds_fragment() {
        let resp = get(build_app(), "/v1/link/s4").await;
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["fragment"], "book$b1$s4");
        assert_eq!(json["chapter_index"], 1);
        assert_eq!(json["section_index"], 0);
    }

    #[tokio::test]
    async fn link_unknown_section_returns_404() {
        let resp = get(build_app(), "/v1/link/nope").await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(resp).await["code"], "not_found");
    }

    #[tokio::test]
    async fn link_without_book_id_returns_404() {
        let store = Arc::new(
            MemoryStore::from_json(r#"{ "chapters": [ { "sections": [ {"section_id": "s1"} ] } ] }"#)
                .unwrap(),
        );
        let resp = get(build_app_with(store), "/v1/link/s1").await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let json = body_json(resp).await;
        assert_eq!(json["code"], "not_found");
        assert!(json["error"].as_str().unwrap().contains("book_id"));
    }

    #[tokio::test]
    async fn read_renders_section() {
        let json = body_json(get(build_app(), "/v1/read?fragment=%23book%24b1%24sec-3").await).await;
        assert_eq!(json["page_title"], "Deep Learning | AI Learning");
        assert_eq!(json["breadcrumb"], "Foundations › 1.2 Backprop");
        assert!(json["text"].as_str().unwrap().contains("Chain rule"));
    }

    #[tokio::test]
    async fn read_empty_document_returns_404() {
        let store = Arc::new(MemoryStore::from_json(r#"{ "book": { "book_id": "b1" } }"#).unwrap());
        let resp = get(build_app_with(store), "/v1/read").await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
