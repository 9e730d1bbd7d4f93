//! Shared helpers for the LEO live book conformance test suite.
//!
//! Provides [`spawn_server`] — a function that binds a `TcpListener` on an
//! ephemeral port, wires up an in-process server backed by a document store,
//! and returns the local URL so tests can drive it over real HTTP.

use std::sync::Arc;

use leobook_server::{build_router, DocumentStore, MemoryStore, ServerConfig};

/// The demo book shipped in `data/book-demo.json`.
pub const DEMO_BOOK: &str = include_str!("../../../data/book-demo.json");

/// Start an ephemeral in-process server over `store` and return its base URL.
///
/// The server runs in a background `tokio` task and is bound to an
/// OS-assigned port on `127.0.0.1`. The returned `String` is the base URL,
/// e.g. `http://127.0.0.1:51234`. Default config is used apart from the bind
/// address, so the raw document is served at `/webapp/data/book-demo.json`.
///
/// # Panics
///
/// Panics if the TCP listener cannot be bound or the server fails to start.
pub async fn spawn_server(store: Arc<dyn DocumentStore>) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("get local addr");

    let mut config = ServerConfig::from_lookup(|_| None).expect("default config");
    config.bind_addr = addr;
    let router = build_router(store, config);

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("conformance server error");
    });

    format!("http://{addr}")
}

/// Start a server over an in-memory copy of `json`.
///
/// Returns the base URL and the store, so tests can stage a body for
/// `POST /v1/reload`.
pub async fn spawn_with_book(json: &str) -> (String, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::from_json(json).expect("book fixture is JSON"));
    let base_url = spawn_server(Arc::clone(&store) as Arc<dyn DocumentStore>).await;
    (base_url, store)
}
