//! `leobook-server`: serves a LEO live book document and the graph and
//! routes derived from it.
//!
//! # Quick start
//!
//! ```sh
//! # Serve data/book-demo.json on the default port:
//! leobook-server
//!
//! # Custom document and bind address:
//! LEOBOOK_DOCUMENT=./book.json LEOBOOK_BIND=127.0.0.1:8080 leobook-server
//! ```
//!
//! # Environment variables
//!
//! See [`ServerConfig::from_env`] for the full list.

use std::sync::Arc;

use leobook_server::{build_router, DocumentStore, FileStore, ServerConfig};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "leobook_server=info,leobook=info,tower_http=debug".into()
            }),
        )
        .init();

    if let Err(e) = run().await {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;

    tracing::info!("document: {}", config.document_path.display());
    let store: Arc<dyn DocumentStore> = Arc::new(FileStore::open(&config.document_path).await?);

    tracing::info!("serving document at {}", config.endpoint_path);
    let app = build_router(store, config.clone());

    tracing::info!("listening on {}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
