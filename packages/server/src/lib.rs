//! Public surface for the `leobook-server` crate.
//!
//! Exposes the router builder, config, and document stores so that external
//! crates (e.g. the conformance test suite) can spin up an in-process server
//! without spawning a subprocess.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod storage;

pub use config::ServerConfig;
pub use router::build_router;
pub use storage::{file::FileStore, memory::MemoryStore, DocumentStore, LoadedDocument, StoreError};
