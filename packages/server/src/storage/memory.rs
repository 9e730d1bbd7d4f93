//! In-memory document store.
//!
//! Holds a single document given at construction. Use this for tests and
//! the conformance suite. There is no backing source, so
//! [`DocumentStore::reload`] fails unless a replacement body has been
//! staged with [`MemoryStore::stage`].

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};

use super::{DocumentStore, LoadedDocument, StoreError};

/// Thread-safe, in-memory implementation of [`DocumentStore`].
pub struct MemoryStore {
    current: RwLock<Arc<LoadedDocument>>,
    staged: Mutex<Option<String>>,
}

impl MemoryStore {
    /// Build a store serving `raw`.
    pub fn from_json(raw: impl Into<String>) -> Result<Self, StoreError> {
        Ok(Self {
            current: RwLock::new(Arc::new(LoadedDocument::parse(raw.into())?)),
            staged: Mutex::new(None),
        })
    }

    /// Set the body the next [`reload`](DocumentStore::reload) will load.
    pub fn stage(&self, raw: impl Into<String>) {
        *self.staged.lock() = Some(raw.into());
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn current(&self) -> Arc<LoadedDocument> {
        self.current.read().clone()
    }

    async fn reload(&self) -> Result<Arc<LoadedDocument>, StoreError> {
        let raw = self
            .staged
            .lock()
            .take()
            .ok_or(StoreError::ReloadUnsupported)?;
        let loaded = Arc::new(LoadedDocument::parse(raw)?);
        *self.current.write() = Arc::clone(&loaded);
        Ok(loaded)
    }
}
