//! File-backed document store.
//!
//! The file is read once at startup (a missing or broken file is a startup
//! error) and again on every [`DocumentStore::reload`]. The current snapshot
//! lives behind a [`RwLock`] holding an `Arc`; a reload builds the new
//! snapshot outside the lock and swaps it in.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::{DocumentStore, LoadedDocument, StoreError};

/// [`DocumentStore`] that reads the book from a JSON file on disk.
pub struct FileStore {
    path: PathBuf,
    current: RwLock<Arc<LoadedDocument>>,
}

impl FileStore {
    /// Read and parse `path`.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let loaded = read(&path).await?;
        tracing::info!(
            path = %path.display(),
            chapters = loaded.document.chapters.len(),
            nodes = loaded.graph.len(),
            "document loaded"
        );
        Ok(Self {
            path,
            current: RwLock::new(Arc::new(loaded)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

async fn read(path: &Path) -> Result<LoadedDocument, StoreError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| StoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    LoadedDocument::parse(raw)
}

#[async_trait]
impl DocumentStore for FileStore {
    async fn current(&self) -> Arc<LoadedDocument> {
        self.current.read().clone()
    }

    async fn reload(&self) -> Result<Arc<LoadedDocument>, StoreError> {
        let loaded = match read(&self.path).await {
            Ok(loaded) => Arc::new(loaded),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "reload failed, keeping previous document: {e}");
                return Err(e);
            }
        };
        *self.current.write() = Arc::clone(&loaded);
        tracing::info!(
            path = %self.path.display(),
            chapters = loaded.document.chapters.len(),
            "document reloaded"
        );
        Ok(loaded)
    }
}
