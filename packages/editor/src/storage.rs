//! # Persistence and Asset Seams
//!
//! The editor core does no I/O of its own. Documents are loaded and saved as
//! JSON blobs through a [`DocumentStore`], and image sources come from an
//! [`AssetPicker`].
//!
//! - **Memory-backed**: [`MemoryStore`], for tests and scratch documents
//! - **File-backed**: [`FileStore`], one `<id>.json` per document in a directory

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Invalid document id: {0}")]
    InvalidId(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store lock poisoned")]
    Poisoned,
}

/// Load and save persisted documents by id
pub trait DocumentStore {
    fn load(&self, id: &str) -> Result<String, StoreError>;

    fn save(&self, id: &str, json: &str) -> Result<(), StoreError>;

    /// Ids of all stored documents, sorted
    fn list(&self) -> Result<Vec<String>, StoreError>;
}

/// Source of image URLs, such as a media library dialog
pub trait AssetPicker {
    /// `None` when the user cancelled
    fn pick_asset(&self) -> Option<String>;
}

/// Picker that always returns the same URL
#[derive(Debug, Clone)]
pub struct StaticAssetPicker(pub String);

impl AssetPicker for StaticAssetPicker {
    fn pick_asset(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for MemoryStore {
    fn load(&self, id: &str) -> Result<String, StoreError> {
        let documents = self.documents.read().map_err(|_| StoreError::Poisoned)?;
        documents
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn save(&self, id: &str, json: &str) -> Result<(), StoreError> {
        let mut documents = self.documents.write().map_err(|_| StoreError::Poisoned)?;
        documents.insert(id.to_string(), json.to_string());
        Ok(())
    }

    fn list(&self) -> Result<Vec<String>, StoreError> {
        let documents = self.documents.read().map_err(|_| StoreError::Poisoned)?;
        let mut ids: Vec<String> = documents.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }
}

/// Stores each document as `<dir>/<id>.json`
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: &str) -> Result<PathBuf, StoreError> {
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::InvalidId(id.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", id)))
    }
}

impl DocumentStore for FileStore {
    fn load(&self, id: &str) -> Result<String, StoreError> {
        let path = self.path_for(id)?;
        if !path.exists() {
            return Err(StoreError::NotFound(id.to_string()));
        }
        debug!(path = %path.display(), "Loading document");
        Ok(std::fs::read_to_string(path)?)
    }

    fn save(&self, id: &str, json: &str) -> Result<(), StoreError> {
        let path = self.path_for(id)?;
        std::fs::create_dir_all(&self.dir)?;
        debug!(path = %path.display(), bytes = json.len(), "Saving document");
        std::fs::write(path, json)?;
        Ok(())
    }

    fn list(&self) -> Result<Vec<String>, StoreError> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut ids = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) == Some("json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    ids.push(stem.to_string());
                }
            }
        }
        ids.sort();
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        store.save("landing", "[]").unwrap();

        assert_eq!(store.load("landing").unwrap(), "[]");
        assert!(matches!(store.load("missing"), Err(StoreError::NotFound(_))));
        assert_eq!(store.list().unwrap(), vec!["landing".to_string()]);
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("pages"));

        assert!(store.list().unwrap().is_empty());
        store.save("landing", "[1]").unwrap();
        store.save("checkout", "[2]").unwrap();

        assert_eq!(store.load("landing").unwrap(), "[1]");
        assert_eq!(store.list().unwrap(), vec!["checkout".to_string(), "landing".to_string()]);
    }

    #[test]
    fn test_file_store_rejects_path_ids() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        assert!(matches!(store.save("../escape", "[]"), Err(StoreError::InvalidId(_))));
        assert!(matches!(store.load(""), Err(StoreError::InvalidId(_))));
    }
}
