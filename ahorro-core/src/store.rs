//! Single-key durable storage for the serialized catalog.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::PromoError;

/// Key under which the catalog JSON is stored.
pub const CATALOG_KEY: &str = "appahorro_data";

/// Minimal key-value store. Reads return `Ok(None)` for an absent key.
pub trait CatalogStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, PromoError>;
    fn set(&self, key: &str, value: &str) -> Result<(), PromoError>;
}

/// Stores each key as `<dir>/<key>.json`.
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

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl CatalogStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, PromoError> {
        let p = self.path_for(key);
        if !p.exists() {
            return Ok(None);
        }
        fs::read_to_string(&p)
            .map(Some)
            .map_err(|e| PromoError::storage(format!("read {}: {e}", p.display())))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PromoError> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| PromoError::storage(format!("create {}: {e}", self.dir.display())))?;
        let p = self.path_for(key);
        fs::write(&p, value).map_err(|e| PromoError::storage(format!("write {}: {e}", p.display())))
    }
}

/// In-process store. `unavailable()` builds one that rejects every call.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    unavailable: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unavailable() -> Self {
        Self {
            entries: Mutex::default(),
            unavailable: true,
        }
    }

    fn check(&self) -> Result<(), PromoError> {
        if self.unavailable {
            return Err(PromoError::storage("memory store disabled"));
        }
        Ok(())
    }
}

impl CatalogStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PromoError> {
        self.check()?;
        let entries = self.entries.lock().map_err(PromoError::storage)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PromoError> {
        self.check()?;
        let mut entries = self.entries.lock().map_err(PromoError::storage)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
