//! Application state: the in-memory catalog, its store and the loading flag.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use ahorro_core::time;
use ahorro_core::{Catalog, CatalogStore};
use anyhow::Result;
use chrono::{NaiveDate, Utc};

pub struct AppState {
    catalog: RwLock<Catalog>,
    store: Box<dyn CatalogStore>,
    is_loading: AtomicBool,
    timezone: String,
}

/// Held for the duration of a refresh; clears the loading flag on drop.
pub struct LoadingGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl AppState {
    /// Load the stored catalog (or the bundled one) and take ownership of the store.
    pub fn load(store: Box<dyn CatalogStore>, timezone: &str) -> Result<Self> {
        time::today(timezone)?;
        let catalog = Catalog::load(store.as_ref())?;
        Ok(Self::with_catalog(catalog, store, timezone))
    }

    pub fn with_catalog(catalog: Catalog, store: Box<dyn CatalogStore>, timezone: &str) -> Self {
        Self {
            catalog: RwLock::new(catalog),
            store,
            is_loading: AtomicBool::new(false),
            timezone: timezone.to_string(),
        }
    }

    pub fn catalog(&self) -> RwLockReadGuard<'_, Catalog> {
        self.catalog.read().unwrap_or_else(|e| e.into_inner())
    }

    pub(crate) fn catalog_mut(&self) -> RwLockWriteGuard<'_, Catalog> {
        self.catalog.write().unwrap_or_else(|e| e.into_inner())
    }

    pub fn store(&self) -> &dyn CatalogStore {
        self.store.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading.load(Ordering::Acquire)
    }

    /// `None` when a refresh is already in flight.
    pub fn try_begin_refresh(&self) -> Option<LoadingGuard<'_>> {
        self.is_loading
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| LoadingGuard {
                flag: &self.is_loading,
            })
    }

    pub fn today(&self) -> NaiveDate {
        time::today(&self.timezone).unwrap_or_else(|_| Utc::now().date_naive())
    }
}
