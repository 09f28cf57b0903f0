//! The media catalog boundary.
//!
//! The operation engine never talks to a database directly; it goes
//! through [`MediaCatalog`] so the filesystem and the catalog stay
//! consistent regardless of what backs the catalog.

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use compact_str::CompactString;

use crate::{CatalogError, ItemHandle, MediaItem};

/// External media catalog: item lookup plus the two record mutations the
/// engine performs after a successful filesystem operation.
pub trait MediaCatalog: Send + Sync {
    /// Look up the item behind a handle.
    fn item(&self, handle: ItemHandle) -> Result<MediaItem, CatalogError>;

    /// Record that an item's file now lives at `new_path`.
    fn move_record(&self, handle: ItemHandle, new_path: &Path) -> Result<(), CatalogError>;

    /// Remove an item's record entirely.
    fn delete_record(&self, handle: ItemHandle) -> Result<(), CatalogError>;
}

/// In-memory catalog backed by a mutex-guarded map.
///
/// Used by the engine's tests and by embedders that keep their item list
/// in memory rather than a database.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    items: Mutex<HashMap<ItemHandle, MediaItem>>,
    next_id: AtomicU64,
}

impl MemoryCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an item, assigning it a fresh handle.
    pub fn insert(&self, mut item: MediaItem) -> ItemHandle {
        let handle = ItemHandle::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        item.handle = handle;
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(handle, item);
        handle
    }

    /// Number of registered items.
    pub fn len(&self) -> usize {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the catalog holds no items.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl MediaCatalog for MemoryCatalog {
    fn item(&self, handle: ItemHandle) -> Result<MediaItem, CatalogError> {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&handle)
            .cloned()
            .ok_or(CatalogError::ItemNotFound(handle))
    }

    fn move_record(&self, handle: ItemHandle, new_path: &Path) -> Result<(), CatalogError> {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        let item = items
            .get_mut(&handle)
            .ok_or(CatalogError::ItemNotFound(handle))?;
        item.path = new_path.to_path_buf();
        if let Some(name) = new_path.file_name().and_then(|n| n.to_str()) {
            item.name = CompactString::from(name);
        }
        Ok(())
    }

    fn delete_record(&self, handle: ItemHandle) -> Result<(), CatalogError> {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        items
            .remove(&handle)
            .map(|_| ())
            .ok_or(CatalogError::ItemNotFound(handle))
    }
}
