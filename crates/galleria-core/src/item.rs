//! Media item and album types.

use std::path::PathBuf;
use std::time::SystemTime;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Opaque handle to an item in the media catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemHandle(pub u64);

impl ItemHandle {
    /// Create a new handle from a raw id.
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

/// The class of storage device an item lives on.
///
/// Removable media can disappear mid-operation; the engine treats that as
/// a cancellation cause rather than a per-item error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageClass {
    /// Built-in storage.
    Internal,
    /// Removable media (SD card, USB storage).
    Removable,
}

impl StorageClass {
    /// Whether the device can be ejected while an operation is running.
    pub fn is_removable(&self) -> bool {
        matches!(self, Self::Removable)
    }
}

/// A single media item as reported by the catalog.
///
/// Transient: constructed per lookup and discarded after the operation
/// step that needed it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaItem {
    /// Catalog handle for this item.
    pub handle: ItemHandle,
    /// Absolute path of the underlying file.
    pub path: PathBuf,
    /// Displayed name.
    pub name: CompactString,
    /// Last modification time.
    pub modified: SystemTime,
    /// File size in bytes.
    pub size: u64,
    /// Storage device class.
    pub storage: StorageClass,
}

impl MediaItem {
    /// Create a new item record.
    pub fn new(
        handle: ItemHandle,
        path: impl Into<PathBuf>,
        name: impl Into<CompactString>,
        modified: SystemTime,
        size: u64,
        storage: StorageClass,
    ) -> Self {
        Self {
            handle,
            path: path.into(),
            name: name.into(),
            modified,
            size,
            storage,
        }
    }

    /// The file name component of the item's path, falling back to the
    /// displayed name when the path has none.
    pub fn file_name(&self) -> CompactString {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .map(CompactString::from)
            .unwrap_or_else(|| self.name.clone())
    }
}

/// Destination descriptor for move/copy operations: an album is a
/// directory plus its displayed name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumRef {
    /// Directory backing the album.
    pub path: PathBuf,
    /// Displayed album name.
    pub name: CompactString,
}

impl AlbumRef {
    /// Create an album reference.
    pub fn new(path: impl Into<PathBuf>, name: impl Into<CompactString>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
        }
    }

    /// Whether `item_path` already resides directly in this album.
    ///
    /// Compared component-wise, so trailing separators and `.` segments
    /// on either side do not misclassify a same-album item. Both paths
    /// are expected to be the catalog's canonical absolute paths;
    /// symlinks and `..` segments are not resolved here (the core crate
    /// does not touch the filesystem).
    pub fn contains(&self, item_path: &std::path::Path) -> bool {
        match item_path.parent() {
            Some(parent) => parent.components().eq(self.path.components()),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_prefers_path_component() {
        let item = MediaItem::new(
            ItemHandle::new(1),
            "/media/photos/IMG_0001.jpg",
            "First shot",
            SystemTime::now(),
            1024,
            StorageClass::Internal,
        );
        assert_eq!(item.file_name(), "IMG_0001.jpg");
    }

    #[test]
    fn album_contains_direct_children_only() {
        let album = AlbumRef::new("/media/photos", "Photos");
        assert!(album.contains(std::path::Path::new("/media/photos/a.jpg")));
        assert!(!album.contains(std::path::Path::new("/media/photos/sub/a.jpg")));
        assert!(!album.contains(std::path::Path::new("/media/other/a.jpg")));
    }

    #[test]
    fn album_containment_survives_separator_noise() {
        let album = AlbumRef::new("/media/photos/", "Photos");
        assert!(album.contains(std::path::Path::new("/media/photos/a.jpg")));

        let dotted = AlbumRef::new("/media/./photos", "Photos");
        assert!(dotted.contains(std::path::Path::new("/media/photos/a.jpg")));
    }
}
