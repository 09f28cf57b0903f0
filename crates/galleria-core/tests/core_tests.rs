use std::path::Path;
use std::time::SystemTime;

use galleria_core::{
    CatalogError, ItemHandle, MediaCatalog, MediaItem, MemoryCatalog, StorageClass,
};

fn sample_item(path: &str) -> MediaItem {
    MediaItem::new(
        ItemHandle::new(0),
        path,
        Path::new(path)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("item"),
        SystemTime::now(),
        100,
        StorageClass::Internal,
    )
}

#[test]
fn test_insert_assigns_distinct_handles() {
    let catalog = MemoryCatalog::new();
    let a = catalog.insert(sample_item("/media/a.jpg"));
    let b = catalog.insert(sample_item("/media/b.jpg"));

    assert_ne!(a, b);
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.item(a).unwrap().name, "a.jpg");
    assert_eq!(catalog.item(b).unwrap().name, "b.jpg");
}

#[test]
fn test_move_record_updates_path_and_name() {
    let catalog = MemoryCatalog::new();
    let handle = catalog.insert(sample_item("/media/a.jpg"));

    catalog
        .move_record(handle, Path::new("/media/album/a (1).jpg"))
        .unwrap();

    let item = catalog.item(handle).unwrap();
    assert_eq!(item.path, Path::new("/media/album/a (1).jpg"));
    assert_eq!(item.name, "a (1).jpg");
}

#[test]
fn test_delete_record_removes_item() {
    let catalog = MemoryCatalog::new();
    let handle = catalog.insert(sample_item("/media/a.jpg"));

    catalog.delete_record(handle).unwrap();

    assert!(catalog.is_empty());
    assert!(matches!(
        catalog.item(handle),
        Err(CatalogError::ItemNotFound(h)) if h == handle
    ));
}

#[test]
fn test_unknown_handle_is_not_found() {
    let catalog = MemoryCatalog::new();
    let missing = ItemHandle::new(99);

    assert!(matches!(
        catalog.move_record(missing, Path::new("/x")),
        Err(CatalogError::ItemNotFound(_))
    ));
    assert!(matches!(
        catalog.delete_record(missing),
        Err(CatalogError::ItemNotFound(_))
    ));
}

#[test]
fn test_storage_class_removability() {
    assert!(StorageClass::Removable.is_removable());
    assert!(!StorageClass::Internal.is_removable());
}
