//! Core media catalog types for galleria.
//!
//! This crate defines the domain model shared by the operation engine and
//! any front-end: media item records, the catalog boundary trait, and the
//! catalog error types. It deliberately knows nothing about threads,
//! channels, or the filesystem.

mod catalog;
mod error;
mod item;

pub use catalog::{MediaCatalog, MemoryCatalog};
pub use error::CatalogError;
pub use item::{AlbumRef, ItemHandle, MediaItem, StorageClass};
