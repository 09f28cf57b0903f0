//! Prebuilt bulk operations wired to a catalog and executor.
//!
//! These construct [`OperationDescriptor`]s whose `operate` step performs
//! the filesystem work and keeps the media catalog consistent with it. A
//! catalog *lookup* failure is structural and aborts the operation;
//! everything that can go wrong with a single item is reported as a
//! per-item failure and the queue continues.

use std::sync::Arc;

use galleria_core::{AlbumRef, ItemHandle, MediaCatalog};

use crate::collision::resolve_unique_name;
use crate::descriptor::{ItemOutcome, OperationDescriptor, OperationKind};
use crate::error::OpsError;
use crate::executor::FileExecutor;
use crate::progress::PopupOp;

/// Move the targets into `dest`, renaming on collision.
///
/// Targets already inside `dest` are left alone and surfaced as
/// [`PopupOp::SameAlbum`]. After a successful filesystem move the
/// catalog record follows; a record-update failure downgrades the item
/// to [`PopupOp::CatalogFailed`].
pub fn move_operation(
    catalog: Arc<dyn MediaCatalog>,
    executor: Arc<FileExecutor>,
    targets: Vec<ItemHandle>,
    dest: AlbumRef,
) -> OperationDescriptor {
    let closure_dest = dest.clone();
    let operate = Box::new(
        move |ctx: &crate::OperationContext, handle: ItemHandle| -> Result<ItemOutcome, OpsError> {
            let item = catalog.item(handle)?;
            if closure_dest.contains(&item.path) {
                return Ok(ItemOutcome::Note(PopupOp::SameAlbum));
            }

            let resolved = match resolve_unique_name(&closure_dest.path, &item.file_name()) {
                Ok(resolved) => resolved,
                Err(err) => {
                    tracing::warn!(?handle, error = %err, "name collision unresolved");
                    return Ok(ItemOutcome::Failed(PopupOp::ItemFailed));
                }
            };

            match executor.move_file(ctx.cancel_cell(), &item.path, &resolved.path) {
                Ok(()) => match catalog.move_record(handle, &resolved.path) {
                    Ok(()) if resolved.renamed => Ok(ItemOutcome::Note(PopupOp::DuplicateRenamed)),
                    Ok(()) => Ok(ItemOutcome::Done),
                    Err(err) => {
                        tracing::warn!(?handle, error = %err, "catalog move_record failed");
                        Ok(ItemOutcome::Failed(PopupOp::CatalogFailed))
                    }
                },
                Err(OpsError::Interrupted { .. }) => Ok(ItemOutcome::Interrupted),
                Err(err) => {
                    tracing::warn!(?handle, error = %err, "move failed");
                    Ok(ItemOutcome::Failed(PopupOp::ItemFailed))
                }
            }
        },
    );

    OperationDescriptor::new(OperationKind::Move, targets, Some(dest), operate)
}

/// Copy the targets into `dest`, renaming on collision.
///
/// The catalog is not touched: it has no record-creation primitive, and
/// the gallery's rescan picks up the new files.
pub fn copy_operation(
    catalog: Arc<dyn MediaCatalog>,
    executor: Arc<FileExecutor>,
    targets: Vec<ItemHandle>,
    dest: AlbumRef,
) -> OperationDescriptor {
    let closure_dest = dest.clone();
    let operate = Box::new(
        move |ctx: &crate::OperationContext, handle: ItemHandle| -> Result<ItemOutcome, OpsError> {
            let item = catalog.item(handle)?;
            if closure_dest.contains(&item.path) {
                return Ok(ItemOutcome::Note(PopupOp::SameAlbum));
            }

            let resolved = match resolve_unique_name(&closure_dest.path, &item.file_name()) {
                Ok(resolved) => resolved,
                Err(err) => {
                    tracing::warn!(?handle, error = %err, "name collision unresolved");
                    return Ok(ItemOutcome::Failed(PopupOp::ItemFailed));
                }
            };

            match executor.copy_file(ctx.cancel_cell(), &item.path, &resolved.path) {
                Ok(_) if resolved.renamed => Ok(ItemOutcome::Note(PopupOp::DuplicateRenamed)),
                Ok(_) => Ok(ItemOutcome::Done),
                Err(OpsError::Interrupted { .. }) => Ok(ItemOutcome::Interrupted),
                Err(err) => {
                    tracing::warn!(?handle, error = %err, "copy failed");
                    Ok(ItemOutcome::Failed(PopupOp::ItemFailed))
                }
            }
        },
    );

    OperationDescriptor::new(OperationKind::Copy, targets, Some(dest), operate)
}

/// Delete the targets from the filesystem and the catalog.
pub fn delete_operation(
    catalog: Arc<dyn MediaCatalog>,
    executor: Arc<FileExecutor>,
    targets: Vec<ItemHandle>,
) -> OperationDescriptor {
    let operate = Box::new(
        move |_ctx: &crate::OperationContext, handle: ItemHandle| -> Result<ItemOutcome, OpsError> {
            let item = catalog.item(handle)?;
            match executor.delete_file(&item.path) {
                Ok(()) => match catalog.delete_record(handle) {
                    Ok(()) => Ok(ItemOutcome::Done),
                    Err(err) => {
                        tracing::warn!(?handle, error = %err, "catalog delete_record failed");
                        Ok(ItemOutcome::Failed(PopupOp::CatalogFailed))
                    }
                },
                Err(err) => {
                    tracing::warn!(?handle, error = %err, "delete failed");
                    Ok(ItemOutcome::Failed(PopupOp::ItemFailed))
                }
            }
        },
    );

    OperationDescriptor::new(OperationKind::Delete, targets, None, operate)
}
