//! File operation primitives: move, chunked cancellable copy, delete.

use std::fs::{self, File};
use std::io::{ErrorKind, Read, Write};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::cancel::CancelCell;
use crate::error::OpsError;

/// Default copy chunk size. Cancellation is polled once per chunk, so
/// this also bounds abort latency inside a copy.
pub const COPY_CHUNK_SIZE: usize = 256 * 1024;

/// Single-file move/copy/delete primitives.
///
/// `move_file` tries an atomic rename and falls back to copy+delete when
/// the rename crosses storage devices. Successful primitives flush data
/// to persistent storage before reporting success.
#[derive(Debug)]
pub struct FileExecutor {
    chunk_size: usize,
    fallback_copies: AtomicU64,
}

impl FileExecutor {
    /// Create an executor with the default chunk size.
    pub fn new() -> Self {
        Self::with_chunk_size(COPY_CHUNK_SIZE)
    }

    /// Create an executor with an explicit copy chunk size.
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
            fallback_copies: AtomicU64::new(0),
        }
    }

    /// How many moves have taken the cross-device copy+delete fallback.
    pub fn fallback_copies(&self) -> u64 {
        self.fallback_copies.load(Ordering::Relaxed)
    }

    /// Move `src` to `dst`.
    ///
    /// Same-device moves are a single atomic rename. A rename rejected
    /// with `CrossesDevices` falls back to copy+delete and succeeds only
    /// if both steps succeed.
    pub fn move_file(&self, cancel: &CancelCell, src: &Path, dst: &Path) -> Result<(), OpsError> {
        match fs::rename(src, dst) {
            Ok(()) => {
                sync_parent_dir(dst)?;
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::CrossesDevices => {
                self.fallback_copies.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(src = %src.display(), dst = %dst.display(),
                    "rename crossed devices, falling back to copy+delete");
                self.copy_file(cancel, src, dst)?;
                fs::remove_file(src).map_err(|e| OpsError::io(src, e))?;
                sync_parent_dir(src)?;
                Ok(())
            }
            Err(err) => Err(OpsError::io(src, err)),
        }
    }

    /// Stream-copy `src` to `dst` in fixed-size chunks, polling the
    /// cancellation cell between chunks.
    ///
    /// On cancellation or any I/O error the partial destination is
    /// deleted; the source is never touched. Returns the bytes copied.
    pub fn copy_file(&self, cancel: &CancelCell, src: &Path, dst: &Path) -> Result<u64, OpsError> {
        let meta = fs::metadata(src).map_err(|e| OpsError::io(src, e))?;
        if !meta.is_file() {
            return Err(OpsError::NotAFile {
                path: src.to_path_buf(),
            });
        }

        let result = self.copy_chunks(cancel, src, dst);
        if result.is_err() {
            let _ = fs::remove_file(dst);
        }
        result
    }

    fn copy_chunks(&self, cancel: &CancelCell, src: &Path, dst: &Path) -> Result<u64, OpsError> {
        let mut reader = File::open(src).map_err(|e| OpsError::io(src, e))?;
        let mut writer = File::create(dst).map_err(|e| OpsError::io(dst, e))?;
        let mut buf = vec![0u8; self.chunk_size];
        let mut copied = 0u64;

        loop {
            if let Some(cause) = cancel.cancelled() {
                return Err(OpsError::Interrupted { cause });
            }
            let n = reader.read(&mut buf).map_err(|e| OpsError::io(src, e))?;
            if n == 0 {
                break;
            }
            writer
                .write_all(&buf[..n])
                .map_err(|e| OpsError::io(dst, e))?;
            copied += n as u64;
        }

        writer.sync_all().map_err(|e| OpsError::io(dst, e))?;
        sync_parent_dir(dst)?;
        Ok(copied)
    }

    /// Delete a single file and flush its directory.
    pub fn delete_file(&self, src: &Path) -> Result<(), OpsError> {
        fs::remove_file(src).map_err(|e| OpsError::io(src, e))?;
        sync_parent_dir(src)
    }
}

impl Default for FileExecutor {
    fn default() -> Self {
        Self::new()
    }
}

/// Flush a path's containing directory so the rename/unlink itself is
/// durable, not just the file data.
#[cfg(unix)]
fn sync_parent_dir(path: &Path) -> Result<(), OpsError> {
    if let Some(parent) = path.parent() {
        let dir = File::open(parent).map_err(|e| OpsError::io(parent, e))?;
        dir.sync_all().map_err(|e| OpsError::io(parent, e))?;
    }
    Ok(())
}

#[cfg(not(unix))]
fn sync_parent_dir(_path: &Path) -> Result<(), OpsError> {
    // Directories cannot be opened for syncing here; file data is still
    // flushed via sync_all on the file handles.
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use crate::cancel::CancelCause;

    use super::*;

    #[test]
    fn same_device_move_never_falls_back() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("a.jpg");
        let dst = dir.path().join("b.jpg");
        fs::write(&src, b"payload").unwrap();

        let executor = FileExecutor::new();
        let cancel = CancelCell::new();
        executor.move_file(&cancel, &src, &dst).unwrap();

        assert_eq!(executor.fallback_copies(), 0);
        assert!(!src.exists());
        assert_eq!(fs::read(&dst).unwrap(), b"payload");
    }

    #[test]
    fn copy_streams_full_contents_in_small_chunks() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("a.bin");
        let dst = dir.path().join("b.bin");
        let payload: Vec<u8> = (0..10_000u32).map(|i| (i % 251) as u8).collect();
        fs::write(&src, &payload).unwrap();

        let executor = FileExecutor::with_chunk_size(64);
        let cancel = CancelCell::new();
        let copied = executor.copy_file(&cancel, &src, &dst).unwrap();

        assert_eq!(copied, payload.len() as u64);
        assert_eq!(fs::read(&dst).unwrap(), payload);
        assert!(src.exists());
    }

    #[test]
    fn interrupted_copy_leaves_no_partial_destination() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("a.bin");
        let dst = dir.path().join("b.bin");
        fs::write(&src, vec![7u8; 4096]).unwrap();

        let executor = FileExecutor::with_chunk_size(64);
        let cancel = CancelCell::new();
        cancel.begin();
        cancel.cancel(CancelCause::StorageRemoved);

        let result = executor.copy_file(&cancel, &src, &dst);
        assert!(matches!(
            result,
            Err(OpsError::Interrupted {
                cause: CancelCause::StorageRemoved
            })
        ));
        assert!(!dst.exists());
        assert!(src.exists());
    }

    #[test]
    fn copy_rejects_directories() {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("album");
        fs::create_dir(&sub).unwrap();

        let executor = FileExecutor::new();
        let cancel = CancelCell::new();
        let result = executor.copy_file(&cancel, &sub, &dir.path().join("out"));
        assert!(matches!(result, Err(OpsError::NotAFile { .. })));
    }

    #[test]
    fn delete_removes_file() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("a.jpg");
        fs::write(&src, b"x").unwrap();

        let executor = FileExecutor::new();
        executor.delete_file(&src).unwrap();
        assert!(!src.exists());
    }

    #[test]
    fn move_of_missing_source_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let executor = FileExecutor::new();
        let cancel = CancelCell::new();
        let result = executor.move_file(
            &cancel,
            &dir.path().join("missing.jpg"),
            &dir.path().join("out.jpg"),
        );
        assert!(matches!(result, Err(OpsError::Io { .. })));
    }
}
