//! Destination-name collision resolution.

use std::path::{Path, PathBuf};

use crate::error::OpsError;

/// Upper bound on numeric rename suffixes before the operation on an
/// item is declared failed.
pub const MAX_RENAME_ATTEMPTS: u32 = 1000;

/// Resolved destination for one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedName {
    /// The free destination path.
    pub path: PathBuf,
    /// Whether a numeric suffix had to be appended.
    pub renamed: bool,
}

/// Find a destination path for `file_name` inside `dir` that does not
/// exist yet, appending `" (i)"` to the stem as needed.
///
/// For "shot.jpg" the candidates are "shot.jpg", "shot (1).jpg",
/// "shot (2).jpg", … up to [`MAX_RENAME_ATTEMPTS`].
pub fn resolve_unique_name(dir: &Path, file_name: &str) -> Result<ResolvedName, OpsError> {
    resolve_bounded(dir, file_name, MAX_RENAME_ATTEMPTS)
}

fn resolve_bounded(dir: &Path, file_name: &str, max: u32) -> Result<ResolvedName, OpsError> {
    let candidate = dir.join(file_name);
    if !candidate.exists() {
        return Ok(ResolvedName {
            path: candidate,
            renamed: false,
        });
    }

    let full = Path::new(file_name);
    let stem = full.file_stem().and_then(|s| s.to_str()).unwrap_or(file_name);
    let extension = full.extension().and_then(|e| e.to_str());

    for i in 1..=max {
        let name = match extension {
            Some(ext) => format!("{stem} ({i}).{ext}"),
            None => format!("{stem} ({i})"),
        };
        let candidate = dir.join(&name);
        if !candidate.exists() {
            return Ok(ResolvedName {
                path: candidate,
                renamed: true,
            });
        }
    }

    Err(OpsError::NameCollision {
        dir: dir.to_path_buf(),
        name: file_name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn free_name_is_used_verbatim() {
        let dir = TempDir::new().unwrap();
        let resolved = resolve_unique_name(dir.path(), "shot.jpg").unwrap();
        assert_eq!(resolved.path, dir.path().join("shot.jpg"));
        assert!(!resolved.renamed);
    }

    #[test]
    fn collision_appends_numeric_suffix() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("shot.jpg"), b"x").unwrap();
        let resolved = resolve_unique_name(dir.path(), "shot.jpg").unwrap();
        assert_eq!(resolved.path, dir.path().join("shot (1).jpg"));
        assert!(resolved.renamed);
    }

    #[test]
    fn suffix_skips_taken_candidates() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("shot.jpg"), b"x").unwrap();
        fs::write(dir.path().join("shot (1).jpg"), b"x").unwrap();
        let resolved = resolve_unique_name(dir.path(), "shot.jpg").unwrap();
        assert_eq!(resolved.path, dir.path().join("shot (2).jpg"));
    }

    #[test]
    fn no_extension_names_are_suffixed_too() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("raw"), b"x").unwrap();
        let resolved = resolve_unique_name(dir.path(), "raw").unwrap();
        assert_eq!(resolved.path, dir.path().join("raw (1)"));
    }

    #[test]
    fn bounded_attempts_fail_with_collision_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("shot.jpg"), b"x").unwrap();
        fs::write(dir.path().join("shot (1).jpg"), b"x").unwrap();
        fs::write(dir.path().join("shot (2).jpg"), b"x").unwrap();
        let result = resolve_bounded(dir.path(), "shot.jpg", 2);
        assert!(matches!(result, Err(OpsError::NameCollision { .. })));
    }
}
