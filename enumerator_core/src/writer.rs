//! Persists rendered source.

use crate::error::{EnumeratorError, Result};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Result of comparing rendered source with what is on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    UpToDate,
    Stale,
    Missing,
}

/// Replaces `path` with `content`.
///
/// The bytes go to a temporary file next to the destination which is then
/// renamed over it, so readers see either the old file or the new one. The
/// parent directory must already exist.
pub fn write_atomically(path: &Path, content: &[u8]) -> Result<usize> {
    let parent = match path.parent() {
        Some(parent) if parent.as_os_str().is_empty() => Path::new("."),
        Some(parent) => parent,
        None => {
            return Err(EnumeratorError::MissingParent {
                path: path.to_path_buf(),
            });
        }
    };
    if !parent.is_dir() {
        return Err(EnumeratorError::MissingParent {
            path: path.to_path_buf(),
        });
    }

    let write_error = |source: std::io::Error| EnumeratorError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut temp = NamedTempFile::new_in(parent).map_err(write_error)?;
    temp.write_all(content).map_err(write_error)?;
    temp.as_file().sync_all().map_err(write_error)?;
    temp.persist(path).map_err(|e| write_error(e.error))?;

    tracing::debug!("Wrote {} bytes to {:?}", content.len(), path);
    Ok(content.len())
}

/// Compares `content` with the file at `path` without modifying anything.
pub fn check(path: &Path, content: &[u8]) -> Result<CheckStatus> {
    match fs::read(path) {
        Ok(existing) if existing == content => Ok(CheckStatus::UpToDate),
        Ok(_) => Ok(CheckStatus::Stale),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(CheckStatus::Missing),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("color.go");

        let written = write_atomically(&path, b"package color\n").unwrap();

        assert_eq!(written, 14);
        assert_eq!(fs::read_to_string(&path).unwrap(), "package color\n");
    }

    #[test]
    fn test_write_overwrites_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("color.go");
        fs::write(&path, "stale content that is longer than the new one").unwrap();

        write_atomically(&path, b"fresh").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "fresh");
    }

    #[test]
    fn test_write_leaves_no_temporary_files() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("color.go");

        write_atomically(&path, b"one").unwrap();
        write_atomically(&path, b"two").unwrap();

        let entries: Vec<_> = fs::read_dir(temp_dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_missing_parent_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("color.go");

        let err = write_atomically(&path, b"package color\n").unwrap_err();

        assert!(matches!(err, EnumeratorError::MissingParent { .. }));
        assert!(!path.exists());
        assert!(!temp_dir.path().join("missing").exists());
    }

    #[test]
    fn test_check_statuses() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("color.go");

        assert_eq!(check(&path, b"a").unwrap(), CheckStatus::Missing);

        fs::write(&path, "a").unwrap();
        assert_eq!(check(&path, b"a").unwrap(), CheckStatus::UpToDate);
        assert_eq!(check(&path, b"b").unwrap(), CheckStatus::Stale);
    }
}
