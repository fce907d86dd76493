//! Local filesystem adapter using std::fs.

use std::io;
use std::path::{Path, PathBuf};

use siteforge_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{SiteforgeError, SiteforgeResult},
};
use tracing::trace;

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> SiteforgeResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> SiteforgeResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn replace_file(&self, path: &Path, content: &str) -> SiteforgeResult<()> {
        // A symlinked target is replaced at its destination; the link stays.
        let target = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        let staging = staging_path(&target);
        trace!(path = %target.display(), staging = %staging.display(), "replacing file");

        std::fs::write(&staging, content).map_err(|e| map_io_error(&staging, e, "write file"))?;
        if let Ok(existing) = std::fs::metadata(&target) {
            std::fs::set_permissions(&staging, existing.permissions()).map_err(|e| {
                let _ = std::fs::remove_file(&staging);
                map_io_error(&staging, e, "set permissions")
            })?;
        }
        std::fs::rename(&staging, &target).map_err(|e| {
            let _ = std::fs::remove_file(&staging);
            map_io_error(path, e, "replace file")
        })
    }

    fn read_to_string(&self, path: &Path) -> SiteforgeResult<String> {
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn set_permissions(&self, path: &Path, executable: bool) -> SiteforgeResult<()> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let metadata =
                std::fs::metadata(path).map_err(|e| map_io_error(path, e, "get metadata"))?;
            let mut perms = metadata.permissions();
            let mode = perms.mode();
            perms.set_mode(if executable {
                mode | 0o111
            } else {
                mode & !0o111
            });
            std::fs::set_permissions(path, perms)
                .map_err(|e| map_io_error(path, e, "set permissions"))?;
        }
        #[cfg(windows)]
        {
            // Windows doesn't have executable bit in the same way
            let _ = (path, executable);
        }
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// Sibling of `path` used as the rename source, so both live on one filesystem.
fn staging_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.siteforge-tmp"))
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> SiteforgeError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_file_leaves_no_staging_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("package.json");
        let fs = LocalFilesystem::new();

        fs.write_file(&path, "old").unwrap();
        fs.replace_file(&path, "new").unwrap();

        assert_eq!(fs.read_to_string(&path).unwrap(), "new");
        assert!(!staging_path(&path).exists());
    }

    #[test]
    fn replace_file_creates_missing_target() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("package.json");
        let fs = LocalFilesystem::new();

        fs.replace_file(&path, "{}").unwrap();

        assert_eq!(fs.read_to_string(&path).unwrap(), "{}");
    }

    #[cfg(unix)]
    #[test]
    fn replace_file_keeps_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("package.json");
        let fs = LocalFilesystem::new();
        fs.write_file(&path, "old").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o640)).unwrap();

        fs.replace_file(&path, "new").unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o640);
    }

    #[cfg(unix)]
    #[test]
    fn replace_file_writes_through_symlink() {
        let dir = tempfile::tempdir().unwrap();
        let real = dir.path().join("shared.json");
        let link = dir.path().join("package.json");
        let fs = LocalFilesystem::new();
        fs.write_file(&real, "old").unwrap();
        std::os::unix::fs::symlink(&real, &link).unwrap();

        fs.replace_file(&link, "new").unwrap();

        assert!(std::fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(std::fs::read_to_string(&real).unwrap(), "new");
    }

    #[test]
    fn read_missing_file_is_filesystem_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = LocalFilesystem::new()
            .read_to_string(&dir.path().join("nope"))
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
    }

    #[cfg(unix)]
    #[test]
    fn set_permissions_toggles_execute_bits() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pre-commit");
        let fs = LocalFilesystem::new();
        fs.write_file(&path, "#!/bin/sh\n").unwrap();

        fs.set_permissions(&path, true).unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o111, 0o111);

        fs.set_permissions(&path, false).unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o111, 0);
    }
}
