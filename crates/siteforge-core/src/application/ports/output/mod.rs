//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `siteforge-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::Invocation;
use crate::error::SiteforgeResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `siteforge_adapters::filesystem::LocalFilesystem` (production)
/// - `siteforge_adapters::filesystem::MemoryFilesystem` (testing)
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> SiteforgeResult<()>;

    /// Write content to a file, truncating any existing content.
    fn write_file(&self, path: &Path, content: &str) -> SiteforgeResult<()>;

    /// Replace a file so readers see either the old or the new content,
    /// never a truncated one.
    fn replace_file(&self, path: &Path, content: &str) -> SiteforgeResult<()>;

    /// Read a UTF-8 file.
    fn read_to_string(&self, path: &Path) -> SiteforgeResult<String>;

    /// Set file permissions.
    fn set_permissions(&self, path: &Path, executable: bool) -> SiteforgeResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Port for running external command-line tools.
///
/// Implemented by:
/// - `siteforge_adapters::process::SystemProcessRunner` (production)
/// - `siteforge_adapters::process::RecordingProcessRunner` (testing)
///
/// Tools write straight to the user's terminal; the runner only reports
/// whether they succeeded.
#[cfg_attr(test, mockall::automock)]
pub trait ProcessRunner: Send + Sync {
    /// Whether `program` can be started at all.
    fn is_available(&self, program: &str) -> bool;

    /// Run to completion in `cwd`. A non-zero exit is an error.
    fn run(&self, invocation: &Invocation, cwd: &Path) -> SiteforgeResult<()>;
}
