use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Serialize, Serializer};

/// A filesystem path guaranteed to be **relative**.
///
/// Blueprint entries are resolved against the target directory at run time,
/// so an absolute path here would escape the project. Enforced at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelativePath(PathBuf);

impl RelativePath {
    /// Create a new relative path.
    ///
    /// # Panics
    /// Panics if path is absolute.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        assert!(
            !path.is_absolute(),
            "RelativePath cannot be absolute: {path:?}"
        );
        Self(path)
    }

    /// True if `self` lives at or under `other`.
    pub fn starts_with(&self, other: &RelativePath) -> bool {
        self.0.starts_with(&other.0)
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl From<&str> for RelativePath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Forward slashes everywhere so reports read the same on every OS.
        let shown: Vec<_> = self
            .0
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect();
        write!(f, "{}", shown.join("/"))
    }
}

impl Serialize for RelativePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Mode bits the scaffolder manages on a written file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Permissions {
    executable: bool,
}

impl Permissions {
    pub const fn executable() -> Self {
        Self { executable: true }
    }

    pub const fn executable_flag(&self) -> bool {
        self.executable
    }
}
