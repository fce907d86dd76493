//! Application layer errors.
//!
//! These errors represent failures in orchestration (I/O, external tools),
//! not manifest or blueprint rules. Those are `DomainError`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// A step needed `package.json` and it was not there.
    #[error("No package.json found at {path}")]
    ManifestMissing { path: PathBuf },

    /// External tool binary is not on `PATH`.
    #[error("'{program}' was not found on PATH")]
    ToolUnavailable { program: String },

    /// External tool ran and reported failure.
    #[error("`{command}` failed{}", .status.map(|c| format!(" with exit code {c}")).unwrap_or_default())]
    ToolFailed {
        command: String,
        status: Option<i32>,
    },

    /// Adapter state lock poisoned.
    #[error("Filesystem state lock poisoned")]
    LockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Files written before this point were left in place".into(),
            ],
            Self::ManifestMissing { path } => vec![
                format!("Expected a manifest at {}", path.display()),
                "Re-run siteforge; the first step creates it".into(),
            ],
            Self::ToolUnavailable { program } => vec![
                format!("Install '{program}' and make sure it is on your PATH"),
                "Or pass --skip-install to write files without invoking tools".into(),
            ],
            Self::ToolFailed { command, .. } => vec![
                format!("See the output of `{command}` above"),
                "Check your network connection and registry settings".into(),
                "Re-running is safe: every step is idempotent".into(),
            ],
            Self::LockError => vec!["Try again in a moment".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FilesystemError { .. } | Self::LockError => ErrorCategory::Internal,
            Self::ManifestMissing { .. } => ErrorCategory::NotFound,
            Self::ToolUnavailable { .. } | Self::ToolFailed { .. } => ErrorCategory::ExternalTool,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_failed_message_includes_status() {
        let err = ApplicationError::ToolFailed {
            command: "npm install --save-dev prettier".into(),
            status: Some(1),
        };
        assert_eq!(
            err.to_string(),
            "`npm install --save-dev prettier` failed with exit code 1"
        );
    }

    #[test]
    fn tool_failed_without_status() {
        let err = ApplicationError::ToolFailed {
            command: "npx husky".into(),
            status: None,
        };
        assert_eq!(err.to_string(), "`npx husky` failed");
    }

    #[test]
    fn unavailable_suggests_skip_install() {
        let err = ApplicationError::ToolUnavailable {
            program: "pnpm".into(),
        };
        assert!(err.suggestions().iter().any(|s| s.contains("--skip-install")));
    }
}
