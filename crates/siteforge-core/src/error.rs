//! Unified error handling for Siteforge Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Siteforge Core operations.
#[derive(Debug, Error, Clone)]
pub enum SiteforgeError {
    /// Errors from the domain layer (manifest or blueprint violations).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (I/O and external tools).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl SiteforgeError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Internal { .. } => vec![
                "This appears to be a bug in Siteforge".into(),
                "Please report this issue at: https://github.com/cosecruz/siteforge/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => e.category(),
            Self::Application(e) => e.category(),
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Error categories for UI display and exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The project on disk is in a state we refuse to touch.
    Validation,
    NotFound,
    /// An external tool failed or could not be started.
    ExternalTool,
    Internal,
}

/// Convenient result type alias.
pub type SiteforgeResult<T> = Result<T, SiteforgeError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn manifest_parse_failure_is_validation() {
        let err: SiteforgeError = DomainError::ManifestParse {
            reason: "expected value at line 1".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn tool_failure_is_external() {
        let err: SiteforgeError = ApplicationError::ToolFailed {
            command: "npm install".into(),
            status: Some(1),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::ExternalTool);
        assert!(!err.suggestions().is_empty());
    }

    #[test]
    fn filesystem_error_suggests_permissions() {
        let err: SiteforgeError = ApplicationError::FilesystemError {
            path: PathBuf::from("/tmp/x"),
            reason: "denied".into(),
        }
        .into();
        assert!(err.suggestions().iter().any(|s| s.contains("permissions")));
    }
}
