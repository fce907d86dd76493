// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

use crate::error::ErrorCategory;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Manifest Errors
    // ========================================================================
    #[error("package.json is not valid JSON: {reason}")]
    ManifestParse { reason: String },

    #[error("package.json field '{field}' must be {expected}")]
    ManifestShape {
        field: String,
        expected: &'static str,
    },

    // ========================================================================
    // Blueprint Errors
    // ========================================================================
    #[error("Invalid blueprint: {0}")]
    InvalidBlueprint(String),

    #[error("Duplicate path in blueprint: {path}")]
    DuplicatePath { path: String },

    #[error("Duplicate script alias in blueprint: {name}")]
    DuplicateScript { name: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("'{path}' is gated on '{gate}' but does not live under it")]
    GateMismatch { path: String, gate: String },

    // ========================================================================
    // Lookup Errors
    // ========================================================================
    #[error("Unknown package manager '{0}'")]
    UnknownPackageManager(String),
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ManifestParse { reason } => vec![
                format!("Details: {reason}"),
                "Fix the syntax error in package.json and run again".into(),
                "Nothing was written to package.json".into(),
            ],
            Self::ManifestShape { field, expected } => vec![
                format!("'{field}' in package.json must be {expected}"),
                "Fix the field by hand; siteforge never rewrites unexpected shapes".into(),
            ],
            Self::UnknownPackageManager(name) => vec![
                format!("'{name}' is not supported"),
                "Supported package managers: npm, pnpm, yarn".into(),
            ],
            _ => vec!["The built-in blueprint is inconsistent; please report this".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ManifestParse { .. }
            | Self::ManifestShape { .. }
            | Self::UnknownPackageManager(_) => ErrorCategory::Validation,
            _ => ErrorCategory::Internal,
        }
    }
}
