//! Application layer for Siteforge.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ScaffoldService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Report**: What a run did, step by step
//! - **Errors**: Application-specific error types
//!
//! The application layer sequences the domain layer but holds no
//! scaffolding rules itself. Policies live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod report;
pub mod services;

pub use services::{MANIFEST_FILE, ScaffoldOptions, ScaffoldService};

// Re-export port traits (for adapter implementation)
pub use ports::{Filesystem, ProcessRunner};

pub use report::{Action, Outcome, ScaffoldReport, Step, StepReport};

pub use error::ApplicationError;
