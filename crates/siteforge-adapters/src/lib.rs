//! Infrastructure adapters for Siteforge.
//!
//! This crate implements the ports defined in `siteforge-core::application::ports`
//! and ships the built-in blueprint. It owns all I/O and child processes.

pub mod builtin_blueprint;
pub mod filesystem;
pub mod process;

// Re-export commonly used adapters
pub use builtin_blueprint::builtin_blueprint;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use process::{RecordingProcessRunner, SystemProcessRunner};
