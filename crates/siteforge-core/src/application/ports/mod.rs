//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `siteforge-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `ProcessRunner`: External tool invocation (package manager, hook manager)

pub mod output;

pub use output::{Filesystem, ProcessRunner};

#[cfg(test)]
pub use output::MockProcessRunner;
