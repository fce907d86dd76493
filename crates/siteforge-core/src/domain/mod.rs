//! Core domain layer for Siteforge.
//!
//! Pure logic only: the scaffold table, the `package.json` merge rules and
//! the package-manager command model. All I/O goes through the ports defined
//! in the application layer.
//!
//! - **No I/O**: No filesystem, network, or process calls
//! - **Synchronous**: Nothing here blocks or spawns

pub mod blueprint;
pub mod common;
pub mod error;
pub mod manifest;
pub mod package_manager;
pub mod render;

pub use blueprint::{
    Blueprint, DevDependency, FileEntry, ScriptAlias, ScriptPolicy, Stage, TemplateContent,
    WritePolicy,
};
pub use common::{Permissions, RelativePath};
pub use error::DomainError;
pub use manifest::{Manifest, ScriptChange};
pub use package_manager::{Invocation, PackageManager};
pub use render::{RenderContext, package_name_from};
