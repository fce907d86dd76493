//! Siteforge Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Siteforge
//! static-site scaffolder, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          siteforge-cli (CLI)            │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │            (ScaffoldService)            │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │      (Filesystem, ProcessRunner)        │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    siteforge-adapters (Infrastructure)  │
//! │ (LocalFilesystem, SystemProcessRunner)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │     (Blueprint, Manifest, Policies)     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use siteforge_core::{
//!     application::{ScaffoldOptions, ScaffoldService},
//!     domain::PackageManager,
//! };
//!
//! let service = ScaffoldService::new(
//!     blueprint,  // e.g. siteforge_adapters::builtin_blueprint()
//!     filesystem, // impl Filesystem
//!     runner,     // impl ProcessRunner
//!     ScaffoldOptions::new(PackageManager::Npm),
//! );
//! let report = service.run("./my-site").unwrap();
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        Outcome, ScaffoldOptions, ScaffoldReport, ScaffoldService, Step, StepReport,
        ports::{Filesystem, ProcessRunner},
    };
    pub use crate::domain::{
        Blueprint, FileEntry, Invocation, Manifest, PackageManager, RelativePath, RenderContext,
        ScriptAlias, ScriptPolicy, Stage, TemplateContent, WritePolicy,
    };
    pub use crate::error::{SiteforgeError, SiteforgeResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
