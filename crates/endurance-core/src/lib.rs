//! Endurance Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Endurance
//! command-line tool: scaffolding projects and modules from template
//! packages, and listing the events and environment variables a workspace
//! uses.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          endurance-cli (CLI)            │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (TemplateLocator, TreeMaterializer,    │
//! │   UsageScanner)                         │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Filesystem)     │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    endurance-adapters (Infrastructure)  │
//! │   (LocalFilesystem, MemoryFilesystem)   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use endurance_core::{
//!     application::{MaterializeMode, TemplateLocator, TreeMaterializer},
//!     domain::Conventions,
//! };
//! # fn fs() -> Box<dyn endurance_core::application::Filesystem> { unimplemented!() }
//!
//! let conventions = Conventions::default();
//! let workspace = Path::new(".");
//!
//! let locator = TemplateLocator::for_workspace(fs(), workspace, &conventions, &[]);
//! let template = locator.locate(&conventions.module_template).unwrap();
//!
//! let materializer = TreeMaterializer::new(fs(), conventions);
//! materializer
//!     .materialize(&template, &workspace.join("modules/billing"), &MaterializeMode::module("billing"))
//!     .unwrap();
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        MaterializeMode, MaterializeSummary, TemplateLocator, TreeMaterializer, UsageScanner,
        ports::{DirEntry, EntryKind, Filesystem},
    };
    pub use crate::domain::{
        Conventions, Finding, ManifestPolicy, Placeholder, ScanPattern, ScanReport, ScanRoot,
    };
    pub use crate::error::{EnduranceError, EnduranceResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
