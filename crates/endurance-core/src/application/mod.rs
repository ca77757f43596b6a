//! Application layer for Endurance.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (TemplateLocator, TreeMaterializer, UsageScanner)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! Substitution and extraction rules live in `crate::domain`; this layer
//! only walks trees and moves bytes through the ports.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    MaterializeMode, MaterializeSummary, TemplateLocator, TreeMaterializer, UsageScanner,
};

// Re-export port traits (for adapter implementation)
pub use ports::{DirEntry, EntryKind, Filesystem};

pub use error::ApplicationError;
