//! Infrastructure adapters for Endurance.
//!
//! This crate implements the ports defined in `endurance-core::application::ports`.
//! It contains all direct filesystem access.

pub mod filesystem;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
