// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Endurance.
//!
//! Pure values and rules: the placeholder token, the reserved-name
//! conventions, the builtin scan patterns and the finding model. No I/O
//! happens here; the services in `crate::application` reach the disk only
//! through the `Filesystem` port.
//!
// Public API - what the world sees
pub mod conventions;
pub mod error;
pub mod finding;
pub mod pattern;
pub mod placeholder;

// Re-exports for convenience
pub use conventions::{Conventions, ManifestPolicy};
pub use error::{DomainError, ErrorCategory};
pub use finding::{Finding, ScanReport, ScanRoot, UNKNOWN_MODULE};
pub use pattern::ScanPattern;
pub use placeholder::{DEFAULT_PLACEHOLDER, Placeholder};
