// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// Domain errors only ever describe invalid conventions or scan inputs;
/// anything that touches the disk is an `ApplicationError`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Placeholder token cannot be empty")]
    EmptyPlaceholder,

    #[error("Convention '{field}' cannot be empty")]
    EmptyConvention { field: &'static str },

    #[error("Convention '{field}' must be a single path segment, got '{value}'")]
    NotASegment { field: &'static str, value: String },

    #[error("Unknown manifest policy '{0}' (expected 'exclude' or 'verbatim')")]
    UnknownManifestPolicy(String),
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::EmptyPlaceholder => vec![
                "Set conventions.placeholder to a non-empty marker".into(),
                "The default marker is {module-name}".into(),
            ],
            Self::EmptyConvention { field } => vec![
                format!("Give conventions.{} a value in your config file", field),
                "Run: endurance config show to see the effective values".into(),
            ],
            Self::NotASegment { field, .. } => vec![format!(
                "conventions.{} names a single directory or file, remove any '/'",
                field
            )],
            Self::UnknownManifestPolicy(_) => {
                vec!["Use conventions.module_manifest = \"exclude\" or \"verbatim\"".into()]
            }
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::Validation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}
