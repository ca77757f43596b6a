//! Application layer errors.
//!
//! These errors represent failures in lookup and I/O, not invalid
//! conventions. Those are `DomainError` from `crate::domain`.

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while locating, materializing or scanning.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// No candidate location holds the requested template package.
    #[error(
        "Template package '{package}' not found (searched: {})",
        join_paths(.probed)
    )]
    TemplateNotFound {
        package: String,
        probed: Vec<PathBuf>,
    },

    /// A required scan root does not exist.
    #[error("Scan root not found: {}", .path.display())]
    ScanRootMissing { path: PathBuf },

    /// Filesystem operation failed.
    #[error("Filesystem error at {}: {reason}", .path.display())]
    FilesystemError { path: PathBuf, reason: String },

    /// Filesystem adapter state unavailable (lock poisoned).
    #[error("Filesystem state is unavailable")]
    StoreLockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TemplateNotFound { package, .. } => vec![
                format!("Install the template package: npm install {}", package),
                "Run the command from the project root (where node_modules lives)".into(),
                "Or add a directory to templates.search_paths in your config".into(),
            ],
            Self::ScanRootMissing { path } => vec![
                format!("Expected a directory at {}", path.display()),
                "Run the command from the project root".into(),
                "Create a module first: endurance new module <NAME>".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have read and write permissions".into(),
                "Files written before the failure were left in place".into(),
            ],
            Self::StoreLockError => vec!["Try again".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TemplateNotFound { .. } | Self::ScanRootMissing { .. } => {
                ErrorCategory::NotFound
            }
            Self::FilesystemError { .. } => ErrorCategory::Io,
            Self::StoreLockError => ErrorCategory::Internal,
        }
    }

    /// Build a `FilesystemError` from an I/O failure.
    pub fn io(path: &Path, operation: &str, err: impl std::fmt::Display) -> Self {
        Self::FilesystemError {
            path: path.to_path_buf(),
            reason: format!("Failed to {}: {}", operation, err),
        }
    }
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_every_probe() {
        let err = ApplicationError::TemplateNotFound {
            package: "endurance-template-module".into(),
            probed: vec![
                PathBuf::from("/w/node_modules/endurance-template-module"),
                PathBuf::from(
                    "/w/node_modules/endurance-core/node_modules/endurance-template-module",
                ),
            ],
        };
        let msg = err.to_string();
        assert!(msg.contains("'endurance-template-module'"));
        assert!(msg.contains("/w/node_modules/endurance-template-module,"));
        assert!(msg.contains("/w/node_modules/endurance-core/node_modules/"));
    }

    #[test]
    fn io_helper_formats_reason() {
        let err = ApplicationError::io(Path::new("/a"), "write file", "disk full");
        assert_eq!(
            err.to_string(),
            "Filesystem error at /a: Failed to write file: disk full"
        );
    }
}
