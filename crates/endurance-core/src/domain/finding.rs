//! Scan inputs and outputs.

use std::path::{Path, PathBuf};

use serde::Serialize;

/// Label used when no owning module can be determined.
pub const UNKNOWN_MODULE: &str = "unknown";

/// One match of a scan pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub symbol: String,
    pub file_path: PathBuf,
    pub module_name: String,
}

/// A directory tree to scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRoot {
    pub path: PathBuf,
    /// Fixed label for every finding under this root. When `None` the label
    /// is taken from the first subdirectory entered.
    pub module_override: Option<String>,
    /// A missing required root fails the scan; a missing optional root
    /// contributes nothing.
    pub required: bool,
}

impl ScanRoot {
    /// Required root whose labels are inferred from its subdirectories.
    pub fn untagged(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            module_override: None,
            required: true,
        }
    }

    /// Optional root whose findings all carry `label`.
    pub fn tagged(path: impl Into<PathBuf>, label: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            module_override: Some(label.into()),
            required: false,
        }
    }
}

/// Findings of one scan, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    pub findings: Vec<Finding>,
    pub files_scanned: usize,
}

impl ScanReport {
    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }

    /// Findings recorded for one file, in textual order.
    pub fn for_file<'a>(&'a self, path: &'a Path) -> impl Iterator<Item = &'a Finding> + 'a {
        self.findings.iter().filter(move |f| f.file_path == path)
    }
}
