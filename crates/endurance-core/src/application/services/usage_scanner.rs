//! Usage Scanner - find pattern matches across several source trees.
//!
//! Roots are scanned in the order given and entries in listing order, so
//! the report preserves discovery order. The module label of a finding is
//! the root's override, else the first directory entered below the root,
//! else [`UNKNOWN_MODULE`].

use std::path::Path;

use tracing::{debug, info, instrument};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::{Conventions, Finding, ScanPattern, ScanReport, ScanRoot, UNKNOWN_MODULE},
    error::EnduranceResult,
};

/// Walks scan roots through the `Filesystem` port.
pub struct UsageScanner {
    filesystem: Box<dyn Filesystem>,
    conventions: Conventions,
}

impl UsageScanner {
    pub fn new(filesystem: Box<dyn Filesystem>, conventions: Conventions) -> Self {
        Self {
            filesystem,
            conventions,
        }
    }

    /// Roots scanned by the `list` commands, in visiting order:
    ///
    /// 1. `<workspace>/modules`, required, labels inferred
    /// 2. `<workspace>/node_modules/endurance-core`, labelled with the core label
    /// 3. each `<workspace>/node_modules/edrm-*` directory, labelled with its name
    pub fn workspace_roots(&self, workspace: &Path) -> EnduranceResult<Vec<ScanRoot>> {
        let c = &self.conventions;
        let dependencies = workspace.join(&c.dependency_dir);

        let mut roots = vec![
            ScanRoot::untagged(workspace.join(&c.modules_dir)),
            ScanRoot::tagged(dependencies.join(&c.core_package), c.core_label.clone()),
        ];

        if self.filesystem.is_dir(&dependencies) {
            for entry in self.filesystem.read_dir(&dependencies)? {
                if entry.is_dir()
                    && entry.name != c.core_package
                    && c.is_module_package(&entry.name)
                {
                    roots.push(ScanRoot::tagged(entry.path, entry.name));
                }
            }
        }

        Ok(roots)
    }

    /// Scan every root and concatenate the findings.
    #[instrument(skip(self, roots), fields(roots = roots.len()))]
    pub fn scan(&self, roots: &[ScanRoot], pattern: ScanPattern) -> EnduranceResult<ScanReport> {
        let mut report = ScanReport::default();

        for root in roots {
            if !self.filesystem.is_dir(&root.path) {
                if root.required {
                    return Err(ApplicationError::ScanRootMissing {
                        path: root.path.clone(),
                    }
                    .into());
                }
                debug!(root = %root.path.display(), "Optional root absent");
                continue;
            }

            let before = report.len();
            self.scan_dir(
                &root.path,
                root.module_override.as_deref(),
                pattern,
                &mut report,
            )?;
            debug!(
                root = %root.path.display(),
                findings = report.len() - before,
                "Root scanned"
            );
        }

        info!(
            findings = report.len(),
            files = report.files_scanned,
            "Scan completed"
        );
        Ok(report)
    }

    fn scan_dir(
        &self,
        dir: &Path,
        label: Option<&str>,
        pattern: ScanPattern,
        report: &mut ScanReport,
    ) -> EnduranceResult<()> {
        for entry in self.filesystem.read_dir(dir)? {
            if entry.is_dir() {
                if self.conventions.is_ignored_dir(&entry.name) {
                    continue;
                }
                let label = label.unwrap_or(entry.name.as_str());
                self.scan_dir(&entry.path, Some(label), pattern, report)?;
            } else if self.conventions.is_source_file(&entry.name) {
                let bytes = self.filesystem.read_file(&entry.path)?;
                let text = String::from_utf8_lossy(&bytes);
                report.files_scanned += 1;

                let module_name = label.unwrap_or(UNKNOWN_MODULE);
                report
                    .findings
                    .extend(pattern.extract(&text).into_iter().map(|symbol| Finding {
                        symbol,
                        file_path: entry.path.clone(),
                        module_name: module_name.to_string(),
                    }));
            }
        }
        Ok(())
    }
}
