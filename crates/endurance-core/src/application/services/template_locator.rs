//! Template Locator - resolve a template package to a directory.
//!
//! A package is looked up under an ordered list of candidate roots. The
//! first `<root>/<package>` that exists wins. Nothing is written, so a
//! missing template fails the whole command before any output exists.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::Conventions,
    error::EnduranceResult,
};

/// Resolves template packages against ordered candidate roots.
pub struct TemplateLocator {
    filesystem: Box<dyn Filesystem>,
    roots: Vec<PathBuf>,
}

impl TemplateLocator {
    /// Create a locator probing `roots` in the given order.
    pub fn new(filesystem: Box<dyn Filesystem>, roots: Vec<PathBuf>) -> Self {
        Self { filesystem, roots }
    }

    /// Standard roots for a workspace:
    ///
    /// 1. `<workspace>/node_modules`
    /// 2. `<workspace>/node_modules/endurance-core/node_modules`
    /// 3. every entry of `extra_roots`, in order
    pub fn for_workspace(
        filesystem: Box<dyn Filesystem>,
        workspace: &Path,
        conventions: &Conventions,
        extra_roots: &[PathBuf],
    ) -> Self {
        let dependencies = workspace.join(&conventions.dependency_dir);
        let nested = dependencies
            .join(&conventions.core_package)
            .join(&conventions.dependency_dir);

        let mut roots = vec![dependencies, nested];
        roots.extend(extra_roots.iter().map(|root| {
            if root.is_absolute() {
                root.clone()
            } else {
                workspace.join(root)
            }
        }));

        Self::new(filesystem, roots)
    }

    /// Every path `locate` would probe for `package`, in probe order.
    pub fn candidates(&self, package: &str) -> Vec<PathBuf> {
        self.roots.iter().map(|root| root.join(package)).collect()
    }

    /// Return the first existing candidate directory for `package`.
    #[instrument(skip(self))]
    pub fn locate(&self, package: &str) -> EnduranceResult<PathBuf> {
        let probed = self.candidates(package);

        for candidate in &probed {
            if self.filesystem.exists(candidate) {
                debug!(path = %candidate.display(), "Template package found");
                return Ok(candidate.clone());
            }
            debug!(path = %candidate.display(), "Template package not at candidate");
        }

        Err(ApplicationError::TemplateNotFound {
            package: package.to_string(),
            probed,
        }
        .into())
    }
}
