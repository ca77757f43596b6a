//! Tree Materializer - reproduce a template tree at a destination.
//!
//! Two modes:
//! 1. Whole tree: byte-identical copy, manifest included (new project)
//! 2. Templated module: every entry name and every non-manifest file's text
//!    has the placeholder replaced by the module name (new module)
//!
//! The first failure aborts the walk. Files written before it stay on disk.

use std::path::Path;

use tracing::{debug, info, instrument};

use crate::{
    application::ports::{DirEntry, Filesystem},
    domain::{Conventions, ManifestPolicy},
    error::EnduranceResult,
};

/// How the source tree is reproduced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaterializeMode {
    WholeTree,
    TemplatedModule { module_name: String },
}

impl MaterializeMode {
    pub fn module(name: impl Into<String>) -> Self {
        Self::TemplatedModule {
            module_name: name.into(),
        }
    }
}

/// Counts of what a materialization did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaterializeSummary {
    pub directories_created: usize,
    pub files_copied: usize,
    /// Copied files whose text went through placeholder substitution.
    pub files_rewritten: usize,
    /// Copied files left untouched because they are not valid UTF-8.
    pub files_verbatim: usize,
    /// Manifest files skipped under the exclude policy.
    pub files_excluded: usize,
}

/// Copies template trees through the `Filesystem` port.
pub struct TreeMaterializer {
    filesystem: Box<dyn Filesystem>,
    conventions: Conventions,
}

impl TreeMaterializer {
    pub fn new(filesystem: Box<dyn Filesystem>, conventions: Conventions) -> Self {
        Self {
            filesystem,
            conventions,
        }
    }

    /// Materialize `source` into `dest`.
    ///
    /// `dest` is created first, so an empty template still yields an empty
    /// destination directory.
    #[instrument(
        skip_all,
        fields(source = %source.display(), dest = %dest.display(), mode = ?mode)
    )]
    pub fn materialize(
        &self,
        source: &Path,
        dest: &Path,
        mode: &MaterializeMode,
    ) -> EnduranceResult<MaterializeSummary> {
        let mut summary = MaterializeSummary::default();

        self.filesystem.create_dir_all(dest)?;
        summary.directories_created += 1;

        self.copy_dir(source, dest, mode, &mut summary)?;

        info!(
            directories = summary.directories_created,
            files = summary.files_copied,
            rewritten = summary.files_rewritten,
            excluded = summary.files_excluded,
            "Materialization completed"
        );
        Ok(summary)
    }

    fn copy_dir(
        &self,
        source: &Path,
        dest: &Path,
        mode: &MaterializeMode,
        summary: &mut MaterializeSummary,
    ) -> EnduranceResult<()> {
        for entry in self.filesystem.read_dir(source)? {
            let target = dest.join(self.target_name(&entry.name, mode));

            if entry.is_dir() {
                self.filesystem.create_dir_all(&target)?;
                summary.directories_created += 1;
                self.copy_dir(&entry.path, &target, mode, summary)?;
            } else {
                self.copy_file(&entry, &target, mode, summary)?;
            }
        }
        Ok(())
    }

    fn copy_file(
        &self,
        entry: &DirEntry,
        target: &Path,
        mode: &MaterializeMode,
        summary: &mut MaterializeSummary,
    ) -> EnduranceResult<()> {
        let module_name = match mode {
            MaterializeMode::WholeTree => {
                self.filesystem.copy_file(&entry.path, target)?;
                summary.files_copied += 1;
                return Ok(());
            }
            MaterializeMode::TemplatedModule { module_name } => module_name,
        };

        let is_manifest = self.conventions.is_manifest(&entry.name);
        if is_manifest && self.conventions.module_manifest == ManifestPolicy::Exclude {
            debug!(path = %entry.path.display(), "Manifest excluded");
            summary.files_excluded += 1;
            return Ok(());
        }

        self.filesystem.copy_file(&entry.path, target)?;
        summary.files_copied += 1;

        if is_manifest {
            return Ok(());
        }

        let bytes = self.filesystem.read_file(target)?;
        match String::from_utf8(bytes) {
            Ok(text) => {
                let rendered = self.conventions.placeholder.substitute(&text, module_name);
                self.filesystem.write_file(target, &rendered)?;
                summary.files_rewritten += 1;
            }
            Err(_) => {
                debug!(path = %target.display(), "Not UTF-8, kept verbatim");
                summary.files_verbatim += 1;
            }
        }
        Ok(())
    }

    fn target_name(&self, name: &str, mode: &MaterializeMode) -> String {
        match mode {
            MaterializeMode::WholeTree => name.to_string(),
            MaterializeMode::TemplatedModule { module_name } => {
                self.conventions.placeholder.substitute(name, module_name)
            }
        }
    }
}
