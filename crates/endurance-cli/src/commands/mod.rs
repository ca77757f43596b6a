//! Command handlers. Each one turns parsed arguments into core service calls
//! and prints the outcome; no business logic lives here.

use std::path::PathBuf;

use crate::{
    cli::GlobalArgs,
    error::{CliResult, IntoCli},
};

pub mod completions;
pub mod config;
pub mod list;
pub mod new;

/// The project root: `--workspace` if given, else the current directory.
pub(crate) fn resolve_workspace(global: &GlobalArgs) -> CliResult<PathBuf> {
    match &global.workspace {
        Some(dir) => Ok(dir.clone()),
        None => std::env::current_dir().with_cli_context(|| "Failed to read current directory"),
    }
}
