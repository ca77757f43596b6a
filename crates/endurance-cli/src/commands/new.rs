//! Implementation of the `endurance new` command.
//!
//! Responsibility: locate the template package, materialize it into the
//! workspace, and display results. Substitution rules live in the core.

use std::path::Path;

use tracing::{debug, instrument};

use endurance_adapters::LocalFilesystem;
use endurance_core::application::{
    MaterializeMode, MaterializeSummary, TemplateLocator, TreeMaterializer,
};

use crate::{
    cli::{GlobalArgs, NewCommands},
    commands::resolve_workspace,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Execute `endurance new project|module`.
pub fn execute(
    cmd: NewCommands,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let workspace = resolve_workspace(global)?;

    match cmd {
        NewCommands::Project => create_project(&workspace, config, output),
        NewCommands::Module(args) => create_module(&workspace, &args.name, config, output),
    }
}

/// Copy the project template into the workspace as-is.
#[instrument(skip_all, fields(workspace = %workspace.display()))]
fn create_project(workspace: &Path, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let conventions = &config.conventions;
    let template = locator(workspace, config).locate(&conventions.project_template)?;
    debug!(template = %template.display(), "Project template located");

    let summary = TreeMaterializer::new(Box::new(LocalFilesystem::new()), conventions.clone())
        .materialize(&template, workspace, &MaterializeMode::WholeTree)?;

    output.success("Project created successfully")?;
    report(&summary, output)
}

/// Materialize the module template into `<modules_dir>/<name>`.
///
/// The name is not validated; an empty name collapses placeholder segments.
#[instrument(skip_all, fields(module = %name))]
fn create_module(
    workspace: &Path,
    name: &str,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let conventions = &config.conventions;
    let template = locator(workspace, config).locate(&conventions.module_template)?;
    let destination = workspace.join(&conventions.modules_dir).join(name);
    debug!(
        template = %template.display(),
        destination = %destination.display(),
        "Module template located"
    );

    let summary = TreeMaterializer::new(Box::new(LocalFilesystem::new()), conventions.clone())
        .materialize(&template, &destination, &MaterializeMode::module(name))?;

    output.success(&format!(
        "Module '{}' created at {}",
        name,
        destination.display()
    ))?;
    report(&summary, output)
}

fn locator(workspace: &Path, config: &AppConfig) -> TemplateLocator {
    TemplateLocator::for_workspace(
        Box::new(LocalFilesystem::new()),
        workspace,
        &config.conventions,
        &config.templates.search_paths,
    )
}

fn report(summary: &MaterializeSummary, output: &OutputManager) -> CliResult<()> {
    output.info(&format!(
        "{} files copied ({} rewritten), {} directories created",
        summary.files_copied, summary.files_rewritten, summary.directories_created
    ))?;
    if summary.files_verbatim > 0 {
        output.warning(&format!(
            "{} non-text files copied without substitution",
            summary.files_verbatim
        ))?;
    }
    Ok(())
}
