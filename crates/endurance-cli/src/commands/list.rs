//! Implementation of the `endurance list` command.

use std::path::Path;

use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use endurance_adapters::LocalFilesystem;
use endurance_core::{
    application::UsageScanner,
    domain::{ScanPattern, ScanReport},
};

use crate::{
    cli::{GlobalArgs, ListCommands, ListFormat},
    commands::resolve_workspace,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// One output row. Paths are shown relative to the workspace.
#[derive(Debug, Serialize)]
struct Row {
    symbol: String,
    file: String,
    module: String,
}

#[instrument(skip_all)]
pub fn execute(
    cmd: ListCommands,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let (pattern, args) = match cmd {
        ListCommands::Events(args) => (ScanPattern::Events, args),
        ListCommands::EnvVars(args) => (ScanPattern::EnvVars, args),
    };
    let workspace = resolve_workspace(global)?;

    let scanner = UsageScanner::new(
        Box::new(LocalFilesystem::new()),
        config.conventions.clone(),
    );
    let roots = scanner.workspace_roots(&workspace)?;
    let report = scanner.scan(&roots, pattern)?;
    debug!(
        findings = report.len(),
        files = report.files_scanned,
        "Scan complete"
    );

    let rows = rows(&report, &workspace);
    match args.format {
        ListFormat::Table => print_table(&rows, pattern, output)?,
        ListFormat::Plain => {
            if rows.is_empty() {
                output.data("no results")?;
            }
            for row in &rows {
                output.data(&format!("{}\t{}\t{}", row.symbol, row.file, row.module))?;
            }
        }
        ListFormat::Json => {
            let json = serde_json::to_string_pretty(&rows)
                .map_err(|source| CliError::RenderFailed { format: "json", source })?;
            output.data(&json)?;
        }
        ListFormat::Csv => {
            output.data("symbol,file,module")?;
            for row in &rows {
                output.data(&format!(
                    "{},{},{}",
                    csv_field(&row.symbol),
                    csv_field(&row.file),
                    csv_field(&row.module)
                ))?;
            }
        }
    }

    Ok(())
}

fn rows(report: &ScanReport, workspace: &Path) -> Vec<Row> {
    report
        .findings
        .iter()
        .map(|f| Row {
            symbol: f.symbol.clone(),
            file: f
                .file_path
                .strip_prefix(workspace)
                .unwrap_or(&f.file_path)
                .display()
                .to_string(),
            module: f.module_name.clone(),
        })
        .collect()
}

/// Findings go through `data()` so `--quiet` only drops the header.
fn print_table(rows: &[Row], pattern: ScanPattern, output: &OutputManager) -> CliResult<()> {
    if rows.is_empty() {
        output.data("no results")?;
        return Ok(());
    }

    let noun = match pattern {
        ScanPattern::Events => "event",
        ScanPattern::EnvVars => "environment variable",
    };
    let plural = if rows.len() == 1 { "" } else { "s" };
    output.header(&format!("{} {noun} usage{plural}:", rows.len()))?;

    let width = rows.iter().map(|r| r.symbol.len()).max().unwrap_or(0);
    for row in rows {
        let module = if output.supports_color() {
            format!("[{}]", row.module.dimmed())
        } else {
            format!("[{}]", row.module)
        };
        output.data(&format!(
            "  {:<width$}  {}  {}",
            row.symbol, row.file, module
        ))?;
    }
    Ok(())
}

/// Quote a CSV field when it contains a separator, quote or newline.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_owned()
    }
}
