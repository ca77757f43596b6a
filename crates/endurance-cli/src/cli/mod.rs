//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "endurance",
    bin_name = "endurance",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Endurance CLI to bootstrap new projects",
    long_about = "Create Endurance projects and modules from their template \
                  packages, and list the events and environment variables \
                  a project uses.",
    after_help = "EXAMPLES:\n\
        \x20 endurance new project\n\
        \x20 endurance new module billing\n\
        \x20 endurance list events\n\
        \x20 endurance list env-vars --format json",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a project or module from a template package.
    #[command(
        visible_alias = "n",
        about = "Create a new project or module",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 endurance new project\n\
            \x20 endurance new module billing"
    )]
    New(NewCommands),

    /// List usages found in the project sources.
    #[command(
        visible_alias = "ls",
        about = "List events or environment variables used by the project",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 endurance list events\n\
            \x20 endurance list env-vars --format csv"
    )]
    List(ListCommands),

    /// Same as `new project`.
    #[command(name = "create-project", hide = true)]
    CreateProject,

    /// Same as `new module`.
    #[command(name = "create-module", hide = true)]
    CreateModule(ModuleArgs),

    /// Same as `list events`.
    #[command(name = "list-events", hide = true)]
    ListEvents(ListArgs),

    /// Same as `list env-vars`.
    #[command(name = "list-env-vars", hide = true)]
    ListEnvVars(ListArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 endurance completions bash > ~/.local/share/bash-completion/completions/endurance\n\
            \x20 endurance completions zsh  > ~/.zfunc/_endurance"
    )]
    Completions(CompletionsArgs),

    /// Inspect or create the configuration file.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 endurance config show\n\
            \x20 endurance config get conventions.package_prefix\n\
            \x20 endurance config init"
    )]
    Config(ConfigCommands),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Subcommands for `endurance new`.
#[derive(Debug, Subcommand)]
pub enum NewCommands {
    /// Copy the project template into the workspace.
    Project,
    /// Create `modules/<NAME>` from the module template.
    Module(ModuleArgs),
}

/// Arguments for `endurance new module`.
#[derive(Debug, Args)]
pub struct ModuleArgs {
    /// Module name, substituted for the placeholder in names and contents.
    #[arg(value_name = "NAME", help = "Module name")]
    pub name: String,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Subcommands for `endurance list`.
#[derive(Debug, Subcommand)]
pub enum ListCommands {
    /// Events emitted through `emit(eventTypes.X)`.
    Events(ListArgs),
    /// Environment variables read through `process.env.X`.
    #[command(name = "env-vars", visible_alias = "env")]
    EnvVars(ListArgs),
}

/// Arguments shared by the `list` subcommands.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// Tab-separated `symbol file module` lines.
    Plain,
    /// JSON array.
    Json,
    /// CSV rows.
    Csv,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `endurance completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `endurance config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML.
    Show,
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `conventions.placeholder`.
        key: String,
    },
    /// Print the path to the configuration file.
    Path,
    /// Write the default configuration file.
    Init {
        /// Overwrite an existing config file.
        #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
        force: bool,
    },
}

// ── tests ─────────────────────────────────────────────────────────────────────
