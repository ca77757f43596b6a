//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only sees the [`Conventions`] it
//! carries.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables, `ENDURANCE_<SECTION>__<KEY>`
//!    (e.g. `ENDURANCE_CONVENTIONS__PACKAGE_PREFIX=acme-`)
//! 3. Config file (`--config FILE`, else [`AppConfig::config_path`])
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use endurance_core::domain::Conventions;

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "ENDURANCE";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Naming conventions shared by scaffolding and scanning.
    pub conventions: Conventions,
    /// Template lookup settings.
    pub templates: TemplateConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Extra directories probed for template packages, after the workspace's
    /// own dependency directories. Relative paths resolve against the
    /// workspace.
    pub search_paths: Vec<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl AppConfig {
    /// Load configuration from defaults, the config file and the environment.
    ///
    /// An explicit `config_file` must exist when `require_explicit` is set;
    /// the default location is always optional. The merged conventions are
    /// validated before returning.
    pub fn load(config_file: Option<&PathBuf>, require_explicit: bool) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), require_explicit),
            None => (Self::config_path(), false),
        };
        tracing::debug!(path = %path.display(), required, "Loading configuration");

        let settings = Self::builder(&path, required)?
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;

        Self::from_settings(settings)
    }

    /// Parse configuration from TOML text layered over the defaults.
    #[cfg(test)]
    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        let settings = Config::builder()
            .add_source(Self::defaults()?)
            .add_source(File::from_str(text, FileFormat::Toml))
            .build()
            .context("Failed to parse configuration")?;

        Self::from_settings(settings)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.endurance.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "endurance", "endurance")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".endurance.toml"))
    }

    /// The default configuration rendered as TOML.
    pub fn default_toml() -> anyhow::Result<String> {
        toml::to_string_pretty(&Self::default()).context("Failed to serialise default config")
    }

    fn defaults() -> anyhow::Result<Config> {
        Config::try_from(&Self::default()).context("Failed to build default configuration")
    }

    fn builder(
        path: &Path,
        required: bool,
    ) -> anyhow::Result<config::ConfigBuilder<config::builder::DefaultState>> {
        Ok(Config::builder()
            .add_source(Self::defaults()?)
            .add_source(File::from(path).format(FileFormat::Toml).required(required)))
    }

    fn from_settings(settings: Config) -> anyhow::Result<Self> {
        let config: Self = settings
            .try_deserialize()
            .context("Invalid configuration")?;
        config
            .conventions
            .validate()
            .context("Invalid conventions")?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use endurance_core::domain::ManifestPolicy;

    #[test]
    fn defaults_follow_endurance_layout() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.conventions.placeholder.as_str(), "{module-name}");
        assert_eq!(cfg.conventions.package_prefix, "edrm-");
        assert!(cfg.templates.search_paths.is_empty());
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn file_overrides_single_key() {
        let cfg = AppConfig::from_toml(
            r#"
            [conventions]
            package_prefix = "acme-"
            module_manifest = "verbatim"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.conventions.package_prefix, "acme-");
        assert_eq!(cfg.conventions.module_manifest, ManifestPolicy::Verbatim);
        // untouched keys keep their defaults
        assert_eq!(cfg.conventions.modules_dir, "modules");
    }

    #[test]
    fn search_paths_from_file() {
        let cfg = AppConfig::from_toml(
            r#"
            [templates]
            search_paths = ["vendor/templates", "/opt/endurance"]
            "#,
        )
        .unwrap();

        assert_eq!(
            cfg.templates.search_paths,
            vec![
                PathBuf::from("vendor/templates"),
                PathBuf::from("/opt/endurance")
            ]
        );
    }

    #[test]
    fn empty_placeholder_is_rejected() {
        let result = AppConfig::from_toml(
            r#"
            [conventions]
            placeholder = ""
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn nested_path_in_prefix_is_rejected() {
        let result = AppConfig::from_toml(
            r#"
            [conventions]
            package_prefix = "scope/edrm-"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn explicit_missing_file_is_error() {
        let missing = PathBuf::from("/definitely/not/here/endurance.toml");
        assert!(AppConfig::load(Some(&missing), true).is_err());
    }

    #[test]
    fn optional_missing_file_yields_defaults() {
        let missing = PathBuf::from("/definitely/not/here/endurance.toml");
        let cfg = AppConfig::load(Some(&missing), false).unwrap();
        assert_eq!(cfg.conventions.modules_dir, "modules");
    }

    #[test]
    fn explicit_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("endurance.toml");
        std::fs::write(&path, "[conventions]\nmodules_dir = \"src/modules\"\n").unwrap();

        let cfg = AppConfig::load(Some(&path), true).unwrap();
        assert_eq!(cfg.conventions.modules_dir, "src/modules");
    }

    #[test]
    fn default_toml_round_trips() {
        let text = AppConfig::default_toml().unwrap();
        let cfg = AppConfig::from_toml(&text).unwrap();
        assert_eq!(cfg.conventions.core_package, "endurance-core");
    }

    #[test]
    fn config_path_is_not_empty() {
        let p = AppConfig::config_path();
        assert!(!p.as_os_str().is_empty());
    }
}
