//! Reserved names the tool relies on.
//!
//! Everything that the scaffolder and the scanner treat as "well known" lives
//! in [`Conventions`]: the placeholder token, the manifest file name, where
//! dependencies are installed, which dependency is the framework core and
//! which prefix marks an installable module package.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::domain::{error::DomainError, placeholder::Placeholder};

/// What templated-module materialization does with the manifest file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManifestPolicy {
    /// Neither copied nor rewritten.
    #[default]
    Exclude,
    /// Copied byte-for-byte, never rewritten.
    Verbatim,
}

impl FromStr for ManifestPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exclude" | "skip" => Ok(Self::Exclude),
            "verbatim" | "copy" => Ok(Self::Verbatim),
            other => Err(DomainError::UnknownManifestPolicy(other.to_string())),
        }
    }
}

impl fmt::Display for ManifestPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exclude => write!(f, "exclude"),
            Self::Verbatim => write!(f, "verbatim"),
        }
    }
}

/// Reserved names shared by the locator, the materializer and the scanner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Conventions {
    pub placeholder: Placeholder,
    pub manifest_file: String,
    pub module_manifest: ManifestPolicy,
    pub dependency_dir: String,
    pub core_package: String,
    pub core_label: String,
    pub package_prefix: String,
    pub modules_dir: String,
    pub source_extension: String,
    pub ignored_dirs: Vec<String>,
    pub project_template: String,
    pub module_template: String,
}

impl Default for Conventions {
    fn default() -> Self {
        Self {
            placeholder: Placeholder::default(),
            manifest_file: "package.json".into(),
            module_manifest: ManifestPolicy::Exclude,
            dependency_dir: "node_modules".into(),
            core_package: "endurance-core".into(),
            core_label: "core".into(),
            package_prefix: "edrm-".into(),
            modules_dir: "modules".into(),
            source_extension: ".js".into(),
            ignored_dirs: vec!["node_modules".into(), ".git".into()],
            project_template: "endurance-template".into(),
            module_template: "endurance-template-module".into(),
        }
    }
}

impl Conventions {
    /// Check that every reserved name is usable.
    ///
    /// The placeholder is validated on construction, so only the plain
    /// string fields are checked here.
    pub fn validate(&self) -> Result<(), DomainError> {
        let required = [
            ("manifest_file", &self.manifest_file),
            ("dependency_dir", &self.dependency_dir),
            ("core_package", &self.core_package),
            ("core_label", &self.core_label),
            ("package_prefix", &self.package_prefix),
            ("modules_dir", &self.modules_dir),
            ("source_extension", &self.source_extension),
            ("project_template", &self.project_template),
            ("module_template", &self.module_template),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(DomainError::EmptyConvention { field });
            }
        }

        let segments = [
            ("manifest_file", &self.manifest_file),
            ("dependency_dir", &self.dependency_dir),
            ("core_package", &self.core_package),
            ("package_prefix", &self.package_prefix),
        ];
        for (field, value) in segments {
            if value.contains('/') || value.contains('\\') {
                return Err(DomainError::NotASegment {
                    field,
                    value: value.clone(),
                });
            }
        }

        Ok(())
    }

    /// True if `name` is the manifest file name.
    pub fn is_manifest(&self, name: &str) -> bool {
        name == self.manifest_file
    }

    /// True if `name` ends with the recognised source extension.
    pub fn is_source_file(&self, name: &str) -> bool {
        name.ends_with(self.source_extension.as_str())
    }

    /// True if the scanner must not descend into a directory called `name`.
    pub fn is_ignored_dir(&self, name: &str) -> bool {
        self.ignored_dirs.iter().any(|d| d == name)
    }

    /// True if `name` is an auto-discovered module package directory.
    pub fn is_module_package(&self, name: &str) -> bool {
        name.starts_with(self.package_prefix.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(Conventions::default().validate().is_ok());
    }

    #[test]
    fn empty_field_rejected() {
        let conventions = Conventions {
            dependency_dir: "  ".into(),
            ..Conventions::default()
        };
        assert_eq!(
            conventions.validate(),
            Err(DomainError::EmptyConvention {
                field: "dependency_dir"
            })
        );
    }

    #[test]
    fn nested_manifest_rejected() {
        let conventions = Conventions {
            manifest_file: "config/package.json".into(),
            ..Conventions::default()
        };
        assert!(matches!(
            conventions.validate(),
            Err(DomainError::NotASegment {
                field: "manifest_file",
                ..
            })
        ));
    }

    #[test]
    fn modules_dir_may_be_nested() {
        let conventions = Conventions {
            modules_dir: "src/modules".into(),
            ..Conventions::default()
        };
        assert!(conventions.validate().is_ok());
    }

    #[test]
    fn name_predicates() {
        let c = Conventions::default();
        assert!(c.is_manifest("package.json"));
        assert!(!c.is_manifest("package.json.bak"));
        assert!(c.is_source_file("user.listener.js"));
        assert!(!c.is_source_file("user.listener.ts"));
        assert!(c.is_ignored_dir("node_modules"));
        assert!(c.is_module_package("edrm-user"));
        assert!(!c.is_module_package("express"));
    }

    #[test]
    fn manifest_policy_parses() {
        assert_eq!("exclude".parse(), Ok(ManifestPolicy::Exclude));
        assert_eq!("Verbatim".parse(), Ok(ManifestPolicy::Verbatim));
        assert!("rewrite".parse::<ManifestPolicy>().is_err());
    }
}
