//! The placeholder token recognised in template path segments and contents.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Marker used by the stock Endurance module template.
pub const DEFAULT_PLACEHOLDER: &str = "{module-name}";

/// A non-empty literal marker. Every occurrence is a substitution site.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Placeholder(String);

impl Placeholder {
    pub fn new(token: impl Into<String>) -> Result<Self, DomainError> {
        let token = token.into();
        if token.is_empty() {
            return Err(DomainError::EmptyPlaceholder);
        }
        Ok(Self(token))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Replace every occurrence of the token in `text` with `value`.
    ///
    /// An empty `value` is valid and simply removes the token.
    pub fn substitute(&self, text: &str, value: &str) -> String {
        text.replace(self.0.as_str(), value)
    }

    pub fn occurs_in(&self, text: &str) -> bool {
        text.contains(self.0.as_str())
    }
}

impl Default for Placeholder {
    fn default() -> Self {
        Self(DEFAULT_PLACEHOLDER.to_string())
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Placeholder {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Placeholder> for String {
    fn from(value: Placeholder) -> Self {
        value.0
    }
}
