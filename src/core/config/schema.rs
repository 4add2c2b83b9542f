//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Global Config
//!
//! Located at (in order of precedence):
//! 1. `$VERSIONGATE_CONFIG` if set
//! 2. `<config dir>/versiongate/config.toml` (e.g. `~/.config` on Linux)
//!
//! # Project Config
//!
//! Located at `.versiongate.toml` in the project directory.
//!
//! # Validation
//!
//! Config values are validated after parsing so a typo in a label or a
//! quote set fails loudly instead of silently never matching.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Global configuration (user scope).
///
/// # Example
///
/// ```toml
/// strict = true
/// tag_prefix = "v"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Require exactly one version declaration per input
    pub strict: Option<bool>,

    /// Prefix of release tags
    pub tag_prefix: Option<String>,
}

impl GlobalConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(prefix) = &self.tag_prefix {
            validate_tag_prefix(prefix)?;
        }
        Ok(())
    }
}

/// Project configuration.
///
/// # Example
///
/// ```toml
/// metadata = "pycronofy.egg-info/PKG-INFO"
/// source = "pycronofy/__init__.py"
/// strict = false
///
/// [metadata_format]
/// label = "Version:"
///
/// [source_format]
/// identifier = "__version__"
/// quotes = "'\""
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// Metadata record path, relative to the project directory
    pub metadata: Option<PathBuf>,

    /// Entry-point source path, relative to the project directory
    pub source: Option<PathBuf>,

    /// Require exactly one version declaration per input
    pub strict: Option<bool>,

    /// Prefix of release tags
    pub tag_prefix: Option<String>,

    /// Metadata line shape
    pub metadata_format: Option<MetadataFormatConfig>,

    /// Source assignment shape
    pub source_format: Option<SourceFormatConfig>,
}

impl ProjectConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(prefix) = &self.tag_prefix {
            validate_tag_prefix(prefix)?;
        }
        if let Some(format) = &self.metadata_format {
            format.validate()?;
        }
        if let Some(format) = &self.source_format {
            format.validate()?;
        }
        Ok(())
    }
}

/// `[metadata_format]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct MetadataFormatConfig {
    /// Label that starts the version line (default `Version:`)
    pub label: Option<String>,
}

impl MetadataFormatConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(label) = &self.label {
            validate_label(label)?;
        }
        Ok(())
    }
}

/// `[source_format]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SourceFormatConfig {
    /// Identifier the version is assigned to (default `__version__`)
    pub identifier: Option<String>,

    /// Accepted quote characters (default `'"`)
    pub quotes: Option<String>,
}

impl SourceFormatConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(identifier) = &self.identifier {
            validate_word("source_format.identifier", identifier)?;
        }

        if let Some(quotes) = &self.quotes {
            if quotes.is_empty() {
                return Err(ConfigError::InvalidValue(
                    "source_format.quotes cannot be empty".into(),
                ));
            }
            if let Some(c) = quotes.chars().find(|c| *c != '\'' && *c != '"') {
                return Err(ConfigError::InvalidValue(format!(
                    "source_format.quotes may only contain ' and \", found {:?}",
                    c
                )));
            }
        }

        Ok(())
    }
}

fn validate_word(key: &str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::InvalidValue(format!("{} cannot be empty", key)));
    }
    if value.chars().any(char::is_whitespace) {
        return Err(ConfigError::InvalidValue(format!(
            "{} cannot contain whitespace: '{}'",
            key, value
        )));
    }
    Ok(())
}

/// Labels may contain inner spaces (`version =`) but not surrounding ones.
fn validate_label(label: &str) -> Result<(), ConfigError> {
    if label.is_empty() {
        return Err(ConfigError::InvalidValue(
            "metadata_format.label cannot be empty".into(),
        ));
    }
    if label.trim() != label || label.chars().any(char::is_control) {
        return Err(ConfigError::InvalidValue(format!(
            "metadata_format.label cannot start or end with whitespace: '{}'",
            label
        )));
    }
    Ok(())
}

fn validate_tag_prefix(prefix: &str) -> Result<(), ConfigError> {
    if prefix.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(ConfigError::InvalidValue(format!(
            "tag_prefix cannot contain whitespace: '{}'",
            prefix
        )));
    }
    Ok(())
}
