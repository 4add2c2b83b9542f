//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! versiongate has two configuration scopes:
//! - **Global**: User-level defaults (strictness, tag prefix)
//! - **Project**: Per-package input paths and line formats
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Project config file
//! 4. CLI flags (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$VERSIONGATE_CONFIG` if set
//! 2. `<config dir>/versiongate/config.toml`
//!
//! # Project Config Location
//!
//! `<project dir>/.versiongate.toml`
//!
//! # Example
//!
//! ```no_run
//! use versiongate::core::config::Config;
//! use std::path::Path;
//!
//! let result = Config::load(Path::new("/path/to/project")).unwrap();
//! let config = result.config;
//!
//! println!("Strict: {}", config.strict());
//! println!("Tag prefix: {}", config.tag_prefix());
//! ```

pub mod schema;

pub use schema::{GlobalConfig, MetadataFormatConfig, ProjectConfig, SourceFormatConfig};

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::core::extract::{MetadataFormat, SourceFormat, DEFAULT_IDENTIFIER, DEFAULT_LABEL};

/// Environment variable naming the global config file.
pub const CONFIG_ENV: &str = "VERSIONGATE_CONFIG";

/// File name of the project config.
pub const PROJECT_CONFIG_FILE: &str = ".versiongate.toml";

/// Tag prefix used when none is configured.
pub const DEFAULT_TAG_PREFIX: &str = "v";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Warnings generated during config loading.
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    /// The warning message.
    pub message: String,
    /// The path that triggered the warning.
    pub path: PathBuf,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// Any warnings generated during loading.
    pub warnings: Vec<ConfigWarning>,
}

/// Merged configuration from all sources.
///
/// Accessors apply precedence rules automatically. Project config
/// overrides global config.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: GlobalConfig,
    /// Project configuration (if present)
    pub project: Option<ProjectConfig>,
    /// Path to the global config file (if loaded)
    global_path: Option<PathBuf>,
    /// Path to the project config file (if loaded)
    project_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from default locations for a project directory.
    ///
    /// # Errors
    ///
    /// Returns an error if config files exist but cannot be read, parsed
    /// or validated. Missing config files are not an error.
    pub fn load(project_dir: &Path) -> Result<ConfigLoadResult, ConfigError> {
        let mut warnings = Vec::new();
        let global_path = Self::global_candidate(&mut warnings);
        let mut result = Self::load_from(global_path.as_deref(), project_dir)?;
        warnings.append(&mut result.warnings);
        result.warnings = warnings;
        Ok(result)
    }

    /// Load configuration with an explicit global config path.
    ///
    /// `global_path` that does not exist is treated as absent.
    pub fn load_from(
        global_path: Option<&Path>,
        project_dir: &Path,
    ) -> Result<ConfigLoadResult, ConfigError> {
        let (global, global_path) = match global_path.filter(|p| p.is_file()) {
            Some(path) => (read_toml::<GlobalConfig>(path)?, Some(path.to_path_buf())),
            None => (GlobalConfig::default(), None),
        };

        let candidate = Self::project_config_path(project_dir);
        let (project, project_path) = if candidate.is_file() {
            (Some(read_toml::<ProjectConfig>(&candidate)?), Some(candidate))
        } else {
            (None, None)
        };

        global.validate()?;
        if let Some(ref p) = project {
            p.validate()?;
        }

        Ok(ConfigLoadResult {
            config: Config {
                global,
                project,
                global_path,
                project_path,
            },
            warnings: Vec::new(),
        })
    }

    /// Resolve the global config file location.
    fn global_candidate(warnings: &mut Vec<ConfigWarning>) -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            let path = PathBuf::from(path);
            if !path.exists() {
                warnings.push(ConfigWarning {
                    message: format!("${} points to a missing file, ignoring it", CONFIG_ENV),
                    path: path.clone(),
                });
            }
            return Some(path);
        }

        dirs::config_dir().map(|dir| dir.join("versiongate/config.toml"))
    }

    /// Get the path of the project config for a directory.
    pub fn project_config_path(project_dir: &Path) -> PathBuf {
        project_dir.join(PROJECT_CONFIG_FILE)
    }

    /// Path of the global config file that was loaded, if any.
    pub fn global_path(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Path of the project config file that was loaded, if any.
    pub fn project_path(&self) -> Option<&Path> {
        self.project_path.as_deref()
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    /// Whether exactly one declaration per input is required.
    ///
    /// Defaults to `false` (first match wins).
    pub fn strict(&self) -> bool {
        self.project
            .as_ref()
            .and_then(|p| p.strict)
            .or(self.global.strict)
            .unwrap_or(false)
    }

    /// Prefix of release tags.
    ///
    /// Defaults to `"v"`.
    pub fn tag_prefix(&self) -> &str {
        self.project
            .as_ref()
            .and_then(|p| p.tag_prefix.as_deref())
            .or(self.global.tag_prefix.as_deref())
            .unwrap_or(DEFAULT_TAG_PREFIX)
    }

    /// Configured metadata path, if any (relative to the project directory).
    pub fn metadata(&self) -> Option<&Path> {
        self.project.as_ref().and_then(|p| p.metadata.as_deref())
    }

    /// Configured source path, if any (relative to the project directory).
    pub fn source(&self) -> Option<&Path> {
        self.project.as_ref().and_then(|p| p.source.as_deref())
    }

    /// Metadata line format.
    pub fn metadata_format(&self) -> MetadataFormat {
        let label = self
            .project
            .as_ref()
            .and_then(|p| p.metadata_format.as_ref())
            .and_then(|f| f.label.as_deref())
            .unwrap_or(DEFAULT_LABEL);
        MetadataFormat::new(label)
    }

    /// Source assignment format.
    pub fn source_format(&self) -> SourceFormat {
        let table = self.project.as_ref().and_then(|p| p.source_format.as_ref());
        let identifier = table
            .and_then(|f| f.identifier.as_deref())
            .unwrap_or(DEFAULT_IDENTIFIER);

        match table.and_then(|f| f.quotes.as_deref()) {
            Some(quotes) => SourceFormat::new(identifier, quotes.chars()),
            None => SourceFormat {
                identifier: identifier.to_string(),
                ..SourceFormat::default()
            },
        }
    }

    /// Effective configuration as `(key, value)` pairs.
    ///
    /// Unset paths are reported as `(auto)`, meaning discovery applies.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        let path_or_auto =
            |p: Option<&Path>| p.map_or_else(|| "(auto)".to_string(), |p| p.display().to_string());
        let source_format = self.source_format();

        vec![
            ("metadata", path_or_auto(self.metadata())),
            ("source", path_or_auto(self.source())),
            ("strict", self.strict().to_string()),
            ("tag_prefix", self.tag_prefix().to_string()),
            ("metadata_format.label", self.metadata_format().label),
            ("source_format.identifier", source_format.identifier),
            (
                "source_format.quotes",
                source_format.quotes.iter().collect(),
            ),
        ]
    }

    /// Look up a single effective value by key.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownKey` for keys not listed by [`entries`](Self::entries).
    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        self.entries()
            .into_iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))
    }
}

/// Read and parse a TOML config file.
fn read_toml<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::extract::MatchPolicy;
    use tempfile::TempDir;

    #[test]
    fn load_empty_defaults() {
        let temp = TempDir::new().unwrap();

        let result = Config::load_from(None, temp.path()).unwrap();
        let config = result.config;

        assert!(!config.strict());
        assert_eq!(config.tag_prefix(), "v");
        assert!(config.metadata().is_none());
        assert!(config.source().is_none());
        assert_eq!(config.metadata_format(), MetadataFormat::default());
        assert_eq!(config.source_format(), SourceFormat::default());
        assert!(config.project_path().is_none());
    }

    #[test]
    fn load_global_file() {
        let temp = TempDir::new().unwrap();
        let global = temp.path().join("config.toml");
        fs::write(&global, "strict = true\ntag_prefix = \"rel-\"\n").unwrap();

        let result = Config::load_from(Some(global.as_path()), temp.path()).unwrap();
        let config = result.config;

        assert!(config.strict());
        assert_eq!(config.tag_prefix(), "rel-");
        assert_eq!(config.global_path(), Some(global.as_path()));
    }

    #[test]
    fn missing_global_file_is_ignored() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.toml");

        let result = Config::load_from(Some(missing.as_path()), temp.path()).unwrap();
        assert!(result.config.global_path().is_none());
    }

    #[test]
    fn project_overrides_global() {
        let temp = TempDir::new().unwrap();
        let global = temp.path().join("global.toml");
        fs::write(&global, "strict = true\ntag_prefix = \"rel-\"\n").unwrap();
        fs::write(
            temp.path().join(PROJECT_CONFIG_FILE),
            r#"
            strict = false
            source = "pkg/__init__.py"

            [source_format]
            quotes = "'"
            "#,
        )
        .unwrap();

        let config = Config::load_from(Some(global.as_path()), temp.path())
            .unwrap()
            .config;

        assert!(!config.strict());
        assert_eq!(config.tag_prefix(), "rel-");
        assert_eq!(config.source(), Some(Path::new("pkg/__init__.py")));
        assert_eq!(config.source_format().quotes, vec!['\'']);
        assert_eq!(config.source_format().identifier, "__version__");
    }

    #[test]
    fn parse_error_names_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(PROJECT_CONFIG_FILE), "strict = \"yes\"\n").unwrap();

        let err = Config::load_from(None, temp.path()).unwrap_err();
        match err {
            ConfigError::ParseError { path, .. } => {
                assert!(path.ends_with(PROJECT_CONFIG_FILE));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn invalid_value_rejected_on_load() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(PROJECT_CONFIG_FILE),
            "[metadata_format]\nlabel = \"\"\n",
        )
        .unwrap();

        assert!(matches!(
            Config::load_from(None, temp.path()),
            Err(ConfigError::InvalidValue(_))
        ));
    }

    #[test]
    fn configured_label_with_space_extracts() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(PROJECT_CONFIG_FILE),
            "[metadata_format]\nlabel = \"version =\"\n",
        )
        .unwrap();

        let config = Config::load_from(None, temp.path()).unwrap().config;
        let site = config
            .metadata_format()
            .extract("name = x\nversion = 3.1\n", MatchPolicy::FirstMatch)
            .unwrap();
        assert_eq!(site.version.as_str(), "3.1");
    }

    #[test]
    fn get_known_and_unknown_keys() {
        let config = Config::default();
        assert_eq!(config.get("tag_prefix").unwrap(), "v");
        assert_eq!(config.get("metadata").unwrap(), "(auto)");
        assert_eq!(config.get("source_format.quotes").unwrap(), "'\"");
        assert!(matches!(
            config.get("trunk"),
            Err(ConfigError::UnknownKey(_))
        ));
    }
}
