//! engine::resolve
//!
//! Turn configuration, CLI overrides and discovery into a runnable gate.
//!
//! # Precedence
//!
//! For each input path: CLI flag, then project config, then discovery.
//! Relative paths are resolved against the project directory.
//!
//! Strictness is on if either the flag or the config turns it on; there is
//! no flag to turn a configured strict mode off.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::gate::{Gate, GateInputs};
use crate::core::config::Config;
use crate::core::discover::{self, DiscoverError};
use crate::core::extract::MatchPolicy;

/// Errors from resolving the gate's inputs.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Discover(#[from] DiscoverError),

    #[error("failed to read metadata file '{path}' while looking for the source file: {source}")]
    ReadMetadata {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub metadata: Option<PathBuf>,
    pub source: Option<PathBuf>,
    pub strict: bool,
}

/// Where each input came from, for debug output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathOrigin {
    Flag,
    Config,
    Discovered,
}

impl std::fmt::Display for PathOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathOrigin::Flag => write!(f, "command line"),
            PathOrigin::Config => write!(f, "config"),
            PathOrigin::Discovered => write!(f, "discovered"),
        }
    }
}

/// A gate ready to run.
#[derive(Debug, Clone)]
pub struct Resolved {
    pub gate: Gate,
    pub inputs: GateInputs,
    pub tag_prefix: String,
    pub metadata_origin: PathOrigin,
    pub source_origin: PathOrigin,
}

/// Resolve inputs and settings for `project_dir`.
pub fn resolve(
    project_dir: &Path,
    config: &Config,
    overrides: &Overrides,
) -> Result<Resolved, ResolveError> {
    let metadata_choice = pick(
        project_dir,
        overrides.metadata.as_deref(),
        config.metadata(),
    );
    let (metadata, metadata_origin) = match metadata_choice {
        Some(found) => found,
        None => (
            discover::find_metadata(project_dir)?,
            PathOrigin::Discovered,
        ),
    };

    let source_choice = pick(project_dir, overrides.source.as_deref(), config.source());
    let (source, source_origin) = match source_choice {
        Some(found) => found,
        None => {
            let text = fs::read_to_string(&metadata).map_err(|e| ResolveError::ReadMetadata {
                path: metadata.clone(),
                source: e,
            })?;
            (
                discover::find_source(project_dir, &metadata, &text)?,
                PathOrigin::Discovered,
            )
        }
    };

    let gate = Gate::new(
        config.metadata_format(),
        config.source_format(),
        MatchPolicy::from_strict(overrides.strict || config.strict()),
    );

    Ok(Resolved {
        gate,
        inputs: GateInputs::new(metadata, source),
        tag_prefix: config.tag_prefix().to_string(),
        metadata_origin,
        source_origin,
    })
}

fn pick(
    project_dir: &Path,
    flag: Option<&Path>,
    configured: Option<&Path>,
) -> Option<(PathBuf, PathOrigin)> {
    flag.map(|p| (project_dir.join(p), PathOrigin::Flag))
        .or_else(|| configured.map(|p| (project_dir.join(p), PathOrigin::Config)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::PROJECT_CONFIG_FILE;
    use tempfile::TempDir;

    fn project(files: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for (path, contents) in files {
            let path = dir.path().join(path);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, contents).unwrap();
        }
        dir
    }

    fn config_for(dir: &TempDir) -> Config {
        Config::load_from(None, dir.path()).unwrap().config
    }

    #[test]
    fn discovers_both_inputs() {
        let dir = project(&[
            ("pycronofy.egg-info/PKG-INFO", "Name: pycronofy\nVersion: 0.9.0\n"),
            ("pycronofy/__init__.py", "__version__ = '0.9.0'\n"),
        ]);

        let resolved = resolve(dir.path(), &config_for(&dir), &Overrides::default()).unwrap();

        assert_eq!(
            resolved.inputs.metadata,
            dir.path().join("pycronofy.egg-info/PKG-INFO")
        );
        assert_eq!(resolved.inputs.source, dir.path().join("pycronofy/__init__.py"));
        assert_eq!(resolved.metadata_origin, PathOrigin::Discovered);
        assert_eq!(resolved.source_origin, PathOrigin::Discovered);
        assert_eq!(resolved.gate.policy, MatchPolicy::FirstMatch);
        assert_eq!(resolved.tag_prefix, "v");
    }

    #[test]
    fn flags_beat_config() {
        let dir = project(&[(
            PROJECT_CONFIG_FILE,
            "metadata = \"meta/PKG-INFO\"\nsource = \"lib/version.py\"\n",
        )]);
        let overrides = Overrides {
            metadata: Some(PathBuf::from("other/PKG-INFO")),
            source: None,
            strict: true,
        };

        let resolved = resolve(dir.path(), &config_for(&dir), &overrides).unwrap();

        assert_eq!(resolved.inputs.metadata, dir.path().join("other/PKG-INFO"));
        assert_eq!(resolved.metadata_origin, PathOrigin::Flag);
        assert_eq!(resolved.inputs.source, dir.path().join("lib/version.py"));
        assert_eq!(resolved.source_origin, PathOrigin::Config);
        assert_eq!(resolved.gate.policy, MatchPolicy::Strict);
    }

    #[test]
    fn absolute_flag_path_kept() {
        let dir = project(&[]);
        let elsewhere = TempDir::new().unwrap();
        let overrides = Overrides {
            metadata: Some(elsewhere.path().join("PKG-INFO")),
            source: Some(elsewhere.path().join("v.py")),
            strict: false,
        };

        let resolved = resolve(dir.path(), &config_for(&dir), &overrides).unwrap();
        assert_eq!(resolved.inputs.metadata, elsewhere.path().join("PKG-INFO"));
    }

    #[test]
    fn config_strict_and_formats_flow_into_gate() {
        let dir = project(&[(
            PROJECT_CONFIG_FILE,
            "strict = true\ntag_prefix = \"\"\n[source_format]\nidentifier = \"VERSION\"\n",
        )]);
        let overrides = Overrides {
            metadata: Some(PathBuf::from("PKG-INFO")),
            source: Some(PathBuf::from("v.py")),
            strict: false,
        };

        let resolved = resolve(dir.path(), &config_for(&dir), &overrides).unwrap();
        assert_eq!(resolved.gate.policy, MatchPolicy::Strict);
        assert_eq!(resolved.gate.source_format.identifier, "VERSION");
        assert_eq!(resolved.tag_prefix, "");
    }

    #[test]
    fn missing_metadata_for_source_discovery() {
        let dir = project(&[]);
        let overrides = Overrides {
            metadata: Some(PathBuf::from("PKG-INFO")),
            ..Default::default()
        };

        assert!(matches!(
            resolve(dir.path(), &config_for(&dir), &overrides),
            Err(ResolveError::ReadMetadata { .. })
        ));
    }

    #[test]
    fn nothing_to_discover() {
        let dir = project(&[("README.md", "# pkg\n")]);

        assert!(matches!(
            resolve(dir.path(), &config_for(&dir), &Overrides::default()),
            Err(ResolveError::Discover(DiscoverError::NoMetadata { .. }))
        ));
    }
}
