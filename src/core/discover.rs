//! core::discover
//!
//! Locate the gate's inputs when they are not configured.
//!
//! # Metadata record
//!
//! Searched in the project directory, in order:
//! 1. `PKG-INFO`
//! 2. exactly one `*.egg-info/PKG-INFO`
//!
//! # Entry-point source
//!
//! Derived from the metadata `Name:` field. The distribution name is
//! normalized into a module name (`my-pkg` becomes `my_pkg`) and then
//! searched as:
//! 1. `<module>/__init__.py`
//! 2. `src/<module>/__init__.py`

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::extract::MetadataFormat;

/// Metadata record file name.
pub const PKG_INFO: &str = "PKG-INFO";

/// Errors from input discovery.
#[derive(Debug, Error)]
pub enum DiscoverError {
    #[error("no metadata record found in '{dir}' (looked for PKG-INFO and *.egg-info/PKG-INFO)")]
    NoMetadata { dir: PathBuf },

    #[error("several metadata records found in '{dir}': {}; pass --metadata", display_paths(.candidates))]
    AmbiguousMetadata {
        dir: PathBuf,
        candidates: Vec<PathBuf>,
    },

    #[error("metadata record '{path}' has no Name: field; pass --source")]
    NoPackageName { path: PathBuf },

    #[error("no source file for package '{name}' (looked for {}); pass --source", display_paths(.tried))]
    NoSource { name: String, tried: Vec<PathBuf> },

    #[error("failed to read directory '{path}': {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Find the metadata record under `project_dir`.
pub fn find_metadata(project_dir: &Path) -> Result<PathBuf, DiscoverError> {
    let direct = project_dir.join(PKG_INFO);
    if direct.is_file() {
        return Ok(direct);
    }

    let entries = fs::read_dir(project_dir).map_err(|e| DiscoverError::ReadDir {
        path: project_dir.to_path_buf(),
        source: e,
    })?;

    let mut candidates: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_dir()
                && path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.ends_with(".egg-info"))
        })
        .map(|dir| dir.join(PKG_INFO))
        .filter(|path| path.is_file())
        .collect();
    candidates.sort();

    match candidates.len() {
        0 => Err(DiscoverError::NoMetadata {
            dir: project_dir.to_path_buf(),
        }),
        1 => Ok(candidates.remove(0)),
        _ => Err(DiscoverError::AmbiguousMetadata {
            dir: project_dir.to_path_buf(),
            candidates,
        }),
    }
}

/// Find the entry-point source for the package the metadata describes.
pub fn find_source(
    project_dir: &Path,
    metadata_path: &Path,
    metadata_text: &str,
) -> Result<PathBuf, DiscoverError> {
    let name = MetadataFormat::header_field(metadata_text, "Name:").ok_or_else(|| {
        DiscoverError::NoPackageName {
            path: metadata_path.to_path_buf(),
        }
    })?;
    let module = module_name(name);

    let tried = vec![
        project_dir.join(&module).join("__init__.py"),
        project_dir.join("src").join(&module).join("__init__.py"),
    ];

    if let Some(path) = tried.iter().find(|path| path.is_file()) {
        return Ok(path.clone());
    }

    Err(DiscoverError::NoSource {
        name: name.to_string(),
        tried,
    })
}

/// Normalize a distribution name into an importable module name.
///
/// ```
/// use versiongate::core::discover::module_name;
///
/// assert_eq!(module_name("PyCronofy"), "pycronofy");
/// assert_eq!(module_name("my-pkg.ext"), "my_pkg_ext");
/// ```
pub fn module_name(distribution: &str) -> String {
    distribution
        .trim()
        .chars()
        .map(|c| match c {
            '-' | '.' => '_',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| format!("'{}'", p.display()))
        .collect::<Vec<_>>()
        .join(", ")
}
