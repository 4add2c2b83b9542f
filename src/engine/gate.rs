//! engine::gate
//!
//! The version-consistency gate.
//!
//! # Architecture
//!
//! The gate reads two inputs, extracts one version from each and compares
//! them. It has no state: every run reads the files fresh, so running it
//! twice on unchanged inputs gives the same answer.
//!
//! ```text
//! read metadata ─┐
//!                ├─> extract ─> compare ─> [tag guard] ─> GateReport
//! read source ───┘
//! ```
//!
//! # Invariants
//!
//! - The gate never reports a match unless both versions were extracted
//!   and are byte-for-byte equal
//! - There is no fallback version and no partial success
//! - The tag guard only runs after the versions agree
//!
//! # Example
//!
//! ```no_run
//! use versiongate::engine::gate::{Gate, GateInputs};
//!
//! let inputs = GateInputs::new("PKG-INFO", "pycronofy/__init__.py");
//! match Gate::default().run(&inputs) {
//!     Ok(report) => println!("Versions match ({})", report.version),
//!     Err(err) => eprintln!("error: {}", err),
//! }
//! ```

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::core::extract::{FormatError, MatchPolicy, MetadataFormat, SourceFormat};
use crate::core::types::{Version, VersionSite};
use crate::git::{Git, GitError};

/// Which of the two inputs an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputRole {
    Metadata,
    Source,
}

impl fmt::Display for InputRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputRole::Metadata => write!(f, "metadata"),
            InputRole::Source => write!(f, "source"),
        }
    }
}

/// Both versions were read but they differ.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Versions do not match: metadata declares '{metadata_version}' but source declares '{source_version}'")]
pub struct MismatchError {
    pub metadata_version: Version,
    pub source_version: Version,
}

/// Errors that fail the gate.
#[derive(Debug, Error)]
pub enum GateError {
    #[error("failed to read {role} file '{path}': {source}")]
    Read {
        role: InputRole,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{role} file '{path}': {source}")]
    Format {
        role: InputRole,
        path: PathBuf,
        source: FormatError,
    },

    #[error(transparent)]
    Mismatch(#[from] MismatchError),

    #[error(transparent)]
    Git(#[from] GitError),
}

impl GateError {
    /// Whether this failure is a version disagreement rather than an
    /// inability to run the check.
    pub fn is_mismatch(&self) -> bool {
        matches!(self, GateError::Mismatch(_))
    }
}

/// Compare two versions exactly.
///
/// Returns the agreed version on success.
///
/// ```
/// use versiongate::core::types::Version;
/// use versiongate::engine::gate::check_versions_match;
///
/// let a = Version::new("1.2.3").unwrap();
/// assert!(check_versions_match(&a, &Version::new("1.2.3").unwrap()).is_ok());
/// assert!(check_versions_match(&a, &Version::new("v1.2.3").unwrap()).is_err());
/// ```
pub fn check_versions_match(
    metadata_version: &Version,
    source_version: &Version,
) -> Result<Version, MismatchError> {
    if metadata_version == source_version {
        Ok(metadata_version.clone())
    } else {
        Err(MismatchError {
            metadata_version: metadata_version.clone(),
            source_version: source_version.clone(),
        })
    }
}

/// Paths of the two inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateInputs {
    pub metadata: PathBuf,
    pub source: PathBuf,
}

impl GateInputs {
    pub fn new(metadata: impl Into<PathBuf>, source: impl Into<PathBuf>) -> Self {
        Self {
            metadata: metadata.into(),
            source: source.into(),
        }
    }
}

/// One input and the version found in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputReport {
    pub path: PathBuf,
    pub version: Version,
    pub line: usize,
}

impl InputReport {
    fn new(path: &Path, site: VersionSite) -> Self {
        Self {
            path: path.to_path_buf(),
            version: site.version,
            line: site.line,
        }
    }
}

/// Both extracted versions, not yet compared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Inspection {
    pub metadata: InputReport,
    pub source: InputReport,
}

impl Inspection {
    /// Compare the two versions.
    pub fn verdict(&self) -> Result<Version, MismatchError> {
        check_versions_match(&self.metadata.version, &self.source.version)
    }

    /// Turn an agreeing inspection into a report.
    pub fn into_report(self) -> Result<GateReport, MismatchError> {
        let version = self.verdict()?;
        Ok(GateReport {
            version,
            metadata: self.metadata,
            source: self.source,
        })
    }
}

/// Successful gate outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GateReport {
    pub version: Version,
    pub metadata: InputReport,
    pub source: InputReport,
}

impl GateReport {
    /// Release tag name for the agreed version.
    pub fn tag_name(&self, prefix: &str) -> String {
        self.version.tag_name(prefix)
    }
}

/// Gate settings: how to read each input and how to treat duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Gate {
    pub metadata_format: MetadataFormat,
    pub source_format: SourceFormat,
    pub policy: MatchPolicy,
}

impl Gate {
    pub fn new(
        metadata_format: MetadataFormat,
        source_format: SourceFormat,
        policy: MatchPolicy,
    ) -> Self {
        Self {
            metadata_format,
            source_format,
            policy,
        }
    }

    /// Extract both versions without requiring them to agree.
    ///
    /// # Errors
    ///
    /// `GateError::Read` or `GateError::Format` for the first input that
    /// cannot produce a version. The metadata record is read first.
    pub fn inspect(&self, inputs: &GateInputs) -> Result<Inspection, GateError> {
        let metadata_text = read_input(InputRole::Metadata, &inputs.metadata)?;
        let metadata = self
            .metadata_format
            .extract(&metadata_text, self.policy)
            .map_err(|source| GateError::Format {
                role: InputRole::Metadata,
                path: inputs.metadata.clone(),
                source,
            })?;

        let source_text = read_input(InputRole::Source, &inputs.source)?;
        let source = self
            .source_format
            .extract(&source_text, self.policy)
            .map_err(|source| GateError::Format {
                role: InputRole::Source,
                path: inputs.source.clone(),
                source,
            })?;

        Ok(Inspection {
            metadata: InputReport::new(&inputs.metadata, metadata),
            source: InputReport::new(&inputs.source, source),
        })
    }

    /// Run the gate.
    ///
    /// # Errors
    ///
    /// Any extraction failure, or `GateError::Mismatch` if the versions
    /// differ.
    pub fn run(&self, inputs: &GateInputs) -> Result<GateReport, GateError> {
        self.inspect(inputs)?
            .into_report()
            .map_err(GateError::from)
    }

    /// Fail if the release tag for an agreed version already exists.
    pub fn guard_tag(
        &self,
        report: &GateReport,
        git: &Git,
        prefix: &str,
    ) -> Result<String, GateError> {
        let tag = report.tag_name(prefix);
        git.ensure_tag_absent(&tag)?;
        Ok(tag)
    }
}

/// Read an input. Bytes that are not UTF-8 become U+FFFD; only the version
/// line has to be readable.
fn read_input(role: InputRole, path: &Path) -> Result<String, GateError> {
    let bytes = fs::read(path).map_err(|source| GateError::Read {
        role,
        path: path.to_path_buf(),
        source,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
