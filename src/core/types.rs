//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`Version`] - Validated version token
//! - [`VersionSite`] - A version together with where it was declared
//!
//! # Validation
//!
//! A `Version` is never normalized. `1.2.3`, `v1.2.3` and `1.2.3.0` are
//! three distinct versions, and equality is byte-for-byte.
//!
//! # Examples
//!
//! ```
//! use versiongate::core::types::Version;
//!
//! let v = Version::new("0.9.0").unwrap();
//! assert_eq!(v.as_str(), "0.9.0");
//!
//! assert_ne!(v, Version::new("v0.9.0").unwrap());
//! assert!(Version::new("").is_err());
//! assert!(Version::new("0.9 .0").is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid version: {0}")]
    InvalidVersion(String),
}

/// A validated version token.
///
/// Tokens must be non-empty and may not contain whitespace, control
/// characters or quote characters. Nothing else is checked: the gate
/// compares what the files declare, it does not interpret it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version(String);

impl Version {
    /// Create a new validated version.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidVersion` if the token is empty or contains
    /// whitespace, control or quote characters.
    pub fn new(token: impl Into<String>) -> Result<Self, TypeError> {
        let token = token.into();
        Self::validate(&token)?;
        Ok(Self(token))
    }

    fn validate(token: &str) -> Result<(), TypeError> {
        if token.is_empty() {
            return Err(TypeError::InvalidVersion(
                "version cannot be empty".into(),
            ));
        }

        if let Some(c) = token
            .chars()
            .find(|c| c.is_whitespace() || c.is_control() || *c == '\'' || *c == '"')
        {
            return Err(TypeError::InvalidVersion(format!(
                "version '{}' contains forbidden character {:?}",
                token.escape_debug(),
                c
            )));
        }

        Ok(())
    }

    /// Get the version as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Release tag name for this version, e.g. `v0.9.0` for prefix `v`.
    pub fn tag_name(&self, prefix: &str) -> String {
        format!("{}{}", prefix, self.0)
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Version {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Version> for String {
    fn from(version: Version) -> Self {
        version.0
    }
}

impl AsRef<str> for Version {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A version and the line it was read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionSite {
    /// The extracted version.
    pub version: Version,
    /// 1-based line number in the input text.
    pub line: usize,
}

impl VersionSite {
    pub fn new(version: Version, line: usize) -> Self {
        Self { version, line }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_version_shapes() {
        for token in ["0.9.0", "1.2.3rc1", "2024.10.1", "1.0.0-beta+build.5", "v1"] {
            assert!(Version::new(token).is_ok(), "{} should be valid", token);
        }
    }

    #[test]
    fn rejects_empty() {
        assert!(matches!(
            Version::new(""),
            Err(TypeError::InvalidVersion(_))
        ));
    }

    #[test]
    fn rejects_whitespace_and_quotes() {
        assert!(Version::new("1.2 3").is_err());
        assert!(Version::new("1.2\t3").is_err());
        assert!(Version::new("1.2'3").is_err());
        assert!(Version::new("\"1.2.3\"").is_err());
    }

    #[test]
    fn equality_is_exact() {
        let v = Version::new("1.2.3").unwrap();
        assert_eq!(v, Version::new("1.2.3").unwrap());
        assert_ne!(v, Version::new("1.2.3.0").unwrap());
        assert_ne!(v, Version::new("v1.2.3").unwrap());
        assert_ne!(
            Version::new("1.0rc1").unwrap(),
            Version::new("1.0RC1").unwrap()
        );
    }

    #[test]
    fn tag_name_uses_prefix() {
        let v = Version::new("0.9.0").unwrap();
        assert_eq!(v.tag_name("v"), "v0.9.0");
        assert_eq!(v.tag_name(""), "0.9.0");
        assert_eq!(v.tag_name("release-"), "release-0.9.0");
    }

    #[test]
    fn serde_roundtrip_validates() {
        let v: Version = serde_json::from_str("\"0.9.0\"").unwrap();
        assert_eq!(v.as_str(), "0.9.0");
        assert!(serde_json::from_str::<Version>("\"\"").is_err());
    }
}
