//! core::extract
//!
//! Line-oriented extraction of declared versions.
//!
//! # Grammar
//!
//! Metadata record (`PKG-INFO` style), one header line:
//!
//! ```text
//! LABEL WS+ TOKEN [WS+ anything]
//! ```
//!
//! The label is anchored at the start of the line, so `Metadata-Version: 2.1`
//! never matches the default `Version:` label. Only the header block is
//! searched: it ends at the first empty line, after which a `PKG-INFO` carries
//! the long description as free text.
//!
//! Source file, one assignment line:
//!
//! ```text
//! [WS] IDENT [WS] [":" annotation] "=" [WS] QUOTE LITERAL QUOTE [anything]
//! ```
//!
//! `IDENT` must stand alone as a word (`__version_info__` is not
//! `__version__`). The closing quote must match the opening one. Anything
//! after the closing quote, typically a `# comment`, is ignored.
//!
//! # Multiple matches
//!
//! [`MatchPolicy::FirstMatch`] takes the first matching line.
//! [`MatchPolicy::Strict`] requires exactly one and reports every line
//! number otherwise.
//!
//! # Example
//!
//! ```
//! use versiongate::core::extract::{extract_metadata_version, extract_source_version};
//!
//! let meta = "Metadata-Version: 2.1\nName: pycronofy\nVersion: 0.9.0\n";
//! let src = "__version__ = '0.9.0'  # bumped by release\n";
//!
//! assert_eq!(extract_metadata_version(meta).unwrap().as_str(), "0.9.0");
//! assert_eq!(extract_source_version(src).unwrap().as_str(), "0.9.0");
//! ```

use thiserror::Error;

use super::types::{TypeError, Version, VersionSite};

/// Default label of the metadata version line.
pub const DEFAULT_LABEL: &str = "Version:";

/// Default identifier the source assigns its version to.
pub const DEFAULT_IDENTIFIER: &str = "__version__";

/// Quote characters accepted around the source literal by default.
pub const DEFAULT_QUOTES: &[char] = &['\'', '"'];

/// Errors raised when an input does not carry a readable version.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("no line starting with '{label}' found")]
    MissingMetadataLine { label: String },

    #[error("line {line}: '{label}' is not followed by a version")]
    MissingMetadataToken { label: String, line: usize },

    #[error("no assignment to '{identifier}' found")]
    MissingSourceAssignment { identifier: String },

    #[error("line {line}: malformed assignment to '{identifier}': {reason}")]
    MalformedAssignment {
        identifier: String,
        line: usize,
        reason: String,
    },

    #[error("line {line}: string assigned to '{identifier}' has no closing {quote}")]
    UnterminatedLiteral {
        identifier: String,
        line: usize,
        quote: char,
    },

    #[error("line {line}: {source}")]
    InvalidVersion { line: usize, source: TypeError },

    #[error("'{what}' is declared on lines {lines:?}; strict mode requires exactly one")]
    Ambiguous { what: String, lines: Vec<usize> },
}

/// What to do when more than one line matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchPolicy {
    /// Use the first matching line.
    #[default]
    FirstMatch,
    /// Require exactly one matching line.
    Strict,
}

impl MatchPolicy {
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            MatchPolicy::Strict
        } else {
            MatchPolicy::FirstMatch
        }
    }
}

/// Shape of the metadata version line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataFormat {
    pub label: String,
}

impl Default for MetadataFormat {
    fn default() -> Self {
        Self {
            label: DEFAULT_LABEL.to_string(),
        }
    }
}

impl MetadataFormat {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    /// Extract the declared version from a metadata record.
    ///
    /// # Errors
    ///
    /// - `MissingMetadataLine` if no header line starts with the label
    /// - `MissingMetadataToken` if the selected line has nothing after it
    /// - `InvalidVersion` if the token is not a valid [`Version`]
    /// - `Ambiguous` under [`MatchPolicy::Strict`] with several matches
    pub fn extract(&self, text: &str, policy: MatchPolicy) -> Result<VersionSite, FormatError> {
        let candidates = candidates(header_lines(text), |line| self.match_line(line));
        let (line, rest) = select(candidates, policy, &self.label).ok_or_else(|| {
            FormatError::MissingMetadataLine {
                label: self.label.clone(),
            }
        })??;

        let token = rest
            .split_whitespace()
            .next()
            .ok_or_else(|| FormatError::MissingMetadataToken {
                label: self.label.clone(),
                line,
            })?;

        let version =
            Version::new(token).map_err(|source| FormatError::InvalidVersion { line, source })?;
        Ok(VersionSite::new(version, line))
    }

    /// Extract an arbitrary header field (e.g. `Name:`) from a metadata record.
    ///
    /// Returns the rest of the first header line starting with `field`,
    /// trimmed.
    pub fn header_field<'a>(text: &'a str, field: &str) -> Option<&'a str> {
        header_lines(text)
            .find_map(|line| line.strip_prefix(field))
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    fn match_line<'a>(&self, line: &'a str) -> Option<&'a str> {
        let rest = line.strip_prefix(self.label.as_str())?;
        if rest.is_empty() || rest.starts_with(char::is_whitespace) {
            Some(rest)
        } else {
            None
        }
    }
}

/// Shape of the source version assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFormat {
    pub identifier: String,
    pub quotes: Vec<char>,
}

impl Default for SourceFormat {
    fn default() -> Self {
        Self {
            identifier: DEFAULT_IDENTIFIER.to_string(),
            quotes: DEFAULT_QUOTES.to_vec(),
        }
    }
}

impl SourceFormat {
    pub fn new(identifier: impl Into<String>, quotes: impl IntoIterator<Item = char>) -> Self {
        Self {
            identifier: identifier.into(),
            quotes: quotes.into_iter().collect(),
        }
    }

    /// Extract the version literal assigned to the identifier.
    ///
    /// # Errors
    ///
    /// - `MissingSourceAssignment` if no line starts with the identifier
    /// - `MalformedAssignment` if the line is not `IDENT = QUOTE ...`
    /// - `UnterminatedLiteral` if the closing quote is missing
    /// - `InvalidVersion` if the literal is not a valid [`Version`]
    /// - `Ambiguous` under [`MatchPolicy::Strict`] with several matches
    pub fn extract(&self, text: &str, policy: MatchPolicy) -> Result<VersionSite, FormatError> {
        let candidates = candidates(text.lines(), |line| self.match_line(line));
        let (line, rest) = select(candidates, policy, &self.identifier).ok_or_else(|| {
            FormatError::MissingSourceAssignment {
                identifier: self.identifier.clone(),
            }
        })??;

        let version = self.parse_assignment(rest, line)?;
        Ok(VersionSite::new(version, line))
    }

    fn match_line<'a>(&self, line: &'a str) -> Option<&'a str> {
        let rest = line.trim_start().strip_prefix(self.identifier.as_str())?;
        if rest.starts_with(|c: char| c.is_alphanumeric() || c == '_') {
            None
        } else {
            Some(rest)
        }
    }

    fn parse_assignment(&self, rest: &str, line: usize) -> Result<Version, FormatError> {
        let malformed = |reason: &str| FormatError::MalformedAssignment {
            identifier: self.identifier.clone(),
            line,
            reason: reason.to_string(),
        };

        let mut rest = rest.trim_start();

        // Annotated assignment: `__version__: str = "1.0"`
        if let Some(annotated) = rest.strip_prefix(':') {
            let eq = annotated
                .find('=')
                .ok_or_else(|| malformed("expected '=' after type annotation"))?;
            rest = &annotated[eq..];
        }

        let rest = rest
            .strip_prefix('=')
            .ok_or_else(|| malformed("expected '='"))?;
        if rest.starts_with('=') {
            return Err(malformed("found a comparison, not an assignment"));
        }

        let rest = rest.trim_start();
        let quote = rest
            .chars()
            .next()
            .filter(|c| self.quotes.contains(c))
            .ok_or_else(|| malformed("expected a quoted string literal"))?;

        let body = &rest[quote.len_utf8()..];
        let end = body
            .find(quote)
            .ok_or_else(|| FormatError::UnterminatedLiteral {
                identifier: self.identifier.clone(),
                line,
                quote,
            })?;

        Version::new(&body[..end]).map_err(|source| FormatError::InvalidVersion { line, source })
    }
}

/// Extract the version from a metadata record using the default label and
/// first-match policy.
pub fn extract_metadata_version(metadata_text: &str) -> Result<Version, FormatError> {
    MetadataFormat::default()
        .extract(metadata_text, MatchPolicy::FirstMatch)
        .map(|site| site.version)
}

/// Extract the version from a source file using the default identifier,
/// quotes and first-match policy.
pub fn extract_source_version(source_text: &str) -> Result<Version, FormatError> {
    SourceFormat::default()
        .extract(source_text, MatchPolicy::FirstMatch)
        .map(|site| site.version)
}

/// Lines of a metadata record up to the first empty one.
fn header_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().take_while(|line| !line.trim_end().is_empty())
}

/// Collect `(line_number, remainder)` for every matching line.
fn candidates<'a, I, F>(lines: I, matcher: F) -> Vec<(usize, &'a str)>
where
    I: Iterator<Item = &'a str>,
    F: Fn(&'a str) -> Option<&'a str>,
{
    lines
        .enumerate()
        .filter_map(|(idx, line)| matcher(line.trim_end()).map(|rest| (idx + 1, rest)))
        .collect()
}

/// Pick the candidate the policy allows.
///
/// `None` means nothing matched; `Some(Err(_))` means strict mode saw
/// more than one match.
fn select<'a>(
    candidates: Vec<(usize, &'a str)>,
    policy: MatchPolicy,
    what: &str,
) -> Option<Result<(usize, &'a str), FormatError>> {
    match policy {
        MatchPolicy::Strict if candidates.len() > 1 => Some(Err(FormatError::Ambiguous {
            what: what.to_string(),
            lines: candidates.iter().map(|(line, _)| *line).collect(),
        })),
        _ => candidates.into_iter().next().map(Ok),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PKG_INFO: &str = "\
Metadata-Version: 2.1
Name: pycronofy
Version: 0.9.0
Summary: Python library for Cronofy
Home-page: https://github.com/cronofy/pycronofy
";

    mod metadata {
        use super::*;

        #[test]
        fn extracts_token() {
            assert_eq!(extract_metadata_version("Version: 1.2.3").unwrap().as_str(), "1.2.3");
        }

        #[test]
        fn skips_metadata_version_header() {
            let site = MetadataFormat::default()
                .extract(PKG_INFO, MatchPolicy::Strict)
                .unwrap();
            assert_eq!(site.version.as_str(), "0.9.0");
            assert_eq!(site.line, 3);
        }

        #[test]
        fn tolerates_extra_whitespace_and_crlf() {
            let text = "Name: x\r\nVersion:\t  1.4.0   \r\n";
            assert_eq!(extract_metadata_version(text).unwrap().as_str(), "1.4.0");
        }

        #[test]
        fn ignores_trailing_content() {
            assert_eq!(
                extract_metadata_version("Version: 2.0.0 (final)").unwrap().as_str(),
                "2.0.0"
            );
        }

        #[test]
        fn label_must_be_followed_by_whitespace() {
            let err = extract_metadata_version("Version:1.0\n").unwrap_err();
            assert_eq!(
                err,
                FormatError::MissingMetadataLine {
                    label: "Version:".into()
                }
            );
        }

        #[test]
        fn indented_line_does_not_match() {
            assert!(extract_metadata_version("    Version: 1.0\n").is_err());
        }

        #[test]
        fn missing_line_is_format_error() {
            let err = extract_metadata_version("Name: pycronofy\nSummary: x\n").unwrap_err();
            assert!(matches!(err, FormatError::MissingMetadataLine { .. }));
        }

        #[test]
        fn empty_input_is_format_error() {
            assert!(matches!(
                extract_metadata_version(""),
                Err(FormatError::MissingMetadataLine { .. })
            ));
        }

        #[test]
        fn label_without_token() {
            let err = extract_metadata_version("Name: x\nVersion:   \n").unwrap_err();
            assert_eq!(
                err,
                FormatError::MissingMetadataToken {
                    label: "Version:".into(),
                    line: 2
                }
            );
        }

        #[test]
        fn first_match_wins_by_default() {
            let text = "Version: 1.0.0\nVersion: 2.0.0\n";
            assert_eq!(extract_metadata_version(text).unwrap().as_str(), "1.0.0");
        }

        #[test]
        fn strict_rejects_duplicates() {
            let text = "Version: 1.0.0\nName: x\nVersion: 2.0.0\n";
            let err = MetadataFormat::default()
                .extract(text, MatchPolicy::Strict)
                .unwrap_err();
            assert_eq!(
                err,
                FormatError::Ambiguous {
                    what: "Version:".into(),
                    lines: vec![1, 3]
                }
            );
        }

        #[test]
        fn description_body_is_not_a_header() {
            let text = "\
Metadata-Version: 2.1
Name: pycronofy
Version: 0.9.0
Summary: x

Changelog
=========

Version: 0.8.0
- fixed things
";
            let site = MetadataFormat::default()
                .extract(text, MatchPolicy::Strict)
                .unwrap();
            assert_eq!(site.version.as_str(), "0.9.0");
            assert_eq!(site.line, 3);
        }

        #[test]
        fn version_only_in_body_is_missing() {
            let text = "Name: pycronofy\n\nVersion: 0.8.0\n";
            assert!(matches!(
                extract_metadata_version(text),
                Err(FormatError::MissingMetadataLine { .. })
            ));
        }

        #[test]
        fn whitespace_only_line_ends_headers() {
            let text = "Name: x\n   \r\nVersion: 1.0\n";
            assert!(extract_metadata_version(text).is_err());
            assert_eq!(MetadataFormat::header_field(text, "Version:"), None);
        }

        #[test]
        fn custom_label() {
            let format = MetadataFormat::new("version =");
            let site = format
                .extract("name = x\nversion = 3.1\n", MatchPolicy::FirstMatch)
                .unwrap();
            assert_eq!(site.version.as_str(), "3.1");
        }

        #[test]
        fn header_field_lookup() {
            assert_eq!(MetadataFormat::header_field(PKG_INFO, "Name:"), Some("pycronofy"));
            assert_eq!(MetadataFormat::header_field(PKG_INFO, "License:"), None);
        }
    }

    mod source {
        use super::*;

        #[test]
        fn extracts_single_quoted() {
            assert_eq!(
                extract_source_version("__version__ = '1.2.3'").unwrap().as_str(),
                "1.2.3"
            );
        }

        #[test]
        fn extracts_double_quoted() {
            assert_eq!(
                extract_source_version("__version__ = \"1.2.3\"\n").unwrap().as_str(),
                "1.2.3"
            );
        }

        #[test]
        fn tolerates_spacing_and_comments() {
            let text = "import os\n\n__version__='0.9.0'   # keep in sync with setup.py\n";
            let site = SourceFormat::default()
                .extract(text, MatchPolicy::FirstMatch)
                .unwrap();
            assert_eq!(site.version.as_str(), "0.9.0");
            assert_eq!(site.line, 3);
        }

        #[test]
        fn accepts_type_annotation() {
            assert_eq!(
                extract_source_version("__version__: str = \"4.0.1\"").unwrap().as_str(),
                "4.0.1"
            );
        }

        #[test]
        fn accepts_indented_assignment() {
            let text = "try:\n    __version__ = '1.0'\nexcept ImportError:\n    pass\n";
            assert_eq!(extract_source_version(text).unwrap().as_str(), "1.0");
        }

        #[test]
        fn identifier_must_be_whole_word() {
            let text = "__version_info__ = (1, 0)\n__version__ = '1.0'\n";
            assert_eq!(extract_source_version(text).unwrap().as_str(), "1.0");
        }

        #[test]
        fn mention_in_expression_is_not_a_candidate() {
            let text = "print(__version__)\n";
            assert!(matches!(
                extract_source_version(text),
                Err(FormatError::MissingSourceAssignment { .. })
            ));
        }

        #[test]
        fn missing_assignment() {
            let err = extract_source_version("import datetime\n").unwrap_err();
            assert_eq!(
                err,
                FormatError::MissingSourceAssignment {
                    identifier: "__version__".into()
                }
            );
        }

        #[test]
        fn missing_closing_quote() {
            let err = extract_source_version("__version__ = '1.2.3\n").unwrap_err();
            assert_eq!(
                err,
                FormatError::UnterminatedLiteral {
                    identifier: "__version__".into(),
                    line: 1,
                    quote: '\''
                }
            );
        }

        #[test]
        fn mismatched_quotes_are_unterminated() {
            let err = extract_source_version("__version__ = '1.2.3\"\n").unwrap_err();
            assert!(matches!(err, FormatError::UnterminatedLiteral { quote: '\'', .. }));
        }

        #[test]
        fn unquoted_value_is_malformed() {
            let err = extract_source_version("__version__ = VERSION\n").unwrap_err();
            assert!(matches!(err, FormatError::MalformedAssignment { line: 1, .. }));
        }

        #[test]
        fn comparison_is_malformed() {
            let err = extract_source_version("__version__ == '1.0'\n").unwrap_err();
            assert!(matches!(err, FormatError::MalformedAssignment { .. }));
        }

        #[test]
        fn empty_literal_is_invalid_version() {
            let err = extract_source_version("__version__ = ''\n").unwrap_err();
            assert!(matches!(err, FormatError::InvalidVersion { line: 1, .. }));
        }

        #[test]
        fn quote_set_is_configurable() {
            let format = SourceFormat::new("__version__", ['"']);
            assert!(format
                .extract("__version__ = '1.0'", MatchPolicy::FirstMatch)
                .is_err());
            assert!(format
                .extract("__version__ = \"1.0\"", MatchPolicy::FirstMatch)
                .is_ok());
        }

        #[test]
        fn first_match_wins_by_default() {
            let text = "__version__ = '1.0'\n__version__ = '2.0'\n";
            assert_eq!(extract_source_version(text).unwrap().as_str(), "1.0");
        }

        #[test]
        fn strict_rejects_duplicates() {
            let text = "__version__ = '1.0'\n__version__ = '2.0'\n";
            let err = SourceFormat::default()
                .extract(text, MatchPolicy::Strict)
                .unwrap_err();
            assert_eq!(
                err,
                FormatError::Ambiguous {
                    what: "__version__".into(),
                    lines: vec![1, 2]
                }
            );
        }
    }

    #[test]
    fn extraction_is_idempotent() {
        let first = extract_metadata_version(PKG_INFO).unwrap();
        let second = extract_metadata_version(PKG_INFO).unwrap();
        assert_eq!(first, second);
    }
}
