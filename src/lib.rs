//! versiongate - a release gate for Python packages
//!
//! versiongate checks that the version a package declares in its metadata
//! record (`Version:` in `PKG-INFO`) is identical to the version embedded in
//! its source (`__version__ = '...'`), so a release workflow can halt before
//! publishing or tagging a package whose two declarations disagree.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to engine)
//! - [`engine`] - Resolves inputs and runs the gate
//! - [`core`] - Domain types, extraction grammar, discovery, configuration
//! - [`git`] - Release tag lookup
//! - [`ui`] - Output utilities
//!
//! # Correctness Invariants
//!
//! 1. A match is reported only when both versions were extracted and are
//!    byte-for-byte equal
//! 2. Extraction failures are never mistaken for a match
//! 3. Nothing is cached; every run reads the files again
//! 4. versiongate never writes files or refs

pub mod cli;
pub mod core;
pub mod engine;
pub mod git;
pub mod ui;
