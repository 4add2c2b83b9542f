//! git
//!
//! Single interface for the Git queries versiongate needs.
//!
//! # Architecture
//!
//! This module is the only doorway to Git. No other module imports `git2`,
//! and nothing shells out to the git CLI.
//!
//! # Responsibilities
//!
//! - Repository discovery and opening
//! - Release tag lookup
//!
//! # Invariants
//!
//! - Read-only: versiongate never creates, moves or pushes refs
//!
//! # Example
//!
//! ```no_run
//! use versiongate::git::Git;
//! use std::path::Path;
//!
//! let git = Git::open(Path::new(".")).unwrap();
//! git.ensure_tag_absent("v0.9.0").unwrap();
//! ```

mod interface;

pub use interface::{Git, GitError};
