//! git::interface
//!
//! The `Git` wrapper and its error type.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors from Git operations.
#[derive(Debug, Error)]
pub enum GitError {
    /// Not inside a Git repository.
    #[error("not a git repository: {path}")]
    NotARepo {
        /// The path that was searched
        path: PathBuf,
    },

    /// The release tag is already present.
    #[error("tag '{tag}' already exists; this version has been released before")]
    TagExists {
        /// The tag name
        tag: String,
    },

    /// The tag name is not a valid ref name.
    #[error("'{tag}' is not a valid tag name")]
    InvalidTagName {
        /// The rejected tag name
        tag: String,
    },

    /// Internal git2 error.
    #[error("git error: {message}")]
    Internal {
        /// The error message
        message: String,
    },
}

impl From<git2::Error> for GitError {
    fn from(err: git2::Error) -> Self {
        GitError::Internal {
            message: err.message().to_string(),
        }
    }
}

/// Handle to a discovered repository.
pub struct Git {
    repo: git2::Repository,
}

impl std::fmt::Debug for Git {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git")
            .field("git_dir", &self.repo.path())
            .finish()
    }
}

impl Git {
    /// Open the repository containing `path`, searching upward.
    ///
    /// Bare repositories are accepted: tags live in the object database,
    /// not the working tree.
    pub fn open(path: &Path) -> Result<Self, GitError> {
        let repo = git2::Repository::discover(path).map_err(|_| GitError::NotARepo {
            path: path.to_path_buf(),
        })?;
        Ok(Self { repo })
    }

    /// Path of the `.git` directory.
    pub fn git_dir(&self) -> &Path {
        self.repo.path()
    }

    /// Check whether `refs/tags/<tag>` exists.
    pub fn tag_exists(&self, tag: &str) -> Result<bool, GitError> {
        let refname = format!("refs/tags/{}", tag);
        if !git2::Reference::is_valid_name(&refname) {
            return Err(GitError::InvalidTagName {
                tag: tag.to_string(),
            });
        }

        match self.repo.find_reference(&refname) {
            Ok(_) => Ok(true),
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Fail with [`GitError::TagExists`] if the tag is already present.
    pub fn ensure_tag_absent(&self, tag: &str) -> Result<(), GitError> {
        if self.tag_exists(tag)? {
            return Err(GitError::TagExists {
                tag: tag.to_string(),
            });
        }
        Ok(())
    }
}
