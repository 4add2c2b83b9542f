//! cli
//!
//! Command-line interface layer for versiongate.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Delegate to command handlers
//! - Map failures to exit codes
//!
//! # Exit Codes
//!
//! - `0`: versions match (or the command succeeded)
//! - `1`: versions differ
//! - `2`: the check could not be performed

pub mod args;
pub mod commands;

pub use args::{Cli, InputArgs};

use anyhow::Result;

use crate::engine::{self, GateError, MismatchError};

/// Exit code when the two versions differ.
pub const EXIT_MISMATCH: u8 = 1;

/// Exit code for every other failure.
pub const EXIT_FAILURE: u8 = 2;

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let ctx = engine::Context {
        cwd: cli.cwd.clone(),
        debug: cli.debug,
        quiet: cli.quiet,
    };

    commands::dispatch(cli.command, &ctx)
}

/// Exit code for an error returned by [`run`].
pub fn exit_code(err: &anyhow::Error) -> u8 {
    let mismatch = err.chain().any(|cause| {
        cause.is::<MismatchError>()
            || cause
                .downcast_ref::<GateError>()
                .is_some_and(GateError::is_mismatch)
    });

    if mismatch {
        EXIT_MISMATCH
    } else {
        EXIT_FAILURE
    }
}
