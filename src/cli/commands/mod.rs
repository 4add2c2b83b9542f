//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Loads configuration and resolves the gate's inputs
//! 2. Calls the engine
//! 3. Formats and displays output
//!
//! Handlers never write files or refs.

mod check;
mod completion;
mod config_cmd;
mod show;
mod tag;

// Re-export command functions for testing and direct invocation
pub use check::check;
pub use completion::completion;
pub use config_cmd::{get as config_get, list as config_list};
pub use show::show;
pub use tag::tag;

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use crate::cli::args::{Command, ConfigAction, InputArgs};
use crate::core::config::{Config, ConfigLoadResult};
use crate::engine::{self, Context, Resolved};
use crate::ui::output::{self, Verbosity};

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Check {
            inputs,
            require_new_tag,
            json,
        } => check(ctx, &inputs, require_new_tag, json),
        Command::Show { inputs, json } => show(ctx, &inputs, json),
        Command::Tag {
            inputs,
            require_new_tag,
        } => tag(ctx, &inputs, require_new_tag),
        Command::Config { action } => match action {
            ConfigAction::Get { key } => config_get(ctx, &key),
            ConfigAction::List => config_list(ctx),
        },
        Command::Completion { shell } => completion(shell),
    }
}

/// Verbosity for a context.
fn verbosity(ctx: &Context) -> Verbosity {
    Verbosity::from_flags(ctx.quiet, ctx.debug)
}

/// Project directory and its loaded configuration, with warnings shown.
fn load_config(ctx: &Context) -> Result<(PathBuf, Config)> {
    let verbosity = verbosity(ctx);
    let project_dir = ctx
        .project_dir()
        .context("Failed to determine the project directory")?;

    let ConfigLoadResult { config, warnings } =
        Config::load(&project_dir).context("Failed to load configuration")?;
    for warning in warnings {
        output::warn(
            format!("{} ({})", warning.message, warning.path.display()),
            verbosity,
        );
    }

    if let Some(path) = config.global_path() {
        output::debug(format!("global config: {}", path.display()), verbosity);
    }
    if let Some(path) = config.project_path() {
        output::debug(format!("project config: {}", path.display()), verbosity);
    }

    Ok((project_dir, config))
}

/// Load configuration and resolve the gate for `inputs`.
fn prepare(ctx: &Context, inputs: &InputArgs) -> Result<(PathBuf, Resolved)> {
    let verbosity = verbosity(ctx);
    let (project_dir, config) = load_config(ctx)?;

    let resolved = engine::resolve(&project_dir, &config, &inputs.overrides())
        .context("Failed to locate the version files")?;

    output::debug(
        format!(
            "metadata: {} ({})",
            resolved.inputs.metadata.display(),
            resolved.metadata_origin
        ),
        verbosity,
    );
    output::debug(
        format!(
            "source: {} ({})",
            resolved.inputs.source.display(),
            resolved.source_origin
        ),
        verbosity,
    );
    output::debug(format!("policy: {:?}", resolved.gate.policy), verbosity);

    Ok((project_dir, resolved))
}

/// Show a path relative to the project directory when it is inside it.
fn display_path(project_dir: &Path, path: &Path) -> String {
    path.strip_prefix(project_dir)
        .unwrap_or(path)
        .display()
        .to_string()
}
