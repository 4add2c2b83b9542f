//! show command - Print the version declared in each file

use anyhow::Result;
use serde::Serialize;

use super::{display_path, prepare};
use crate::cli::args::InputArgs;
use crate::engine::{Context, InputReport};
use crate::ui::output;

#[derive(Debug, Serialize)]
struct ShowOutput<'a> {
    matches: bool,
    metadata: &'a InputReport,
    source: &'a InputReport,
}

/// Print both extracted versions.
///
/// Succeeds whether or not they agree; fails only when a version cannot
/// be read.
pub fn show(ctx: &Context, inputs: &InputArgs, json: bool) -> Result<()> {
    let (project_dir, resolved) = prepare(ctx, inputs)?;
    let inspection = resolved.gate.inspect(&resolved.inputs)?;
    let matches = inspection.verdict().is_ok();

    if json {
        output::json(&ShowOutput {
            matches,
            metadata: &inspection.metadata,
            source: &inspection.source,
        })?;
        return Ok(());
    }

    for (role, input) in [
        ("metadata", &inspection.metadata),
        ("source", &inspection.source),
    ] {
        output::value(format!(
            "{:<8}  {}  {}:{}",
            role,
            input.version,
            display_path(&project_dir, &input.path),
            input.line
        ));
    }

    if !matches && !ctx.quiet {
        output::value("(versions differ)");
    }

    Ok(())
}
