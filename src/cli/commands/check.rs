//! check command - Gate a release on matching versions

use anyhow::Result;
use serde::Serialize;

use super::{display_path, prepare, verbosity};
use crate::cli::args::InputArgs;
use crate::core::types::Version;
use crate::engine::{Context, InputReport, Inspection};
use crate::git::Git;
use crate::ui::output;

/// JSON report for `check --json`.
#[derive(Debug, Serialize)]
struct CheckOutput<'a> {
    status: &'static str,
    version: Option<&'a Version>,
    tag: Option<&'a str>,
    metadata: &'a InputReport,
    source: &'a InputReport,
}

/// Verify the metadata and source versions are identical.
///
/// Prints `Versions match` on success. On mismatch, returns the
/// [`MismatchError`](crate::engine::MismatchError) so the process exits 1.
pub fn check(ctx: &Context, inputs: &InputArgs, require_new_tag: bool, json: bool) -> Result<()> {
    let verbosity = verbosity(ctx);
    let (project_dir, resolved) = prepare(ctx, inputs)?;

    let inspection = resolved.gate.inspect(&resolved.inputs)?;

    if let Err(mismatch) = inspection.verdict() {
        if json {
            output::json(&CheckOutput {
                status: "mismatch",
                version: None,
                tag: None,
                metadata: &inspection.metadata,
                source: &inspection.source,
            })?;
        } else {
            report_locations(&project_dir, &inspection, verbosity);
        }
        return Err(mismatch.into());
    }

    let report = inspection.into_report()?;

    let tag = if require_new_tag {
        let git = Git::open(&project_dir)?;
        output::debug(format!("git dir: {}", git.git_dir().display()), verbosity);
        Some(resolved.gate.guard_tag(&report, &git, &resolved.tag_prefix)?)
    } else {
        None
    };

    if json {
        output::json(&CheckOutput {
            status: "match",
            version: Some(&report.version),
            tag: tag.as_deref(),
            metadata: &report.metadata,
            source: &report.source,
        })?;
    } else {
        output::success("Versions match", verbosity);
        output::debug(format!("version: {}", report.version), verbosity);
        if let Some(tag) = &tag {
            output::debug(format!("tag '{}' is free", tag), verbosity);
        }
    }

    Ok(())
}

fn report_locations(
    project_dir: &std::path::Path,
    inspection: &Inspection,
    verbosity: output::Verbosity,
) {
    for (role, input) in [
        ("metadata", &inspection.metadata),
        ("source", &inspection.source),
    ] {
        output::note(
            format!(
                "{:<8} {} at {}:{}",
                role,
                input.version,
                display_path(project_dir, &input.path),
                input.line
            ),
            verbosity,
        );
    }
}
