//! tag command - Print the release tag for a verified version

use anyhow::Result;

use super::{prepare, verbosity};
use crate::cli::args::InputArgs;
use crate::engine::Context;
use crate::git::Git;
use crate::ui::output;

/// Run the gate and print `<tag_prefix><version>`.
pub fn tag(ctx: &Context, inputs: &InputArgs, require_new_tag: bool) -> Result<()> {
    let (project_dir, resolved) = prepare(ctx, inputs)?;
    let report = resolved.gate.run(&resolved.inputs)?;

    let name = if require_new_tag {
        let git = Git::open(&project_dir)?;
        resolved.gate.guard_tag(&report, &git, &resolved.tag_prefix)?
    } else {
        report.tag_name(&resolved.tag_prefix)
    };

    output::debug(
        format!("version {} agreed, tag prefix '{}'", report.version, resolved.tag_prefix),
        verbosity(ctx),
    );
    output::value(name);

    Ok(())
}
