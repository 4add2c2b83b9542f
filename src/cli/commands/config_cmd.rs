//! config command - Show effective configuration values

use anyhow::Result;

use super::load_config;
use crate::engine::Context;
use crate::ui::output;

/// Print one effective configuration value.
pub fn get(ctx: &Context, key: &str) -> Result<()> {
    let (_, config) = load_config(ctx)?;
    output::value(config.get(key)?);
    Ok(())
}

/// List all effective configuration values and where they came from.
pub fn list(ctx: &Context) -> Result<()> {
    let (_, config) = load_config(ctx)?;

    let describe = |path: Option<&std::path::Path>| {
        path.map_or_else(|| "(none)".to_string(), |p| p.display().to_string())
    };

    output::value("# versiongate configuration");
    output::value(format!("# global:  {}", describe(config.global_path())));
    output::value(format!("# project: {}", describe(config.project_path())));
    output::value(output::format_entries(&config.entries()));

    Ok(())
}
