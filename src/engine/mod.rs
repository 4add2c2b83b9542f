//! engine
//!
//! Orchestrates a gate run: Resolve -> Inspect -> Compare -> [Guard tag].
//!
//! # Architecture
//!
//! 1. **Resolve**: merge configuration, CLI overrides and discovery into
//!    concrete input paths and gate settings
//! 2. **Inspect**: read both inputs and extract their versions
//! 3. **Compare**: exact equality, no normalization
//! 4. **Guard tag**: optionally refuse a version whose tag already exists
//!
//! # Invariants
//!
//! - Every run starts from the files on disk; nothing is cached
//! - The engine never writes: no files, no refs
//! - A failure at any step fails the whole run
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use versiongate::core::config::Config;
//! use versiongate::engine::resolve::{resolve, Overrides};
//!
//! let project = Path::new(".");
//! let config = Config::load(project).unwrap().config;
//! let resolved = resolve(project, &config, &Overrides::default()).unwrap();
//! let report = resolved.gate.run(&resolved.inputs).unwrap();
//! println!("{}", report.tag_name(&resolved.tag_prefix));
//! ```

pub mod gate;
pub mod resolve;

pub use gate::{
    check_versions_match, Gate, GateError, GateInputs, GateReport, InputReport, InputRole,
    Inspection, MismatchError,
};
pub use resolve::{resolve, Overrides, PathOrigin, ResolveError, Resolved};

use std::path::PathBuf;

/// Execution context for commands.
///
/// Contains global settings derived from CLI flags that affect command behavior.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Project directory override.
    pub cwd: Option<PathBuf>,
    /// Debug logging enabled.
    pub debug: bool,
    /// Quiet mode (minimal output).
    pub quiet: bool,
}

impl Context {
    /// The directory the run applies to: `--cwd` or the process directory.
    pub fn project_dir(&self) -> std::io::Result<PathBuf> {
        match &self.cwd {
            Some(dir) => Ok(dir.clone()),
            None => std::env::current_dir(),
        }
    }
}
