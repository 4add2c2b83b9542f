//! ui::output
//!
//! Terminal output for gate results.
//!
//! Verdicts and values go to stdout, diagnostics to stderr. `--quiet`
//! silences verdict and warning lines but never a requested value or an
//! error. Under `--json` a command writes one JSON document to stdout
//! instead of its human-readable lines.

use std::fmt::Display;

use serde::Serialize;

/// How much the CLI prints besides errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Errors and requested values only
    Quiet,
    Normal,
    /// Also `[debug]` lines on stderr
    Debug,
}

impl Verbosity {
    /// `--quiet` wins over `--debug`.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Print a debug message (only in debug mode).
pub fn debug(message: impl Display, verbosity: Verbosity) {
    if verbosity == Verbosity::Debug {
        eprintln!("[debug] {}", message);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a warning message (respects quiet mode).
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("warning: {}", message);
    }
}

/// Print a passing verdict on stdout (respects quiet mode).
pub fn success(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print a supporting detail to stderr (respects quiet mode).
pub fn note(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("  {}", message);
    }
}

/// Print a command's result value on stdout (always shown).
pub fn value(message: impl Display) {
    println!("{}", message);
}

/// Print a value as pretty JSON on stdout (always shown).
pub fn json<T: Serialize>(value: &T) -> serde_json::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Format a `(key, value)` list as aligned `key = value` lines.
pub fn format_entries<K: Display, V: Display>(entries: &[(K, V)]) -> String {
    let width = entries
        .iter()
        .map(|(k, _)| k.to_string().len())
        .max()
        .unwrap_or(0);

    entries
        .iter()
        .map(|(k, v)| format!("{:<width$} = {}", k.to_string(), v, width = width))
        .collect::<Vec<_>>()
        .join("\n")
}
