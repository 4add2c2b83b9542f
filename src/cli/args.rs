//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::engine::Overrides;

/// versiongate - Check that package metadata and source declare the same version
#[derive(Parser, Debug)]
#[command(name = "vgate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if vgate was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Where to read versions from, shared by the gate commands.
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Metadata record (default: config, then PKG-INFO or *.egg-info/PKG-INFO)
    #[arg(long, value_name = "PATH")]
    pub metadata: Option<PathBuf>,

    /// Source file declaring __version__ (default: config, then <name>/__init__.py)
    #[arg(long, value_name = "PATH")]
    pub source: Option<PathBuf>,

    /// Require exactly one version declaration in each file
    #[arg(long)]
    pub strict: bool,
}

impl InputArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            metadata: self.metadata.clone(),
            source: self.source.clone(),
            strict: self.strict,
        }
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Verify the metadata and source versions are identical
    #[command(
        name = "check",
        long_about = "Verify the metadata and source versions are identical.\n\n\
            Reads the version from the metadata record (the 'Version:' line of PKG-INFO) \
            and from the package source (the __version__ assignment) and compares them \
            byte for byte. No normalization is applied: 1.2.3, v1.2.3 and 1.2.3.0 are \
            all different versions.",
        after_help = "\
EXIT STATUS:
    0   versions match
    1   versions differ
    2   a version could not be read (missing file, missing or malformed line,
        bad config, existing release tag)

WORKFLOW EXAMPLES:
    # Gate a release in a Makefile
    release: test
        vgate check --require-new-tag
        python setup.py sdist upload
        git tag $$(vgate tag) && git push --tags

    # Explicit inputs
    vgate check --metadata pycronofy.egg-info/PKG-INFO --source pycronofy/__init__.py"
    )]
    Check {
        #[command(flatten)]
        inputs: InputArgs,

        /// Also fail if the release tag for this version already exists
        #[arg(long)]
        require_new_tag: bool,

        /// Emit a JSON report on stdout
        #[arg(long)]
        json: bool,
    },

    /// Show the version declared in each file
    #[command(
        name = "show",
        long_about = "Show the version declared in each file, with file and line.\n\n\
            Unlike check, show succeeds when the versions differ; it only fails \
            when a version cannot be read."
    )]
    Show {
        #[command(flatten)]
        inputs: InputArgs,

        /// Emit a JSON report on stdout
        #[arg(long)]
        json: bool,
    },

    /// Print the release tag name after the versions are verified
    #[command(
        name = "tag",
        long_about = "Run the gate and print the release tag name (tag prefix + version).\n\n\
            Nothing is printed and the exit status is non-zero if the versions differ. \
            vgate never creates the tag itself.",
        after_help = "\
WORKFLOW EXAMPLES:
    git tag -a \"$(vgate tag)\" -m \"Release $(vgate tag)\""
    )]
    Tag {
        #[command(flatten)]
        inputs: InputArgs,

        /// Fail if the tag already exists
        #[arg(long)]
        require_new_tag: bool,
    },

    /// Show effective configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        after_help = "\
INSTALLATION:
    vgate completion bash > ~/.local/share/bash-completion/completions/vgate
    vgate completion zsh > \"${fpath[1]}/_vgate\"
    vgate completion fish > ~/.config/fish/completions/vgate.fish"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Get a configuration value
    Get {
        /// Configuration key (e.g. tag_prefix, source_format.identifier)
        key: String,
    },
    /// List all configuration values
    List,
}
