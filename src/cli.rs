//! Command-line interface definitions.
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI entry point.
#[derive(Parser, Debug)]
#[command(
    name = "nightrover",
    about = "Strip video_3d attributes from Spectra UI settings files",
    version
)]
pub struct Cli {
    /// Subcommand to run (defaults to `run`)
    #[command(subcommand)]
    pub command: Option<Command>,

    #[allow(missing_docs)]
    #[command(flatten)]
    pub global: GlobalOpts,
}

impl Cli {
    /// The subcommand to execute, `run` when none was given.
    #[must_use]
    pub fn subcommand(&self) -> Command {
        self.command.unwrap_or(Command::Run)
    }
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Config file (default: ~/.nightrover.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (debug, info, warn, error, fatal, panic)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    /// Shorthand for --log-level debug
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Report what would change without writing
    #[arg(short = 'd', long, global = true)]
    pub dry_run: bool,

    /// Target file to process; repeatable, replaces the default list
    #[arg(short, long = "target", global = true)]
    pub targets: Vec<PathBuf>,

    /// Directory for temporary files (default: system temp directory)
    #[arg(long, global = true)]
    pub temp_dir: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Strip the pattern from every target file
    Run,
    /// Print version information
    Version,
}

impl Command {
    /// Name used for the log file of this command.
    #[must_use]
    pub const fn log_name(self) -> &'static str {
        match self {
            Self::Run => "run",
            Self::Version => "version",
        }
    }
}
