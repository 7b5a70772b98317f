//! Core logging types: target entries, status, level names and the [`Log`] trait.
use std::fmt;

use tracing_subscriber::filter::LevelFilter;

/// Per-target result for summary reporting.
#[derive(Debug, Clone)]
pub struct TargetEntry {
    /// Path of the target file, as displayed.
    pub name: String,
    /// Final status of the target.
    pub status: TargetStatus,
    /// Optional detail message (e.g. the error description).
    pub message: Option<String>,
}

/// Status of a processed target file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetStatus {
    /// The file was rewritten.
    Updated,
    /// The file already had nothing to strip.
    UpToDate,
    /// Dry-run mode: the file would have been rewritten.
    DryRun,
    /// The file could not be processed.
    Failed,
}

/// Level names accepted by `--log-level`, `NIGHTROVER_LOG_LEVEL` and the
/// `log_level` setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Everything, including per-file staging details.
    Debug,
    /// Per-file outcomes and the summary.
    #[default]
    Info,
    /// Warnings and errors only.
    Warn,
    /// Errors only.
    Error,
    /// Alias of [`LogLevel::Error`].
    Fatal,
    /// Alias of [`LogLevel::Error`].
    Panic,
}

impl LogLevel {
    /// Parse a level name, case-insensitively.
    ///
    /// Returns `None` for unknown names; callers fall back to
    /// [`LogLevel::Info`] and warn.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" => Some(Self::Error),
            "fatal" => Some(Self::Fatal),
            "panic" => Some(Self::Panic),
            _ => None,
        }
    }

    /// Console filter for this level.
    #[must_use]
    pub const fn filter(self) -> LevelFilter {
        match self {
            Self::Debug => LevelFilter::DEBUG,
            Self::Info => LevelFilter::INFO,
            Self::Warn => LevelFilter::WARN,
            Self::Error | Self::Fatal | Self::Panic => LevelFilter::ERROR,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Fatal => "fatal",
            Self::Panic => "panic",
        };
        f.write_str(name)
    }
}

/// Abstraction over logging sinks.
///
/// The rewrite pipeline and the job driver take a `&dyn Log` instead of
/// reaching for global state, so callers decide where output goes.
/// [`Logger`](super::logger::Logger) is the production implementation.
pub trait Log: Send + Sync {
    /// Log a stage header (major section).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (may be suppressed on console).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Log a dry-run action message.
    fn dry_run(&self, msg: &str);
    /// Record a target result for the summary.
    fn record_target(&self, name: &str, status: TargetStatus, message: Option<&str>);
}
