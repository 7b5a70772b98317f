//! Domain-specific error types for nightrover.
//!
//! Library code returns the typed errors below; the binary and command
//! handlers convert them to [`anyhow::Error`] via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! ReplaceError   — one rewrite job (temp file, source, transform, digest, rename)
//! ConfigError    — settings file loading and pattern compilation
//! PlatformError  — default target discovery
//! ```

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by a single [`MutationJob`](crate::rewrite::MutationJob).
///
/// Whatever the variant, the job's temporary file has been removed and the
/// source file left untouched by the time the error is returned.
#[derive(Error, Debug)]
pub enum ReplaceError {
    /// The temporary file could not be created (directory missing,
    /// unwritable, or out of space).
    #[error("failed to create temporary file in {}: {source}", .dir.display())]
    TempFileCreationFailed {
        /// Directory the temporary file was to be created in.
        dir: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The source file is missing or cannot be opened for reading.
    #[error("source file {} is unavailable: {source}", .path.display())]
    SourceUnavailable {
        /// Path of the source file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Reading the source or writing the temporary file failed mid-way.
    #[error("failed to transform {}: {source}", .path.display())]
    TransformIoFailure {
        /// Path of the source file being transformed.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// One of the two files could not be read for hashing.
    #[error("failed to compute digest of {}: {source}", .path.display())]
    DigestComputationFailed {
        /// Path of the file that could not be hashed.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The atomic rename of the temporary file onto the source failed.
    #[error("failed to replace {}: {source}", .path.display())]
    ReplaceFailed {
        /// Path of the source file that was to be replaced.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}

/// Errors that arise while loading settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The settings file exists (or was requested explicitly) but cannot be read.
    #[error("IO error reading config file {}: {source}", .path.display())]
    Io {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The settings file is not valid TOML or contains unknown keys.
    #[error("invalid config file {}: {source}", .path.display())]
    Parse {
        /// Path to the file that could not be parsed.
        path: PathBuf,
        /// Underlying TOML error.
        source: toml::de::Error,
    },

    /// The configured pattern is not a valid regular expression.
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The pattern as written in the settings.
        pattern: String,
        /// Underlying regex compilation error.
        source: regex::Error,
    },
}

/// Errors that arise from platform-specific behaviour.
#[derive(Error, Debug)]
pub enum PlatformError {
    /// There is no default list of target files for this platform.
    #[error("no default target files for platform '{platform}'; pass --target explicitly")]
    Unsupported {
        /// Name of the platform (e.g. `"freebsd"`).
        platform: String,
    },
}
