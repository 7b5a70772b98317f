//! Safe, atomic in-place rewriting of text files.
//!
//! A [`MutationJob`] names one source file and the pattern to strip from it.
//! [`MutationJob::replace`] runs the whole pipeline:
//!
//! 1. stream the source through [`transform`] into a `nightrover_*` temp file,
//! 2. compare the SHA-256 digests of the temp file and the source,
//! 3. rename the temp file over the source if they differ, delete it otherwise.
//!
//! The temp file is owned by a [`StagedRewrite`] between steps 2 and 3 and is
//! removed on every exit path, including early error returns.
mod digest;
mod transform;

use std::fs::File;
use std::io::{BufReader, BufWriter, Write as _};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::bytes::{Regex, RegexBuilder};
use tempfile::NamedTempFile;

pub use transform::{strip_line, transform};

use self::digest::Digest;
use crate::error::{ConfigError, ReplaceError};
use crate::logging::Log;

/// Pattern removed by default: a `video_3d="…"` attribute, tolerant of spaces
/// around `=`, together with one optional trailing space.
pub const DEFAULT_PATTERN: &str = r#"video_3d *= *"[^"]+" ?"#;

/// File-name prefix of every temporary file created by a [`MutationJob`].
pub const TEMP_PREFIX: &str = "nightrover_";

#[allow(clippy::expect_used)]
static DEFAULT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    build_pattern(DEFAULT_PATTERN).expect("default pattern is hardcoded and valid")
});

/// Patterns match raw bytes: `[^"]` and `.` accept any byte, so values in a
/// legacy encoding are still matched. Unicode classes need an explicit `(?u)`.
fn build_pattern(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).unicode(false).build()
}

/// The compiled [`DEFAULT_PATTERN`].
#[must_use]
pub fn default_pattern() -> Regex {
    DEFAULT_REGEX.clone()
}

/// Compile a user-supplied pattern with the same byte semantics as
/// [`DEFAULT_PATTERN`].
///
/// # Errors
///
/// Returns [`ConfigError::InvalidPattern`] if `pattern` is not a valid regex.
pub fn compile_pattern(pattern: &str) -> Result<Regex, ConfigError> {
    build_pattern(pattern).map_err(|source| ConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// Result of a successful [`MutationJob::replace`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The source was rewritten.
    Updated,
    /// Stripping the pattern changed nothing; the source was not written.
    AlreadyUpToDate,
}

/// One rewrite of one file: which file, what to strip, where to stage.
#[derive(Debug, Clone)]
pub struct MutationJob {
    source: PathBuf,
    pattern: Regex,
    temp_dir: PathBuf,
}

impl MutationJob {
    /// Create a job staging its temp file in [`std::env::temp_dir`].
    #[must_use]
    pub fn new(source: impl Into<PathBuf>, pattern: Regex) -> Self {
        Self {
            source: source.into(),
            pattern,
            temp_dir: std::env::temp_dir(),
        }
    }

    /// Stage the temp file in `dir` instead.
    ///
    /// The final rename only succeeds when `dir` is on the same filesystem as
    /// the source.
    #[must_use]
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = dir.into();
        self
    }

    /// The file this job rewrites.
    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// The directory the temp file is created in.
    #[must_use]
    pub fn temp_dir(&self) -> &Path {
        &self.temp_dir
    }

    /// Write the transformed source to a temp file and compare digests.
    ///
    /// The source file is only read. Its handle is closed before this returns.
    ///
    /// # Errors
    ///
    /// Returns [`ReplaceError::TempFileCreationFailed`],
    /// [`ReplaceError::SourceUnavailable`], [`ReplaceError::TransformIoFailure`]
    /// or [`ReplaceError::DigestComputationFailed`]. The temp file has been
    /// deleted by the time any of them is returned.
    pub fn stage(&self, log: &dyn Log) -> Result<StagedRewrite, ReplaceError> {
        let mut temp = tempfile::Builder::new()
            .prefix(TEMP_PREFIX)
            .tempfile_in(&self.temp_dir)
            .map_err(|source| ReplaceError::TempFileCreationFailed {
                dir: self.temp_dir.clone(),
                source,
            })?;

        log.debug(&format!(
            "temporary file {} created to update {}",
            temp.path().display(),
            self.source.display()
        ));

        let source_file =
            File::open(&self.source).map_err(|source| ReplaceError::SourceUnavailable {
                path: self.source.clone(),
                source,
            })?;

        let written = {
            let mut writer = BufWriter::new(temp.as_file_mut());
            transform(BufReader::new(&source_file), &self.pattern, &mut writer)
                .and_then(|()| writer.flush())
        };
        written
            .and_then(|()| temp.as_file().sync_all())
            .map_err(|source| ReplaceError::TransformIoFailure {
                path: self.source.clone(),
                source,
            })?;
        drop(source_file);

        let unchanged = same_content(temp.path(), &self.source)?;
        Ok(StagedRewrite {
            temp,
            target: self.source.clone(),
            unchanged,
        })
    }

    /// Rewrite the source in place if stripping the pattern changes it.
    ///
    /// # Errors
    ///
    /// Any [`ReplaceError`]. On error the source is left exactly as it was and
    /// no temp file remains.
    pub fn replace(&self, log: &dyn Log) -> Result<Outcome, ReplaceError> {
        self.stage(log)?.commit(log)
    }
}

/// Compare the SHA-256 digests of `staged` and `original`.
fn same_content(staged: &Path, original: &Path) -> Result<bool, ReplaceError> {
    let digest = |path: &Path| {
        Digest::of_file(path).map_err(|source| ReplaceError::DigestComputationFailed {
            path: path.to_path_buf(),
            source,
        })
    };
    Ok(digest(staged)? == digest(original)?)
}

/// A transformed copy of a source file, waiting to be committed or discarded.
///
/// Dropping it deletes the temp file.
#[derive(Debug)]
#[must_use = "a staged rewrite does nothing until it is committed or discarded"]
pub struct StagedRewrite {
    temp: NamedTempFile,
    target: PathBuf,
    unchanged: bool,
}

impl StagedRewrite {
    /// `true` when the transformed copy is byte-identical to the source.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.unchanged
    }

    /// Path of the staged temp file.
    #[must_use]
    pub fn temp_path(&self) -> &Path {
        self.temp.path()
    }

    /// Path the staged file would replace.
    #[must_use]
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Rename the temp file over the target, or delete it if nothing changed.
    ///
    /// # Errors
    ///
    /// Returns [`ReplaceError::ReplaceFailed`] if the rename fails; the temp
    /// file is deleted and the target keeps its original content.
    pub fn commit(self, log: &dyn Log) -> Result<Outcome, ReplaceError> {
        if self.unchanged {
            self.discard(log);
            return Ok(Outcome::AlreadyUpToDate);
        }

        let Self { temp, target, .. } = self;
        temp.persist(&target)
            .map_err(|e| ReplaceError::ReplaceFailed {
                path: target.clone(),
                source: e.error,
            })?;
        Ok(Outcome::Updated)
    }

    /// Delete the temp file without touching the target.
    pub fn discard(self, log: &dyn Log) {
        let path = self.temp.path().to_path_buf();
        if let Err(e) = self.temp.close() {
            log.warn(&format!(
                "failed to remove temporary file {}: {e}",
                path.display()
            ));
        }
    }
}
