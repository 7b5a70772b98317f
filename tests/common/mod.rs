// Shared helpers for integration tests.
//
// Provides a temporary directory of settings files plus a recording `Log`
// implementation, so each test can run the rewrite pipeline in isolation
// without touching the user's cache directory or the global subscriber.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use nightrover::logging::{Log, TargetStatus};
use nightrover::rewrite::TEMP_PREFIX;

/// A settings line carrying the attribute that gets stripped.
pub const DIRTY_LINE: &str = "<stream name=\"cam1\" video_3d=\"side_by_side\" bitrate=\"8000\"/>";

/// [`DIRTY_LINE`] after stripping.
pub const CLEAN_LINE: &str = "<stream name=\"cam1\" bitrate=\"8000\"/>";

/// One message captured by [`RecordingLog`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// `stage`
    Stage(String),
    /// `info`
    Info(String),
    /// `debug`
    Debug(String),
    /// `warn`
    Warn(String),
    /// `error`
    Error(String),
    /// `dry_run`
    DryRun(String),
    /// `record_target`
    Target(String, TargetStatus, Option<String>),
}

/// [`Log`] implementation that keeps every call in memory.
#[derive(Debug, Default)]
pub struct RecordingLog {
    entries: Mutex<Vec<Entry>>,
}

impl RecordingLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything logged so far.
    pub fn entries(&self) -> Vec<Entry> {
        self.entries.lock().expect("log mutex poisoned").clone()
    }

    /// Recorded `(name, status)` pairs in order.
    pub fn targets(&self) -> Vec<(String, TargetStatus)> {
        self.entries()
            .into_iter()
            .filter_map(|e| match e {
                Entry::Target(name, status, _) => Some((name, status)),
                _ => None,
            })
            .collect()
    }

    /// All `error` messages.
    pub fn errors(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter_map(|e| match e {
                Entry::Error(msg) => Some(msg),
                _ => None,
            })
            .collect()
    }

    fn push(&self, entry: Entry) {
        self.entries.lock().expect("log mutex poisoned").push(entry);
    }
}

impl Log for RecordingLog {
    fn stage(&self, msg: &str) {
        self.push(Entry::Stage(msg.to_string()));
    }
    fn info(&self, msg: &str) {
        self.push(Entry::Info(msg.to_string()));
    }
    fn debug(&self, msg: &str) {
        self.push(Entry::Debug(msg.to_string()));
    }
    fn warn(&self, msg: &str) {
        self.push(Entry::Warn(msg.to_string()));
    }
    fn error(&self, msg: &str) {
        self.push(Entry::Error(msg.to_string()));
    }
    fn dry_run(&self, msg: &str) {
        self.push(Entry::DryRun(msg.to_string()));
    }
    fn record_target(&self, name: &str, status: TargetStatus, message: Option<&str>) {
        self.push(Entry::Target(
            name.to_string(),
            status,
            message.map(str::to_string),
        ));
    }
}

/// A directory of settings files plus a separate staging directory, both
/// deleted on drop.
pub struct Workspace {
    /// Holds the target files.
    pub data: tempfile::TempDir,
    /// Used as the temp directory of every job.
    pub staging: tempfile::TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            data: tempfile::tempdir().expect("create data dir"),
            staging: tempfile::tempdir().expect("create staging dir"),
        }
    }

    /// Write `content` to `name` inside the data directory.
    pub fn file(&self, name: &str, content: impl AsRef<[u8]>) -> PathBuf {
        let path = self.data.path().join(name);
        std::fs::write(&path, content).expect("write target file");
        path
    }

    /// Path of `name` inside the data directory, without creating it.
    pub fn path(&self, name: &str) -> PathBuf {
        self.data.path().join(name)
    }

    pub fn staging_path(&self) -> &Path {
        self.staging.path()
    }

    /// Temp files left behind in either directory.
    pub fn leftovers(&self) -> Vec<PathBuf> {
        [self.data.path(), self.staging.path()]
            .iter()
            .flat_map(|dir| std::fs::read_dir(dir).expect("read dir"))
            .map(|entry| entry.expect("dir entry").path())
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with(TEMP_PREFIX))
            })
            .collect()
    }

    pub fn assert_no_leftovers(&self) {
        let leftovers = self.leftovers();
        assert!(leftovers.is_empty(), "temp files left behind: {leftovers:?}");
    }
}

/// Read a file as bytes.
pub fn read(path: &Path) -> Vec<u8> {
    std::fs::read(path).expect("read file")
}
