//! Log file location, timestamps, and removal of the colour codes used in
//! console output.
use std::borrow::Cow;
use std::fs;
use std::path::PathBuf;

/// Remove terminal escape sequences before a message reaches the log file.
///
/// A CSI sequence (`ESC [` … final byte in `@`..=`~`) is dropped whole; any
/// other escape drops `ESC` and the character after it. Messages without
/// escapes are returned as-is.
pub(super) fn strip_ansi(s: &str) -> Cow<'_, str> {
    if !s.contains('\x1b') {
        return Cow::Borrowed(s);
    }
    let mut parts = s.split('\x1b');
    let mut out = String::with_capacity(s.len());
    out.extend(parts.next());
    for part in parts {
        let mut chars = part.chars();
        match chars.next() {
            Some('[') => {
                let params = chars.as_str();
                let end = params
                    .find(|c: char| ('@'..='~').contains(&c))
                    .map_or(params.len(), |i| i + 1);
                out.push_str(params.get(end..).unwrap_or_default());
            }
            Some(_) => out.push_str(chars.as_str()),
            None => {}
        }
    }
    Cow::Owned(out)
}

/// `$XDG_CACHE_HOME`, else `~/.cache` (`%USERPROFILE%\.cache` on Windows).
fn cache_root() -> PathBuf {
    if let Some(dir) = std::env::var_os("XDG_CACHE_HOME").filter(|d| !d.is_empty()) {
        return PathBuf::from(dir);
    }
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map_or_else(|| PathBuf::from("."), PathBuf::from)
        .join(".cache")
}

/// Log file for `command`, e.g. `~/.cache/nightrover/run.log`.
///
/// Creates the directory; `None` when that fails, in which case runs still
/// log to the console.
pub(super) fn log_file_path(command: &str) -> Option<PathBuf> {
    let dir = cache_root().join("nightrover");
    fs::create_dir_all(&dir).ok()?;
    Some(dir.join(format!("{command}.log")))
}

/// Run header timestamp, `YYYY-MM-DD HH:MM:SS UTC`.
pub(super) fn run_timestamp() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Per-line timestamp, `HH:MM:SS` in UTC.
pub(super) fn line_timestamp() -> String {
    chrono::Utc::now().format("%H:%M:%S").to_string()
}
