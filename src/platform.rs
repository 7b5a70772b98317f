//! Operating-system detection and the default list of target files.
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::PlatformError;

/// Spectra UI settings on Windows, backup first.
const WINDOWS_TARGETS: [&str; 2] = [
    r"C:\ProgramData\Streambox\SpectraUI\settings.xml.bak",
    r"C:\ProgramData\Streambox\SpectraUI\settings.xml",
];

/// Local test data on Unix-like systems, relative to the working directory.
const UNIX_TARGETS: [&str; 2] = ["data/settings.xml.bak", "data/settings.xml"];

/// Detected operating system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    /// Linux.
    Linux,
    /// macOS.
    MacOs,
    /// Windows.
    Windows,
    /// Anything else, carrying [`std::env::consts::OS`].
    Other(&'static str),
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linux => write!(f, "linux"),
            Self::MacOs => write!(f, "macos"),
            Self::Windows => write!(f, "windows"),
            Self::Other(name) => write!(f, "{name}"),
        }
    }
}

/// Platform information for the current system.
#[derive(Debug, Clone)]
pub struct Platform {
    /// Operating system the binary runs on.
    pub os: Os,
}

impl Platform {
    /// Detect the current platform.
    #[must_use]
    pub fn detect() -> Self {
        Self::new(Self::detect_os())
    }

    /// Create a platform with an explicit OS.
    #[must_use]
    pub const fn new(os: Os) -> Self {
        Self { os }
    }

    /// Default target files for this platform, in processing order.
    ///
    /// Paths are returned as written; see [`absolutize`] before use.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Unsupported`] when the platform has no known
    /// settings location.
    pub fn default_targets(&self) -> Result<Vec<PathBuf>, PlatformError> {
        let paths: &[&str] = match self.os {
            Os::Windows => &WINDOWS_TARGETS,
            Os::Linux | Os::MacOs => &UNIX_TARGETS,
            Os::Other(name) => {
                return Err(PlatformError::Unsupported {
                    platform: name.to_string(),
                });
            }
        };
        Ok(paths.iter().map(PathBuf::from).collect())
    }

    fn detect_os() -> Os {
        match std::env::consts::OS {
            "linux" => Os::Linux,
            "macos" => Os::MacOs,
            "windows" => Os::Windows,
            other => Os::Other(other),
        }
    }
}

/// Resolve `path` against the current directory without touching the
/// filesystem, so missing files still get a stable absolute path to report.
///
/// # Errors
///
/// Returns an error if the current directory cannot be determined.
pub fn absolutize(path: &Path) -> io::Result<PathBuf> {
    std::path::absolute(path).map(|p| dunce::simplified(&p).to_path_buf())
}
