//! User settings from `~/.nightrover.toml` and the environment.
//!
//! Every key is optional; unset keys fall back to the built-in defaults
//! (platform target list, [`DEFAULT_PATTERN`](crate::rewrite::DEFAULT_PATTERN),
//! system temp directory, `info` level).
//!
//! ```toml
//! log_level = "debug"
//! targets = ['C:\ProgramData\Streambox\SpectraUI\settings.xml']
//! pattern = 'video_3d *= *"[^"]+" ?'
//! temp_dir = 'C:\ProgramData\Streambox\SpectraUI'
//! ```
pub mod toml_loader;

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

/// File name looked up in the home directory when `--config` is not given.
pub const CONFIG_FILE_NAME: &str = ".nightrover.toml";

/// Environment variable overriding `log_level`.
pub const LOG_LEVEL_ENV: &str = "NIGHTROVER_LOG_LEVEL";

/// Environment variable overriding `temp_dir`.
pub const TEMP_DIR_ENV: &str = "NIGHTROVER_TEMP_DIR";

/// Settings as written in the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Log level name (`debug`, `info`, `warn`, `error`, `fatal`, `panic`).
    pub log_level: Option<String>,
    /// Files to process, replacing the platform defaults.
    pub targets: Option<Vec<PathBuf>>,
    /// Regular expression to strip, replacing the default pattern. Matched
    /// against raw bytes; see [`compile_pattern`](crate::rewrite::compile_pattern).
    pub pattern: Option<String>,
    /// Directory for temporary files.
    pub temp_dir: Option<PathBuf>,
}

impl Settings {
    /// Apply environment overrides, reading variables through `lookup`.
    ///
    /// Empty values are ignored.
    #[must_use]
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(level) = non_empty(LOG_LEVEL_ENV) {
            self.log_level = Some(level);
        }
        if let Some(dir) = non_empty(TEMP_DIR_ENV) {
            self.temp_dir = Some(PathBuf::from(dir));
        }
        self
    }
}

/// Settings together with the file they came from.
#[derive(Debug, Clone, Default)]
pub struct LoadedSettings {
    /// The parsed settings.
    pub settings: Settings,
    /// The file that was read, if any.
    pub path: Option<PathBuf>,
}

/// Path of the default config file in the user's home directory.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(|home| PathBuf::from(home).join(CONFIG_FILE_NAME))
}

/// Load settings from `explicit`, or from [`default_config_path`] when `None`.
///
/// A missing default file yields empty settings; a missing explicit file is
/// an error.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] or [`ConfigError::Parse`] when the chosen file
/// cannot be read or parsed.
pub fn load(explicit: Option<&Path>) -> Result<LoadedSettings, ConfigError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) if path.is_file() => path,
            _ => return Ok(LoadedSettings::default()),
        },
    };
    let settings = toml_loader::load_file(&path)?;
    Ok(LoadedSettings {
        settings,
        path: Some(path),
    })
}
