//! Top-level subcommand orchestration.
pub mod run;
pub mod version;

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use regex::bytes::Regex;

use crate::cli::GlobalOpts;
use crate::config::Settings;
use crate::logging::{Log, LogLevel};
use crate::platform::{self, Platform};
use crate::rewrite;

/// Pick the console log level: `--verbose`, then `--log-level`, then the
/// settings (file or environment), then `info`.
///
/// Returns the unrecognised name alongside the fallback level so the caller
/// can warn about it once logging is up.
#[must_use]
pub fn resolve_log_level(global: &GlobalOpts, settings: &Settings) -> (LogLevel, Option<String>) {
    if global.verbose {
        return (LogLevel::Debug, None);
    }
    let Some(name) = global
        .log_level
        .as_deref()
        .or(settings.log_level.as_deref())
    else {
        return (LogLevel::default(), None);
    };
    LogLevel::from_name(name).map_or_else(
        || (LogLevel::default(), Some(name.to_string())),
        |level| (level, None),
    )
}

/// Everything a run needs, resolved from flags, settings and platform.
#[derive(Debug, Clone)]
pub struct CommandSetup {
    /// Absolute paths of the files to process, in order.
    pub targets: Vec<PathBuf>,
    /// Pattern stripped from every line.
    pub pattern: Regex,
    /// Directory for temporary files.
    pub temp_dir: PathBuf,
}

impl CommandSetup {
    /// Resolve targets, pattern and temp directory.
    ///
    /// Targets come from `--target`, then the `targets` setting, then the
    /// platform defaults. The temp directory comes from `--temp-dir`, then the
    /// `temp_dir` setting, then [`std::env::temp_dir`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured pattern does not compile, the
    /// platform has no default targets, or a relative target cannot be made
    /// absolute.
    pub fn init(
        global: &GlobalOpts,
        settings: &Settings,
        platform: &Platform,
        log: &dyn Log,
    ) -> Result<Self> {
        log.stage("Resolving targets");

        let raw_targets = if !global.targets.is_empty() {
            log.debug("using targets from the command line");
            global.targets.clone()
        } else if let Some(targets) = &settings.targets {
            log.debug("using targets from settings");
            targets.clone()
        } else {
            log.debug(&format!("using default targets for {}", platform.os));
            platform.default_targets()?
        };

        let targets = raw_targets
            .iter()
            .map(|p| {
                platform::absolutize(p)
                    .with_context(|| format!("resolving target path {}", p.display()))
            })
            .collect::<Result<Vec<_>>>()?;

        let pattern = match &settings.pattern {
            Some(src) => rewrite::compile_pattern(src)?,
            None => rewrite::default_pattern(),
        };

        let temp_dir = global
            .temp_dir
            .clone()
            .or_else(|| settings.temp_dir.clone())
            .unwrap_or_else(std::env::temp_dir);

        for target in &targets {
            log.debug(&format!("target: {}", target.display()));
        }
        log.debug(&format!("pattern: {}", pattern.as_str()));
        log.debug(&format!("temp dir: {}", temp_dir.display()));
        log.info(&format!("{} target file(s)", targets.len()));

        Ok(Self {
            targets,
            pattern,
            temp_dir,
        })
    }
}
