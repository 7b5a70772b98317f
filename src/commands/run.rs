//! Command: strip the pattern from every target file.
use std::path::{Path, PathBuf};

use anyhow::Result;
use regex::bytes::Regex;

use super::CommandSetup;
use crate::error::ReplaceError;
use crate::logging::{Log, Logger, TargetStatus};
use crate::rewrite::{MutationJob, Outcome};

/// What happened to one target.
#[derive(Debug)]
pub struct TargetReport {
    /// The target file.
    pub path: PathBuf,
    /// Status on success, the error otherwise.
    pub result: Result<TargetStatus, ReplaceError>,
}

impl TargetReport {
    /// Final status, [`TargetStatus::Failed`] for errors.
    #[must_use]
    pub const fn status(&self) -> TargetStatus {
        match self.result {
            Ok(status) => status,
            Err(_) => TargetStatus::Failed,
        }
    }
}

/// Run one job. In dry-run mode the staged copy is always discarded and
/// [`Outcome::Updated`] means the file would change.
fn process_target(job: &MutationJob, dry_run: bool, log: &dyn Log) -> Result<Outcome, ReplaceError> {
    if dry_run {
        let staged = job.stage(log)?;
        let outcome = if staged.is_noop() {
            Outcome::AlreadyUpToDate
        } else {
            Outcome::Updated
        };
        staged.discard(log);
        return Ok(outcome);
    }
    job.replace(log)
}

/// Log a successful outcome and map it to its summary status.
fn report_outcome(name: &str, outcome: Outcome, dry_run: bool, log: &dyn Log) -> TargetStatus {
    match (outcome, dry_run) {
        (Outcome::AlreadyUpToDate, _) => {
            log.info(&format!("{name} is already updated"));
            TargetStatus::UpToDate
        }
        (Outcome::Updated, false) => {
            log.info(&format!("{name} updated"));
            TargetStatus::Updated
        }
        (Outcome::Updated, true) => {
            log.dry_run(&format!("would update {name}"));
            TargetStatus::DryRun
        }
    }
}

/// Process `targets` one after another, logging and recording each result.
///
/// A failing target never stops the ones after it.
pub fn process_targets(
    targets: &[PathBuf],
    pattern: &Regex,
    temp_dir: &Path,
    dry_run: bool,
    log: &dyn Log,
) -> Vec<TargetReport> {
    targets
        .iter()
        .map(|path| {
            let job = MutationJob::new(path.clone(), pattern.clone()).with_temp_dir(temp_dir);
            let name = path.display().to_string();
            let result = process_target(&job, dry_run, log)
                .map(|outcome| report_outcome(&name, outcome, dry_run, log));

            let message = result.as_ref().err().map(ToString::to_string);
            if let Some(msg) = &message {
                log.error(msg);
            }
            let report = TargetReport {
                path: path.clone(),
                result,
            };
            log.record_target(&name, report.status(), message.as_deref());
            report
        })
        .collect()
}

/// Run the `run` command.
///
/// # Errors
///
/// Returns an error if one or more targets failed.
pub fn run(setup: &CommandSetup, dry_run: bool, log: &Logger) -> Result<()> {
    log.stage(if dry_run {
        "Checking target files (dry run)"
    } else {
        "Updating target files"
    });

    process_targets(&setup.targets, &setup.pattern, &setup.temp_dir, dry_run, log);

    log.print_summary();

    let count = log.failure_count();
    if count > 0 {
        anyhow::bail!("{count} target(s) failed");
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::logging::isolated_logger;
    use crate::rewrite::default_pattern;
    use std::fs;

    #[test]
    fn failure_does_not_stop_later_targets() {
        let (log, _tmp, _guard) = isolated_logger();
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.xml");
        let valid = dir.path().join("settings.xml");
        fs::write(&valid, "<a video_3d=\"sbs\" b=\"1\"/>\n").unwrap();

        let reports = process_targets(
            &[missing.clone(), valid.clone()],
            &default_pattern(),
            dir.path(),
            false,
            &log,
        );

        assert_eq!(reports.len(), 2);
        assert!(matches!(
            reports[0].result,
            Err(ReplaceError::SourceUnavailable { .. })
        ));
        assert_eq!(reports[1].status(), TargetStatus::Updated);
        assert_eq!(fs::read_to_string(&valid).unwrap(), "<a b=\"1\"/>\n");

        let entries = log.entries();
        assert_eq!(entries[0].status, TargetStatus::Failed);
        assert!(entries[0].message.as_deref().unwrap().contains("unavailable"));
        assert_eq!(entries[1].status, TargetStatus::Updated);
        assert_eq!(log.failure_count(), 1);
    }

    #[test]
    fn dry_run_reports_without_writing() {
        let (log, _tmp, _guard) = isolated_logger();
        let dir = tempfile::tempdir().unwrap();
        let dirty = dir.path().join("dirty.xml");
        let clean = dir.path().join("clean.xml");
        fs::write(&dirty, "video_3d=\"x\" a\n").unwrap();
        fs::write(&clean, "a\n").unwrap();

        let reports = process_targets(
            &[dirty.clone(), clean],
            &default_pattern(),
            dir.path(),
            true,
            &log,
        );

        assert_eq!(reports[0].status(), TargetStatus::DryRun);
        assert_eq!(reports[1].status(), TargetStatus::UpToDate);
        assert_eq!(fs::read_to_string(&dirty).unwrap(), "video_3d=\"x\" a\n");
        let leftovers = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 2, "only the two targets should remain");
    }

    #[test]
    fn second_pass_is_up_to_date() {
        let (log, _tmp, _guard) = isolated_logger();
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("settings.xml");
        fs::write(&target, "video_3d = \"full_frame\" other=\"x\"\n").unwrap();
        let targets = [target];

        let first = process_targets(&targets, &default_pattern(), dir.path(), false, &log);
        let second = process_targets(&targets, &default_pattern(), dir.path(), false, &log);
        assert_eq!(first[0].status(), TargetStatus::Updated);
        assert_eq!(second[0].status(), TargetStatus::UpToDate);
    }

    #[test]
    fn run_fails_when_a_target_fails() {
        let (log, _tmp, _guard) = isolated_logger();
        let dir = tempfile::tempdir().unwrap();
        let setup = CommandSetup {
            targets: vec![dir.path().join("absent.xml")],
            pattern: default_pattern(),
            temp_dir: dir.path().to_path_buf(),
        };
        let err = run(&setup, false, &log).unwrap_err();
        assert_eq!(err.to_string(), "1 target(s) failed");
    }

    #[test]
    fn run_succeeds_when_all_targets_succeed() {
        let (log, _tmp, _guard) = isolated_logger();
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("settings.xml");
        fs::write(&target, "plain\n").unwrap();
        let setup = CommandSetup {
            targets: vec![target],
            pattern: default_pattern(),
            temp_dir: dir.path().to_path_buf(),
        };
        run(&setup, false, &log).unwrap();
        assert_eq!(log.entries()[0].status, TargetStatus::UpToDate);
    }

    #[test]
    fn every_outcome_is_logged() {
        let (log, _tmp, _guard) = isolated_logger();
        let dir = tempfile::tempdir().unwrap();
        let dirty = dir.path().join("dirty.xml");
        let clean = dir.path().join("clean.xml");
        let missing = dir.path().join("missing.xml");
        fs::write(&dirty, "video_3d=\"x\" a\n").unwrap();
        fs::write(&clean, "a\n").unwrap();
        let targets = [dirty.clone(), clean.clone(), missing.clone()];

        process_targets(&targets, &default_pattern(), dir.path(), true, &log);
        process_targets(&targets[..1], &default_pattern(), dir.path(), false, &log);

        let contents = fs::read_to_string(log.log_path().unwrap()).unwrap();
        assert!(contents.contains(&format!("[dry run] would update {}", dirty.display())));
        assert!(contents.contains(&format!("{} is already updated", clean.display())));
        assert!(contents.contains(&format!("[error] source file {}", missing.display())));
        assert!(contents.contains(&format!("{} updated", dirty.display())));
    }
}
