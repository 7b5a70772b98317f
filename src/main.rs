//! `nightrover` binary: strips `video_3d` attributes from Spectra UI settings files.
use anyhow::Result;
use clap::Parser;

use nightrover::cli::{Cli, Command};
use nightrover::commands::{self, CommandSetup};
use nightrover::config;
use nightrover::logging::{self, Logger};
use nightrover::platform::Platform;

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();

    match args.subcommand() {
        Command::Version => {
            commands::version::run();
            Ok(())
        }
        command @ Command::Run => run(&args, command),
    }
}

fn run(args: &Cli, command: Command) -> Result<()> {
    let loaded = config::load(args.global.config.as_deref())?;
    let settings = loaded.settings.with_env(|key| std::env::var(key).ok());

    let (level, unknown_level) = commands::resolve_log_level(&args.global, &settings);
    logging::init_subscriber(level.filter(), command.log_name());
    let log = Logger::new(command.log_name());

    if let Some(name) = unknown_level {
        log.warn(&format!("unknown log level '{name}', using {level}"));
    }
    if let Some(path) = &loaded.path {
        log.debug(&format!("using config file: {}", path.display()));
    }

    let setup = CommandSetup::init(&args.global, &settings, &Platform::detect(), &log)?;
    commands::run::run(&setup, args.global.dry_run, &log)
}
