//! Safe in-place stripping of `video_3d` attributes from Spectra UI settings.
//!
//! The crate is organised in layers:
//!
//! - **[`rewrite`]** — the file-mutation pipeline: line transform, digest
//!   comparison, atomic rename
//! - **[`commands`]** — the job driver that runs the pipeline over every
//!   target file and reports per-file outcomes
//! - **[`config`]**, **[`platform`]**, **[`cli`]** — where targets, pattern
//!   and log level come from
//! - **[`logging`]** — the [`Log`](logging::Log) sink passed into the layers above
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod platform;
pub mod rewrite;
