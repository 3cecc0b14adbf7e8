//! Command line utility for building and maintaining glyph image datasets.

use std::process::ExitCode;

use anyhow::Result;
use cli::Action;

pub mod action;
pub mod cli;

fn main() -> Result<ExitCode> {
    let invocation = cli::get_invocation();

    env_logger::builder()
        .filter_level(level_filter(invocation.verbosity))
        .parse_default_env()
        .init();

    match invocation.action {
        Action::Casia(config) => action::ingest::casia(config)?,
        Action::Zhuojg(config) => action::ingest::zhuojg(config)?,
        Action::Fyp23(config) => action::ingest::fyp23(config)?,
        Action::Neumason(config) => action::ingest::neumason(config)?,
        Action::ContentImages(config) => action::content_images::content_images(config)?,
        Action::Prune(config) => action::reconcile::prune(config)?,
        Action::Balance(config) => action::reconcile::balance(config)?,
        Action::Compare(config) => {
            if !action::inspect::compare(config)? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Action::Summary(path) => action::inspect::summary(&path)?,
        Action::Extensions(path) => action::inspect::extensions(&path)?,
    }

    Ok(ExitCode::SUCCESS)
}

/// Returns the log level selected by the number of `--verbose` flags.
fn level_filter(verbosity: u8) -> log::LevelFilter {
    match verbosity {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}
