//! Command line parsing for the `prune` and `balance` subcommands.

use std::path::PathBuf;

use clap::{ArgMatches, Command};

use crate::cli::{path_arg, required_path};

/// The two trees of a dataset.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct DatasetConfiguration {
    /// The `ContentImage` directory.
    pub content: PathBuf,
    /// The `TargetImage` directory.
    pub target: PathBuf,
}

/// Parses the arguments of the `prune` and `balance` subcommands.
pub fn parse_arguments(matches: &ArgMatches) -> DatasetConfiguration {
    DatasetConfiguration {
        content: required_path(matches, "content"),
        target: required_path(matches, "target"),
    }
}

/// Returns the command parser for a [`Action::Prune`][ap].
///
/// [ap]: crate::cli::Action::Prune
pub fn prune_subcommand_parser() -> Command {
    dataset_command("prune").about("Delete target images that have no content image")
}

/// Returns the command parser for a [`Action::Balance`][ab].
///
/// [ab]: crate::cli::Action::Balance
pub fn balance_subcommand_parser() -> Command {
    dataset_command("balance")
        .about("Keep only the characters present in every font and in the content images")
}

/// Returns a subcommand taking the `--content` and `--target` directories of a dataset.
fn dataset_command(name: &'static str) -> Command {
    Command::new(name)
        .arg(path_arg("content", "ContentImage directory"))
        .arg(path_arg("target", "TargetImage directory"))
}
