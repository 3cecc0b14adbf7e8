//! Command line parsing for the read-only `compare`, `summary`, and `extensions` subcommands.

use std::path::PathBuf;

use clap::{Arg, ArgMatches, Command};

/// Description of two trees to compare.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct CompareConfiguration {
    /// The first tree.
    pub left: PathBuf,
    /// The second tree.
    pub right: PathBuf,
}

/// Parses the arguments of the `compare` subcommand.
#[expect(
    clippy::missing_panics_doc,
    reason = "compare subcommand guarantees that these are present"
)]
pub fn parse_compare_arguments(matches: &ArgMatches) -> CompareConfiguration {
    CompareConfiguration {
        left: matches
            .get_one::<PathBuf>("left")
            .cloned()
            .expect("left is required"),
        right: matches
            .get_one::<PathBuf>("right")
            .cloned()
            .expect("right is required"),
    }
}

/// Parses the directory argument of the `summary` and `extensions` subcommands.
#[expect(
    clippy::missing_panics_doc,
    reason = "summary and extensions subcommands guarantee that this is present"
)]
pub fn parse_directory(matches: &ArgMatches) -> PathBuf {
    matches
        .get_one::<PathBuf>("dir")
        .cloned()
        .expect("dir is required")
}

/// Returns the command parser for a [`Action::Compare`][ac].
///
/// [ac]: crate::cli::Action::Compare
pub fn compare_subcommand_parser() -> Command {
    Command::new("compare")
        .about("Compare two directory trees, treating images by their pixels")
        .arg(positional_dir("left", "First directory"))
        .arg(positional_dir("right", "Second directory"))
}

/// Returns the command parser for a [`Action::Summary`][as].
///
/// [as]: crate::cli::Action::Summary
pub fn summary_subcommand_parser() -> Command {
    Command::new("summary")
        .about("Report the number of characters per font of a TargetImage directory")
        .arg(positional_dir("dir", "TargetImage directory"))
}

/// Returns the command parser for a [`Action::Extensions`][ae].
///
/// [ae]: crate::cli::Action::Extensions
pub fn extensions_subcommand_parser() -> Command {
    Command::new("extensions")
        .about("List the file extensions found anywhere in a directory tree")
        .arg(positional_dir("dir", "Directory to search"))
}

/// Returns a required positional directory argument.
fn positional_dir(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .value_name("DIR")
        .value_parser(clap::value_parser!(PathBuf))
        .required(true)
        .help(help)
}
