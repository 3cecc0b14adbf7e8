//! Command line parsing for the dataset ingestion subcommands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, ArgMatches, Command};

use crate::cli::{path_arg, required_path};

/// Description of a dataset whose source is converted into a single target tree.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct IngestConfiguration {
    /// The directory holding the raw dataset.
    pub source: PathBuf,
    /// The `TargetImage` directory to populate.
    pub target: PathBuf,
}

/// Description of how to copy the fyp23 dataset.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Fyp23Configuration {
    /// The directory holding `content/` and `data/`.
    pub source: PathBuf,
    /// The word list that tokens index into.
    pub wordlist: PathBuf,
    /// The dataset root to populate.
    pub output: PathBuf,
}

/// Description of how to copy the neumason dataset.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct NeumasonConfiguration {
    /// The directory holding one subdirectory per font.
    pub source: PathBuf,
    /// The dataset root to populate.
    pub output: PathBuf,
    /// The name of the font directory used for content images.
    pub content_font: String,
    /// The names of font directories to ignore.
    pub rejected: Vec<String>,
}

/// Parses the arguments of the `casia` and `zhuojg` subcommands.
pub fn parse_arguments(matches: &ArgMatches) -> IngestConfiguration {
    IngestConfiguration {
        source: required_path(matches, "source"),
        target: required_path(matches, "target"),
    }
}

/// Parses the arguments of the `fyp23` subcommand.
pub fn parse_fyp23_arguments(matches: &ArgMatches) -> Fyp23Configuration {
    Fyp23Configuration {
        source: required_path(matches, "source"),
        wordlist: required_path(matches, "wordlist"),
        output: required_path(matches, "output"),
    }
}

/// Parses the arguments of the `neumason` subcommand.
#[expect(
    clippy::missing_panics_doc,
    reason = "neumason subcommand guarantees that these are present"
)]
pub fn parse_neumason_arguments(matches: &ArgMatches) -> NeumasonConfiguration {
    let content_font = matches
        .get_one::<String>("content-font")
        .cloned()
        .expect("content-font is required");
    let rejected = matches
        .get_many::<String>("reject")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();

    NeumasonConfiguration {
        source: required_path(matches, "source"),
        output: required_path(matches, "output"),
        content_font,
        rejected,
    }
}

/// Returns the command parser for a [`Action::Casia`][ac].
///
/// [ac]: crate::cli::Action::Casia
pub fn casia_subcommand_parser() -> Command {
    Command::new("casia")
        .about("Render the GNT archives of a CASIA database into target images")
        .arg(path_arg("source", "Directory containing the .gnt archives"))
        .arg(path_arg("target", "TargetImage directory to write into"))
}

/// Returns the command parser for a [`Action::Zhuojg`][az].
///
/// [az]: crate::cli::Action::Zhuojg
pub fn zhuojg_subcommand_parser() -> Command {
    Command::new("zhuojg")
        .about("Convert the zhuojg dataset into target images")
        .arg(path_arg("source", "Directory laid out as <font>/<char>/<images>"))
        .arg(path_arg("target", "TargetImage directory to write into"))
}

/// Returns the command parser for a [`Action::Fyp23`][af].
///
/// [af]: crate::cli::Action::Fyp23
pub fn fyp23_subcommand_parser() -> Command {
    Command::new("fyp23")
        .about("Copy the fyp23 dataset, renaming tokens after word list characters")
        .arg(path_arg("source", "Directory containing content/ and data/"))
        .arg(path_arg("wordlist", "Word list the image tokens index into"))
        .arg(path_arg("output", "Dataset directory to write into"))
}

/// Returns the command parser for a [`Action::Neumason`][an].
///
/// [an]: crate::cli::Action::Neumason
pub fn neumason_subcommand_parser() -> Command {
    let content_font = Arg::new("content-font")
        .long("content-font")
        .value_name("DIR_NAME")
        .required(true)
        .help("Font directory whose images become the content images");

    let reject = Arg::new("reject")
        .long("reject")
        .value_name("DIR_NAME")
        .action(ArgAction::Append)
        .help("Font directory to leave out");

    Command::new("neumason")
        .about("Copy the neumason dataset into content and target images")
        .arg(path_arg("source", "Directory containing one directory per font"))
        .arg(path_arg("output", "Dataset directory to write into"))
        .arg(content_font)
        .arg(reject)
}
