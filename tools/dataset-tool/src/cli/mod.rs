//! Command line parsing and [`Action`] construction.

pub mod content_images;
pub mod ingest;
pub mod inspect;
pub mod reconcile;

use std::path::PathBuf;

use clap::{Arg, ArgAction, ArgMatches, Command};

pub use content_images::ContentImagesConfiguration;
pub use ingest::{Fyp23Configuration, IngestConfiguration, NeumasonConfiguration};
pub use inspect::CompareConfiguration;
pub use reconcile::DatasetConfiguration;

/// A parsed command line.
#[derive(Clone, Debug, PartialEq)]
pub struct Invocation {
    /// The number of times `--verbose` was given.
    pub verbosity: u8,
    /// The action to carry out.
    pub action: Action,
}

/// Parses `dataset-tool`'s arguments to construct an [`Invocation`].
pub fn get_invocation() -> Invocation {
    parse_invocation(&command_parser().get_matches())
}

/// Constructs an [`Invocation`] from the matches of [`command_parser()`].
#[expect(
    clippy::missing_panics_doc,
    reason = "clap guarantees that a known subcommand is present"
)]
pub fn parse_invocation(matches: &ArgMatches) -> Invocation {
    let (subcommand_name, subcommand_matches) =
        matches.subcommand().expect("subcommand is required");
    let verbosity = matches
        .get_count("verbose")
        .max(subcommand_matches.get_count("verbose"));
    let action = match subcommand_name {
        "casia" => Action::Casia(ingest::parse_arguments(subcommand_matches)),
        "zhuojg" => Action::Zhuojg(ingest::parse_arguments(subcommand_matches)),
        "fyp23" => Action::Fyp23(ingest::parse_fyp23_arguments(subcommand_matches)),
        "neumason" => Action::Neumason(ingest::parse_neumason_arguments(subcommand_matches)),
        "content-images" => {
            Action::ContentImages(content_images::parse_arguments(subcommand_matches))
        }
        "prune" => Action::Prune(reconcile::parse_arguments(subcommand_matches)),
        "balance" => Action::Balance(reconcile::parse_arguments(subcommand_matches)),
        "compare" => Action::Compare(inspect::parse_compare_arguments(subcommand_matches)),
        "summary" => Action::Summary(inspect::parse_directory(subcommand_matches)),
        "extensions" => Action::Extensions(inspect::parse_directory(subcommand_matches)),
        _ => unreachable!("unexpected subcommand: {subcommand_name:?}"),
    };

    Invocation { verbosity, action }
}

/// Returns the command parser for all [`Action`]s.
pub fn command_parser() -> Command {
    let verbose = Arg::new("verbose")
        .short('v')
        .long("verbose")
        .action(ArgAction::Count)
        .global(true)
        .help("Raise the log level, once for debug and twice for trace");

    Command::new("dataset-tool")
        .about("Builds and maintains glyph image datasets for font style transfer")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(verbose)
        .subcommand(ingest::casia_subcommand_parser())
        .subcommand(ingest::zhuojg_subcommand_parser())
        .subcommand(ingest::fyp23_subcommand_parser())
        .subcommand(ingest::neumason_subcommand_parser())
        .subcommand(content_images::subcommand_parser())
        .subcommand(reconcile::prune_subcommand_parser())
        .subcommand(reconcile::balance_subcommand_parser())
        .subcommand(inspect::compare_subcommand_parser())
        .subcommand(inspect::summary_subcommand_parser())
        .subcommand(inspect::extensions_subcommand_parser())
}

/// Returns a required `--<name> <PATH>` argument.
fn path_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .value_name("PATH")
        .value_parser(clap::value_parser!(PathBuf))
        .required(true)
        .help(help)
}

/// Returns the value of the required path argument `name`.
fn required_path(matches: &ArgMatches, name: &str) -> PathBuf {
    matches
        .get_one::<PathBuf>(name)
        .cloned()
        .expect("path arguments are required")
}

/// The action to carry out.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// Render CASIA GNT archives into a target tree.
    Casia(IngestConfiguration),
    /// Convert the zhuojg dataset into a target tree.
    Zhuojg(IngestConfiguration),
    /// Copy the fyp23 dataset into the canonical layout.
    Fyp23(Fyp23Configuration),
    /// Copy the neumason dataset into the canonical layout.
    Neumason(NeumasonConfiguration),
    /// Render the missing content images of a dataset.
    ContentImages(ContentImagesConfiguration),
    /// Delete target images that have no content image.
    Prune(DatasetConfiguration),
    /// Reduce a dataset to the characters shared by every font and the content tree.
    Balance(DatasetConfiguration),
    /// Compare two directory trees.
    Compare(CompareConfiguration),
    /// Report per-font statistics of a target tree.
    Summary(PathBuf),
    /// List the file extensions found in a tree.
    Extensions(PathBuf),
}
