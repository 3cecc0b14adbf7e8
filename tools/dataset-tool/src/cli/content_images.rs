//! Command line parsing and [`Action::ContentImages`][ac] construction.
//!
//! [ac]: crate::cli::Action::ContentImages

use std::path::PathBuf;

use clap::{Arg, ArgAction, ArgMatches, Command};
use dataset::content::Canvas;

use crate::cli::{path_arg, required_path};

/// Description of how to render the missing content images of a dataset.
#[derive(Clone, Debug, PartialEq)]
pub struct ContentImagesConfiguration {
    /// The `ContentImage` directory to populate.
    pub content: PathBuf,
    /// The `TargetImage` directory whose characters need content images.
    pub target: PathBuf,
    /// The reference font to render with.
    pub font: PathBuf,
    /// The size, in pixels, at which glyphs are rendered.
    pub font_size: f32,
    /// The dimensions of each content image.
    pub canvas: Canvas,
    /// Whether to delete the target images of characters that could not be rendered.
    pub prune: bool,
}

/// Parses the arguments of the `content-images` subcommand.
#[expect(
    clippy::missing_panics_doc,
    reason = "content-images subcommand guarantees that these are present"
)]
pub fn parse_arguments(matches: &ArgMatches) -> ContentImagesConfiguration {
    let font_size = *matches
        .get_one::<f32>("font-size")
        .expect("font-size has a default");
    let width = *matches.get_one::<u32>("width").expect("width has a default");
    let height = *matches
        .get_one::<u32>("height")
        .expect("height has a default");

    ContentImagesConfiguration {
        content: required_path(matches, "content"),
        target: required_path(matches, "target"),
        font: required_path(matches, "font"),
        font_size,
        canvas: Canvas { width, height },
        prune: matches.get_flag("prune"),
    }
}

/// Returns the command parser for a [`Action::ContentImages`][ac].
///
/// [ac]: crate::cli::Action::ContentImages
pub fn subcommand_parser() -> Command {
    let font_size = Arg::new("font-size")
        .long("font-size")
        .value_parser(clap::value_parser!(f32))
        .default_value("100")
        .help("Size in pixels at which glyphs are rendered");

    let width = Arg::new("width")
        .long("width")
        .value_parser(clap::value_parser!(u32).range(1..))
        .default_value("128")
        .help("Width of each content image");

    let height = Arg::new("height")
        .long("height")
        .value_parser(clap::value_parser!(u32).range(1..))
        .default_value("128")
        .help("Height of each content image");

    let prune = Arg::new("prune")
        .long("prune")
        .action(ArgAction::SetTrue)
        .help("Delete target images of characters that could not be rendered");

    Command::new("content-images")
        .about("Render a content image for every character used by the target images")
        .arg(path_arg("content", "ContentImage directory to write into"))
        .arg(path_arg("target", "TargetImage directory to read characters from"))
        .arg(path_arg("font", "TrueType or OpenType font to render with"))
        .arg(font_size)
        .arg(width)
        .arg(height)
        .arg(prune)
}
