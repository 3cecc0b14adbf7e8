//! Conversion of raw public datasets into the canonical layout.

use anyhow::{Context, Result};
use dataset::ingest::{casia, fyp23, neumason, zhuojg};

use crate::{
    action::join,
    cli::{Fyp23Configuration, IngestConfiguration, NeumasonConfiguration},
};

/// Renders the CASIA archives in `config.source` and reports the skipped characters.
///
/// # Errors
///
/// Returns an error if the source is missing or an archive is malformed.
pub fn casia(config: IngestConfiguration) -> Result<()> {
    let summary = casia::create_target_images(&config.source, &config.target)
        .with_context(|| format!("failed to ingest {}", config.source.display()))?;

    println!("Rendered characters: {}", summary.succeeded.len());
    println!("Skipped characters: {}", join(&summary.skipped));
    Ok(())
}

/// Converts the zhuojg images in `config.source` and reports the skipped characters.
///
/// # Errors
///
/// Returns an error if the source is missing or cannot be read.
pub fn zhuojg(config: IngestConfiguration) -> Result<()> {
    let summary = zhuojg::create_target_images(&config.source, &config.target)
        .with_context(|| format!("failed to ingest {}", config.source.display()))?;

    println!("Converted characters: {}", summary.succeeded.len());
    if !summary.skipped.is_empty() {
        println!("Skipped characters: {}", join(&summary.skipped));
    }
    Ok(())
}

/// Copies the fyp23 dataset in `config.source` into `config.output`.
///
/// # Errors
///
/// Returns an error if the word list cannot be read or an image is not named by a valid token.
pub fn fyp23(config: Fyp23Configuration) -> Result<()> {
    let fonts =
        fyp23::create_content_and_target_images(&config.source, &config.wordlist, &config.output)
            .with_context(|| format!("failed to ingest {}", config.source.display()))?;

    println!("Number of target fonts: {}", fonts.len());
    Ok(())
}

/// Copies the neumason dataset in `config.source` into `config.output`.
///
/// # Errors
///
/// Returns an error if the content font is missing or a file cannot be copied.
pub fn neumason(config: NeumasonConfiguration) -> Result<()> {
    let fonts = neumason::create_content_and_target_images(
        &config.source,
        &config.output,
        &config.content_font,
        &config.rejected,
    )
    .with_context(|| format!("failed to ingest {}", config.source.display()))?;

    println!("Content font: {}", fonts.content);
    println!("Number of target fonts: {}", fonts.targets.len());
    Ok(())
}
