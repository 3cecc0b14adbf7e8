//! Rendering of missing content images from a reference font.

use anyhow::{Context, Result};
use dataset::{
    content::{ReferenceFont, create_content_images},
    reconcile::prune_orphaned_targets,
};

use crate::{action::join, cli::ContentImagesConfiguration};

/// Renders a content image for every character used by the target images, optionally pruning
/// the target images of characters that could not be rendered.
///
/// # Errors
///
/// Returns an error if the reference font cannot be loaded, the target images are misnamed, or
/// pruning fails.
pub fn content_images(config: ContentImagesConfiguration) -> Result<()> {
    let font = ReferenceFont::load(&config.font, config.font_size)
        .with_context(|| format!("failed to load font {}", config.font.display()))?;

    let outcome = create_content_images(&config.content, &config.target, &font, config.canvas)
        .context("failed to create content images")?;

    println!("Created content images: {}", outcome.succeeded.len());
    if outcome.failed.is_empty() {
        return Ok(());
    }

    println!(
        "Content images for some characters could not be created: {}",
        join(outcome.failed.keys())
    );

    if config.prune {
        let pruned = prune_orphaned_targets(&config.content, &config.target)
            .context("failed to delete target images without content images")?;
        println!("Removed characters: {}", join(&pruned.removed));
    }

    Ok(())
}
