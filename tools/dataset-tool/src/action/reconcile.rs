//! Deletion of characters that are not shared across a dataset.

use anyhow::{Context, Result};
use dataset::reconcile;

use crate::{action::join, cli::DatasetConfiguration};

/// Deletes target images whose character has no content image.
///
/// # Errors
///
/// Returns an error if either tree is missing, an image is misnamed, or a deletion fails.
pub fn prune(config: DatasetConfiguration) -> Result<()> {
    let pruned = reconcile::prune_orphaned_targets(&config.content, &config.target)
        .context("failed to delete target images without content images")?;

    println!("Removed characters: {}", join(&pruned.removed));
    Ok(())
}

/// Deletes every image whose character is missing from a font or from the content images.
///
/// # Errors
///
/// Returns an error if either tree is missing, an image is misnamed, or a deletion fails.
pub fn balance(config: DatasetConfiguration) -> Result<()> {
    let balanced = reconcile::balance(&config.content, &config.target)
        .context("failed to balance dataset")?;

    println!("Preserved characters: {}", balanced.preserved.len());
    println!("Removed characters: {}", join(&balanced.removed));
    Ok(())
}
