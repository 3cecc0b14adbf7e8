//! Read-only reports on dataset trees.

use std::path::Path;

use anyhow::{Context, Result};
use dataset::{compare::compare_directories, extensions::file_extensions, summary::summarize};

use crate::cli::CompareConfiguration;

/// Prints the differences between two trees, returning `true` if they are identical.
///
/// # Errors
///
/// Returns an error if either path is not a readable directory.
pub fn compare(config: CompareConfiguration) -> Result<bool> {
    let comparison = compare_directories(&config.left, &config.right).with_context(|| {
        format!(
            "failed to compare {} with {}",
            config.left.display(),
            config.right.display()
        )
    })?;

    println!("{}", comparison.summary());
    Ok(comparison.is_identical())
}

/// Prints per-font statistics of the target tree at `path`.
///
/// # Errors
///
/// Returns an error if `path` cannot be read.
pub fn summary(path: &Path) -> Result<()> {
    let summary =
        summarize(path).with_context(|| format!("failed to summarize {}", path.display()))?;

    println!("{summary}");
    Ok(())
}

/// Prints the file extensions found under `path`, one per line.
///
/// # Errors
///
/// Returns an error if part of the tree cannot be read.
pub fn extensions(path: &Path) -> Result<()> {
    let extensions =
        file_extensions(path).with_context(|| format!("failed to walk {}", path.display()))?;

    println!("Unique file extensions found:");
    for extension in extensions {
        println!("{extension}");
    }
    Ok(())
}
