//! Ingestion of the CASIA handwriting databases.
//!
//! The source directory holds one GNT archive per writer, named `<writer>-<suffix>.gnt`. Every
//! writer becomes the font `style_<writer>`.

use std::path::{Path, PathBuf};

use gnt::GntReader;

use super::{IngestError, files, stem};
use crate::{
    archive::{RenderSummary, render_archive},
    fs::ensure_dir_with_permissions,
};

/// The file extension of GNT archives.
pub const ARCHIVE_EXTENSION: &str = "gnt";

/// Renders every GNT archive in `source_dir` into `target_dir`.
///
/// # Errors
///
/// - [`IngestError::MissingSource`]: Returned if `source_dir` does not exist.
/// - [`IngestError::Decode`]: Returned if an archive is malformed.
/// - [`IngestError::Io`]: Returned if a directory cannot be read or created, or an archive
///   cannot be opened.
pub fn create_target_images(
    source_dir: &Path,
    target_dir: &Path,
) -> Result<RenderSummary, IngestError> {
    ensure_dir_with_permissions(target_dir).map_err(IngestError::io(target_dir))?;

    if !source_dir.is_dir() {
        return Err(IngestError::MissingSource(source_dir.to_path_buf()));
    }

    let archives = list_archives(source_dir)?;
    log::info!("{} archives found in {}", archives.len(), source_dir.display());

    let mut summary = RenderSummary::default();
    for archive in archives {
        let style = style_name(&archive);
        let font_dir = target_dir.join(&style);
        ensure_dir_with_permissions(&font_dir).map_err(IngestError::io(&font_dir))?;

        let reader = GntReader::open(&archive).map_err(IngestError::io(&archive))?;
        let rendered =
            render_archive(reader, &font_dir, &style).map_err(|error| IngestError::Decode {
                path: archive.clone(),
                error,
            })?;
        summary.merge(rendered);
    }

    Ok(summary)
}

/// Returns the GNT archives in `source_dir`, sorted by name.
///
/// # Errors
///
/// Returns [`IngestError::Io`] if `source_dir` cannot be read.
pub fn list_archives(source_dir: &Path) -> Result<Vec<PathBuf>, IngestError> {
    let mut archives = files(source_dir)?;
    archives.retain(|path| {
        path.extension()
            .is_some_and(|extension| extension == ARCHIVE_EXTENSION)
    });
    Ok(archives)
}

/// Returns the style name derived from the file name of `archive`.
pub fn style_name(archive: &Path) -> String {
    let stem = stem(archive);
    let writer = stem.split('-').next().unwrap_or_default();
    format!("style_{writer}")
}
