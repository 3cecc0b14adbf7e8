//! Ingestion of the neumason dataset.
//!
//! Every subdirectory of the source is one font, named after the TrueType file it was rendered
//! from with a trailing flag string such as `01000000100001000`. One font supplies the content
//! images and the rest supply target images.

use std::path::{Path, PathBuf};

use super::{IngestError, file_name, files, stem, subdirectories};
use crate::{
    DatasetLayout,
    fs::{copy_with_permissions, ensure_dir_with_permissions},
    naming::{IMAGE_EXTENSION, target_file_name},
};

/// A source font directory and the font name derived from it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceFont {
    /// The normalized font name.
    pub name: String,
    /// The directory holding the font's images.
    pub path: PathBuf,
}

impl SourceFont {
    /// Creates a [`SourceFont`] for the directory at `path`.
    pub fn new(path: PathBuf) -> Self {
        Self {
            name: font_name(&file_name(&path)),
            path,
        }
    }
}

/// The fonts an ingestion used.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IngestedFonts {
    /// The name of the font the content images were copied from.
    pub content: String,
    /// The names of the fonts the target images were copied from.
    pub targets: Vec<String>,
}

/// Derives a font name from a source directory name.
///
/// Removes `.ttf`, then any trailing `0` and `1` characters, then all whitespace.
pub fn font_name(dir_name: &str) -> String {
    dir_name
        .replace(".ttf", "")
        .trim_end_matches(['0', '1'])
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// Copies the content font's images into `ContentImage` and every other font's images into
/// `TargetImage`.
///
/// `content_font_dir` and `rejected_font_dirs` are directory names within `source_dir`.
/// Rejected fonts are ignored.
///
/// # Errors
///
/// - [`IngestError::MissingContentFont`]: Returned if `content_font_dir` does not exist.
/// - [`IngestError::Io`]: Returned if a directory cannot be read or created, or a file cannot be
///   copied.
pub fn create_content_and_target_images(
    source_dir: &Path,
    output_dir: &Path,
    content_font_dir: &str,
    rejected_font_dirs: &[String],
) -> Result<IngestedFonts, IngestError> {
    let layout = DatasetLayout::new(output_dir);
    let content_dir = layout.content_dir();
    let target_dir = layout.target_dir();
    ensure_dir_with_permissions(&content_dir).map_err(IngestError::io(&content_dir))?;
    ensure_dir_with_permissions(&target_dir).map_err(IngestError::io(&target_dir))?;

    let (content_font, target_fonts) =
        font_list(source_dir, content_font_dir, rejected_font_dirs)?;

    log::info!("Content font: {}", content_font.name);
    log::info!("Number of target fonts: {}", target_fonts.len());

    for source in files(&content_font.path)? {
        let destination = content_dir.join(file_name(&source));
        copy_with_permissions(&source, &destination).map_err(IngestError::io(&source))?;
    }

    for font in &target_fonts {
        let font_dir = target_dir.join(&font.name);
        ensure_dir_with_permissions(&font_dir).map_err(IngestError::io(&font_dir))?;

        log::debug!("Copying target images of {}", font.name);
        for source in files(&font.path)? {
            let destination =
                font_dir.join(target_file_name(&font.name, &stem(&source), 0, IMAGE_EXTENSION));
            copy_with_permissions(&source, &destination).map_err(IngestError::io(&source))?;
        }
    }

    Ok(IngestedFonts {
        content: content_font.name,
        targets: target_fonts.into_iter().map(|font| font.name).collect(),
    })
}

/// Returns the content font and the accepted target fonts of `source_dir`.
fn font_list(
    source_dir: &Path,
    content_font_dir: &str,
    rejected_font_dirs: &[String],
) -> Result<(SourceFont, Vec<SourceFont>), IngestError> {
    let content_font = SourceFont::new(source_dir.join(content_font_dir));
    if !content_font.path.is_dir() {
        return Err(IngestError::MissingContentFont(content_font.path));
    }

    let target_fonts = subdirectories(source_dir)?
        .into_iter()
        .filter(|path| {
            let dir_name = file_name(path);
            dir_name != content_font_dir && !rejected_font_dirs.contains(&dir_name)
        })
        .map(SourceFont::new)
        .collect();

    Ok((content_font, target_fonts))
}
