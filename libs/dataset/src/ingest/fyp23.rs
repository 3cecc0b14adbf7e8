//! Ingestion of the fyp23 dataset.
//!
//! Images are named by numeric tokens that index into a word list. Content images live in
//! `content/` and every font's target images live in `data/<font>/`.

use std::{fs, path::Path};

use super::{IngestError, file_name, files, stem, subdirectories};
use crate::{
    DatasetLayout,
    fs::{copy_with_permissions, ensure_dir_with_permissions},
    naming::FIELD_SEPARATOR,
};

/// The source subdirectory holding the content images.
pub const SOURCE_CONTENT_DIR: &str = "content";
/// The source subdirectory holding one directory of target images per font.
pub const SOURCE_TARGET_DIR: &str = "data";

/// Copies the content and target images of `source_dir` into `output_dir`, renaming every
/// image after the word list character its token refers to.
///
/// Returns the names of the target fonts.
///
/// # Errors
///
/// - [`IngestError::MissingSource`]: Returned if `source_dir` does not exist.
/// - [`IngestError::InvalidToken`]: Returned if an image is not named by an index into the word
///   list.
/// - [`IngestError::Io`]: Returned if the word list cannot be read, or a file cannot be copied.
pub fn create_content_and_target_images(
    source_dir: &Path,
    wordlist: &Path,
    output_dir: &Path,
) -> Result<Vec<String>, IngestError> {
    let layout = DatasetLayout::new(output_dir);
    let content_dir = layout.content_dir();
    let target_dir = layout.target_dir();
    ensure_dir_with_permissions(&target_dir).map_err(IngestError::io(&target_dir))?;
    ensure_dir_with_permissions(&content_dir).map_err(IngestError::io(&content_dir))?;

    if !source_dir.is_dir() {
        return Err(IngestError::MissingSource(source_dir.to_path_buf()));
    }

    let wordlist = read_wordlist(wordlist)?;

    copy_content_images(&source_dir.join(SOURCE_CONTENT_DIR), &content_dir, &wordlist)?;
    let fonts = copy_target_images(&source_dir.join(SOURCE_TARGET_DIR), &target_dir, &wordlist)?;

    log::info!("Number of target fonts: {}", fonts.len());
    Ok(fonts)
}

/// Reads the word list at `path` as a sequence of characters.
///
/// # Errors
///
/// Returns [`IngestError::Io`] if the file cannot be read or is not UTF-8.
pub fn read_wordlist(path: &Path) -> Result<Vec<char>, IngestError> {
    let text = fs::read_to_string(path).map_err(IngestError::io(path))?;
    Ok(text.trim().chars().collect())
}

/// Returns the word list character that the stem of `path` refers to.
///
/// # Errors
///
/// Returns [`IngestError::InvalidToken`] if the stem is not a valid index into `wordlist`.
pub fn word_for_token(wordlist: &[char], path: &Path) -> Result<char, IngestError> {
    stem(path)
        .parse::<usize>()
        .ok()
        .and_then(|index| wordlist.get(index).copied())
        .ok_or_else(|| IngestError::InvalidToken {
            path: path.to_path_buf(),
            wordlist_len: wordlist.len(),
        })
}

/// Returns the extension of `path` with its leading dot, or an empty string.
fn suffix(path: &Path) -> String {
    path.extension()
        .map(|extension| format!(".{}", extension.to_string_lossy()))
        .unwrap_or_default()
}

/// Copies every content image, renaming it after its word.
fn copy_content_images(
    source_content_dir: &Path,
    content_dir: &Path,
    wordlist: &[char],
) -> Result<(), IngestError> {
    for source in files(source_content_dir)? {
        let word = word_for_token(wordlist, &source)?;
        let destination = content_dir.join(format!("{word}{}", suffix(&source)));
        copy_with_permissions(&source, &destination).map_err(IngestError::io(&source))?;
    }

    Ok(())
}

/// Copies every font's target images and returns the font names.
fn copy_target_images(
    source_target_dir: &Path,
    target_dir: &Path,
    wordlist: &[char],
) -> Result<Vec<String>, IngestError> {
    let mut fonts = Vec::new();

    for source_font_dir in subdirectories(source_target_dir)? {
        let font = file_name(&source_font_dir);
        let font_dir = target_dir.join(&font);
        ensure_dir_with_permissions(&font_dir).map_err(IngestError::io(&font_dir))?;

        log::debug!("Copying target images of {font}");
        for source in files(&source_font_dir)? {
            let word = word_for_token(wordlist, &source)?;
            let destination =
                font_dir.join(format!("{font}{FIELD_SEPARATOR}{word}{}", suffix(&source)));
            copy_with_permissions(&source, &destination).map_err(IngestError::io(&source))?;
        }

        fonts.push(font);
    }

    Ok(fonts)
}
