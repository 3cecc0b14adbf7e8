//! Rendering of GNT archives into a target font directory.

use std::{
    collections::BTreeSet,
    error, fmt, io,
    path::{Path, PathBuf},
};

use gnt::{DecodeError, GlyphRecord};

use crate::{fs::set_open_permissions, naming};

/// The characters that were rendered and skipped while producing target images.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderSummary {
    /// Characters for which at least one image was written.
    pub succeeded: BTreeSet<String>,
    /// Characters that were filtered out or failed to save.
    pub skipped: BTreeSet<String>,
}

impl RenderSummary {
    /// Records the result of processing one sample of `character`.
    pub fn record(&mut self, character: String, saved: bool) {
        if saved {
            self.succeeded.insert(character);
        } else {
            self.skipped.insert(character);
        }
    }

    /// Merges the contents of `other` into this [`RenderSummary`].
    pub fn merge(&mut self, other: RenderSummary) {
        self.succeeded.extend(other.succeeded);
        self.skipped.extend(other.skipped);
    }
}

/// The result of attempting to save a single [`GlyphRecord`].
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The glyph was written to the contained path.
    Saved(PathBuf),
    /// The glyph does not depict a dataset character and was not written.
    NotTargetCharacter,
}

/// Writes `record` into `font_dir` as `<font_name>+<character>.png`.
///
/// Records whose tag is not a dataset character are not written, which is reported as
/// [`SaveOutcome::NotTargetCharacter`] rather than as an error.
///
/// # Errors
///
/// - [`SaveGlyphError::Encode`]: Returned if the image could not be encoded or written.
/// - [`SaveGlyphError::Permissions`]: Returned if the permissions of the written file could not
///   be changed.
pub fn save_glyph(
    record: &GlyphRecord,
    font_dir: &Path,
    font_name: &str,
) -> Result<SaveOutcome, SaveGlyphError> {
    let Some(character) = record.target_character() else {
        return Ok(SaveOutcome::NotTargetCharacter);
    };

    let path = font_dir.join(naming::target_file_name(
        font_name,
        character.encode_utf8(&mut [0; 4]),
        0,
        naming::IMAGE_EXTENSION,
    ));

    record
        .to_image()
        .save(&path)
        .map_err(|error| SaveGlyphError::Encode {
            path: path.clone(),
            error,
        })?;
    set_open_permissions(&path).map_err(|error| SaveGlyphError::Permissions {
        path: path.clone(),
        error,
    })?;

    Ok(SaveOutcome::Saved(path))
}

/// Renders every record produced by `records` into `font_dir`.
///
/// Records whose tag decodes to text are counted as succeeded or skipped; records whose tag
/// does not decode at all are counted in neither set. Save failures are logged and counted as
/// skipped.
///
/// # Errors
///
/// Returns the first [`DecodeError`] produced by `records`, which aborts the whole archive.
pub fn render_archive<I>(
    records: I,
    font_dir: &Path,
    font_name: &str,
) -> Result<RenderSummary, DecodeError>
where
    I: IntoIterator<Item = Result<GlyphRecord, DecodeError>>,
{
    let mut summary = RenderSummary::default();
    let mut record_count = 0usize;

    for record in records {
        let record = record?;
        record_count += 1;

        let saved = match save_glyph(&record, font_dir, font_name) {
            Ok(SaveOutcome::Saved(path)) => {
                log::trace!("wrote {}", path.display());
                true
            }
            Ok(SaveOutcome::NotTargetCharacter) => {
                log::debug!(
                    "{font_name}: skipping tag {:#06x}, not a target character",
                    record.tag_code()
                );
                false
            }
            Err(error) => {
                log::warn!("{font_name}: {error}");
                false
            }
        };

        if let Some(character) = record.character() {
            summary.record(character, saved);
        }
    }

    log::info!(
        "{font_name}: {record_count} records, {} characters rendered, {} skipped",
        summary.succeeded.len(),
        summary.skipped.len()
    );

    Ok(summary)
}

/// Various errors that can occur while saving a glyph image.
#[derive(Debug)]
pub enum SaveGlyphError {
    /// The image could not be encoded or written.
    Encode {
        /// The path of the image.
        path: PathBuf,
        /// The error that occurred.
        error: image::ImageError,
    },
    /// The permissions of the written image could not be changed.
    Permissions {
        /// The path of the image.
        path: PathBuf,
        /// The error that occurred.
        error: io::Error,
    },
}

impl fmt::Display for SaveGlyphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Encode { path, error } => {
                write!(f, "error saving {}: {error}", path.display())
            }
            Self::Permissions { path, error } => {
                write!(f, "error setting permissions of {}: {error}", path.display())
            }
        }
    }
}

impl error::Error for SaveGlyphError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Encode { error, .. } => Some(error),
            Self::Permissions { error, .. } => Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use gnt::{GntReader, RecordHeader};

    use super::*;

    fn record(tag_code: u16) -> GlyphRecord {
        let header = RecordHeader {
            sample_size: 14,
            tag_code,
            width: 2,
            height: 2,
        };
        GlyphRecord::new(header, vec![0, 64, 128, 255]).unwrap()
    }

    fn archive(tags: &[u16]) -> Vec<u8> {
        let mut bytes = Vec::new();
        for &tag in tags {
            bytes.extend_from_slice(&14u32.to_le_bytes());
            bytes.extend_from_slice(&tag.to_be_bytes());
            bytes.extend_from_slice(&2u16.to_le_bytes());
            bytes.extend_from_slice(&2u16.to_le_bytes());
            bytes.extend_from_slice(&[0, 64, 128, 255]);
        }
        bytes
    }

    #[test]
    fn saves_target_characters() {
        let dir = tempfile::tempdir().unwrap();

        let outcome = save_glyph(&record(0xB6F3), dir.path(), "style_001").unwrap();
        let path = dir.path().join("style_001+扼.png");
        assert_eq!(outcome, SaveOutcome::Saved(path.clone()));

        let image = image::open(&path).unwrap().to_luma8();
        assert_eq!(image.dimensions(), (2, 2));
        assert_eq!(image.into_raw(), vec![0, 64, 128, 255]);
    }

    #[test]
    fn refuses_non_target_characters() {
        let dir = tempfile::tempdir().unwrap();

        let outcome = save_glyph(&record(0x2100), dir.path(), "style_001").unwrap();
        assert_eq!(outcome, SaveOutcome::NotTargetCharacter);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn empty_archive_renders_nothing() {
        let dir = tempfile::tempdir().unwrap();

        let summary =
            render_archive(GntReader::new(Cursor::new(Vec::new())), dir.path(), "style_1")
                .unwrap();
        assert_eq!(summary, RenderSummary::default());
    }

    #[test]
    fn splits_rendered_and_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let bytes = archive(&[0xB6F3, 0xB6F4, 0x2100, 0x2200, 0x8140]);

        let summary =
            render_archive(GntReader::new(Cursor::new(bytes)), dir.path(), "style_1").unwrap();

        assert_eq!(
            summary.succeeded,
            BTreeSet::from(["扼".to_owned(), "遏".to_owned()])
        );
        assert_eq!(
            summary.skipped,
            BTreeSet::from(["!".to_owned(), "\"".to_owned()])
        );
        assert!(dir.path().join("style_1+扼.png").is_file());
        assert!(dir.path().join("style_1+遏.png").is_file());
    }

    #[test]
    fn save_failures_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let bytes = archive(&[0xB6F3]);

        let summary =
            render_archive(GntReader::new(Cursor::new(bytes)), &missing, "style_1").unwrap();

        assert!(summary.succeeded.is_empty());
        assert_eq!(summary.skipped, BTreeSet::from(["扼".to_owned()]));
    }

    #[test]
    fn truncated_archive_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let mut bytes = archive(&[0xB6F3, 0xB6F4]);
        bytes.pop();

        let result = render_archive(GntReader::new(Cursor::new(bytes)), dir.path(), "style_1");
        assert!(matches!(
            result,
            Err(DecodeError::TruncatedBitmap { index: 1, .. })
        ));
    }
}
