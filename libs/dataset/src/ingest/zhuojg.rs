//! Ingestion of the zhuojg calligraphy dataset.
//!
//! The source layout is `<font>/<character>/<images>`. Every image of a character becomes one
//! RGB PNG target image, numbered in file name order.

use std::path::Path;

use image::{ImageFormat, ImageReader};

use super::{IngestError, file_name, files, subdirectories};
use crate::{
    archive::RenderSummary,
    fs::{ensure_dir_with_permissions, set_open_permissions},
    naming::{IMAGE_EXTENSION, target_file_name},
};

/// Converts every character image under `source_dir` into `target_dir`.
///
/// A character is recorded as succeeded if any of its images was converted, and as skipped if
/// any of its images failed to convert.
///
/// # Errors
///
/// - [`IngestError::MissingSource`]: Returned if `source_dir` does not exist.
/// - [`IngestError::Io`]: Returned if a directory cannot be read or created.
pub fn create_target_images(
    source_dir: &Path,
    target_dir: &Path,
) -> Result<RenderSummary, IngestError> {
    ensure_dir_with_permissions(target_dir).map_err(IngestError::io(target_dir))?;

    if !source_dir.is_dir() {
        return Err(IngestError::MissingSource(source_dir.to_path_buf()));
    }

    let mut summary = RenderSummary::default();
    for source_font_dir in subdirectories(source_dir)? {
        let font = file_name(&source_font_dir);
        let font_dir = target_dir.join(&font);
        ensure_dir_with_permissions(&font_dir).map_err(IngestError::io(&font_dir))?;

        log::info!("Converting {font}");
        summary.merge(convert_font(&source_font_dir, &font_dir, &font)?);
    }

    Ok(summary)
}

/// Converts the images of every character directory in `source_font_dir`.
fn convert_font(
    source_font_dir: &Path,
    font_dir: &Path,
    font: &str,
) -> Result<RenderSummary, IngestError> {
    let mut summary = RenderSummary::default();

    for character_dir in subdirectories(source_font_dir)? {
        let character = file_name(&character_dir);

        for (index, source) in files(&character_dir)?.into_iter().enumerate() {
            let destination =
                font_dir.join(target_file_name(font, &character, index, IMAGE_EXTENSION));

            match convert_image(&source, &destination) {
                Ok(()) => summary.record(character.clone(), true),
                Err(error) => {
                    log::warn!(
                        "Failed to convert {} -> {}: {error}",
                        source.display(),
                        destination.display()
                    );
                    summary.record(character.clone(), false);
                }
            }
        }
    }

    Ok(summary)
}

/// Decodes `source` in whatever format it holds and writes it to `destination` as an RGB PNG.
fn convert_image(source: &Path, destination: &Path) -> image::ImageResult<()> {
    let image = ImageReader::open(source)?.with_guessed_format()?.decode()?;
    image
        .to_rgb8()
        .save_with_format(destination, ImageFormat::Png)?;
    set_open_permissions(destination)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{collections::BTreeSet, fs};

    use image::{ColorType, Rgba, RgbaImage};

    use super::*;

    fn write_image(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        RgbaImage::from_pixel(4, 4, Rgba([10, 20, 30, 255]))
            .save_with_format(path, ImageFormat::Png)
            .unwrap();
    }

    fn strings(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|value| (*value).to_owned()).collect()
    }

    #[test]
    fn empty_source_creates_nothing() {
        let root = tempfile::tempdir().unwrap();
        let source = root.path().join("source");
        let target = root.path().join("TargetImage");
        fs::create_dir_all(&source).unwrap();

        let summary = create_target_images(&source, &target).unwrap();
        assert_eq!(summary, RenderSummary::default());
        assert!(target.is_dir());
    }

    #[test]
    fn numbers_images_per_character() {
        let root = tempfile::tempdir().unwrap();
        let source = root.path().join("source");
        let target = root.path().join("TargetImage");
        write_image(&source.join("font1").join("書").join("a.gif"));
        write_image(&source.join("font1").join("書").join("b.gif"));
        write_image(&source.join("font2").join("法").join("a.gif"));

        let summary = create_target_images(&source, &target).unwrap();
        assert_eq!(summary.succeeded, strings(&["書", "法"]));
        assert!(summary.skipped.is_empty());

        let first = target.join("font1").join("font1+書.png");
        assert!(first.is_file());
        assert!(target.join("font1").join("font1+書+1.png").is_file());
        assert!(target.join("font2").join("font2+法.png").is_file());

        let converted = image::open(first).unwrap();
        assert_eq!(converted.color(), ColorType::Rgb8);
    }

    #[test]
    fn undecodable_images_are_skipped() {
        let root = tempfile::tempdir().unwrap();
        let source = root.path().join("source");
        let target = root.path().join("TargetImage");
        let character_dir = source.join("font1").join("劍");
        fs::create_dir_all(&character_dir).unwrap();
        fs::write(character_dir.join("broken.gif"), b"not an image").unwrap();

        let summary = create_target_images(&source, &target).unwrap();
        assert!(summary.succeeded.is_empty());
        assert_eq!(summary.skipped, strings(&["劍"]));
        assert!(!target.join("font1").join("font1+劍.png").exists());
    }

    #[test]
    fn missing_source_is_an_error() {
        let root = tempfile::tempdir().unwrap();
        let result = create_target_images(&root.path().join("missing"), &root.path().join("out"));
        assert!(matches!(result, Err(IngestError::MissingSource(_))));
    }
}
