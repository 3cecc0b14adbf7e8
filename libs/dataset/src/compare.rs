//! Recursive, pixel-aware comparison of two directory trees.
//!
//! Image files are compared by their decoded RGB pixels. All other files are compared by their
//! bytes.

use std::{
    collections::BTreeMap,
    error,
    ffi::OsString,
    fmt, fs, io,
    path::{Path, PathBuf},
};

/// The message produced by [`Comparison::summary`] when two trees are identical.
pub const IDENTICAL_MESSAGE: &str = "Directories are identical.";

/// The file extensions, in lowercase, that are compared by their decoded pixels.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// The differences found between two directory trees.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Comparison {
    /// Paths present under only one of the two roots.
    pub outer: Vec<PathBuf>,
    /// Path pairs present under both roots with different contents.
    pub inner: Vec<(PathBuf, PathBuf)>,
    /// Path pairs present under both roots that could not be compared.
    pub uncomparable: Vec<(PathBuf, PathBuf)>,
}

impl Comparison {
    /// Returns `true` if no differences were found.
    pub fn is_identical(&self) -> bool {
        self.outer.is_empty() && self.inner.is_empty() && self.uncomparable.is_empty()
    }

    /// Returns a human-readable report of the differences, each section sorted by path.
    ///
    /// Returns [`IDENTICAL_MESSAGE`] if no differences were found.
    pub fn summary(&self) -> String {
        if self.is_identical() {
            return IDENTICAL_MESSAGE.to_owned();
        }

        let mut lines = Vec::new();

        if !self.outer.is_empty() {
            let mut outer = self.outer.iter().collect::<Vec<_>>();
            outer.sort();

            lines.push("Files not present in both directories:".to_owned());
            lines.extend(outer.into_iter().map(|path| path.display().to_string()));
        }

        for (header, pairs) in [
            ("Files with different content:", &self.inner),
            ("Failed to compare files:", &self.uncomparable),
        ] {
            if pairs.is_empty() {
                continue;
            }

            let mut pairs = pairs.iter().collect::<Vec<_>>();
            pairs.sort();

            lines.push(header.to_owned());
            lines.extend(
                pairs
                    .into_iter()
                    .map(|(left, right)| format!("{} and {}", left.display(), right.display())),
            );
        }

        lines.join("\n")
    }
}

/// Recursively compares the trees rooted at `left` and `right`.
///
/// # Errors
///
/// - [`CompareError::NotADirectory`]: Returned if either root is not an existing directory.
/// - [`CompareError::Io`]: Returned if a directory inside either tree cannot be listed.
pub fn compare_directories(left: &Path, right: &Path) -> Result<Comparison, CompareError> {
    for root in [left, right] {
        if !root.is_dir() {
            return Err(CompareError::NotADirectory(root.to_path_buf()));
        }
    }

    let mut comparison = Comparison::default();
    compare_into(left, right, &mut comparison)?;
    Ok(comparison)
}

/// Compares the trees rooted at `left` and `right`, returning whether they are identical and
/// the [`Comparison::summary`].
///
/// # Errors
///
/// Returns the errors of [`compare_directories()`].
pub fn compare_directories_with_summary(
    left: &Path,
    right: &Path,
) -> Result<(bool, String), CompareError> {
    let comparison = compare_directories(left, right)?;
    Ok((comparison.is_identical(), comparison.summary()))
}

/// The kind of a directory entry, as far as comparison is concerned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EntryKind {
    /// A directory, which is compared recursively.
    Directory,
    /// A regular file, which is compared by contents.
    File,
    /// Anything else, or an entry whose metadata could not be read.
    Other,
}

/// Compares one level of the two trees, recursing into shared subdirectories.
fn compare_into(left: &Path, right: &Path, comparison: &mut Comparison) -> Result<(), CompareError> {
    let left_entries = list(left)?;
    let mut right_entries = list(right)?;

    for (name, left_kind) in left_entries {
        let left_path = left.join(&name);
        let Some(right_kind) = right_entries.remove(&name) else {
            comparison.outer.push(left_path);
            continue;
        };
        let right_path = right.join(&name);

        match (left_kind, right_kind) {
            (EntryKind::Directory, EntryKind::Directory) => {
                compare_into(&left_path, &right_path, comparison)?
            }
            (EntryKind::File, EntryKind::File) => match files_equal(&left_path, &right_path) {
                Ok(true) => {}
                Ok(false) => comparison.inner.push((left_path, right_path)),
                Err(error) => {
                    log::debug!(
                        "cannot compare {} and {}: {error}",
                        left_path.display(),
                        right_path.display()
                    );
                    comparison.uncomparable.push((left_path, right_path));
                }
            },
            _ => comparison.uncomparable.push((left_path, right_path)),
        }
    }

    comparison
        .outer
        .extend(right_entries.into_keys().map(|name| right.join(name)));

    Ok(())
}

/// Lists the entries of `dir` along with their [`EntryKind`].
fn list(dir: &Path) -> Result<BTreeMap<OsString, EntryKind>, CompareError> {
    let io_error = |error| CompareError::Io {
        path: dir.to_path_buf(),
        error,
    };

    let mut entries = BTreeMap::new();
    for entry in fs::read_dir(dir).map_err(io_error)? {
        let entry = entry.map_err(io_error)?;

        // Symbolic links are followed, as a plain `stat` would.
        let kind = match fs::metadata(entry.path()) {
            Ok(metadata) if metadata.is_dir() => EntryKind::Directory,
            Ok(metadata) if metadata.is_file() => EntryKind::File,
            _ => EntryKind::Other,
        };
        entries.insert(entry.file_name(), kind);
    }

    Ok(entries)
}

/// Returns `true` if `path` has one of the [`IMAGE_EXTENSIONS`].
fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|image| image.eq_ignore_ascii_case(extension))
        })
}

/// Compares two regular files, by pixels for images and by bytes otherwise.
fn files_equal(left: &Path, right: &Path) -> Result<bool, FileCompareError> {
    if is_image(left) && is_image(right) {
        let left = image::open(left)?.to_rgb8();
        let right = image::open(right)?.to_rgb8();

        return Ok(left.dimensions() == right.dimensions() && left.as_raw() == right.as_raw());
    }

    let left_metadata = fs::metadata(left)?;
    let right_metadata = fs::metadata(right)?;
    if left_metadata.len() != right_metadata.len() {
        return Ok(false);
    }

    Ok(fs::read(left)? == fs::read(right)?)
}

/// The reasons a pair of files could not be compared.
#[derive(Debug)]
enum FileCompareError {
    /// A file could not be read.
    Io(io::Error),
    /// An image could not be decoded.
    Image(image::ImageError),
}

impl From<io::Error> for FileCompareError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<image::ImageError> for FileCompareError {
    fn from(value: image::ImageError) -> Self {
        Self::Image(value)
    }
}

impl fmt::Display for FileCompareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(error) => write!(f, "error reading file: {error}"),
            Self::Image(error) => write!(f, "error decoding image: {error}"),
        }
    }
}

/// Various errors that can occur while comparing two directory trees.
#[derive(Debug)]
pub enum CompareError {
    /// A root does not exist or is not a directory.
    NotADirectory(PathBuf),
    /// A directory could not be listed.
    Io {
        /// The directory being listed.
        path: PathBuf,
        /// The error that occurred.
        error: io::Error,
    },
}

impl fmt::Display for CompareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotADirectory(path) => write!(f, "{} is not a directory", path.display()),
            Self::Io { path, error } => write!(f, "error listing {}: {error}", path.display()),
        }
    }
}

impl error::Error for CompareError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::NotADirectory(_) => None,
            Self::Io { error, .. } => Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use image::{
        ImageEncoder, RgbImage,
        codecs::png::{CompressionType, FilterType, PngEncoder},
    };

    use super::*;

    fn dirs() -> (tempfile::TempDir, PathBuf, PathBuf) {
        let root = tempfile::tempdir().unwrap();
        let left = root.path().join("dir1");
        let right = root.path().join("dir2");
        fs::create_dir_all(&left).unwrap();
        fs::create_dir_all(&right).unwrap();
        (root, left, right)
    }

    fn write_png(path: &Path, image: &RgbImage, compression: CompressionType) {
        let file = fs::File::create(path).unwrap();
        PngEncoder::new_with_quality(file, compression, FilterType::NoFilter)
            .write_image(
                image.as_raw(),
                image.width(),
                image.height(),
                image::ExtendedColorType::Rgb8,
            )
            .unwrap();
    }

    fn gradient() -> RgbImage {
        RgbImage::from_fn(16, 16, |x, y| image::Rgb([x as u8 * 16, y as u8 * 16, 7]))
    }

    #[test]
    fn empty_directories_are_identical() {
        let (_root, left, right) = dirs();

        let (identical, message) = compare_directories_with_summary(&left, &right).unwrap();
        assert!(identical);
        assert_eq!(message, IDENTICAL_MESSAGE);
    }

    #[test]
    fn identical_copies_are_identical() {
        let (_root, left, right) = dirs();
        for dir in [&left, &right] {
            fs::create_dir_all(dir.join("fontA")).unwrap();
            fs::write(dir.join("notes.txt"), b"glyphs").unwrap();
            write_png(&dir.join("fontA").join("fontA+書.png"), &gradient(), CompressionType::Default);
        }

        let (identical, message) = compare_directories_with_summary(&left, &right).unwrap();
        assert!(identical, "{message}");
        assert_eq!(message, IDENTICAL_MESSAGE);
    }

    #[test]
    fn reports_outer_differences() {
        let (_root, left, right) = dirs();
        fs::write(left.join("file1.txt"), b"a").unwrap();
        fs::write(right.join("file2.txt"), b"b").unwrap();

        let comparison = compare_directories(&left, &right).unwrap();
        assert!(!comparison.is_identical());
        assert_eq!(
            comparison.summary(),
            format!(
                "Files not present in both directories:\n{}\n{}",
                left.join("file1.txt").display(),
                right.join("file2.txt").display()
            )
        );
    }

    #[test]
    fn reports_inner_differences_by_bytes() {
        let (_root, left, right) = dirs();
        fs::write(left.join("file1.txt"), b"first").unwrap();
        fs::write(right.join("file1.txt"), b"other").unwrap();

        let comparison = compare_directories(&left, &right).unwrap();
        assert_eq!(
            comparison.summary(),
            format!(
                "Files with different content:\n{} and {}",
                left.join("file1.txt").display(),
                right.join("file1.txt").display()
            )
        );
    }

    #[test]
    fn reports_all_problems_in_order() {
        let (_root, left, right) = dirs();
        fs::write(left.join("file2.txt"), b"a").unwrap();
        fs::write(right.join("file3.txt"), b"b").unwrap();
        fs::write(left.join("file4.txt"), b"c").unwrap();
        fs::write(right.join("file4.txt"), b"d").unwrap();
        fs::create_dir_all(left.join("file5")).unwrap();
        fs::write(right.join("file5"), b"e").unwrap();

        let comparison = compare_directories(&left, &right).unwrap();
        assert_eq!(
            comparison.summary(),
            format!(
                "Files not present in both directories:\n{}\n{}\n\
                 Files with different content:\n{} and {}\n\
                 Failed to compare files:\n{} and {}",
                left.join("file2.txt").display(),
                right.join("file3.txt").display(),
                left.join("file4.txt").display(),
                right.join("file4.txt").display(),
                left.join("file5").display(),
                right.join("file5").display(),
            )
        );
    }

    #[test]
    fn recurses_into_subdirectories() {
        let (_root, left, right) = dirs();
        fs::create_dir_all(left.join("a").join("b")).unwrap();
        fs::create_dir_all(right.join("a").join("b")).unwrap();
        fs::write(left.join("a").join("b").join("deep.txt"), b"x").unwrap();

        let comparison = compare_directories(&left, &right).unwrap();
        assert_eq!(comparison.outer, [left.join("a").join("b").join("deep.txt")]);
    }

    #[test]
    fn images_compare_by_pixels() {
        let (_root, left, right) = dirs();
        let image = gradient();
        write_png(&left.join("glyph.png"), &image, CompressionType::Fast);
        write_png(&right.join("glyph.png"), &image, CompressionType::Best);

        let comparison = compare_directories(&left, &right).unwrap();
        assert!(comparison.is_identical(), "{}", comparison.summary());
    }

    #[test]
    fn grayscale_and_rgb_with_same_pixels_are_equal() {
        let (_root, left, right) = dirs();
        let gray = image::GrayImage::from_fn(4, 4, |x, y| image::Luma([(x * 40 + y) as u8]));
        gray.save(left.join("glyph.png")).unwrap();
        image::DynamicImage::ImageLuma8(gray)
            .to_rgb8()
            .save(right.join("glyph.png"))
            .unwrap();

        assert!(compare_directories(&left, &right).unwrap().is_identical());
    }

    #[test]
    fn images_with_different_pixels_differ() {
        let (_root, left, right) = dirs();
        let image = gradient();
        let mut changed = image.clone();
        changed.put_pixel(3, 3, image::Rgb([255, 0, 0]));
        write_png(&left.join("glyph.png"), &image, CompressionType::Default);
        write_png(&right.join("glyph.png"), &changed, CompressionType::Default);

        let comparison = compare_directories(&left, &right).unwrap();
        assert_eq!(
            comparison.inner,
            [(left.join("glyph.png"), right.join("glyph.png"))]
        );
    }

    #[test]
    fn undecodable_images_are_uncomparable() {
        let (_root, left, right) = dirs();
        fs::write(left.join("broken.png"), b"not a png").unwrap();
        fs::write(right.join("broken.png"), b"not a png").unwrap();

        let comparison = compare_directories(&left, &right).unwrap();
        assert_eq!(
            comparison.uncomparable,
            [(left.join("broken.png"), right.join("broken.png"))]
        );
    }

    #[test]
    fn missing_root_is_an_error() {
        let (_root, left, right) = dirs();
        let missing = right.join("missing");

        assert!(matches!(
            compare_directories(&left, &missing),
            Err(CompareError::NotADirectory(path)) if path == missing
        ));
    }
}
