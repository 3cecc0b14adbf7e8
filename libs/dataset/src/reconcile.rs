//! Character-set reconciliation between the content and target trees of a dataset.
//!
//! Every operation here runs in two phases: the trees are scanned into in-memory sets first,
//! and only then are files deleted. Deletions therefore never influence the scan that decided
//! them, and re-running an operation on its own output removes nothing.

use std::{
    collections::{BTreeMap, BTreeSet},
    error, fmt, fs, io,
    path::{Path, PathBuf},
};

use crate::{
    fs::sorted_entries,
    naming::{self, NameError},
};

/// The characters present in a `TargetImage` tree, and the fonts each one appears in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CharacterIndex {
    /// Every font directory in the tree.
    fonts: BTreeSet<String>,
    /// The fonts each character appears in.
    characters: BTreeMap<char, BTreeSet<String>>,
}

impl CharacterIndex {
    /// Returns the names of every font in the tree.
    pub fn fonts(&self) -> &BTreeSet<String> {
        &self.fonts
    }

    /// Returns the mapping of each character to the fonts containing it.
    pub fn characters(&self) -> &BTreeMap<char, BTreeSet<String>> {
        &self.characters
    }

    /// Returns every character that appears in at least one font.
    pub fn all_characters(&self) -> BTreeSet<char> {
        self.characters.keys().copied().collect()
    }

    /// Returns the characters present in every font.
    ///
    /// A tree without fonts, or with a font that has no characters, has no common characters.
    pub fn common_characters(&self) -> BTreeSet<char> {
        if self.fonts.is_empty() {
            return BTreeSet::new();
        }

        self.characters
            .iter()
            .filter(|(_, fonts)| self.fonts.is_subset(fonts))
            .map(|(&character, _)| character)
            .collect()
    }
}

/// The result of [`balance`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Balanced {
    /// The characters that remain in both trees.
    pub preserved: BTreeSet<char>,
    /// The characters whose images were deleted from either tree.
    pub removed: BTreeSet<char>,
}

/// The result of [`prune_orphaned_targets`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Pruned {
    /// The characters present in the content tree.
    pub preserved: BTreeSet<char>,
    /// The characters whose target images were deleted.
    pub removed: BTreeSet<char>,
}

/// Scans `target_dir` and records which fonts contain each character.
///
/// Each subdirectory of `target_dir` is a font and each regular file inside it is an image of
/// the character named by its file stem.
///
/// # Errors
///
/// - [`ReconcileError::MissingDirectory`]: Returned if `target_dir` does not exist.
/// - [`ReconcileError::Io`]: Returned if a directory cannot be read.
/// - [`ReconcileError::Name`]: Returned if an image name has an empty or multi-character
///   character field.
pub fn scan(target_dir: &Path) -> Result<CharacterIndex, ReconcileError> {
    let mut index = CharacterIndex::default();

    for font_dir in font_dirs(target_dir)? {
        let font = file_name(&font_dir);
        index.fonts.insert(font.clone());

        for image in image_files(&font_dir)? {
            let character = naming::target_character(&image)?;
            index
                .characters
                .entry(character)
                .or_default()
                .insert(font.clone());
        }
    }

    Ok(index)
}

/// Returns the characters named by the images in `content_dir`.
///
/// # Errors
///
/// - [`ReconcileError::MissingDirectory`]: Returned if `content_dir` does not exist.
/// - [`ReconcileError::Io`]: Returned if the directory cannot be read.
/// - [`ReconcileError::Name`]: Returned if an image stem is not exactly one character.
pub fn content_characters(content_dir: &Path) -> Result<BTreeSet<char>, ReconcileError> {
    image_files(content_dir)?
        .iter()
        .map(|path| naming::content_character(path).map_err(ReconcileError::from))
        .collect()
}

/// Returns the characters present in every font of `target_dir`.
///
/// # Errors
///
/// Returns the errors of [`scan()`].
pub fn common_characters(target_dir: &Path) -> Result<BTreeSet<char>, ReconcileError> {
    Ok(scan(target_dir)?.common_characters())
}

/// Returns the characters present both in `content_dir` and in every font of `target_dir`.
///
/// # Errors
///
/// Returns the errors of [`content_characters()`] and [`scan()`].
pub fn preserved_characters(
    content_dir: &Path,
    target_dir: &Path,
) -> Result<BTreeSet<char>, ReconcileError> {
    let content = content_characters(content_dir)?;
    let common = common_characters(target_dir)?;

    Ok(common.intersection(&content).copied().collect())
}

/// Deletes images until every font in `target_dir` and `content_dir` share one character set.
///
/// Content images whose character is not preserved are deleted, as are target images whose
/// character is not preserved. This operation is irreversible but idempotent.
///
/// # Errors
///
/// Returns the errors of [`preserved_characters()`], or [`ReconcileError::Io`] if an image
/// cannot be deleted.
pub fn balance(content_dir: &Path, target_dir: &Path) -> Result<Balanced, ReconcileError> {
    let preserved = preserved_characters(content_dir, target_dir)?;

    let mut removed = delete_content_images(content_dir, &preserved)?;
    removed.extend(delete_target_images(target_dir, &preserved)?);

    Ok(Balanced { preserved, removed })
}

/// Deletes target images whose character has no content image.
///
/// Content images are never touched. This is intended for the case where content image
/// generation failed for some characters.
///
/// # Errors
///
/// Returns the errors of [`content_characters()`] and [`scan()`], or [`ReconcileError::Io`]
/// if an image cannot be deleted.
pub fn prune_orphaned_targets(
    content_dir: &Path,
    target_dir: &Path,
) -> Result<Pruned, ReconcileError> {
    let preserved = content_characters(content_dir)?;
    // Validates every target name before anything is deleted.
    scan(target_dir)?;

    let removed = delete_target_images(target_dir, &preserved)?;

    Ok(Pruned { preserved, removed })
}

/// Deletes content images whose character is not in `preserved`.
fn delete_content_images(
    content_dir: &Path,
    preserved: &BTreeSet<char>,
) -> Result<BTreeSet<char>, ReconcileError> {
    let mut removed = BTreeSet::new();

    for image in image_files(content_dir)? {
        let character = naming::content_character(&image)?;
        if !preserved.contains(&character) {
            remove_image(&image)?;
            removed.insert(character);
        }
    }

    Ok(removed)
}

/// Deletes target images whose character is not in `preserved`.
fn delete_target_images(
    target_dir: &Path,
    preserved: &BTreeSet<char>,
) -> Result<BTreeSet<char>, ReconcileError> {
    let mut removed = BTreeSet::new();

    for font_dir in font_dirs(target_dir)? {
        for image in image_files(&font_dir)? {
            let character = naming::target_character(&image)?;
            if !preserved.contains(&character) {
                remove_image(&image)?;
                removed.insert(character);
            }
        }
    }

    Ok(removed)
}

/// Deletes the image at `path`.
fn remove_image(path: &Path) -> Result<(), ReconcileError> {
    log::info!("Deleting {}", path.display());
    fs::remove_file(path).map_err(|error| ReconcileError::io(path, error))
}

/// Returns the font directories inside `target_dir`.
fn font_dirs(target_dir: &Path) -> Result<Vec<PathBuf>, ReconcileError> {
    entries_where(target_dir, |file_type| file_type.is_dir())
}

/// Returns the regular files inside `dir`.
fn image_files(dir: &Path) -> Result<Vec<PathBuf>, ReconcileError> {
    entries_where(dir, |file_type| file_type.is_file())
}

/// Returns the paths of the entries of `dir` whose file type satisfies `predicate`.
fn entries_where(
    dir: &Path,
    predicate: impl Fn(&fs::FileType) -> bool,
) -> Result<Vec<PathBuf>, ReconcileError> {
    if !dir.is_dir() {
        return Err(ReconcileError::MissingDirectory(dir.to_path_buf()));
    }

    let mut paths = Vec::new();
    for entry in sorted_entries(dir).map_err(|error| ReconcileError::io(dir, error))? {
        let file_type = entry
            .file_type()
            .map_err(|error| ReconcileError::io(&entry.path(), error))?;
        if predicate(&file_type) {
            paths.push(entry.path());
        }
    }

    Ok(paths)
}

/// Returns the final component of `path` as a lossily converted string.
fn file_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .into_owned()
}

/// Various errors that can occur while reconciling a dataset.
#[derive(Debug)]
pub enum ReconcileError {
    /// A required directory does not exist.
    MissingDirectory(PathBuf),
    /// An image has a malformed name.
    Name(NameError),
    /// An I/O error occurred.
    Io {
        /// The path being accessed.
        path: PathBuf,
        /// The error that occurred.
        error: io::Error,
    },
}

impl ReconcileError {
    /// Creates a new [`ReconcileError::Io`].
    fn io(path: &Path, error: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            error,
        }
    }
}

impl From<NameError> for ReconcileError {
    fn from(value: NameError) -> Self {
        Self::Name(value)
    }
}

impl fmt::Display for ReconcileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingDirectory(path) => {
                write!(f, "directory does not exist: {}", path.display())
            }
            Self::Name(error) => fmt::Display::fmt(error, f),
            Self::Io { path, error } => write!(f, "error accessing {}: {error}", path.display()),
        }
    }
}

impl error::Error for ReconcileError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::MissingDirectory(_) => None,
            Self::Name(error) => Some(error),
            Self::Io { error, .. } => Some(error),
        }
    }
}
