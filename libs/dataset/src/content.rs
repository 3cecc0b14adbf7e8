//! Rendering of content images from a reference font.
//!
//! Content images are the shared, font-independent rendering of each character. They are
//! produced by drawing the character in black, centered on a white canvas, using a single
//! reference font that is expected to cover every character of the dataset.

use std::{
    collections::{BTreeMap, BTreeSet},
    error, fmt, fs, io,
    path::{Path, PathBuf},
};

use fontdue::{Font, FontSettings};
use image::{Rgb, RgbImage};

use crate::{
    fs::{ensure_dir_with_permissions, set_open_permissions},
    naming,
    reconcile::{self, ReconcileError},
};

/// The dimensions of a content image in pixels.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct Canvas {
    /// The width of the canvas.
    pub width: u32,
    /// The height of the canvas.
    pub height: u32,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 128,
            height: 128,
        }
    }
}

/// Something that can draw single characters onto a [`Canvas`].
pub trait Rasterizer {
    /// Returns `true` if `character` can be drawn.
    fn has_glyph(&self, character: char) -> bool;

    /// Draws `character` in black, centered on a white [`Canvas`].
    fn render(&self, character: char, canvas: Canvas) -> RgbImage;
}

/// A TrueType or OpenType font loaded at a fixed pixel size.
pub struct ReferenceFont {
    /// The parsed font.
    font: Font,
    /// The size, in pixels, at which glyphs are rasterized.
    font_size: f32,
}

impl ReferenceFont {
    /// Loads the font stored at `path` for rendering at `font_size` pixels.
    ///
    /// # Errors
    ///
    /// - [`LoadFontError::Io`]: Returned if the font file cannot be read.
    /// - [`LoadFontError::Parse`]: Returned if the file is not a supported font.
    pub fn load(path: &Path, font_size: f32) -> Result<Self, LoadFontError> {
        let bytes = fs::read(path).map_err(|error| LoadFontError::Io {
            path: path.to_path_buf(),
            error,
        })?;

        Self::from_bytes(&bytes, font_size).map_err(|error| match error {
            LoadFontError::Parse { reason, .. } => LoadFontError::Parse {
                path: Some(path.to_path_buf()),
                reason,
            },
            error => error,
        })
    }

    /// Parses a font from `bytes` for rendering at `font_size` pixels.
    ///
    /// # Errors
    ///
    /// Returns [`LoadFontError::Parse`] if `bytes` is not a supported font.
    pub fn from_bytes(bytes: &[u8], font_size: f32) -> Result<Self, LoadFontError> {
        let settings = FontSettings {
            scale: font_size,
            ..FontSettings::default()
        };
        let font = Font::from_bytes(bytes, settings)
            .map_err(|reason| LoadFontError::Parse { path: None, reason })?;

        Ok(Self { font, font_size })
    }
}

impl Rasterizer for ReferenceFont {
    fn has_glyph(&self, character: char) -> bool {
        self.font.lookup_glyph_index(character) != 0
    }

    fn render(&self, character: char, canvas: Canvas) -> RgbImage {
        let (metrics, coverage) = self.font.rasterize(character, self.font_size);
        let mut image = RgbImage::from_pixel(canvas.width, canvas.height, Rgb([255, 255, 255]));

        let left = (i64::from(canvas.width) - metrics.width as i64).div_euclid(2);
        let top = (i64::from(canvas.height) - metrics.height as i64).div_euclid(2);

        for (index, &alpha) in coverage.iter().enumerate() {
            if alpha == 0 {
                continue;
            }

            let x = left + (index % metrics.width) as i64;
            let y = top + (index / metrics.width) as i64;
            let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
                continue;
            };
            if x >= canvas.width || y >= canvas.height {
                continue;
            }

            let value = 255 - alpha;
            image.put_pixel(x, y, Rgb([value, value, value]));
        }

        image
    }
}

/// The reason a content image could not be created.
#[derive(Debug)]
pub enum ContentFailure {
    /// The reference font has no glyph for the character.
    GlyphMissing,
    /// The image could not be written.
    Save(image::ImageError),
    /// The permissions of the written image could not be changed.
    Permissions(io::Error),
}

impl fmt::Display for ContentFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GlyphMissing => write!(f, "character not found in font"),
            Self::Save(error) => write!(f, "error saving image: {error}"),
            Self::Permissions(error) => write!(f, "error setting permissions: {error}"),
        }
    }
}

impl error::Error for ContentFailure {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::GlyphMissing => None,
            Self::Save(error) => Some(error),
            Self::Permissions(error) => Some(error),
        }
    }
}

/// The characters for which content images were and were not created.
#[derive(Debug, Default)]
pub struct ContentOutcome {
    /// Characters whose content image was written.
    pub succeeded: BTreeSet<char>,
    /// Characters whose content image could not be created, and why.
    pub failed: BTreeMap<char, ContentFailure>,
}

/// Creates a content image in `content_dir` for every character used in `target_dir`.
///
/// Characters that already have a content image are left untouched and appear in neither set
/// of the returned [`ContentOutcome`].
///
/// # Errors
///
/// - [`ContentError::Io`]: Returned if `content_dir` cannot be created.
/// - [`ContentError::Reconcile`]: Returned if `target_dir` cannot be scanned, including when an
///   image name is malformed.
pub fn create_content_images<R: Rasterizer>(
    content_dir: &Path,
    target_dir: &Path,
    rasterizer: &R,
    canvas: Canvas,
) -> Result<ContentOutcome, ContentError> {
    ensure_dir_with_permissions(content_dir).map_err(|error| ContentError::Io {
        path: content_dir.to_path_buf(),
        error,
    })?;

    let required = reconcile::scan(target_dir)?.all_characters();
    log::info!("{} characters required", required.len());

    let mut outcome = ContentOutcome::default();
    for character in required {
        let path = content_dir.join(naming::content_file_name(character));
        if path.exists() {
            continue;
        }

        match render_character(character, &path, rasterizer, canvas) {
            Ok(()) => {
                outcome.succeeded.insert(character);
            }
            Err(failure) => {
                log::warn!("{character}: {failure}");
                outcome.failed.insert(character, failure);
            }
        }
    }

    Ok(outcome)
}

/// Renders `character` and writes it to `path`.
fn render_character<R: Rasterizer>(
    character: char,
    path: &Path,
    rasterizer: &R,
    canvas: Canvas,
) -> Result<(), ContentFailure> {
    if !rasterizer.has_glyph(character) {
        return Err(ContentFailure::GlyphMissing);
    }

    rasterizer
        .render(character, canvas)
        .save(path)
        .map_err(ContentFailure::Save)?;
    set_open_permissions(path).map_err(ContentFailure::Permissions)
}

/// Various errors that can occur while loading a [`ReferenceFont`].
#[derive(Debug)]
pub enum LoadFontError {
    /// The font file could not be read.
    Io {
        /// The path of the font file.
        path: PathBuf,
        /// The error that occurred.
        error: io::Error,
    },
    /// The font data could not be parsed.
    Parse {
        /// The path of the font file, if loaded from disk.
        path: Option<PathBuf>,
        /// The reason reported by the parser.
        reason: &'static str,
    },
}

impl fmt::Display for LoadFontError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, error } => {
                write!(f, "Cannot load font: {}, error: {error}", path.display())
            }
            Self::Parse {
                path: Some(path),
                reason,
            } => write!(f, "Cannot load font: {}, error: {reason}", path.display()),
            Self::Parse { path: None, reason } => write!(f, "Cannot load font: {reason}"),
        }
    }
}

impl error::Error for LoadFontError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Io { error, .. } => Some(error),
            Self::Parse { .. } => None,
        }
    }
}

/// Various errors that can occur while creating content images.
#[derive(Debug)]
pub enum ContentError {
    /// The target tree could not be scanned.
    Reconcile(ReconcileError),
    /// The content directory could not be created.
    Io {
        /// The content directory.
        path: PathBuf,
        /// The error that occurred.
        error: io::Error,
    },
}

impl From<ReconcileError> for ContentError {
    fn from(value: ReconcileError) -> Self {
        Self::Reconcile(value)
    }
}

impl fmt::Display for ContentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reconcile(error) => fmt::Display::fmt(error, f),
            Self::Io { path, error } => {
                write!(f, "error creating {}: {error}", path.display())
            }
        }
    }
}

impl error::Error for ContentError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Reconcile(error) => Some(error),
            Self::Io { error, .. } => Some(error),
        }
    }
}
