//! Parsing and construction of canonical image file names.
//!
//! Target images are named `<font>+<character>[+<suffix>].<ext>`. Only the first two
//! `+`-delimited fields carry meaning; the suffix exists solely to keep duplicate samples of the
//! same character apart and is ignored when parsing.

use std::{
    error, fmt,
    path::{Path, PathBuf},
};

/// The separator between the fields of a target image name.
pub const FIELD_SEPARATOR: char = '+';

/// The file extension of images written by this crate.
pub const IMAGE_EXTENSION: &str = "png";

/// The fields of a target image file stem.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct TargetStem<'name> {
    /// The font the image belongs to.
    pub font: &'name str,
    /// The raw character field, which is not validated.
    pub character: &'name str,
}

/// Splits a target image file stem into its font and character fields.
///
/// Returns `None` if the stem holds no [`FIELD_SEPARATOR`].
pub fn split_target_stem(stem: &str) -> Option<TargetStem<'_>> {
    let mut fields = stem.split(FIELD_SEPARATOR);
    let font = fields.next()?;
    let character = fields.next()?;

    Some(TargetStem { font, character })
}

/// Parses the character of the target image at `path`.
///
/// # Errors
///
/// - [`NameError::MissingSeparator`]: Returned if the file stem has no character field.
/// - [`NameError::EmptyCharacter`]: Returned if the character field is empty.
/// - [`NameError::NotSingleCharacter`]: Returned if the character field is not exactly one
///   Unicode code point.
pub fn target_character(path: &Path) -> Result<char, NameError> {
    let stem = file_stem(path)?;
    let fields = split_target_stem(&stem).ok_or_else(|| NameError::MissingSeparator {
        path: path.to_path_buf(),
    })?;

    single_character(fields.character, path)
}

/// Parses the character of the content image at `path`.
///
/// # Errors
///
/// - [`NameError::EmptyCharacter`]: Returned if the file stem is empty.
/// - [`NameError::NotSingleCharacter`]: Returned if the file stem is not exactly one Unicode
///   code point.
pub fn content_character(path: &Path) -> Result<char, NameError> {
    let stem = file_stem(path)?;
    single_character(&stem, path)
}

/// Returns the file name of the `index`th sample of `character` in `font`.
///
/// The first sample has no suffix; later samples are suffixed with their index.
pub fn target_file_name(font: &str, character: &str, index: usize, extension: &str) -> String {
    if index == 0 {
        format!("{font}{FIELD_SEPARATOR}{character}.{extension}")
    } else {
        format!("{font}{FIELD_SEPARATOR}{character}{FIELD_SEPARATOR}{index}.{extension}")
    }
}

/// Returns the file name of the content image of `character`.
pub fn content_file_name(character: char) -> String {
    format!("{character}.{IMAGE_EXTENSION}")
}

/// Returns the file stem of `path` as UTF-8.
fn file_stem(path: &Path) -> Result<String, NameError> {
    let stem = path.file_stem().unwrap_or_default();
    stem.to_str()
        .map(str::to_owned)
        .ok_or_else(|| NameError::NotUtf8 {
            path: path.to_path_buf(),
        })
}

/// Validates that `field` holds exactly one code point.
fn single_character(field: &str, path: &Path) -> Result<char, NameError> {
    let mut chars = field.chars();
    match (chars.next(), chars.next()) {
        (None, _) => Err(NameError::EmptyCharacter {
            path: path.to_path_buf(),
        }),
        (Some(character), None) => Ok(character),
        (Some(_), Some(_)) => Err(NameError::NotSingleCharacter {
            field: field.to_owned(),
            path: path.to_path_buf(),
        }),
    }
}

/// Various errors that can occur while parsing a canonical image name.
///
/// These indicate a corrupt dataset rather than a recoverable condition.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub enum NameError {
    /// The file name is not valid UTF-8.
    NotUtf8 {
        /// The offending path.
        path: PathBuf,
    },
    /// The file stem has no character field.
    MissingSeparator {
        /// The offending path.
        path: PathBuf,
    },
    /// The character field is empty.
    EmptyCharacter {
        /// The offending path.
        path: PathBuf,
    },
    /// The character field holds more than one code point.
    NotSingleCharacter {
        /// The contents of the character field.
        field: String,
        /// The offending path.
        path: PathBuf,
    },
}

impl NameError {
    /// Returns the path of the file whose name failed to parse.
    pub fn path(&self) -> &Path {
        match self {
            Self::NotUtf8 { path }
            | Self::MissingSeparator { path }
            | Self::EmptyCharacter { path }
            | Self::NotSingleCharacter { path, .. } => path,
        }
    }
}

impl fmt::Display for NameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotUtf8 { path } => write!(f, "file name is not UTF-8: {}", path.display()),
            Self::MissingSeparator { path } => write!(
                f,
                "missing '{FIELD_SEPARATOR}' separated character field in file: {}",
                path.display()
            ),
            Self::EmptyCharacter { path } => {
                write!(f, "Empty character name in file: {}", path.display())
            }
            Self::NotSingleCharacter { field, path } => write!(
                f,
                "Character name \"{field}\" should be a single character: {}",
                path.display()
            ),
        }
    }
}

impl error::Error for NameError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_first_two_fields() {
        assert_eq!(
            split_target_stem("fontA+書+2"),
            Some(TargetStem {
                font: "fontA",
                character: "書"
            })
        );
        assert_eq!(split_target_stem("fontA"), None);
    }

    #[test]
    fn parses_target_characters() {
        assert_eq!(target_character(Path::new("fontA/fontA+書.png")), Ok('書'));
        assert_eq!(target_character(Path::new("fontA/fontA+法+1.png")), Ok('法'));
    }

    #[test]
    fn empty_character_names_path() {
        let path = Path::new("TargetImage/fontA/fontA+.png");
        let error = target_character(path).unwrap_err();

        assert_eq!(
            error,
            NameError::EmptyCharacter {
                path: path.to_path_buf()
            }
        );
        assert_eq!(
            error.to_string(),
            "Empty character name in file: TargetImage/fontA/fontA+.png"
        );
    }

    #[test]
    fn multiple_characters_names_path() {
        let path = Path::new("TargetImage/fontA/fontA+非單字.png");
        let error = target_character(path).unwrap_err();

        assert_eq!(error.path(), path);
        assert_eq!(
            error.to_string(),
            "Character name \"非單字\" should be a single character: TargetImage/fontA/fontA+非單字.png"
        );
    }

    #[test]
    fn missing_separator_is_an_error() {
        let path = Path::new("fontA/fontA.png");
        assert!(matches!(
            target_character(path),
            Err(NameError::MissingSeparator { .. })
        ));
    }

    #[test]
    fn parses_content_characters() {
        assert_eq!(content_character(Path::new("ContentImage/劍.png")), Ok('劍'));
        assert!(matches!(
            content_character(Path::new("ContentImage/char1.png")),
            Err(NameError::NotSingleCharacter { .. })
        ));
    }

    #[test]
    fn builds_file_names() {
        assert_eq!(target_file_name("fontA", "書", 0, "png"), "fontA+書.png");
        assert_eq!(target_file_name("fontA", "書", 2, "png"), "fontA+書+2.png");
        assert_eq!(content_file_name('書'), "書.png");
    }
}
