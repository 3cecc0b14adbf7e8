//! Front-ends that convert the raw layouts of public datasets into the canonical layout.
//!
//! Each front-end derives font names from its source's naming convention and either renders or
//! copies the source images into `ContentImage` and `TargetImage`.

pub mod casia;
pub mod fyp23;
pub mod neumason;
pub mod zhuojg;

use std::{
    error, fmt, io,
    path::{Path, PathBuf},
};

use gnt::DecodeError;

use crate::fs::sorted_entries;

/// Various errors that can occur while ingesting a raw dataset.
#[derive(Debug)]
pub enum IngestError {
    /// The source directory does not exist.
    MissingSource(PathBuf),
    /// The directory holding the content font does not exist.
    MissingContentFont(PathBuf),
    /// A file stem is not a valid index into the word list.
    InvalidToken {
        /// The file whose stem is the token.
        path: PathBuf,
        /// The number of characters in the word list.
        wordlist_len: usize,
    },
    /// A GNT archive is malformed.
    Decode {
        /// The path of the archive.
        path: PathBuf,
        /// The error that occurred.
        error: DecodeError,
    },
    /// An I/O error occurred.
    Io {
        /// The path being accessed.
        path: PathBuf,
        /// The error that occurred.
        error: io::Error,
    },
}

impl IngestError {
    /// Returns a closure that wraps an [`io::Error`] that occurred while accessing `path`.
    pub(crate) fn io(path: &Path) -> impl FnOnce(io::Error) -> Self + '_ {
        move |error| Self::Io {
            path: path.to_path_buf(),
            error,
        }
    }
}

impl fmt::Display for IngestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSource(path) => {
                write!(f, "Source directory {} does not exist.", path.display())
            }
            Self::MissingContentFont(path) => {
                write!(f, "Content font {} not found.", path.display())
            }
            Self::InvalidToken { path, wordlist_len } => write!(
                f,
                "{} is not named by an index into the {wordlist_len} character word list",
                path.display()
            ),
            Self::Decode { path, error } => write!(f, "error decoding {}: {error}", path.display()),
            Self::Io { path, error } => write!(f, "error accessing {}: {error}", path.display()),
        }
    }
}

impl error::Error for IngestError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Decode { error, .. } => Some(error),
            Self::Io { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// Returns the paths of the subdirectories of `dir`, sorted by name.
pub(crate) fn subdirectories(dir: &Path) -> Result<Vec<PathBuf>, IngestError> {
    entries(dir, |file_type| file_type.is_dir())
}

/// Returns the paths of the regular files in `dir`, sorted by name.
pub(crate) fn files(dir: &Path) -> Result<Vec<PathBuf>, IngestError> {
    entries(dir, |file_type| file_type.is_file())
}

/// Returns the paths of the entries of `dir` whose file type satisfies `predicate`.
fn entries(
    dir: &Path,
    predicate: impl Fn(&std::fs::FileType) -> bool,
) -> Result<Vec<PathBuf>, IngestError> {
    let mut paths = Vec::new();
    for entry in sorted_entries(dir).map_err(IngestError::io(dir))? {
        let path = entry.path();
        if predicate(&entry.file_type().map_err(IngestError::io(&path))?) {
            paths.push(path);
        }
    }

    Ok(paths)
}

/// Returns the file stem of `path` as a lossily converted string.
pub(crate) fn stem(path: &Path) -> String {
    path.file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .into_owned()
}

/// Returns the final component of `path` as a lossily converted string.
pub(crate) fn file_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .into_owned()
}
