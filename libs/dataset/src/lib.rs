//! The `dataset` crate provides operations over canonical font-glyph datasets.
//!
//! # Layout
//!
//! Every dataset converges on the same directory layout:
//!
//! ```text
//! <dataset>/ContentImage/<character>.png
//! <dataset>/TargetImage/<font>/<font>+<character>.png
//! <dataset>/TargetImage/<font>/<font>+<character>+<n>.png
//! ```
//!
//! `ContentImage` holds one reference rendering per character, while `TargetImage` holds the
//! glyphs of each font. The optional `+<n>` suffix disambiguates multiple source samples of the
//! same character within one font.
//!
//! # Capabilities
//!
//! - Rendering GNT archives into a font directory ([`archive`]).
//! - Balancing a dataset so that every font and the content set share one character set
//!   ([`reconcile`]).
//! - Pixel-aware comparison of two directory trees ([`compare`]).
//! - Rasterizing content images from a reference font ([`content`]).
//! - Ingesting the raw layouts of several public datasets ([`ingest`]).

use std::path::{Path, PathBuf};

pub mod archive;
pub mod compare;
pub mod content;
pub mod extensions;
pub mod fs;
pub mod ingest;
pub mod naming;
pub mod reconcile;
pub mod summary;

/// The name of the directory holding reference images.
pub const CONTENT_IMAGE_DIR: &str = "ContentImage";

/// The name of the directory holding per-font glyph images.
pub const TARGET_IMAGE_DIR: &str = "TargetImage";

/// The root directory of a canonical dataset.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct DatasetLayout {
    /// The root of the dataset.
    root: PathBuf,
}

impl DatasetLayout {
    /// Creates a new [`DatasetLayout`] rooted at `root`.
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// Returns the root of the dataset.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the path of the `ContentImage` directory.
    pub fn content_dir(&self) -> PathBuf {
        self.root.join(CONTENT_IMAGE_DIR)
    }

    /// Returns the path of the `TargetImage` directory.
    pub fn target_dir(&self) -> PathBuf {
        self.root.join(TARGET_IMAGE_DIR)
    }

    /// Returns the path of the directory holding the glyphs of `font`.
    pub fn font_dir(&self, font: &str) -> PathBuf {
        self.target_dir().join(font)
    }
}
