//! The `gnt` crate provides an interface for reading GNT glyph archives.
//!
//! # Format
//!
//! A GNT archive is a flat sequence of records. Each record holds a single handwritten or
//! printed glyph sample and is made up of a fixed 10-byte header followed by an 8-bit grayscale
//! bitmap:
//!
//! | Offset | Size | Field       | Encoding             |
//! |--------|------|-------------|----------------------|
//! | 0      | 4    | sample size | little-endian `u32`  |
//! | 4      | 2    | tag code    | big-endian `u16`     |
//! | 6      | 2    | width       | little-endian `u16`  |
//! | 8      | 2    | height      | little-endian `u16`  |
//! | 10     | w*h  | bitmap      | one byte per pixel   |
//!
//! The tag code holds the GB2312 encoding of the character the sample depicts.
//!
//! # Capabilities
//!
//! ## Streaming
//!
//! [`GntReader`] lazily decodes one [`GlyphRecord`] at a time from any [`std::io::Read`], so
//! archives of arbitrary size are decoded in bounded memory.
//!
//! ## Explicit termination
//!
//! A clean end of stream on a record boundary terminates the sequence. A stream that ends in the
//! middle of a record is reported as a [`DecodeError`] instead of being silently truncated.

pub mod charset;
pub mod reader;
pub mod record;

pub use reader::{DecodeError, GntReader};
pub use record::{GlyphRecord, RecordHeader};
