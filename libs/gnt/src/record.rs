//! Definitions for a single GNT glyph record.

use core::{error, fmt};

use image::GrayImage;

use crate::charset;

/// The size, in bytes, of a [`RecordHeader`].
pub const HEADER_SIZE: usize = 10;

/// The fixed-size header preceding every bitmap in a GNT archive.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct RecordHeader {
    /// The total size of the record in bytes, as declared by the archive.
    pub sample_size: u32,
    /// The GB2312 code of the character depicted by the record.
    pub tag_code: u16,
    /// The width of the bitmap in pixels.
    pub width: u16,
    /// The height of the bitmap in pixels.
    pub height: u16,
}

impl RecordHeader {
    /// Parses a [`RecordHeader`] from its on-disk representation.
    pub fn parse(bytes: &[u8; HEADER_SIZE]) -> Self {
        Self {
            sample_size: u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
            tag_code: u16::from_be_bytes([bytes[4], bytes[5]]),
            width: u16::from_le_bytes([bytes[6], bytes[7]]),
            height: u16::from_le_bytes([bytes[8], bytes[9]]),
        }
    }

    /// Returns the number of bytes in the bitmap that follows this [`RecordHeader`].
    pub fn bitmap_len(&self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

/// A single decoded glyph sample.
///
/// The bitmap always holds exactly `width * height` bytes, stored row-major with one grayscale
/// byte per pixel.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct GlyphRecord {
    /// The header describing [`GlyphRecord::bitmap`].
    header: RecordHeader,
    /// The pixel data.
    bitmap: Vec<u8>,
}

impl GlyphRecord {
    /// Creates a new [`GlyphRecord`] from a [`RecordHeader`] and its bitmap.
    ///
    /// # Errors
    ///
    /// Returns [`BitmapSizeError`] if `bitmap` does not hold exactly `width * height` bytes.
    pub fn new(header: RecordHeader, bitmap: Vec<u8>) -> Result<Self, BitmapSizeError> {
        if bitmap.len() != header.bitmap_len() {
            return Err(BitmapSizeError {
                expected: header.bitmap_len(),
                actual: bitmap.len(),
            });
        }

        Ok(Self { header, bitmap })
    }

    /// Returns the [`RecordHeader`] of this [`GlyphRecord`].
    pub const fn header(&self) -> RecordHeader {
        self.header
    }

    /// Returns the sample size declared by the archive.
    ///
    /// This value is informational only.
    pub const fn sample_size(&self) -> u32 {
        self.header.sample_size
    }

    /// Returns the raw GB2312 tag code.
    pub const fn tag_code(&self) -> u16 {
        self.header.tag_code
    }

    /// Returns the width of the bitmap in pixels.
    pub const fn width(&self) -> u16 {
        self.header.width
    }

    /// Returns the height of the bitmap in pixels.
    pub const fn height(&self) -> u16 {
        self.header.height
    }

    /// Returns the row-major pixel data.
    pub fn bitmap(&self) -> &[u8] {
        &self.bitmap
    }

    /// Returns the text encoded by the tag code, or `None` if it is not valid GB2312.
    pub fn character(&self) -> Option<String> {
        charset::decode_tag(self.tag_code())
    }

    /// Returns the character encoded by the tag code if it is a valid dataset character.
    ///
    /// See [`charset::is_target_character`] for the acceptance rules.
    pub fn target_character(&self) -> Option<char> {
        charset::target_character(self.tag_code())
    }

    /// Converts this [`GlyphRecord`] into a grayscale image of `width x height` pixels.
    pub fn to_image(&self) -> GrayImage {
        let width = u32::from(self.width());
        let height = u32::from(self.height());

        GrayImage::from_fn(width, height, |x, y| {
            let index = y as usize * usize::from(self.width()) + x as usize;
            image::Luma([self.bitmap[index]])
        })
    }
}

/// An error that occurs when a bitmap does not match the dimensions in its [`RecordHeader`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct BitmapSizeError {
    /// The number of bytes implied by the header.
    pub expected: usize,
    /// The number of bytes provided.
    pub actual: usize,
}

impl fmt::Display for BitmapSizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "bitmap holds {} bytes but its header requires {}",
            self.actual, self.expected
        )
    }
}

impl error::Error for BitmapSizeError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(tag_code: u16, width: u16, height: u16) -> RecordHeader {
        RecordHeader {
            sample_size: HEADER_SIZE as u32 + u32::from(width) * u32::from(height),
            tag_code,
            width,
            height,
        }
    }

    #[test]
    fn header_uses_mixed_endianness() {
        let bytes = [0x10, 0x00, 0x00, 0x00, 0xB6, 0xF3, 0x03, 0x00, 0x02, 0x00];
        let header = RecordHeader::parse(&bytes);

        assert_eq!(header.sample_size, 16);
        assert_eq!(header.tag_code, 0xB6F3);
        assert_eq!(header.width, 3);
        assert_eq!(header.height, 2);
        assert_eq!(header.bitmap_len(), 6);
    }

    #[test]
    fn rejects_mismatched_bitmap() {
        let error = GlyphRecord::new(header(0xB6F3, 2, 2), vec![0; 3]).unwrap_err();
        assert_eq!(
            error,
            BitmapSizeError {
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn image_is_row_major() {
        let record = GlyphRecord::new(header(0xB6F3, 3, 2), vec![0, 1, 2, 3, 4, 5]).unwrap();
        let image = record.to_image();

        assert_eq!(image.dimensions(), (3, 2));
        assert_eq!(image.get_pixel(2, 0).0, [2]);
        assert_eq!(image.get_pixel(0, 1).0, [3]);
        assert_eq!(image.get_pixel(2, 1).0, [5]);
    }

    #[test]
    fn empty_bitmap_is_allowed() {
        let record = GlyphRecord::new(header(0xB6F3, 0, 0), Vec::new()).unwrap();
        assert_eq!(record.to_image().dimensions(), (0, 0));
    }
}
