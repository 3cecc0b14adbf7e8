//! Streaming decoder for GNT archives.

use std::{
    error, fmt,
    fs::File,
    io::{self, BufReader, Read},
    path::Path,
};

use crate::record::{GlyphRecord, HEADER_SIZE, RecordHeader};

/// The largest bitmap buffer reserved before any bitmap bytes have been read.
const MAX_RESERVED_BITMAP: usize = 64 * 1024;

/// A lazy [`Iterator`] over the [`GlyphRecord`]s stored in a GNT archive.
///
/// The iterator ends when the underlying reader reaches end of stream exactly on a record
/// boundary. Any other short read produces a [`DecodeError`], after which the iterator yields
/// no further items.
#[derive(Debug)]
pub struct GntReader<R> {
    /// The source of the archive bytes.
    reader: R,
    /// The index of the next record to be decoded.
    index: usize,
    /// Whether the end of the archive or an error has been reached.
    finished: bool,
}

impl GntReader<BufReader<File>> {
    /// Opens the GNT archive located at `path`.
    ///
    /// # Errors
    ///
    /// Returns an [`io::Error`] if the file cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: Read> GntReader<R> {
    /// Creates a new [`GntReader`] that decodes records from `reader`.
    pub const fn new(reader: R) -> Self {
        Self {
            reader,
            index: 0,
            finished: false,
        }
    }

    /// Returns the number of records that have been successfully decoded so far.
    pub const fn records_read(&self) -> usize {
        self.index
    }

    /// Decodes the next record, returning `Ok(None)` on a clean end of stream.
    fn read_record(&mut self) -> Result<Option<GlyphRecord>, DecodeError> {
        let mut header_bytes = [0; HEADER_SIZE];
        let header_read = read_fully(&mut self.reader, &mut header_bytes).map_err(|error| {
            DecodeError::Io {
                index: self.index,
                error,
            }
        })?;

        if header_read == 0 {
            return Ok(None);
        } else if header_read < HEADER_SIZE {
            return Err(DecodeError::TruncatedHeader {
                index: self.index,
                read: header_read,
            });
        }

        let header = RecordHeader::parse(&header_bytes);
        let expected = header.bitmap_len();

        let mut bitmap = Vec::with_capacity(expected.min(MAX_RESERVED_BITMAP));
        (&mut self.reader)
            .take(expected as u64)
            .read_to_end(&mut bitmap)
            .map_err(|error| DecodeError::Io {
                index: self.index,
                error,
            })?;

        if bitmap.len() < expected {
            return Err(DecodeError::TruncatedBitmap {
                index: self.index,
                expected,
                read: bitmap.len(),
            });
        }

        let Ok(record) = GlyphRecord::new(header, bitmap) else {
            unreachable!("bitmap length was checked against the header")
        };

        self.index += 1;
        Ok(Some(record))
    }
}

impl<R: Read> Iterator for GntReader<R> {
    type Item = Result<GlyphRecord, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.read_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(error) => {
                self.finished = true;
                Some(Err(error))
            }
        }
    }
}

impl<R: Read> core::iter::FusedIterator for GntReader<R> {}

/// Reads into `buffer` until it is full or the reader reaches end of stream.
///
/// Returns the number of bytes read.
fn read_fully<R: Read>(reader: &mut R, buffer: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buffer.len() {
        match reader.read(&mut buffer[filled..]) {
            Ok(0) => break,
            Ok(count) => filled += count,
            Err(error) if error.kind() == io::ErrorKind::Interrupted => {}
            Err(error) => return Err(error),
        }
    }

    Ok(filled)
}

/// Various errors that can occur while decoding a GNT archive.
#[derive(Debug)]
pub enum DecodeError {
    /// The archive ended part of the way through a record header.
    TruncatedHeader {
        /// The index of the record being decoded.
        index: usize,
        /// The number of header bytes that were available.
        read: usize,
    },
    /// The archive ended part of the way through a record bitmap.
    TruncatedBitmap {
        /// The index of the record being decoded.
        index: usize,
        /// The number of bitmap bytes declared by the header.
        expected: usize,
        /// The number of bitmap bytes that were available.
        read: usize,
    },
    /// An error occurred while reading from the underlying reader.
    Io {
        /// The index of the record being decoded.
        index: usize,
        /// The error that occurred.
        error: io::Error,
    },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TruncatedHeader { index, read } => write!(
                f,
                "record {index} has a truncated header ({read} of {HEADER_SIZE} bytes)"
            ),
            Self::TruncatedBitmap {
                index,
                expected,
                read,
            } => write!(
                f,
                "record {index} has a truncated bitmap ({read} of {expected} bytes)"
            ),
            Self::Io { index, error } => write!(f, "error reading record {index}: {error}"),
        }
    }
}

impl error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Io { error, .. } => Some(error),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn encode(tag_code: u16, width: u16, height: u16, bitmap: &[u8]) -> Vec<u8> {
        let sample_size = (HEADER_SIZE + bitmap.len()) as u32;

        let mut bytes = Vec::new();
        bytes.extend_from_slice(&sample_size.to_le_bytes());
        bytes.extend_from_slice(&tag_code.to_be_bytes());
        bytes.extend_from_slice(&width.to_le_bytes());
        bytes.extend_from_slice(&height.to_le_bytes());
        bytes.extend_from_slice(bitmap);
        bytes
    }

    #[test]
    fn empty_archive_yields_nothing() {
        let mut reader = GntReader::new(Cursor::new(Vec::new()));
        assert!(reader.next().is_none());
        assert_eq!(reader.records_read(), 0);
    }

    #[test]
    fn decodes_every_record() {
        let mut archive = encode(0xB6F3, 2, 2, &[1, 2, 3, 4]);
        archive.extend(encode(0xB6F4, 3, 1, &[5, 6, 7]));
        archive.extend(encode(0x2100, 1, 1, &[8]));

        let records = GntReader::new(Cursor::new(archive))
            .collect::<Result<Vec<_>, _>>()
            .unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].tag_code(), 0xB6F3);
        assert_eq!(records[0].bitmap(), &[1, 2, 3, 4]);
        assert_eq!(records[1].width(), 3);
        assert_eq!(records[1].height(), 1);
        assert_eq!(records[2].sample_size(), 11);
    }

    #[test]
    fn truncated_header_is_an_error() {
        let mut archive = encode(0xB6F3, 1, 1, &[0]);
        archive.extend_from_slice(&[0x0B, 0x00, 0x00]);

        let mut reader = GntReader::new(Cursor::new(archive));
        assert!(reader.next().unwrap().is_ok());
        assert!(matches!(
            reader.next(),
            Some(Err(DecodeError::TruncatedHeader { index: 1, read: 3 }))
        ));
        assert!(reader.next().is_none());
    }

    #[test]
    fn truncated_bitmap_is_an_error() {
        let mut archive = encode(0xB6F3, 4, 4, &[0; 16]);
        archive.truncate(archive.len() - 6);

        let mut reader = GntReader::new(Cursor::new(archive));
        assert!(matches!(
            reader.next(),
            Some(Err(DecodeError::TruncatedBitmap {
                index: 0,
                expected: 16,
                read: 10
            }))
        ));
        assert!(reader.next().is_none());
    }

    #[test]
    fn oversized_header_reports_truncation() {
        let mut archive = encode(0xB6F3, u16::MAX, u16::MAX, &[]);
        archive.extend_from_slice(&[1, 2, 3]);

        let mut reader = GntReader::new(Cursor::new(archive));
        assert!(matches!(
            reader.next(),
            Some(Err(DecodeError::TruncatedBitmap {
                index: 0,
                expected: 4_294_836_225,
                read: 3
            }))
        ));
        assert!(reader.next().is_none());
    }

    #[test]
    fn header_only_record_with_zero_area_is_valid() {
        let archive = encode(0xB6F3, 0, 7, &[]);
        let records = GntReader::new(Cursor::new(archive))
            .collect::<Result<Vec<_>, _>>()
            .unwrap();

        assert_eq!(records.len(), 1);
        assert!(records[0].bitmap().is_empty());
    }
}
