//! Header of an LH compressed stream.

use std::io::Cursor;

use binrw::BinRead;
use tracing::debug;

use crate::error::{CorruptInputError, FormatError, Result};

/// Marker byte every LH compressed stream starts with
pub const LH_MARKER: u8 = 0x40;

/// Size of a header carrying the 24 bit size field only
const SHORT_HEADER_LEN: usize = 4;

/// Size of a header that falls back to the 32 bit size field
const LONG_HEADER_LEN: usize = 8;

/// LH stream header
///
/// Starts with the `0x40` marker followed by the decompressed size as a little endian 24 bit
/// integer. Streams whose output does not fit in 24 bits store zero there and follow it with a
/// little endian 32 bit size instead.
#[derive(BinRead, Debug, Copy, Clone, PartialEq, Eq)]
#[br(little, magic = 0x40u8)]
pub struct LhHeader {
    #[br(map = |bytes: [u8; 3]| u32::from_le_bytes([bytes[0], bytes[1], bytes[2], 0]))]
    short_size: u32,

    #[br(if(short_size == 0))]
    long_size: Option<u32>,
}

impl LhHeader {
    /// Parse the header at the start of `data`.
    pub fn parse(data: &[u8]) -> Result<LhHeader> {
        let marker = *data.first().ok_or(CorruptInputError::TruncatedHeader {
            needed: SHORT_HEADER_LEN,
            available: 0,
        })?;
        if marker != LH_MARKER {
            return Err(FormatError::InvalidMarker(marker).into());
        }

        let needed = match data.get(1..SHORT_HEADER_LEN) {
            None => SHORT_HEADER_LEN,
            Some([0, 0, 0]) => LONG_HEADER_LEN,
            Some(_) => SHORT_HEADER_LEN,
        };
        if data.len() < needed {
            return Err(CorruptInputError::TruncatedHeader {
                needed,
                available: data.len(),
            }
            .into());
        }

        let header = LhHeader::read(&mut Cursor::new(data))?;
        debug!(size = header.size(), offset = header.data_offset(), "read lh header");
        Ok(header)
    }

    /// The exact number of bytes the stream decompresses to
    pub fn size(&self) -> u32 {
        self.long_size.unwrap_or(self.short_size)
    }

    /// Offset from the start of the stream where the code tables begin
    pub fn data_offset(&self) -> usize {
        match self.long_size {
            Some(_) => LONG_HEADER_LEN,
            None => SHORT_HEADER_LEN,
        }
    }
}

/// Check whether `data` looks like an LH compressed stream.
///
/// Only the first byte is examined, an empty slice is never compressed.
pub fn is_compressed(data: &[u8]) -> bool {
    data.first() == Some(&LH_MARKER)
}

/// Read the decompressed size from the header of `data` without decoding anything else.
pub fn decompressed_size(data: &[u8]) -> Result<u32> {
    LhHeader::parse(data).map(|header| header.size())
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::error::{CorruptInputError, Error, FormatError, Result};
    use crate::header::{decompressed_size, is_compressed, LhHeader};

    #[test]
    fn read_short_header() -> Result<()> {
        #[rustfmt::skip]
        let input = [
            0x40, 0x0A, 0x00, 0x00,
            0xFF, 0xFF, 0xFF, 0xFF,
        ];

        let header = LhHeader::parse(&input)?;
        assert_eq!(header.size(), 10);
        assert_eq!(header.data_offset(), 4);

        Ok(())
    }

    #[test]
    fn read_short_header_using_all_bytes() -> Result<()> {
        let input = [0x40, 0x56, 0x34, 0x12];

        let header = LhHeader::parse(&input)?;
        assert_eq!(header.size(), 0x123456);
        assert_eq!(header.data_offset(), 4);

        Ok(())
    }

    #[test]
    fn read_long_header() -> Result<()> {
        #[rustfmt::skip]
        let input = [
            0x40, 0x00, 0x00, 0x00,
            0x00, 0x01, 0x00, 0x00,
        ];

        let header = LhHeader::parse(&input)?;
        assert_eq!(header.size(), 256);
        assert_eq!(header.data_offset(), 8);

        Ok(())
    }

    #[test]
    fn read_invalid_marker() {
        let input = [0x10, 0x0A, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];

        let err = LhHeader::parse(&input).unwrap_err();
        assert!(matches!(
            err,
            Error::Format(FormatError::InvalidMarker(0x10))
        ));
    }

    #[test]
    fn read_truncated_headers() {
        let cases: [(&[u8], usize); 4] = [
            (&[], 4),
            (&[0x40, 0x0A], 4),
            (&[0x40, 0x00, 0x00, 0x00], 8),
            (&[0x40, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00], 8),
        ];

        for (input, needed) in cases {
            let err = LhHeader::parse(input).unwrap_err();
            match err {
                Error::CorruptInput(CorruptInputError::TruncatedHeader {
                    needed: n,
                    available,
                }) => {
                    assert_eq!(n, needed);
                    assert_eq!(available, input.len());
                }
                other => panic!("unexpected error {other:?}"),
            }
        }
    }

    #[test]
    fn detect_compressed() {
        assert!(is_compressed(&[0x40]));
        assert!(is_compressed(&[0x40, 0x00, 0x00, 0x00]));
        assert!(!is_compressed(&[]));
        assert!(!is_compressed(&[0x10, 0x40]));

        let input = [0x40, 0x12];
        assert_eq!(is_compressed(&input), is_compressed(&input));
        assert_eq!(input, [0x40, 0x12]);
    }

    #[test]
    fn size_query() -> Result<()> {
        assert_eq!(decompressed_size(&[0x40, 0x07, 0x00, 0x00])?, 7);
        assert!(decompressed_size(&[0x41, 0x07, 0x00, 0x00]).unwrap_err().is_format());

        Ok(())
    }
}
