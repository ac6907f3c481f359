//! Assembling the decompressed output from the token stream.

use tracing::{instrument, trace};

use crate::{
    bits::BitReader,
    error::{CorruptInputError, Result},
    header::LhHeader,
    table::{CodeTree, DISTANCE_TREE_WIDTH, LITERAL_TREE_WIDTH},
    tree,
};

/// Shortest back-reference the format can express
const MIN_MATCH: usize = 3;

/// Upper bound on the output reserved before any token has been decoded
const MAX_PREALLOCATION: usize = 1 << 24;

/// A single decoded instruction
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Token {
    /// Emit one byte as is
    Literal(u8),

    /// Copy `length` bytes starting `distance` bytes behind the end of the output
    Match { length: usize, distance: usize },
}

/// Read the next token using the literal/length and distance trees.
pub fn read_token(
    literals: &CodeTree,
    distances: &CodeTree,
    bits: &mut BitReader<'_>,
) -> Result<Token> {
    let symbol = tree::decode(literals, bits)?;
    if let Ok(byte) = u8::try_from(symbol) {
        return Ok(Token::Literal(byte));
    }

    let length = usize::from(symbol & 0xFF) + MIN_MATCH;

    // the distance is stored as its bit count followed by every bit below the leading one
    let extra = u32::from(tree::decode(distances, bits)?);
    let offset = match extra {
        0 => 0,
        _ => (1 << (extra - 1)) | bits.bits(extra - 1)?,
    };

    Ok(Token::Match {
        length,
        distance: offset as usize + 1,
    })
}

/// Decoder state for a single stream: both trees, the bit position and the output so far.
pub struct Decoder<'a> {
    literals: CodeTree,
    distances: CodeTree,
    bits: BitReader<'a>,
    output: Vec<u8>,
    size: usize,
}

impl<'a> Decoder<'a> {
    /// Parse the header and both code tables of `data`.
    pub fn new(data: &'a [u8]) -> Result<Self> {
        let header = LhHeader::parse(data)?;
        let mut offset = header.data_offset();

        let (literals, used) = CodeTree::build(&data[offset..], LITERAL_TREE_WIDTH)?;
        offset += used;
        let (distances, used) = CodeTree::build(&data[offset..], DISTANCE_TREE_WIDTH)?;
        offset += used;

        let size = header.size() as usize;
        Ok(Self {
            literals,
            distances,
            bits: BitReader::new(&data[offset..]),
            output: Vec::with_capacity(size.min(MAX_PREALLOCATION)),
            size,
        })
    }

    /// Decode tokens until the output reaches the size declared in the header.
    pub fn finish(mut self) -> Result<Vec<u8>> {
        while self.output.len() < self.size {
            let token = read_token(&self.literals, &self.distances, &mut self.bits)?;
            self.apply(token)?;
        }
        Ok(self.output)
    }

    fn apply(&mut self, token: Token) -> Result<()> {
        match token {
            Token::Literal(byte) => self.output.push(byte),
            Token::Match { length, distance } => {
                let position = self.output.len();
                if distance > position {
                    return Err(CorruptInputError::DistanceOutOfRange { distance, position }.into());
                }

                let length = length.min(self.size - position);
                trace!(position, length, distance, "copy");

                // byte by byte, an overlapping source has to see the bytes copied before it
                for _ in 0..length {
                    let byte = self.output[self.output.len() - distance];
                    self.output.push(byte);
                }
            }
        }
        Ok(())
    }
}

/// Decompress a whole LH stream.
///
/// The returned buffer is exactly as long as the size stored in the header. Any failure aborts
/// the decode without returning partial output.
#[instrument(skip(data), fields(len = data.len()), err)]
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    Decoder::new(data)?.finish()
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::bits::BitReader;
    use crate::decode::{decompress, read_token, Decoder, Token};
    use crate::error::{CorruptInputError, Error, Result};
    use crate::table::{CodeTree, DISTANCE_TREE_WIDTH, LITERAL_TREE_WIDTH};

    fn decoder<'a>(
        literals: &[u16],
        distances: &[u16],
        bits: &'a [u8],
        size: usize,
    ) -> Decoder<'a> {
        Decoder {
            literals: CodeTree::from_entries(LITERAL_TREE_WIDTH, literals),
            distances: CodeTree::from_entries(DISTANCE_TREE_WIDTH, distances),
            bits: BitReader::new(bits),
            output: Vec::new(),
            size,
        }
    }

    #[test]
    fn overlapping_copy_expands_run() -> Result<()> {
        // 0 => 'A', 1 => length 6; distance tree 0 => no extra bits
        let output = decoder(&[0x180, 0x041, 0x103], &[0x10, 0x00], &[0b0100_0000], 7).finish()?;

        assert_eq!(output, b"AAAAAAA");

        Ok(())
    }

    #[test]
    fn match_clamped_to_size() -> Result<()> {
        let output = decoder(&[0x180, 0x041, 0x103], &[0x10, 0x00], &[0b0100_0000], 4).finish()?;

        assert_eq!(output, b"AAAA");

        Ok(())
    }

    #[test]
    fn stop_once_full() -> Result<()> {
        // no bits remain after the literal, a further read would fail
        let output = decoder(&[0x180, 0x041, 0x103], &[0x10, 0x00], &[0b0000_0000], 8).finish()?;

        assert_eq!(output, b"AAAAAAAA");

        Ok(())
    }

    #[test]
    fn empty_output_reads_nothing() -> Result<()> {
        let output = decoder(&[0x180, 0x041, 0x103], &[0x10, 0x00], &[], 0).finish()?;

        assert!(output.is_empty());

        Ok(())
    }

    #[test]
    fn distance_from_extra_bits() -> Result<()> {
        // distance tree: 0 => 0 extra, 10 => 1 extra, 11 => 4 extra
        let literals = CodeTree::from_entries(LITERAL_TREE_WIDTH, &[0x180, 0x041, 0x1FF]);
        let distances = CodeTree::from_entries(DISTANCE_TREE_WIDTH, &[0x10, 0x00, 0x18, 0x01, 0x04]);

        // 1 0 | 1 10 | 1 11 101
        let mut bits = BitReader::new(&[0b1011_0111, 0b1010_0000]);

        assert_eq!(
            read_token(&literals, &distances, &mut bits)?,
            Token::Match {
                length: 258,
                distance: 1
            }
        );
        assert_eq!(
            read_token(&literals, &distances, &mut bits)?,
            Token::Match {
                length: 258,
                distance: 2
            }
        );
        assert_eq!(
            read_token(&literals, &distances, &mut bits)?,
            Token::Match {
                length: 258,
                distance: 0b1101 + 1
            }
        );

        Ok(())
    }

    #[test]
    fn distance_before_start() {
        // 0 => 'A', 1 => length 6; distance tree 0 => 1 extra bit, so distance 2
        let err = decoder(&[0x180, 0x041, 0x103], &[0x10, 0x01], &[0b0100_0000], 7)
            .finish()
            .unwrap_err();

        assert!(matches!(
            err,
            Error::CorruptInput(CorruptInputError::DistanceOutOfRange {
                distance: 2,
                position: 1
            })
        ));
    }

    #[test]
    fn bits_run_out() {
        let err = decoder(&[0x180, 0x041, 0x103], &[0x10, 0x00], &[0x00], 9)
            .finish()
            .unwrap_err();

        assert!(matches!(
            err,
            Error::CorruptInput(CorruptInputError::UnexpectedEnd { position: 1 })
        ));
    }

    #[test]
    fn decompress_stream() -> Result<()> {
        #[rustfmt::skip]
        let input = [
            // header
            0x40, 0x07, 0x00, 0x00,
            // literal/length table
            0x01, 0x00, 0xC0, 0x10, 0x60, 0x60, 0x00, 0x00,
            // distance table
            0x00, 0x80, 0x00, 0x00,
            // tokens
            0x40,
        ];

        assert_eq!(decompress(&input)?, b"AAAAAAA");

        Ok(())
    }
}
