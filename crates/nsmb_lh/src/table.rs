//! Reconstruction of the code trees stored ahead of the token stream.
//!
//! Each tree is stored as a count field followed by a run of `width` bit values, packed most
//! significant bit first. The count gives the size of the whole table as `(count + 1) * 4` bytes,
//! count field included. The values fill consecutive slots of a flat array starting at slot 1,
//! slot 0 is never used.

use std::ops::RangeInclusive;

use byteorder::{ByteOrder, LittleEndian};
use tracing::debug;

use crate::error::{CorruptInputError, Result};

/// Width of the tree decoding literals and match lengths (512 symbols)
pub const LITERAL_TREE_WIDTH: u32 = 9;

/// Width of the tree decoding the number of distance bits (32 symbols)
pub const DISTANCE_TREE_WIDTH: u32 = 5;

/// Widths a tree can be built with: a node needs two flag bits, and values are stored as `u16`
pub const TREE_WIDTHS: RangeInclusive<u32> = 2..=16;

/// A code tree in its flat, slot indexed form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTree {
    width: u32,
    entries: Vec<u16>,
    filled: usize,
}

impl CodeTree {
    /// Build a tree of the given `width` from the table at the start of `data`.
    ///
    /// Returns the tree along with the number of bytes the table occupies. `width` must lie in
    /// [`TREE_WIDTHS`].
    pub fn build(data: &[u8], width: u32) -> Result<(CodeTree, usize)> {
        if !TREE_WIDTHS.contains(&width) {
            return Err(CorruptInputError::UnsupportedWidth(width).into());
        }

        let capacity = 2usize << width;
        let count_len = if width <= 8 { 1 } else { 2 };

        let count = match data.get(..count_len) {
            Some(&[count]) => usize::from(count),
            Some(bytes) => usize::from(LittleEndian::read_u16(bytes)),
            None => {
                return Err(CorruptInputError::TruncatedTable {
                    needed: count_len,
                    available: data.len(),
                }
                .into())
            }
        };

        let table_len = (count + 1) * 4;
        let table = data
            .get(..table_len)
            .ok_or(CorruptInputError::TruncatedTable {
                needed: table_len,
                available: data.len(),
            })?;

        let mask = (1u32 << width) - 1;
        let mut entries = vec![0u16; capacity];
        let mut filled = 1;
        let mut consumed = count_len;
        let mut buffer = 0u32;
        let mut buffered = 0u32;

        while consumed < table_len {
            if buffered < width {
                let needed = ((width + 7 - buffered) >> 3) as usize;
                let Some(bytes) = table.get(consumed..consumed + needed) else {
                    break;
                };
                for &byte in bytes {
                    buffer = (buffer << 8) | u32::from(byte);
                }
                consumed += needed;
                buffered += needed as u32 * 8;
            }

            if filled < capacity {
                entries[filled] = ((buffer >> (buffered - width)) & mask) as u16;
                filled += 1;
            }
            buffered -= width;
        }

        debug!(width, table_len, slots = filled - 1, "built code tree");

        Ok((
            CodeTree {
                width,
                entries,
                filled,
            },
            table_len,
        ))
    }

    /// Create a tree directly from the values of slots `1..`.
    #[cfg(test)]
    pub(crate) fn from_entries(width: u32, values: &[u16]) -> CodeTree {
        let mut entries = vec![0u16; 2usize << width];
        entries[1..=values.len()].copy_from_slice(values);
        CodeTree {
            width,
            entries,
            filled: values.len() + 1,
        }
    }

    /// Width in bits of every value stored in the tree
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of slots in the tree, including the unused slot 0
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Get the value stored at `index`, refusing slots the table never described.
    pub fn entry(&self, index: usize) -> Result<u16> {
        if index >= self.entries.len() {
            return Err(CorruptInputError::NodeOutOfRange {
                index,
                capacity: self.entries.len(),
            }
            .into());
        }
        if index >= self.filled {
            return Err(CorruptInputError::UnfilledNode(index).into());
        }
        Ok(self.entries[index])
    }
}
