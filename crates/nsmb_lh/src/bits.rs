//! Sequential bit access over the token stream.

use crate::error::{CorruptInputError, Result};

/// Bit reader, most significant bit first, pulling one byte at a time.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    position: usize,
    current: u8,
    remaining: u8,
}

impl<'a> BitReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            position: 0,
            current: 0,
            remaining: 0,
        }
    }

    /// Read the next bit, refilling from the next byte once the current one is spent.
    #[inline]
    pub fn next_bit(&mut self) -> Result<u8> {
        if self.remaining == 0 {
            self.current = *self
                .data
                .get(self.position)
                .ok_or(CorruptInputError::UnexpectedEnd {
                    position: self.position,
                })?;
            self.position += 1;
            self.remaining = 8;
        }

        self.remaining -= 1;
        Ok((self.current >> self.remaining) & 1)
    }

    /// Read `count` bits with the first bit read ending up most significant.
    pub fn bits(&mut self, count: u32) -> Result<u32> {
        let mut value = 0;
        for _ in 0..count {
            value = (value << 1) | u32::from(self.next_bit()?);
        }
        Ok(value)
    }

    /// Number of bytes pulled from the input so far
    pub fn position(&self) -> usize {
        self.position
    }
}
