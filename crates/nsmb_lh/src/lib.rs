//! This library handles decompressing **LH** encoded resources used by *New Super Mario Bros. Wii*.
//!
//! # LH Format Documentation
//!
//! LH combines LZ77 style back-references with two prefix code trees. Course files and other
//! resources are stored with it, they are recognised by their first byte `0x40` ("@").
//! Only decoding is provided.
//!
//! ## File Structure
//!
//! An LH stream consists of a header, the literal/length code table, the distance code table and
//! the token bitstream.
//!
//! | Offset (bytes) | Field                  | Description                                                |
//! |----------------|------------------------|------------------------------------------------------------|
//! | 0x0000         | Marker                 | 1 byte: 0x40                                               |
//! | 0x0001         | Size                   | 3 bytes: Decompressed size, 0 if it needs 32 bits          |
//! | 0x0004         | Extended Size          | 4 bytes: Decompressed size, only present if Size is 0      |
//!
//! ### Header
//!
//! - **Marker**: A 1-byte identifier set to `0x40`. Only this byte is checked by [`is_compressed`].
//! - **Size**: A 3-byte little endian unsigned integer giving the exact size of the output.
//! - **Extended Size**: A 4-byte little endian unsigned integer used instead of **Size** when the
//!   output does not fit in 24 bits. The 3-byte field is zero in that case.
//!
//! ### Code Tables
//!
//! Two tables follow the header, first the 9 bit literal/length table and then the 5 bit distance
//! table. Each starts with a count (1 byte for the 5 bit table, 2 little endian bytes for the 9 bit
//! one) giving the size of the whole table as `(count + 1) * 4` bytes, followed by 9 or 5 bit
//! values packed most significant bit first. The values fill the slots of a flat tree starting at
//! slot 1, the root.
//!
//! | Bits                   | Description                                                  |
//! |------------------------|--------------------------------------------------------------|
//! | `width - 1`            | Set if the `0` branch child is a leaf                        |
//! | `width - 2`            | Set if the `1` branch child is a leaf                        |
//! | `0 .. width - 2`       | Offset `o`, children live at slot `(node & !1) + 2 * (o + 1)`|
//!
//! A leaf slot holds its symbol directly.
//!
//! ### Token Bitstream
//!
//! The remaining bytes are read most significant bit first. Each token starts with a symbol from
//! the literal/length tree:
//!
//! - `0 ..= 255`: the byte itself.
//! - `256 ..= 511`: a back-reference of `symbol - 256 + 3` bytes. A symbol from the distance tree
//!   gives the bit count `n` of `distance - 1`. For `n > 0` the top bit is implied and the
//!   remaining `n - 1` bits follow in the bitstream.
//!
//! Back-references are copied a byte at a time, so a distance shorter than the length repeats the
//! bytes in between. Decoding stops as soon as the output reaches the declared size.
//!
//! ## Additional Information
//!
//! - **Endianness**: Little-endian for multi-byte header and table fields, bitstreams are MSB first
//! - **Window**: back-references never reach before the start of the output
//!

pub mod bits;
pub mod decode;
pub mod error;
pub mod header;
pub mod read;
pub mod table;
pub mod tree;

pub use decode::decompress;
pub use header::{decompressed_size, is_compressed, LhHeader, LH_MARKER};
pub use read::{decompress_from, LhDecoder};
