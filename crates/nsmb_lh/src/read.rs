//! Decompressing LH data coming from a [`Read`] source.
//!
//! The format cannot be decoded incrementally from its input, so both helpers here pull the
//! whole source into memory before decoding it.

use std::io::{self, Read};

use tracing::instrument;

use crate::{
    decode::decompress,
    error::{Error, Result},
};

/// Read all of `reader` and decompress it.
#[instrument(skip(reader), err)]
pub fn decompress_from<R: Read>(mut reader: R) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    decompress(&data)
}

/// A [`Read`] adapter yielding the decompressed contents of an LH stream
///
/// ```no_run
/// use std::{fs::File, io::Read};
///
/// fn load_course(path: &str) -> std::io::Result<Vec<u8>> {
///     let mut course = nsmb_lh::LhDecoder::new(File::open(path)?);
///
///     let mut data = Vec::new();
///     course.read_to_end(&mut data)?;
///     Ok(data)
/// }
/// ```
pub struct LhDecoder<R: Read> {
    inner: R,
    output: Option<io::Cursor<Vec<u8>>>,
}

impl<R: Read> LhDecoder<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            output: None,
        }
    }

    /// Unwrap and return the inner reader object
    ///
    /// Once anything has been read the inner reader has been consumed to its end.
    pub fn into_inner(self) -> R {
        self.inner
    }

    fn decoded(&mut self) -> io::Result<&mut io::Cursor<Vec<u8>>> {
        match &mut self.output {
            Some(output) => Ok(output),
            slot => {
                let output = decompress_from(&mut self.inner).map_err(|err| match err {
                    Error::IOError(err) => err,
                    err => io::Error::new(io::ErrorKind::InvalidData, err),
                })?;
                Ok(slot.insert(io::Cursor::new(output)))
            }
        }
    }
}

impl<R: Read> Read for LhDecoder<R> {
    #[instrument(skip_all, err)]
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.decoded()?.read(buf)
    }
}
