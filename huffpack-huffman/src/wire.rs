//! Little-endian field reader shared by the container and package parsers.
//!
//! Every short read becomes a [`HuffpackError::MalformedContainer`] naming
//! the field and the offset where it should have started.

use huffpack_core::error::{HuffpackError, Result};

#[derive(Debug)]
pub(crate) struct FieldReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> FieldReader<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    pub(crate) fn offset(&self) -> u64 {
        self.offset as u64
    }

    pub(crate) fn take(&mut self, len: usize, field: &str) -> Result<&'a [u8]> {
        let remaining = self.data.len() - self.offset;
        if len > remaining {
            return Err(HuffpackError::malformed(
                self.offset(),
                format!("{field} truncated: need {len} bytes, {remaining} left"),
            ));
        }
        let bytes = &self.data[self.offset..self.offset + len];
        self.offset += len;
        Ok(bytes)
    }

    pub(crate) fn array<const N: usize>(&mut self, field: &str) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N, field)?);
        Ok(out)
    }

    pub(crate) fn u8(&mut self, field: &str) -> Result<u8> {
        Ok(self.array::<1>(field)?[0])
    }

    pub(crate) fn u16(&mut self, field: &str) -> Result<u16> {
        Ok(u16::from_le_bytes(self.array(field)?))
    }

    pub(crate) fn u32(&mut self, field: &str) -> Result<u32> {
        Ok(u32::from_le_bytes(self.array(field)?))
    }

    pub(crate) fn u64(&mut self, field: &str) -> Result<u64> {
        Ok(u64::from_le_bytes(self.array(field)?))
    }

    /// Read a `u64` length and then that many bytes.
    pub(crate) fn sized(&mut self, len: u64, field: &str) -> Result<&'a [u8]> {
        let len = usize::try_from(len).map_err(|_| {
            HuffpackError::malformed(self.offset(), format!("{field} length {len} too large"))
        })?;
        self.take(len, field)
    }

    /// Fail if any bytes remain.
    pub(crate) fn finish(self) -> Result<()> {
        let trailing = self.data.len() - self.offset;
        if trailing > 0 {
            return Err(HuffpackError::malformed(
                self.offset(),
                format!("{trailing} trailing bytes after the last field"),
            ));
        }
        Ok(())
    }
}
