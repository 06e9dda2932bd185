//! Bit packing and unpacking for variable-length codes.
//!
//! [`BitPacker`] turns a logical sequence of bits into a byte buffer and
//! [`BitUnpacker`] walks such a buffer back bit by bit. Both use
//! MSB-first ordering: the first bit of the sequence lands in the most
//! significant bit of the first byte.
//!
//! The final byte is right-padded with zero bits. Because padding is
//! indistinguishable from data, the packed form always travels together
//! with the number of meaningful bits, see [`PackedPayload`].
//!
//! # Example
//!
//! ```
//! use huffpack_core::bitstream::{pack, unpack};
//!
//! let bits = [false, false, false, true, true, true, true, true, false];
//! let payload = pack(bits);
//! assert_eq!(payload.bytes(), &[0x1F, 0x00]);
//! assert_eq!(payload.valid_bit_count(), 9);
//!
//! let restored = unpack(payload.bytes(), payload.valid_bit_count()).unwrap();
//! assert_eq!(restored, bits);
//! ```

use crate::error::{HuffpackError, Result};

/// A byte-aligned bit buffer plus the number of bits that carry data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackedPayload {
    bytes: Vec<u8>,
    valid_bit_count: u64,
}

impl PackedPayload {
    /// Wrap raw payload bytes.
    ///
    /// No consistency check is done here; [`BitUnpacker::new`] rejects a
    /// `valid_bit_count` that does not fit in `bytes`.
    pub fn from_parts(bytes: Vec<u8>, valid_bit_count: u64) -> Self {
        Self {
            bytes,
            valid_bit_count,
        }
    }

    /// The packed bytes, padding included.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of meaningful bits at the front of the buffer.
    pub fn valid_bit_count(&self) -> u64 {
        self.valid_bit_count
    }

    /// Number of zero bits appended to reach a byte boundary.
    pub fn padding_bits(&self) -> u64 {
        (self.bytes.len() as u64 * 8).saturating_sub(self.valid_bit_count)
    }

    /// Length of the packed buffer in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the payload holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Iterate over the meaningful bits.
    pub fn bits(&self) -> Result<BitUnpacker<'_>> {
        BitUnpacker::new(&self.bytes, self.valid_bit_count)
    }

    /// Consume the payload and return its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// MSB-first bit writer backed by a growable byte buffer.
#[derive(Debug, Default)]
pub struct BitPacker {
    /// Completed bytes.
    output: Vec<u8>,
    /// Partial byte, filled from the MSB side.
    buffer: u8,
    /// Number of bits in `buffer`.
    bits_in_buffer: u8,
    /// Total bits written.
    total_bits: u64,
}

impl BitPacker {
    /// Create an empty packer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a packer sized for roughly `bits` bits of output.
    pub fn with_capacity(bits: u64) -> Self {
        let bytes = usize::try_from(bits.div_ceil(8)).unwrap_or(0);
        Self {
            output: Vec::with_capacity(bytes),
            ..Self::default()
        }
    }

    /// Append a single bit.
    #[inline]
    pub fn write_bit(&mut self, bit: bool) {
        self.buffer |= (bit as u8) << (7 - self.bits_in_buffer);
        self.bits_in_buffer += 1;
        self.total_bits += 1;

        if self.bits_in_buffer == 8 {
            self.output.push(self.buffer);
            self.buffer = 0;
            self.bits_in_buffer = 0;
        }
    }

    /// Append the low `count` bits of `value`, most significant first.
    #[inline]
    pub fn write_bits(&mut self, value: u128, count: u8) {
        debug_assert!(count <= 128, "Cannot write more than 128 bits at once");

        for shift in (0..count).rev() {
            self.write_bit((value >> shift) & 1 != 0);
        }
    }

    /// Total bits written so far.
    pub fn bits_written(&self) -> u64 {
        self.total_bits
    }

    /// Pad the last byte with zeros and return the packed payload.
    pub fn finish(mut self) -> PackedPayload {
        if self.bits_in_buffer > 0 {
            self.output.push(self.buffer);
        }
        PackedPayload {
            bytes: self.output,
            valid_bit_count: self.total_bits,
        }
    }
}

/// MSB-first bit reader that stops after the last meaningful bit.
#[derive(Debug, Clone)]
pub struct BitUnpacker<'a> {
    data: &'a [u8],
    valid_bit_count: u64,
    position: u64,
}

impl<'a> BitUnpacker<'a> {
    /// Create a reader over `data` limited to `valid_bit_count` bits.
    ///
    /// Fails with [`HuffpackError::CorruptPayload`] when the declared bit
    /// count exceeds `8 * data.len()`.
    pub fn new(data: &'a [u8], valid_bit_count: u64) -> Result<Self> {
        let available_bits = data.len() as u64 * 8;
        if valid_bit_count > available_bits {
            return Err(HuffpackError::corrupt_payload(
                valid_bit_count,
                available_bits,
            ));
        }

        Ok(Self {
            data,
            valid_bit_count,
            position: 0,
        })
    }

    /// Read the next bit, or `None` once every valid bit is consumed.
    #[inline]
    pub fn read_bit(&mut self) -> Option<bool> {
        if self.position >= self.valid_bit_count {
            return None;
        }

        let byte = self.data[(self.position / 8) as usize];
        let bit = (byte >> (7 - (self.position % 8))) & 1 != 0;
        self.position += 1;
        Some(bit)
    }

    /// Number of bits consumed so far.
    pub fn bit_position(&self) -> u64 {
        self.position
    }

    /// Number of valid bits not yet consumed.
    pub fn remaining(&self) -> u64 {
        self.valid_bit_count - self.position
    }
}

impl Iterator for BitUnpacker<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        self.read_bit()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.remaining()).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

/// Pack a bit sequence into bytes, MSB first, zero-padding the last byte.
///
/// An empty sequence yields an empty buffer with `valid_bit_count == 0`.
pub fn pack<I>(bits: I) -> PackedPayload
where
    I: IntoIterator<Item = bool>,
{
    let mut packer = BitPacker::new();
    for bit in bits {
        packer.write_bit(bit);
    }
    packer.finish()
}

/// Expand bytes into bits, MSB first, keeping only the first
/// `valid_bit_count` bits.
pub fn unpack(bytes: &[u8], valid_bit_count: u64) -> Result<Vec<bool>> {
    Ok(BitUnpacker::new(bytes, valid_bit_count)?.collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(s: &str) -> Vec<bool> {
        s.chars().map(|c| c == '1').collect()
    }

    #[test]
    fn test_pack_empty() {
        let payload = pack(Vec::new());
        assert!(payload.is_empty());
        assert_eq!(payload.valid_bit_count(), 0);
        assert_eq!(payload.padding_bits(), 0);
    }

    #[test]
    fn test_pack_msb_first() {
        let payload = pack(bits("10110101"));
        assert_eq!(payload.bytes(), &[0xB5]);
        assert_eq!(payload.valid_bit_count(), 8);
        assert_eq!(payload.padding_bits(), 0);
    }

    #[test]
    fn test_pack_pads_last_byte() {
        let payload = pack(bits("000111110"));
        assert_eq!(payload.bytes(), &[0x1F, 0x00]);
        assert_eq!(payload.valid_bit_count(), 9);
        assert_eq!(payload.padding_bits(), 7);
    }

    #[test]
    fn test_write_bits_matches_single_bits() {
        let mut packer = BitPacker::new();
        packer.write_bits(0b101, 3);
        packer.write_bits(0b1100, 4);
        packer.write_bits(0b11111111, 8);
        assert_eq!(packer.bits_written(), 15);

        let payload = packer.finish();
        assert_eq!(payload, pack(bits("101110011111111")));
    }

    #[test]
    fn test_write_wide_code() {
        let mut packer = BitPacker::new();
        packer.write_bits(1u128 << 99, 100);
        let payload = packer.finish();
        assert_eq!(payload.valid_bit_count(), 100);
        assert_eq!(payload.bytes()[0], 0x80);
        assert!(payload.bytes()[1..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_unpack_truncates_padding() {
        let restored = unpack(&[0x1F, 0x00], 9).unwrap();
        assert_eq!(restored, bits("000111110"));
    }

    #[test]
    fn test_unpack_zero_bits() {
        assert!(unpack(&[], 0).unwrap().is_empty());
        assert!(unpack(&[0xFF], 0).unwrap().is_empty());
    }

    #[test]
    fn test_unpack_rejects_overlong_bit_count() {
        let err = unpack(&[0xFF], 9).unwrap_err();
        assert!(matches!(
            err,
            HuffpackError::CorruptPayload {
                valid_bits: 9,
                available_bits: 8
            }
        ));
    }

    #[test]
    fn test_unpacker_position_tracking() {
        let mut reader = BitUnpacker::new(&[0xA0], 3).unwrap();
        assert_eq!(reader.remaining(), 3);
        assert_eq!(reader.read_bit(), Some(true));
        assert_eq!(reader.read_bit(), Some(false));
        assert_eq!(reader.bit_position(), 2);
        assert_eq!(reader.read_bit(), Some(true));
        assert_eq!(reader.read_bit(), None);
        assert_eq!(reader.remaining(), 0);
    }
}
