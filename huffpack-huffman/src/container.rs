//! Self-describing container format.
//!
//! Everything the decoder needs travels in the container: the frequency
//! table (in first-occurrence order, so the tree rebuild breaks ties the
//! same way the encoder did), the original symbol count, and the packed
//! payload with its valid bit count. All integers are little-endian.
//!
//! ```text
//! ┌──────────────┬──────────────────────┬─────────────────────────────┐
//! │ "HUF1" (4)   │ distinct count (u16) │ N × (symbol u8, count u64)  │
//! ├──────────────┴─────┬────────────────┴─────┬───────────────────────┤
//! │ symbol_count (u64) │ valid_bit_count (u64)│ payload_length (u64)  │
//! ├────────────────────┴──────────────────────┴───────────────────────┤
//! │ payload (payload_length bytes)                                    │
//! └───────────────────────────────────────────────────────────────────┘
//! ```

use crate::frequency::FrequencyTable;
use crate::wire::FieldReader;
use huffpack_core::bitstream::PackedPayload;
use huffpack_core::error::{HuffpackError, Result};
use std::io::{Read, Write};

/// Format tag at the start of every container.
pub const FORMAT_TAG: [u8; 4] = *b"HUF1";

/// Maximum number of distinct symbols (one per byte value).
pub const MAX_DISTINCT_SYMBOLS: usize = 256;

/// Size of one `(symbol, count)` entry on the wire.
const ENTRY_SIZE: usize = 1 + 8;

/// Tag, distinct count, and the three trailing `u64` fields.
const FIXED_SIZE: usize = 4 + 2 + 8 + 8 + 8;

/// Frequency table, payload and counts for one encoded sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    frequencies: FrequencyTable,
    symbol_count: u64,
    payload: PackedPayload,
}

impl Container {
    /// Assemble a container from its parts.
    pub fn new(frequencies: FrequencyTable, symbol_count: u64, payload: PackedPayload) -> Self {
        Self {
            frequencies,
            symbol_count,
            payload,
        }
    }

    /// The container for a zero-length input.
    pub fn empty() -> Self {
        Self::new(FrequencyTable::new(), 0, PackedPayload::default())
    }

    /// Stored frequency table.
    pub fn frequencies(&self) -> &FrequencyTable {
        &self.frequencies
    }

    /// Number of symbols in the original input.
    pub fn symbol_count(&self) -> u64 {
        self.symbol_count
    }

    /// Packed code bits.
    pub fn payload(&self) -> &PackedPayload {
        &self.payload
    }

    /// Number of meaningful bits in the payload.
    pub fn valid_bit_count(&self) -> u64 {
        self.payload.valid_bit_count()
    }

    /// Size of the serialized container in bytes.
    pub fn serialized_len(&self) -> usize {
        FIXED_SIZE + self.frequencies.len() * ENTRY_SIZE + self.payload.len()
    }

    /// Serialize the container.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&self.to_bytes())?;
        Ok(())
    }

    /// Serialize the container into a new buffer.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.serialized_len());
        out.extend_from_slice(&FORMAT_TAG);

        // At most 256 entries, checked by FrequencyTable's index width.
        out.extend_from_slice(&(self.frequencies.len() as u16).to_le_bytes());
        for (symbol, count) in self.frequencies.iter() {
            out.push(symbol);
            out.extend_from_slice(&count.to_le_bytes());
        }

        out.extend_from_slice(&self.symbol_count.to_le_bytes());
        out.extend_from_slice(&self.payload.valid_bit_count().to_le_bytes());
        out.extend_from_slice(&(self.payload.len() as u64).to_le_bytes());
        out.extend_from_slice(self.payload.bytes());
        out
    }

    /// Read a container that spans the rest of `reader`.
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    /// Parse a container occupying exactly `data`.
    ///
    /// Fails with [`HuffpackError::MalformedContainer`] on a wrong format
    /// tag, truncated fields, duplicate or zero-count symbols, a frequency
    /// sum that differs from `symbol_count`, or trailing bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut reader = FieldReader::new(data);

        let tag: [u8; 4] = reader.array("format_tag")?;
        if tag != FORMAT_TAG {
            return Err(HuffpackError::malformed(
                0,
                format!("unrecognized format tag {tag:02x?}"),
            ));
        }

        let distinct_offset = reader.offset();
        let distinct = reader.u16("distinct_symbol_count")? as usize;
        if distinct > MAX_DISTINCT_SYMBOLS {
            return Err(HuffpackError::malformed(
                distinct_offset,
                format!(
                    "{distinct} distinct symbols declared, at most {MAX_DISTINCT_SYMBOLS} possible"
                ),
            ));
        }

        let mut frequencies = FrequencyTable::new();
        for _ in 0..distinct {
            let entry_offset = reader.offset();
            let symbol = reader.u8("symbol_table symbol")?;
            let count = reader.u64("symbol_table frequency")?;
            if !frequencies.insert(symbol, count) {
                let reason = if count == 0 {
                    "zero frequency"
                } else if frequencies.get(symbol).is_some() {
                    "duplicate symbol"
                } else {
                    "frequency total overflows"
                };
                return Err(HuffpackError::malformed(
                    entry_offset,
                    format!("{reason} for symbol {symbol}"),
                ));
            }
        }

        let count_offset = reader.offset();
        let symbol_count = reader.u64("symbol_count")?;
        if symbol_count != frequencies.total() {
            return Err(HuffpackError::malformed(
                count_offset,
                format!(
                    "symbol_count {symbol_count} does not match frequency total {}",
                    frequencies.total()
                ),
            ));
        }

        let valid_bit_count = reader.u64("valid_bit_count")?;
        let payload_length = reader.u64("payload_length")?;
        let payload = reader.sized(payload_length, "payload")?.to_vec();
        reader.finish()?;

        Ok(Self::new(
            frequencies,
            symbol_count,
            PackedPayload::from_parts(payload, valid_bit_count),
        ))
    }
}
