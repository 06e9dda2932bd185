//! # huffpack core
//!
//! Shared building blocks for the huffpack codec:
//!
//! - [`bitstream`]: MSB-first bit packing with explicit valid-bit counts
//! - [`crc`]: CRC-32 for package integrity checks
//! - [`error`]: the error taxonomy shared by every layer
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L4: CLI                                                 │
//! │     compress / decompress / test / info                 │
//! ├─────────────────────────────────────────────────────────┤
//! │ L3: Container + Package                                 │
//! │     frequency table, payload, metadata, CRC             │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Codec                                               │
//! │     frequency model, tree builder, code table, decoder  │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: BitStream (this crate)                              │
//! │     BitPacker/BitUnpacker, CRC, errors                  │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use huffpack_core::bitstream::BitPacker;
//! use huffpack_core::crc::Crc32;
//!
//! let mut packer = BitPacker::new();
//! packer.write_bits(0b10, 2);
//! packer.write_bit(true);
//! let payload = packer.finish();
//! assert_eq!(payload.bytes(), &[0b1010_0000]);
//! assert_eq!(payload.valid_bit_count(), 3);
//!
//! assert_eq!(Crc32::compute(b"Hello, World!"), 0xEC4AC3D0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod bitstream;
pub mod crc;
pub mod error;

// Re-exports for convenience
pub use bitstream::{BitPacker, BitUnpacker, PackedPayload, pack, unpack};
pub use crc::Crc32;
pub use error::{HuffpackError, Result};
