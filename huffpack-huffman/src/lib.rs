//! # huffpack Huffman codec
//!
//! Lossless byte compression with a classic static Huffman code. The code is
//! rebuilt at decode time from a frequency table stored in the container, so
//! tree construction is fully deterministic (see [`tree`]).
//!
//! ## Pipeline
//!
//! ```text
//! bytes ─▶ FrequencyTable ─▶ HuffmanTree ─▶ CodeTable ─▶ BitPacker ─▶ Container
//!                                                                        │
//! bytes ◀─ TreeWalker ◀──── HuffmanTree ◀── FrequencyTable ◀─────────────┘
//! ```
//!
//! A [`Package`] wraps a container together with an opaque metadata blob and
//! a CRC-32 of the original content. It is the on-disk format the CLI uses.
//!
//! ## Example
//!
//! ```rust
//! use huffpack_huffman::{compress, decompress, encode};
//!
//! let data = [0u8, 0, 0, 1, 1, 2];
//! let container = encode(&data).unwrap();
//! assert_eq!(container.valid_bit_count(), 9);
//! assert_eq!(container.payload().bytes(), &[0x1F, 0x00]);
//!
//! let bytes = compress(b"abracadabra").unwrap();
//! assert_eq!(decompress(&bytes).unwrap(), b"abracadabra");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod codec;
pub mod codes;
pub mod container;
pub mod frequency;
pub mod package;
pub mod tree;

mod wire;

pub use codec::{TreeWalker, WalkState, decode, encode};
pub use codes::{Code, CodeTable, MAX_CODE_LENGTH};
pub use container::{Container, FORMAT_TAG, MAX_DISTINCT_SYMBOLS};
pub use frequency::FrequencyTable;
pub use package::{PACKAGE_MAGIC, PACKAGE_VERSION, PackOptions, Package, PackageStats, Verification};
pub use tree::{HuffmanNode, HuffmanTree};

pub use huffpack_core::{HuffpackError, Result};

/// Encode `data` and serialize the container.
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    Ok(encode(data)?.to_bytes())
}

/// Parse a serialized container and decode it.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    decode(&Container::from_bytes(data)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_text() {
        let input = b"Hello, World! Hello, World! Hello, World!";
        let compressed = compress(input).unwrap();
        assert_eq!(decompress(&compressed).unwrap(), input);
    }

    #[test]
    fn test_roundtrip_empty() {
        let compressed = compress(b"").unwrap();
        assert_eq!(&compressed[..4], b"HUF1");
        assert!(decompress(&compressed).unwrap().is_empty());
    }

    #[test]
    fn test_skewed_input_shrinks() {
        let mut input = vec![b'a'; 10_000];
        input.extend_from_slice(b"bcd");
        let compressed = compress(&input).unwrap();
        assert!(compressed.len() < input.len() / 4);
        assert_eq!(decompress(&compressed).unwrap(), input);
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(matches!(
            decompress(b"not a container"),
            Err(HuffpackError::MalformedContainer { .. })
        ));
    }
}
