//! Error types for huffpack operations.
//!
//! Every failure the codec can report is a variant of [`HuffpackError`].
//! Errors are always surfaced to the caller of `encode`/`decode`; nothing in
//! the core recovers silently or returns partial output.

use std::io;
use thiserror::Error;

/// The main error type for huffpack operations.
#[derive(Debug, Error)]
pub enum HuffpackError {
    /// Tree construction was asked to work on zero distinct symbols.
    ///
    /// The facade short-circuits empty input, so reaching this is an
    /// internal invariant violation rather than a user error.
    #[error("Empty alphabet: cannot build a prefix-code tree from zero symbols")]
    EmptyAlphabet,

    /// The declared number of valid bits does not fit in the payload.
    #[error("Corrupt payload: {valid_bits} valid bits declared, only {available_bits} available")]
    CorruptPayload {
        /// Declared valid bit count.
        valid_bits: u64,
        /// Bits actually present in the payload buffer.
        available_bits: u64,
    },

    /// Structurally invalid container (missing, truncated or inconsistent fields).
    #[error("Malformed container at offset {offset}: {message}")]
    MalformedContainer {
        /// Byte offset where the problem was detected.
        offset: u64,
        /// Description of the problem.
        message: String,
    },

    /// The bit stream ran out before every symbol was decoded.
    #[error(
        "Truncated stream: decoded {decoded} of {expected} symbols{}",
        mid_code_suffix(.mid_code)
    )]
    TruncatedStream {
        /// Number of symbols the container declares.
        expected: u64,
        /// Number of symbols decoded before the bits ran out.
        decoded: u64,
        /// Whether the decoder was part-way down the tree when input ended.
        mid_code: bool,
    },

    /// Invalid magic number in a package header.
    #[error("Invalid magic number: expected {expected:02x?}, found {found:02x?}")]
    InvalidMagic {
        /// Expected magic bytes.
        expected: Vec<u8>,
        /// Actual magic bytes found.
        found: Vec<u8>,
    },

    /// Package version this build cannot read.
    #[error("Unsupported package version: {0}")]
    UnsupportedVersion(u8),

    /// CRC checksum mismatch on decoded content.
    #[error("CRC mismatch: expected {expected:#x}, computed {computed:#x}")]
    CrcMismatch {
        /// CRC stored in the package.
        expected: u32,
        /// CRC of the decoded bytes.
        computed: u32,
    },

    /// I/O error from an underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

fn mid_code_suffix(mid_code: &bool) -> &'static str {
    if *mid_code {
        " (stopped inside a code)"
    } else {
        ""
    }
}

/// Result type alias for huffpack operations.
pub type Result<T> = std::result::Result<T, HuffpackError>;

impl HuffpackError {
    /// Create a corrupt payload error.
    pub fn corrupt_payload(valid_bits: u64, available_bits: u64) -> Self {
        Self::CorruptPayload {
            valid_bits,
            available_bits,
        }
    }

    /// Create a malformed container error.
    pub fn malformed(offset: u64, message: impl Into<String>) -> Self {
        Self::MalformedContainer {
            offset,
            message: message.into(),
        }
    }

    /// Create a truncated stream error.
    pub fn truncated(expected: u64, decoded: u64, mid_code: bool) -> Self {
        Self::TruncatedStream {
            expected,
            decoded,
            mid_code,
        }
    }

    /// Create an invalid magic error.
    pub fn invalid_magic(expected: impl Into<Vec<u8>>, found: impl Into<Vec<u8>>) -> Self {
        Self::InvalidMagic {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create a CRC mismatch error.
    pub fn crc_mismatch(expected: u32, computed: u32) -> Self {
        Self::CrcMismatch { expected, computed }
    }
}
