//! File-level package: container plus opaque metadata and a content CRC.
//!
//! Format adapters (audio, text, ...) need to carry their own header data
//! next to the compressed bytes. The package stores that blob verbatim and
//! never looks inside it.
//!
//! ```text
//! "HPAK" (4) │ version (u8) │ metadata_length (u32) │ metadata
//!            │ content_crc (u32) │ container_length (u64) │ container
//! ```

use crate::codec::{decode, encode};
use crate::container::Container;
use crate::wire::FieldReader;
use huffpack_core::crc::Crc32;
use huffpack_core::error::{HuffpackError, Result};
use std::io::{self, Read, Write};
use tracing::{debug, warn};

/// Package magic bytes.
pub const PACKAGE_MAGIC: [u8; 4] = *b"HPAK";

/// Current package version.
pub const PACKAGE_VERSION: u8 = 1;

/// Options for [`Package::compress`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackOptions {
    /// Decode the result right after encoding and log any mismatch.
    pub verify: bool,
}

impl Default for PackOptions {
    fn default() -> Self {
        Self { verify: true }
    }
}

impl PackOptions {
    /// Enable or disable post-encode verification.
    pub fn with_verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }
}

/// Result of re-decoding a package against the original bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    /// Decoded bytes match the original.
    Passed,
    /// Decoding failed or produced different bytes.
    Failed(String),
}

/// Size and ratio figures for a package.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PackageStats {
    /// Length of the original input in bytes.
    pub original_size: u64,
    /// Length of the serialized container.
    pub container_size: u64,
    /// Length of the whole serialized package.
    pub package_size: u64,
    /// Length of the metadata blob.
    pub metadata_size: u64,
    /// Number of distinct symbols in the input.
    pub distinct_symbols: usize,
    /// Meaningful bits in the payload.
    pub payload_bits: u64,
    /// Zero bits padding the payload to a byte boundary.
    pub padding_bits: u64,
    /// Average code length in bits per symbol (0 for empty input).
    pub bits_per_symbol: f64,
    /// `package_size / original_size` (0 for empty input).
    pub ratio: f64,
}

impl PackageStats {
    /// Percentage saved relative to the original size.
    pub fn space_savings(&self) -> f64 {
        if self.original_size == 0 {
            0.0
        } else {
            (1.0 - self.ratio) * 100.0
        }
    }
}

/// Compressed content with its metadata and CRC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    metadata: Vec<u8>,
    content_crc: u32,
    container: Container,
}

impl Package {
    /// Compress `data`, attaching `metadata` unchanged.
    pub fn compress(
        data: &[u8],
        metadata: impl Into<Vec<u8>>,
        options: &PackOptions,
    ) -> Result<Self> {
        let metadata = metadata.into();
        if u32::try_from(metadata.len()).is_err() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("metadata of {} bytes exceeds the 4 GiB limit", metadata.len()),
            )
            .into());
        }

        let package = Self {
            metadata,
            content_crc: Crc32::compute(data),
            container: encode(data)?,
        };

        if options.verify {
            match package.verify(data) {
                Verification::Passed => debug!(bytes = data.len(), "verification passed"),
                Verification::Failed(reason) => warn!(%reason, "verification failed"),
            }
        }

        Ok(package)
    }

    /// Decode the container and check the result against `original`.
    pub fn verify(&self, original: &[u8]) -> Verification {
        match decode(&self.container) {
            Ok(decoded) if decoded == original => Verification::Passed,
            Ok(decoded) => Verification::Failed(format!(
                "decoded {} bytes that differ from the {} original bytes",
                decoded.len(),
                original.len()
            )),
            Err(e) => Verification::Failed(e.to_string()),
        }
    }

    /// Decode the content and check its CRC.
    pub fn decompress(&self) -> Result<Vec<u8>> {
        let data = decode(&self.container)?;
        let computed = Crc32::compute(&data);
        if computed != self.content_crc {
            return Err(HuffpackError::crc_mismatch(self.content_crc, computed));
        }
        Ok(data)
    }

    /// The opaque metadata blob.
    pub fn metadata(&self) -> &[u8] {
        &self.metadata
    }

    /// CRC-32 of the original content.
    pub fn content_crc(&self) -> u32 {
        self.content_crc
    }

    /// The wrapped container.
    pub fn container(&self) -> &Container {
        &self.container
    }

    /// Size of the serialized package in bytes.
    pub fn serialized_len(&self) -> usize {
        4 + 1 + 4 + self.metadata.len() + 4 + 8 + self.container.serialized_len()
    }

    /// Size and ratio figures.
    pub fn stats(&self) -> PackageStats {
        let original_size = self.container.symbol_count();
        let package_size = self.serialized_len() as u64;
        let payload_bits = self.container.valid_bit_count();
        let (bits_per_symbol, ratio) = if original_size == 0 {
            (0.0, 0.0)
        } else {
            (
                payload_bits as f64 / original_size as f64,
                package_size as f64 / original_size as f64,
            )
        };

        PackageStats {
            original_size,
            container_size: self.container.serialized_len() as u64,
            package_size,
            metadata_size: self.metadata.len() as u64,
            distinct_symbols: self.container.frequencies().len(),
            payload_bits,
            padding_bits: self.container.payload().padding_bits(),
            bits_per_symbol,
            ratio,
        }
    }

    /// Serialize the package.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&self.to_bytes())?;
        Ok(())
    }

    /// Serialize the package into a new buffer.
    pub fn to_bytes(&self) -> Vec<u8> {
        let container = self.container.to_bytes();
        let mut out = Vec::with_capacity(self.serialized_len());
        out.extend_from_slice(&PACKAGE_MAGIC);
        out.push(PACKAGE_VERSION);
        // Fits in u32: checked by `compress` and by the length field on parse.
        out.extend_from_slice(&(self.metadata.len() as u32).to_le_bytes());
        out.extend_from_slice(&self.metadata);
        out.extend_from_slice(&self.content_crc.to_le_bytes());
        out.extend_from_slice(&(container.len() as u64).to_le_bytes());
        out.extend_from_slice(&container);
        out
    }

    /// Read a package that spans the rest of `reader`.
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    /// Parse a package occupying exactly `data`.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut reader = FieldReader::new(data);

        let magic: [u8; 4] = reader.array("magic")?;
        if magic != PACKAGE_MAGIC {
            return Err(HuffpackError::invalid_magic(PACKAGE_MAGIC, magic));
        }

        let version = reader.u8("version")?;
        if version != PACKAGE_VERSION {
            return Err(HuffpackError::UnsupportedVersion(version));
        }

        let metadata_length = reader.u32("metadata_length")?;
        let metadata = reader.sized(metadata_length as u64, "metadata")?.to_vec();
        let content_crc = reader.u32("content_crc")?;
        let container_length = reader.u64("container_length")?;
        let container_offset = reader.offset();
        let container_bytes = reader.sized(container_length, "container")?;
        reader.finish()?;

        let container = Container::from_bytes(container_bytes).map_err(|e| match e {
            HuffpackError::MalformedContainer { offset, message } => {
                HuffpackError::malformed(container_offset + offset, message)
            }
            other => other,
        })?;

        Ok(Self {
            metadata,
            content_crc,
            container,
        })
    }
}
