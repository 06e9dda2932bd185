//! Damaged containers must fail cleanly, never with partial output.

use huffpack_huffman::{HuffpackError, compress, decompress};

fn sample() -> Vec<u8> {
    compress(b"the container should reject damage at every field").unwrap()
}

/// Offset of the trailing `symbol_count | valid_bit_count | payload_length` block.
fn counts_offset(bytes: &[u8]) -> usize {
    let distinct = u16::from_le_bytes([bytes[4], bytes[5]]) as usize;
    6 + distinct * 9
}

#[test]
fn test_truncated_anywhere() {
    let bytes = sample();
    for len in 0..bytes.len() {
        let result = decompress(&bytes[..len]);
        assert!(
            matches!(result, Err(HuffpackError::MalformedContainer { .. })),
            "truncation to {len} bytes gave {result:?}"
        );
    }
}

#[test]
fn test_payload_length_beyond_data() {
    let mut bytes = sample();
    let at = counts_offset(&bytes) + 16;
    let declared = u64::from_le_bytes(bytes[at..at + 8].try_into().unwrap());
    bytes[at..at + 8].copy_from_slice(&(declared + 1).to_le_bytes());
    assert!(matches!(
        decompress(&bytes),
        Err(HuffpackError::MalformedContainer { .. })
    ));
}

#[test]
fn test_huge_payload_length() {
    let mut bytes = sample();
    let at = counts_offset(&bytes) + 16;
    bytes[at..at + 8].copy_from_slice(&u64::MAX.to_le_bytes());
    assert!(matches!(
        decompress(&bytes),
        Err(HuffpackError::MalformedContainer { .. })
    ));
}

#[test]
fn test_valid_bits_beyond_payload() {
    let mut bytes = sample();
    let at = counts_offset(&bytes) + 8;
    let payload_len = bytes.len() - (counts_offset(&bytes) + 24);
    let too_many = (payload_len as u64) * 8 + 1;
    bytes[at..at + 8].copy_from_slice(&too_many.to_le_bytes());
    assert!(matches!(
        decompress(&bytes),
        Err(HuffpackError::CorruptPayload { .. })
    ));
}

#[test]
fn test_valid_bits_too_few() {
    let mut bytes = sample();
    let at = counts_offset(&bytes) + 8;
    bytes[at..at + 8].copy_from_slice(&3u64.to_le_bytes());
    assert!(matches!(
        decompress(&bytes),
        Err(HuffpackError::TruncatedStream { .. })
    ));
}

#[test]
fn test_symbol_count_disagrees_with_table() {
    let mut bytes = sample();
    let at = counts_offset(&bytes);
    let count = u64::from_le_bytes(bytes[at..at + 8].try_into().unwrap());
    bytes[at..at + 8].copy_from_slice(&(count - 1).to_le_bytes());
    assert!(matches!(
        decompress(&bytes),
        Err(HuffpackError::MalformedContainer { .. })
    ));
}

#[test]
fn test_distinct_count_too_large() {
    let mut bytes = sample();
    bytes[4..6].copy_from_slice(&300u16.to_le_bytes());
    assert!(matches!(
        decompress(&bytes),
        Err(HuffpackError::MalformedContainer { offset: 4, .. })
    ));
}

#[test]
fn test_unallocatable_single_symbol_run() {
    // Structurally valid: one symbol whose count matches symbol_count.
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"HUF1");
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.push(7);
    bytes.extend_from_slice(&u64::MAX.to_le_bytes());
    bytes.extend_from_slice(&u64::MAX.to_le_bytes());
    bytes.extend_from_slice(&0u64.to_le_bytes());
    bytes.extend_from_slice(&0u64.to_le_bytes());
    assert_eq!(bytes.len(), 39);

    assert!(decompress(&bytes).is_err());
}

#[test]
fn test_trailing_garbage() {
    let mut bytes = sample();
    bytes.extend_from_slice(b"junk");
    assert!(matches!(
        decompress(&bytes),
        Err(HuffpackError::MalformedContainer { .. })
    ));
}

#[test]
fn test_flipped_payload_bits_never_panic() {
    let original = b"the container should reject damage at every field";
    let bytes = sample();
    let payload_start = counts_offset(&bytes) + 24;
    for i in payload_start..bytes.len() {
        let mut damaged = bytes.clone();
        damaged[i] ^= 0xA5;
        // Either a different decode or a truncation error, but no panic.
        if let Ok(output) = decompress(&damaged) {
            assert_eq!(output.len(), original.len());
        }
    }
}
