//! Edge case tests for the Huffman codec.

use huffpack_huffman::{
    Code, Container, FrequencyTable, HuffmanTree, compress, decode, decompress, encode,
};

fn lcg_bytes(size: usize, mut seed: u64) -> Vec<u8> {
    let mut data = Vec::with_capacity(size);
    for _ in 0..size {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        data.push((seed >> 32) as u8);
    }
    data
}

#[test]
fn test_empty_input() {
    let container = encode(b"").unwrap();
    assert!(container.frequencies().is_empty());
    assert_eq!(container.symbol_count(), 0);
    assert_eq!(container.valid_bit_count(), 0);
    assert!(decode(&container).unwrap().is_empty());
}

#[test]
fn test_single_byte() {
    let compressed = compress(b"A").unwrap();
    assert_eq!(decompress(&compressed).unwrap(), b"A");
}

#[test]
fn test_all_same_byte() {
    let input = vec![255u8; 5000];
    let container = encode(&input).unwrap();
    // One bit per symbol.
    assert_eq!(container.valid_bit_count(), 5000);
    assert_eq!(container.payload().len(), 625);
    assert_eq!(decode(&container).unwrap(), input);
}

#[test]
fn test_two_symbols() {
    let input = b"abababababbbbb";
    let container = encode(input).unwrap();
    assert_eq!(container.valid_bit_count(), input.len() as u64);
    assert_eq!(decode(&container).unwrap(), input);
}

#[test]
fn test_all_byte_values() {
    let input: Vec<u8> = (0..=255u8).collect();
    let container = encode(&input).unwrap();
    assert_eq!(container.frequencies().len(), 256);
    // Equal weights over 256 symbols give a complete 8-level tree.
    assert_eq!(container.valid_bit_count(), 256 * 8);
    assert_eq!(decode(&container).unwrap(), input);
}

#[test]
fn test_random_data() {
    let input = lcg_bytes(64 * 1024, 0x1234_5678_9ABC_DEF0);
    let compressed = compress(&input).unwrap();
    assert_eq!(decompress(&compressed).unwrap(), input);
}

#[test]
fn test_text_compresses() {
    let text = b"The quick brown fox jumps over the lazy dog. ".repeat(200);
    let compressed = compress(&text).unwrap();
    assert!(compressed.len() < text.len());
    assert_eq!(decompress(&compressed).unwrap(), text);
}

#[test]
fn test_fibonacci_weights_build_deep_tree() {
    // Fibonacci counts produce the most unbalanced tree possible.
    let mut input = Vec::new();
    let (mut a, mut b) = (1usize, 1usize);
    for symbol in 0..20u8 {
        input.extend(std::iter::repeat_n(symbol, a));
        (a, b) = (b, a + b);
    }

    let frequencies = FrequencyTable::count(&input);
    let tree = HuffmanTree::build(&frequencies).unwrap();
    assert_eq!(tree.root().depth(), 19);
    assert_eq!(tree.code_table().max_length(), 19);

    let compressed = compress(&input).unwrap();
    assert_eq!(decompress(&compressed).unwrap(), input);
}

#[test]
fn test_tie_break_follows_first_occurrence() {
    // Same multiset, different first-occurrence order.
    let forward = encode(b"xyzzyx").unwrap();
    let backward = encode(b"zyxxyz").unwrap();

    let order = |c: &Container| c.frequencies().iter().map(|(s, _)| s).collect::<Vec<_>>();
    assert_eq!(order(&forward), b"xyz".to_vec());
    assert_eq!(order(&backward), b"zyx".to_vec());

    // The first two seen merge first; the third symbol takes the short left code.
    let codes = |c: &Container| {
        let table = HuffmanTree::build(c.frequencies()).unwrap().code_table();
        [b'x', b'y', b'z'].map(|s| table.get(s).unwrap().to_string())
    };
    assert_eq!(codes(&forward), ["10", "11", "0"]);
    assert_eq!(codes(&backward), ["0", "11", "10"]);

    assert_eq!(decode(&forward).unwrap(), b"xyzzyx");
    assert_eq!(decode(&backward).unwrap(), b"zyxxyz");
}

#[test]
fn test_encoding_is_deterministic() {
    let input = lcg_bytes(10_000, 42);
    let first = compress(&input).unwrap();
    for _ in 0..5 {
        assert_eq!(compress(&input).unwrap(), first);
    }
}

#[test]
fn test_codes_are_prefix_free() {
    let input = lcg_bytes(4096, 7);
    let codes = HuffmanTree::build(&FrequencyTable::count(&input))
        .unwrap()
        .code_table();
    let all: Vec<Code> = codes.iter().map(|(_, code)| code).collect();

    for (i, a) in all.iter().enumerate() {
        assert!(!a.is_empty());
        for b in &all[i + 1..] {
            assert!(!a.is_prefix_of(b) && !b.is_prefix_of(a), "{a} / {b}");
        }
    }
}

#[test]
fn test_bit_count_matches_code_lengths() {
    let input = b"mississippi river banks";
    let frequencies = FrequencyTable::count(input);
    let codes = HuffmanTree::build(&frequencies).unwrap().code_table();
    let expected: u64 = input
        .iter()
        .map(|&s| codes.get(s).map_or(0, |c| c.len() as u64))
        .sum();

    let container = encode(input).unwrap();
    assert_eq!(container.valid_bit_count(), expected);
    assert_eq!(container.payload().len() as u64, expected.div_ceil(8));
}
