//! Code table generation.
//!
//! Codes are read off the tree by root-to-leaf path, 0 for left and 1 for
//! right. A tree that is a single leaf has an empty path; that symbol gets
//! the one-bit code `0` instead so every code is at least one bit long.

use crate::frequency::FrequencyTable;
use crate::tree::HuffmanNode;
use huffpack_core::bitstream::BitPacker;
use std::fmt;

/// Longest code a [`Code`] can hold.
///
/// Counts are `u64`, and a tree deeper than ~92 levels would need a total
/// count beyond `u64::MAX`, so real trees stay well inside this limit.
pub const MAX_CODE_LENGTH: u8 = 128;

/// A variable-length bit code, stored right-aligned in `value`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Code {
    value: u128,
    length: u8,
}

impl Code {
    /// Create a code from its right-aligned bits.
    pub fn new(value: u128, length: u8) -> Self {
        debug_assert!(length <= MAX_CODE_LENGTH);
        Self { value, length }
    }

    /// The code bits, right-aligned.
    pub fn value(&self) -> u128 {
        self.value
    }

    /// Number of bits in the code.
    pub fn len(&self) -> u8 {
        self.length
    }

    /// Whether the code has no bits.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// The code's bits, first bit first.
    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.length)
            .rev()
            .map(move |shift| (self.value >> shift) & 1 != 0)
    }

    /// Whether `self` is a prefix of `other` (a code is a prefix of itself).
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        if self.length > other.length {
            return false;
        }
        let shift = other.length - self.length;
        shift == 128 || other.value >> shift == self.value
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.bits() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Mapping from symbol to code.
#[derive(Clone, PartialEq, Eq)]
pub struct CodeTable {
    /// Indexed by symbol; an empty code means the symbol is absent.
    codes: [Code; 256],
    len: usize,
}

impl CodeTable {
    /// Walk the tree and record the path to every leaf.
    pub fn generate(root: &HuffmanNode) -> Self {
        let mut table = Self {
            codes: [Code::default(); 256],
            len: 0,
        };

        match root {
            HuffmanNode::Leaf { symbol, .. } => table.set(*symbol, Code::new(0, 1)),
            HuffmanNode::Internal { .. } => table.assign(root, 0, 0),
        }

        table
    }

    fn assign(&mut self, node: &HuffmanNode, value: u128, length: u8) {
        match node {
            HuffmanNode::Leaf { symbol, .. } => self.set(*symbol, Code::new(value, length)),
            HuffmanNode::Internal { left, right, .. } => {
                debug_assert!(length < MAX_CODE_LENGTH, "Huffman tree too deep");
                self.assign(left, value << 1, length + 1);
                self.assign(right, (value << 1) | 1, length + 1);
            }
        }
    }

    fn set(&mut self, symbol: u8, code: Code) {
        if self.codes[symbol as usize].is_empty() {
            self.len += 1;
        }
        self.codes[symbol as usize] = code;
    }

    /// Code for `symbol`, if the symbol is in the table.
    pub fn get(&self, symbol: u8) -> Option<Code> {
        let code = self.codes[symbol as usize];
        (!code.is_empty()).then_some(code)
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the table holds no codes.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterate `(symbol, code)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, Code)> + '_ {
        (0..=255u8).filter_map(move |symbol| self.get(symbol).map(|code| (symbol, code)))
    }

    /// Longest code length in the table.
    pub fn max_length(&self) -> u8 {
        self.codes.iter().map(Code::len).max().unwrap_or(0)
    }

    /// Exact number of bits needed to encode input with these counts.
    pub fn encoded_bits(&self, frequencies: &FrequencyTable) -> u64 {
        frequencies
            .iter()
            .map(|(symbol, count)| count * self.codes[symbol as usize].len() as u64)
            .sum()
    }

    /// Append the code of every symbol in `data` to `packer`.
    ///
    /// `data` must only contain symbols present in the table; absent symbols
    /// contribute no bits.
    pub fn write_symbols(&self, data: &[u8], packer: &mut BitPacker) {
        for &symbol in data {
            let code = self.codes[symbol as usize];
            debug_assert!(!code.is_empty(), "symbol {symbol} has no code");
            packer.write_bits(code.value, code.length);
        }
    }
}

impl fmt::Debug for CodeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(symbol, code)| (symbol, code.to_string())))
            .finish()
    }
}
