//! Encode and decode entry points.
//!
//! Compression runs frequency model → tree → code table → bit packer and
//! wraps the result in a [`Container`]. Decompression rebuilds the tree from
//! the stored frequencies and walks it one bit at a time.

use crate::container::Container;
use crate::frequency::FrequencyTable;
use crate::tree::{HuffmanNode, HuffmanTree};
use huffpack_core::bitstream::BitPacker;
use huffpack_core::error::{HuffpackError, Result};
use std::io;
use std::ptr;
use tracing::{debug, trace};

/// Encode a byte sequence into a container.
///
/// Zero-length input yields [`Container::empty`] without building a tree.
pub fn encode(input: &[u8]) -> Result<Container> {
    if input.is_empty() {
        debug!("encode: empty input");
        return Ok(Container::empty());
    }

    let frequencies = FrequencyTable::count(input);
    let tree = HuffmanTree::build(&frequencies)?;
    let codes = tree.code_table();
    trace!(?codes, "code table");

    let total_bits = codes.encoded_bits(&frequencies);
    let mut packer = BitPacker::with_capacity(total_bits);
    codes.write_symbols(input, &mut packer);
    let payload = packer.finish();

    debug!(
        symbols = input.len(),
        distinct = frequencies.len(),
        bits = payload.valid_bit_count(),
        bytes = payload.len(),
        "encode"
    );

    Ok(Container::new(frequencies, input.len() as u64, payload))
}

/// Decode a container back into the original byte sequence.
///
/// Fails with [`HuffpackError::CorruptPayload`] if the valid bit count does
/// not fit in the payload, and with [`HuffpackError::TruncatedStream`] if
/// the bits run out before `symbol_count` symbols are produced. No partial
/// output is ever returned.
pub fn decode(container: &Container) -> Result<Vec<u8>> {
    let frequencies = container.frequencies();
    let expected = container.symbol_count();

    if frequencies.is_empty() {
        debug!("decode: empty frequency table");
        return Ok(Vec::new());
    }

    if let Some(symbol) = frequencies.sole_symbol() {
        // A single symbol carries no information in the payload.
        let count = usize::try_from(expected).map_err(|_| {
            HuffpackError::malformed(0, format!("symbol_count {expected} exceeds address space"))
        })?;
        let mut output = Vec::new();
        output.try_reserve_exact(count).map_err(|e| {
            io::Error::new(
                io::ErrorKind::OutOfMemory,
                format!("cannot allocate {count} output symbols: {e}"),
            )
        })?;
        output.resize(count, symbol);
        debug!(symbol, count, "decode: single-symbol run");
        return Ok(output);
    }

    let tree = HuffmanTree::build(frequencies)?;
    let bits = container.payload().bits()?;

    // Each symbol costs at least one bit, so the payload bounds the output.
    let capacity = expected.min(container.valid_bit_count());
    let mut output = Vec::with_capacity(usize::try_from(capacity).unwrap_or(0));
    let mut walker = TreeWalker::new(tree.root());

    if expected > 0 {
        for bit in bits {
            if let Some(symbol) = walker.step(bit) {
                output.push(symbol);
                if output.len() as u64 == expected {
                    break;
                }
            }
        }
    }

    if (output.len() as u64) < expected {
        return Err(HuffpackError::truncated(
            expected,
            output.len() as u64,
            walker.state() == WalkState::Descending,
        ));
    }

    debug!(
        symbols = output.len(),
        distinct = frequencies.len(),
        bits = container.valid_bit_count(),
        "decode"
    );

    Ok(output)
}

/// Position of a [`TreeWalker`] relative to the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkState {
    /// At the root, between codes.
    AtRoot,
    /// Part-way down the tree, inside a code.
    Descending,
}

/// Bit-at-a-time decoder over a prefix-code tree.
///
/// The only state is the current node: each bit moves left (0) or right
/// (1), and reaching a leaf emits its symbol and returns to the root.
#[derive(Debug)]
pub struct TreeWalker<'t> {
    root: &'t HuffmanNode,
    current: &'t HuffmanNode,
}

impl<'t> TreeWalker<'t> {
    /// Start a walk at `root`.
    pub fn new(root: &'t HuffmanNode) -> Self {
        Self {
            root,
            current: root,
        }
    }

    /// Whether the walker is between codes or inside one.
    pub fn state(&self) -> WalkState {
        if ptr::eq(self.current, self.root) {
            WalkState::AtRoot
        } else {
            WalkState::Descending
        }
    }

    /// Consume one bit, returning a symbol when a leaf is reached.
    ///
    /// A tree that is a single leaf emits its symbol on every bit, matching
    /// its one-bit code.
    #[inline]
    pub fn step(&mut self, bit: bool) -> Option<u8> {
        let next = match self.current {
            HuffmanNode::Leaf { symbol, .. } => return Some(*symbol),
            HuffmanNode::Internal { left, right, .. } => {
                if bit {
                    right.as_ref()
                } else {
                    left.as_ref()
                }
            }
        };

        match next {
            HuffmanNode::Leaf { symbol, .. } => {
                self.current = self.root;
                Some(*symbol)
            }
            HuffmanNode::Internal { .. } => {
                self.current = next;
                None
            }
        }
    }
}
