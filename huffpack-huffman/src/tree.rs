//! Huffman tree construction.
//!
//! The tree is rebuilt from the stored frequency table at decode time, so
//! construction must be fully deterministic:
//!
//! 1. Every distinct symbol becomes a leaf tagged with a sequence number in
//!    first-occurrence order.
//! 2. The two lowest-frequency nodes are merged repeatedly; ties go to the
//!    smaller sequence number.
//! 3. The first node extracted becomes the left child, the second the right
//!    child, and the merged node gets the next unused sequence number.
//!
//! With those three rules the tree shape depends only on the frequency
//! table, never on the priority queue implementation.

use crate::codes::CodeTable;
use crate::frequency::FrequencyTable;
use huffpack_core::error::{HuffpackError, Result};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A node of the prefix-code tree.
///
/// Each node is owned by its parent; there is no sharing and no
/// back-reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanNode {
    /// A symbol and its count.
    Leaf {
        /// Byte value.
        symbol: u8,
        /// Occurrence count.
        frequency: u64,
    },
    /// Two subtrees; `frequency` is the sum of their counts.
    Internal {
        /// Combined count of the subtree.
        frequency: u64,
        /// Subtree reached with bit 0.
        left: Box<HuffmanNode>,
        /// Subtree reached with bit 1.
        right: Box<HuffmanNode>,
    },
}

impl HuffmanNode {
    /// Total count of all symbols below this node.
    pub fn frequency(&self) -> u64 {
        match self {
            Self::Leaf { frequency, .. } | Self::Internal { frequency, .. } => *frequency,
        }
    }

    /// Whether this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }

    /// Number of leaves below this node.
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Leaf { .. } => 1,
            Self::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        match self {
            Self::Leaf { .. } => 0,
            Self::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}

/// Queue entry ordered so that `BinaryHeap` pops the lowest frequency
/// first, and among equal frequencies the lowest sequence number.
#[derive(Debug)]
struct Pending {
    frequency: u64,
    sequence: usize,
    node: HuffmanNode,
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.frequency == other.frequency && self.sequence == other.sequence
    }
}

impl Eq for Pending {}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap.
        other
            .frequency
            .cmp(&self.frequency)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A complete prefix-code tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: HuffmanNode,
}

impl HuffmanTree {
    /// Build the tree for a frequency table.
    ///
    /// A single-entry table yields a lone leaf. Fails with
    /// [`HuffpackError::EmptyAlphabet`] if the table is empty.
    pub fn build(frequencies: &FrequencyTable) -> Result<Self> {
        if frequencies.is_empty() {
            return Err(HuffpackError::EmptyAlphabet);
        }

        let mut heap: BinaryHeap<Pending> = frequencies
            .iter()
            .enumerate()
            .map(|(sequence, (symbol, frequency))| Pending {
                frequency,
                sequence,
                node: HuffmanNode::Leaf { symbol, frequency },
            })
            .collect();
        let mut next_sequence = heap.len();

        loop {
            let Some(first) = heap.pop() else {
                return Err(HuffpackError::EmptyAlphabet);
            };
            let Some(second) = heap.pop() else {
                return Ok(Self { root: first.node });
            };

            let frequency = first.frequency + second.frequency;
            heap.push(Pending {
                frequency,
                sequence: next_sequence,
                node: HuffmanNode::Internal {
                    frequency,
                    left: Box::new(first.node),
                    right: Box::new(second.node),
                },
            });
            next_sequence += 1;
        }
    }

    /// The root node.
    pub fn root(&self) -> &HuffmanNode {
        &self.root
    }

    /// Consume the tree and return its root node.
    pub fn into_root(self) -> HuffmanNode {
        self.root
    }

    /// Generate the symbol-to-code mapping for this tree.
    pub fn code_table(&self) -> CodeTable {
        CodeTable::generate(&self.root)
    }
}
