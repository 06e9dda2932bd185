//! Symbol frequency model.
//!
//! A [`FrequencyTable`] records how often each byte value occurs, keeping
//! entries in the order symbols were first seen. That order is part of the
//! format: the tree builder uses it to break frequency ties, and the
//! container stores entries in the same order so the decoder rebuilds an
//! identical tree.

/// Occurrence counts per symbol, in first-occurrence order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    /// `(symbol, count)` pairs in insertion order.
    entries: Vec<(u8, u64)>,
    /// Position of each symbol in `entries`.
    index: [Option<u8>; 256],
    /// Sum of all counts.
    total: u64,
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl FrequencyTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: [None; 256],
            total: 0,
        }
    }

    /// Count every symbol in `data`.
    ///
    /// Empty input produces an empty table.
    pub fn count(data: &[u8]) -> Self {
        let mut counts = [0u64; 256];
        let mut order = Vec::new();

        for &byte in data {
            let slot = &mut counts[byte as usize];
            if *slot == 0 {
                order.push(byte);
            }
            *slot += 1;
        }

        let mut table = Self::new();
        for symbol in order {
            table.index[symbol as usize] = Some(table.entries.len() as u8);
            table.entries.push((symbol, counts[symbol as usize]));
        }
        table.total = data.len() as u64;
        table
    }

    /// Append a symbol with its count.
    ///
    /// Returns `false`, leaving the table unchanged, if the symbol is
    /// already present, the count is zero, or the running total would
    /// overflow `u64`.
    pub fn insert(&mut self, symbol: u8, frequency: u64) -> bool {
        if frequency == 0 || self.index[symbol as usize].is_some() {
            return false;
        }
        let Some(total) = self.total.checked_add(frequency) else {
            return false;
        };

        self.index[symbol as usize] = Some(self.entries.len() as u8);
        self.entries.push((symbol, frequency));
        self.total = total;
        true
    }

    /// Count recorded for `symbol`, if it occurs.
    pub fn get(&self, symbol: u8) -> Option<u64> {
        self.index[symbol as usize].map(|i| self.entries[i as usize].1)
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no symbol has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts, i.e. the length of the counted input.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Iterate `(symbol, count)` pairs in first-occurrence order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (u8, u64)> + '_ {
        self.entries.iter().copied()
    }

    /// The only symbol of a single-entry table.
    pub fn sole_symbol(&self) -> Option<u8> {
        match self.entries.as_slice() {
            [(symbol, _)] => Some(*symbol),
            _ => None,
        }
    }
}
