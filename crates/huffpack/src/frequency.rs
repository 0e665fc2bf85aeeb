//! Byte frequency counting.

/// Number of distinct byte values.
pub const SYMBOL_COUNT: usize = 256;

/// Occurrence count for every byte value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; SYMBOL_COUNT],
}

impl FrequencyTable {
    /// Count byte occurrences in `data`.
    ///
    /// Uses four interleaved histograms so consecutive equal bytes do not
    /// serialize on the same counter.
    pub fn build(data: &[u8]) -> Self {
        let mut freq0 = [0u64; SYMBOL_COUNT];
        let mut freq1 = [0u64; SYMBOL_COUNT];
        let mut freq2 = [0u64; SYMBOL_COUNT];
        let mut freq3 = [0u64; SYMBOL_COUNT];

        let chunks = data.chunks_exact(4);
        let remainder = chunks.remainder();

        for chunk in chunks {
            freq0[chunk[0] as usize] += 1;
            freq1[chunk[1] as usize] += 1;
            freq2[chunk[2] as usize] += 1;
            freq3[chunk[3] as usize] += 1;
        }
        for &byte in remainder {
            freq0[byte as usize] += 1;
        }

        for i in 0..SYMBOL_COUNT {
            freq0[i] += freq1[i] + freq2[i] + freq3[i];
        }

        Self { counts: freq0 }
    }

    /// Build directly from counts.
    pub fn from_counts(counts: [u64; SYMBOL_COUNT]) -> Self {
        Self { counts }
    }

    /// Occurrences of `symbol`.
    #[inline]
    pub fn count(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// All 256 counts, indexed by byte value.
    pub fn counts(&self) -> &[u64; SYMBOL_COUNT] {
        &self.counts
    }

    /// Number of byte values that occur at least once.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Total number of bytes counted.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Iterate over `(symbol, count)` for byte values that occur.
    pub fn present(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c > 0)
            .map(|(symbol, &c)| (symbol as u8, c))
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self {
            counts: [0; SYMBOL_COUNT],
        }
    }
}
