//! Per-symbol code table derived from a tree's root-to-leaf paths.

use std::fmt;

use huffpack_core::{Error, Result};

use crate::frequency::{FrequencyTable, SYMBOL_COUNT};
use crate::tree::{HuffmanTree, Node};

/// Longest code the encoder can emit in one write.
pub const MAX_CODE_LEN: usize = 64;

/// A variable-length code, stored right-aligned: the most significant of
/// the `len` low bits is emitted first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Code {
    bits: u64,
    len: u8,
}

impl Code {
    /// The empty code.
    pub const EMPTY: Code = Code { bits: 0, len: 0 };

    /// Create a code from its low `len` bits.
    pub fn new(bits: u64, len: u8) -> Option<Self> {
        if len as usize > MAX_CODE_LEN {
            return None;
        }
        let mask = if len == 64 { u64::MAX } else { (1u64 << len) - 1 };
        Some(Self {
            bits: bits & mask,
            len,
        })
    }

    /// Append one bit, or `None` if the code would exceed 64 bits.
    #[inline]
    pub fn push(self, bit: bool) -> Option<Self> {
        if self.len as usize >= MAX_CODE_LEN {
            return None;
        }
        Some(Self {
            bits: (self.bits << 1) | u64::from(bit),
            len: self.len + 1,
        })
    }

    /// Code bits, right-aligned.
    pub fn bits(&self) -> u64 {
        self.bits
    }

    /// Code length in bits.
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Check if the code has no bits.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bit at `index`, counted from the first emitted bit.
    pub fn bit(&self, index: usize) -> bool {
        debug_assert!(index < self.len());
        (self.bits >> (self.len() - 1 - index)) & 1 == 1
    }

    /// Check if `self` is a prefix of `other` (a code is a prefix of itself).
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        if self.len > other.len {
            return false;
        }
        let shift = other.len - self.len;
        if shift as usize >= MAX_CODE_LEN {
            return self.is_empty();
        }
        other.bits >> shift == self.bits
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.len() {
            f.write_str(if self.bit(i) { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Mapping from byte value to its code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: [Option<Code>; SYMBOL_COUNT],
}

impl CodeTable {
    /// Derive codes from `tree` by depth-first traversal.
    ///
    /// Left descents append `0`, right descents append `1`. Every leaf
    /// receives a code, including zero-frequency leaves; codes are
    /// prefix-free because only leaves get one. The compressor uses
    /// [`CodeTable::for_frequencies`] instead.
    ///
    /// Fails with [`Error::Encoding`] if a path is longer than
    /// [`MAX_CODE_LEN`] bits.
    pub fn generate(tree: &HuffmanTree) -> Result<Self> {
        let mut codes = [None; SYMBOL_COUNT];
        let mut stack = vec![(tree.root(), Code::EMPTY)];

        while let Some((id, code)) = stack.pop() {
            match tree.node(id) {
                Node::Leaf { symbol, .. } => codes[symbol as usize] = Some(code),
                Node::Internal { left, right, .. } => {
                    let (Some(left_code), Some(right_code)) = (code.push(false), code.push(true))
                    else {
                        return Err(Error::encoding(format!(
                            "code tree deeper than {} bits",
                            MAX_CODE_LEN
                        )));
                    };
                    stack.push((right, right_code));
                    stack.push((left, left_code));
                }
            }
        }

        Ok(Self { codes })
    }

    /// Derive codes for the symbols that occur in `frequencies`.
    ///
    /// Zero-frequency leaves keep their place in the tree but get no entry,
    /// since the encoder never sees those bytes.
    pub fn for_frequencies(tree: &HuffmanTree, frequencies: &FrequencyTable) -> Result<Self> {
        let mut table = Self::generate(tree)?;
        for (symbol, code) in table.codes.iter_mut().enumerate() {
            if frequencies.count(symbol as u8) == 0 {
                *code = None;
            }
        }
        Ok(table)
    }

    /// Code for `symbol`, if its leaf exists.
    #[inline]
    pub fn get(&self, symbol: u8) -> Option<Code> {
        self.codes[symbol as usize]
    }

    /// Iterate over `(symbol, code)` for every symbol with a code.
    pub fn iter(&self) -> impl Iterator<Item = (u8, Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.map(|c| (symbol as u8, c)))
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.codes.iter().flatten().count()
    }

    /// Check if no symbol has a code.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Longest code length.
    pub fn max_len(&self) -> usize {
        self.iter().map(|(_, c)| c.len()).max().unwrap_or(0)
    }

    /// Exact number of bits needed to encode input with these frequencies,
    /// or `None` if a present symbol has no code.
    pub fn encoded_bits(&self, frequencies: &FrequencyTable) -> Option<u64> {
        frequencies.present().try_fold(0u64, |total, (symbol, count)| {
            self.get(symbol)
                .map(|code| total + count * code.len() as u64)
        })
    }

    /// Check that no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<Code> = self.iter().map(|(_, c)| c).collect();
        codes.iter().enumerate().all(|(i, a)| {
            codes
                .iter()
                .enumerate()
                .all(|(j, b)| i == j || !a.is_prefix_of(b))
        })
    }
}
