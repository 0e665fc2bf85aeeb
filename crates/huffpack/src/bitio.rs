//! MSB-first bit writer and bit reader.
//!
//! Bits are packed from the most significant bit of each byte down to the
//! least significant one. The writer pads a trailing partial byte with zero
//! bits; the number of meaningful bits is tracked separately so a reader can
//! tell real `0` bits from padding.

use huffpack_core::{Error, Result};

use crate::code::Code;

/// Bit writer over a growable byte buffer.
#[derive(Debug, Clone, Default)]
pub struct BitWriter {
    data: Vec<u8>,
    /// Partial byte, filled from bit 7 downwards.
    bit_buf: u8,
    /// Number of bits held in `bit_buf` (0..8).
    bit_count: u8,
    /// Meaningful bits written so far, padding excluded.
    bits_written: u64,
}

impl BitWriter {
    /// Create a new bit writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with capacity in bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Write a single bit.
    #[inline]
    pub fn write_bit(&mut self, bit: bool) {
        if bit {
            self.bit_buf |= 0x80 >> self.bit_count;
        }
        self.bit_count += 1;
        self.bits_written += 1;
        if self.bit_count == 8 {
            self.push_partial();
        }
    }

    /// Write the low `n` bits of `value`, most significant first.
    ///
    /// `n` must be at most 64; bits of `value` above `n` are ignored.
    #[inline]
    pub fn write_bits(&mut self, value: u64, n: u8) {
        debug_assert!(n <= 64, "cannot write {} bits at once", n);
        let mut remaining = n;
        while remaining > 0 {
            let free = 8 - self.bit_count;
            let take = remaining.min(free);
            let shift = remaining - take;
            let chunk = ((value >> shift) & ((1u64 << take) - 1)) as u8;
            self.bit_buf |= chunk << (free - take);
            self.bit_count += take;
            remaining -= take;
            if self.bit_count == 8 {
                self.push_partial();
            }
        }
        self.bits_written += n as u64;
    }

    /// Write a Huffman code.
    #[inline]
    pub fn write_code(&mut self, code: Code) {
        self.write_bits(code.bits(), code.len() as u8);
    }

    /// Pad any partial trailing byte with zero bits and append it.
    pub fn flush(&mut self) {
        if self.bit_count > 0 {
            self.push_partial();
        }
    }

    /// Flush and return the packed bytes.
    pub fn finish(mut self) -> Vec<u8> {
        self.flush();
        self.data
    }

    /// Total meaningful bits written, padding excluded.
    pub fn bits_written(&self) -> u64 {
        self.bits_written
    }

    /// Length in bytes once flushed.
    pub fn len(&self) -> usize {
        self.data.len() + usize::from(self.bit_count > 0)
    }

    /// Check if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.bits_written == 0
    }

    fn push_partial(&mut self) {
        self.data.push(self.bit_buf);
        self.bit_buf = 0;
        self.bit_count = 0;
    }
}

/// One-directional bit reader over a byte slice.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    /// Index of the byte holding the next bit.
    pos: usize,
    /// Bit offset within `data[pos]`, counted from the MSB.
    bit_pos: u8,
    bits_read: u64,
}

impl<'a> BitReader<'a> {
    /// Create a new bit reader.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            bit_pos: 0,
            bits_read: 0,
        }
    }

    /// Read one bit.
    ///
    /// Returns [`Error::EndOfStream`] once every buffered byte is consumed.
    #[inline]
    pub fn read_bit(&mut self) -> Result<bool> {
        let Some(&byte) = self.data.get(self.pos) else {
            return Err(Error::end_of_stream(self.bits_read));
        };
        let bit = (byte >> (7 - self.bit_pos)) & 1 == 1;
        self.bit_pos += 1;
        if self.bit_pos == 8 {
            self.bit_pos = 0;
            self.pos += 1;
        }
        self.bits_read += 1;
        Ok(bit)
    }

    /// Read `n` bits (at most 64) as an unsigned integer, MSB first.
    pub fn read_bits(&mut self, n: u8) -> Result<u64> {
        debug_assert!(n <= 64, "cannot read {} bits at once", n);
        let mut value = 0u64;
        for _ in 0..n {
            value = (value << 1) | u64::from(self.read_bit()?);
        }
        Ok(value)
    }

    /// Read eight bits as a byte.
    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_bits(8)? as u8)
    }

    /// Bits consumed so far.
    pub fn bits_read(&self) -> u64 {
        self.bits_read
    }

    /// Bits left in the buffer, padding included.
    pub fn bits_remaining(&self) -> u64 {
        (self.data.len() as u64 * 8).saturating_sub(self.bits_read)
    }

    /// Check if at end of input.
    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Check that every unread bit is zero.
    pub fn rest_is_zero(&self) -> bool {
        let Some(&current) = self.data.get(self.pos) else {
            return true;
        };
        let mask = 0xFFu8 >> self.bit_pos;
        current & mask == 0 && self.data[self.pos + 1..].iter().all(|&b| b == 0)
    }
}
