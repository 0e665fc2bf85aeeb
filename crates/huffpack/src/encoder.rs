//! Symbol-by-symbol code emission.

use huffpack_core::{Error, Result};

use crate::bitio::BitWriter;
use crate::code::CodeTable;

/// Packed data bitstream.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EncodedData {
    /// MSB-first codes, zero-padded to a byte boundary.
    pub bytes: Vec<u8>,
    /// Meaningful bits in `bytes`.
    pub bit_count: u64,
}

/// Encode `input` by appending each byte's code in order.
///
/// Fails with [`Error::Encoding`] if a byte has no code, which means the
/// table was not built from this input.
pub fn encode(input: &[u8], table: &CodeTable) -> Result<EncodedData> {
    // Huffman output never exceeds one byte per symbol.
    let mut writer = BitWriter::with_capacity(input.len());
    for &byte in input {
        let code = table
            .get(byte)
            .ok_or_else(|| Error::encoding(format!("no code for byte 0x{:02x}", byte)))?;
        writer.write_code(code);
    }
    let bit_count = writer.bits_written();
    Ok(EncodedData {
        bytes: writer.finish(),
        bit_count,
    })
}
