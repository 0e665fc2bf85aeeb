//! Container framing.
//!
//! ```text
//! +----------------------+-----------------------+-----------------+-------------+
//! | tree_span_bytes: u32 | total_data_bits: u32  | tree span       | data span   |
//! | little-endian        | little-endian         | tree_span_bytes | remaining   |
//! +----------------------+-----------------------+-----------------+-------------+
//! ```
//!
//! The data span holds `ceil(total_data_bits / 8)` bytes of MSB-first codes,
//! zero-padded to a byte boundary.

use huffpack_core::{Error, Region, Result};

/// Size of the fixed header in bytes.
pub const HEADER_LEN: usize = 8;

/// Fixed container header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContainerHeader {
    /// Length in bytes of the serialized tree span.
    pub tree_span_bytes: u32,
    /// Exact number of meaningful bits in the data span.
    pub total_data_bits: u32,
}

impl ContainerHeader {
    /// Create a header, failing if either length does not fit its field.
    pub fn new(tree_span_bytes: usize, total_data_bits: u64) -> Result<Self> {
        let tree_span_bytes = u32::try_from(tree_span_bytes).map_err(|_| {
            Error::encoding(format!(
                "tree span of {} bytes exceeds the u32 header field",
                tree_span_bytes
            ))
        })?;
        let total_data_bits = u32::try_from(total_data_bits).map_err(|_| {
            Error::encoding(format!(
                "{} data bits exceed the u32 header field",
                total_data_bits
            ))
        })?;
        Ok(Self {
            tree_span_bytes,
            total_data_bits,
        })
    }

    /// Parse the header from the start of `input`.
    pub fn parse(input: &[u8]) -> Result<Self> {
        let Some(header) = input.get(..HEADER_LEN) else {
            return Err(Error::corrupted(
                Region::Header,
                format!(
                    "container is {} bytes, shorter than the {}-byte header",
                    input.len(),
                    HEADER_LEN
                ),
            ));
        };
        Ok(Self {
            tree_span_bytes: u32::from_le_bytes([header[0], header[1], header[2], header[3]]),
            total_data_bits: u32::from_le_bytes([header[4], header[5], header[6], header[7]]),
        })
    }

    /// Append the encoded header to `out`.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.tree_span_bytes.to_le_bytes());
        out.extend_from_slice(&self.total_data_bits.to_le_bytes());
    }

    /// Bytes the data span must occupy.
    pub fn data_span_bytes(&self) -> usize {
        (self.total_data_bits as usize).div_ceil(8)
    }

    /// Parse the header and split `input` into tree and data spans.
    ///
    /// Rejects a tree span that overruns the buffer and a data span longer
    /// than the declared bit count needs. A data span that is too short is
    /// left for the decoder, which reports where the stream ran out.
    pub fn split(input: &[u8]) -> Result<(Self, &[u8], &[u8])> {
        let header = Self::parse(input)?;
        let body = &input[HEADER_LEN..];

        let tree_len = header.tree_span_bytes as usize;
        if tree_len > body.len() {
            return Err(Error::corrupted(
                Region::Header,
                format!(
                    "tree span of {} bytes exceeds the {} bytes after the header",
                    tree_len,
                    body.len()
                ),
            ));
        }
        let (tree, data) = body.split_at(tree_len);

        if data.len() > header.data_span_bytes() {
            return Err(Error::corrupted(
                Region::Data,
                format!(
                    "{} trailing bytes after {} data bits",
                    data.len() - header.data_span_bytes(),
                    header.total_data_bits
                ),
            ));
        }

        Ok((header, tree, data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_layout_is_little_endian() {
        let header = ContainerHeader {
            tree_span_bytes: 0x0102_0304,
            total_data_bits: 9,
        };
        let mut out = Vec::new();
        header.write_to(&mut out);
        assert_eq!(out, vec![0x04, 0x03, 0x02, 0x01, 9, 0, 0, 0]);
        assert_eq!(ContainerHeader::parse(&out).unwrap(), header);
    }

    #[test]
    fn test_data_span_bytes() {
        let header = |bits| ContainerHeader {
            tree_span_bytes: 0,
            total_data_bits: bits,
        };
        assert_eq!(header(0).data_span_bytes(), 0);
        assert_eq!(header(1).data_span_bytes(), 1);
        assert_eq!(header(8).data_span_bytes(), 1);
        assert_eq!(header(9).data_span_bytes(), 2);
    }

    #[test]
    fn test_short_header() {
        let err = ContainerHeader::parse(&[1, 2, 3]).unwrap_err();
        assert_eq!(err.region(), Some(Region::Header));
    }

    #[test]
    fn test_split_spans() {
        let mut input = Vec::new();
        ContainerHeader::new(2, 12).unwrap().write_to(&mut input);
        input.extend_from_slice(&[0xAA, 0xBB, 0xCC, 0xD0]);

        let (header, tree, data) = ContainerHeader::split(&input).unwrap();
        assert_eq!(header.total_data_bits, 12);
        assert_eq!(tree, &[0xAA, 0xBB]);
        assert_eq!(data, &[0xCC, 0xD0]);
    }

    #[test]
    fn test_split_rejects_overlong_tree_span() {
        let mut input = Vec::new();
        ContainerHeader::new(5, 0).unwrap().write_to(&mut input);
        input.extend_from_slice(&[0; 4]);
        let err = ContainerHeader::split(&input).unwrap_err();
        assert_eq!(err.region(), Some(Region::Header));
    }

    #[test]
    fn test_split_rejects_trailing_data() {
        let mut input = Vec::new();
        ContainerHeader::new(0, 8).unwrap().write_to(&mut input);
        input.extend_from_slice(&[0xFF, 0x00]);
        let err = ContainerHeader::split(&input).unwrap_err();
        assert_eq!(err.region(), Some(Region::Data));
    }

    #[test]
    fn test_new_rejects_oversized_bit_count() {
        let err = ContainerHeader::new(0, u64::from(u32::MAX) + 1).unwrap_err();
        assert_eq!(err.category(), "encoding");
    }
}
