//! Decompression pipeline and container inspection.

use std::time::Instant;

use huffpack_core::{CompressionStats, Error, Region, Result};
use serde::Serialize;
use tracing::{debug, warn};

use crate::container::ContainerHeader;
use crate::decoder::decode;
use crate::serialize::deserialize_tree_bytes;
use crate::tree::HuffmanTree;

/// Restore the original bytes from a container.
///
/// Fails with [`Error::CorruptContainer`] if the header is shorter than 8
/// bytes, the tree span overruns the buffer or is malformed, or the data
/// span does not hold exactly the declared number of bits.
pub fn decompress(input: &[u8]) -> Result<Vec<u8>> {
    decompress_with_stats(input).map(|(output, _)| output)
}

/// Restore the original bytes and report what the container held.
pub fn decompress_with_stats(input: &[u8]) -> Result<(Vec<u8>, CompressionStats)> {
    let start = Instant::now();

    let (header, tree, output) = parse_and_decode(input).inspect_err(|err| {
        warn!(
            region = err.region().map(|r| r.name()),
            container_bytes = input.len(),
            "rejected container: {}",
            err
        );
    })?;

    let stats = CompressionStats {
        original_size: output.len(),
        compressed_size: input.len(),
        time_us: start.elapsed().as_micros() as u64,
        tree_bytes: header.tree_span_bytes as usize,
        data_bits: u64::from(header.total_data_bits),
        leaf_count: tree.leaf_count(),
        max_code_len: tree.depth(),
    };
    debug!(
        container_bytes = input.len(),
        data_bits = stats.data_bits,
        output_bytes = output.len(),
        "decompressed"
    );

    Ok((output, stats))
}

fn parse_and_decode(input: &[u8]) -> Result<(ContainerHeader, HuffmanTree, Vec<u8>)> {
    let (header, tree_span, data_span) = ContainerHeader::split(input)?;
    let tree = deserialize_tree_bytes(tree_span)?;
    let output = decode(data_span, u64::from(header.total_data_bits), &tree)?;
    Ok((header, tree, output))
}

/// Summary of a container's framing and code tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainerInfo {
    /// Total container size in bytes.
    pub container_bytes: usize,
    /// Serialized tree span length.
    pub tree_span_bytes: u32,
    /// Declared meaningful bits in the data span.
    pub total_data_bits: u32,
    /// Actual data span length.
    pub data_span_bytes: usize,
    /// Leaves in the code tree.
    pub leaf_count: usize,
    /// Longest code length.
    pub tree_depth: usize,
    /// Leaf symbols paired with their code length, left to right.
    pub code_lengths: Vec<(u8, usize)>,
}

/// Parse a container's header and tree without decoding its data.
pub fn inspect(input: &[u8]) -> Result<ContainerInfo> {
    let (header, tree_span, data_span) = ContainerHeader::split(input)?;
    let tree = deserialize_tree_bytes(tree_span)?;
    if data_span.len() < header.data_span_bytes() {
        return Err(Error::corrupted(
            Region::Data,
            format!(
                "data span is {} bytes, {} bits need {}",
                data_span.len(),
                header.total_data_bits,
                header.data_span_bytes()
            ),
        ));
    }

    Ok(ContainerInfo {
        container_bytes: input.len(),
        tree_span_bytes: header.tree_span_bytes,
        total_data_bits: header.total_data_bits,
        data_span_bytes: data_span.len(),
        leaf_count: tree.leaf_count(),
        tree_depth: tree.depth(),
        code_lengths: tree.leaves(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compress::{compress, compress_with};
    use crate::config::{HuffmanConfig, LeafPolicy};

    #[test]
    fn test_roundtrip_simple() {
        for input in [&b"test"[..], b"hello", b"", b"a", b"aaaa"] {
            let container = compress(input).unwrap();
            assert_eq!(decompress(&container).unwrap(), input);
        }
    }

    #[test]
    fn test_short_header_rejected() {
        let err = decompress(&[0; 7]).unwrap_err();
        assert_eq!(err.region(), Some(Region::Header));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_truncated_data_rejected() {
        let mut container = compress(b"hello, huffman").unwrap();
        container.pop();
        let err = decompress(&container).unwrap_err();
        assert_eq!(err.region(), Some(Region::Data));
    }

    #[test]
    fn test_stats_mirror_compression() {
        let input = b"mississippi";
        let container = compress(input).unwrap();
        let (output, stats) = decompress_with_stats(&container).unwrap();
        assert_eq!(output, input);
        assert_eq!(stats.original_size, input.len());
        assert_eq!(stats.compressed_size, container.len());
        assert_eq!(stats.leaf_count, 256);
    }

    #[test]
    fn test_inspect_banana() {
        let config = HuffmanConfig::new().with_leaf_policy(LeafPolicy::ObservedOnly);
        let container = compress_with(b"banana", &config).unwrap();
        let info = inspect(&container).unwrap();
        assert_eq!(info.tree_span_bytes, 4);
        assert_eq!(info.total_data_bits, 9);
        assert_eq!(info.data_span_bytes, 2);
        assert_eq!(info.leaf_count, 3);
        assert_eq!(info.tree_depth, 2);
        assert_eq!(info.code_lengths, vec![(b'a', 1), (b'b', 2), (b'n', 2)]);
    }

    #[test]
    fn test_inspect_rejects_short_data() {
        let mut container = compress(b"banana").unwrap();
        container.pop();
        assert!(inspect(&container).is_err());
    }
}
