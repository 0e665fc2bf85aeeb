//! Compression pipeline.

use std::time::Instant;

use huffpack_core::{CompressionStats, Result};
use tracing::{debug, trace};

use crate::code::CodeTable;
use crate::config::HuffmanConfig;
use crate::container::{ContainerHeader, HEADER_LEN};
use crate::encoder::encode;
use crate::frequency::FrequencyTable;
use crate::serialize::{serialize_tree_bytes, MAX_TREE_SPAN_BYTES};
use crate::tree::HuffmanTree;

/// Compress `input` with the default configuration.
///
/// Any input, including an empty one, yields a valid container.
pub fn compress(input: &[u8]) -> Result<Vec<u8>> {
    compress_with(input, &HuffmanConfig::default())
}

/// Compress `input` with `config`.
pub fn compress_with(input: &[u8], config: &HuffmanConfig) -> Result<Vec<u8>> {
    compress_with_stats(input, config).map(|(container, _)| container)
}

/// Compress `input` and report what the container holds.
pub fn compress_with_stats(
    input: &[u8],
    config: &HuffmanConfig,
) -> Result<(Vec<u8>, CompressionStats)> {
    let start = Instant::now();

    let frequencies = FrequencyTable::build(input);
    let tree = HuffmanTree::build(&frequencies, config.leaf_policy);
    let codes = CodeTable::for_frequencies(&tree, &frequencies)?;
    trace!(
        distinct = frequencies.distinct(),
        leaves = tree.leaf_count(),
        max_code_len = codes.max_len(),
        "derived code table"
    );

    let tree_span = serialize_tree_bytes(&tree);
    let encoded = encode(input, &codes)?;
    let header = ContainerHeader::new(tree_span.len(), encoded.bit_count)?;

    let mut container = Vec::with_capacity(HEADER_LEN + tree_span.len() + encoded.bytes.len());
    header.write_to(&mut container);
    container.extend_from_slice(&tree_span);
    container.extend_from_slice(&encoded.bytes);

    let stats = CompressionStats {
        original_size: input.len(),
        compressed_size: container.len(),
        time_us: start.elapsed().as_micros() as u64,
        tree_bytes: tree_span.len(),
        data_bits: encoded.bit_count,
        leaf_count: tree.leaf_count(),
        max_code_len: codes.max_len(),
    };
    debug!(
        input_bytes = input.len(),
        policy = %config.leaf_policy,
        tree_bytes = stats.tree_bytes,
        data_bits = stats.data_bits,
        output_bytes = container.len(),
        "compressed"
    );

    Ok((container, stats))
}

/// Upper bound on the container size for an input of `input_len` bytes.
///
/// A Huffman code never spends more bits on an input than a fixed 8-bit
/// code would, so the data span is at most `input_len` bytes.
pub fn max_compressed_size(input_len: usize) -> usize {
    HEADER_LEN + MAX_TREE_SPAN_BYTES + input_len
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LeafPolicy;

    #[test]
    fn test_empty_input_container() {
        let container = compress(&[]).unwrap();
        let header = ContainerHeader::parse(&container).unwrap();
        assert_eq!(header.total_data_bits, 0);
        assert_eq!(header.tree_span_bytes as usize, MAX_TREE_SPAN_BYTES);
        assert_eq!(container.len(), HEADER_LEN + MAX_TREE_SPAN_BYTES);
    }

    #[test]
    fn test_banana_container_bytes() {
        let config = HuffmanConfig::new().with_leaf_policy(LeafPolicy::ObservedOnly);
        let container = compress_with(b"banana", &config).unwrap();
        let mut expected = vec![4, 0, 0, 0, 9, 0, 0, 0];
        // 0 1 01100001 0 1 01100010 1 01101110 (29 bits, 3 pad)
        expected.extend_from_slice(&[0b0101_1000, 0b0101_0110, 0b0010_1011, 0b0111_0000]);
        expected.extend_from_slice(&[0b1001_1011, 0b0000_0000]);
        assert_eq!(container, expected);
    }

    #[test]
    fn test_stats_describe_container() {
        let data = b"abracadabra";
        let (container, stats) = compress_with_stats(data, &HuffmanConfig::default()).unwrap();
        assert_eq!(stats.original_size, data.len());
        assert_eq!(stats.compressed_size, container.len());
        assert_eq!(stats.tree_bytes, MAX_TREE_SPAN_BYTES);
        assert_eq!(stats.leaf_count, 256);

        let header = ContainerHeader::parse(&container).unwrap();
        assert_eq!(u64::from(header.total_data_bits), stats.data_bits);
    }

    #[test]
    fn test_max_compressed_size_bounds_output() {
        let data: Vec<u8> = (0..4096u32).map(|i| (i.wrapping_mul(2_654_435_761) >> 24) as u8).collect();
        let container = compress(&data).unwrap();
        assert!(container.len() <= max_compressed_size(data.len()));
    }
}
