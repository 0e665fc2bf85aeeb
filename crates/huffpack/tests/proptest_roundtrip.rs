//! Property-based tests for the Huffman container.
//!
//! These tests verify that codec properties hold across arbitrary inputs:
//! - Compress/decompress is the identity on any byte buffer
//! - Generated code tables are prefix-free
//! - Tree serialization preserves shape and leaf symbols
//! - Header bit count equals the sum of code lengths
//! - Truncated containers are rejected, never silently decoded
//!
//! Run with: cargo test -p huffpack --test proptest_roundtrip

use proptest::prelude::*;

use huffpack::code::CodeTable;
use huffpack::frequency::FrequencyTable;
use huffpack::serialize::{deserialize_tree_bytes, serialize_tree_bytes};
use huffpack::tree::HuffmanTree;
use huffpack::{compress_with, decompress, ContainerHeader, HuffmanConfig, LeafPolicy};

/// Strategy for leaf policies.
fn policy_strategy() -> impl Strategy<Value = LeafPolicy> {
    prop_oneof![Just(LeafPolicy::AllSymbols), Just(LeafPolicy::ObservedOnly)]
}

/// Strategy for buffers: arbitrary bytes, or a small alphabet to get skewed
/// frequencies and deeper trees.
fn buffer_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        prop::collection::vec(any::<u8>(), 0..2048),
        prop::collection::vec(prop::sample::select(vec![b'a', b'b', b'c', 0u8, 0xFF]), 0..512),
        (any::<u8>(), 1usize..300).prop_map(|(byte, n)| vec![byte; n]),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        max_shrink_iters: 200,
        ..ProptestConfig::default()
    })]

    /// Property: decompress(compress(b)) == b.
    #[test]
    fn prop_roundtrip_identity(data in buffer_strategy(), policy in policy_strategy()) {
        let config = HuffmanConfig::new().with_leaf_policy(policy);
        let container = compress_with(&data, &config).unwrap();
        let restored = decompress(&container).unwrap();
        prop_assert_eq!(restored, data);
    }

    /// Property: no code is a prefix of another.
    #[test]
    fn prop_codes_are_prefix_free(data in buffer_strategy(), policy in policy_strategy()) {
        let tree = HuffmanTree::build(&FrequencyTable::build(&data), policy);
        let codes = CodeTable::generate(&tree).unwrap();
        prop_assert!(codes.is_prefix_free());
        prop_assert!(codes.iter().all(|(_, code)| !code.is_empty()));
    }

    /// Property: deserialize(serialize(tree)) has the same shape and leaves.
    #[test]
    fn prop_tree_serialization_roundtrip(data in buffer_strategy(), policy in policy_strategy()) {
        let tree = HuffmanTree::build(&FrequencyTable::build(&data), policy);
        let restored = deserialize_tree_bytes(&serialize_tree_bytes(&tree)).unwrap();
        prop_assert!(tree.same_shape(&restored));
        prop_assert_eq!(tree.leaves(), restored.leaves());
        prop_assert_eq!(
            CodeTable::generate(&tree).unwrap(),
            CodeTable::generate(&restored).unwrap()
        );
    }

    /// Property: the header's bit count is the exact sum of code lengths.
    #[test]
    fn prop_bit_count_exact(data in buffer_strategy(), policy in policy_strategy()) {
        let frequencies = FrequencyTable::build(&data);
        let tree = HuffmanTree::build(&frequencies, policy);
        let codes = CodeTable::generate(&tree).unwrap();

        let config = HuffmanConfig::new().with_leaf_policy(policy);
        let container = compress_with(&data, &config).unwrap();
        let header = ContainerHeader::parse(&container).unwrap();
        prop_assert_eq!(Some(u64::from(header.total_data_bits)), codes.encoded_bits(&frequencies));
    }

    /// Property: dropping the last byte of a non-empty data span is rejected.
    #[test]
    fn prop_truncation_rejected(data in prop::collection::vec(any::<u8>(), 1..1024)) {
        let mut container = compress_with(&data, &HuffmanConfig::default()).unwrap();
        container.pop();
        let err = decompress(&container).unwrap_err();
        prop_assert!(err.is_recoverable());
    }

    /// Property: arbitrary bytes never panic the decompressor.
    #[test]
    fn prop_garbage_never_panics(garbage in prop::collection::vec(any::<u8>(), 0..512)) {
        let _ = decompress(&garbage);
    }
}
