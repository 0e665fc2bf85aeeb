//! # huffpack
//!
//! Lossless byte-stream compression with static Huffman coding.
//!
//! The whole input is frequency-analyzed, a code tree is built from the
//! counts, and the tree is stored in the container next to the packed
//! codes, so decompression needs nothing but the container bytes.
//!
//! ## Pipeline
//!
//! ```text
//! compress:   bytes -> FrequencyTable -> HuffmanTree -> CodeTable -> {tree span, data span} -> container
//! decompress: container -> {tree span -> HuffmanTree, data span} -> tree walk -> bytes
//! ```
//!
//! ## Container
//!
//! ```text
//! [u32 tree_span_bytes][u32 total_data_bits][tree span][data span]
//! ```
//!
//! Both header fields are little-endian. See [`container`] for details.
//!
//! ## Example
//!
//! ```
//! let container = huffpack::compress(b"abracadabra")?;
//! let original = huffpack::decompress(&container)?;
//! assert_eq!(original, b"abracadabra");
//! # Ok::<(), huffpack::Error>(())
//! ```

pub mod bitio;
pub mod code;
pub mod codec;
pub mod compress;
pub mod config;
pub mod container;
pub mod decoder;
pub mod decompress;
pub mod encoder;
pub mod frequency;
pub mod serialize;
pub mod tree;

// Re-export main types
pub use codec::{HuffmanCodec, HuffmanCompressor, HuffmanDecompressor};
pub use config::{HuffmanConfig, LeafPolicy};
pub use container::{ContainerHeader, HEADER_LEN};
pub use huffpack_core::{
    Codec, CompressionRatio, CompressionStats, Compressor, Decompressor, Error, Metrics, Region,
    Result,
};

// Re-export pipeline functions
pub use compress::{compress, compress_with, compress_with_stats, max_compressed_size};
pub use decompress::{decompress, decompress_with_stats, inspect, ContainerInfo};
