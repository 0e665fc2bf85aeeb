//! Codec implementations over the core traits.

use std::sync::{Mutex, PoisonError};

use huffpack_core::{Codec, CompressionStats, Compressor, Decompressor, Result};

use crate::compress::{compress_with_stats, max_compressed_size};
use crate::config::HuffmanConfig;
use crate::decompress::decompress_with_stats;

/// Slot holding the stats of the most recent call.
#[derive(Debug, Default)]
struct LastStats(Mutex<Option<CompressionStats>>);

impl LastStats {
    fn record(&self, stats: CompressionStats) {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner) = Some(stats);
    }

    fn get(&self) -> Option<CompressionStats> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

// ============================================================================
// Compressor
// ============================================================================

/// Huffman compressor.
#[derive(Debug, Default)]
pub struct HuffmanCompressor {
    config: HuffmanConfig,
    last: LastStats,
}

impl HuffmanCompressor {
    /// Create a new compressor with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with configuration.
    pub fn with_config(config: HuffmanConfig) -> Self {
        Self {
            config,
            last: LastStats::default(),
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &HuffmanConfig {
        &self.config
    }
}

impl Compressor for HuffmanCompressor {
    fn compress(&self, input: &[u8]) -> Result<Vec<u8>> {
        let (container, stats) = compress_with_stats(input, &self.config)?;
        self.last.record(stats);
        Ok(container)
    }

    fn max_compressed_size(&self, input_len: usize) -> usize {
        max_compressed_size(input_len)
    }

    fn stats(&self) -> Option<CompressionStats> {
        self.last.get()
    }
}

// ============================================================================
// Decompressor
// ============================================================================

/// Huffman decompressor.
///
/// Needs no configuration: the code tree travels inside the container.
#[derive(Debug, Default)]
pub struct HuffmanDecompressor {
    last: LastStats,
}

impl HuffmanDecompressor {
    /// Create a new decompressor.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Decompressor for HuffmanDecompressor {
    fn decompress(&self, input: &[u8]) -> Result<Vec<u8>> {
        let (output, stats) = decompress_with_stats(input)?;
        self.last.record(stats);
        Ok(output)
    }

    fn stats(&self) -> Option<CompressionStats> {
        self.last.get()
    }
}

// ============================================================================
// Codec
// ============================================================================

/// Huffman codec combining both directions.
#[derive(Debug, Default)]
pub struct HuffmanCodec {
    compressor: HuffmanCompressor,
    decompressor: HuffmanDecompressor,
}

impl HuffmanCodec {
    /// Create with configuration.
    pub fn with_config(config: HuffmanConfig) -> Self {
        Self {
            compressor: HuffmanCompressor::with_config(config),
            decompressor: HuffmanDecompressor::new(),
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &HuffmanConfig {
        self.compressor.config()
    }
}

impl Compressor for HuffmanCodec {
    fn compress(&self, input: &[u8]) -> Result<Vec<u8>> {
        self.compressor.compress(input)
    }

    fn max_compressed_size(&self, input_len: usize) -> usize {
        self.compressor.max_compressed_size(input_len)
    }

    fn stats(&self) -> Option<CompressionStats> {
        Compressor::stats(&self.compressor)
    }
}

impl Decompressor for HuffmanCodec {
    fn decompress(&self, input: &[u8]) -> Result<Vec<u8>> {
        self.decompressor.decompress(input)
    }

    fn stats(&self) -> Option<CompressionStats> {
        Decompressor::stats(&self.decompressor)
    }
}

impl Codec for HuffmanCodec {
    fn new() -> Self {
        Self::default()
    }
}
