//! Tree-walking decoder.

use huffpack_core::{Error, Region, Result};

use crate::bitio::BitReader;
use crate::tree::{HuffmanTree, Node};

/// Decode exactly `bit_count` bits of `data` by walking `tree`.
///
/// Each bit selects a child (`0` left, `1` right); reaching a leaf emits its
/// symbol and restarts at the root. Padding after `bit_count` is never read.
///
/// Fails with [`Error::CorruptContainer`] if `data` runs out before
/// `bit_count` bits, or if the last code is cut off by `bit_count`.
pub fn decode(data: &[u8], bit_count: u64, tree: &HuffmanTree) -> Result<Vec<u8>> {
    let root = tree.root();
    if tree.node(root).is_leaf() {
        return Err(Error::corrupted(Region::Tree, "root is a lone leaf"));
    }

    let available = (data.len() as u64 * 8).min(bit_count);
    let mut output = Vec::with_capacity((available / 2) as usize);
    let mut reader = BitReader::new(data);
    let mut node = root;

    while reader.bits_read() < bit_count {
        let bit = reader.read_bit().map_err(|err| match err {
            Error::EndOfStream { bits_read } => Error::corrupted_at(
                Region::Data,
                format!("data ends before the declared {} bits", bit_count),
                bits_read,
            ),
            other => other,
        })?;

        let Node::Internal { left, right, .. } = tree.node(node) else {
            return Err(Error::corrupted(Region::Tree, "walk reached a leaf without emitting"));
        };
        node = if bit { right } else { left };

        if let Node::Leaf { symbol, .. } = tree.node(node) {
            output.push(symbol);
            node = root;
        }
    }

    if node != root {
        return Err(Error::corrupted_at(
            Region::Data,
            "declared bit count ends inside a code",
            bit_count,
        ));
    }

    Ok(output)
}
