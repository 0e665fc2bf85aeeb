//! Self-delimiting preorder tree encoding.
//!
//! ```text
//! internal node:  0  <left subtree> <right subtree>
//! leaf:           1  <8-bit symbol>
//! ```
//!
//! The encoding needs no node count: the reader knows the tree is complete
//! when every internal node has received both children. Within a container
//! the encoding is padded to a whole byte and stored in its own span.

use huffpack_core::{Error, Region, Result};

use crate::bitio::{BitReader, BitWriter};
use crate::frequency::SYMBOL_COUNT;
use crate::tree::{HuffmanTree, Node, NodeId, MAX_NODES};

/// Deepest tree a strict binary tree with 256 leaves can have.
pub const MAX_TREE_DEPTH: usize = SYMBOL_COUNT - 1;

/// Largest serialized tree span: 256 leaves of 9 bits plus 255 internal
/// nodes of 1 bit, rounded up to whole bytes.
pub const MAX_TREE_SPAN_BYTES: usize = (SYMBOL_COUNT * 9 + (SYMBOL_COUNT - 1)).div_ceil(8);

/// Number of bits the preorder encoding of `tree` occupies.
pub fn serialized_bits(tree: &HuffmanTree) -> u64 {
    tree.nodes()
        .iter()
        .map(|node| if node.is_leaf() { 9 } else { 1 })
        .sum()
}

/// Write the preorder encoding of `tree`.
pub fn serialize_tree(tree: &HuffmanTree, writer: &mut BitWriter) {
    let mut stack = vec![tree.root()];
    while let Some(id) = stack.pop() {
        match tree.node(id) {
            Node::Leaf { symbol, .. } => {
                writer.write_bit(true);
                writer.write_bits(symbol as u64, 8);
            }
            Node::Internal { left, right, .. } => {
                writer.write_bit(false);
                stack.push(right);
                stack.push(left);
            }
        }
    }
}

/// Serialize `tree` into a zero-padded byte span.
pub fn serialize_tree_bytes(tree: &HuffmanTree) -> Vec<u8> {
    let bits = serialized_bits(tree);
    let mut writer = BitWriter::with_capacity(bits.div_ceil(8) as usize);
    serialize_tree(tree, &mut writer);
    writer.finish()
}

/// Pending internal node while reading.
enum Frame {
    /// Waiting for the left subtree.
    Left,
    /// Left subtree done, waiting for the right one.
    Right(NodeId),
}

/// Read one preorder-encoded tree from `reader`.
///
/// Iterative, so hostile input cannot exhaust the call stack. Rejects
/// trees with a leaf at the root, duplicate leaf symbols, or depth beyond
/// [`MAX_TREE_DEPTH`].
pub fn deserialize_tree(reader: &mut BitReader<'_>) -> Result<HuffmanTree> {
    let mut nodes: Vec<Node> = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();
    let mut seen = [false; SYMBOL_COUNT];

    loop {
        let is_leaf = reader.read_bit().map_err(truncated)?;

        if !is_leaf {
            if stack.len() >= MAX_TREE_DEPTH {
                return Err(Error::corrupted_at(
                    Region::Tree,
                    format!("tree deeper than {} levels", MAX_TREE_DEPTH),
                    reader.bits_read(),
                ));
            }
            stack.push(Frame::Left);
            continue;
        }

        let symbol = reader.read_u8().map_err(truncated)?;
        if stack.is_empty() {
            return Err(Error::corrupted(
                Region::Tree,
                format!("root is a lone leaf (symbol 0x{:02x})", symbol),
            ));
        }
        if std::mem::replace(&mut seen[symbol as usize], true) {
            return Err(Error::corrupted_at(
                Region::Tree,
                format!("duplicate leaf for symbol 0x{:02x}", symbol),
                reader.bits_read(),
            ));
        }
        nodes.push(Node::Leaf {
            symbol,
            frequency: 0,
        });
        let mut completed = nodes.len() - 1;

        // Attach the finished subtree to its parent, closing every parent
        // that now has both children.
        loop {
            match stack.pop() {
                None => {
                    debug_assert!(nodes.len() <= MAX_NODES);
                    return Ok(HuffmanTree::from_parts(nodes, completed));
                }
                Some(Frame::Left) => {
                    stack.push(Frame::Right(completed));
                    break;
                }
                Some(Frame::Right(left)) => {
                    nodes.push(Node::Internal {
                        left,
                        right: completed,
                        frequency: 0,
                    });
                    completed = nodes.len() - 1;
                }
            }
        }
    }
}

/// Read a tree from a whole container span.
///
/// After the self-terminating encoding, only padding up to the next byte
/// boundary may remain. Padding bits are ignored.
pub fn deserialize_tree_bytes(span: &[u8]) -> Result<HuffmanTree> {
    let mut reader = BitReader::new(span);
    let tree = deserialize_tree(&mut reader)?;

    let leftover = reader.bits_remaining();
    if leftover >= 8 {
        return Err(Error::corrupted(
            Region::Tree,
            format!("{} unused bytes after the tree", leftover / 8),
        ));
    }
    Ok(tree)
}

fn truncated(err: Error) -> Error {
    match err {
        Error::EndOfStream { bits_read } => {
            Error::corrupted_at(Region::Tree, "tree span ends mid-tree", bits_read)
        }
        other => other,
    }
}
