//! Huffman code tree.
//!
//! Nodes live in an arena and refer to their children by index. A tree is
//! strict: every internal node has exactly two children and the root is
//! always internal, so every leaf has a code of at least one bit.
//!
//! ## Branch convention
//!
//! Descending to the left child emits a `0` bit, descending to the right
//! child emits a `1` bit. The code table, the serializer and the decoder all
//! follow this convention.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::trace;

use crate::config::LeafPolicy;
use crate::frequency::{FrequencyTable, SYMBOL_COUNT};

/// Index of a node in a [`HuffmanTree`] arena.
pub type NodeId = usize;

/// Maximum node count: 256 leaves plus 255 internal nodes.
pub const MAX_NODES: usize = 2 * SYMBOL_COUNT - 1;

/// A node of the code tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    /// A single byte value.
    Leaf { symbol: u8, frequency: u64 },
    /// A merge point owning exactly two children.
    Internal {
        left: NodeId,
        right: NodeId,
        frequency: u64,
    },
}

impl Node {
    /// Occurrence count (leaf) or sum of children's counts (internal).
    ///
    /// Trees rebuilt from a container carry no counts and report zero.
    pub fn frequency(&self) -> u64 {
        match *self {
            Node::Leaf { frequency, .. } | Node::Internal { frequency, .. } => frequency,
        }
    }

    /// Check if the node is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }
}

/// Min-heap entry: lowest frequency first, then lowest node id.
///
/// Node ids grow in insertion order, so ties resolve deterministically.
#[derive(Debug, PartialEq, Eq)]
struct HeapEntry {
    frequency: u64,
    node: NodeId,
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .frequency
            .cmp(&self.frequency)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Arena-backed Huffman tree. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl HuffmanTree {
    /// Build a tree from byte frequencies.
    ///
    /// Repeatedly merges the two lowest-frequency nodes; the first one
    /// popped becomes the left child. Runs in O(k log k) for k leaves.
    pub fn build(frequencies: &FrequencyTable, policy: LeafPolicy) -> Self {
        let mut nodes: Vec<Node> = Vec::with_capacity(MAX_NODES);

        for symbol in 0..=u8::MAX {
            let frequency = frequencies.count(symbol);
            if policy == LeafPolicy::AllSymbols || frequency > 0 {
                nodes.push(Node::Leaf { symbol, frequency });
            }
        }

        // A lone leaf would have an empty code. Pair it with unused symbols.
        let mut filler = 0u8..=u8::MAX;
        while nodes.len() < 2 {
            let Some(symbol) = filler.find(|&s| frequencies.count(s) == 0) else {
                break;
            };
            nodes.push(Node::Leaf {
                symbol,
                frequency: 0,
            });
        }
        nodes.sort_unstable_by_key(|node| match *node {
            Node::Leaf { symbol, .. } => symbol,
            Node::Internal { .. } => u8::MAX,
        });

        let mut heap: BinaryHeap<HeapEntry> = nodes
            .iter()
            .enumerate()
            .map(|(node, n)| HeapEntry {
                frequency: n.frequency(),
                node,
            })
            .collect();

        while heap.len() > 1 {
            if let (Some(left), Some(right)) = (heap.pop(), heap.pop()) {
                let frequency = left.frequency + right.frequency;
                let node = nodes.len();
                nodes.push(Node::Internal {
                    left: left.node,
                    right: right.node,
                    frequency,
                });
                heap.push(HeapEntry { frequency, node });
            }
        }

        // The final merge is the last node pushed.
        let root = nodes.len() - 1;
        let tree = Self { nodes, root };
        trace!(
            nodes = tree.len(),
            leaves = tree.leaf_count(),
            depth = tree.depth(),
            "built huffman tree"
        );
        tree
    }

    /// Assemble a tree from an arena. Callers guarantee strictness.
    pub(crate) fn from_parts(nodes: Vec<Node>, root: NodeId) -> Self {
        Self { nodes, root }
    }

    /// Root node id.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Node by id.
    #[inline]
    pub fn node(&self, id: NodeId) -> Node {
        self.nodes[id]
    }

    /// All nodes in arena order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Total node count.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the arena is empty. Never true for a built tree.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Frequency stored at the root (the input length for built trees).
    pub fn total_frequency(&self) -> u64 {
        self.nodes[self.root].frequency()
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(self.root, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            match self.nodes[id] {
                Node::Leaf { .. } => max_depth = max_depth.max(depth),
                Node::Internal { left, right, .. } => {
                    stack.push((left, depth + 1));
                    stack.push((right, depth + 1));
                }
            }
        }
        max_depth
    }

    /// Leaf symbols in left-to-right order, paired with their depth.
    pub fn leaves(&self) -> Vec<(u8, usize)> {
        let mut leaves = Vec::new();
        let mut stack = vec![(self.root, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            match self.nodes[id] {
                Node::Leaf { symbol, .. } => leaves.push((symbol, depth)),
                Node::Internal { left, right, .. } => {
                    stack.push((right, depth + 1));
                    stack.push((left, depth + 1));
                }
            }
        }
        leaves
    }

    /// Check structural identity: same shape and same leaf symbols,
    /// ignoring frequencies and arena layout.
    pub fn same_shape(&self, other: &HuffmanTree) -> bool {
        let mut stack = vec![(self.root, other.root)];
        while let Some((a, b)) = stack.pop() {
            match (self.nodes[a], other.nodes[b]) {
                (Node::Leaf { symbol: x, .. }, Node::Leaf { symbol: y, .. }) => {
                    if x != y {
                        return false;
                    }
                }
                (
                    Node::Internal {
                        left: la,
                        right: ra,
                        ..
                    },
                    Node::Internal {
                        left: lb,
                        right: rb,
                        ..
                    },
                ) => {
                    stack.push((la, lb));
                    stack.push((ra, rb));
                }
                _ => return false,
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observed(data: &[u8]) -> HuffmanTree {
        HuffmanTree::build(&FrequencyTable::build(data), LeafPolicy::ObservedOnly)
    }

    #[test]
    fn test_heap_entry_is_min_ordered() {
        let mut heap = BinaryHeap::new();
        heap.push(HeapEntry { frequency: 5, node: 0 });
        heap.push(HeapEntry { frequency: 1, node: 2 });
        heap.push(HeapEntry { frequency: 1, node: 1 });
        heap.push(HeapEntry { frequency: 3, node: 3 });

        let order: Vec<NodeId> = std::iter::from_fn(|| heap.pop().map(|e| e.node)).collect();
        assert_eq!(order, vec![1, 2, 3, 0]);
    }

    #[test]
    fn test_all_symbols_has_256_leaves() {
        let tree = HuffmanTree::build(&FrequencyTable::build(b"banana"), LeafPolicy::AllSymbols);
        assert_eq!(tree.leaf_count(), 256);
        assert_eq!(tree.len(), MAX_NODES);
        assert_eq!(tree.total_frequency(), 6);
    }

    #[test]
    fn test_banana_shape() {
        // b:1 and n:2 merge first. a:3 ties with that merge but is the
        // older node, so it is popped first and becomes the left child.
        let tree = observed(b"banana");
        assert_eq!(tree.leaf_count(), 3);
        assert_eq!(tree.total_frequency(), 6);
        assert_eq!(tree.leaves(), vec![(b'a', 1), (b'b', 2), (b'n', 2)]);
    }

    #[test]
    fn test_frequencies_sum_at_internal_nodes() {
        let tree = observed(b"abracadabra alakazam");
        for node in tree.nodes() {
            if let Node::Internal {
                left,
                right,
                frequency,
            } = *node
            {
                assert_eq!(
                    frequency,
                    tree.node(left).frequency() + tree.node(right).frequency()
                );
            }
        }
    }

    #[test]
    fn test_single_symbol_gets_sibling() {
        let tree = observed(b"aaaa");
        assert_eq!(tree.leaf_count(), 2);
        assert_eq!(tree.depth(), 1);
        // Zero-frequency filler is popped first and sits on the left.
        assert_eq!(tree.leaves(), vec![(0, 1), (b'a', 1)]);
    }

    #[test]
    fn test_single_zero_byte_gets_sibling() {
        let tree = observed(&[0, 0, 0]);
        assert_eq!(tree.leaves(), vec![(1, 1), (0, 1)]);
    }

    #[test]
    fn test_empty_input_builds_usable_tree() {
        let tree = observed(&[]);
        assert_eq!(tree.leaves(), vec![(0, 1), (1, 1)]);
        assert!(!tree.node(tree.root()).is_leaf());
    }

    #[test]
    fn test_build_is_deterministic() {
        let data = b"the quick brown fox jumps over the lazy dog";
        let a = observed(data);
        let b = observed(data);
        assert_eq!(a, b);
        assert!(a.same_shape(&b));
    }

    #[test]
    fn test_same_shape_detects_symbol_swap() {
        let a = observed(b"aab");
        let b = observed(b"abb");
        assert!(!a.same_shape(&b));
    }
}
