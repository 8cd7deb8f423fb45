//! Huffman tree construction and its pre-order bit encoding
//!
//! Nodes live in an arena and refer to their children by index. Construction
//! merges the two lightest nodes until one remains; ties are broken by node
//! index, and leaves are seeded in ascending byte order, so the same frequency
//! table always yields the same tree.
//!
//! Serialized form: internal node = `0`, left subtree, right subtree;
//! leaf = `1` followed by the byte value, MSB first.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::trace;

use crate::bit_buffer::{BitBuffer, BitCursor};
use crate::error::CodecError;
use crate::frequency::FrequencyTable;

pub type NodeId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    Leaf(u8),
    Internal { left: NodeId, right: NodeId },
}

/// A full binary tree, or a lone leaf when only one byte value occurs.
#[derive(Debug, Clone)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: NodeId,
}

#[derive(Debug, PartialEq, Eq)]
struct HeapEntry {
    weight: u64,
    // Doubles as insertion order: every node is pushed exactly once, right after
    // it is allocated.
    node: NodeId,
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // min-heap on (weight, node)
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.node.cmp(&self.node))
    }
}

enum Slot {
    Left(NodeId),
    Right(NodeId),
}

impl HuffmanTree {
    pub fn build(frequencies: &FrequencyTable) -> Result<Self, CodecError> {
        let mut nodes = Vec::with_capacity(frequencies.len() * 2);
        let mut heap = BinaryHeap::with_capacity(frequencies.len());
        for (byte, count) in frequencies.iter() {
            heap.push(HeapEntry {
                weight: count,
                node: nodes.len(),
            });
            nodes.push(Node::Leaf(byte));
        }

        let root = loop {
            let first = heap.pop().ok_or(CodecError::EmptyFrequencies)?;
            let Some(second) = heap.pop() else {
                break first.node;
            };
            let id = nodes.len();
            nodes.push(Node::Internal {
                left: first.node,
                right: second.node,
            });
            heap.push(HeapEntry {
                weight: first.weight.saturating_add(second.weight),
                node: id,
            });
        };

        trace!(
            symbols = frequencies.len(),
            nodes = nodes.len(),
            "built huffman tree"
        );
        Ok(Self { nodes, root })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Node {
        self.nodes[id]
    }

    /// True when the tree is a single leaf. Its code is `0`.
    pub fn is_degenerate(&self) -> bool {
        matches!(self.nodes[self.root], Node::Leaf(_))
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n, Node::Leaf(_)))
            .count()
    }

    /// Length in bits of [`serialize`](Self::serialize)'s output.
    pub fn serialized_len(&self) -> usize {
        let body: usize = self
            .nodes
            .iter()
            .map(|n| match n {
                Node::Leaf(_) => 9,
                Node::Internal { .. } => 1,
            })
            .sum();
        if self.is_degenerate() {
            body + 1
        } else {
            body
        }
    }

    /// Appends the pre-order encoding of the tree to `out`. A lone leaf is
    /// written under an internal marker with no right subtree.
    pub fn serialize(&self, out: &mut BitBuffer) {
        if self.is_degenerate() {
            out.push_bit(false);
        }
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            match self.nodes[id] {
                Node::Leaf(byte) => {
                    out.push_bit(true);
                    out.push_bits(byte as u64, 8);
                }
                Node::Internal { left, right } => {
                    out.push_bit(false);
                    stack.push(right);
                    stack.push(left);
                }
            }
        }
    }

    /// Reads one tree from `cursor`, consuming exactly the bits its shape
    /// requires. Running past the cursor's limit is an error, except for the
    /// lone-leaf form written by [`serialize`](Self::serialize).
    pub fn deserialize(cursor: &mut BitCursor<'_>) -> Result<Self, CodecError> {
        let mut nodes: Vec<Node> = Vec::new();
        let mut pending: Vec<Slot> = Vec::new();

        loop {
            if cursor.remaining() == 0 && Self::is_lone_leaf_wrapper(&nodes, &pending) {
                return Ok(Self {
                    nodes: vec![nodes[1]],
                    root: 0,
                });
            }

            let id = nodes.len();
            let is_leaf = cursor.read_bit()?;
            if is_leaf {
                nodes.push(Node::Leaf(cursor.read_u8()?));
            } else {
                // children are patched in once they have been read
                nodes.push(Node::Internal { left: id, right: id });
            }

            match pending.pop() {
                Some(Slot::Left(parent)) => {
                    if let Node::Internal { left, .. } = &mut nodes[parent] {
                        *left = id;
                    }
                }
                Some(Slot::Right(parent)) => {
                    if let Node::Internal { right, .. } = &mut nodes[parent] {
                        *right = id;
                    }
                }
                None => {}
            }

            if !is_leaf {
                pending.push(Slot::Right(id));
                pending.push(Slot::Left(id));
            }
            if pending.is_empty() {
                break;
            }
        }

        if nodes.len() == 1 {
            return Err(CodecError::MalformedTree(
                "root is a bare leaf with no code path".into(),
            ));
        }
        Ok(Self { nodes, root: 0 })
    }

    fn is_lone_leaf_wrapper(nodes: &[Node], pending: &[Slot]) -> bool {
        nodes.len() == 2
            && matches!(nodes[1], Node::Leaf(_))
            && matches!(pending, [Slot::Right(0)])
    }
}
