//! Byte → bit-code mapping derived from a [`HuffmanTree`]

use std::collections::BTreeMap;
use std::fmt;

use crate::bit_buffer::BitBuffer;
use crate::frequency::FrequencyTable;
use crate::tree::{HuffmanTree, Node};

/// A variable-length code, first bit = first branch taken from the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Code {
    bits: BitBuffer,
}

impl Code {
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn bits(&self) -> &BitBuffer {
        &self.bits
    }

    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.len() <= other.len()
            && self.bits.iter().zip(other.bits.iter()).all(|(a, b)| a == b)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.bits.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct CodeTable {
    codes: BTreeMap<u8, Code>,
}

impl CodeTable {
    /// Depth-first walk: `0` for left, `1` for right. A lone-leaf tree gets `0`.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = BTreeMap::new();
        if let Node::Leaf(byte) = tree.node(tree.root()) {
            codes.insert(byte, Code { bits: [false].into_iter().collect() });
            return Self { codes };
        }

        let mut stack = vec![(tree.root(), BitBuffer::new())];
        while let Some((id, prefix)) = stack.pop() {
            match tree.node(id) {
                Node::Leaf(byte) => {
                    codes.insert(byte, Code { bits: prefix });
                }
                Node::Internal { left, right } => {
                    let mut right_prefix = prefix.clone();
                    right_prefix.push_bit(true);
                    stack.push((right, right_prefix));
                    let mut left_prefix = prefix;
                    left_prefix.push_bit(false);
                    stack.push((left, left_prefix));
                }
            }
        }
        Self { codes }
    }

    pub fn get(&self, byte: u8) -> Option<&Code> {
        self.codes.get(&byte)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> {
        self.codes.iter().map(|(&b, c)| (b, c))
    }

    /// Total payload bits for data with these frequencies.
    pub fn encoded_len(&self, frequencies: &FrequencyTable) -> u64 {
        frequencies
            .iter()
            .map(|(byte, count)| {
                let len = self.get(byte).map_or(0, Code::len) as u64;
                len * count
            })
            .sum()
    }

    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<&Code> = self.codes.values().collect();
        codes.iter().enumerate().all(|(i, a)| {
            codes
                .iter()
                .enumerate()
                .all(|(j, b)| i == j || !a.is_prefix_of(b))
        })
    }
}
