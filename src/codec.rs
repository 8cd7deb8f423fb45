//! Artifact assembly and parsing
//!
//! Layout, bit-packed, every integer big-endian:
//!
//! ```text
//! [32: tree_bits][tree_bits: serialized tree][32: payload_bits][payload_bits: codes][0-7 zero pad]
//! ```
//!
//! Empty input encodes to an empty artifact and an empty artifact decodes to
//! empty output; no header is written or read in that case.

use std::fmt;

use serde::Serialize;
use tracing::{debug, warn};

use crate::bit_buffer::{BitBuffer, BitCursor};
use crate::code_table::CodeTable;
use crate::error::CodecError;
use crate::frequency::FrequencyTable;
use crate::tree::{HuffmanTree, Node};

pub const LENGTH_FIELD_BITS: u32 = 32;

/// How the payload section ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DecodeStatus {
    Complete,
    /// The artifact ran out before the declared payload length was reached.
    Truncated { missing_bits: usize },
    /// The declared payload length ended partway through a code.
    DanglingCode { bits: usize },
    /// A bit selected a branch that does not exist in the tree.
    InvalidPath { bit_offset: usize },
}

impl fmt::Display for DecodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeStatus::Complete => write!(f, "complete"),
            DecodeStatus::Truncated { missing_bits } => {
                write!(f, "truncated, {missing_bits} payload bits missing")
            }
            DecodeStatus::DanglingCode { bits } => {
                write!(f, "payload ends {bits} bits into an unfinished code")
            }
            DecodeStatus::InvalidPath { bit_offset } => {
                write!(f, "no tree branch for payload bit {bit_offset}")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub data: Vec<u8>,
    pub status: DecodeStatus,
    pub payload_bits_read: usize,
}

impl Decoded {
    pub fn is_complete(&self) -> bool {
        self.status == DecodeStatus::Complete
    }
}

/// Everything in an artifact ahead of the payload.
#[derive(Debug, Clone)]
pub struct ArtifactHeader {
    pub tree_bits: u32,
    pub tree: HuffmanTree,
    pub payload_bits: u32,
    /// Bit offset of the first payload bit.
    pub payload_offset: usize,
}

fn length_field(field: &'static str, bits: u64) -> Result<u32, CodecError> {
    u32::try_from(bits).map_err(|_| CodecError::FieldOverflow { field, bits })
}

/// Encode `data` into a self-describing artifact.
///
/// Fails only when a section outgrows its 32-bit length field.
pub fn encode(data: &[u8]) -> Result<Vec<u8>, CodecError> {
    if data.is_empty() {
        return Ok(Vec::new());
    }

    let frequencies = FrequencyTable::from_bytes(data);
    let tree = HuffmanTree::build(&frequencies)?;
    let codes = CodeTable::from_tree(&tree);

    let tree_bits = length_field("tree", tree.serialized_len() as u64)?;
    let payload_bits = length_field("payload", codes.encoded_len(&frequencies))?;

    let total_bits = 2 * LENGTH_FIELD_BITS as usize + tree_bits as usize + payload_bits as usize;
    let mut out = BitBuffer::with_capacity(total_bits);
    out.push_bits(tree_bits as u64, LENGTH_FIELD_BITS);
    tree.serialize(&mut out);
    out.push_bits(payload_bits as u64, LENGTH_FIELD_BITS);
    for &b in data {
        if let Some(code) = codes.get(b) {
            out.extend_from(code.bits());
        }
    }
    debug_assert_eq!(out.len(), total_bits);

    debug!(
        input_bytes = data.len(),
        symbols = codes.len(),
        tree_bits,
        payload_bits,
        "encoded artifact"
    );
    Ok(out.into_bytes())
}

fn parse_header(cursor: &mut BitCursor<'_>) -> Result<ArtifactHeader, CodecError> {
    let tree_bits = cursor.read_u32()?;
    let declared = tree_bits as usize;
    if declared > cursor.remaining() {
        return Err(CodecError::TreeLengthOverrun {
            declared,
            available: cursor.remaining(),
        });
    }

    let tree_end = cursor.position() + declared;
    let outer = cursor.set_limit(tree_end);
    let tree = HuffmanTree::deserialize(cursor)?;
    cursor.set_limit(outer);
    // bits the tree did not need are ignored
    cursor.skip(tree_end - cursor.position())?;

    let payload_bits = cursor.read_u32()?;
    Ok(ArtifactHeader {
        tree_bits,
        tree,
        payload_bits,
        payload_offset: cursor.position(),
    })
}

/// Parse the length fields and tree without touching the payload.
pub fn read_header(artifact: &[u8]) -> Result<ArtifactHeader, CodecError> {
    parse_header(&mut BitCursor::new(artifact))
}

/// Decode an artifact, returning whatever payload could be recovered along
/// with how the payload section ended.
///
/// Errors are reserved for a header or tree that cannot be parsed.
pub fn decode_with_status(artifact: &[u8]) -> Result<Decoded, CodecError> {
    if artifact.is_empty() {
        return Ok(Decoded {
            data: Vec::new(),
            status: DecodeStatus::Complete,
            payload_bits_read: 0,
        });
    }

    let mut cursor = BitCursor::new(artifact);
    let header = parse_header(&mut cursor)?;
    let tree = &header.tree;
    let payload_bits = header.payload_bits as usize;

    let mut data = Vec::with_capacity(payload_bits.min(cursor.remaining()));
    let root = tree.root();
    let mut node = root;
    let mut depth = 0;
    let mut read = 0;

    let status = loop {
        if read == payload_bits {
            break if depth == 0 {
                DecodeStatus::Complete
            } else {
                DecodeStatus::DanglingCode { bits: depth }
            };
        }
        if cursor.remaining() == 0 {
            break DecodeStatus::Truncated {
                missing_bits: payload_bits - read,
            };
        }
        let bit = cursor.read_bit()?;
        read += 1;

        let next = match tree.node(node) {
            Node::Internal { left, right } => {
                if bit {
                    right
                } else {
                    left
                }
            }
            // lone-leaf tree: only the `0` branch exists
            Node::Leaf(byte) => {
                if bit {
                    break DecodeStatus::InvalidPath { bit_offset: read - 1 };
                }
                data.push(byte);
                continue;
            }
        };

        match tree.node(next) {
            Node::Leaf(byte) => {
                data.push(byte);
                node = root;
                depth = 0;
            }
            Node::Internal { .. } => {
                node = next;
                depth += 1;
            }
        }
    };

    if status != DecodeStatus::Complete {
        warn!(%status, decoded_bytes = data.len(), "payload decode stopped early");
    }
    debug!(
        artifact_bytes = artifact.len(),
        tree_bits = header.tree_bits,
        payload_bits,
        output_bytes = data.len(),
        "decoded artifact"
    );
    Ok(Decoded {
        data,
        status,
        payload_bits_read: read,
    })
}

/// Decode an artifact. A payload that stops early yields the bytes decoded so
/// far; use [`decode_with_status`] to tell the two apart.
pub fn decode(artifact: &[u8]) -> Result<Vec<u8>, CodecError> {
    decode_with_status(artifact).map(|decoded| decoded.data)
}
