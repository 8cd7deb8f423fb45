//! Error types for huffpack

use thiserror::Error;

use crate::codec::DecodeStatus;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("frequency table is empty")]
    EmptyFrequencies,

    #[error("input of {size} bytes exceeds the configured limit of {limit} bytes")]
    InputTooLarge { size: usize, limit: usize },

    #[error("{field} length of {bits} bits does not fit a 32-bit header field")]
    FieldOverflow { field: &'static str, bits: u64 },

    #[error("ran out of bits: needed {needed}, {available} available")]
    OutOfBits { needed: usize, available: usize },

    #[error("tree section declares {declared} bits but only {available} remain")]
    TreeLengthOverrun { declared: usize, available: usize },

    #[error("malformed tree: {0}")]
    MalformedTree(String),

    #[error("payload did not decode cleanly: {0}")]
    IncompletePayload(DecodeStatus),

    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
