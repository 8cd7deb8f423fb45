//! huffpack: static Huffman coding with a self-describing artifact.
//!
//! Encoding counts byte frequencies, builds a Huffman tree with a fixed
//! tie-break rule, and writes the tree's pre-order bit encoding ahead of the
//! coded payload. Decoding rebuilds the tree from the artifact and walks it bit
//! by bit. The same input always produces the same artifact bytes.
//!
//! ```
//! let artifact = huffpack::encode(b"aaab").unwrap();
//! assert_eq!(huffpack::decode(&artifact).unwrap(), b"aaab");
//! ```

pub mod bit_buffer;
pub mod code_table;
pub mod codec;
pub mod config;
pub mod entropy;
pub mod error;
pub mod frequency;
pub mod naming;
pub mod report;
pub mod tree;

pub use crate::codec::{
    decode, decode_with_status, encode, read_header, ArtifactHeader, DecodeStatus, Decoded,
};
pub use crate::config::CodecConfig;
pub use crate::error::CodecError;

/// Codec with input limits and decode strictness taken from a [`CodecConfig`].
#[derive(Debug, Clone, Default)]
pub struct Codec {
    config: CodecConfig,
}

impl Codec {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn encode(&self, data: &[u8]) -> Result<Vec<u8>, CodecError> {
        if data.len() > self.config.max_input_size {
            return Err(CodecError::InputTooLarge {
                size: data.len(),
                limit: self.config.max_input_size,
            });
        }
        codec::encode(data)
    }

    /// In strict mode any payload that does not end cleanly is an error;
    /// otherwise the decoded prefix is returned.
    pub fn decode(&self, artifact: &[u8]) -> Result<Vec<u8>, CodecError> {
        let decoded = self.decode_with_status(artifact)?;
        if self.config.strict && !decoded.is_complete() {
            return Err(CodecError::IncompletePayload(decoded.status));
        }
        Ok(decoded.data)
    }

    pub fn decode_with_status(&self, artifact: &[u8]) -> Result<Decoded, CodecError> {
        codec::decode_with_status(artifact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let codec = Codec::default();
        let data = b"the quick brown fox jumps over the lazy dog";
        let artifact = codec.encode(data).unwrap();
        assert!(artifact.len() < data.len() + 64);
        assert_eq!(codec.decode(&artifact).unwrap(), data);
    }

    #[test]
    fn test_input_limit() {
        let codec = Codec::new(CodecConfig {
            max_input_size: 8,
            ..CodecConfig::default()
        });
        assert!(codec.encode(b"12345678").is_ok());
        assert!(matches!(
            codec.encode(b"123456789"),
            Err(CodecError::InputTooLarge { size: 9, limit: 8 })
        ));
    }

    #[test]
    fn test_strict_rejects_truncated_payload() {
        let data = "hello world hello world hello".repeat(4);
        let artifact = encode(data.as_bytes()).unwrap();
        let cut = &artifact[..artifact.len() - 2];

        let lenient = Codec::default().decode(cut).unwrap();
        assert!(!lenient.is_empty());
        assert!(data.as_bytes().starts_with(&lenient));

        let strict = Codec::new(CodecConfig {
            strict: true,
            ..CodecConfig::default()
        });
        assert!(matches!(
            strict.decode(cut),
            Err(CodecError::IncompletePayload(DecodeStatus::Truncated { .. }))
        ));
    }

    #[test]
    fn test_compression_ratio() {
        let data = "aaaaaaaaaa".repeat(100);
        let artifact = Codec::default().encode(data.as_bytes()).unwrap();
        assert!(artifact.len() < data.len() / 4, "repetitive data should compress well");
    }
}
