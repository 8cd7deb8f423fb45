//! Configuration for huffpack

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CodecError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Largest input `Codec::encode` accepts, in bytes.
    pub max_input_size: usize,
    /// Reject artifacts whose payload stops early instead of returning the
    /// decoded prefix.
    pub strict: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_input_size: 100 * 1024 * 1024, // 100 MB
            strict: false,
        }
    }
}

impl CodecConfig {
    pub fn from_json_str(json: &str) -> Result<Self, CodecError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, CodecError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = CodecConfig::from_json_str(r#"{ "strict": true }"#).unwrap();
        assert!(config.strict);
        assert_eq!(config.max_input_size, CodecConfig::default().max_input_size);
    }

    #[test]
    fn test_invalid_json() {
        let result = CodecConfig::from_json_str("{ strict: yes }");
        assert!(matches!(result, Err(CodecError::Config(_))));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("codec.json");
        std::fs::write(&path, r#"{ "max_input_size": 16, "strict": false }"#).unwrap();
        let config = CodecConfig::from_json_file(&path).unwrap();
        assert_eq!(config.max_input_size, 16);
    }
}
