//! Order-0 Shannon entropy of byte buffers

use serde::Serialize;

use crate::frequency::FrequencyTable;

/// Shannon entropy in bits per byte.
pub fn shannon_entropy(data: &[u8]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let table = FrequencyTable::from_bytes(data);
    let len = data.len() as f64;
    let mut entropy = 0.0;
    for (_, count) in table.iter() {
        let p = count as f64 / len;
        entropy -= p * p.log2();
    }
    entropy
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntropyReport {
    pub size: usize,
    /// Bits per byte.
    pub entropy: f64,
    /// `size * entropy / 8`, the order-0 lower bound for any symbol coder.
    pub theoretical_min_bytes: f64,
}

impl EntropyReport {
    pub fn new(data: &[u8]) -> Self {
        let entropy = shannon_entropy(data);
        Self {
            size: data.len(),
            entropy,
            theoretical_min_bytes: data.len() as f64 * entropy / 8.0,
        }
    }

    /// The lower bound rounded up to whole bytes.
    pub fn theoretical_min(&self) -> usize {
        self.theoretical_min_bytes.ceil() as usize
    }
}
