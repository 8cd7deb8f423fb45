//! Human-readable size and compression summaries

use serde::Serialize;

use crate::entropy::EntropyReport;

const KB: usize = 1024;
const MB: usize = 1024 * KB;
const GB: usize = 1024 * MB;

/// Renders a byte count as mixed binary units, e.g. `1 MB 0 KB 5 B`.
/// Lower components are printed only while something non-zero follows them.
pub fn format_size(bytes: usize) -> String {
    let gb = bytes / GB;
    let mb = bytes % GB / MB;
    let kb = bytes % MB / KB;
    let b = bytes % KB;

    let mut parts = Vec::new();
    if bytes >= GB {
        parts.push(format!("{gb} GB"));
        if mb > 0 || kb > 0 || b > 0 {
            parts.push(format!("{mb} MB"));
        }
    } else if bytes >= MB {
        parts.push(format!("{mb} MB"));
    }
    if bytes >= KB {
        if bytes < MB || kb > 0 || b > 0 {
            parts.push(format!("{kb} KB"));
        }
        if b > 0 {
            parts.push(format!("{b} B"));
        }
    } else {
        parts.push(format!("{b} B"));
    }
    parts.join(" ")
}

#[derive(Debug, Clone, Serialize)]
pub struct CompressionReport {
    pub original: EntropyReport,
    pub encoded: EntropyReport,
    /// `(1 - encoded / original) * 100`.
    pub ratio_percent: f64,
    /// Order-0 lower bound over the encoded size, in percent. `None` when the
    /// bound is zero.
    pub efficiency_percent: Option<f64>,
}

impl CompressionReport {
    pub fn new(original: &[u8], encoded: &[u8]) -> Self {
        let original = EntropyReport::new(original);
        let encoded = EntropyReport::new(encoded);
        let ratio_percent = if original.size == 0 {
            0.0
        } else {
            (1.0 - encoded.size as f64 / original.size as f64) * 100.0
        };
        let efficiency_percent = (original.theoretical_min() > 0 && encoded.size > 0)
            .then(|| original.theoretical_min_bytes / encoded.size as f64 * 100.0);
        Self {
            original,
            encoded,
            ratio_percent,
            efficiency_percent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(1024), "1 KB");
        assert_eq!(format_size(1030), "1 KB 6 B");
        assert_eq!(format_size(MB), "1 MB");
        assert_eq!(format_size(MB + 5), "1 MB 0 KB 5 B");
        assert_eq!(format_size(2 * MB + 3 * KB), "2 MB 3 KB");
        assert_eq!(format_size(GB), "1 GB");
        assert_eq!(format_size(GB + KB), "1 GB 0 MB 1 KB");
        assert_eq!(format_size(GB + 7), "1 GB 0 MB 0 KB 7 B");
    }

    #[test]
    fn test_compression_report() {
        let original = "aaaaaaaaab".repeat(100);
        let encoded = crate::codec::encode(original.as_bytes()).unwrap();
        let report = CompressionReport::new(original.as_bytes(), &encoded);
        assert_eq!(report.original.size, 1000);
        assert!(report.ratio_percent > 80.0);
        let efficiency = report.efficiency_percent.unwrap();
        assert!(efficiency > 0.0 && efficiency <= 100.0);
    }

    #[test]
    fn test_report_without_bound() {
        let report = CompressionReport::new(&[7u8; 10], &[0u8; 12]);
        assert!(report.efficiency_percent.is_none());
        assert!(report.ratio_percent < 0.0);
    }
}
