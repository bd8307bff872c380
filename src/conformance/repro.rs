//! Reproduction bundle for debugging conformance mismatches.

use serde::Serialize;
use std::path::Path;

/// Everything needed to reproduce one known-answer mismatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReproBundle {
    /// Test identifier, e.g. `SHA3-256#12`.
    pub test_id: String,
    /// Standard function name.
    pub function: String,
    /// Message length in bits.
    pub length_bits: usize,
    /// Absorbed message prefix (lowercase hex).
    pub message: String,
    /// Expected digest (lowercase hex).
    pub expected: String,
    /// Computed digest (lowercase hex).
    pub actual: String,
    /// Index of the first differing byte, if any.
    pub first_diff: Option<usize>,
}

impl ReproBundle {
    /// Create a bundle from raw bytes.
    pub fn new(
        test_id: String,
        function: String,
        length_bits: usize,
        message: &[u8],
        expected: &[u8],
        actual: &[u8],
    ) -> Self {
        let first_diff = expected
            .iter()
            .zip(actual.iter())
            .position(|(e, a)| e != a)
            .or_else(|| (expected.len() != actual.len()).then(|| expected.len().min(actual.len())));

        Self {
            test_id,
            function,
            length_bits,
            message: hex::encode(message),
            expected: hex::encode(expected),
            actual: hex::encode(actual),
            first_diff,
        }
    }

    /// Format as a human-readable report.
    pub fn to_report(&self) -> String {
        let first_diff = self
            .first_diff
            .map_or_else(|| "none".to_string(), |i| format!("byte {}", i));
        format!(
            r#"=== Conformance Mismatch Report ===
Test: {}
Function: {}
Length: {} bits
Message: {}

Expected: {}
Actual:   {}
First difference: {}

To reproduce:
  keccaksum hash -a {} <message-file>
"#,
            self.test_id,
            self.function,
            self.length_bits,
            self.message,
            self.expected,
            self.actual,
            first_diff,
            self.function,
        )
    }

    /// Format as JSON for machine parsing.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| format!("{{\"error\":\"{}\"}}", e))
    }

    /// Save the report to a file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        std::fs::write(path, self.to_report())
    }
}
