//! KAT fixture loading and replay.
//!
//! Fixture layout:
//!
//! ```json
//! { "kats": { "SHA3-256": [ { "length": 24, "message": "616263", "digest": "3A98..." } ] } }
//! ```
//!
//! `length` is in bits; only the first `length / 8` message bytes are absorbed.

use super::repro::ReproBundle;
use super::{ConformanceError, ConformanceResult};
use crate::error::{ErrorCode, Fips202Result};
use crate::params::Instance;
use serde::{de, Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// SHAKE output length compared against fixtures (512 bits).
pub const DEFAULT_SHAKE_BYTES: usize = 64;

fn de_hex<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let encoded = String::deserialize(deserializer)?;
    hex::decode(encoded.trim()).map_err(de::Error::custom)
}

/// A KAT fixture file.
#[derive(Debug, Clone, Deserialize)]
pub struct KatFile {
    /// Entries keyed by function name.
    pub kats: BTreeMap<String, Vec<KatEntry>>,
}

/// A single known-answer entry.
#[derive(Debug, Clone, Deserialize)]
pub struct KatEntry {
    /// Message length in bits.
    pub length: usize,
    /// Message bytes; may be longer than `length / 8`.
    #[serde(deserialize_with = "de_hex")]
    pub message: Vec<u8>,
    /// Expected digest.
    #[serde(deserialize_with = "de_hex")]
    pub digest: Vec<u8>,
}

/// Result of running a single entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestResult {
    /// Digest matched.
    Pass,
    /// Digest mismatched.
    Fail {
        /// Expected digest (lowercase hex).
        expected: String,
        /// Computed digest (lowercase hex).
        actual: String,
    },
    /// Entry not applicable.
    Skip {
        /// Reason for skipping.
        reason: String,
    },
    /// Entry malformed.
    Error {
        /// Error message.
        message: String,
    },
}

impl TestResult {
    /// Returns true if this is a passing result.
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    /// Returns true if this is a failing result.
    pub fn is_fail(&self) -> bool {
        matches!(self, Self::Fail { .. })
    }
}

/// Aggregated results of a fixture run.
#[derive(Debug, Default)]
pub struct KatResults {
    /// Number of entries that passed.
    pub passed: usize,
    /// Number of entries that failed.
    pub failed: usize,
    /// Number of entries that were skipped.
    pub skipped: usize,
    /// Number of malformed entries.
    pub errors: usize,
    /// Result of every entry, in run order.
    pub details: Vec<(String, TestResult)>,
    /// One bundle per failure.
    pub repros: Vec<ReproBundle>,
}

impl KatResults {
    /// Create a new empty results container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a result.
    pub fn record(&mut self, id: &str, result: TestResult) {
        match &result {
            TestResult::Pass => self.passed += 1,
            TestResult::Fail { .. } => self.failed += 1,
            TestResult::Skip { .. } => self.skipped += 1,
            TestResult::Error { .. } => self.errors += 1,
        }
        self.details.push((id.to_string(), result));
    }

    /// Get total number of entries run.
    pub fn total(&self) -> usize {
        self.passed + self.failed + self.skipped + self.errors
    }

    /// Returns true if nothing failed or errored.
    pub fn all_passed(&self) -> bool {
        self.failed == 0 && self.errors == 0
    }

    /// Get a summary string of the results.
    pub fn summary(&self) -> String {
        format!(
            "{} passed, {} failed, {} skipped, {} errors (total: {})",
            self.passed,
            self.failed,
            self.skipped,
            self.errors,
            self.total()
        )
    }

    /// Get failures only.
    pub fn failures(&self) -> Vec<&(String, TestResult)> {
        self.details.iter().filter(|(_, r)| r.is_fail()).collect()
    }

    /// Get errors only.
    pub fn error_details(&self) -> Vec<&(String, TestResult)> {
        self.details
            .iter()
            .filter(|(_, r)| matches!(r, TestResult::Error { .. }))
            .collect()
    }

    /// `Ok(())` when every entry passed.
    ///
    /// Otherwise the first digest mismatch as `ConformanceFailure`, or, when
    /// every digest matched, the first malformed entry as `MalformedVector`.
    pub fn into_result(self) -> Fips202Result<()> {
        if let Some(bundle) = self.repros.into_iter().next() {
            return Err(ErrorCode::ConformanceFailure {
                function: bundle.function,
                length: bundle.length_bits,
                expected: bundle.expected,
                actual: bundle.actual,
            });
        }
        match self.details.into_iter().find(|(_, r)| matches!(r, TestResult::Error { .. })) {
            Some((id, TestResult::Error { message })) => {
                Err(ErrorCode::MalformedVector { id, reason: message })
            }
            _ => Ok(()),
        }
    }
}

/// Replays every entry of a fixture.
pub struct KatRunner {
    kats: KatFile,
    shake_bytes: usize,
}

impl KatRunner {
    /// Load a fixture from a file path.
    pub fn load<P: AsRef<Path>>(path: P) -> ConformanceResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            ConformanceError::IoError(format!("{}: {}", path.as_ref().display(), e))
        })?;
        Self::from_json(&content)
    }

    /// Parse a fixture from a JSON string.
    pub fn from_json(json: &str) -> ConformanceResult<Self> {
        let kats: KatFile =
            serde_json::from_str(json).map_err(|e| ConformanceError::ParseError(e.to_string()))?;
        Ok(Self::new(kats))
    }

    /// Wrap an already-parsed fixture.
    pub fn new(kats: KatFile) -> Self {
        Self {
            kats,
            shake_bytes: DEFAULT_SHAKE_BYTES,
        }
    }

    /// Change the SHAKE output length compared against fixtures.
    pub fn with_shake_bytes(mut self, n: usize) -> Self {
        self.shake_bytes = n;
        self
    }

    /// The parsed fixture.
    pub fn fixture(&self) -> &KatFile {
        &self.kats
    }

    /// Number of entries across all functions.
    pub fn vector_count(&self) -> usize {
        self.kats.kats.values().map(Vec::len).sum()
    }

    /// Run all entries and return results.
    pub fn run_all(&self) -> KatResults {
        let mut results = KatResults::new();

        for (name, entries) in &self.kats.kats {
            let before = results.passed;
            match name.parse::<Instance>() {
                Ok(instance) => {
                    for (i, entry) in entries.iter().enumerate() {
                        let id = format!("{}#{}", instance, i);
                        let result = match self.compute(instance, entry) {
                            Ok(actual) if actual == entry.digest => TestResult::Pass,
                            Ok(actual) => {
                                let bundle = ReproBundle::new(
                                    id.clone(),
                                    instance.name().to_string(),
                                    entry.length,
                                    entry.message.get(..entry.length / 8).unwrap_or_default(),
                                    &entry.digest,
                                    &actual,
                                );
                                warn!(
                                    %id,
                                    length = entry.length,
                                    expected = %bundle.expected,
                                    actual = %bundle.actual,
                                    "KAT mismatch"
                                );
                                let result = TestResult::Fail {
                                    expected: bundle.expected.clone(),
                                    actual: bundle.actual.clone(),
                                };
                                results.repros.push(bundle);
                                result
                            }
                            Err(result) => result,
                        };
                        results.record(&id, result);
                    }
                }
                Err(e) => {
                    for i in 0..entries.len() {
                        results.record(
                            &format!("{}#{}", name, i),
                            TestResult::Skip {
                                reason: e.to_string(),
                            },
                        );
                    }
                }
            }
            debug!(
                function = %name,
                entries = entries.len(),
                passed = results.passed - before,
                "KAT function replayed"
            );
        }

        results
    }

    /// Run a single entry against `instance`.
    pub fn run_entry(&self, instance: Instance, entry: &KatEntry) -> TestResult {
        match self.compute(instance, entry) {
            Ok(actual) if actual == entry.digest => TestResult::Pass,
            Ok(actual) => TestResult::Fail {
                expected: hex::encode(&entry.digest),
                actual: hex::encode(actual),
            },
            Err(result) => result,
        }
    }

    /// Digest the entry's message, or the `Skip`/`Error` result when it cannot be run.
    fn compute(&self, instance: Instance, entry: &KatEntry) -> Result<Vec<u8>, TestResult> {
        if entry.length % 8 != 0 {
            return Err(TestResult::Skip {
                reason: format!("bit length {} is not byte-aligned", entry.length),
            });
        }

        let message = entry.message.get(..entry.length / 8).ok_or_else(|| TestResult::Error {
            message: format!(
                "message has {} bytes, length needs {}",
                entry.message.len(),
                entry.length / 8
            ),
        })?;

        match (instance.sha3(), instance.shake()) {
            (Some(mut h), _) => Ok(h.update(message).digest()),
            (None, Some(mut h)) => Ok(h.update(message).digest(self.shake_bytes)),
            (None, None) => Err(TestResult::Error {
                message: format!("{} has no hash family", instance),
            }),
        }
    }
}
