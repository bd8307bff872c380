//! Known-answer conformance testing.
//!
//! Replays a KAT fixture (function name -> list of `{length, message, digest}`
//! entries) against the sponge and reports byte-exact mismatches.

mod kats;
mod repro;

pub use kats::{KatEntry, KatFile, KatResults, KatRunner, TestResult, DEFAULT_SHAKE_BYTES};
pub use repro::ReproBundle;

/// Result type for conformance operations.
pub type ConformanceResult<T> = Result<T, ConformanceError>;

/// Errors that can occur while loading a fixture.
#[derive(Debug)]
pub enum ConformanceError {
    /// I/O error
    IoError(String),
    /// Fixture is not valid JSON or does not match the expected layout
    ParseError(String),
}

impl std::fmt::Display for ConformanceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IoError(msg) => write!(f, "I/O error: {}", msg),
            Self::ParseError(msg) => write!(f, "Failed to parse KAT fixture: {}", msg),
        }
    }
}

impl std::error::Error for ConformanceError {}
