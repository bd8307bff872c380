//! Error handling for the FIPS 202 primitives.
//!
//! Every fallible operation returns an [`ErrorCode`]. The permutation and the
//! absorb/squeeze paths cannot fail; errors only arise when a sponge is
//! constructed with an unusable rate, when a function name cannot be resolved,
//! or when a known-answer replay disagrees with the published digest or hits
//! an entry it cannot replay.

use thiserror::Error;

/// All error codes raised by the crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum ErrorCode {
    /// Sponge rate outside `(0, 200)` bytes (code 100).
    #[error("InvalidParameter(rate={rate}): rate must satisfy 0 < rate < 200 bytes")]
    InvalidParameter {
        /// The rejected rate, in bytes.
        rate: usize,
    },

    /// Function name not bound to any standard instance (code 101).
    #[error("UnknownFunction({0})")]
    UnknownFunction(String),

    /// Computed digest differs from a known-answer vector (code 200).
    #[error("ConformanceFailure({function}, {length} bits): expected {expected}, got {actual}")]
    ConformanceFailure {
        /// Standard function name, e.g. `SHA3-256`.
        function: String,
        /// Message length in bits.
        length: usize,
        /// Expected digest (lowercase hex).
        expected: String,
        /// Computed digest (lowercase hex).
        actual: String,
    },

    /// Known-answer entry that cannot be replayed, e.g. a message shorter
    /// than its stated length (code 201).
    #[error("MalformedVector({id}): {reason}")]
    MalformedVector {
        /// Entry identifier, e.g. `SHA3-256#4`.
        id: String,
        /// What is wrong with the entry.
        reason: String,
    },
}

impl ErrorCode {
    /// Get the numeric error code.
    pub fn code(&self) -> u32 {
        match self {
            ErrorCode::InvalidParameter { .. } => 100,
            ErrorCode::UnknownFunction(_) => 101,
            ErrorCode::ConformanceFailure { .. } => 200,
            ErrorCode::MalformedVector { .. } => 201,
        }
    }

    /// Get the error name as a string.
    pub fn name(&self) -> &'static str {
        match self {
            ErrorCode::InvalidParameter { .. } => "InvalidParameter",
            ErrorCode::UnknownFunction(_) => "UnknownFunction",
            ErrorCode::ConformanceFailure { .. } => "ConformanceFailure",
            ErrorCode::MalformedVector { .. } => "MalformedVector",
        }
    }
}

/// Result type for FIPS 202 operations.
pub type Fips202Result<T> = Result<T, ErrorCode>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_and_names() {
        let err = ErrorCode::InvalidParameter { rate: 200 };
        assert_eq!(err.code(), 100);
        assert_eq!(err.name(), "InvalidParameter");

        let err = ErrorCode::UnknownFunction("MD5".to_string());
        assert_eq!(err.code(), 101);
        assert_eq!(err.to_string(), "UnknownFunction(MD5)");
    }

    #[test]
    fn test_malformed_vector_is_distinct_from_mismatch() {
        let err = ErrorCode::MalformedVector {
            id: "SHA3-256#4".to_string(),
            reason: "message has 2 bytes, length needs 8".to_string(),
        };
        assert_eq!(err.code(), 201);
        assert_eq!(err.name(), "MalformedVector");
        assert_eq!(
            err.to_string(),
            "MalformedVector(SHA3-256#4): message has 2 bytes, length needs 8"
        );
    }

    #[test]
    fn test_display_mentions_rate() {
        let err = ErrorCode::InvalidParameter { rate: 0 };
        assert!(err.to_string().contains("rate=0"));
    }
}
