//! FIPS 202: the Keccak-f[1600] permutation, the sponge construction, and the
//! SHA3 / SHAKE functions derived from it.
//!
//! # Architecture
//!
//! - [`keccak`] - 1600-bit state, the 24-round permutation, and [`Sponge`]
//! - [`hash`] - fixed-output ([`Sha3`]) and extendable-output ([`Shake`]) families
//! - [`params`] - named standard instances and their `(rate, dsbyte)` bindings
//! - [`conformance`] - known-answer fixture replay
//! - [`error`] - error codes
//!
//! # Example
//!
//! ```
//! use fips202::params::{sha3_256, shake128};
//!
//! let digest = sha3_256().update(b"abc").hexdigest();
//! assert_eq!(digest, "3a985da74fe225b2045c172d6bd390bd855f086e3e9d525b46bfe24511431532");
//!
//! let mut xof = shake128();
//! xof.update(b"abc");
//! let first = xof.digest(16);
//! let next = xof.digest(16);
//! assert_ne!(first, next);
//! ```
//!
//! Hash objects are plain owned values with no shared state; hashing
//! independent inputs in parallel only needs one object per thread.

// Library code must avoid unwrap/expect/panic.
// Tests are checked separately with `cargo test`.
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]

pub mod conformance;
pub mod error;
pub mod hash;
pub mod keccak;
pub mod params;

// Re-export commonly used types
pub use error::{ErrorCode, Fips202Result};
pub use hash::{Extendable, Fixed, KeccakHash, Sha3, Shake};
pub use keccak::{permute, Direction, KeccakState, Sponge};
pub use params::Instance;
