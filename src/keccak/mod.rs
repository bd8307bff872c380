//! Keccak-f[1600] permutation and the sponge built on it.
//!
//! The state is 25 lanes of 64 bits, addressed as a 5x5 grid by
//! `index = x + 5y`. Bytes map onto lanes little-endian: byte `i` of the
//! 200-byte view is byte `i % 8` (least significant first) of lane `i / 8`.
//! This is the FIPS 202 convention and is implemented explicitly in
//! [`KeccakState::xor_bytes`] and [`KeccakState::read_bytes`], independent of
//! host endianness.
//!
//! The step tables (`ROUND_CONSTANTS`, `RHO_OFFSETS`, `PI_LANES`) are generated
//! by `build.rs` as `const` arrays.

mod permute;
pub mod sponge;
mod state;

pub use permute::{permute, permute_in_place, permute_with_trace, rotl};
pub use sponge::{Direction, Sponge};
pub use state::KeccakState;

// Include generated step tables
include!(concat!(env!("OUT_DIR"), "/params_generated.rs"));

/// Number of 64-bit lanes in the state.
pub const LANES: usize = 25;

/// Size of the state in bytes (1600 bits).
pub const STATE_BYTES: usize = 200;
