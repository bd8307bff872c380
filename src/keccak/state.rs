//! The 1600-bit Keccak state.

use super::{LANES, STATE_BYTES};
use std::fmt;

/// 25 lanes of 64 bits, lane `(x, y)` stored at index `x + 5y`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeccakState([u64; LANES]);

impl KeccakState {
    /// The all-zero state.
    pub const ZERO: KeccakState = KeccakState([0u64; LANES]);

    /// Create a state from raw lanes.
    pub const fn from_lanes(lanes: [u64; LANES]) -> Self {
        Self(lanes)
    }

    /// Create a state from its 200-byte little-endian view.
    pub fn from_bytes(bytes: &[u8; STATE_BYTES]) -> Self {
        let mut state = Self::ZERO;
        state.xor_bytes(bytes);
        state
    }

    /// Get the raw lanes.
    pub fn lanes(&self) -> &[u64; LANES] {
        &self.0
    }

    /// Get the raw lanes mutably.
    pub fn lanes_mut(&mut self) -> &mut [u64; LANES] {
        &mut self.0
    }

    /// Lane at grid position `(x, y)`.
    ///
    /// Coordinates are taken modulo 5, as in the step mappings, so `(5, 0)`
    /// is lane `(0, 0)`.
    pub fn lane(&self, x: usize, y: usize) -> u64 {
        self.0[x % 5 + 5 * (y % 5)]
    }

    /// XOR bytes into the state starting at byte 0.
    ///
    /// Input beyond 200 bytes is ignored. A trailing partial lane is
    /// zero-extended in its high-order bytes.
    pub fn xor_bytes(&mut self, bytes: &[u8]) {
        let bytes = &bytes[..bytes.len().min(STATE_BYTES)];
        for (lane, chunk) in self.0.iter_mut().zip(bytes.chunks(8)) {
            let mut word = [0u8; 8];
            word[..chunk.len()].copy_from_slice(chunk);
            *lane ^= u64::from_le_bytes(word);
        }
    }

    /// Copy `out.len()` bytes of the byte view, starting at `offset`.
    ///
    /// Reads past byte 200 leave the remainder of `out` untouched.
    pub fn read_bytes(&self, offset: usize, out: &mut [u8]) {
        let mut pos = offset;
        for byte in out.iter_mut() {
            if pos >= STATE_BYTES {
                break;
            }
            *byte = self.0[pos / 8].to_le_bytes()[pos % 8];
            pos += 1;
        }
    }

    /// The full 200-byte little-endian view.
    pub fn to_bytes(&self) -> [u8; STATE_BYTES] {
        let mut out = [0u8; STATE_BYTES];
        for (chunk, lane) in out.chunks_exact_mut(8).zip(self.0.iter()) {
            chunk.copy_from_slice(&lane.to_le_bytes());
        }
        out
    }
}

impl Default for KeccakState {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<[u64; LANES]> for KeccakState {
    fn from(lanes: [u64; LANES]) -> Self {
        Self(lanes)
    }
}

/// Diagnostic dump: 5 rows (y = 0..5) of 5 sixteen-digit hex lanes.
///
/// Not a stable interchange format.
impl fmt::Display for KeccakState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.0.chunks_exact(5).enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for (x, lane) in row.iter().enumerate() {
                if x > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{:016x}", lane)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for KeccakState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "KeccakState [")?;
        writeln!(f, "{}", self)?;
        write!(f, "]")
    }
}
