//! Keccak sponge construction.
//!
//! Input bytes are XORed into a rate-sized buffer; every time the buffer fills
//! it is folded into the state and the permutation runs. Output is read
//! straight from the state's byte view, permuting whenever a rate boundary is
//! crossed.

use super::{permute_in_place, KeccakState, STATE_BYTES};
use crate::error::{ErrorCode, Fips202Result};
use std::fmt;
use tracing::trace;

/// Final bit of the pad10*1 rule, at byte `rate - 1`.
pub const PAD_END: u8 = 0x80;

/// Sponge operation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Accepting input bytes
    Absorbing,
    /// Producing output bytes
    Squeezing,
}

/// A Keccak sponge with a configurable rate and domain-separation byte.
#[derive(Clone)]
pub struct Sponge {
    state: KeccakState,
    /// Pending input, folded into the state on permute. Bytes at and beyond
    /// `rate` are always zero.
    buffer: [u8; STATE_BYTES],
    rate: usize,
    dsbyte: u8,
    /// Offset into the rate portion, `0 <= cursor < rate` between calls.
    cursor: usize,
    direction: Direction,
}

impl Sponge {
    /// Create a sponge absorbing into `rate` bytes per block.
    ///
    /// Returns `InvalidParameter` unless `0 < rate < 200`.
    pub fn new(rate: usize, dsbyte: u8) -> Fips202Result<Self> {
        if rate == 0 || rate >= STATE_BYTES {
            return Err(ErrorCode::InvalidParameter { rate });
        }
        Ok(Self::with_rate(rate, dsbyte))
    }

    /// Construct without validation. Callers pass a rate known to be in range.
    pub(crate) const fn with_rate(rate: usize, dsbyte: u8) -> Self {
        Self {
            state: KeccakState::ZERO,
            buffer: [0u8; STATE_BYTES],
            rate,
            dsbyte,
            cursor: 0,
            direction: Direction::Absorbing,
        }
    }

    /// Bytes absorbed or squeezed per permutation.
    pub fn rate(&self) -> usize {
        self.rate
    }

    /// Bytes of state never exposed directly, `200 - rate`.
    pub fn capacity(&self) -> usize {
        STATE_BYTES - self.rate
    }

    /// Domain-separation byte injected by [`pad`](Self::pad).
    pub fn dsbyte(&self) -> u8 {
        self.dsbyte
    }

    /// Current offset into the rate portion.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Current mode.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The permutation state. Pending buffered input is not yet folded in.
    pub fn state(&self) -> &KeccakState {
        &self.state
    }

    /// XOR `input` into the buffer, permuting each time `rate` bytes are filled.
    pub fn absorb(&mut self, input: &[u8]) {
        let mut rest = input;
        while !rest.is_empty() {
            let take = (self.rate - self.cursor).min(rest.len());
            let (head, tail) = rest.split_at(take);
            for (dst, src) in self.buffer[self.cursor..self.cursor + take]
                .iter_mut()
                .zip(head)
            {
                *dst ^= src;
            }
            self.cursor += take;
            if self.cursor == self.rate {
                self.permute();
            }
            rest = tail;
        }
    }

    /// Apply the domain-separation byte and pad10*1, then permute.
    ///
    /// When the cursor sits at `rate - 1` both markers land on the same byte
    /// and combine by XOR.
    pub fn pad(&mut self) {
        trace!(rate = self.rate, cursor = self.cursor, dsbyte = self.dsbyte, "pad");
        self.buffer[self.cursor] ^= self.dsbyte;
        self.buffer[self.rate - 1] ^= PAD_END;
        self.permute();
    }

    /// Pad unless output has already been extracted since the last absorption.
    pub fn finalize(&mut self) {
        if self.direction == Direction::Absorbing {
            self.pad();
        }
    }

    /// Read `n` bytes of output.
    pub fn squeeze(&mut self, n: usize) -> Vec<u8> {
        let mut out = vec![0u8; n];
        self.squeeze_into(&mut out);
        out
    }

    /// Fill `out` with output bytes, permuting at every rate boundary.
    pub fn squeeze_into(&mut self, out: &mut [u8]) {
        if self.direction == Direction::Absorbing {
            trace!(rate = self.rate, "direction -> squeezing");
        }
        self.direction = Direction::Squeezing;

        let mut written = 0;
        while written < out.len() {
            let take = (self.rate - self.cursor).min(out.len() - written);
            self.state
                .read_bytes(self.cursor, &mut out[written..written + take]);
            self.cursor += take;
            written += take;
            if self.cursor == self.rate {
                self.permute();
            }
        }
    }

    /// Fold the buffer into the state, run Keccak-f[1600], reset cursor and buffer.
    pub fn permute(&mut self) {
        self.state.xor_bytes(&self.buffer);
        permute_in_place(&mut self.state);
        self.cursor = 0;
        self.buffer.fill(0);
    }

    /// Absorb more input, returning `self` for chaining.
    ///
    /// If output has been extracted, one permutation runs and the sponge goes
    /// back to absorbing first. Resuming after squeezing is a duplex-style
    /// extension; SHA3 and SHAKE as standardised never do it.
    pub fn update(&mut self, input: &[u8]) -> &mut Self {
        if self.direction == Direction::Squeezing {
            trace!(rate = self.rate, "direction -> absorbing");
            self.permute();
            self.direction = Direction::Absorbing;
        }
        self.absorb(input);
        self
    }
}

impl fmt::Debug for Sponge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sponge")
            .field("rate", &self.rate)
            .field("dsbyte", &format_args!("{:#04x}", self.dsbyte))
            .field("cursor", &self.cursor)
            .field("direction", &self.direction)
            .finish()
    }
}
