//! Keccak-f[1600] permutation implementation.
//!
//! Each of the 24 rounds applies, in order:
//! 1. Theta (column parity mixing)
//! 2. Rho + Pi (lane rotation and relocation along one 24-step walk)
//! 3. Chi (the only non-linear step, row-wise)
//! 4. Iota (round constant into lane 0)

use super::{KeccakState, LANES, PI_LANES, RHO_OFFSETS, ROUNDS, ROUND_CONSTANTS};

/// 64-bit left rotation.
///
/// Defined for every `s`, including 0 and multiples of 64, where it is the
/// identity; no shift by 64 is ever evaluated.
#[inline]
pub const fn rotl(x: u64, s: u32) -> u64 {
    x.rotate_left(s % 64)
}

/// Theta: XOR each lane with the parities of its two neighbouring columns.
#[inline]
fn theta(a: &mut [u64; LANES]) {
    let mut c = [0u64; 5];
    for x in 0..5 {
        c[x] = a[x] ^ a[x + 5] ^ a[x + 10] ^ a[x + 15] ^ a[x + 20];
    }

    for x in 0..5 {
        let t = c[(x + 4) % 5] ^ rotl(c[(x + 1) % 5], 1);
        for y in (0..LANES).step_by(5) {
            a[y + x] ^= t;
        }
    }
}

/// Rho and Pi in a single pass. Lane 0 is neither moved nor rotated.
#[inline]
fn rho_pi(a: &mut [u64; LANES]) {
    let mut carry = a[1];
    for (&dst, &rot) in PI_LANES.iter().zip(RHO_OFFSETS.iter()) {
        let next = a[dst];
        a[dst] = rotl(carry, rot);
        carry = next;
    }
}

#[inline]
fn chi(a: &mut [u64; LANES]) {
    for y in (0..LANES).step_by(5) {
        let mut row = [0u64; 5];
        row.copy_from_slice(&a[y..y + 5]);
        for x in 0..5 {
            a[y + x] = row[x] ^ (!row[(x + 1) % 5] & row[(x + 2) % 5]);
        }
    }
}

#[inline]
fn iota(a: &mut [u64; LANES], round: usize) {
    a[0] ^= ROUND_CONSTANTS[round];
}

/// One full round.
fn round(a: &mut [u64; LANES], index: usize) {
    theta(a);
    rho_pi(a);
    chi(a);
    iota(a, index);
}

/// Apply Keccak-f[1600] to `state` in place.
pub fn permute_in_place(state: &mut KeccakState) {
    let lanes = state.lanes_mut();
    for index in 0..ROUNDS {
        round(lanes, index);
    }
}

/// Complete Keccak-f[1600] permutation.
pub fn permute(state: &KeccakState) -> KeccakState {
    let mut st = *state;
    permute_in_place(&mut st);
    st
}

/// Permutation with trace output for debugging.
///
/// Returns (final_state, round_traces) where each trace entry contains
/// the state after that round.
pub fn permute_with_trace(state: &KeccakState) -> (KeccakState, Vec<KeccakState>) {
    let mut st = *state;
    let mut traces = Vec::with_capacity(ROUNDS);

    for index in 0..ROUNDS {
        round(st.lanes_mut(), index);
        traces.push(st);
    }

    (st, traces)
}
