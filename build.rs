// Build script that derives the Keccak-f[1600] step tables.
// Build scripts are not part of the library, so we allow expect().
#![allow(clippy::expect_used)]
//
// Generates `params_generated.rs` in OUT_DIR containing:
// - ROUNDS: number of rounds for the 1600-bit width (12 + 2*6)
// - ROUND_CONSTANTS: iota constants produced by the rc() LFSR
// - RHO_OFFSETS / PI_LANES: the combined rho-pi walk starting at lane (1, 0)

use std::env;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

const ROUNDS: usize = 24;
const LANE_STEPS: usize = 24;

/// One step of the LFSR with polynomial x^8 + x^6 + x^5 + x^4 + 1.
fn lfsr_step(reg: &mut u8) -> bool {
    let out = *reg & 0x01 != 0;
    *reg = if *reg & 0x80 != 0 {
        (*reg << 1) ^ 0x71
    } else {
        *reg << 1
    };
    out
}

/// Round constants: bit 2^j - 1 of round i is rc(j + 7i), j in 0..7.
fn round_constants() -> [u64; ROUNDS] {
    let mut reg = 0x01u8;
    let mut constants = [0u64; ROUNDS];
    for rc in constants.iter_mut() {
        for j in 0..7 {
            let bit = (1u32 << j) - 1;
            if lfsr_step(&mut reg) {
                *rc ^= 1u64 << bit;
            }
        }
    }
    constants
}

/// Walk (x, y) -> (y, 2x + 3y) from (1, 0).
///
/// Step t rotates the lane it leaves by (t+1)(t+2)/2 mod 64 and lands on the
/// next lane of the walk.
fn rho_pi() -> ([u32; LANE_STEPS], [usize; LANE_STEPS]) {
    let mut rho = [0u32; LANE_STEPS];
    let mut pi = [0usize; LANE_STEPS];
    let (mut x, mut y) = (1usize, 0usize);
    for t in 0..LANE_STEPS {
        rho[t] = (((t + 1) * (t + 2) / 2) % 64) as u32;
        let next = (y, (2 * x + 3 * y) % 5);
        x = next.0;
        y = next.1;
        pi[t] = x + 5 * y;
    }
    (rho, pi)
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR not set");
    let out_path = Path::new(&out_dir);

    generate_params_rs(out_path);
}

fn generate_params_rs(out_path: &Path) {
    let constants = round_constants();
    let (rho, pi) = rho_pi();

    let mut code = format!(
        r#"// Keccak-f[1600] step tables.
//
// DO NOT EDIT - This file is generated by build.rs

/// Number of rounds of Keccak-f[1600].
pub const ROUNDS: usize = {};

"#,
        ROUNDS
    );

    code.push_str("/// Iota round constants, one per round.\n");
    code.push_str(&format!("pub const ROUND_CONSTANTS: [u64; {}] = [\n", ROUNDS));
    for rc in constants.chunks(2) {
        code.push_str("   ");
        for value in rc {
            write!(code, " {:#018x},", value).expect("write to String");
        }
        code.push('\n');
    }
    code.push_str("];\n\n");

    code.push_str("/// Left-rotation applied at each step of the rho-pi walk.\n");
    code.push_str(&format!("pub const RHO_OFFSETS: [u32; {}] = [\n   ", LANE_STEPS));
    for value in rho {
        write!(code, " {},", value).expect("write to String");
    }
    code.push_str("\n];\n\n");

    code.push_str("/// Destination lane index (x + 5y) of each step of the rho-pi walk.\n");
    code.push_str(&format!("pub const PI_LANES: [usize; {}] = [\n   ", LANE_STEPS));
    for value in pi {
        write!(code, " {},", value).expect("write to String");
    }
    code.push_str("\n];\n");

    fs::write(out_path.join("params_generated.rs"), code)
        .expect("Failed to write params_generated.rs");
}
