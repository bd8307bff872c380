//! Standard FIPS 202 instances.
//!
//! Each instance is a `(rate, dsbyte)` pair. Fixed-output functions use
//! `rate = 200 - 2 * output_bytes`, SHAKE uses `rate = 200 - 2 * security_bytes`.
//! Every constructor returns a fresh, independent hash object.

use crate::error::{ErrorCode, Fips202Result};
use crate::hash::{Sha3, Shake};
use crate::keccak::{Sponge, STATE_BYTES};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Domain-separation byte of the SHA3 family.
pub const SHA3_DSBYTE: u8 = 0x06;

/// Domain-separation byte of the SHAKE family.
pub const SHAKE_DSBYTE: u8 = 0x1f;

/// Rate for SHA3-224 in bytes.
pub const SHA3_224_RATE: usize = STATE_BYTES - 2 * (224 / 8);
/// Rate for SHA3-256 in bytes.
pub const SHA3_256_RATE: usize = STATE_BYTES - 2 * (256 / 8);
/// Rate for SHA3-384 in bytes.
pub const SHA3_384_RATE: usize = STATE_BYTES - 2 * (384 / 8);
/// Rate for SHA3-512 in bytes.
pub const SHA3_512_RATE: usize = STATE_BYTES - 2 * (512 / 8);
/// Rate for SHAKE128 in bytes.
pub const SHAKE128_RATE: usize = STATE_BYTES - 2 * (128 / 8);
/// Rate for SHAKE256 in bytes.
pub const SHAKE256_RATE: usize = STATE_BYTES - 2 * (256 / 8);

/// A standardised FIPS 202 function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Instance {
    /// SHA3-224
    Sha3_224,
    /// SHA3-256
    Sha3_256,
    /// SHA3-384
    Sha3_384,
    /// SHA3-512
    Sha3_512,
    /// SHAKE128
    Shake128,
    /// SHAKE256
    Shake256,
}

impl Instance {
    /// All standard instances.
    pub const ALL: [Instance; 6] = [
        Instance::Sha3_224,
        Instance::Sha3_256,
        Instance::Sha3_384,
        Instance::Sha3_512,
        Instance::Shake128,
        Instance::Shake256,
    ];

    /// Canonical name as used in FIPS 202 and KAT files.
    pub const fn name(self) -> &'static str {
        match self {
            Instance::Sha3_224 => "SHA3-224",
            Instance::Sha3_256 => "SHA3-256",
            Instance::Sha3_384 => "SHA3-384",
            Instance::Sha3_512 => "SHA3-512",
            Instance::Shake128 => "SHAKE128",
            Instance::Shake256 => "SHAKE256",
        }
    }

    /// Rate in bytes.
    pub const fn rate(self) -> usize {
        match self {
            Instance::Sha3_224 => SHA3_224_RATE,
            Instance::Sha3_256 => SHA3_256_RATE,
            Instance::Sha3_384 => SHA3_384_RATE,
            Instance::Sha3_512 => SHA3_512_RATE,
            Instance::Shake128 => SHAKE128_RATE,
            Instance::Shake256 => SHAKE256_RATE,
        }
    }

    /// Capacity in bytes.
    pub const fn capacity(self) -> usize {
        STATE_BYTES - self.rate()
    }

    /// Domain-separation byte.
    pub const fn dsbyte(self) -> u8 {
        if self.is_extendable() {
            SHAKE_DSBYTE
        } else {
            SHA3_DSBYTE
        }
    }

    /// Whether this is a SHAKE function.
    pub const fn is_extendable(self) -> bool {
        matches!(self, Instance::Shake128 | Instance::Shake256)
    }

    /// Digest length in bytes for SHA3 functions, `None` for SHAKE.
    pub const fn output_len(self) -> Option<usize> {
        if self.is_extendable() {
            None
        } else {
            Some(self.capacity() / 2)
        }
    }

    /// Security strength in bits (`capacity * 4`).
    pub const fn security_bits(self) -> usize {
        self.capacity() * 4
    }

    /// A fresh sponge for this instance.
    pub const fn sponge(self) -> Sponge {
        Sponge::with_rate(self.rate(), self.dsbyte())
    }

    /// A fresh fixed-output hash, or `None` for SHAKE.
    pub fn sha3(self) -> Option<Sha3> {
        (!self.is_extendable()).then(|| Sha3::from_sponge(self.sponge()))
    }

    /// A fresh extendable-output hash, or `None` for SHA3.
    pub fn shake(self) -> Option<Shake> {
        self.is_extendable()
            .then(|| Shake::from_sponge(self.sponge()))
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Instance {
    type Err = ErrorCode;

    /// Accepts `SHA3-256`, `sha3_256`, `sha3256`, `SHAKE128`, `shake-128`, ...
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "sha3224" => Ok(Instance::Sha3_224),
            "sha3256" => Ok(Instance::Sha3_256),
            "sha3384" => Ok(Instance::Sha3_384),
            "sha3512" => Ok(Instance::Sha3_512),
            "shake128" => Ok(Instance::Shake128),
            "shake256" => Ok(Instance::Shake256),
            _ => Err(ErrorCode::UnknownFunction(s.to_string())),
        }
    }
}

impl TryFrom<String> for Instance {
    type Error = ErrorCode;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Instance> for String {
    fn from(instance: Instance) -> Self {
        instance.name().to_string()
    }
}

/// SHA3-224.
pub fn sha3_224() -> Sha3 {
    Sha3::from_sponge(Instance::Sha3_224.sponge())
}

/// SHA3-256.
pub fn sha3_256() -> Sha3 {
    Sha3::from_sponge(Instance::Sha3_256.sponge())
}

/// SHA3-384.
pub fn sha3_384() -> Sha3 {
    Sha3::from_sponge(Instance::Sha3_384.sponge())
}

/// SHA3-512.
pub fn sha3_512() -> Sha3 {
    Sha3::from_sponge(Instance::Sha3_512.sponge())
}

/// SHAKE128.
pub fn shake128() -> Shake {
    Shake::from_sponge(Instance::Shake128.sponge())
}

/// SHAKE256.
pub fn shake256() -> Shake {
    Shake::from_sponge(Instance::Shake256.sponge())
}

/// SHAKE-style sponge (dsbyte `0x1f`) with a caller-chosen rate.
pub fn shake_x(rate: usize) -> Fips202Result<Shake> {
    Shake::new(rate, SHAKE_DSBYTE)
}

fn fixed_digest<const N: usize>(mut hash: Sha3, data: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    hash.update(data).digest_into(&mut out);
    out
}

/// SHA3-224(data) -> 28 bytes.
pub fn sha3_224_digest(data: impl AsRef<[u8]>) -> [u8; 28] {
    fixed_digest(sha3_224(), data.as_ref())
}

/// SHA3-256(data) -> 32 bytes.
pub fn sha3_256_digest(data: impl AsRef<[u8]>) -> [u8; 32] {
    fixed_digest(sha3_256(), data.as_ref())
}

/// SHA3-384(data) -> 48 bytes.
pub fn sha3_384_digest(data: impl AsRef<[u8]>) -> [u8; 48] {
    fixed_digest(sha3_384(), data.as_ref())
}

/// SHA3-512(data) -> 64 bytes.
pub fn sha3_512_digest(data: impl AsRef<[u8]>) -> [u8; 64] {
    fixed_digest(sha3_512(), data.as_ref())
}

/// SHAKE128(data, n).
pub fn shake128_digest(data: impl AsRef<[u8]>, n: usize) -> Vec<u8> {
    shake128().update(data).digest(n)
}

/// SHAKE256(data, n).
pub fn shake256_digest(data: impl AsRef<[u8]>, n: usize) -> Vec<u8> {
    shake256().update(data).digest(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_rates() {
        assert_eq!(SHA3_224_RATE, 144);
        assert_eq!(SHA3_256_RATE, 136);
        assert_eq!(SHA3_384_RATE, 104);
        assert_eq!(SHA3_512_RATE, 72);
        assert_eq!(SHAKE128_RATE, 168);
        assert_eq!(SHAKE256_RATE, 136);
    }

    #[test]
    fn test_rate_plus_capacity_is_state_size() {
        for instance in Instance::ALL {
            assert_eq!(instance.rate() + instance.capacity(), STATE_BYTES);
        }
    }

    #[test]
    fn test_instance_metadata() {
        assert_eq!(Instance::Sha3_384.output_len(), Some(48));
        assert_eq!(Instance::Shake256.output_len(), None);
        assert_eq!(Instance::Shake128.security_bits(), 128);
        assert_eq!(Instance::Sha3_512.security_bits(), 512);
        assert_eq!(Instance::Sha3_224.dsbyte(), 0x06);
        assert_eq!(Instance::Shake256.dsbyte(), 0x1f);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("SHA3-256".parse::<Instance>().unwrap(), Instance::Sha3_256);
        assert_eq!("sha3_512".parse::<Instance>().unwrap(), Instance::Sha3_512);
        assert_eq!("Shake-128".parse::<Instance>().unwrap(), Instance::Shake128);
        assert_eq!(
            "SHA-256".parse::<Instance>().unwrap_err(),
            ErrorCode::UnknownFunction("SHA-256".to_string())
        );
        for instance in Instance::ALL {
            assert_eq!(instance.name().parse::<Instance>().unwrap(), instance);
        }
    }

    #[test]
    fn test_family_accessors() {
        assert!(Instance::Sha3_256.sha3().is_some());
        assert!(Instance::Sha3_256.shake().is_none());
        assert!(Instance::Shake256.shake().is_some());
        assert!(Instance::Shake256.sha3().is_none());
    }

    #[test]
    fn test_constructors_are_independent() {
        let mut a = sha3_256();
        let mut b = sha3_256();
        a.update(b"abc");
        assert_ne!(a.digest(), b.digest());
    }

    #[test]
    fn test_shake_x_validates_rate() {
        assert!(shake_x(168).is_ok());
        assert_eq!(
            shake_x(200).unwrap_err(),
            ErrorCode::InvalidParameter { rate: 200 }
        );
    }

    #[test]
    fn test_one_shot_matches_streaming() {
        assert_eq!(
            sha3_256_digest(b"abc").to_vec(),
            sha3_256().update(b"abc").digest()
        );
        assert_eq!(shake128_digest(b"abc", 40), shake128().update(b"abc").digest(40));
    }

    #[test]
    fn test_serde_uses_canonical_name() {
        let json = serde_json::to_string(&Instance::Shake128).unwrap();
        assert_eq!(json, "\"SHAKE128\"");
        let back: Instance = serde_json::from_str("\"sha3-384\"").unwrap();
        assert_eq!(back, Instance::Sha3_384);
    }
}
