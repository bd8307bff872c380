//! Fixed-output (SHA3) and extendable-output (SHAKE) hash families.
//!
//! Both families are the same [`Sponge`] composed with an output policy:
//! [`Fixed`] squeezes `capacity / 2` bytes per call, [`Extendable`] squeezes
//! whatever the caller asks for. The policy is a zero-sized type parameter, so
//! dispatch is static and the sponge state machine stays in one type.
//!
//! Padding happens on the first extraction only. Later extractions continue
//! the same output stream rather than repeating it.

use crate::error::Fips202Result;
use crate::keccak::Sponge;
use base64::engine::general_purpose::URL_SAFE;
use base64::Engine as _;
use std::marker::PhantomData;

/// Output policy: `digest()` yields `capacity / 2` bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fixed;

/// Output policy: `digest(n)` yields `n` bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extendable;

/// A Keccak-based hash object parameterised by its output policy.
#[derive(Debug, Clone)]
pub struct KeccakHash<P> {
    sponge: Sponge,
    _policy: PhantomData<P>,
}

/// SHA3 fixed-output-length function.
pub type Sha3 = KeccakHash<Fixed>;

/// SHAKE variable-output-length function.
pub type Shake = KeccakHash<Extendable>;

impl<P> KeccakHash<P> {
    /// Create a hash object over a fresh sponge.
    ///
    /// Returns `InvalidParameter` unless `0 < rate < 200`.
    pub fn new(rate: usize, dsbyte: u8) -> Fips202Result<Self> {
        Sponge::new(rate, dsbyte).map(Self::from_sponge)
    }

    /// Wrap an existing sponge.
    pub fn from_sponge(sponge: Sponge) -> Self {
        Self {
            sponge,
            _policy: PhantomData,
        }
    }

    /// Create a hash object and absorb an initial message.
    pub fn with_data(rate: usize, dsbyte: u8, data: impl AsRef<[u8]>) -> Fips202Result<Self> {
        let mut hash = Self::new(rate, dsbyte)?;
        hash.update(data);
        Ok(hash)
    }

    /// Absorb more input. See [`Sponge::update`].
    pub fn update(&mut self, data: impl AsRef<[u8]>) -> &mut Self {
        self.sponge.update(data.as_ref());
        self
    }

    /// Rate in bytes.
    pub fn rate(&self) -> usize {
        self.sponge.rate()
    }

    /// Capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.sponge.capacity()
    }

    /// Domain-separation byte.
    pub fn dsbyte(&self) -> u8 {
        self.sponge.dsbyte()
    }

    /// The underlying sponge.
    pub fn sponge(&self) -> &Sponge {
        &self.sponge
    }

    /// Consume the hash object, returning the sponge.
    pub fn into_sponge(self) -> Sponge {
        self.sponge
    }

    fn extract_into(&mut self, out: &mut [u8]) {
        self.sponge.finalize();
        self.sponge.squeeze_into(out);
    }

    fn extract(&mut self, n: usize) -> Vec<u8> {
        let mut out = vec![0u8; n];
        self.extract_into(&mut out);
        out
    }
}

impl KeccakHash<Fixed> {
    /// Digest length in bytes, `(200 - rate) / 2`.
    pub fn output_len(&self) -> usize {
        self.sponge.capacity() / 2
    }

    /// Next `output_len()` bytes of output; pads on the first call only.
    pub fn digest(&mut self) -> Vec<u8> {
        let n = self.output_len();
        self.extract(n)
    }

    /// Fill `out` from the output stream. `out` may be any length.
    pub fn digest_into(&mut self, out: &mut [u8]) {
        self.extract_into(out);
    }

    /// [`digest`](Self::digest) as lowercase hex.
    pub fn hexdigest(&mut self) -> String {
        hex::encode(self.digest())
    }

    /// [`digest`](Self::digest) as URL-safe base64 (padded).
    pub fn b64digest(&mut self) -> String {
        URL_SAFE.encode(self.digest())
    }
}

impl KeccakHash<Extendable> {
    /// Next `n` bytes of output; pads on the first call only.
    pub fn digest(&mut self, n: usize) -> Vec<u8> {
        self.extract(n)
    }

    /// Fill `out` from the output stream.
    pub fn digest_into(&mut self, out: &mut [u8]) {
        self.extract_into(out);
    }

    /// [`digest`](Self::digest) as lowercase hex.
    pub fn hexdigest(&mut self, n: usize) -> String {
        hex::encode(self.digest(n))
    }

    /// [`digest`](Self::digest) as URL-safe base64 (padded).
    pub fn b64digest(&mut self, n: usize) -> String {
        URL_SAFE.encode(self.digest(n))
    }
}
