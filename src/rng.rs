//! A deterministic RFC 6979 HMAC-SHA256 byte generator.
//!
//! This is the same construction libsecp256k1 exposes internally as
//! `secp256k1_rfc6979_hmac_sha256`: an HMAC-DRBG (RFC 6979 §3.2, steps b-g) seeded once
//! from a 32-byte seed and then queried for arbitrarily many bytes across calls to
//! [`Rfc6979HmacSha256::generate`]. It is not the full RFC 6979 "k" derivation (that also
//! folds in the message and private key); here the seed is supplied by the caller, who is
//! responsible for mixing in whatever uniqueness the surrounding protocol requires.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

type HmacSha256 = Hmac<Sha256>;

/// Deterministic byte generator used to derive per-cosigner nonces from a session seed.
#[derive(ZeroizeOnDrop)]
pub struct Rfc6979HmacSha256 {
    v: [u8; 32],
    k: [u8; 32],
    retry: bool,
}

impl Rfc6979HmacSha256 {
    /// Initialize the DRBG from a 32-byte seed.
    pub fn initialize(seed: &[u8; 32]) -> Self {
        let mut k = [0x00u8; 32];
        let mut v = [0x01u8; 32];

        let mut mac = HmacSha256::new_from_slice(&k).expect("HMAC accepts any key length");
        mac.update(&v);
        mac.update(&[0x00]);
        mac.update(seed);
        k = mac.finalize().into_bytes().into();

        let mut mac = HmacSha256::new_from_slice(&k).expect("HMAC accepts any key length");
        mac.update(&v);
        v = mac.finalize().into_bytes().into();

        let mut mac = HmacSha256::new_from_slice(&k).expect("HMAC accepts any key length");
        mac.update(&v);
        mac.update(&[0x01]);
        mac.update(seed);
        k = mac.finalize().into_bytes().into();

        let mut mac = HmacSha256::new_from_slice(&k).expect("HMAC accepts any key length");
        mac.update(&v);
        v = mac.finalize().into_bytes().into();

        Self { v, k, retry: false }
    }

    /// Fill `out` with deterministic pseudo-random bytes. May be called repeatedly;
    /// each call continues the same HMAC-DRBG stream.
    pub fn generate(&mut self, out: &mut [u8]) {
        if self.retry {
            let mut mac =
                HmacSha256::new_from_slice(&self.k).expect("HMAC accepts any key length");
            mac.update(&self.v);
            mac.update(&[0x00]);
            self.k = mac.finalize().into_bytes().into();

            let mut mac =
                HmacSha256::new_from_slice(&self.k).expect("HMAC accepts any key length");
            mac.update(&self.v);
            self.v = mac.finalize().into_bytes().into();
        }

        let mut filled = 0;
        while filled < out.len() {
            let mut mac =
                HmacSha256::new_from_slice(&self.k).expect("HMAC accepts any key length");
            mac.update(&self.v);
            self.v = mac.finalize().into_bytes().into();

            let take = (out.len() - filled).min(self.v.len());
            out[filled..filled + take].copy_from_slice(&self.v[..take]);
            filled += take;
        }

        self.retry = true;
    }

    /// Wipe internal state. Also runs automatically on `Drop`.
    pub fn finalize(mut self) {
        self.v.zeroize();
        self.k.zeroize();
    }
}
