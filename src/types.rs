//! Wire types: [`Signature`], [`PartialSignature`] and the [`NonceState`] lifecycle enum.

use std::fmt;

use zeroize::Zeroize;

/// A complete aggregate or single-party signature: 64 bytes, `s || R.x`, both
/// big-endian. `R.y` is never stored; it is always the quadratic-residue root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature(pub [u8; 64]);

impl Signature {
    /// Build a signature from its two 32-byte halves.
    pub const fn from_parts(s: [u8; 32], r_x: [u8; 32]) -> Self {
        let mut bytes = [0u8; 64];
        let mut i = 0;
        while i < 32 {
            bytes[i] = s[i];
            bytes[32 + i] = r_x[i];
            i += 1;
        }
        Self(bytes)
    }

    /// The `s` scalar half, big-endian.
    pub fn s(&self) -> [u8; 32] {
        self.0[0..32].try_into().expect("fixed-size slice")
    }

    /// The `R.x` field element half, big-endian.
    pub fn r_x(&self) -> [u8; 32] {
        self.0[32..64].try_into().expect("fixed-size slice")
    }

    /// Raw 64-byte wire form.
    pub const fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }
}

impl From<[u8; 64]> for Signature {
    fn from(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// One cosigner's contribution to an aggregate signature: a 32-byte scalar share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Zeroize)]
pub struct PartialSignature(pub [u8; 32]);

impl PartialSignature {
    /// Raw 32-byte wire form.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl From<[u8; 32]> for PartialSignature {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

/// Per-cosigner nonce lifecycle state, mirroring `enum nonce_progress` in the
/// original `aggsig` module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NonceState {
    /// No nonce recorded for this slot.
    Unknown,
    /// Reserved for a nonce contributed externally by another party. No code path in
    /// this crate transitions into this state; it exists for forward compatibility
    /// with the original protocol, which defines but never uses it.
    Other,
    /// We generated a nonce for this slot and have not yet signed with it.
    Ours,
    /// We produced a partial signature with this slot's nonce; it must never be
    /// reused.
    Signed,
}
