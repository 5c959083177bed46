//! Public key type: a 33-byte compressed SEC1 point, with conversion to/from the
//! backend's Jacobian representation used internally by the rest of the crate.

use std::fmt;

use crate::backend::{self, PointJacobian};
use crate::error::{Error, Result};

/// A secp256k1 public key in 33-byte compressed form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublicKey([u8; 33]);

impl PublicKey {
    /// Wrap raw compressed bytes without validating them lie on the curve. Use
    /// [`PublicKey::from_point`] when building a key from a known-good point.
    pub const fn from_compressed_unchecked(bytes: [u8; 33]) -> Self {
        Self(bytes)
    }

    /// Derive the compressed public key for a point already known to be valid
    /// (e.g. the output of `k*G`).
    pub fn from_point(point: &PointJacobian) -> Self {
        Self(backend::serialize_compressed(point))
    }

    /// Derive the public key for a 32-byte big-endian secret key.
    pub fn from_secret_key(sk32: &[u8; 32]) -> Result<Self> {
        let scalar = backend::scalar_from_be_bytes(sk32)?;
        Ok(Self::from_point(&backend::ecmult_gen(&scalar)))
    }

    /// Parse the X coordinate and recover the quadratic-residue-Y point, i.e. the
    /// canonical key for a given X — used by tests that need a key whose only known
    /// coordinate is `X`.
    pub fn from_x_quad(x: &[u8; 32]) -> Result<Self> {
        let fe = backend::field_from_be_bytes(x)?;
        let affine = backend::affine_from_x_quad(&fe).ok_or(Error::FieldOverflow)?;
        let mut jacobian = backend::PointJacobian::default();
        jacobian.set_ge(&affine);
        Ok(Self::from_point(&jacobian))
    }

    /// Raw compressed bytes.
    pub const fn as_bytes(&self) -> &[u8; 33] {
        &self.0
    }

    /// Parse this key into the backend's Jacobian point representation.
    pub fn to_point(&self) -> PointJacobian {
        let mut affine = backend::PointAffine::default();
        let is_odd = self.0[0] == 0x03;
        let mut x = backend::FieldElement::default();
        let mut x_bytes = [0u8; 32];
        x_bytes.copy_from_slice(&self.0[1..]);
        x.set_b32(&x_bytes);
        affine.set_xo_var(&x, is_odd);
        let mut jacobian = backend::PointJacobian::default();
        jacobian.set_ge(&affine);
        jacobian
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}
