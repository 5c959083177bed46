//! Thin adapter over the secp256k1 arithmetic backend.
//!
//! Everything in this module is a direct wrapper around `libsecp256k1::curve` types.
//! None of it performs protocol logic; it exists so the rest of the crate can be written
//! against names that match the original `aggsig` C module (`Scalar`, `FieldElement`,
//! `PointAffine`, `PointJacobian`, `ecmult_gen`, `has_quadratic_residue_y`, ...) instead of
//! against the backend crate's own naming directly.

use core::ops::Neg;

use libsecp256k1::curve::{Affine, Field, Jacobian, Scalar, ECMULT_CONTEXT, ECMULT_GEN_CONTEXT};
use zeroize::Zeroize;

use crate::error::{Error, Result};

/// A scalar mod the curve order `n`. Thin newtype so call sites read like the spec.
pub type ScalarValue = Scalar;

/// A field element mod the curve prime `p`.
pub type FieldElement = Field;

/// A curve point in affine coordinates.
pub type PointAffine = Affine;

/// A curve point in Jacobian (projective) coordinates.
pub type PointJacobian = Jacobian;

/// Parse a big-endian 32-byte buffer as a scalar, rejecting non-canonical encodings
/// (value >= curve order).
pub fn scalar_from_be_bytes(bytes: &[u8; 32]) -> Result<ScalarValue> {
    let mut scalar = ScalarValue::default();
    let overflowed = bool::from(scalar.set_b32(bytes));
    if overflowed {
        return Err(Error::ScalarOverflow);
    }
    Ok(scalar)
}

/// Serialize a scalar as 32 big-endian bytes.
pub fn scalar_to_be_bytes(scalar: &ScalarValue) -> [u8; 32] {
    scalar.b32()
}

/// Parse a big-endian 32-byte buffer as a field element, rejecting non-canonical
/// encodings (value >= field prime).
pub fn field_from_be_bytes(bytes: &[u8; 32]) -> Result<FieldElement> {
    let mut fe = FieldElement::default();
    if !fe.set_b32(bytes) {
        return Err(Error::FieldOverflow);
    }
    fe.normalize();
    Ok(fe)
}

/// Serialize a (normalized) field element as 32 big-endian bytes.
pub fn field_to_be_bytes(fe: &FieldElement) -> [u8; 32] {
    let mut fe = *fe;
    fe.normalize_var();
    fe.b32()
}

/// `k * G`, the generator-multiplication primitive the nonce generator and fast
/// path both need.
pub fn ecmult_gen(k: &ScalarValue) -> PointJacobian {
    let mut result = PointJacobian::default();
    ECMULT_GEN_CONTEXT.ecmult_gen(&mut result, k);
    result
}

/// `na * a + ng * G`, the single-point multiply-and-add primitive used to build the
/// naive multi-scalar accumulator in `verify`.
pub fn ecmult(a: &PointJacobian, na: &ScalarValue, ng: &ScalarValue) -> PointJacobian {
    let mut result = PointJacobian::default();
    ECMULT_CONTEXT.ecmult(&mut result, a, na, ng);
    result
}

/// Add two points (at least one non-infinity) together.
pub fn point_add(a: &PointJacobian, b: &PointJacobian) -> PointJacobian {
    let mut result = PointJacobian::default();
    result.set_infinity();
    result = result.add_var(a, None);
    result.add_var(b, None)
}

/// Negate a point in place.
pub fn point_negate(p: &PointJacobian) -> PointJacobian {
    p.neg()
}

/// The point at infinity.
pub fn infinity() -> PointJacobian {
    let mut p = PointJacobian::default();
    p.set_infinity();
    p
}

/// Whether a Jacobian point's affine Y coordinate is a quadratic residue mod p.
///
/// This is the sign-canonicalization check the whole scheme hinges on: every nonce
/// point and the final aggregate nonce always carry a quadratic-residue Y, with the
/// matching scalar sign flip applied wherever the point's sign is flipped.
pub fn has_quadratic_residue_y(p: &PointJacobian) -> bool {
    p.has_quad_y_var()
}

/// Recover the unique affine point with the given `x` whose `y` is a quadratic
/// residue mod p ("`set_xquad`" in the original module).
pub fn affine_from_x_quad(x: &FieldElement) -> Option<PointAffine> {
    let mut affine = PointAffine::default();
    if !affine.set_xquad(x) {
        return None;
    }
    Some(affine)
}

/// Convert a Jacobian point to normalized affine form.
pub fn to_affine(p: &PointJacobian) -> PointAffine {
    let mut affine = PointAffine::from_gej(p);
    affine.x.normalize();
    affine.y.normalize();
    affine
}

/// Serialize a point (given in Jacobian form) in 33-byte SEC1 compressed form,
/// `{0x02|0x03} || x`. Used for everything that needs to serialize a public key or
/// a public nonce before hashing it.
pub fn serialize_compressed(p: &PointJacobian) -> [u8; 33] {
    let affine = to_affine(p);
    let mut out = [0u8; 33];
    out[0] = if affine.y.is_odd() { 0x03 } else { 0x02 };
    out[1..].copy_from_slice(&affine.x.b32());
    out
}

/// Zeroize a scalar buffer. `Scalar` does not itself implement `Zeroize` (it's a
/// backend type we don't own), so secret scalars are wiped through their byte form.
pub fn wipe_scalar(scalar: &mut ScalarValue) {
    let mut bytes = scalar.b32();
    bytes.zeroize();
    let _ = scalar.set_b32(&bytes);
    *scalar = ScalarValue::default();
}
