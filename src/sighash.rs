//! Sighash (challenge) derivation.
//!
//! Two related hashes: the single-signer sighash (§4.1, single-signer) used by the N=1
//! fast path, and the two-stage multi-signer sighash (prehash + per-index challenge) used
//! by the aggregate session, combiner and verifier.

use sha2::{Digest, Sha256};

use crate::backend::{self, PointJacobian};
use crate::error::{Error, Result};

/// `e = SHA256(serialize_compressed(R) || m) mod n`, rejecting overflow.
pub fn sighash_single(pubnonce: &PointJacobian, msg32: &[u8; 32]) -> Result<[u8; 32]> {
    sighash_single_compressed(&backend::serialize_compressed(pubnonce), msg32)
}

/// As [`sighash_single`], but taking an already-serialized 33-byte compressed nonce
/// directly — used when the challenge binds to an externally supplied point (e.g. the
/// half-aggregate flow's `R_assoc`, or a verifier's caller-supplied `pubnonce`) rather
/// than one derived from a `PointJacobian` this crate computed itself.
pub fn sighash_single_compressed(pubnonce33: &[u8; 33], msg32: &[u8; 32]) -> Result<[u8; 32]> {
    let mut hasher = Sha256::new();
    hasher.update(pubnonce33);
    hasher.update(msg32);
    let digest: [u8; 32] = hasher.finalize().into();

    let scalar = backend::scalar_from_be_bytes(&digest).map_err(|_| Error::SighashOverflow)?;
    Ok(backend::scalar_to_be_bytes(&scalar))
}

/// Hash shared by every per-index challenge in a given signing/verification round:
/// `SHA256(P_0 || ... || P_{n-1} || encode_fe32(r_x) || m)`.
///
/// `r_x` is passed as raw 32 big-endian bytes rather than a parsed field element: the
/// verifier computes this directly from the wire `R.x` before it ever needs `R.y`, and
/// the signer/combiner pass the normalized X of the (possibly just-negated) `R_sum`.
pub fn compute_prehash(pubkeys: &[PointJacobian], r_x: &[u8; 32], msg32: &[u8; 32]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for pubkey in pubkeys {
        hasher.update(backend::serialize_compressed(pubkey));
    }
    hasher.update(r_x);
    hasher.update(msg32);
    hasher.finalize().into()
}

/// `varint7(i)`: successive 7-bit little-endian limbs (low limb first), one byte each,
/// until `i` becomes zero. Emits nothing for `i == 0` — this is the property that makes
/// `e_0 == SHA256(prehash)` with no index prefix, and it must be preserved exactly.
fn varint7(mut index: usize) -> Vec<u8> {
    let mut bytes = Vec::new();
    while index > 0 {
        bytes.push((index & 0x7f) as u8);
        index >>= 7;
    }
    bytes
}

/// `e_i = SHA256(varint7(i) || prehash) mod n`, rejecting overflow.
pub fn compute_sighash(prehash: &[u8; 32], index: usize) -> Result<[u8; 32]> {
    let mut hasher = Sha256::new();
    hasher.update(varint7(index));
    hasher.update(prehash);
    let digest: [u8; 32] = hasher.finalize().into();

    let scalar = backend::scalar_from_be_bytes(&digest).map_err(|_| Error::SighashOverflow)?;
    Ok(backend::scalar_to_be_bytes(&scalar))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn varint7_zero_is_empty() {
        assert!(varint7(0).is_empty());
    }

    #[test]
    fn varint7_small_values_are_single_byte() {
        assert_eq!(varint7(1), vec![1]);
        assert_eq!(varint7(127), vec![127]);
    }

    #[test]
    fn varint7_large_value_spans_multiple_limbs() {
        // 128 = 0b1_0000000 -> low limb 0x00, high limb 0x01
        assert_eq!(varint7(128), vec![0x00, 0x01]);
    }

    #[test]
    fn index_zero_challenge_has_no_prefix() {
        let prehash = [0x11u8; 32];
        let e0 = compute_sighash(&prehash, 0).unwrap();

        let mut hasher = Sha256::new();
        hasher.update(prehash);
        let expected: [u8; 32] = hasher.finalize().into();

        // compute_sighash additionally reduces through scalar parsing, so compare via
        // the same reduction rather than raw digest bytes when the digest happens to
        // be non-canonical. For this fixed input it is canonical, so a direct compare
        // is valid.
        assert_eq!(e0, expected);
    }
}
