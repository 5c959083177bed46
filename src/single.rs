//! Single-party fast path (§4.6): sign without standing up a full [`AggregateSession`]
//! for the `N == 1` case.

use core::ops::Neg;

use sha2::{Digest, Sha256};

use crate::backend::{self, ScalarValue};
use crate::error::Result;
use crate::rng::Rfc6979HmacSha256;
use crate::sighash;
use crate::types::Signature;

/// Wraps a secret scalar so it is wiped via [`backend::wipe_scalar`] on every exit
/// path — success or an early `?` return alike — instead of needing an explicit wipe
/// at each return site.
struct SecretScalar(ScalarValue);

impl Drop for SecretScalar {
    fn drop(&mut self) {
        backend::wipe_scalar(&mut self.0);
    }
}

/// Sign `msg32` with secret key `sk32`.
///
/// If `secnonce` is `Some`, it is used as the secret nonce directly (the caller is
/// responsible for never reusing it). Otherwise a nonce is derived deterministically
/// from `sk32`, `msg32` and `seed` via the same RFC 6979 construction the aggregate
/// session uses, so repeated calls with identical inputs always produce the identical
/// signature.
///
/// `r_assoc`, if given, is the public nonce the sighash is computed against instead of
/// this call's own `R = k*G` — the half-aggregate / externally-coordinated flow, where
/// `k` is only this party's share of some larger combined nonce supplied by the
/// surrounding protocol. The emitted signature still carries this call's own `R.x`, not
/// `r_assoc`'s; only the challenge binds to `r_assoc`.
pub fn sign(
    msg32: &[u8; 32],
    sk32: &[u8; 32],
    secnonce: Option<[u8; 32]>,
    seed: &[u8; 32],
) -> Result<Signature> {
    sign_with_assoc_nonce(msg32, sk32, secnonce, None, seed)
}

/// As [`sign`], but for the half-aggregate flow: the sighash is taken over `r_assoc`
/// (a 33-byte compressed public nonce, e.g. a combined nonce supplied by a larger
/// aggregation protocol) instead of this call's own `k*G`, per §4.6.
pub fn sign_with_assoc_nonce(
    msg32: &[u8; 32],
    sk32: &[u8; 32],
    secnonce: Option<[u8; 32]>,
    r_assoc: Option<&[u8; 33]>,
    seed: &[u8; 32],
) -> Result<Signature> {
    let mut k = SecretScalar(match secnonce {
        Some(bytes) => backend::scalar_from_be_bytes(&bytes)?,
        None => derive_nonce(sk32, msg32, seed)?,
    });

    let mut public = backend::ecmult_gen(&k.0);
    if !backend::has_quadratic_residue_y(&public) {
        k.0 = k.0.neg();
        public = backend::point_negate(&public);
    }
    // Re-check after the flip: a caller-supplied `secnonce` reaches this point having
    // skipped the derivation path entirely, so this second check is the only one that
    // ever runs for it. Keeping it unconditional (rather than only on the `Some` arm)
    // matches the original module, which checks the sign of R both before and after
    // negation regardless of where the nonce came from.
    debug_assert!(backend::has_quadratic_residue_y(&public));

    let e = match r_assoc {
        Some(compressed) => sighash::sighash_single_compressed(compressed, msg32)?,
        None => sighash::sighash_single(&public, msg32)?,
    };
    let e = backend::scalar_from_be_bytes(&e)?;

    let mut sk_scalar = backend::scalar_from_be_bytes(sk32)?;
    let mut s = sk_scalar * e;
    s = s + k.0;
    backend::wipe_scalar(&mut sk_scalar);
    // `k` is wiped by its own `Drop` impl when it goes out of scope here, which also
    // covers every early `?` return above.

    let r_x = backend::field_to_be_bytes(&backend::to_affine(&public).x);
    Ok(Signature::from_parts(backend::scalar_to_be_bytes(&s), r_x))
}

fn derive_nonce(sk32: &[u8; 32], msg32: &[u8; 32], seed: &[u8; 32]) -> Result<ScalarValue> {
    let mut hasher = Sha256::new();
    hasher.update(sk32);
    hasher.update(msg32);
    hasher.update(seed);
    let derived_seed: [u8; 32] = hasher.finalize().into();

    let mut rng = Rfc6979HmacSha256::initialize(&derived_seed);
    loop {
        let mut data = [0u8; 32];
        rng.generate(&mut data);
        let candidate = backend::scalar_from_be_bytes(&data);
        data.fill(0);
        if let Ok(scalar) = candidate {
            if !bool::from(scalar.is_zero()) {
                return Ok(scalar);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signing_is_deterministic_for_same_inputs() {
        let sk = [0x33u8; 32];
        let msg = [0x44u8; 32];
        let seed = [0x55u8; 32];
        let a = sign(&msg, &sk, None, &seed).unwrap();
        let b = sign(&msg, &sk, None, &seed).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn signing_with_explicit_secnonce_uses_it() {
        let sk = [0x33u8; 32];
        let msg = [0x44u8; 32];
        let nonce = [0x01u8; 32];
        let sig = sign(&msg, &sk, Some(nonce), &[0u8; 32]).unwrap();
        assert_eq!(sig.as_bytes().len(), 64);
    }

    #[test]
    fn different_messages_yield_different_signatures() {
        let sk = [0x33u8; 32];
        let seed = [0x55u8; 32];
        let a = sign(&[0x01u8; 32], &sk, None, &seed).unwrap();
        let b = sign(&[0x02u8; 32], &sk, None, &seed).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn assoc_nonce_changes_the_challenge_but_not_the_stored_r_x() {
        let sk = [0x33u8; 32];
        let msg = [0x44u8; 32];
        let seed = [0x55u8; 32];

        let plain = sign(&msg, &sk, None, &seed).unwrap();

        let other_k = backend::scalar_from_be_bytes(&[0x66u8; 32]).unwrap();
        let other_r = backend::ecmult_gen(&other_k);
        let r_assoc = backend::serialize_compressed(&other_r);
        let assoc = sign_with_assoc_nonce(&msg, &sk, None, Some(&r_assoc), &seed).unwrap();

        // R.x is always this call's own nonce point, regardless of r_assoc.
        assert_eq!(assoc.r_x(), plain.r_x());
        // but s differs, since the challenge was computed over a different point.
        assert_ne!(assoc.s(), plain.s());
    }
}
