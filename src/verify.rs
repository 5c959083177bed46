//! Signature verification (§4.5): aggregate and single-party.

use tracing::{debug, trace};

use crate::backend;
use crate::error::{Error, Result};
use crate::pubkey::PublicKey;
use crate::scratch::ScratchSpace;
use crate::sighash;
use crate::types::Signature;

/// Verify an aggregate signature against the ordered cosigner set that produced it.
///
/// `pubkeys` must be in the same order used when the session was created: the
/// multi-signer sighash binds each cosigner's index, so a reordering that happens to
/// keep the same set of keys still fails to verify. Rejects an empty `pubkeys` (N=0).
///
/// Checks `s*G == R + sum(e_i * P_i)` via the naive multi-scalar accumulator
/// `Q = s*G - sum(e_i * P_i)`, then compares `Q.x` against the signature's stored
/// `R.x` and requires `Q.y` to be a quadratic residue — the latter is what makes the
/// comparison sound without reconstructing `R` itself, since a field element has at
/// most one quadratic-residue square root and the signing side always normalizes to it.
pub fn verify_aggregate(
    pubkeys: &[PublicKey],
    msg32: &[u8; 32],
    sig: &Signature,
    scratch: &mut ScratchSpace,
) -> Result<bool> {
    if pubkeys.is_empty() {
        return Err(Error::NoCosigners);
    }
    trace!(cosigners = pubkeys.len(), "verifying aggregate signature");

    let points: Vec<backend::PointJacobian> = pubkeys.iter().map(PublicKey::to_point).collect();
    let r_x = sig.r_x();
    // Reject a non-canonical R.x (>= field prime) up front, per the verifier contract,
    // even though the final Q.x comparison below would also fail on it.
    backend::field_from_be_bytes(&r_x)?;
    let prehash = sighash::compute_prehash(&points, &r_x, msg32);

    let challenges = scratch.challenges_buf(points.len());
    for index in 0..points.len() {
        let e_bytes = sighash::compute_sighash(&prehash, index)?;
        challenges.push(backend::scalar_from_be_bytes(&e_bytes)?);
    }

    let mut weighted_sum = backend::infinity();
    for (point, e_i) in points.iter().zip(challenges.iter()) {
        let zero = backend::ScalarValue::default();
        let term = backend::ecmult(point, e_i, &zero);
        weighted_sum = backend::point_add(&weighted_sum, &term);
    }

    let s = backend::scalar_from_be_bytes(&sig.s())?;
    let s_g = backend::ecmult_gen(&s);
    let q = backend::point_add(&s_g, &backend::point_negate(&weighted_sum));

    let accepted = points_match_rx(&q, &r_x);
    debug!(accepted, "aggregate verification result");
    Ok(accepted)
}

/// Verify a single-party signature (§4.5).
///
/// If `pubnonce` is supplied, the challenge is computed directly over it
/// (`e = SHA256(serialize_compressed(pubnonce) || m)`) — the half-aggregate flow,
/// where the challenge was bound to an externally coordinated nonce rather than the
/// signature's own `R.x`. Otherwise `R` is reconstructed from `R.x` by choosing the
/// quadratic-residue `Y` (`set_xquad`), which recovers a well-defined `e`.
///
/// Either way, the final check is unconditional: `Q = s*G - e*P` must land on `R.x`
/// with a quadratic-residue `Q.y`.
pub fn verify_single(
    pubkey: &PublicKey,
    msg32: &[u8; 32],
    sig: &Signature,
    pubnonce: Option<&PublicKey>,
) -> Result<bool> {
    let r_x = sig.r_x();
    let e = match pubnonce {
        Some(pubnonce) => sighash::sighash_single_compressed(pubnonce.as_bytes(), msg32)?,
        None => {
            let affine = backend::affine_from_x_quad(&backend::field_from_be_bytes(&r_x)?);
            let Some(affine) = affine else {
                return Ok(false);
            };
            let mut jacobian = backend::PointJacobian::default();
            jacobian.set_ge(&affine);
            sighash::sighash_single(&jacobian, msg32)?
        }
    };
    let e = backend::scalar_from_be_bytes(&e)?;

    let point = pubkey.to_point();
    let s = backend::scalar_from_be_bytes(&sig.s())?;
    let s_g = backend::ecmult_gen(&s);
    let e_p = backend::ecmult(&point, &e, &backend::ScalarValue::default());
    let q = backend::point_add(&s_g, &backend::point_negate(&e_p));

    Ok(points_match_rx(&q, &r_x))
}

fn points_match_rx(q: &backend::PointJacobian, r_x: &[u8; 32]) -> bool {
    if !backend::has_quadratic_residue_y(q) {
        return false;
    }
    backend::field_to_be_bytes(&backend::to_affine(q).x) == *r_x
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combine;
    use crate::session::AggregateSession;
    use crate::single;

    fn pubkey_for(sk: &[u8; 32]) -> PublicKey {
        let scalar = backend::scalar_from_be_bytes(sk).unwrap();
        let point = backend::ecmult_gen(&scalar);
        PublicKey::from_point(&point)
    }

    #[test]
    fn single_party_round_trip_verifies() {
        let sk = [0x42u8; 32];
        let pk = pubkey_for(&sk);
        let msg = [0x07u8; 32];
        let sig = single::sign(&msg, &sk, None, &[0x99; 32]).unwrap();

        assert!(verify_single(&pk, &msg, &sig, None).unwrap());
    }

    #[test]
    fn single_party_rejects_flipped_bit() {
        let sk = [0x42u8; 32];
        let pk = pubkey_for(&sk);
        let msg = [0x07u8; 32];
        let mut sig = single::sign(&msg, &sk, None, &[0x99; 32]).unwrap();
        let mut bytes = *sig.as_bytes();
        bytes[0] ^= 0x01;
        sig = Signature::from(bytes);

        assert!(!verify_single(&pk, &msg, &sig, None).unwrap());
    }

    #[test]
    fn aggregate_round_trip_verifies() {
        let pk0 = pubkey_for(&[0x11u8; 32]);
        let pk1 = pubkey_for(&[0x22u8; 32]);
        let mut session = AggregateSession::create(&[pk0, pk1], &[0xaa; 32]).unwrap();
        session.generate_nonce(0).unwrap();
        session.generate_nonce(1).unwrap();
        let msg = [0x02u8; 32];
        let p0 = session.partial_sign(0, &msg, &[0x11u8; 32]).unwrap();
        let p1 = session.partial_sign(1, &msg, &[0x22u8; 32]).unwrap();
        let sig = combine::combine(&session, &[p0, p1]).unwrap();

        let mut scratch = ScratchSpace::new();
        assert!(verify_aggregate(&[pk0, pk1], &msg, &sig, &mut scratch).unwrap());
    }

    #[test]
    fn aggregate_rejects_wrong_order() {
        let pk0 = pubkey_for(&[0x11u8; 32]);
        let pk1 = pubkey_for(&[0x22u8; 32]);
        let mut session = AggregateSession::create(&[pk0, pk1], &[0xaa; 32]).unwrap();
        session.generate_nonce(0).unwrap();
        session.generate_nonce(1).unwrap();
        let msg = [0x02u8; 32];
        let p0 = session.partial_sign(0, &msg, &[0x11u8; 32]).unwrap();
        let p1 = session.partial_sign(1, &msg, &[0x22u8; 32]).unwrap();
        let sig = combine::combine(&session, &[p0, p1]).unwrap();

        let mut scratch = ScratchSpace::new();
        assert!(!verify_aggregate(&[pk1, pk0], &msg, &sig, &mut scratch).unwrap());
    }

    #[test]
    fn aggregate_verify_rejects_empty_cosigner_set() {
        let sig = Signature::from([0u8; 64]);
        let mut scratch = ScratchSpace::new();
        let err = verify_aggregate(&[], &[0u8; 32], &sig, &mut scratch).unwrap_err();
        assert_eq!(err, crate::error::Error::NoCosigners);
    }

    #[test]
    fn aggregate_verify_rejects_non_canonical_r_x() {
        let pk0 = pubkey_for(&[0x11u8; 32]);
        // The field prime p = 2^256 - 2^32 - 977; 0xff.. is well above it.
        let bad_r_x = [0xffu8; 32];
        let sig = Signature::from_parts([0u8; 32], bad_r_x);
        let mut scratch = ScratchSpace::new();
        assert!(verify_aggregate(&[pk0], &[0u8; 32], &sig, &mut scratch).is_err());
    }
}
