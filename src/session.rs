//! The aggregate signing session: per-cosigner nonce lifecycle, combined public nonce
//! accumulation, and partial signature production.

use core::ops::Neg;

use tracing::{debug, trace};
use zeroize::Zeroize;

use crate::backend::{self, PointJacobian, ScalarValue};
use crate::error::{Error, Result};
use crate::nonce;
use crate::pubkey::PublicKey;
use crate::rng::Rfc6979HmacSha256;
use crate::sighash;
use crate::types::{NonceState, PartialSignature};

/// Holds per-cosigner state for one aggregate signing round.
///
/// `N` is fixed for the session's lifetime. `R_sum` always equals the sum of the
/// public points of every slot whose state is `Ours` or `Signed`, except that
/// [`AggregateSession::combine`]-equivalent callers (see [`crate::combine::combine`])
/// may negate it in place after all signing is complete — callers must not call
/// [`AggregateSession::generate_nonce`] again after that point.
pub struct AggregateSession {
    pubkeys: Vec<PointJacobian>,
    states: Vec<NonceState>,
    secnonces: Vec<ScalarValue>,
    pubnonce_sum: PointJacobian,
    rng: Rfc6979HmacSha256,
}

impl AggregateSession {
    /// Create a session for the given ordered cosigner set, seeded deterministically
    /// from `seed`. `pubkeys` must be non-empty.
    pub fn create(pubkeys: &[PublicKey], seed: &[u8; 32]) -> Result<Self> {
        if pubkeys.is_empty() {
            return Err(Error::NoCosigners);
        }

        let n = pubkeys.len();
        debug!(cosigners = n, "creating aggregate session");

        Ok(Self {
            pubkeys: pubkeys.iter().map(PublicKey::to_point).collect(),
            states: vec![NonceState::Unknown; n],
            secnonces: vec![ScalarValue::default(); n],
            pubnonce_sum: backend::infinity(),
            rng: Rfc6979HmacSha256::initialize(seed),
        })
    }

    /// Number of cosigners in this session.
    pub fn len(&self) -> usize {
        self.pubkeys.len()
    }

    /// Whether this session has zero cosigners. Always `false` for a session built
    /// through [`AggregateSession::create`], which rejects an empty set.
    pub fn is_empty(&self) -> bool {
        self.pubkeys.is_empty()
    }

    /// Current nonce lifecycle state for cosigner `index`.
    pub fn state(&self, index: usize) -> Result<NonceState> {
        self.states
            .get(index)
            .copied()
            .ok_or(Error::IndexOutOfRange { index, len: self.len() })
    }

    /// The combined public nonce accumulated so far, in Jacobian form.
    pub fn pubnonce_sum(&self) -> PointJacobian {
        self.pubnonce_sum
    }

    /// The ordered cosigner public keys this session was created with.
    pub fn pubkeys(&self) -> &[PointJacobian] {
        &self.pubkeys
    }

    /// Generate a nonce for cosigner `index`. Requires `state[index] == Unknown`.
    /// Adds the new public nonce into the running `R_sum` and transitions the slot
    /// to `Ours`.
    pub fn generate_nonce(&mut self, index: usize) -> Result<()> {
        if index >= self.len() {
            return Err(Error::IndexOutOfRange { index, len: self.len() });
        }
        if self.states[index] != NonceState::Unknown {
            return Err(Error::NonceAlreadyGenerated(index));
        }

        let generated = nonce::generate_nonce(&mut self.rng);
        self.pubnonce_sum = backend::point_add(&self.pubnonce_sum, &generated.public);
        self.secnonces[index] = generated.secret;
        self.states[index] = NonceState::Ours;

        trace!(index, "generated nonce");
        Ok(())
    }

    /// Produce cosigner `index`'s partial signature over `msg32` using secret key
    /// `sk`. Requires `state[index] == Ours` and every other slot to be at least
    /// `Ours`/`Signed` (i.e. no slot left `Unknown`) so that `R_sum` is final.
    /// Transitions `state[index]` to `Signed` on success.
    pub fn partial_sign(
        &mut self,
        index: usize,
        msg32: &[u8; 32],
        sk: &[u8; 32],
    ) -> Result<PartialSignature> {
        if index >= self.len() {
            return Err(Error::IndexOutOfRange { index, len: self.len() });
        }
        if self.states.iter().any(|s| *s == NonceState::Unknown) {
            return Err(Error::NotReadyToSign(index));
        }
        if self.states[index] != NonceState::Ours {
            return Err(Error::NotReadyToSign(index));
        }

        // If the combined nonce has the wrong sign, flip our secret nonce in place.
        // Every cosigner does this independently; combine() negates R_sum itself to
        // match.
        if !backend::has_quadratic_residue_y(&self.pubnonce_sum) {
            self.secnonces[index] = self.secnonces[index].neg();
        }
        let normalized_sum = if backend::has_quadratic_residue_y(&self.pubnonce_sum) {
            self.pubnonce_sum
        } else {
            backend::point_negate(&self.pubnonce_sum)
        };

        let r_x = backend::field_to_be_bytes(&backend::to_affine(&normalized_sum).x);
        let prehash = sighash::compute_prehash(&self.pubkeys, &r_x, msg32);
        let e_i = sighash::compute_sighash(&prehash, index)?;
        let e_i = backend::scalar_from_be_bytes(&e_i).map_err(|_| Error::SighashOverflow)?;

        let mut sk_scalar = backend::scalar_from_be_bytes(sk)?;
        let mut s_i = sk_scalar * e_i;
        s_i = s_i + self.secnonces[index];
        backend::wipe_scalar(&mut sk_scalar);

        self.states[index] = NonceState::Signed;
        trace!(index, "produced partial signature");

        Ok(PartialSignature(backend::scalar_to_be_bytes(&s_i)))
    }
}

impl Drop for AggregateSession {
    fn drop(&mut self) {
        for scalar in &mut self.secnonces {
            backend::wipe_scalar(scalar);
        }
        self.states.zeroize();
    }
}

impl Zeroize for NonceState {
    fn zeroize(&mut self) {
        *self = NonceState::Unknown;
    }
}
