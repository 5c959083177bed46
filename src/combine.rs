//! The combiner (§4.4): sum partial signatures into a complete 64-byte signature.

use tracing::{debug, trace};

use crate::backend;
use crate::error::{Error, Result};
use crate::session::AggregateSession;
use crate::types::{PartialSignature, Signature};

/// Sum `partials` (one per cosigner, in the same order the session was created with)
/// into a complete signature over the session's accumulated `R_sum`.
///
/// `partials.len()` must equal `session.len()`. The combined `s = sum(s_i)` needs no
/// further sign adjustment: each cosigner already flipped their own `s_i` (and the
/// session's running `R_sum`) during [`AggregateSession::partial_sign`], so `R_sum` as
/// held by the session is already the quadratic-residue-Y point this signature binds to.
pub fn combine(session: &AggregateSession, partials: &[PartialSignature]) -> Result<Signature> {
    if partials.len() != session.len() {
        debug!(
            expected = session.len(),
            actual = partials.len(),
            "combine: partial count mismatch"
        );
        return Err(Error::PartialCountMismatch {
            expected: session.len(),
            actual: partials.len(),
        });
    }
    trace!(cosigners = session.len(), "combining partial signatures");

    let mut s = backend::ScalarValue::default();
    for partial in partials {
        let s_i = backend::scalar_from_be_bytes(partial.as_bytes())?;
        s = s + s_i;
    }

    let normalized_sum = if backend::has_quadratic_residue_y(&session.pubnonce_sum()) {
        session.pubnonce_sum()
    } else {
        backend::point_negate(&session.pubnonce_sum())
    };
    let r_x = backend::field_to_be_bytes(&backend::to_affine(&normalized_sum).x);

    Ok(Signature::from_parts(backend::scalar_to_be_bytes(&s), r_x))
}
