//! Nonce generation (§4.2): draw a secret scalar and its quadratic-residue-Y public point.

use core::ops::Neg;

use crate::backend::{self, PointJacobian, ScalarValue};
use crate::rng::Rfc6979HmacSha256;

/// A freshly generated nonce pair. `public` always has a quadratic-residue Y;
/// `secret` is never zero.
pub struct GeneratedNonce {
    /// the secret scalar `k`
    pub secret: ScalarValue,
    /// the public point `K = k*G`, sign-normalized
    pub public: PointJacobian,
}

/// Draw `(k, K)` from `rng`, retrying on overflow or a zero scalar (cryptographically
/// unreachable, but the loop is kept to match the backend's own contract), then flip
/// the sign of both `k` and `K` together if `K.y` is not a quadratic residue.
pub fn generate_nonce(rng: &mut Rfc6979HmacSha256) -> GeneratedNonce {
    let mut secret;
    loop {
        let mut data = [0u8; 32];
        rng.generate(&mut data);
        let candidate = backend::scalar_from_be_bytes(&data);
        data.fill(0);

        match candidate {
            Ok(scalar) if !bool::from(scalar.is_zero()) => {
                secret = scalar;
                break;
            }
            _ => continue,
        }
    }

    let mut public = backend::ecmult_gen(&secret);
    if !backend::has_quadratic_residue_y(&public) {
        secret = secret.neg();
        public = backend::point_negate(&public);
    }

    GeneratedNonce { secret, public }
}
