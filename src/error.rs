//! Error type for aggregate Schnorr (`aggsig`) operations.

use thiserror::Error;

/// Result type alias used throughout this crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Every failure mode the `aggsig` core can produce.
///
/// The module intentionally exposes only two outcomes per operation: success, or one of
/// these variants. There are no partial failures that leave a session in a broken state —
/// state transitions only ever apply on the success path.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// A cosigner set of size zero was supplied where at least one signer is required.
    #[error("no cosigners in set")]
    NoCosigners,

    /// `index` was not a valid slot in a session of `len` cosigners.
    #[error("cosigner index {index} out of range for {len} cosigners")]
    IndexOutOfRange {
        /// offending index
        index: usize,
        /// number of cosigners in the session
        len: usize,
    },

    /// The number of partial signatures handed to the combiner did not match the
    /// number of cosigners the session was created with.
    #[error("combine expected {expected} partial signatures, got {actual}")]
    PartialCountMismatch {
        /// number of cosigners in the session
        expected: usize,
        /// number of partials supplied
        actual: usize,
    },

    /// A 32-byte scalar encoding (secret key, partial signature, or sighash output)
    /// was not canonical: its big-endian integer value was >= the curve order `n`.
    #[error("scalar encoding is not canonical (>= curve order)")]
    ScalarOverflow,

    /// A 32-byte field element encoding (an `R.x` value) was not canonical: its
    /// big-endian integer value was >= the field prime `p`.
    #[error("field element encoding is not canonical (>= field prime)")]
    FieldOverflow,

    /// `generate_nonce` was called on a slot that was not in the `Unknown` state.
    #[error("nonce for cosigner {0} has already been generated")]
    NonceAlreadyGenerated(usize),

    /// `partial_sign` was called on a slot that was not in the `Ours` state, or was
    /// called while some other slot's nonce is still `Unknown`.
    #[error("cosigner {0} is not ready to partial-sign (nonce missing or already used)")]
    NotReadyToSign(usize),

    /// Sighash derivation produced a scalar >= the curve order. Cryptographically
    /// unreachable in practice, but surfaced as a failure per the aggsig contract.
    #[error("sighash derivation overflowed the curve order")]
    SighashOverflow,
}
