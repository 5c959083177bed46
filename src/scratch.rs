//! Caller-owned scratch space for aggregate verification.
//!
//! Verifying an aggregate signature needs one challenge scalar per cosigner, sized to
//! `N` at call time. A fresh allocation per call is wasteful for a verifier that checks
//! many signatures against sessions of the same size (e.g. a block validator). Pooling
//! that buffer in a `ScratchSpace` the caller reuses across calls avoids it.

use crate::backend::ScalarValue;

/// Reusable scratch buffer for [`crate::verify::verify_aggregate`]. Holds no secret
/// material; its contents are overwritten (not wiped) between calls.
#[derive(Debug, Default)]
pub struct ScratchSpace {
    challenges: Vec<ScalarValue>,
}

impl ScratchSpace {
    /// Create an empty scratch space. Its internal buffer grows to fit the largest
    /// cosigner set it is used with and is never shrunk.
    pub fn new() -> Self {
        Self { challenges: Vec::new() }
    }

    /// Create a scratch space pre-sized for `capacity` cosigners, avoiding the first
    /// growth reallocation.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { challenges: Vec::with_capacity(capacity) }
    }

    pub(crate) fn challenges_buf(&mut self, len: usize) -> &mut Vec<ScalarValue> {
        self.challenges.clear();
        self.challenges.reserve(len);
        &mut self.challenges
    }
}
