//! Aggregate Schnorr-style signatures over secp256k1 (`aggsig`).
//!
//! This crate implements the aggregate Schnorr signature scheme originally shipped as
//! the `aggsig` module of `secp256k1-zkp`: single-party signing, a multi-party
//! aggregate signing session with explicit per-cosigner nonce lifecycle tracking, and
//! a verifier for both. It predates and differs from BIP-340: sign canonicalization is
//! done by quadratic-residue-Y rather than even/odd-Y, and the multi-signer challenge
//! is a two-stage hash (a shared prehash over every cosigner's key, plus a per-index
//! suffix) rather than a single hash over an aggregated key.
//!
//! # Example
//!
//! ```rust,no_run
//! use secp256k1_aggsig::{AggregateSession, PublicKey};
//!
//! # fn main() -> secp256k1_aggsig::Result<()> {
//! # let pk0 = PublicKey::from_compressed_unchecked([0u8; 33]);
//! # let pk1 = PublicKey::from_compressed_unchecked([0u8; 33]);
//! let mut session = AggregateSession::create(&[pk0, pk1], &[0x01u8; 32])?;
//! session.generate_nonce(0)?;
//! session.generate_nonce(1)?;
//! // ... exchange nonces out of band until every slot is `Ours`, then:
//! // let partial = session.partial_sign(0, &msg32, &sk0)?;
//! # Ok(())
//! # }
//! ```
//!
//! # References
//!
//! - [BIP-340](https://github.com/bitcoin/bips/blob/master/bip-0340.mediawiki) (the
//!   later, incompatible standardization of a similar idea)
//! - [`secp256k1-zkp`](https://github.com/mimblewimble/secp256k1-zkp)

mod backend;
mod combine;
mod nonce;
mod pubkey;
mod rng;
mod scratch;
mod session;
mod sighash;
mod single;
mod types;
mod verify;

pub mod error;

pub use combine::combine;
pub use error::{Error, Result};
pub use pubkey::PublicKey;
pub use scratch::ScratchSpace;
pub use session::AggregateSession;
pub use single::{sign as sign_single, sign_with_assoc_nonce};
pub use types::{NonceState, PartialSignature, Signature};
pub use verify::{verify_aggregate, verify_single};
