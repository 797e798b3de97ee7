//! Cryptographic primitives for Claw Cash
//!
//! Commitments, nullifiers and Merkle nodes are all SHA-256 based; see
//! [`hash`] for the exact byte layouts.

pub mod hash;
pub mod note;

pub use hash::{compute_commitment, compute_nullifier, hash_pair, is_zero_hash};
pub use note::{Note, NoteFactory, SpendableNote};
