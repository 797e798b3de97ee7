//! Deposit notes
//!
//! A note is the client-side secret material behind one deposit:
//! ```text
//! secret, nullifier_preimage   (32 random bytes each, never on-chain)
//! commitment     = SHA256(secret || nullifier_preimage)   -> tree leaf
//! nullifier_hash = SHA256(nullifier_preimage)             -> revealed on withdraw
//! ```
//!
//! # User Responsibility
//! Depositors MUST keep `(secret, nullifier_preimage, pool_id, leaf_index)`.
//! Lost notes = lost funds (no recovery possible).

use core::fmt;

use super::hash::{compute_commitment, compute_nullifier};

/// Secret note material plus its derived public values.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Note {
    secret: [u8; 32],
    nullifier_preimage: [u8; 32],
    commitment: [u8; 32],
    nullifier_hash: [u8; 32],
}

impl Note {
    /// Rebuild a note from its two secrets.
    pub fn from_parts(secret: [u8; 32], nullifier_preimage: [u8; 32]) -> Self {
        Self {
            secret,
            nullifier_preimage,
            commitment: compute_commitment(&secret, &nullifier_preimage),
            nullifier_hash: compute_nullifier(&nullifier_preimage),
        }
    }

    pub fn secret(&self) -> &[u8; 32] {
        &self.secret
    }

    pub fn nullifier_preimage(&self) -> &[u8; 32] {
        &self.nullifier_preimage
    }

    /// Leaf value inserted on deposit.
    pub fn commitment(&self) -> [u8; 32] {
        self.commitment
    }

    /// Value recorded when the note is spent.
    pub fn nullifier_hash(&self) -> [u8; 32] {
        self.nullifier_hash
    }
}

// Secrets stay out of logs.
impl fmt::Debug for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Note")
            .field("commitment", &self.commitment)
            .field("nullifier_hash", &self.nullifier_hash)
            .finish_non_exhaustive()
    }
}

/// Everything a recipient needs to withdraw: the payload handed over
/// out-of-band after a deposit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpendableNote {
    pub note: Note,
    pub pool_id: u8,
    pub leaf_index: u32,
}

impl SpendableNote {
    pub fn new(note: Note, pool_id: u8, leaf_index: u32) -> Self {
        Self {
            note,
            pool_id,
            leaf_index,
        }
    }
}

/// Client-side note generator.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoteFactory;

#[cfg(not(target_os = "solana"))]
impl NoteFactory {
    /// Draw a fresh note from the thread-local CSPRNG.
    pub fn generate() -> Note {
        Self::generate_with(&mut rand::thread_rng())
    }

    /// Draw a fresh note from `rng`: two independent 32-byte values.
    pub fn generate_with<R: rand::RngCore + rand::CryptoRng>(rng: &mut R) -> Note {
        let mut secret = [0u8; 32];
        let mut nullifier_preimage = [0u8; 32];
        rng.fill_bytes(&mut secret);
        rng.fill_bytes(&mut nullifier_preimage);
        Note::from_parts(secret, nullifier_preimage)
    }
}
