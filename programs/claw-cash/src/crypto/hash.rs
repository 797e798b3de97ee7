//! Hash Functions for Claw Cash
//!
//! # Hash Function Architecture
//!
//! Every hash in the protocol is SHA-256 over fixed-width inputs:
//! ```text
//! commitment     = SHA256(secret || nullifier_preimage)
//! nullifier_hash = SHA256(nullifier_preimage)
//! parent         = SHA256(left || right)
//! ```
//!
//! SHA-256 is a Solana syscall on-chain and a plain `sha2` digest
//! off-chain (both behind `solana_program::hash`), so the program and the
//! off-chain engine agree byte for byte.

use solana_program::hash::{hash, hashv};

// ============================================================================
// MERKLE TREE HASH
// ============================================================================

/// Hash two 32-byte values for Merkle tree internal nodes.
///
/// # Returns
/// Parent node hash: SHA256(left || right)
#[inline]
pub fn hash_pair(left: &[u8; 32], right: &[u8; 32]) -> [u8; 32] {
    hashv(&[&left[..], &right[..]]).to_bytes()
}

// ============================================================================
// COMMITMENT / NULLIFIER
// ============================================================================

/// Compute commitment = SHA256(secret || nullifier_preimage).
///
/// `secret` only blinds the commitment; it never appears in the nullifier.
#[inline]
pub fn compute_commitment(secret: &[u8; 32], nullifier_preimage: &[u8; 32]) -> [u8; 32] {
    hashv(&[&secret[..], &nullifier_preimage[..]]).to_bytes()
}

/// Compute nullifier_hash = SHA256(nullifier_preimage).
///
/// Revealed on withdrawal; recording it marks the note spent.
#[inline]
pub fn compute_nullifier(nullifier_preimage: &[u8; 32]) -> [u8; 32] {
    hash(nullifier_preimage).to_bytes()
}

// ============================================================================
// UTILITY FUNCTIONS
// ============================================================================

/// Check if a 32-byte value is all zeros.
#[inline]
pub fn is_zero_hash(value: &[u8; 32]) -> bool {
    value.iter().all(|&b| b == 0)
}
