//! Fixed-depth, append-only SHA-256 Merkle tree
//!
//! The accumulator (on-chain, O(depth) append), the offline proof builder
//! and the pure verifier all share [`ZeroHashes`] so they agree on how an
//! absent subtree hashes.

pub mod accumulator;
pub mod proof;
pub mod zeros;

pub use accumulator::MerkleAccumulator;
pub use proof::{verify_proof, MerkleProof, ProofBuilder};
pub use zeros::ZeroHashes;
