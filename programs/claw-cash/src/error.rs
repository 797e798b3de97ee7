//! Unified error types for Claw Cash pools
//!
//! Error codes are stable across versions for client compatibility.
//! The same enum is returned by the on-chain handlers and by the
//! off-chain pool engine.

use anchor_lang::prelude::*;

#[error_code]
#[derive(PartialEq, Eq)]
pub enum PoolError {
    // ========== Pool Errors ==========

    /// Deposit/withdraw against a pool id that was never initialized
    #[msg("Unknown pool")]
    PoolUnknown, // 6000

    /// Pool id already has state
    #[msg("Pool already initialized")]
    PoolAlreadyInitialized, // 6001

    /// Denomination must be non-zero
    #[msg("Invalid denomination: must be greater than zero")]
    InvalidDenomination, // 6002

    // ========== Merkle Tree Errors ==========

    /// Every leaf slot of the pool's tree is used
    #[msg("Merkle tree is full")]
    PoolFull, // 6003

    /// Leaf index has not been assigned yet
    #[msg("Leaf index out of range")]
    LeafOutOfRange, // 6004

    /// Caller's expected leaf index is stale
    #[msg("Leaf index does not match the next free slot")]
    LeafIndexMismatch, // 6005

    /// All-zero commitment is the empty-leaf value
    #[msg("Invalid commitment: cannot be all zeros")]
    InvalidCommitment, // 6006

    // ========== Withdrawal Errors ==========

    /// Membership proof or note material rejected
    #[msg("Invalid proof")]
    InvalidProof, // 6007

    /// Note already withdrawn
    #[msg("Nullifier already spent")]
    NullifierSpent, // 6008

    // ========== Value Errors ==========

    /// Fee-token debit failed
    #[msg("Insufficient fee token balance")]
    InsufficientFeeBalance, // 6009

    /// Vault cannot cover the denomination
    #[msg("Insufficient vault balance")]
    InsufficientVaultBalance, // 6010

    // ========== Authorization Errors ==========

    /// Token mint mismatch
    #[msg("Token mint does not match protocol configuration")]
    InvalidMint, // 6011

    /// Token account owner mismatch
    #[msg("Invalid token account owner")]
    InvalidOwner, // 6012

    /// Caller is not the protocol authority
    #[msg("Unauthorized: caller is not protocol authority")]
    Unauthorized, // 6013

    // ========== Computation Errors ==========

    /// Arithmetic overflow occurred
    #[msg("Arithmetic overflow")]
    ArithmeticOverflow, // 6014
}
