//! Protocol constants for Claw Cash pools

/// Merkle tree depth: 20 levels, 2^20 = 1,048,576 deposits per pool.
pub const MERKLE_TREE_DEPTH: usize = 20;

/// Maximum leaves in a pool's Merkle tree.
pub const MAX_LEAVES: u32 = 1 << MERKLE_TREE_DEPTH;

/// Deepest tree the accumulator accepts (keeps leaf indices inside u32).
pub const MAX_TREE_DEPTH: usize = 24;

/// Value of an absent leaf.
pub const ZERO_LEAF: [u8; 32] = [0u8; 32];

/// Standard pool denominations in lamports.
pub const POOL_DENOMINATIONS: [u64; 3] = [
    100_000_000,    // Pool 0: 0.1 SOL
    1_000_000_000,  // Pool 1: 1 SOL
    10_000_000_000, // Pool 2: 10 SOL
];

/// Default fee-token debit per deposit (6 decimals).
pub const DEFAULT_FEE: u64 = 100_000_000;

// PDA seed prefixes
pub const CONFIG_SEED: &[u8] = b"config";
pub const TREASURY_SEED: &[u8] = b"treasury";
pub const POOL_SEED: &[u8] = b"pool";
pub const VAULT_SEED: &[u8] = b"vault";
pub const LEAF_SEED: &[u8] = b"leaf";
pub const NULLIFIER_SEED: &[u8] = b"nullifier";
