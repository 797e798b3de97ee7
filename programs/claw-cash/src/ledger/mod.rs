//! Off-chain pool engine
//!
//! Runs the same accumulator, proof check and nullifier rules as the
//! program, for clients, indexers and tests that drive pools without a
//! validator. Many callers may share one [`PoolManager`] across threads.

mod manager;
mod memory;
mod nullifier_set;
mod pool_ledger;

pub use manager::{ManagerConfig, PoolManager, WithdrawRequest};
pub use memory::{MemoryFeeToken, MemoryLeafHistory, MemoryVault};
pub use nullifier_set::NullifierSet;
pub use pool_ledger::PoolLedger;

/// Pool identifier; one pool per denomination.
pub type PoolId = u8;
