//! State account definitions for Claw Cash pools

pub mod commitment_leaf;
pub mod pool;
pub mod protocol_config;
pub mod spent_nullifier;

pub use commitment_leaf::CommitmentLeaf;
pub use pool::Pool;
pub use protocol_config::ProtocolConfig;
pub use spent_nullifier::SpentNullifier;
