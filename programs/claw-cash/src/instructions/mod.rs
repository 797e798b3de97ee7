//! Instruction handlers for Claw Cash pools

pub mod deposit;
pub mod initialize;
pub mod initialize_pool;
pub mod queries;
pub mod update_fee;
pub mod withdraw;

pub use deposit::*;
pub use initialize::*;
pub use initialize_pool::*;
pub use queries::*;
pub use update_fee::*;
pub use withdraw::*;
