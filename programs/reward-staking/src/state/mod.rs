pub mod staker;
pub mod staking_pool;

pub use staker::*;
pub use staking_pool::*;
