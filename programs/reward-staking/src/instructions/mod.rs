// =============================================================================
// Instructions Module - Reward Staking
// =============================================================================

pub mod claim;
pub mod deposit;
pub mod distribute;
pub mod exit_position;
pub mod initialize;
pub mod open_position;

pub use claim::*;
pub use deposit::*;
pub use distribute::*;
pub use exit_position::*;
pub use initialize::*;
pub use open_position::*;
