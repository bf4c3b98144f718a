// =============================================================================
// Reward Staking Constants
// =============================================================================

// PDA Seeds
pub const STAKING_POOL_SEED: &[u8] = b"staking_pool";
pub const STAKE_VAULT_SEED: &[u8] = b"stake_vault";
pub const REWARD_VAULT_SEED: &[u8] = b"reward_vault";
pub const STAKER_SEED: &[u8] = b"staker";

// Precision for reward calculations (18 decimals)
// Using u128 to handle large numbers without overflow
pub const REWARD_PRECISION: u128 = 1_000_000_000_000_000_000; // 10^18

// Maximum rewards that can be distributed in a single transaction.
// Keeps amount * REWARD_PRECISION far away from the u128 ceiling.
pub const MAX_REWARD_PER_DISTRIBUTION: u64 = 10_000_000_000_000;
