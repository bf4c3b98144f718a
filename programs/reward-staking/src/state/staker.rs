use anchor_lang::prelude::*;

use crate::constants::REWARD_PRECISION;
use crate::error::StakingError;

/// Per-owner staking position
/// PDA: ["staker", staking_pool, owner]
#[account]
#[derive(Default)]
pub struct Staker {
    /// The staking pool this position belongs to
    pub pool: Pubkey,

    /// Owner of this staking position
    pub owner: Pubkey,

    /// Principal currently staked
    pub staked_amount: u64,

    /// Pool reward_per_token at the last settlement
    /// pending = staked * (pool.reward_per_token - reward_debt) / PRECISION
    pub reward_debt: u128,

    /// Rewards settled into the position but not yet paid out
    pub rewards_owed: u64,

    /// Total rewards claimed (lifetime)
    pub rewards_claimed: u64,

    /// PDA bump seed
    pub bump: u8,
}

impl Staker {
    /// Account size for allocation
    pub const SIZE: usize = 8 + // discriminator
        32 + // pool
        32 + // owner
        8 +  // staked_amount
        16 + // reward_debt (u128)
        8 +  // rewards_owed
        8 +  // rewards_claimed
        1 +  // bump
        32;  // padding for future fields

    /// Rewards accrued since the last settlement
    pub fn pending_rewards(&self, pool_reward_per_token: u128) -> Result<u64> {
        if self.staked_amount == 0 {
            return Ok(0);
        }

        let reward_diff = pool_reward_per_token
            .checked_sub(self.reward_debt)
            .ok_or(StakingError::MathUnderflow)?;

        let pending = (self.staked_amount as u128)
            .checked_mul(reward_diff)
            .ok_or(StakingError::MathOverflow)?
            .checked_div(REWARD_PRECISION)
            .ok_or(StakingError::DivisionByZero)?;

        u64::try_from(pending).map_err(|_| error!(StakingError::MathOverflow))
    }

    /// Everything the owner could claim right now
    pub fn unclaimed_rewards(&self, pool_reward_per_token: u128) -> Result<u64> {
        self.rewards_owed
            .checked_add(self.pending_rewards(pool_reward_per_token)?)
            .ok_or(error!(StakingError::MathOverflow))
    }

    /// Move pending rewards into rewards_owed and catch reward_debt up.
    /// Must run before staked_amount changes.
    pub fn settle(&mut self, pool_reward_per_token: u128) -> Result<()> {
        self.rewards_owed = self.unclaimed_rewards(pool_reward_per_token)?;
        self.reward_debt = pool_reward_per_token;
        Ok(())
    }

    /// Record a deposit
    pub fn record_deposit(&mut self, amount: u64, pool_reward_per_token: u128) -> Result<()> {
        self.settle(pool_reward_per_token)?;

        self.staked_amount = self
            .staked_amount
            .checked_add(amount)
            .ok_or(StakingError::MathOverflow)?;

        Ok(())
    }

    /// Settle and hand out every owed reward. Returns the amount to pay.
    pub fn take_rewards(&mut self, pool_reward_per_token: u128) -> Result<u64> {
        self.settle(pool_reward_per_token)?;

        let rewards = self.rewards_owed;
        self.rewards_owed = 0;
        self.rewards_claimed = self
            .rewards_claimed
            .checked_add(rewards)
            .ok_or(StakingError::MathOverflow)?;

        Ok(rewards)
    }

    /// Close out the whole position. Returns (principal, rewards) to pay.
    pub fn record_exit(&mut self, pool_reward_per_token: u128) -> Result<(u64, u64)> {
        let rewards = self.take_rewards(pool_reward_per_token)?;

        let principal = self.staked_amount;
        self.staked_amount = 0;

        Ok((principal, rewards))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rpt(rewards: u64, staked: u64) -> u128 {
        (rewards as u128) * REWARD_PRECISION / (staked as u128)
    }

    #[test]
    fn test_pending_tracks_reward_per_token() {
        let mut staker = Staker::default();
        staker.record_deposit(1_000, 0).unwrap();

        assert_eq!(staker.pending_rewards(rpt(100, 1_000)).unwrap(), 100);
        assert_eq!(staker.unclaimed_rewards(rpt(100, 1_000)).unwrap(), 100);
    }

    #[test]
    fn test_deposit_keeps_accrued_rewards() {
        let mut staker = Staker::default();
        staker.record_deposit(1_000, 0).unwrap();

        let after_first_distribution = rpt(100, 1_000);
        staker
            .record_deposit(500, after_first_distribution)
            .unwrap();

        assert_eq!(staker.staked_amount, 1_500);
        assert_eq!(staker.rewards_owed, 100);
        assert_eq!(
            staker.unclaimed_rewards(after_first_distribution).unwrap(),
            100
        );
    }

    #[test]
    fn test_take_rewards_resets_owed() {
        let mut staker = Staker::default();
        staker.record_deposit(1_000, 0).unwrap();

        let current = rpt(50, 1_000);
        assert_eq!(staker.take_rewards(current).unwrap(), 50);
        assert_eq!(staker.unclaimed_rewards(current).unwrap(), 0);
        assert_eq!(staker.rewards_claimed, 50);

        // Nothing new accrued, so a second claim pays nothing
        assert_eq!(staker.take_rewards(current).unwrap(), 0);
    }

    #[test]
    fn test_exit_returns_principal_and_rewards() {
        let mut staker = Staker::default();
        staker.record_deposit(1_000, 0).unwrap();

        let (principal, rewards) = staker.record_exit(rpt(100, 1_000)).unwrap();
        assert_eq!(principal, 1_000);
        assert_eq!(rewards, 100);
        assert_eq!(staker.staked_amount, 0);
        assert_eq!(staker.rewards_owed, 0);
    }

    #[test]
    fn test_stale_reward_debt_is_rejected() {
        let staker = Staker {
            staked_amount: 10,
            reward_debt: 5,
            ..Default::default()
        };

        assert!(staker.pending_rewards(4).is_err());
    }
}
