use anchor_lang::prelude::*;

use crate::constants::REWARD_PRECISION;
use crate::error::StakingError;

/// Global staking pool state
/// PDA: ["staking_pool", asset_mint]
///
/// The staked asset and the reward asset are the same mint, so an owner's
/// principal and rewards are directly comparable amounts.
#[account]
#[derive(Default)]
pub struct StakingPool {
    /// Admin who funds reward distributions
    pub admin: Pubkey,

    /// Mint staked and paid out as rewards
    pub asset_mint: Pubkey,

    /// Vault holding staked principal
    /// PDA: ["stake_vault", staking_pool]
    pub stake_vault: Pubkey,

    /// Vault holding distributed, not yet claimed rewards
    /// PDA: ["reward_vault", staking_pool]
    pub reward_vault: Pubkey,

    /// Total principal staked across all positions
    pub total_staked: u64,

    /// Total rewards distributed (lifetime)
    pub total_rewards_distributed: u64,

    /// Accumulated rewards per staked unit (scaled by REWARD_PRECISION)
    /// This increases each time rewards are distributed
    pub reward_per_token: u128,

    /// Last time rewards were distributed
    pub last_distribution_time: i64,

    /// PDA bump seed
    pub bump: u8,

    /// Stake vault bump seed
    pub stake_vault_bump: u8,

    /// Reward vault bump seed
    pub reward_vault_bump: u8,
}

impl StakingPool {
    /// Account size for allocation
    pub const SIZE: usize = 8 + // discriminator
        32 + // admin
        32 + // asset_mint
        32 + // stake_vault
        32 + // reward_vault
        8 +  // total_staked
        8 +  // total_rewards_distributed
        16 + // reward_per_token (u128)
        8 +  // last_distribution_time
        1 +  // bump
        1 +  // stake_vault_bump
        1 +  // reward_vault_bump
        64;  // padding for future fields

    /// Update reward_per_token when new rewards are distributed
    /// Formula: reward_per_token += (new_rewards * PRECISION) / total_staked
    ///
    /// Returns false (and leaves the pool untouched) when nothing is staked.
    pub fn update_reward_per_token(&mut self, new_rewards: u64, now: i64) -> Result<bool> {
        if self.total_staked == 0 {
            return Ok(false);
        }

        let reward_increase = (new_rewards as u128)
            .checked_mul(REWARD_PRECISION)
            .ok_or(StakingError::MathOverflow)?
            .checked_div(self.total_staked as u128)
            .ok_or(StakingError::DivisionByZero)?;

        self.reward_per_token = self
            .reward_per_token
            .checked_add(reward_increase)
            .ok_or(StakingError::MathOverflow)?;

        self.total_rewards_distributed = self
            .total_rewards_distributed
            .checked_add(new_rewards)
            .ok_or(StakingError::MathOverflow)?;

        self.last_distribution_time = now;

        Ok(true)
    }

    pub fn add_stake(&mut self, amount: u64) -> Result<()> {
        self.total_staked = self
            .total_staked
            .checked_add(amount)
            .ok_or(StakingError::MathOverflow)?;
        Ok(())
    }

    pub fn remove_stake(&mut self, amount: u64) -> Result<()> {
        self.total_staked = self
            .total_staked
            .checked_sub(amount)
            .ok_or(StakingError::MathUnderflow)?;
        Ok(())
    }

    /// Signer seeds for transfers out of the pool's vaults
    pub fn signer_seeds(&self) -> [&[u8]; 3] {
        [
            crate::constants::STAKING_POOL_SEED,
            self.asset_mint.as_ref(),
            std::slice::from_ref(&self.bump),
        ]
    }
}
