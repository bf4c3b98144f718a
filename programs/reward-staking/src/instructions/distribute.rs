use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::{MAX_REWARD_PER_DISTRIBUTION, REWARD_VAULT_SEED, STAKING_POOL_SEED};
use crate::error::StakingError;
use crate::state::StakingPool;

/// Distribute rewards to stakers
///
/// Transfers rewards from the admin's source account into the reward vault
/// and raises reward_per_token so every position accrues its pro-rata share.
///
/// # Arguments
/// * `amount` - Amount of the asset to distribute
///
#[derive(Accounts)]
pub struct Distribute<'info> {
    /// Admin funding the rewards
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [STAKING_POOL_SEED, staking_pool.asset_mint.as_ref()],
        bump = staking_pool.bump,
        constraint = staking_pool.admin == authority.key() @ StakingError::Unauthorized
    )]
    pub staking_pool: Account<'info, StakingPool>,

    /// Source of rewards, owned by the authority
    #[account(
        mut,
        constraint = reward_source.mint == staking_pool.asset_mint @ StakingError::InvalidAssetMint,
        constraint = reward_source.owner == authority.key() @ StakingError::InvalidTokenAccountOwner
    )]
    pub reward_source: Account<'info, TokenAccount>,

    #[account(
        mut,
        seeds = [REWARD_VAULT_SEED, staking_pool.key().as_ref()],
        bump = staking_pool.reward_vault_bump
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler_distribute(ctx: Context<Distribute>, amount: u64) -> Result<()> {
    require!(amount > 0, StakingError::InvalidAmount);
    require!(
        amount <= MAX_REWARD_PER_DISTRIBUTION,
        StakingError::ExceedsMaxDistribution
    );

    let staking_pool = &mut ctx.accounts.staking_pool;

    // If no stakers, we can't distribute
    // The rewards stay in the source account
    if !staking_pool.update_reward_per_token(amount, Clock::get()?.unix_timestamp)? {
        msg!("No stakers - cannot distribute rewards. Skipping.");
        return Ok(());
    }

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.reward_source.to_account_info(),
                to: ctx.accounts.reward_vault.to_account_info(),
                authority: ctx.accounts.authority.to_account_info(),
            },
        ),
        amount,
    )?;

    msg!(
        "Distributed {}. Total distributed: {}, reward_per_token: {}",
        amount,
        staking_pool.total_rewards_distributed,
        staking_pool.reward_per_token
    );

    Ok(())
}
