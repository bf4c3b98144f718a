use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::{REWARD_VAULT_SEED, STAKER_SEED, STAKING_POOL_SEED};
use crate::error::StakingError;
use crate::state::{Staker, StakingPool};

/// Claim accumulated rewards
///
/// # Flow
/// 1. Settle pending rewards based on reward_per_token and reward_debt
/// 2. Transfer everything owed from the reward vault to the owner
///
/// Claiming with nothing owed succeeds and moves no tokens.
#[derive(Accounts)]
pub struct Claim<'info> {
    /// Position owner
    pub owner: Signer<'info>,

    #[account(
        seeds = [STAKING_POOL_SEED, staking_pool.asset_mint.as_ref()],
        bump = staking_pool.bump
    )]
    pub staking_pool: Account<'info, StakingPool>,

    #[account(
        mut,
        seeds = [STAKER_SEED, staking_pool.key().as_ref(), owner.key().as_ref()],
        bump = staker.bump,
        constraint = staker.owner == owner.key() @ StakingError::InvalidAuthority
    )]
    pub staker: Account<'info, Staker>,

    /// Owner's token account receiving the rewards
    #[account(
        mut,
        constraint = owner_token_account.mint == staking_pool.asset_mint @ StakingError::InvalidAssetMint,
        constraint = owner_token_account.owner == owner.key() @ StakingError::InvalidTokenAccountOwner
    )]
    pub owner_token_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        seeds = [REWARD_VAULT_SEED, staking_pool.key().as_ref()],
        bump = staking_pool.reward_vault_bump
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler_claim(ctx: Context<Claim>) -> Result<()> {
    let staking_pool = &ctx.accounts.staking_pool;
    let staker = &mut ctx.accounts.staker;

    let rewards = staker.take_rewards(staking_pool.reward_per_token)?;

    if rewards == 0 {
        msg!("No rewards owed to {}", staker.owner);
        return Ok(());
    }

    require!(
        ctx.accounts.reward_vault.amount >= rewards,
        StakingError::InsufficientRewardBalance
    );

    let seeds = staking_pool.signer_seeds();
    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.reward_vault.to_account_info(),
                to: ctx.accounts.owner_token_account.to_account_info(),
                authority: staking_pool.to_account_info(),
            },
            &[&seeds[..]],
        ),
        rewards,
    )?;

    msg!(
        "Claimed {} rewards. Total claimed: {}",
        rewards,
        staker.rewards_claimed
    );

    Ok(())
}
