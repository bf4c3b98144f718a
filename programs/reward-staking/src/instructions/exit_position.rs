use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::{REWARD_VAULT_SEED, STAKER_SEED, STAKING_POOL_SEED, STAKE_VAULT_SEED};
use crate::error::StakingError;
use crate::state::{Staker, StakingPool};

/// Withdraw all principal and claim all rewards in one call
///
/// # Flow
/// 1. Settle the position and zero it out
/// 2. Transfer principal from the stake vault to the owner
/// 3. Transfer owed rewards from the reward vault to the owner
/// 4. Update pool totals
///
#[derive(Accounts)]
pub struct ExitPosition<'info> {
    /// Position owner
    pub owner: Signer<'info>,

    #[account(
        mut,
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

    /// Owner's token account receiving principal and rewards
    #[account(
        mut,
        constraint = owner_token_account.mint == staking_pool.asset_mint @ StakingError::InvalidAssetMint,
        constraint = owner_token_account.owner == owner.key() @ StakingError::InvalidTokenAccountOwner
    )]
    pub owner_token_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        seeds = [STAKE_VAULT_SEED, staking_pool.key().as_ref()],
        bump = staking_pool.stake_vault_bump
    )]
    pub stake_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        seeds = [REWARD_VAULT_SEED, staking_pool.key().as_ref()],
        bump = staking_pool.reward_vault_bump
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler_exit_position(ctx: Context<ExitPosition>) -> Result<()> {
    let (principal, rewards) = ctx
        .accounts
        .staker
        .record_exit(ctx.accounts.staking_pool.reward_per_token)?;

    require!(
        ctx.accounts.reward_vault.amount >= rewards,
        StakingError::InsufficientRewardBalance
    );

    {
        let staking_pool = &ctx.accounts.staking_pool;
        let seeds = staking_pool.signer_seeds();
        let signer_seeds = &[&seeds[..]];

        if principal > 0 {
            token::transfer(
                CpiContext::new_with_signer(
                    ctx.accounts.token_program.to_account_info(),
                    Transfer {
                        from: ctx.accounts.stake_vault.to_account_info(),
                        to: ctx.accounts.owner_token_account.to_account_info(),
                        authority: staking_pool.to_account_info(),
                    },
                    signer_seeds,
                ),
                principal,
            )?;
        }

        if rewards > 0 {
            token::transfer(
                CpiContext::new_with_signer(
                    ctx.accounts.token_program.to_account_info(),
                    Transfer {
                        from: ctx.accounts.reward_vault.to_account_info(),
                        to: ctx.accounts.owner_token_account.to_account_info(),
                        authority: staking_pool.to_account_info(),
                    },
                    signer_seeds,
                ),
                rewards,
            )?;
        }
    }

    let staking_pool = &mut ctx.accounts.staking_pool;
    staking_pool.remove_stake(principal)?;

    msg!(
        "Exited position of {}: principal {}, rewards {}, pool total: {}",
        ctx.accounts.owner.key(),
        principal,
        rewards,
        staking_pool.total_staked
    );

    Ok(())
}
