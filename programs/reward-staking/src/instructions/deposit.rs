use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::{STAKER_SEED, STAKING_POOL_SEED, STAKE_VAULT_SEED};
use crate::error::StakingError;
use crate::state::{Staker, StakingPool};

/// Stake principal into an existing position
///
/// # Arguments
/// * `amount` - Amount of the asset to stake
///
/// # Flow
/// 1. Pull `amount` from the owner's token account using the allowance the
///    owner granted to the staking pool PDA
/// 2. Settle accrued rewards, then grow the position
/// 3. Update pool totals
///
#[derive(Accounts)]
pub struct Deposit<'info> {
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

    /// Owner's token account; must have delegated to the staking pool
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

    pub token_program: Program<'info, Token>,
}

pub fn handler_deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
    require!(amount > 0, StakingError::InvalidAmount);

    // The pool PDA moves the funds as the owner's delegate
    {
        let staking_pool = &ctx.accounts.staking_pool;
        let seeds = staking_pool.signer_seeds();

        token::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.owner_token_account.to_account_info(),
                    to: ctx.accounts.stake_vault.to_account_info(),
                    authority: staking_pool.to_account_info(),
                },
                &[&seeds[..]],
            ),
            amount,
        )?;
    }

    let staking_pool = &mut ctx.accounts.staking_pool;
    let staker = &mut ctx.accounts.staker;

    staker.record_deposit(amount, staking_pool.reward_per_token)?;
    staking_pool.add_stake(amount)?;

    msg!(
        "Staked {}. Position total: {}, owed rewards: {}, pool total: {}",
        amount,
        staker.staked_amount,
        staker.rewards_owed,
        staking_pool.total_staked
    );

    Ok(())
}
