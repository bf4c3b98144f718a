use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{REWARD_VAULT_SEED, STAKE_VAULT_SEED, STAKING_POOL_SEED};
use crate::state::StakingPool;

/// Initialize a new staking pool
///
/// # Accounts
/// * `admin` - The admin who funds reward distributions (signer, payer)
/// * `staking_pool` - The staking pool PDA to create
/// * `asset_mint` - The mint staked and paid out as rewards
/// * `stake_vault` - The vault to hold staked principal
/// * `reward_vault` - The vault to hold distributed rewards
///
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Admin who will control this staking pool
    #[account(mut)]
    pub admin: Signer<'info>,

    /// Staking pool PDA
    #[account(
        init,
        payer = admin,
        space = StakingPool::SIZE,
        seeds = [STAKING_POOL_SEED, asset_mint.key().as_ref()],
        bump
    )]
    pub staking_pool: Account<'info, StakingPool>,

    /// Staked and reward token mint
    pub asset_mint: Account<'info, Mint>,

    /// Vault to hold staked principal
    #[account(
        init,
        payer = admin,
        seeds = [STAKE_VAULT_SEED, staking_pool.key().as_ref()],
        bump,
        token::mint = asset_mint,
        token::authority = staking_pool
    )]
    pub stake_vault: Account<'info, TokenAccount>,

    /// Vault to hold distributed rewards until they are claimed
    #[account(
        init,
        payer = admin,
        seeds = [REWARD_VAULT_SEED, staking_pool.key().as_ref()],
        bump,
        token::mint = asset_mint,
        token::authority = staking_pool
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

pub fn handler_initialize(ctx: Context<Initialize>) -> Result<()> {
    let staking_pool = &mut ctx.accounts.staking_pool;

    staking_pool.admin = ctx.accounts.admin.key();
    staking_pool.asset_mint = ctx.accounts.asset_mint.key();
    staking_pool.stake_vault = ctx.accounts.stake_vault.key();
    staking_pool.reward_vault = ctx.accounts.reward_vault.key();

    staking_pool.total_staked = 0;
    staking_pool.total_rewards_distributed = 0;
    staking_pool.reward_per_token = 0;
    staking_pool.last_distribution_time = Clock::get()?.unix_timestamp;

    staking_pool.bump = ctx.bumps.staking_pool;
    staking_pool.stake_vault_bump = ctx.bumps.stake_vault;
    staking_pool.reward_vault_bump = ctx.bumps.reward_vault;

    msg!(
        "Staking pool initialized: asset_mint={}, stake_vault={}, reward_vault={}",
        staking_pool.asset_mint,
        staking_pool.stake_vault,
        staking_pool.reward_vault
    );

    Ok(())
}
