// =============================================================================
// View Instructions
// =============================================================================
// Read-only projections over a fresh position snapshot. Each returns a u64
// through return data and writes nothing.
// =============================================================================

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, TokenAccount};
use reward_staking::state::{Staker, StakingPool};

use crate::accounting::PositionSnapshot;
use crate::constants::*;
use crate::error::VaultError;
use crate::state::Vault;

#[derive(Accounts)]
pub struct VaultView<'info> {
    #[account(
        seeds = [VAULT_SEED, vault.asset_mint.as_ref()],
        bump = vault.bump
    )]
    pub vault: Box<Account<'info, Vault>>,

    #[account(address = vault.staking_pool @ VaultError::InvalidPosition)]
    pub staking_pool: Box<Account<'info, StakingPool>>,

    #[account(address = vault.position @ VaultError::InvalidPosition)]
    pub position: Box<Account<'info, Staker>>,
}

impl<'info> VaultView<'info> {
    fn snapshot(&self) -> Result<PositionSnapshot> {
        PositionSnapshot::read(&self.staking_pool, &self.position)
    }
}

/// Value of one holder's shares
#[derive(Accounts)]
pub struct HolderView<'info> {
    #[account(
        seeds = [VAULT_SEED, vault.asset_mint.as_ref()],
        bump = vault.bump
    )]
    pub vault: Box<Account<'info, Vault>>,

    #[account(
        seeds = [SHARE_MINT_SEED, vault.key().as_ref()],
        bump = vault.share_mint_bump
    )]
    pub share_mint: Box<Account<'info, Mint>>,

    #[account(
        constraint = holder_shares.mint == vault.share_mint @ VaultError::InvalidShareMint
    )]
    pub holder_shares: Box<Account<'info, TokenAccount>>,

    #[account(address = vault.staking_pool @ VaultError::InvalidPosition)]
    pub staking_pool: Box<Account<'info, StakingPool>>,

    #[account(address = vault.position @ VaultError::InvalidPosition)]
    pub position: Box<Account<'info, Staker>>,
}

/// deposited + unclaimed
pub fn handler_total_assets(ctx: Context<VaultView>) -> Result<u64> {
    let snapshot = ctx.accounts.snapshot()?;
    ctx.accounts.vault.total_assets(&snapshot)
}

/// deposited + unclaimed net of strategist and harvest fees
pub fn handler_discounted_net_assets(ctx: Context<VaultView>) -> Result<u64> {
    let snapshot = ctx.accounts.snapshot()?;
    ctx.accounts.vault.discounted_net_assets(&snapshot)
}

pub fn handler_total_pending_rewards(ctx: Context<VaultView>) -> Result<u64> {
    Ok(ctx.accounts.snapshot()?.unclaimed)
}

pub fn handler_total_pending_harvest_fees(ctx: Context<VaultView>) -> Result<u64> {
    let snapshot = ctx.accounts.snapshot()?;
    ctx.accounts.vault.pending_harvest_fees(&snapshot)
}

pub fn handler_total_staked_assets(ctx: Context<HolderView>) -> Result<u64> {
    let accounts = &ctx.accounts;
    let snapshot = PositionSnapshot::read(&accounts.staking_pool, &accounts.position)?;

    let value = accounts.vault.assets_for_shares(
        accounts.holder_shares.amount,
        accounts.share_mint.supply,
        &snapshot,
    )?;

    msg!(
        "{} shares of {} held by {} worth {}",
        accounts.holder_shares.amount,
        accounts.share_mint.supply,
        accounts.holder_shares.owner,
        value
    );

    Ok(value)
}
