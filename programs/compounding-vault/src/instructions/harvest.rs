// =============================================================================
// Harvest Instruction
// =============================================================================
// Permissionless. Claims pending rewards, pays the strategist and the caller
// their fees, and stakes the remainder so it compounds for every holder.
//
// strategist_fee = unclaimed * strategist_fee_bps / 10000
// harvest_fee    = unclaimed * harvest_fee_bps / 10000
// =============================================================================

use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};
use reward_staking::program::RewardStaking;
use reward_staking::state::{Staker, StakingPool};

use crate::accounting;
use crate::adapter::VaultCpi;
use crate::constants::*;
use crate::error::VaultError;
use crate::events::Harvested;
use crate::state::Vault;

#[derive(Accounts)]
pub struct Harvest<'info> {
    /// Anyone. Receives the harvest fee.
    pub harvester: Signer<'info>,

    #[account(
        seeds = [VAULT_SEED, vault.asset_mint.as_ref()],
        bump = vault.bump
    )]
    pub vault: Box<Account<'info, Vault>>,

    #[account(
        mut,
        seeds = [VAULT_ASSETS_SEED, vault.key().as_ref()],
        bump = vault.vault_assets_bump
    )]
    pub vault_assets: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = harvester_assets.mint == vault.asset_mint @ VaultError::InvalidAssetMint,
        constraint = harvester_assets.owner == harvester.key() @ VaultError::InvalidTokenAccountOwner
    )]
    pub harvester_assets: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = strategist_assets.mint == vault.asset_mint @ VaultError::InvalidAssetMint,
        constraint = strategist_assets.owner == vault.strategist @ VaultError::InvalidTokenAccountOwner
    )]
    pub strategist_assets: Box<Account<'info, TokenAccount>>,

    #[account(mut, address = vault.staking_pool @ VaultError::InvalidPosition)]
    pub staking_pool: Box<Account<'info, StakingPool>>,

    #[account(mut, address = vault.position @ VaultError::InvalidPosition)]
    pub position: Box<Account<'info, Staker>>,

    /// CHECK: Verified against its PDA by the staking program
    #[account(mut)]
    pub stake_vault: UncheckedAccount<'info>,

    /// CHECK: Verified against its PDA by the staking program
    #[account(mut)]
    pub reward_vault: UncheckedAccount<'info>,

    pub staking_program: Program<'info, RewardStaking>,
    pub token_program: Program<'info, Token>,
}

pub fn handler_harvest(ctx: Context<Harvest>) -> Result<u64> {
    let accounts = &mut *ctx.accounts;
    let harvester = accounts.harvester.key();

    let mut cpi = VaultCpi {
        vault: &accounts.vault,
        caller: &accounts.harvester,
        caller_assets: &mut accounts.harvester_assets,
        caller_shares: None,
        strategist_assets: Some(&mut *accounts.strategist_assets),
        vault_assets: &mut accounts.vault_assets,
        share_mint: None,
        staking_pool: &mut accounts.staking_pool,
        position: &mut accounts.position,
        stake_vault: accounts.stake_vault.to_account_info(),
        reward_vault: Some(accounts.reward_vault.to_account_info()),
        staking_program: accounts.staking_program.to_account_info(),
        token_program: accounts.token_program.to_account_info(),
    };

    let receipt = accounting::harvest(&accounts.vault, &mut cpi, &harvester)?;

    emit!(Harvested {
        vault: accounts.vault.key(),
        harvester,
        harvest_fee: receipt.fees.harvester,
        strategist_fee: receipt.fees.strategist,
        compounded: receipt.compounded,
    });

    msg!(
        "Harvested: harvester fee {}, strategist fee {}, compounded {}",
        receipt.fees.harvester,
        receipt.fees.strategist,
        receipt.compounded
    );

    Ok(receipt.fees.harvester)
}
