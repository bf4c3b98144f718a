// =============================================================================
// Withdraw Instruction
// =============================================================================
// Burns shares and pays out the withdrawer's part of the position.
//
// The staking program has no partial exit, so every withdrawal:
// 1. Computes fees from the rewards pending right now
// 2. Exits the whole position into vault_assets (principal + all rewards)
// 3. Pays: shares * (held - harvest_fee - strategist_fee) / supply + harvest_fee
// 4. Burns the shares, pays the strategist fee and the withdrawer
// 5. Stakes everything left back for the remaining holders
//
// The withdrawer collects the harvest fee because the unwind harvests for
// every holder.
// =============================================================================

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};
use reward_staking::program::RewardStaking;
use reward_staking::state::{Staker, StakingPool};

use crate::accounting;
use crate::adapter::VaultCpi;
use crate::constants::*;
use crate::error::VaultError;
use crate::events::Withdrawn;
use crate::state::Vault;

#[derive(Accounts)]
pub struct Withdraw<'info> {
    // =========================================================================
    // Signers
    // =========================================================================

    /// Share holder. Signs for the share burn.
    pub withdrawer: Signer<'info>,

    // =========================================================================
    // Vault Accounts
    // =========================================================================

    #[account(
        seeds = [VAULT_SEED, vault.asset_mint.as_ref()],
        bump = vault.bump
    )]
    pub vault: Box<Account<'info, Vault>>,

    #[account(
        mut,
        seeds = [SHARE_MINT_SEED, vault.key().as_ref()],
        bump = vault.share_mint_bump
    )]
    pub share_mint: Box<Account<'info, Mint>>,

    #[account(
        mut,
        seeds = [VAULT_ASSETS_SEED, vault.key().as_ref()],
        bump = vault.vault_assets_bump
    )]
    pub vault_assets: Box<Account<'info, TokenAccount>>,

    // =========================================================================
    // Payout Token Accounts
    // =========================================================================

    /// Receives the payout
    #[account(
        mut,
        constraint = withdrawer_assets.mint == vault.asset_mint @ VaultError::InvalidAssetMint,
        constraint = withdrawer_assets.owner == withdrawer.key() @ VaultError::InvalidTokenAccountOwner
    )]
    pub withdrawer_assets: Box<Account<'info, TokenAccount>>,

    /// Shares are burned from here
    #[account(
        mut,
        constraint = withdrawer_shares.mint == vault.share_mint @ VaultError::InvalidShareMint,
        constraint = withdrawer_shares.owner == withdrawer.key() @ VaultError::InvalidTokenAccountOwner
    )]
    pub withdrawer_shares: Box<Account<'info, TokenAccount>>,

    /// Receives the strategist fee
    #[account(
        mut,
        constraint = strategist_assets.mint == vault.asset_mint @ VaultError::InvalidAssetMint,
        constraint = strategist_assets.owner == vault.strategist @ VaultError::InvalidTokenAccountOwner
    )]
    pub strategist_assets: Box<Account<'info, TokenAccount>>,

    // =========================================================================
    // Staking Accounts
    // =========================================================================

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

    // =========================================================================
    // Programs
    // =========================================================================

    pub staking_program: Program<'info, RewardStaking>,
    pub token_program: Program<'info, Token>,
}

/// Handler for the withdraw instruction
///
/// # Arguments
/// * `shares` - Shares to burn
pub fn handler_withdraw(ctx: Context<Withdraw>, shares: u64) -> Result<u64> {
    let accounts = &mut *ctx.accounts;
    let withdrawer = accounts.withdrawer.key();

    let mut cpi = VaultCpi {
        vault: &accounts.vault,
        caller: &accounts.withdrawer,
        caller_assets: &mut accounts.withdrawer_assets,
        caller_shares: Some(&mut *accounts.withdrawer_shares),
        strategist_assets: Some(&mut *accounts.strategist_assets),
        vault_assets: &mut accounts.vault_assets,
        share_mint: Some(&mut *accounts.share_mint),
        staking_pool: &mut accounts.staking_pool,
        position: &mut accounts.position,
        stake_vault: accounts.stake_vault.to_account_info(),
        reward_vault: Some(accounts.reward_vault.to_account_info()),
        staking_program: accounts.staking_program.to_account_info(),
        token_program: accounts.token_program.to_account_info(),
    };

    let receipt = accounting::withdraw(&accounts.vault, &mut cpi, &withdrawer, shares)?;

    emit!(Withdrawn {
        vault: accounts.vault.key(),
        withdrawer,
        shares_burned: shares,
        amount_paid: receipt.amount_paid,
        strategist_fee: receipt.fees.strategist,
        harvest_fee: receipt.fees.harvester,
    });

    msg!("Withdrawal successful!");
    msg!("Shares burned: {}", shares);
    msg!("Amount paid: {}", receipt.amount_paid);
    msg!(
        "Fees: strategist {}, harvest {}",
        receipt.fees.strategist,
        receipt.fees.harvester
    );
    msg!("Restaked for remaining holders: {}", receipt.restaked);

    Ok(receipt.amount_paid)
}
