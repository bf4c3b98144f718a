// =============================================================================
// Deposit Instruction
// =============================================================================
// Deposit base asset, receive shares. The whole amount is staked in the same
// instruction, so the vault asset account is empty again when it returns.
//
// Share calculation (priced before the new principal lands):
// - Empty vault: shares = amount (1:1)
// - Otherwise:   shares = amount * share_supply / discounted_net_assets
//
// No fee is charged on deposits.
// =============================================================================

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};
use reward_staking::program::RewardStaking;
use reward_staking::state::{Staker, StakingPool};

use crate::accounting;
use crate::adapter::VaultCpi;
use crate::constants::*;
use crate::error::VaultError;
use crate::events::Deposited;
use crate::state::Vault;

#[derive(Accounts)]
pub struct Deposit<'info> {
    // =========================================================================
    // Signers
    // =========================================================================

    pub depositor: Signer<'info>,

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
    // Depositor Token Accounts
    // =========================================================================

    /// Source of the deposit
    #[account(
        mut,
        constraint = depositor_assets.mint == vault.asset_mint @ VaultError::InvalidAssetMint,
        constraint = depositor_assets.owner == depositor.key() @ VaultError::InvalidTokenAccountOwner
    )]
    pub depositor_assets: Box<Account<'info, TokenAccount>>,

    /// Receives the minted shares
    #[account(
        mut,
        constraint = depositor_shares.mint == vault.share_mint @ VaultError::InvalidShareMint,
        constraint = depositor_shares.owner == depositor.key() @ VaultError::InvalidTokenAccountOwner
    )]
    pub depositor_shares: Box<Account<'info, TokenAccount>>,

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

    // =========================================================================
    // Programs
    // =========================================================================

    pub staking_program: Program<'info, RewardStaking>,
    pub token_program: Program<'info, Token>,
}

/// Handler for the deposit instruction
///
/// # Arguments
/// * `amount` - Base asset to deposit (in base units)
pub fn handler_deposit(ctx: Context<Deposit>, amount: u64) -> Result<u64> {
    let accounts = &mut *ctx.accounts;
    let depositor = accounts.depositor.key();

    let mut cpi = VaultCpi {
        vault: &accounts.vault,
        caller: &accounts.depositor,
        caller_assets: &mut accounts.depositor_assets,
        caller_shares: Some(&mut *accounts.depositor_shares),
        strategist_assets: None,
        vault_assets: &mut accounts.vault_assets,
        share_mint: Some(&mut *accounts.share_mint),
        staking_pool: &mut accounts.staking_pool,
        position: &mut accounts.position,
        stake_vault: accounts.stake_vault.to_account_info(),
        reward_vault: None,
        staking_program: accounts.staking_program.to_account_info(),
        token_program: accounts.token_program.to_account_info(),
    };

    let shares = accounting::deposit(&accounts.vault, &mut cpi, &depositor, amount)?;

    emit!(Deposited {
        vault: accounts.vault.key(),
        depositor,
        amount,
        shares_minted: shares,
    });

    msg!("Deposit successful!");
    msg!("Amount deposited: {}", amount);
    msg!("Shares minted: {}", shares);

    Ok(shares)
}
