// =============================================================================
// Initialize Vault Instruction
// =============================================================================
// Creates a vault over an existing staking pool.
//
// Creates:
// - Vault account (configuration, PDA authority)
// - Share mint (same decimals as the base asset)
// - Vault asset account (transit account for every token movement)
//
// Then, signed by the Vault PDA:
// - Opens the vault's position in the staking program
// - Grants the staking pool an unlimited allowance over the vault asset
//   account, so later stakes need no per-call approval
// =============================================================================

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Approve, Mint, Token, TokenAccount};
use reward_staking::constants::{STAKER_SEED, STAKING_POOL_SEED};
use reward_staking::program::RewardStaking;
use reward_staking::state::StakingPool;

use crate::constants::*;
use crate::events::VaultInitialized;
use crate::state::Vault;

#[derive(Accounts)]
pub struct InitializeVault<'info> {
    // =========================================================================
    // Signers
    // =========================================================================

    /// Becomes vault.strategist. Pays for every account created here.
    #[account(mut)]
    pub strategist: Signer<'info>,

    // =========================================================================
    // Vault Accounts (created by this instruction)
    // =========================================================================

    #[account(
        init,
        payer = strategist,
        space = 8 + Vault::INIT_SPACE,
        seeds = [VAULT_SEED, asset_mint.key().as_ref()],
        bump
    )]
    pub vault: Box<Account<'info, Vault>>,

    /// Base asset
    pub asset_mint: Box<Account<'info, Mint>>,

    #[account(
        init,
        payer = strategist,
        mint::decimals = asset_mint.decimals,
        mint::authority = vault,
        seeds = [SHARE_MINT_SEED, vault.key().as_ref()],
        bump
    )]
    pub share_mint: Box<Account<'info, Mint>>,

    #[account(
        init,
        payer = strategist,
        token::mint = asset_mint,
        token::authority = vault,
        seeds = [VAULT_ASSETS_SEED, vault.key().as_ref()],
        bump
    )]
    pub vault_assets: Box<Account<'info, TokenAccount>>,

    // =========================================================================
    // Staking Accounts
    // =========================================================================

    /// Pool staking the same asset
    #[account(
        seeds = [STAKING_POOL_SEED, asset_mint.key().as_ref()],
        bump = staking_pool.bump,
        seeds::program = staking_program.key()
    )]
    pub staking_pool: Box<Account<'info, StakingPool>>,

    /// CHECK: Created by the staking program's open_position during this
    /// instruction. Address pinned to the vault's Staker PDA.
    #[account(
        mut,
        seeds = [STAKER_SEED, staking_pool.key().as_ref(), vault.key().as_ref()],
        bump,
        seeds::program = staking_program.key()
    )]
    pub position: UncheckedAccount<'info>,

    // =========================================================================
    // Programs
    // =========================================================================

    pub staking_program: Program<'info, RewardStaking>,
    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn handler_initialize_vault(ctx: Context<InitializeVault>) -> Result<()> {
    // =========================================================================
    // Store Configuration
    // =========================================================================

    let vault = &mut ctx.accounts.vault;

    vault.strategist = ctx.accounts.strategist.key();
    vault.asset_mint = ctx.accounts.asset_mint.key();
    vault.share_mint = ctx.accounts.share_mint.key();
    vault.vault_assets = ctx.accounts.vault_assets.key();
    vault.staking_pool = ctx.accounts.staking_pool.key();
    vault.position = ctx.accounts.position.key();

    vault.strategist_fee_bps = DEFAULT_STRATEGIST_FEE_BPS;
    vault.harvest_fee_bps = DEFAULT_HARVEST_FEE_BPS;

    vault.bump = ctx.bumps.vault;
    vault.share_mint_bump = ctx.bumps.share_mint;
    vault.vault_assets_bump = ctx.bumps.vault_assets;

    let vault = &ctx.accounts.vault;
    let seeds = vault.signer_seeds();
    let signer_seeds = &[&seeds[..]];

    // =========================================================================
    // Open Staking Position (owner: Vault PDA, rent: strategist)
    // =========================================================================

    reward_staking::cpi::open_position(CpiContext::new_with_signer(
        ctx.accounts.staking_program.to_account_info(),
        reward_staking::cpi::accounts::OpenPosition {
            owner: vault.to_account_info(),
            payer: ctx.accounts.strategist.to_account_info(),
            staking_pool: ctx.accounts.staking_pool.to_account_info(),
            staker: ctx.accounts.position.to_account_info(),
            system_program: ctx.accounts.system_program.to_account_info(),
        },
        signer_seeds,
    ))?;

    // =========================================================================
    // Unlimited Allowance: vault_assets -> staking pool
    // =========================================================================

    token::approve(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Approve {
                to: ctx.accounts.vault_assets.to_account_info(),
                delegate: ctx.accounts.staking_pool.to_account_info(),
                authority: vault.to_account_info(),
            },
            signer_seeds,
        ),
        u64::MAX,
    )?;

    emit!(VaultInitialized {
        vault: vault.key(),
        strategist: vault.strategist,
        asset_mint: vault.asset_mint,
        share_mint: vault.share_mint,
        staking_pool: vault.staking_pool,
    });

    msg!("Vault initialized!");
    msg!("Strategist: {}", vault.strategist);
    msg!("Asset mint: {}", vault.asset_mint);
    msg!("Share mint: {}", vault.share_mint);
    msg!("Staking pool: {}", vault.staking_pool);
    msg!(
        "Fees: strategist {} BPS, harvester {} BPS",
        vault.strategist_fee_bps,
        vault.harvest_fee_bps
    );

    Ok(())
}
