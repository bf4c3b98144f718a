// =============================================================================
// Strategist Instructions
// =============================================================================
// Fee changes and the stray-token sweep. Only vault.strategist may call these;
// the check runs first, before any validation of the arguments.
// =============================================================================

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::*;
use crate::error::VaultError;
use crate::events::{HarvestFeeUpdated, StrategistFeeUpdated, TokensCleared};
use crate::state::Vault;

// =============================================================================
// Fee Updates
// =============================================================================

#[derive(Accounts)]
pub struct UpdateFee<'info> {
    pub strategist: Signer<'info>,

    #[account(
        mut,
        seeds = [VAULT_SEED, vault.asset_mint.as_ref()],
        bump = vault.bump
    )]
    pub vault: Account<'info, Vault>,
}

/// Set the strategist fee (max MAX_STRATEGIST_FEE_BPS)
pub fn handler_set_strategist_fee(ctx: Context<UpdateFee>, fee_bps: u16) -> Result<()> {
    let vault = &mut ctx.accounts.vault;
    let old_fee = vault.strategist_fee_bps;

    vault.set_strategist_fee(&ctx.accounts.strategist.key(), fee_bps)?;

    emit!(StrategistFeeUpdated {
        vault: vault.key(),
        strategist_fee_bps: fee_bps,
    });

    msg!("Strategist fee updated: {} -> {} BPS", old_fee, fee_bps);

    Ok(())
}

/// Set the harvest fee (max MAX_HARVEST_FEE_BPS)
pub fn handler_set_harvest_fee(ctx: Context<UpdateFee>, fee_bps: u16) -> Result<()> {
    let vault = &mut ctx.accounts.vault;
    let old_fee = vault.harvest_fee_bps;

    vault.set_harvest_fee(&ctx.accounts.strategist.key(), fee_bps)?;

    emit!(HarvestFeeUpdated {
        vault: vault.key(),
        harvest_fee_bps: fee_bps,
    });

    msg!("Harvest fee updated: {} -> {} BPS", old_fee, fee_bps);

    Ok(())
}

// =============================================================================
// Clear Tokens
// =============================================================================

/// Sweep any token account held by the vault PDA to the strategist.
///
/// Works for any mint, the base asset included. vault_assets is empty between
/// instructions, so sweeping it normally moves nothing.
#[derive(Accounts)]
pub struct ClearTokens<'info> {
    pub strategist: Signer<'info>,

    #[account(
        seeds = [VAULT_SEED, vault.asset_mint.as_ref()],
        bump = vault.bump
    )]
    pub vault: Account<'info, Vault>,

    /// Any token account whose authority is the vault PDA
    #[account(
        mut,
        constraint = stray_tokens.owner == vault.key() @ VaultError::InvalidTokenAccountOwner
    )]
    pub stray_tokens: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = strategist_tokens.mint == stray_tokens.mint @ VaultError::InvalidAssetMint,
        constraint = strategist_tokens.owner == vault.strategist @ VaultError::InvalidTokenAccountOwner
    )]
    pub strategist_tokens: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler_clear_tokens(ctx: Context<ClearTokens>) -> Result<()> {
    let vault = &ctx.accounts.vault;
    vault.require_strategist(&ctx.accounts.strategist.key())?;

    let mint = ctx.accounts.stray_tokens.mint;
    let amount = ctx.accounts.stray_tokens.amount;

    if amount > 0 {
        let seeds = vault.signer_seeds();
        token::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.stray_tokens.to_account_info(),
                    to: ctx.accounts.strategist_tokens.to_account_info(),
                    authority: vault.to_account_info(),
                },
                &[&seeds[..]],
            ),
            amount,
        )?;
    }

    emit!(TokensCleared {
        vault: vault.key(),
        mint,
        amount,
    });

    msg!("Cleared {} of mint {} to strategist", amount, mint);

    Ok(())
}
