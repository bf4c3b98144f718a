// =============================================================================
// Compounding Vault
// =============================================================================
//
// Share-based autocompounding vault over a reward-staking position:
// - Users deposit the base asset and receive shares
// - Everything deposited is staked in one vault-owned position
// - Anyone can harvest: rewards are claimed, the strategist and the caller
//   take their fee, and the rest is staked again for all holders
// - Withdrawals unwind the whole position, pay the withdrawer, and restake
//   the remainder
// =============================================================================

pub mod accounting;
pub mod adapter;
pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod math;
pub mod state;

use anchor_lang::prelude::*;

pub use constants::*;
pub use error::*;
pub use events::*;
pub use instructions::*;
pub use state::*;

declare_id!("3AwUxN1zrANCDBtT8TnoY5DrFGkh7kuy244vCnKT73k7");

#[program]
pub mod compounding_vault {
    use super::*;

    // =========================================================================
    // Vault Initialization
    // =========================================================================

    /// Create a vault over the staking pool for `asset_mint`
    ///
    /// Creates the Vault account, the share mint and the vault asset account,
    /// opens the vault's staking position and approves the staking pool to
    /// pull from the vault asset account. Signer becomes the strategist.
    pub fn initialize_vault(ctx: Context<InitializeVault>) -> Result<()> {
        instructions::initialize_vault::handler_initialize_vault(ctx)
    }

    // =========================================================================
    // Holder Operations
    // =========================================================================

    /// Deposit base asset and receive shares
    ///
    /// # Arguments
    /// * `amount` - Base asset to deposit (in base units)
    ///
    /// # Returns
    /// * Shares minted
    pub fn deposit(ctx: Context<Deposit>, amount: u64) -> Result<u64> {
        instructions::deposit::handler_deposit(ctx, amount)
    }

    /// Burn shares for their part of the position
    ///
    /// # Arguments
    /// * `shares` - Shares to burn
    ///
    /// # Returns
    /// * Base asset paid to the caller, harvest fee included
    pub fn withdraw(ctx: Context<Withdraw>, shares: u64) -> Result<u64> {
        instructions::withdraw::handler_withdraw(ctx, shares)
    }

    /// Compound pending rewards (permissionless)
    ///
    /// # Returns
    /// * Harvest fee paid to the caller
    pub fn harvest(ctx: Context<Harvest>) -> Result<u64> {
        instructions::harvest::handler_harvest(ctx)
    }

    // =========================================================================
    // Strategist Operations
    // =========================================================================

    /// Update the strategist fee (strategist only)
    ///
    /// # Arguments
    /// * `fee_bps` - Strategist share of harvested rewards in basis points
    ///
    /// # Requirements
    /// * Signer must be the strategist, else `Unauthorized`
    /// * At most 200 BPS (2%), else `ExceedsMaximum`
    pub fn set_strategist_fee(ctx: Context<UpdateFee>, fee_bps: u16) -> Result<()> {
        instructions::admin::handler_set_strategist_fee(ctx, fee_bps)
    }

    /// Update the harvest fee (strategist only)
    ///
    /// # Arguments
    /// * `fee_bps` - Harvester share of harvested rewards in basis points
    ///
    /// # Requirements
    /// * Signer must be the strategist, else `Unauthorized`
    /// * At most 100 BPS (1%), else `ExceedsMaximum`
    pub fn set_harvest_fee(ctx: Context<UpdateFee>, fee_bps: u16) -> Result<()> {
        instructions::admin::handler_set_harvest_fee(ctx, fee_bps)
    }

    /// Sweep a vault-owned token account to the strategist (strategist only)
    ///
    /// Any mint, the base asset included. Fails with `Unauthorized` for
    /// anyone but the strategist.
    pub fn clear_tokens(ctx: Context<ClearTokens>) -> Result<()> {
        instructions::admin::handler_clear_tokens(ctx)
    }

    // =========================================================================
    // Views
    // =========================================================================

    /// Staked principal plus unclaimed rewards
    ///
    /// # Returns
    /// * deposited + unclaimed
    pub fn total_assets(ctx: Context<VaultView>) -> Result<u64> {
        instructions::views::handler_total_assets(ctx)
    }

    /// Position value after the fees a harvest would take. Prices shares.
    ///
    /// # Returns
    /// * deposited + unclaimed - unclaimed * (strategist_fee + harvest_fee) / 10000
    pub fn discounted_net_assets(ctx: Context<VaultView>) -> Result<u64> {
        instructions::views::handler_discounted_net_assets(ctx)
    }

    /// Rewards accrued to the vault position and not yet claimed
    pub fn total_pending_rewards(ctx: Context<VaultView>) -> Result<u64> {
        instructions::views::handler_total_pending_rewards(ctx)
    }

    /// Harvest fee the next harvest would pay its caller
    ///
    /// # Returns
    /// * unclaimed * harvest_fee / 10000
    pub fn total_pending_harvest_fees(ctx: Context<VaultView>) -> Result<u64> {
        instructions::views::handler_total_pending_harvest_fees(ctx)
    }

    /// Value of the shares in `holder_shares`, net of pending fees
    pub fn total_staked_assets(ctx: Context<HolderView>) -> Result<u64> {
        instructions::views::handler_total_staked_assets(ctx)
    }
}
