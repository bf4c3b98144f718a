// =============================================================================
// Vault State Account
// =============================================================================
// One Vault per base-asset mint. It holds configuration only: fee parameters,
// the strategist identity, and the addresses of the accounts it controls.
// Share supply lives in the SPL mint and position totals live in the staking
// program, so every price below is computed from values passed in by the
// caller, never from anything cached here.
// =============================================================================

use anchor_lang::prelude::*;

use crate::accounting::{FeeSplit, PositionSnapshot};
use crate::constants::{BPS_DENOMINATOR, MAX_HARVEST_FEE_BPS, MAX_STRATEGIST_FEE_BPS, VAULT_SEED};
use crate::error::VaultError;
use crate::math::{apply_bps, checked_add, checked_sub, mul_div};

/// The Vault account.
///
/// PDA derived from ["vault", asset_mint_pubkey]. The PDA signs for the share
/// mint, the vault's asset account and the vault's staking position.
#[account]
#[derive(InitSpace, Default)]
pub struct Vault {
    // =========================================================================
    // Authority
    // =========================================================================

    /// Changes fees, sweeps stray tokens, receives the strategist fee
    pub strategist: Pubkey,

    // =========================================================================
    // Accounts controlled by the vault
    // =========================================================================

    /// Base asset: deposited, staked and paid out as rewards
    pub asset_mint: Pubkey,

    /// Share token mint (authority: this PDA)
    pub share_mint: Pubkey,

    /// Vault's own base-asset account. Zero balance between instructions.
    pub vault_assets: Pubkey,

    /// Staking pool the vault compounds into
    pub staking_pool: Pubkey,

    /// The vault's Staker account inside the staking program
    pub position: Pubkey,

    // =========================================================================
    // Fee Configuration (basis points of harvested rewards)
    // =========================================================================

    /// Strategist cut, at most MAX_STRATEGIST_FEE_BPS
    pub strategist_fee_bps: u16,

    /// Harvester cut, at most MAX_HARVEST_FEE_BPS
    pub harvest_fee_bps: u16,

    // =========================================================================
    // PDA Bumps
    // =========================================================================

    pub bump: u8,

    /// Re-derives share_mint in every instruction that touches it
    pub share_mint_bump: u8,

    /// Re-derives vault_assets in deposit, withdraw and harvest
    pub vault_assets_bump: u8,
}

impl Vault {
    pub fn signer_seeds(&self) -> [&[u8]; 3] {
        [
            VAULT_SEED,
            self.asset_mint.as_ref(),
            std::slice::from_ref(&self.bump),
        ]
    }

    pub fn require_strategist(&self, caller: &Pubkey) -> Result<()> {
        require_keys_eq!(*caller, self.strategist, VaultError::Unauthorized);
        Ok(())
    }

    // =========================================================================
    // Fee parameters
    // =========================================================================

    pub fn set_strategist_fee(&mut self, caller: &Pubkey, fee_bps: u16) -> Result<()> {
        self.require_strategist(caller)?;
        require!(fee_bps <= MAX_STRATEGIST_FEE_BPS, VaultError::ExceedsMaximum);

        self.strategist_fee_bps = fee_bps;
        Ok(())
    }

    pub fn set_harvest_fee(&mut self, caller: &Pubkey, fee_bps: u16) -> Result<()> {
        self.require_strategist(caller)?;
        require!(fee_bps <= MAX_HARVEST_FEE_BPS, VaultError::ExceedsMaximum);

        self.harvest_fee_bps = fee_bps;
        Ok(())
    }

    /// Split unclaimed rewards into (strategist, harvester) fees.
    /// Each fee is truncated on its own.
    pub fn fee_split(&self, unclaimed: u64) -> Result<FeeSplit> {
        Ok(FeeSplit {
            strategist: apply_bps(unclaimed, self.strategist_fee_bps)?,
            harvester: apply_bps(unclaimed, self.harvest_fee_bps)?,
        })
    }

    // =========================================================================
    // Valuation
    // =========================================================================

    /// Position value net of the fees a harvest would take.
    ///
    /// assets = deposited + unclaimed - unclaimed * (strategist + harvest) / 10000
    ///
    /// The combined discount is truncated once, so it can be one unit smaller
    /// than the sum of the two fees taken separately.
    pub fn discounted_net_assets(&self, snapshot: &PositionSnapshot) -> Result<u64> {
        let combined_bps = self
            .strategist_fee_bps
            .checked_add(self.harvest_fee_bps)
            .ok_or(error!(VaultError::MathOverflow))?;
        let discount = mul_div(
            snapshot.unclaimed,
            combined_bps as u64,
            BPS_DENOMINATOR as u64,
        )?;
        let discounted_rewards = checked_sub(snapshot.unclaimed, discount)?;

        checked_add(snapshot.deposited, discounted_rewards)
    }

    /// Undiscounted position value
    pub fn total_assets(&self, snapshot: &PositionSnapshot) -> Result<u64> {
        checked_add(snapshot.deposited, snapshot.unclaimed)
    }

    /// What the next harvester would earn. Harvest fee only.
    pub fn pending_harvest_fees(&self, snapshot: &PositionSnapshot) -> Result<u64> {
        apply_bps(snapshot.unclaimed, self.harvest_fee_bps)
    }

    // =========================================================================
    // Share pricing
    // =========================================================================

    /// Shares to issue for `amount`, priced against the pre-deposit position.
    ///
    /// - Empty vault: 1 share per unit (bootstrap price)
    /// - Otherwise: amount * supply / discounted_net_assets
    pub fn shares_for_deposit(
        &self,
        amount: u64,
        share_supply: u64,
        snapshot: &PositionSnapshot,
    ) -> Result<u64> {
        if share_supply == 0 {
            return Ok(amount);
        }

        let net_assets = self.discounted_net_assets(snapshot)?;
        mul_div(amount, share_supply, net_assets)
    }

    /// Payout for burning `shares` once the whole position sits in the vault.
    ///
    /// payout = shares * (held - harvester - strategist) / supply + harvester
    ///
    /// The harvester fee goes to the withdrawer, who triggered the implicit
    /// harvest by unwinding the position.
    pub fn withdraw_payout(
        &self,
        shares: u64,
        held: u64,
        share_supply: u64,
        fees: &FeeSplit,
    ) -> Result<u64> {
        let distributable = checked_sub(checked_sub(held, fees.harvester)?, fees.strategist)?;
        let pro_rata = mul_div(shares, distributable, share_supply)?;

        checked_add(pro_rata, fees.harvester)
    }

    /// Holder's claim on the discounted position. Zero while no shares exist.
    pub fn assets_for_shares(
        &self,
        shares: u64,
        share_supply: u64,
        snapshot: &PositionSnapshot,
    ) -> Result<u64> {
        if share_supply == 0 {
            return Ok(0);
        }

        let net_assets = self.discounted_net_assets(snapshot)?;
        mul_div(shares, net_assets, share_supply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{DEFAULT_HARVEST_FEE_BPS, DEFAULT_STRATEGIST_FEE_BPS};

    fn strategist() -> Pubkey {
        Pubkey::new_from_array([7; 32])
    }

    fn vault() -> Vault {
        Vault {
            strategist: strategist(),
            strategist_fee_bps: DEFAULT_STRATEGIST_FEE_BPS,
            harvest_fee_bps: DEFAULT_HARVEST_FEE_BPS,
            ..Default::default()
        }
    }

    fn snapshot(deposited: u64, unclaimed: u64) -> PositionSnapshot {
        PositionSnapshot { deposited, unclaimed }
    }

    #[test]
    fn test_strategist_fee_ceiling() {
        let mut vault = vault();

        let result = vault.set_strategist_fee(&strategist(), 201);
        assert_eq!(result.unwrap_err(), error!(VaultError::ExceedsMaximum));

        vault.set_strategist_fee(&strategist(), 0).unwrap();
        vault.set_strategist_fee(&strategist(), 200).unwrap();
        assert_eq!(vault.strategist_fee_bps, 200);
    }

    #[test]
    fn test_harvest_fee_ceiling() {
        let mut vault = vault();
        vault.harvest_fee_bps = 50;

        let result = vault.set_harvest_fee(&strategist(), 101);
        assert_eq!(result.unwrap_err(), error!(VaultError::ExceedsMaximum));
        assert_eq!(vault.harvest_fee_bps, 50);

        vault.set_harvest_fee(&strategist(), 100).unwrap();
        assert_eq!(vault.harvest_fee_bps, 100);
    }

    #[test]
    fn test_fee_setters_reject_other_callers() {
        let mut vault = vault();
        let intruder = Pubkey::new_from_array([9; 32]);

        assert_eq!(
            vault.set_strategist_fee(&intruder, 10).unwrap_err(),
            error!(VaultError::Unauthorized)
        );
        assert_eq!(
            vault.set_harvest_fee(&intruder, 10).unwrap_err(),
            error!(VaultError::Unauthorized)
        );
        assert_eq!(vault.strategist_fee_bps, DEFAULT_STRATEGIST_FEE_BPS);
        assert_eq!(vault.harvest_fee_bps, DEFAULT_HARVEST_FEE_BPS);
    }

    #[test]
    fn test_authorization_checked_before_ceiling() {
        let mut vault = vault();
        let intruder = Pubkey::new_from_array([9; 32]);

        assert_eq!(
            vault.set_strategist_fee(&intruder, 500).unwrap_err(),
            error!(VaultError::Unauthorized)
        );
    }

    #[test]
    fn test_discounted_net_assets() {
        let vault = vault();

        assert_eq!(vault.discounted_net_assets(&snapshot(1000, 0)).unwrap(), 1000);
        // 3% of 100 taken off the rewards
        assert_eq!(vault.discounted_net_assets(&snapshot(1000, 100)).unwrap(), 1097);
        // 3% of 50 = 1.5, truncated to 1
        assert_eq!(vault.discounted_net_assets(&snapshot(1000, 50)).unwrap(), 1049);
    }

    #[test]
    fn test_read_only_projections() {
        let vault = vault();
        let snap = snapshot(1000, 250);

        assert_eq!(vault.total_assets(&snap).unwrap(), 1250);
        // 1% of 250 = 2.5
        assert_eq!(vault.pending_harvest_fees(&snap).unwrap(), 2);
    }

    #[test]
    fn test_fee_split_truncates_each_fee() {
        let vault = vault();

        let fees = vault.fee_split(100).unwrap();
        assert_eq!(fees, FeeSplit { strategist: 2, harvester: 1 });

        let fees = vault.fee_split(99).unwrap();
        assert_eq!(fees, FeeSplit { strategist: 1, harvester: 0 });
    }

    #[test]
    fn test_bootstrap_share_price() {
        let vault = vault();

        assert_eq!(vault.shares_for_deposit(1000, 0, &snapshot(0, 0)).unwrap(), 1000);
        // Leftover position value does not matter while no shares exist
        assert_eq!(vault.shares_for_deposit(1000, 0, &snapshot(5, 3)).unwrap(), 1000);
    }

    #[test]
    fn test_shares_priced_on_discounted_assets() {
        let vault = vault();

        // 1000 shares over 1097 discounted assets
        let shares = vault
            .shares_for_deposit(1097, 1000, &snapshot(1000, 100))
            .unwrap();
        assert_eq!(shares, 1000);
    }

    #[test]
    fn test_worthless_position_cannot_price_shares() {
        let vault = vault();

        assert_eq!(
            vault.shares_for_deposit(10, 1000, &snapshot(0, 0)).unwrap_err(),
            error!(VaultError::DivisionByZero)
        );
    }

    #[test]
    fn test_withdraw_payout_includes_harvest_fee() {
        let vault = vault();
        let fees = vault.fee_split(100).unwrap();

        // 600 of 1000 shares, 1100 held: 600 * 1097 / 1000 + 1
        let payout = vault.withdraw_payout(600, 1100, 1000, &fees).unwrap();
        assert_eq!(payout, 659);

        // Last holder takes everything but the strategist fee
        let payout = vault.withdraw_payout(1000, 1100, 1000, &fees).unwrap();
        assert_eq!(payout, 1098);
    }

    #[test]
    fn test_assets_for_shares() {
        let vault = vault();
        let snap = snapshot(1000, 100);

        assert_eq!(vault.assets_for_shares(400, 1000, &snap).unwrap(), 438);
        assert_eq!(vault.assets_for_shares(400, 0, &snap).unwrap(), 0);
    }
}
