// =============================================================================
// Vault Accounting
// =============================================================================
// Ordering rules for deposit, withdraw and harvest. Every operation reads the
// position, share supply and held balance fresh from its collaborators at the
// moment it needs them and passes the values through the Vault formulas
// explicitly. Nothing is carried between operations.
//
// The collaborators are traits so the same sequencing runs on-chain through
// CPI (see `adapter`) and in tests against an in-memory world.
// =============================================================================

use anchor_lang::prelude::*;
use reward_staking::state::{Staker, StakingPool};

use crate::error::VaultError;
use crate::state::Vault;

/// The vault's position as reported by the staking program
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PositionSnapshot {
    /// Principal currently staked
    pub deposited: u64,
    /// Rewards accrued and not yet claimed
    pub unclaimed: u64,
}

impl PositionSnapshot {
    pub fn read(pool: &StakingPool, position: &Staker) -> Result<Self> {
        Ok(Self {
            deposited: position.staked_amount,
            unclaimed: position.unclaimed_rewards(pool.reward_per_token)?,
        })
    }
}

/// Fees carved out of one batch of claimed rewards
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeeSplit {
    pub strategist: u64,
    pub harvester: u64,
}

// =============================================================================
// Collaborators
// =============================================================================

/// The external staking position held by the vault
pub trait PositionService {
    /// Current deposited and unclaimed totals, read fresh
    fn snapshot(&mut self) -> Result<PositionSnapshot>;

    /// Stake `amount` from the vault's held balance
    fn stake(&mut self, amount: u64) -> Result<()>;

    /// Claim every pending reward into the vault's held balance
    fn claim(&mut self) -> Result<()>;

    /// Withdraw all principal and claim all rewards into the held balance
    fn exit(&mut self) -> Result<()>;
}

/// Base-asset movements in and out of the vault
pub trait AssetTransfer {
    /// Base asset sitting in the vault itself
    fn held_balance(&mut self) -> Result<u64>;

    /// Move `amount` from `holder` into the vault
    fn pull(&mut self, holder: &Pubkey, amount: u64) -> Result<()>;

    /// Move `amount` from the vault to `recipient`
    fn send(&mut self, recipient: &Pubkey, amount: u64) -> Result<()>;
}

/// Share token bookkeeping
pub trait ShareLedger {
    fn total_supply(&mut self) -> Result<u64>;
    fn balance_of(&mut self, holder: &Pubkey) -> Result<u64>;
    fn mint(&mut self, holder: &Pubkey, amount: u64) -> Result<()>;
    fn burn(&mut self, holder: &Pubkey, amount: u64) -> Result<()>;
}

// =============================================================================
// Operations
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WithdrawReceipt {
    /// Sent to the withdrawer, harvest fee included
    pub amount_paid: u64,
    pub fees: FeeSplit,
    /// Staked back for the remaining holders
    pub restaked: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HarvestReceipt {
    pub fees: FeeSplit,
    /// Reward residue staked back into the position
    pub compounded: u64,
}

/// Issue shares for `amount` and stake it. Returns the shares minted.
///
/// Shares are priced against the position before the new principal lands.
pub fn deposit<X>(vault: &Vault, ext: &mut X, depositor: &Pubkey, amount: u64) -> Result<u64>
where
    X: PositionService + AssetTransfer + ShareLedger,
{
    require!(amount > 0, VaultError::InvalidAmount);

    let share_supply = ext.total_supply()?;
    let snapshot = ext.snapshot()?;
    let shares = vault.shares_for_deposit(amount, share_supply, &snapshot)?;

    ext.mint(depositor, shares)?;
    ext.pull(depositor, amount)?;
    ext.stake(amount)?;

    Ok(shares)
}

/// Burn `shares` and pay the withdrawer their part of the whole position.
///
/// The position is unwound completely, fees are paid out of the claimed
/// rewards, and whatever belongs to the other holders is staked again.
pub fn withdraw<X>(
    vault: &Vault,
    ext: &mut X,
    withdrawer: &Pubkey,
    shares: u64,
) -> Result<WithdrawReceipt>
where
    X: PositionService + AssetTransfer + ShareLedger,
{
    require!(shares > 0, VaultError::InvalidAmount);
    require!(
        ext.balance_of(withdrawer)? >= shares,
        VaultError::InsufficientShares
    );

    // Fees come from the rewards pending before the unwind
    let snapshot = ext.snapshot()?;
    let fees = vault.fee_split(snapshot.unclaimed)?;

    ext.exit()?;

    let share_supply = ext.total_supply()?;
    let held = ext.held_balance()?;
    let amount_paid = vault.withdraw_payout(shares, held, share_supply, &fees)?;

    ext.burn(withdrawer, shares)?;
    send_nonzero(ext, &vault.strategist, fees.strategist)?;
    send_nonzero(ext, withdrawer, amount_paid)?;

    let restaked = ext.held_balance()?;
    stake_nonzero(ext, restaked)?;

    Ok(WithdrawReceipt {
        amount_paid,
        fees,
        restaked,
    })
}

/// Claim pending rewards, pay both fees and compound the rest.
pub fn harvest<X>(vault: &Vault, ext: &mut X, harvester: &Pubkey) -> Result<HarvestReceipt>
where
    X: PositionService + AssetTransfer,
{
    let snapshot = ext.snapshot()?;
    let fees = vault.fee_split(snapshot.unclaimed)?;

    ext.claim()?;

    send_nonzero(ext, &vault.strategist, fees.strategist)?;
    send_nonzero(ext, harvester, fees.harvester)?;

    let compounded = ext.held_balance()?;
    stake_nonzero(ext, compounded)?;

    Ok(HarvestReceipt { fees, compounded })
}

fn send_nonzero<X: AssetTransfer>(ext: &mut X, recipient: &Pubkey, amount: u64) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    ext.send(recipient, amount)
}

fn stake_nonzero<X: PositionService>(ext: &mut X, amount: u64) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    ext.stake(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{DEFAULT_HARVEST_FEE_BPS, DEFAULT_STRATEGIST_FEE_BPS};
    use crate::math::{checked_add, checked_sub};
    use proptest::prelude::*;
    use std::collections::HashMap;

    /// In-memory position, token balances and share ledger
    #[derive(Default)]
    struct MockWorld {
        deposited: u64,
        unclaimed: u64,
        held: u64,
        wallets: HashMap<Pubkey, u64>,
        shares: HashMap<Pubkey, u64>,
        supply: u64,
    }

    impl MockWorld {
        fn fund(&mut self, who: Pubkey, amount: u64) {
            *self.wallets.entry(who).or_default() += amount;
        }

        fn accrue(&mut self, rewards: u64) {
            self.unclaimed += rewards;
        }

        fn wallet(&self, who: &Pubkey) -> u64 {
            self.wallets.get(who).copied().unwrap_or_default()
        }

        fn shares_of(&self, who: &Pubkey) -> u64 {
            self.shares.get(who).copied().unwrap_or_default()
        }

        fn value_of(&self, vault: &Vault, who: &Pubkey) -> u64 {
            let snapshot = PositionSnapshot {
                deposited: self.deposited,
                unclaimed: self.unclaimed,
            };
            vault
                .assets_for_shares(self.shares_of(who), self.supply, &snapshot)
                .unwrap()
        }
    }

    impl PositionService for MockWorld {
        fn snapshot(&mut self) -> Result<PositionSnapshot> {
            Ok(PositionSnapshot {
                deposited: self.deposited,
                unclaimed: self.unclaimed,
            })
        }

        fn stake(&mut self, amount: u64) -> Result<()> {
            self.held = checked_sub(self.held, amount)?;
            self.deposited = checked_add(self.deposited, amount)?;
            Ok(())
        }

        fn claim(&mut self) -> Result<()> {
            self.held = checked_add(self.held, self.unclaimed)?;
            self.unclaimed = 0;
            Ok(())
        }

        fn exit(&mut self) -> Result<()> {
            self.held = checked_add(self.held, self.deposited)?;
            self.held = checked_add(self.held, self.unclaimed)?;
            self.deposited = 0;
            self.unclaimed = 0;
            Ok(())
        }
    }

    impl AssetTransfer for MockWorld {
        fn held_balance(&mut self) -> Result<u64> {
            Ok(self.held)
        }

        fn pull(&mut self, holder: &Pubkey, amount: u64) -> Result<()> {
            let wallet = self.wallets.entry(*holder).or_default();
            *wallet = checked_sub(*wallet, amount)?;
            self.held = checked_add(self.held, amount)?;
            Ok(())
        }

        fn send(&mut self, recipient: &Pubkey, amount: u64) -> Result<()> {
            self.held = checked_sub(self.held, amount)?;
            let wallet = self.wallets.entry(*recipient).or_default();
            *wallet = checked_add(*wallet, amount)?;
            Ok(())
        }
    }

    impl ShareLedger for MockWorld {
        fn total_supply(&mut self) -> Result<u64> {
            Ok(self.supply)
        }

        fn balance_of(&mut self, holder: &Pubkey) -> Result<u64> {
            Ok(self.shares_of(holder))
        }

        fn mint(&mut self, holder: &Pubkey, amount: u64) -> Result<()> {
            *self.shares.entry(*holder).or_default() += amount;
            self.supply = checked_add(self.supply, amount)?;
            Ok(())
        }

        fn burn(&mut self, holder: &Pubkey, amount: u64) -> Result<()> {
            let balance = self.shares.entry(*holder).or_default();
            *balance = checked_sub(*balance, amount)?;
            self.supply = checked_sub(self.supply, amount)?;
            Ok(())
        }
    }

    fn key(byte: u8) -> Pubkey {
        Pubkey::new_from_array([byte; 32])
    }

    fn strategist() -> Pubkey {
        key(1)
    }

    fn vault() -> Vault {
        Vault {
            strategist: strategist(),
            strategist_fee_bps: DEFAULT_STRATEGIST_FEE_BPS,
            harvest_fee_bps: DEFAULT_HARVEST_FEE_BPS,
            ..Default::default()
        }
    }

    #[test]
    fn test_first_deposit_mints_one_to_one() {
        let vault = vault();
        let mut world = MockWorld::default();
        let alice = key(2);
        world.fund(alice, 1000);

        let shares = deposit(&vault, &mut world, &alice, 1000).unwrap();

        assert_eq!(shares, 1000);
        assert_eq!(world.supply, 1000);
        assert_eq!(world.deposited, 1000);
        assert_eq!(world.held, 0);
        assert_eq!(world.wallet(&alice), 0);
    }

    #[test]
    fn test_deposit_priced_before_new_principal() {
        let vault = vault();
        let mut world = MockWorld::default();
        let (alice, bob) = (key(2), key(3));
        world.fund(alice, 1000);
        world.fund(bob, 1097);

        deposit(&vault, &mut world, &alice, 1000).unwrap();
        world.accrue(100);

        // Discounted assets are 1097 against 1000 shares
        let shares = deposit(&vault, &mut world, &bob, 1097).unwrap();
        assert_eq!(shares, 1000);
        assert_eq!(world.held, 0);
        assert_eq!(world.unclaimed, 100);
    }

    #[test]
    fn test_zero_amounts_rejected() {
        let vault = vault();
        let mut world = MockWorld::default();
        let alice = key(2);
        world.fund(alice, 1000);
        deposit(&vault, &mut world, &alice, 1000).unwrap();

        assert_eq!(
            deposit(&vault, &mut world, &alice, 0).unwrap_err(),
            error!(VaultError::InvalidAmount)
        );
        assert_eq!(
            withdraw(&vault, &mut world, &alice, 0).unwrap_err(),
            error!(VaultError::InvalidAmount)
        );
        assert_eq!(world.supply, 1000);
        assert_eq!(world.deposited, 1000);
    }

    #[test]
    fn test_withdraw_more_than_owned_rejected() {
        let vault = vault();
        let mut world = MockWorld::default();
        let (alice, bob) = (key(2), key(3));
        world.fund(alice, 1000);
        world.fund(bob, 10);
        deposit(&vault, &mut world, &alice, 1000).unwrap();
        deposit(&vault, &mut world, &bob, 10).unwrap();

        assert_eq!(
            withdraw(&vault, &mut world, &bob, 11).unwrap_err(),
            error!(VaultError::InsufficientShares)
        );
        assert_eq!(world.deposited, 1010);
        assert_eq!(world.shares_of(&bob), 10);
    }

    #[test]
    fn test_harvest_end_to_end() {
        let vault = vault();
        let mut world = MockWorld::default();
        let (depositor, harvester) = (key(2), key(4));
        world.fund(depositor, 1000);

        let shares = deposit(&vault, &mut world, &depositor, 1000).unwrap();
        assert_eq!(shares, 1000);
        assert_eq!(world.supply, 1000);

        world.accrue(100);
        let receipt = harvest(&vault, &mut world, &harvester).unwrap();

        assert_eq!(receipt.fees, FeeSplit { strategist: 2, harvester: 1 });
        assert_eq!(receipt.compounded, 97);
        assert_eq!(world.wallet(&strategist()), 2);
        assert_eq!(world.wallet(&harvester), 1);
        assert_eq!(world.deposited, 1097);
        assert_eq!(world.unclaimed, 0);
        assert_eq!(world.held, 0);
    }

    #[test]
    fn test_harvest_with_nothing_pending() {
        let vault = vault();
        let mut world = MockWorld::default();
        let depositor = key(2);
        world.fund(depositor, 500);
        deposit(&vault, &mut world, &depositor, 500).unwrap();

        let receipt = harvest(&vault, &mut world, &key(4)).unwrap();

        assert_eq!(receipt.fees, FeeSplit::default());
        assert_eq!(receipt.compounded, 0);
        assert_eq!(world.deposited, 500);
        assert_eq!(world.wallet(&key(4)), 0);
    }

    #[test]
    fn test_harvest_raises_principal_without_lowering_share_value() {
        let vault = vault();
        let mut world = MockWorld::default();
        let depositor = key(2);
        world.fund(depositor, 12_345);
        deposit(&vault, &mut world, &depositor, 12_345).unwrap();
        world.accrue(777);

        let before = world.snapshot().unwrap();
        let nav_before = vault.discounted_net_assets(&before).unwrap();

        harvest(&vault, &mut world, &key(4)).unwrap();

        let after = world.snapshot().unwrap();
        let nav_after = vault.discounted_net_assets(&after).unwrap();
        assert!(after.deposited > before.deposited);
        // Supply is unchanged, so comparing totals compares per-share value
        assert!(nav_after >= nav_before);
    }

    #[test]
    fn test_withdraw_conserves_remaining_holder_value() {
        let vault = vault();
        let mut world = MockWorld::default();
        let (alice, bob) = (key(2), key(3));
        world.fund(alice, 600);
        world.fund(bob, 400);

        deposit(&vault, &mut world, &alice, 600).unwrap();
        deposit(&vault, &mut world, &bob, 400).unwrap();
        world.accrue(100);

        let bob_before = world.value_of(&vault, &bob);
        assert_eq!(bob_before, 438);

        let receipt = withdraw(&vault, &mut world, &alice, 600).unwrap();

        // 600 * (1100 - 1 - 2) / 1000 + 1
        assert_eq!(receipt.amount_paid, 659);
        assert_eq!(receipt.fees, FeeSplit { strategist: 2, harvester: 1 });
        assert_eq!(receipt.restaked, 439);
        assert_eq!(world.wallet(&alice), 659);
        assert_eq!(world.wallet(&strategist()), 2);
        assert_eq!(world.held, 0);
        assert_eq!(world.supply, 400);

        let bob_after = world.value_of(&vault, &bob);
        assert!(bob_after.abs_diff(bob_before) <= 1);
    }

    #[test]
    fn test_last_withdrawal_empties_position() {
        let vault = vault();
        let mut world = MockWorld::default();
        let alice = key(2);
        world.fund(alice, 1000);
        deposit(&vault, &mut world, &alice, 1000).unwrap();
        world.accrue(100);

        let receipt = withdraw(&vault, &mut world, &alice, 1000).unwrap();

        assert_eq!(receipt.amount_paid, 1098);
        assert_eq!(receipt.restaked, 0);
        assert_eq!(world.deposited, 0);
        assert_eq!(world.supply, 0);
        assert_eq!(world.held, 0);

        // The next depositor starts at the bootstrap price again
        world.fund(key(3), 50);
        assert_eq!(deposit(&vault, &mut world, &key(3), 50).unwrap(), 50);
    }

    #[test]
    fn test_strategist_withdrawing_collects_both_payments() {
        let vault = vault();
        let mut world = MockWorld::default();
        let (alice, strategist) = (key(2), strategist());
        world.fund(alice, 500);
        world.fund(strategist, 500);
        deposit(&vault, &mut world, &alice, 500).unwrap();
        deposit(&vault, &mut world, &strategist, 500).unwrap();
        world.accrue(100);

        let receipt = withdraw(&vault, &mut world, &strategist, 500).unwrap();

        assert_eq!(world.wallet(&strategist), receipt.amount_paid + receipt.fees.strategist);
        assert_eq!(world.held, 0);
    }

    proptest! {
        #[test]
        fn prop_other_deposits_never_dilute(
            first in 1u64..1_000_000_000,
            rewards in 0u64..1_000_000_000,
            second in 1u64..1_000_000_000,
        ) {
            let vault = vault();
            let mut world = MockWorld::default();
            let (alice, bob) = (key(2), key(3));
            world.fund(alice, first);
            world.fund(bob, second);

            deposit(&vault, &mut world, &alice, first).unwrap();
            world.accrue(rewards);
            let before = world.value_of(&vault, &alice);

            deposit(&vault, &mut world, &bob, second).unwrap();

            prop_assert!(world.value_of(&vault, &alice) >= before);
            prop_assert_eq!(world.held, 0);
        }

        #[test]
        fn prop_withdrawal_leaves_others_whole(
            first in 1u64..1_000_000_000,
            second in 1u64..1_000_000_000,
            rewards in 0u64..1_000_000_000,
        ) {
            let vault = vault();
            let mut world = MockWorld::default();
            let (alice, bob) = (key(2), key(3));
            world.fund(alice, first);
            world.fund(bob, second);

            deposit(&vault, &mut world, &alice, first).unwrap();
            let bob_shares = deposit(&vault, &mut world, &bob, second).unwrap();
            prop_assume!(bob_shares > 0);
            world.accrue(rewards);
            let before = world.value_of(&vault, &bob);

            let alice_shares = world.shares_of(&alice);
            withdraw(&vault, &mut world, &alice, alice_shares).unwrap();

            // Separately truncated fees can exceed the combined discount by one
            prop_assert!(world.value_of(&vault, &bob) + 1 >= before);
            prop_assert_eq!(world.held, 0);
        }
    }
}
