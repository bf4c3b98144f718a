// =============================================================================
// CPI Adapter
// =============================================================================
// Implements the accounting collaborators on-chain:
// - PositionService -> reward_staking CPIs signed by the Vault PDA
// - AssetTransfer   -> SPL token transfers in and out of vault_assets
// - ShareLedger     -> SPL mint_to / burn on the share mint
//
// Every read reloads its account first. A CPI earlier in the same
// instruction may have changed it, and the deserialized copy Anchor handed
// us does not see that.
// =============================================================================

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Burn, Mint, MintTo, TokenAccount, Transfer};
use reward_staking::state::{Staker, StakingPool};

use crate::accounting::{AssetTransfer, PositionService, PositionSnapshot, ShareLedger};
use crate::error::VaultError;
use crate::state::Vault;

pub struct VaultCpi<'a, 'info> {
    pub vault: &'a Account<'info, Vault>,

    /// Signer of the instruction: depositor, withdrawer or harvester
    pub caller: &'a Signer<'info>,

    /// Caller's base-asset account
    pub caller_assets: &'a mut Account<'info, TokenAccount>,

    /// Caller's share account. Absent for harvest.
    pub caller_shares: Option<&'a mut Account<'info, TokenAccount>>,

    /// Strategist's base-asset account. Absent for deposit.
    pub strategist_assets: Option<&'a mut Account<'info, TokenAccount>>,

    pub vault_assets: &'a mut Account<'info, TokenAccount>,

    /// Absent for harvest.
    pub share_mint: Option<&'a mut Account<'info, Mint>>,

    pub staking_pool: &'a mut Account<'info, StakingPool>,
    pub position: &'a mut Account<'info, Staker>,
    pub stake_vault: AccountInfo<'info>,

    /// Absent for deposit.
    pub reward_vault: Option<AccountInfo<'info>>,

    pub staking_program: AccountInfo<'info>,
    pub token_program: AccountInfo<'info>,
}

impl<'a, 'info> VaultCpi<'a, 'info> {
    fn require_caller(&self, holder: &Pubkey) -> Result<()> {
        require_keys_eq!(*holder, self.caller.key(), VaultError::UnknownRecipient);
        Ok(())
    }

    fn reward_vault(&self) -> Result<AccountInfo<'info>> {
        self.reward_vault
            .clone()
            .ok_or(error!(VaultError::MissingAccount))
    }

    /// Token account that receives payments addressed to `recipient`
    fn destination(&self, recipient: &Pubkey) -> Result<AccountInfo<'info>> {
        let payee = route_payment(
            recipient,
            &self.vault.strategist,
            &self.caller.key(),
            self.strategist_assets.is_some(),
        )?;

        match (payee, self.strategist_assets.as_deref()) {
            (Payee::Strategist, Some(strategist_assets)) => Ok(strategist_assets.to_account_info()),
            (Payee::Strategist, None) => err!(VaultError::MissingAccount),
            (Payee::Caller, _) => Ok(self.caller_assets.to_account_info()),
        }
    }
}

/// Which token account in the instruction a payment lands in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payee {
    Strategist,
    Caller,
}

/// Map a payment recipient onto the accounts the instruction carries.
///
/// The strategist's own account wins when it is present, so a strategist
/// who is also the caller is paid there.
pub fn route_payment(
    recipient: &Pubkey,
    strategist: &Pubkey,
    caller: &Pubkey,
    has_strategist_account: bool,
) -> Result<Payee> {
    if recipient == strategist && has_strategist_account {
        return Ok(Payee::Strategist);
    }
    if recipient == caller {
        return Ok(Payee::Caller);
    }
    err!(VaultError::UnknownRecipient)
}

// =============================================================================
// Position
// =============================================================================

impl<'a, 'info> PositionService for VaultCpi<'a, 'info> {
    fn snapshot(&mut self) -> Result<PositionSnapshot> {
        self.staking_pool.reload()?;
        self.position.reload()?;
        PositionSnapshot::read(&self.staking_pool, &self.position)
    }

    fn stake(&mut self, amount: u64) -> Result<()> {
        let seeds = self.vault.signer_seeds();

        reward_staking::cpi::deposit(
            CpiContext::new_with_signer(
                self.staking_program.clone(),
                reward_staking::cpi::accounts::Deposit {
                    owner: self.vault.to_account_info(),
                    staking_pool: self.staking_pool.to_account_info(),
                    staker: self.position.to_account_info(),
                    owner_token_account: self.vault_assets.to_account_info(),
                    stake_vault: self.stake_vault.clone(),
                    token_program: self.token_program.clone(),
                },
                &[&seeds[..]],
            ),
            amount,
        )
    }

    fn claim(&mut self) -> Result<()> {
        let seeds = self.vault.signer_seeds();

        reward_staking::cpi::claim(CpiContext::new_with_signer(
            self.staking_program.clone(),
            reward_staking::cpi::accounts::Claim {
                owner: self.vault.to_account_info(),
                staking_pool: self.staking_pool.to_account_info(),
                staker: self.position.to_account_info(),
                owner_token_account: self.vault_assets.to_account_info(),
                reward_vault: self.reward_vault()?,
                token_program: self.token_program.clone(),
            },
            &[&seeds[..]],
        ))
    }

    fn exit(&mut self) -> Result<()> {
        let seeds = self.vault.signer_seeds();

        reward_staking::cpi::exit_position(CpiContext::new_with_signer(
            self.staking_program.clone(),
            reward_staking::cpi::accounts::ExitPosition {
                owner: self.vault.to_account_info(),
                staking_pool: self.staking_pool.to_account_info(),
                staker: self.position.to_account_info(),
                owner_token_account: self.vault_assets.to_account_info(),
                stake_vault: self.stake_vault.clone(),
                reward_vault: self.reward_vault()?,
                token_program: self.token_program.clone(),
            },
            &[&seeds[..]],
        ))
    }
}

// =============================================================================
// Base asset
// =============================================================================

impl<'a, 'info> AssetTransfer for VaultCpi<'a, 'info> {
    fn held_balance(&mut self) -> Result<u64> {
        self.vault_assets.reload()?;
        Ok(self.vault_assets.amount)
    }

    fn pull(&mut self, holder: &Pubkey, amount: u64) -> Result<()> {
        self.require_caller(holder)?;

        token::transfer(
            CpiContext::new(
                self.token_program.clone(),
                Transfer {
                    from: self.caller_assets.to_account_info(),
                    to: self.vault_assets.to_account_info(),
                    authority: self.caller.to_account_info(),
                },
            ),
            amount,
        )
    }

    fn send(&mut self, recipient: &Pubkey, amount: u64) -> Result<()> {
        let destination = self.destination(recipient)?;
        let seeds = self.vault.signer_seeds();

        token::transfer(
            CpiContext::new_with_signer(
                self.token_program.clone(),
                Transfer {
                    from: self.vault_assets.to_account_info(),
                    to: destination,
                    authority: self.vault.to_account_info(),
                },
                &[&seeds[..]],
            ),
            amount,
        )
    }
}

// =============================================================================
// Shares
// =============================================================================

impl<'a, 'info> ShareLedger for VaultCpi<'a, 'info> {
    fn total_supply(&mut self) -> Result<u64> {
        let share_mint = self
            .share_mint
            .as_deref_mut()
            .ok_or(error!(VaultError::MissingAccount))?;
        share_mint.reload()?;
        Ok(share_mint.supply)
    }

    fn balance_of(&mut self, holder: &Pubkey) -> Result<u64> {
        self.require_caller(holder)?;

        let caller_shares = self
            .caller_shares
            .as_deref_mut()
            .ok_or(error!(VaultError::MissingAccount))?;
        caller_shares.reload()?;
        Ok(caller_shares.amount)
    }

    fn mint(&mut self, holder: &Pubkey, amount: u64) -> Result<()> {
        self.require_caller(holder)?;

        let share_mint = self
            .share_mint
            .as_deref()
            .ok_or(error!(VaultError::MissingAccount))?;
        let caller_shares = self
            .caller_shares
            .as_deref()
            .ok_or(error!(VaultError::MissingAccount))?;
        let seeds = self.vault.signer_seeds();

        token::mint_to(
            CpiContext::new_with_signer(
                self.token_program.clone(),
                MintTo {
                    mint: share_mint.to_account_info(),
                    to: caller_shares.to_account_info(),
                    authority: self.vault.to_account_info(),
                },
                &[&seeds[..]],
            ),
            amount,
        )
    }

    fn burn(&mut self, holder: &Pubkey, amount: u64) -> Result<()> {
        self.require_caller(holder)?;

        let share_mint = self
            .share_mint
            .as_deref()
            .ok_or(error!(VaultError::MissingAccount))?;
        let caller_shares = self
            .caller_shares
            .as_deref()
            .ok_or(error!(VaultError::MissingAccount))?;

        // Holder burns their own shares
        token::burn(
            CpiContext::new(
                self.token_program.clone(),
                Burn {
                    mint: share_mint.to_account_info(),
                    from: caller_shares.to_account_info(),
                    authority: self.caller.to_account_info(),
                },
            ),
            amount,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fees_route_to_their_own_accounts() {
        let strategist = Pubkey::new_unique();
        let harvester = Pubkey::new_unique();

        assert_eq!(
            route_payment(&strategist, &strategist, &harvester, true).unwrap(),
            Payee::Strategist
        );
        assert_eq!(
            route_payment(&harvester, &strategist, &harvester, true).unwrap(),
            Payee::Caller
        );
    }

    #[test]
    fn strategist_calling_is_paid_into_strategist_account() {
        let strategist = Pubkey::new_unique();

        assert_eq!(
            route_payment(&strategist, &strategist, &strategist, true).unwrap(),
            Payee::Strategist
        );
        // Deposit carries no strategist account
        assert_eq!(
            route_payment(&strategist, &strategist, &strategist, false).unwrap(),
            Payee::Caller
        );
    }

    #[test]
    fn stranger_is_unknown_recipient() {
        let strategist = Pubkey::new_unique();
        let caller = Pubkey::new_unique();
        let stranger = Pubkey::new_unique();

        assert_eq!(
            route_payment(&stranger, &strategist, &caller, true).unwrap_err(),
            error!(VaultError::UnknownRecipient)
        );
        // Strategist is unreachable without their account in the instruction
        assert_eq!(
            route_payment(&strategist, &strategist, &caller, false).unwrap_err(),
            error!(VaultError::UnknownRecipient)
        );
    }
}
