use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod instructions;
pub mod state;

pub use instructions::*;

declare_id!("6mqweyiWYjFqyYKvreAcQHnSyiqQjqjamBM4uBz6p9UJ");

#[program]
pub mod reward_staking {
    use super::*;

    /// Initialize a new staking pool for one asset mint
    ///
    /// # Accounts
    /// * `admin` - Pool admin (signer, payer)
    /// * `staking_pool` - Staking pool PDA to create
    /// * `asset_mint` - Mint staked and paid out as rewards
    /// * `stake_vault` - Vault to hold staked principal
    /// * `reward_vault` - Vault to hold distributed rewards
    ///
    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
        instructions::initialize::handler_initialize(ctx)
    }

    /// Open an empty position for the signing owner
    pub fn open_position(ctx: Context<OpenPosition>) -> Result<()> {
        instructions::open_position::handler_open_position(ctx)
    }

    /// Stake principal into the owner's position
    ///
    /// # Arguments
    /// * `amount` - Amount to stake, pulled through the pool's allowance
    ///
    pub fn deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
        instructions::deposit::handler_deposit(ctx, amount)
    }

    /// Claim every reward owed to the owner's position
    pub fn claim(ctx: Context<Claim>) -> Result<()> {
        instructions::claim::handler_claim(ctx)
    }

    /// Withdraw all principal and claim all rewards
    pub fn exit_position(ctx: Context<ExitPosition>) -> Result<()> {
        instructions::exit_position::handler_exit_position(ctx)
    }

    /// Distribute rewards to stakers (admin only)
    ///
    /// # Arguments
    /// * `amount` - Amount of the asset to distribute
    ///
    pub fn distribute(ctx: Context<Distribute>, amount: u64) -> Result<()> {
        instructions::distribute::handler_distribute(ctx, amount)
    }
}
