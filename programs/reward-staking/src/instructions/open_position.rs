use anchor_lang::prelude::*;

use crate::constants::{STAKER_SEED, STAKING_POOL_SEED};
use crate::state::{Staker, StakingPool};

/// Open an empty staking position for `owner`
///
/// The payer funds rent so that program-derived owners (which cannot pay
/// for account creation themselves) can hold a position.
#[derive(Accounts)]
pub struct OpenPosition<'info> {
    /// Future owner of the position
    pub owner: Signer<'info>,

    /// Rent payer
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(
        seeds = [STAKING_POOL_SEED, staking_pool.asset_mint.as_ref()],
        bump = staking_pool.bump
    )]
    pub staking_pool: Account<'info, StakingPool>,

    #[account(
        init,
        payer = payer,
        space = Staker::SIZE,
        seeds = [STAKER_SEED, staking_pool.key().as_ref(), owner.key().as_ref()],
        bump
    )]
    pub staker: Account<'info, Staker>,

    pub system_program: Program<'info, System>,
}

pub fn handler_open_position(ctx: Context<OpenPosition>) -> Result<()> {
    let staker = &mut ctx.accounts.staker;

    staker.pool = ctx.accounts.staking_pool.key();
    staker.owner = ctx.accounts.owner.key();
    staker.reward_debt = ctx.accounts.staking_pool.reward_per_token;
    staker.bump = ctx.bumps.staker;

    msg!("Opened position for {} in pool {}", staker.owner, staker.pool);

    Ok(())
}
