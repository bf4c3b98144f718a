use anchor_lang::prelude::*;

#[event]
pub struct VaultInitialized {
    pub vault: Pubkey,
    pub strategist: Pubkey,
    pub asset_mint: Pubkey,
    pub share_mint: Pubkey,
    pub staking_pool: Pubkey,
}

#[event]
pub struct Deposited {
    pub vault: Pubkey,
    pub depositor: Pubkey,
    pub amount: u64,
    pub shares_minted: u64,
}

#[event]
pub struct Withdrawn {
    pub vault: Pubkey,
    pub withdrawer: Pubkey,
    pub shares_burned: u64,
    /// Includes the harvest fee
    pub amount_paid: u64,
    pub strategist_fee: u64,
    pub harvest_fee: u64,
}

#[event]
pub struct Harvested {
    pub vault: Pubkey,
    pub harvester: Pubkey,
    pub harvest_fee: u64,
    pub strategist_fee: u64,
    pub compounded: u64,
}

#[event]
pub struct StrategistFeeUpdated {
    pub vault: Pubkey,
    pub strategist_fee_bps: u16,
}

#[event]
pub struct HarvestFeeUpdated {
    pub vault: Pubkey,
    pub harvest_fee_bps: u16,
}

#[event]
pub struct TokensCleared {
    pub vault: Pubkey,
    pub mint: Pubkey,
    pub amount: u64,
}
