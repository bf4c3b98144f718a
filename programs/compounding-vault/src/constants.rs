// =============================================================================
// Compounding Vault Constants
// =============================================================================
// Fee ceilings, fee defaults and PDA seeds for the vault program.
// =============================================================================

// =============================================================================
// FEE CONFIGURATION (in basis points - 1 BPS = 0.01%)
// =============================================================================

/// Total basis points (100%) - used as denominator in fee calculations
/// Example: fee = amount * FEE_BPS / BPS_DENOMINATOR
pub const BPS_DENOMINATOR: u16 = 10000;

/// Strategist fee ceiling: 2% of harvested rewards
pub const MAX_STRATEGIST_FEE_BPS: u16 = 200;

/// Harvester fee ceiling: 1% of harvested rewards
pub const MAX_HARVEST_FEE_BPS: u16 = 100;

/// Strategist fee set at construction
pub const DEFAULT_STRATEGIST_FEE_BPS: u16 = 200;

/// Harvester fee set at construction
pub const DEFAULT_HARVEST_FEE_BPS: u16 = 100;

// =============================================================================
// PDA SEEDS
// =============================================================================
// The Vault PDA is the authority over the share mint, the vault's asset
// account and the vault's position in the staking program.
// =============================================================================

/// Seed for the Vault account PDA
/// Full seed: ["vault", asset_mint_pubkey]
pub const VAULT_SEED: &[u8] = b"vault";

/// Seed for the share mint PDA
/// Full seed: ["share_mint", vault_pubkey]
pub const SHARE_MINT_SEED: &[u8] = b"share_mint";

/// Seed for the vault's own asset token account
/// Full seed: ["vault_assets", vault_pubkey]
/// Holds zero between instructions; everything is staked or paid out.
pub const VAULT_ASSETS_SEED: &[u8] = b"vault_assets";
