// =============================================================================
// Compounding Vault Error Codes
// =============================================================================
// Every error is raised before the failing instruction commits anything; the
// runtime rolls the whole transaction back.
// =============================================================================

use anchor_lang::prelude::*;

/// All possible errors that the vault program can return.
///
/// Anchor assigns numeric codes starting from 6000.
#[error_code]
pub enum VaultError {
    // =========================================================================
    // Request Errors (6000-6009)
    // =========================================================================

    /// Trying to deposit 0 tokens or burn 0 shares
    #[msg("Amount must be greater than zero")]
    InvalidAmount,

    /// Fee parameter above its ceiling (200 bps strategist, 100 bps harvester)
    #[msg("Fee exceeds maximum allowed")]
    ExceedsMaximum,

    /// Caller doesn't hold the shares they are trying to burn
    #[msg("Insufficient shares for withdrawal")]
    InsufficientShares,

    // =========================================================================
    // Authorization Errors (6010-6019)
    // =========================================================================

    /// Only the strategist can change fees or sweep tokens
    #[msg("Unauthorized - only the strategist can perform this action")]
    Unauthorized,

    // =========================================================================
    // Math Errors (6020-6029)
    // =========================================================================

    #[msg("Math overflow - calculation exceeded maximum value")]
    MathOverflow,

    #[msg("Math underflow - result would be negative")]
    MathUnderflow,

    /// Shares exist but the position is worth nothing
    #[msg("Division by zero")]
    DivisionByZero,

    // =========================================================================
    // Account Validation Errors (6030-6039)
    // =========================================================================

    #[msg("Invalid asset mint - must use the vault's base asset")]
    InvalidAssetMint,

    #[msg("Invalid share mint")]
    InvalidShareMint,

    /// Staking pool or position account doesn't belong to this vault
    #[msg("Invalid staking position")]
    InvalidPosition,

    #[msg("Invalid token account owner")]
    InvalidTokenAccountOwner,

    // =========================================================================
    // Settlement Errors (6040-6049)
    // =========================================================================

    /// A payout was addressed to someone with no account in the instruction
    #[msg("Recipient is not part of this instruction")]
    UnknownRecipient,

    /// An optional account needed by this step was not supplied
    #[msg("Required account is missing")]
    MissingAccount,
}
