use anchor_lang::prelude::*;

#[error_code]
pub enum StakingError {
    // Request Errors (6000-6009)
    #[msg("Invalid amount: must be greater than zero")]
    InvalidAmount,

    #[msg("Distribution exceeds the per-transaction reward cap")]
    ExceedsMaxDistribution,

    #[msg("Reward vault cannot cover the rewards owed")]
    InsufficientRewardBalance,

    // Authorization Errors (6010-6019)
    #[msg("Unauthorized: only the pool admin can distribute")]
    Unauthorized,

    #[msg("Signer does not own this position")]
    InvalidAuthority,

    // Math Errors (6020-6029)
    #[msg("Math overflow")]
    MathOverflow,

    #[msg("Math underflow")]
    MathUnderflow,

    #[msg("Division by zero")]
    DivisionByZero,

    // Account Validation Errors (6030-6039)
    #[msg("Token account mint differs from the pool asset")]
    InvalidAssetMint,

    #[msg("Invalid token account owner")]
    InvalidTokenAccountOwner,
}
