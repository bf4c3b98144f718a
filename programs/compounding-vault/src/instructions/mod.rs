// =============================================================================
// Instructions Module
// =============================================================================

// Vault lifecycle
pub mod initialize_vault;

// Holder operations
pub mod deposit;
pub mod harvest;
pub mod withdraw;

// Strategist operations
pub mod admin;

// Read-only
pub mod views;

// The #[derive(Accounts)] macro generates helper types that need to be at crate root
pub use admin::*;
pub use deposit::*;
pub use harvest::*;
pub use initialize_vault::*;
pub use views::*;
pub use withdraw::*;
