use thiserror::Error;

/// Errors surfaced by the external collaborators.
///
/// These originate outside the engine's own bookkeeping and are passed
/// through to callers unmodified.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AssetError {
    #[error("insufficient asset balance: need {needed}, have {available}")]
    InsufficientBalance { needed: u128, available: u128 },

    #[error("insufficient allowance: need {needed}, approved {approved}")]
    InsufficientAllowance { needed: u128, approved: u128 },

    #[error("asset balance overflow")]
    Overflow,

    #[error("action target rejected the invocation: {0}")]
    InvocationRejected(String),
}
