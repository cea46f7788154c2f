use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("share amount must be greater than zero")]
    ZeroAmount,

    #[error("share balance overflow")]
    Overflow,
}
