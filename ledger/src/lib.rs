//! Membership ledger for the governance engine.
//!
//! Tracks each participant's share balance. Balances only increase (there is
//! no share-selling path); a participant is a member iff their balance is
//! positive. Every other governance component reads this ledger.

pub mod error;
pub mod shares;

pub use error::LedgerError;
pub use shares::ShareLedger;
