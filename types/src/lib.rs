//! Fundamental types for the DAO governance engine.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: addresses, share and asset amounts, timestamps, and the
//! governance parameters.

pub mod address;
pub mod amount;
pub mod params;
pub mod time;

pub use address::Address;
pub use amount::{ShareAmount, TokenAmount};
pub use params::GovernanceParams;
pub use time::Timestamp;
