//! Governance parameters.

use serde::{Deserialize, Serialize};

/// Configuration of a governance engine instance.
///
/// The reference deployment uses a delegator capacity of 2 and a share price
/// of 1 raw asset unit per share.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceParams {
    /// Maximum number of delegators a single delegate can hold. Attempting
    /// to add one more fails with a capacity error.
    pub delegator_capacity: usize,

    /// Asset cost (raw units) of a single share. `buy_shares(amount)`
    /// transfers `amount * price_per_share` into engine custody.
    pub price_per_share: u128,
}

impl GovernanceParams {
    /// Reference deployment values.
    pub fn reference_defaults() -> Self {
        Self {
            delegator_capacity: 2,
            price_per_share: 1,
        }
    }
}

impl Default for GovernanceParams {
    fn default() -> Self {
        Self::reference_defaults()
    }
}
