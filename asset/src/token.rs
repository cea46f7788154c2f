//! The fungible asset interface and a reference in-memory implementation.

use std::collections::HashMap;

use dao_types::{Address, TokenAmount};
use serde::{Deserialize, Serialize};

use crate::error::AssetError;

/// The asset side of the collaborator boundary.
///
/// `transfer_from` moves previously approved funds. The allowance check is
/// the collaborator's responsibility; the engine only sees success or
/// failure, and a failure aborts the enclosing engine operation with no
/// engine-state mutation.
pub trait AssetToken {
    /// Transfer `amount` from `from` to `to` using `from`'s allowance
    /// granted to `to`.
    fn transfer_from(
        &mut self,
        from: &Address,
        to: &Address,
        amount: TokenAmount,
    ) -> Result<(), AssetError>;

    /// Current balance of an address.
    fn balance_of(&self, owner: &Address) -> TokenAmount;

    /// Remaining allowance `owner` has granted to `spender`.
    fn allowance(&self, owner: &Address, spender: &Address) -> TokenAmount;
}

/// A reference allowance-bearing token, held entirely in memory.
///
/// Behaves like a standard transferable balance with an approval mechanism.
/// Used by the engine's test suites; production deployments supply their own
/// [`AssetToken`] implementation.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct InMemoryToken {
    balances: HashMap<Address, TokenAmount>,
    /// (owner, spender) → approved amount remaining.
    allowances: HashMap<(Address, Address), TokenAmount>,
}

impl InMemoryToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a token with the full initial supply credited to one address.
    pub fn with_supply(holder: Address, supply: TokenAmount) -> Self {
        let mut token = Self::default();
        token.balances.insert(holder, supply);
        token
    }

    /// Credit freshly minted funds to an address.
    pub fn mint(&mut self, to: &Address, amount: TokenAmount) -> Result<(), AssetError> {
        let balance = self.balances.entry(*to).or_insert(TokenAmount::ZERO);
        *balance = balance.checked_add(amount).ok_or(AssetError::Overflow)?;
        Ok(())
    }

    /// Direct transfer from the caller's own balance.
    pub fn transfer(
        &mut self,
        from: &Address,
        to: &Address,
        amount: TokenAmount,
    ) -> Result<(), AssetError> {
        self.move_balance(from, to, amount)
    }

    /// Approve `spender` to move up to `amount` of `owner`'s funds.
    ///
    /// Replaces any previous approval for the same pair.
    pub fn approve(&mut self, owner: &Address, spender: &Address, amount: TokenAmount) {
        self.allowances.insert((*owner, *spender), amount);
    }

    /// Move `amount` between balances, all-or-nothing.
    ///
    /// Both the debited and the credited balance are computed with checked
    /// arithmetic before either is written, so a failure on either side
    /// leaves every balance untouched.
    fn move_balance(
        &mut self,
        from: &Address,
        to: &Address,
        amount: TokenAmount,
    ) -> Result<(), AssetError> {
        let from_balance = self.balance_of(from);
        let debited =
            from_balance
                .checked_sub(amount)
                .ok_or(AssetError::InsufficientBalance {
                    needed: amount.raw(),
                    available: from_balance.raw(),
                })?;
        if from == to {
            // Self-transfer: the balance check above is all that applies.
            return Ok(());
        }
        let credited = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(AssetError::Overflow)?;
        self.balances.insert(*from, debited);
        self.balances.insert(*to, credited);
        Ok(())
    }
}

impl AssetToken for InMemoryToken {
    fn transfer_from(
        &mut self,
        from: &Address,
        to: &Address,
        amount: TokenAmount,
    ) -> Result<(), AssetError> {
        let approved = self.allowance(from, to);
        let remaining =
            approved
                .checked_sub(amount)
                .ok_or(AssetError::InsufficientAllowance {
                    needed: amount.raw(),
                    approved: approved.raw(),
                })?;
        // move_balance validates both sides before writing either, so a
        // failed transfer leaves the allowance and the balances untouched.
        self.move_balance(from, to, amount)?;
        self.allowances.insert((*from, *to), remaining);
        Ok(())
    }

    fn balance_of(&self, owner: &Address) -> TokenAmount {
        self.balances.get(owner).copied().unwrap_or(TokenAmount::ZERO)
    }

    fn allowance(&self, owner: &Address, spender: &Address) -> TokenAmount {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or(TokenAmount::ZERO)
    }
}
