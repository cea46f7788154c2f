//! The action-target side of the collaborator boundary.

use dao_types::{Address, TokenAmount};

use crate::error::AssetError;

/// Receives the value-bearing invocation of a passed proposal.
///
/// The proposal's `target`/`action_value` pair is the entire contract of the
/// invocation; the engine interprets nothing beyond success or failure.
pub trait ActionTarget {
    fn invoke(&mut self, target: &Address, value: TokenAmount) -> Result<(), AssetError>;
}
