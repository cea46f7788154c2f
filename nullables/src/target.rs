//! Nullable action target — records invocations, can be programmed to fail.

use dao_asset::{ActionTarget, AssetError};
use dao_types::{Address, TokenAmount};

/// A deterministic action target for testing.
///
/// Every invocation is recorded. When a failure message is programmed, all
/// invocations are rejected with it instead.
#[derive(Debug, Default)]
pub struct NullActionTarget {
    invocations: Vec<(Address, TokenAmount)>,
    failure: Option<String>,
}

impl NullActionTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent invocation fail with the given message.
    pub fn fail_with(message: impl Into<String>) -> Self {
        Self {
            invocations: Vec::new(),
            failure: Some(message.into()),
        }
    }

    /// All invocations received so far, in order.
    pub fn invocations(&self) -> &[(Address, TokenAmount)] {
        &self.invocations
    }
}

impl ActionTarget for NullActionTarget {
    fn invoke(&mut self, target: &Address, value: TokenAmount) -> Result<(), AssetError> {
        if let Some(message) = &self.failure {
            return Err(AssetError::InvocationRejected(message.clone()));
        }
        self.invocations.push((*target, value));
        Ok(())
    }
}
