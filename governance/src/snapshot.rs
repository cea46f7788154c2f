//! Engine snapshots — serialize the full governance state for persistence.

use dao_ledger::ShareLedger;
use dao_types::{Address, GovernanceParams};
use serde::{Deserialize, Serialize};

use crate::delegation::DelegationRegistry;
use crate::engine::GovernanceEngine;
use crate::error::GovernanceError;
use crate::proposal::ProposalStore;

/// Meta-store key used for persisting the engine state.
const ENGINE_STATE_META_KEY: &str = "governance_engine_state";

/// Serializable snapshot of the engine's in-memory state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub params: GovernanceParams,
    pub custody: Address,
    pub ledger: ShareLedger,
    pub delegation: DelegationRegistry,
    pub proposals: ProposalStore,
}

impl GovernanceEngine {
    /// Serialize the engine state to bytes for persistence.
    pub fn save_state(&self) -> Vec<u8> {
        let snapshot = EngineSnapshot {
            params: self.params.clone(),
            custody: self.custody,
            ledger: self.ledger.clone(),
            delegation: self.delegation.clone(),
            proposals: self.proposals.clone(),
        };
        bincode::serialize(&snapshot).unwrap_or_default()
    }

    /// Restore an engine from serialized bytes.
    pub fn load_state(data: &[u8]) -> Result<Self, GovernanceError> {
        let snapshot: EngineSnapshot =
            bincode::deserialize(data).map_err(|e| GovernanceError::Snapshot(e.to_string()))?;
        Ok(Self {
            params: snapshot.params,
            custody: snapshot.custody,
            ledger: snapshot.ledger,
            delegation: snapshot.delegation,
            proposals: snapshot.proposals,
        })
    }

    /// The meta-store key used for engine state persistence.
    pub fn meta_key() -> &'static str {
        ENGINE_STATE_META_KEY
    }
}
