//! Vote delegation — entrust voting power to a delegate.
//!
//! Each participant may hold at most one outbound delegation. A delegate
//! accumulates the captured weight of its delegators and records them in a
//! bounded slot array: revoked slots read back as the null address and are
//! reused by later delegations. Weight is captured at delegation time, so a
//! delegator's later share purchases are not reflected until re-delegated —
//! this keeps vote-weight resolution a single O(1) aggregate read.

use crate::error::GovernanceError;
use dao_types::{Address, ShareAmount};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An active delegator → delegate edge with the weight captured at creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegationEdge {
    pub delegate: Address,
    pub weight: ShareAmount,
}

/// Per-delegate state: the bounded slot array plus the aggregate weight.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct DelegateRecord {
    /// Fixed-capacity delegator slots. `None` slots are free and read back
    /// as the null address in the registry view.
    slots: Vec<Option<Address>>,
    /// Sum of the captured weights of all current delegators.
    weight: ShareAmount,
}

impl DelegateRecord {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
            weight: ShareAmount::ZERO,
        }
    }
}

/// Manages vote delegation with bounded per-delegate capacity.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DelegationRegistry {
    /// Delegator → its single active outbound edge.
    outbound: HashMap<Address, DelegationEdge>,
    /// Delegate → slot array and aggregate weight.
    inbound: HashMap<Address, DelegateRecord>,
    /// Slot-array capacity per delegate.
    capacity: usize,
}

impl DelegationRegistry {
    pub fn new(capacity: usize) -> Self {
        Self {
            outbound: HashMap::new(),
            inbound: HashMap::new(),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Create a delegation edge, capturing `weight` into the delegate's
    /// aggregate.
    ///
    /// Fails if `from == to`, if `from` already has an active delegation
    /// (revoke first), or if the delegate's slot array is full. All checks
    /// run before any mutation.
    pub fn delegate(
        &mut self,
        from: &Address,
        to: &Address,
        weight: ShareAmount,
    ) -> Result<(), GovernanceError> {
        if from == to {
            return Err(GovernanceError::SelfDelegation);
        }
        if self.outbound.contains_key(from) {
            return Err(GovernanceError::DelegationActive);
        }
        let capacity = self.capacity;
        // Resolve the target slot and the new aggregate against the current
        // record before touching the map, so a full slot array or an
        // overflowing aggregate leaves no empty record behind.
        let (slot, aggregate) = match self.inbound.get(to) {
            Some(record) => {
                let slot = record
                    .slots
                    .iter()
                    .position(|s| s.is_none())
                    .ok_or(GovernanceError::DelegationCapacity { capacity })?;
                let aggregate = record
                    .weight
                    .checked_add(weight)
                    .ok_or(GovernanceError::Overflow)?;
                (slot, aggregate)
            }
            None => {
                if capacity == 0 {
                    return Err(GovernanceError::DelegationCapacity { capacity });
                }
                (0, weight)
            }
        };

        let record = self
            .inbound
            .entry(*to)
            .or_insert_with(|| DelegateRecord::with_capacity(capacity));
        record.slots[slot] = Some(*from);
        record.weight = aggregate;
        self.outbound.insert(
            *from,
            DelegationEdge {
                delegate: *to,
                weight,
            },
        );
        tracing::debug!(delegator = %from, delegate = %to, %weight, slot, "delegation created");
        Ok(())
    }

    /// Remove `from`'s active delegation, returning the cleared edge.
    ///
    /// The exact inverse of [`delegate`](Self::delegate): the captured weight
    /// is subtracted from the delegate's aggregate and the slot is freed.
    pub fn revoke(&mut self, from: &Address) -> Result<DelegationEdge, GovernanceError> {
        let edge = self
            .outbound
            .remove(from)
            .ok_or(GovernanceError::NoActiveDelegation)?;
        if let Some(record) = self.inbound.get_mut(&edge.delegate) {
            record.weight = record.weight.saturating_sub(edge.weight);
            for slot in record.slots.iter_mut() {
                if slot.as_ref() == Some(from) {
                    *slot = None;
                    break;
                }
            }
        }
        tracing::debug!(delegator = %from, delegate = %edge.delegate, weight = %edge.weight, "delegation revoked");
        Ok(edge)
    }

    /// The active outbound edge for a delegator, if any.
    pub fn delegate_of(&self, from: &Address) -> Option<&DelegationEdge> {
        self.outbound.get(from)
    }

    /// Whether a participant currently has an active outbound delegation.
    pub fn is_delegating(&self, from: &Address) -> bool {
        self.outbound.contains_key(from)
    }

    /// Aggregate weight currently delegated to an address.
    pub fn delegated_weight(&self, delegate: &Address) -> ShareAmount {
        self.inbound
            .get(delegate)
            .map(|r| r.weight)
            .unwrap_or(ShareAmount::ZERO)
    }

    /// The fixed-size delegator-slot view for a delegate (length = capacity).
    ///
    /// Free slots read back as the null address.
    pub fn delegators(&self, delegate: &Address) -> Vec<Address> {
        match self.inbound.get(delegate) {
            Some(record) => record
                .slots
                .iter()
                .map(|s| s.unwrap_or(Address::ZERO))
                .collect(),
            None => vec![Address::ZERO; self.capacity],
        }
    }

    /// Snapshot of the delegate's current (occupied) delegator slots.
    pub fn current_delegators(&self, delegate: &Address) -> Vec<Address> {
        self.inbound
            .get(delegate)
            .map(|r| r.slots.iter().flatten().copied().collect())
            .unwrap_or_default()
    }
}
