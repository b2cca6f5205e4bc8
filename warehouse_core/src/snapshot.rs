//! Warehouse Engine — Snapshot Slot
//!
//! A single overwritable backup of the full engine state. The slot owns its
//! copy outright: backups and restores are deep clones in both directions.

use crate::error::ActionError;
use crate::hashing::canonical_hash;
use crate::state::WarehouseState;

#[derive(Debug, Clone, Default)]
pub struct SnapshotSlot {
    stored: Option<WarehouseState>,
}

impl SnapshotSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.stored.is_none()
    }

    /// Replace whatever the slot holds with a copy of `state`.
    pub fn backup(&mut self, state: &WarehouseState) {
        self.stored = Some(state.clone());
    }

    /// A fresh copy of the stored state. The slot is left unchanged.
    pub fn restore(&self) -> Result<WarehouseState, ActionError> {
        self.stored.clone().ok_or(ActionError::NoBackup)
    }

    /// Read-only view of the stored state.
    pub fn peek(&self) -> Option<&WarehouseState> {
        self.stored.as_ref()
    }

    /// Canonical hash of the stored state, if any.
    pub fn hash(&self) -> Option<String> {
        self.stored.as_ref().map(canonical_hash)
    }
}
