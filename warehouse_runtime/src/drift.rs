//! Drift detection — structured comparison of two engine states.
//!
//! Used to describe what a restore changed, and by tests to prove two runs
//! ended in the same place.

use std::collections::BTreeMap;

use warehouse_core::domain::{OrderId, OrderStatus};
use warehouse_core::hashing::canonical_hash;
use warehouse_core::state::WarehouseState;

/// Per-collection counts of one state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateCounts {
    pub customers: usize,
    pub volunteers: usize,
    pub pending: usize,
    pub in_process: usize,
    pub completed: usize,
    pub log_len: usize,
}

impl StateCounts {
    pub fn of(state: &WarehouseState) -> Self {
        Self {
            customers: state.customers.len(),
            volunteers: state.volunteers.len(),
            pending: state.pending_orders.len(),
            in_process: state.in_process_orders.len(),
            completed: state.completed_orders.len(),
            log_len: state.action_log.len(),
        }
    }
}

/// An order whose status differs between the two states.
/// `None` means the order does not exist on that side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    pub order_id: OrderId,
    pub before: Option<OrderStatus>,
    pub after: Option<OrderStatus>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriftReport {
    pub before: StateCounts,
    pub after: StateCounts,
    pub status_changes: Vec<StatusChange>,
    pub identical: bool,
}

/// Compare `before` against `after`. Status changes are sorted by order id.
pub fn compare_states(before: &WarehouseState, after: &WarehouseState) -> DriftReport {
    let statuses = |s: &WarehouseState| -> BTreeMap<OrderId, OrderStatus> {
        s.all_orders().map(|o| (o.id, o.status)).collect()
    };
    let a = statuses(before);
    let b = statuses(after);

    let mut ids: Vec<OrderId> = a.keys().chain(b.keys()).copied().collect();
    ids.sort_unstable();
    ids.dedup();

    let status_changes = ids
        .into_iter()
        .filter_map(|order_id| {
            let (x, y) = (a.get(&order_id).copied(), b.get(&order_id).copied());
            (x != y).then_some(StatusChange {
                order_id,
                before: x,
                after: y,
            })
        })
        .collect();

    DriftReport {
        before: StateCounts::of(before),
        after: StateCounts::of(after),
        status_changes,
        identical: canonical_hash(before) == canonical_hash(after),
    }
}
