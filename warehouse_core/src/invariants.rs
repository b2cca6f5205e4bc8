//! Warehouse Engine — Invariant Checks
//!
//! Hard-fail validation. `validate_invariants` panics on the first failure;
//! `try_validate_invariants` reports it instead.

use std::collections::{BTreeMap, BTreeSet};

use crate::domain::{OrderId, OrderStatus};
use crate::error::InvariantError;
use crate::state::WarehouseState;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run all invariant checks. Panics on the first failure.
pub fn validate_invariants(state: &WarehouseState) {
    if let Err(e) = try_validate_invariants(state) {
        panic!("{}", e);
    }
}

/// Non-panicking variant of `validate_invariants`.
pub fn try_validate_invariants(state: &WarehouseState) -> Result<(), InvariantError> {
    check_customer_quota(state)?;
    check_ids_below_counters(state)?;
    check_order_placement(state)?;
    check_busy_consistency(state)?;
    check_volunteer_quota(state)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Individual checks (private)
// ---------------------------------------------------------------------------

fn check_customer_quota(state: &WarehouseState) -> Result<(), InvariantError> {
    for c in &state.customers {
        if c.num_orders() > c.max_orders {
            return Err(InvariantError::new(
                "customer_quota",
                format!(
                    "Customer {} placed {} orders with max_orders={}",
                    c.id,
                    c.num_orders(),
                    c.max_orders
                ),
            ));
        }
    }
    Ok(())
}

fn check_ids_below_counters(state: &WarehouseState) -> Result<(), InvariantError> {
    if let Some(c) = state.customers.iter().find(|c| c.id >= state.customer_counter) {
        return Err(InvariantError::new(
            "id_counters",
            format!("Customer id {} >= counter {}", c.id, state.customer_counter),
        ));
    }
    if let Some(v) = state.volunteers.iter().find(|v| v.id >= state.volunteer_counter) {
        return Err(InvariantError::new(
            "id_counters",
            format!("Volunteer id {} >= counter {}", v.id, state.volunteer_counter),
        ));
    }
    if let Some(o) = state.all_orders().find(|o| o.id >= state.order_counter) {
        return Err(InvariantError::new(
            "id_counters",
            format!("Order id {} >= counter {}", o.id, state.order_counter),
        ));
    }
    Ok(())
}

/// Each order sits in exactly one collection, and the collection agrees
/// with its status and assignment.
fn check_order_placement(state: &WarehouseState) -> Result<(), InvariantError> {
    let mut seen: BTreeSet<OrderId> = BTreeSet::new();
    for o in state.all_orders() {
        if !seen.insert(o.id) {
            return Err(InvariantError::new(
                "order_placement",
                format!("Order {} appears in more than one collection", o.id),
            ));
        }
    }

    for o in &state.pending_orders {
        let ok = match o.status {
            OrderStatus::Pending => o.collector_id.is_none() && o.driver_id.is_none(),
            OrderStatus::Collecting => o.collector_id.is_some() && o.driver_id.is_none(),
            _ => false,
        };
        if !ok {
            return Err(InvariantError::new(
                "order_placement",
                format!("Pending collection holds order {} with status {}", o.id, o.status),
            ));
        }
    }
    for o in &state.in_process_orders {
        let ok = match o.status {
            OrderStatus::Collecting => o.collector_id.is_some(),
            OrderStatus::Delivering => o.collector_id.is_some() && o.driver_id.is_some(),
            _ => false,
        };
        if !ok {
            return Err(InvariantError::new(
                "order_placement",
                format!("In-process collection holds order {} with status {}", o.id, o.status),
            ));
        }
    }
    for o in &state.completed_orders {
        if o.status != OrderStatus::Completed {
            return Err(InvariantError::new(
                "order_placement",
                format!("Completed collection holds order {} with status {}", o.id, o.status),
            ));
        }
    }
    Ok(())
}

/// In-process orders and busy volunteers are in one-to-one correspondence.
fn check_busy_consistency(state: &WarehouseState) -> Result<(), InvariantError> {
    let mut workers: BTreeMap<OrderId, u32> = BTreeMap::new();
    for v in &state.volunteers {
        if let Some(oid) = v.active_order_id {
            *workers.entry(oid).or_insert(0) += 1;
        }
    }

    for o in &state.in_process_orders {
        match workers.remove(&o.id) {
            Some(1) => {}
            count => {
                return Err(InvariantError::new(
                    "busy_consistency",
                    format!(
                        "In-process order {} is worked by {} volunteers",
                        o.id,
                        count.unwrap_or(0)
                    ),
                ));
            }
        }
    }
    if let Some(oid) = workers.keys().next() {
        return Err(InvariantError::new(
            "busy_consistency",
            format!("A volunteer is busy with order {} which is not in process", oid),
        ));
    }
    Ok(())
}

fn check_volunteer_quota(state: &WarehouseState) -> Result<(), InvariantError> {
    use crate::volunteer::VolunteerRole;

    for v in &state.volunteers {
        if let VolunteerRole::LimitedCollector(_, q) | VolunteerRole::LimitedDriver(_, q) = &v.role {
            if q.orders_left > q.max_orders {
                return Err(InvariantError::new(
                    "volunteer_quota",
                    format!(
                        "Volunteer {} has orders_left={} above max_orders={}",
                        v.id, q.orders_left, q.max_orders
                    ),
                ));
            }
        }
    }
    Ok(())
}
