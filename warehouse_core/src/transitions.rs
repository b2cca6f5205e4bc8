//! Warehouse Engine — Centralized Transition Logic
//!
//! ALL mutation of entity collections lives here: registration, order
//! creation and the simulation tick. Ordering is deterministic: pending
//! orders are scanned FIFO and volunteers in registration order.

use tracing::debug;

use crate::domain::{Customer, CustomerId, CustomerKind, Order, OrderId, OrderStatus, VolunteerId};
use crate::error::ActionError;
use crate::state::WarehouseState;
use crate::volunteer::{Volunteer, VolunteerSpec};

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

pub fn add_customer(
    state: &mut WarehouseState,
    name: &str,
    kind: CustomerKind,
    distance: u32,
    max_orders: u32,
) -> CustomerId {
    let id = state.customer_counter;
    state.customer_counter += 1;
    state
        .customers
        .push(Customer::new(id, name, kind, distance, max_orders));
    debug!(customer_id = id, name, %kind, distance, max_orders, "customer registered");
    id
}

pub fn add_volunteer(state: &mut WarehouseState, name: &str, spec: VolunteerSpec) -> VolunteerId {
    let id = state.volunteer_counter;
    state.volunteer_counter += 1;
    state.volunteers.push(Volunteer::new(id, name, spec));
    debug!(volunteer_id = id, name, ?spec, "volunteer registered");
    id
}

/// Place a new pending order for `customer_id`.
///
/// Fails without touching state when the customer is unknown or has no
/// quota left.
pub fn create_order_for_customer(
    state: &mut WarehouseState,
    customer_id: CustomerId,
) -> Result<OrderId, ActionError> {
    let order_id = state.order_counter;
    let customer = state
        .customer_mut(customer_id)
        .ok_or(ActionError::CannotPlaceOrder { customer_id })?;
    if !customer.add_order(order_id) {
        return Err(ActionError::CannotPlaceOrder { customer_id });
    }
    let distance = customer.distance;

    state.order_counter += 1;
    state
        .pending_orders
        .push(Order::new(order_id, customer_id, distance));
    debug!(order_id, customer_id, distance, "order placed");
    Ok(order_id)
}

// ---------------------------------------------------------------------------
// Simulation tick
// ---------------------------------------------------------------------------

/// Run one simulation tick.
///
///   1. Advance every volunteer that was already busy when the tick began.
///      Finished collections go back to pending, finished deliveries to
///      completed, exhausted limited volunteers leave the pool.
///   2. Dispatch pending orders, first-fit, to idle eligible volunteers.
///
/// Work accepted in (2) starts counting down on the next tick, and an order
/// released by a collector in (1) can be picked up by a driver in (2).
pub fn perform_simulation_step(state: &mut WarehouseState) {
    advance_in_process(state);
    dispatch_pending(state);
}

/// Match pending orders to volunteers. Unmatched orders keep their place.
fn dispatch_pending(state: &mut WarehouseState) {
    let pending = std::mem::take(&mut state.pending_orders);
    let mut still_pending = Vec::with_capacity(pending.len());

    for mut order in pending {
        let candidate = state
            .volunteers
            .iter_mut()
            .find(|v| v.can_take_order(&order));

        let Some(volunteer) = candidate else {
            still_pending.push(order);
            continue;
        };

        volunteer.accept_order(&order);
        if volunteer.is_collector() {
            order.collector_id = Some(volunteer.id);
        } else {
            order.driver_id = Some(volunteer.id);
        }
        order.advance_status();
        debug!(
            order_id = order.id,
            volunteer_id = volunteer.id,
            status = %order.status,
            "order assigned"
        );
        state.in_process_orders.push(order);
    }

    state.pending_orders = still_pending;
}

/// Count down busy volunteers and route the orders they finish.
fn advance_in_process(state: &mut WarehouseState) {
    let mut i = 0;
    while i < state.volunteers.len() {
        let Some(finished_id) = state.volunteers[i].step() else {
            i += 1;
            continue;
        };

        release_order(state, finished_id);

        let volunteer = &state.volunteers[i];
        if volunteer.has_orders_left() {
            i += 1;
        } else {
            debug!(volunteer_id = volunteer.id, "limited volunteer retired");
            state.volunteers.remove(i);
        }
    }
}

fn release_order(state: &mut WarehouseState, order_id: OrderId) {
    let Some(pos) = state
        .in_process_orders
        .iter()
        .position(|o| o.id == order_id)
    else {
        return;
    };
    let mut order = state.in_process_orders.remove(pos);

    match order.status {
        OrderStatus::Delivering => {
            order.advance_status();
            debug!(order_id, "order completed");
            state.completed_orders.push(order);
        }
        OrderStatus::Collecting => {
            debug!(order_id, "order collected, awaiting driver");
            state.pending_orders.push(order);
        }
        OrderStatus::Pending | OrderStatus::Completed => {
            // Not reachable for an in-process order; keep it where it was.
            state.in_process_orders.insert(pos, order);
        }
    }
}
