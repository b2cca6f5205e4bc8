//! Warehouse Engine — State
//!
//! The whole engine state: id counters, entity collections and the action
//! log. Orders live by value in exactly one of three collections, chosen by
//! their lifecycle position. `Clone` is a full deep copy.

use serde::{Deserialize, Serialize};

use crate::actions::ActionRecord;
use crate::domain::{Customer, CustomerId, Order, OrderId, VolunteerId};
use crate::volunteer::Volunteer;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WarehouseState {
    pub customer_counter: u32,
    pub volunteer_counter: u32,
    pub order_counter: u32,
    pub customers: Vec<Customer>,
    pub volunteers: Vec<Volunteer>, // registration order
    pub pending_orders: Vec<Order>, // FIFO
    pub in_process_orders: Vec<Order>,
    pub completed_orders: Vec<Order>,
    pub action_log: Vec<ActionRecord>,
}

/// Create a fresh, empty state.
pub fn create_initial_state() -> WarehouseState {
    WarehouseState::default()
}

impl WarehouseState {
    pub fn customer(&self, id: CustomerId) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }

    pub fn customer_mut(&mut self, id: CustomerId) -> Option<&mut Customer> {
        self.customers.iter_mut().find(|c| c.id == id)
    }

    pub fn volunteer(&self, id: VolunteerId) -> Option<&Volunteer> {
        self.volunteers.iter().find(|v| v.id == id)
    }

    /// Search pending, then in-process, then completed.
    pub fn order(&self, id: OrderId) -> Option<&Order> {
        self.all_orders().find(|o| o.id == id)
    }

    /// All orders, in pending / in-process / completed order.
    pub fn all_orders(&self) -> impl Iterator<Item = &Order> {
        self.pending_orders
            .iter()
            .chain(self.in_process_orders.iter())
            .chain(self.completed_orders.iter())
    }

    pub fn order_count(&self) -> usize {
        self.pending_orders.len() + self.in_process_orders.len() + self.completed_orders.len()
    }

    pub fn record_action(&mut self, record: ActionRecord) {
        self.action_log.push(record);
    }
}
