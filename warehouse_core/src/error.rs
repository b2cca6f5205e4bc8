//! Warehouse Engine — Error Types
//!
//! `ActionError` is the failure outcome of an action. Its `Display` text is
//! exactly what gets recorded in the action log.

use thiserror::Error;

use crate::domain::{CustomerId, OrderId, VolunteerId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("Cannot place this order")]
    CannotPlaceOrder { customer_id: CustomerId },

    #[error("Order doesn't exist")]
    OrderNotFound(OrderId),

    #[error("Customer doesn't exist")]
    CustomerNotFound(CustomerId),

    #[error("Volunteer doesn't exist")]
    VolunteerNotFound(VolunteerId),

    #[error("No backup available")]
    NoBackup,

    #[error("Warehouse is closed")]
    WarehouseClosed,
}

/// A violated engine invariant. Always a bug, never an expected condition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invariant violation: [INVARIANT:{name}] {detail}")]
pub struct InvariantError {
    pub name: &'static str,
    pub detail: String,
}

impl InvariantError {
    pub fn new(name: &'static str, detail: impl Into<String>) -> Self {
        Self {
            name,
            detail: detail.into(),
        }
    }
}
