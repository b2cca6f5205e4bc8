//! Warehouse Engine — Core Domain Types
//!
//! Pure data plus small behavioural helpers. No assignment logic.
//! All ids are dense u32 counters starting at 0, one counter per entity kind.

use std::fmt;

use serde::{Deserialize, Serialize};

pub type CustomerId = u32;
pub type OrderId = u32;
pub type VolunteerId = u32;

// ── Customers ──────────────────────────────────────────────────────

/// Classification of a customer. Carries no behaviour in the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerKind {
    Soldier,
    Civilian,
}

impl CustomerKind {
    /// Case-insensitive parse of `soldier` / `civilian`.
    pub fn parse(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case("soldier") {
            Some(CustomerKind::Soldier)
        } else if token.eq_ignore_ascii_case("civilian") {
            Some(CustomerKind::Civilian)
        } else {
            None
        }
    }

    pub fn is_soldier(self) -> bool {
        self == CustomerKind::Soldier
    }
}

impl fmt::Display for CustomerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CustomerKind::Soldier => f.write_str("soldier"),
            CustomerKind::Civilian => f.write_str("civilian"),
        }
    }
}

/// A customer placing orders against a fixed quota.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub kind: CustomerKind,
    pub distance: u32,
    pub max_orders: u32,
    pub order_ids: Vec<OrderId>, // append-only, placement order
}

impl Customer {
    pub fn new(
        id: CustomerId,
        name: &str,
        kind: CustomerKind,
        distance: u32,
        max_orders: u32,
    ) -> Self {
        Self {
            id,
            name: name.to_string(),
            kind,
            distance,
            max_orders,
            order_ids: Vec::new(),
        }
    }

    pub fn num_orders(&self) -> u32 {
        self.order_ids.len() as u32
    }

    pub fn orders_left(&self) -> u32 {
        self.max_orders.saturating_sub(self.num_orders())
    }

    pub fn can_make_order(&self) -> bool {
        self.num_orders() < self.max_orders
    }

    /// Append an order id. Returns false (and records nothing) past quota.
    pub fn add_order(&mut self, order_id: OrderId) -> bool {
        if !self.can_make_order() {
            return false;
        }
        self.order_ids.push(order_id);
        true
    }
}

// ── Orders ─────────────────────────────────────────────────────────

/// Order lifecycle. Strictly forward: Pending → Collecting → Delivering → Completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Collecting,
    Delivering,
    Completed,
}

impl OrderStatus {
    /// The next status in the pipeline. `Completed` is terminal.
    pub fn next(self) -> Self {
        match self {
            OrderStatus::Pending => OrderStatus::Collecting,
            OrderStatus::Collecting => OrderStatus::Delivering,
            OrderStatus::Delivering | OrderStatus::Completed => OrderStatus::Completed,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Collecting => "Collecting",
            OrderStatus::Delivering => "Delivering",
            OrderStatus::Completed => "Completed",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Order {
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub distance: u32, // copied from the customer at creation
    pub status: OrderStatus,
    pub collector_id: Option<VolunteerId>,
    pub driver_id: Option<VolunteerId>,
}

impl Order {
    pub fn new(id: OrderId, customer_id: CustomerId, distance: u32) -> Self {
        Self {
            id,
            customer_id,
            distance,
            status: OrderStatus::Pending,
            collector_id: None,
            driver_id: None,
        }
    }

    pub fn advance_status(&mut self) {
        self.status = self.status.next();
    }
}

/// One line of the `close` summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub order_id: OrderId,
    pub customer_id: CustomerId,
    pub status: OrderStatus,
}

impl From<&Order> for OrderSummary {
    fn from(order: &Order) -> Self {
        Self {
            order_id: order.id,
            customer_id: order.customer_id,
            status: order.status,
        }
    }
}
