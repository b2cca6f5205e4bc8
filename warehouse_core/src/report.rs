//! Warehouse Engine — Status Reports
//!
//! Read-only views produced by the print actions, with `Display` impls in
//! the line formats shown to the user.

use std::fmt;

use serde::Serialize;

use crate::actions::ActionRecord;
use crate::domain::{Customer, CustomerId, Order, OrderId, OrderStatus, OrderSummary, VolunteerId};
use crate::state::WarehouseState;
use crate::volunteer::Volunteer;

fn id_or_none(id: Option<u32>) -> String {
    id.map_or_else(|| "None".to_string(), |v| v.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderReport {
    pub order_id: OrderId,
    pub status: OrderStatus,
    pub customer_id: CustomerId,
    pub collector_id: Option<VolunteerId>,
    pub driver_id: Option<VolunteerId>,
}

impl From<&Order> for OrderReport {
    fn from(o: &Order) -> Self {
        Self {
            order_id: o.id,
            status: o.status,
            customer_id: o.customer_id,
            collector_id: o.collector_id,
            driver_id: o.driver_id,
        }
    }
}

impl fmt::Display for OrderReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "OrderId: {}", self.order_id)?;
        writeln!(f, "OrderStatus: {}", self.status)?;
        writeln!(f, "CustomerID: {}", self.customer_id)?;
        writeln!(f, "Collector: {}", id_or_none(self.collector_id))?;
        write!(f, "Driver: {}", id_or_none(self.driver_id))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerReport {
    pub customer_id: CustomerId,
    pub orders: Vec<(OrderId, OrderStatus)>,
    pub orders_left: u32,
}

impl CustomerReport {
    /// Orders are listed in placement order with their live status.
    pub fn build(customer: &Customer, state: &WarehouseState) -> Self {
        let orders = customer
            .order_ids
            .iter()
            .filter_map(|oid| state.order(*oid).map(|o| (o.id, o.status)))
            .collect();
        Self {
            customer_id: customer.id,
            orders,
            orders_left: customer.orders_left(),
        }
    }
}

impl fmt::Display for CustomerReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CustomerID: {}", self.customer_id)?;
        for (oid, status) in &self.orders {
            writeln!(f, "OrderId: {}", oid)?;
            writeln!(f, "OrderStatus: {}", status)?;
        }
        write!(f, "numOrdersLeft: {}", self.orders_left)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VolunteerReport {
    pub volunteer_id: VolunteerId,
    pub is_busy: bool,
    pub active_order_id: Option<OrderId>,
    pub time_left: u32,
    pub orders_left: Option<u32>,
}

impl From<&Volunteer> for VolunteerReport {
    fn from(v: &Volunteer) -> Self {
        Self {
            volunteer_id: v.id,
            is_busy: v.is_busy(),
            active_order_id: v.active_order_id,
            time_left: v.time_left(),
            orders_left: v.orders_left(),
        }
    }
}

impl fmt::Display for VolunteerReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "VolunteerID: {}", self.volunteer_id)?;
        writeln!(f, "isBusy: {}", if self.is_busy { "True" } else { "False" })?;
        writeln!(f, "OrderId: {}", id_or_none(self.active_order_id))?;
        if self.time_left == 0 {
            writeln!(f, "TimeLeft: None")?;
        } else {
            writeln!(f, "TimeLeft: {}", self.time_left)?;
        }
        match self.orders_left {
            Some(n) => write!(f, "OrdersLeft: {}", n),
            None => write!(f, "OrdersLeft: No Limit"),
        }
    }
}

impl fmt::Display for OrderSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "OrderID: {}, CustomerID: {}, Status: {}",
            self.order_id, self.customer_id, self.status
        )
    }
}

/// What a successfully applied action hands back to its caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutput {
    None,
    OrderPlaced(OrderId),
    CustomerAdded(CustomerId),
    OrderStatus(OrderReport),
    CustomerStatus(CustomerReport),
    VolunteerStatus(VolunteerReport),
    ActionsLog(Vec<ActionRecord>),
    Closed(Vec<OrderSummary>),
}

/// Only the print and close outputs produce text.
impl fmt::Display for ActionOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionOutput::None | ActionOutput::OrderPlaced(_) | ActionOutput::CustomerAdded(_) => {
                Ok(())
            }
            ActionOutput::OrderStatus(r) => write!(f, "{}", r),
            ActionOutput::CustomerStatus(r) => write!(f, "{}", r),
            ActionOutput::VolunteerStatus(r) => write!(f, "{}", r),
            ActionOutput::ActionsLog(records) => write_lines(f, records),
            ActionOutput::Closed(summaries) => write_lines(f, summaries),
        }
    }
}

fn write_lines<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            writeln!(f)?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::volunteer::VolunteerSpec;

    #[test]
    fn test_order_report_format() {
        let mut o = Order::new(2, 1, 4);
        o.status = OrderStatus::Collecting;
        o.collector_id = Some(0);
        let text = OrderReport::from(&o).to_string();
        assert_eq!(
            text,
            "OrderId: 2\nOrderStatus: Collecting\nCustomerID: 1\nCollector: 0\nDriver: None"
        );
    }

    #[test]
    fn test_idle_unlimited_volunteer_format() {
        let v = Volunteer::new(3, "rin", VolunteerSpec::Collector { cooldown: 2 });
        let text = VolunteerReport::from(&v).to_string();
        assert_eq!(
            text,
            "VolunteerID: 3\nisBusy: False\nOrderId: None\nTimeLeft: None\nOrdersLeft: No Limit"
        );
    }

    #[test]
    fn test_close_lines() {
        let out = ActionOutput::Closed(vec![
            OrderSummary {
                order_id: 0,
                customer_id: 0,
                status: OrderStatus::Pending,
            },
            OrderSummary {
                order_id: 1,
                customer_id: 0,
                status: OrderStatus::Completed,
            },
        ]);
        assert_eq!(
            out.to_string(),
            "OrderID: 0, CustomerID: 0, Status: Pending\nOrderID: 1, CustomerID: 0, Status: Completed"
        );
    }
}
