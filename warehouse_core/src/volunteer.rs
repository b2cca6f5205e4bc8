//! Warehouse Engine — Volunteers
//!
//! A volunteer is a shared identity (id, name, active/completed order)
//! plus exactly one role variant. Eligibility, acceptance and the per-tick
//! countdown are dispatched on the role with `match`.

use serde::{Deserialize, Serialize};

use crate::domain::{Order, OrderId, OrderStatus, VolunteerId};

/// Collection-stage work counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CollectorWork {
    pub cooldown: u32,
    pub time_left: u32,
}

/// Delivery-stage work counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DriverWork {
    pub max_distance: u32,
    pub distance_per_step: u32,
    pub distance_left: u32,
}

/// Finite order quota of a limited volunteer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Quota {
    pub max_orders: u32,
    pub orders_left: u32,
}

impl Quota {
    pub fn new(max_orders: u32) -> Self {
        Self {
            max_orders,
            orders_left: max_orders,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolunteerRole {
    Collector(CollectorWork),
    LimitedCollector(CollectorWork, Quota),
    Driver(DriverWork),
    LimitedDriver(DriverWork, Quota),
}

/// Construction parameters for a volunteer, one variant per role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolunteerSpec {
    Collector {
        cooldown: u32,
    },
    LimitedCollector {
        cooldown: u32,
        max_orders: u32,
    },
    Driver {
        max_distance: u32,
        distance_per_step: u32,
    },
    LimitedDriver {
        max_distance: u32,
        distance_per_step: u32,
        max_orders: u32,
    },
}

impl VolunteerSpec {
    pub fn into_role(self) -> VolunteerRole {
        let collector = |cooldown| CollectorWork {
            cooldown,
            time_left: 0,
        };
        let driver = |max_distance, distance_per_step| DriverWork {
            max_distance,
            distance_per_step,
            distance_left: 0,
        };
        match self {
            VolunteerSpec::Collector { cooldown } => VolunteerRole::Collector(collector(cooldown)),
            VolunteerSpec::LimitedCollector {
                cooldown,
                max_orders,
            } => VolunteerRole::LimitedCollector(collector(cooldown), Quota::new(max_orders)),
            VolunteerSpec::Driver {
                max_distance,
                distance_per_step,
            } => VolunteerRole::Driver(driver(max_distance, distance_per_step)),
            VolunteerSpec::LimitedDriver {
                max_distance,
                distance_per_step,
                max_orders,
            } => VolunteerRole::LimitedDriver(
                driver(max_distance, distance_per_step),
                Quota::new(max_orders),
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Volunteer {
    pub id: VolunteerId,
    pub name: String,
    pub active_order_id: Option<OrderId>,
    pub completed_order_id: Option<OrderId>,
    pub role: VolunteerRole,
}

impl Volunteer {
    pub fn new(id: VolunteerId, name: &str, spec: VolunteerSpec) -> Self {
        Self {
            id,
            name: name.to_string(),
            active_order_id: None,
            completed_order_id: None,
            role: spec.into_role(),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.active_order_id.is_some()
    }

    pub fn is_collector(&self) -> bool {
        matches!(
            self.role,
            VolunteerRole::Collector(_) | VolunteerRole::LimitedCollector(..)
        )
    }

    fn quota(&self) -> Option<&Quota> {
        match &self.role {
            VolunteerRole::LimitedCollector(_, q) | VolunteerRole::LimitedDriver(_, q) => Some(q),
            VolunteerRole::Collector(_) | VolunteerRole::Driver(_) => None,
        }
    }

    /// Remaining quota, `None` for unlimited variants.
    pub fn orders_left(&self) -> Option<u32> {
        self.quota().map(|q| q.orders_left)
    }

    pub fn has_orders_left(&self) -> bool {
        self.orders_left().map_or(true, |left| left > 0)
    }

    /// Ticks left for a collector, distance left for a driver.
    pub fn time_left(&self) -> u32 {
        match &self.role {
            VolunteerRole::Collector(c) | VolunteerRole::LimitedCollector(c, _) => c.time_left,
            VolunteerRole::Driver(d) | VolunteerRole::LimitedDriver(d, _) => d.distance_left,
        }
    }

    pub fn can_take_order(&self, order: &Order) -> bool {
        if self.is_busy() || !self.has_orders_left() {
            return false;
        }
        match &self.role {
            VolunteerRole::Collector(_) | VolunteerRole::LimitedCollector(..) => {
                order.status == OrderStatus::Pending
            }
            VolunteerRole::Driver(d) | VolunteerRole::LimitedDriver(d, _) => {
                order.status == OrderStatus::Collecting && order.distance <= d.max_distance
            }
        }
    }

    /// Start working `order`. Caller must have checked `can_take_order`.
    pub fn accept_order(&mut self, order: &Order) {
        self.active_order_id = Some(order.id);
        match &mut self.role {
            VolunteerRole::Collector(c) => c.time_left = c.cooldown,
            VolunteerRole::LimitedCollector(c, q) => {
                c.time_left = c.cooldown;
                q.orders_left = q.orders_left.saturating_sub(1);
            }
            VolunteerRole::Driver(d) => d.distance_left = order.distance,
            VolunteerRole::LimitedDriver(d, q) => {
                d.distance_left = order.distance;
                q.orders_left = q.orders_left.saturating_sub(1);
            }
        }
    }

    /// Advance the active order by one tick.
    ///
    /// Returns the finished order id when the countdown reaches zero; the
    /// volunteer is idle afterwards. Idle volunteers are untouched.
    pub fn step(&mut self) -> Option<OrderId> {
        let active = self.active_order_id?;
        let remaining = match &mut self.role {
            VolunteerRole::Collector(c) | VolunteerRole::LimitedCollector(c, _) => {
                c.time_left = c.time_left.saturating_sub(1);
                c.time_left
            }
            VolunteerRole::Driver(d) | VolunteerRole::LimitedDriver(d, _) => {
                d.distance_left = d.distance_left.saturating_sub(d.distance_per_step);
                d.distance_left
            }
        };
        if remaining > 0 {
            return None;
        }
        self.completed_order_id = Some(active);
        self.active_order_id = None;
        Some(active)
    }
}
