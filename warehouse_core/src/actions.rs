//! Warehouse Engine — Action Definitions
//!
//! Actions are pure data: the command kind and the arguments it was
//! constructed with. Execution lives in the engine. Every applied action is
//! archived once, with its outcome, in the append-only action log.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{CustomerId, CustomerKind, OrderId, VolunteerId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    SimulateStep {
        steps: u32,
    },
    AddOrder {
        customer_id: CustomerId,
    },
    AddCustomer {
        name: String,
        kind: CustomerKind,
        distance: u32,
        max_orders: u32,
    },
    PrintOrderStatus {
        order_id: OrderId,
    },
    PrintCustomerStatus {
        customer_id: CustomerId,
    },
    PrintVolunteerStatus {
        volunteer_id: VolunteerId,
    },
    PrintActionsLog,
    Close,
    BackupWarehouse,
    RestoreWarehouse,
}

/// Canonical textual form, as shown by the `log` command.
impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::SimulateStep { steps } => write!(f, "simulateStep {}", steps),
            Action::AddOrder { customer_id } => write!(f, "order {}", customer_id),
            Action::AddCustomer {
                name,
                kind,
                distance,
                max_orders,
            } => write!(f, "customer {} {} {} {}", name, kind, distance, max_orders),
            Action::PrintOrderStatus { order_id } => write!(f, "orderStatus {}", order_id),
            Action::PrintCustomerStatus { customer_id } => {
                write!(f, "customerStatus {}", customer_id)
            }
            Action::PrintVolunteerStatus { volunteer_id } => {
                write!(f, "volunteerStatus {}", volunteer_id)
            }
            Action::PrintActionsLog => f.write_str("log"),
            Action::Close => f.write_str("close"),
            Action::BackupWarehouse => f.write_str("backup"),
            Action::RestoreWarehouse => f.write_str("restore"),
        }
    }
}

/// Recorded outcome of an applied action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionStatus {
    Completed,
    Error(String),
}

impl ActionStatus {
    pub fn is_completed(&self) -> bool {
        matches!(self, ActionStatus::Completed)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            ActionStatus::Completed => None,
            ActionStatus::Error(msg) => Some(msg),
        }
    }
}

impl fmt::Display for ActionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionStatus::Completed => f.write_str("COMPLETED"),
            ActionStatus::Error(_) => f.write_str("ERROR"),
        }
    }
}

/// One entry of the action log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActionRecord {
    pub action: Action,
    pub status: ActionStatus,
}

impl fmt::Display for ActionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.action, self.status)
    }
}
