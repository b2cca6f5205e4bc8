//! Warehouse Engine — Engine
//!
//! Top-level orchestrator and registry facade. Owns the live state and the
//! single snapshot slot. Delegates mutation to transitions, validates via
//! invariants, and archives every applied action in the log.

use tracing::{debug, info};

use crate::actions::{Action, ActionRecord, ActionStatus};
use crate::domain::{Customer, CustomerId, CustomerKind, Order, OrderId, OrderSummary, VolunteerId};
use crate::error::ActionError;
use crate::invariants::validate_invariants;
use crate::report::{ActionOutput, CustomerReport, OrderReport, VolunteerReport};
use crate::snapshot::SnapshotSlot;
use crate::state::{create_initial_state, WarehouseState};
use crate::transitions;
use crate::volunteer::{Volunteer, VolunteerSpec};

/// Stateful engine wrapping the transition layer.
#[derive(Debug, Clone)]
pub struct WarehouseEngine {
    state: WarehouseState,
    snapshot: SnapshotSlot,
    open: bool,
}

impl Default for WarehouseEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl WarehouseEngine {
    /// Create an open engine with an empty state and an empty snapshot slot.
    pub fn new() -> Self {
        Self {
            state: create_initial_state(),
            snapshot: SnapshotSlot::new(),
            open: true,
        }
    }

    pub fn state(&self) -> &WarehouseState {
        &self.state
    }

    pub fn snapshot(&self) -> &SnapshotSlot {
        &self.snapshot
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    // -- Registry facade ---------------------------------------------------

    pub fn add_customer(
        &mut self,
        name: &str,
        kind: CustomerKind,
        distance: u32,
        max_orders: u32,
    ) -> CustomerId {
        transitions::add_customer(&mut self.state, name, kind, distance, max_orders)
    }

    pub fn add_volunteer(&mut self, name: &str, spec: VolunteerSpec) -> VolunteerId {
        transitions::add_volunteer(&mut self.state, name, spec)
    }

    pub fn create_order_for_customer(
        &mut self,
        customer_id: CustomerId,
    ) -> Result<OrderId, ActionError> {
        transitions::create_order_for_customer(&mut self.state, customer_id)
    }

    pub fn customer(&self, id: CustomerId) -> Option<&Customer> {
        self.state.customer(id)
    }

    pub fn volunteer(&self, id: VolunteerId) -> Option<&Volunteer> {
        self.state.volunteer(id)
    }

    pub fn order(&self, id: OrderId) -> Option<&Order> {
        self.state.order(id)
    }

    pub fn actions(&self) -> &[ActionRecord] {
        &self.state.action_log
    }

    pub fn record_action(&mut self, record: ActionRecord) {
        self.state.record_action(record);
    }

    /// Final status of every order; the engine stops accepting actions.
    pub fn close(&mut self) -> Vec<OrderSummary> {
        self.open = false;
        self.state.all_orders().map(OrderSummary::from).collect()
    }

    /// Run one tick of the assignment engine.
    pub fn perform_simulation_step(&mut self) {
        transitions::perform_simulation_step(&mut self.state);
        validate_invariants(&self.state);
    }

    // -- Snapshot ----------------------------------------------------------

    pub fn backup(&mut self) {
        self.snapshot.backup(&self.state);
        info!(
            orders = self.state.order_count(),
            log_len = self.state.action_log.len(),
            "warehouse backed up"
        );
    }

    /// Replace the live state with a copy of the snapshot.
    /// Fails, leaving the live state untouched, when no backup exists.
    pub fn restore(&mut self) -> Result<(), ActionError> {
        let restored = self.snapshot.restore()?;
        validate_invariants(&restored);
        self.state = restored;
        info!(
            orders = self.state.order_count(),
            log_len = self.state.action_log.len(),
            "warehouse restored"
        );
        Ok(())
    }

    // -- Actions -----------------------------------------------------------

    /// Execute `action` once and archive it with its outcome:
    ///   1. Refuse if the warehouse is closed (nothing is recorded)
    ///   2. Execute against the live state
    ///   3. Append the record to the log (after a restore: the restored log)
    ///   4. Validate invariants on the resulting state
    pub fn apply_action(&mut self, action: Action) -> Result<ActionOutput, ActionError> {
        if !self.open {
            return Err(ActionError::WarehouseClosed);
        }

        let result = self.execute(&action);
        let status = match &result {
            Ok(_) => ActionStatus::Completed,
            Err(e) => ActionStatus::Error(e.to_string()),
        };
        debug!(action = %action, %status, "action applied");

        self.record_action(ActionRecord { action, status });
        validate_invariants(&self.state);
        result
    }

    fn execute(&mut self, action: &Action) -> Result<ActionOutput, ActionError> {
        match action {
            Action::SimulateStep { steps } => {
                for _ in 0..*steps {
                    self.perform_simulation_step();
                }
                Ok(ActionOutput::None)
            }
            Action::AddOrder { customer_id } => self
                .create_order_for_customer(*customer_id)
                .map(ActionOutput::OrderPlaced),
            Action::AddCustomer {
                name,
                kind,
                distance,
                max_orders,
            } => Ok(ActionOutput::CustomerAdded(self.add_customer(
                name,
                *kind,
                *distance,
                *max_orders,
            ))),
            Action::PrintOrderStatus { order_id } => self
                .order(*order_id)
                .map(|o| ActionOutput::OrderStatus(OrderReport::from(o)))
                .ok_or(ActionError::OrderNotFound(*order_id)),
            Action::PrintCustomerStatus { customer_id } => self
                .customer(*customer_id)
                .map(|c| ActionOutput::CustomerStatus(CustomerReport::build(c, &self.state)))
                .ok_or(ActionError::CustomerNotFound(*customer_id)),
            Action::PrintVolunteerStatus { volunteer_id } => self
                .volunteer(*volunteer_id)
                .map(|v| ActionOutput::VolunteerStatus(VolunteerReport::from(v)))
                .ok_or(ActionError::VolunteerNotFound(*volunteer_id)),
            Action::PrintActionsLog => Ok(ActionOutput::ActionsLog(self.state.action_log.clone())),
            Action::Close => Ok(ActionOutput::Closed(self.close())),
            Action::BackupWarehouse => {
                self.backup();
                Ok(ActionOutput::None)
            }
            Action::RestoreWarehouse => {
                self.restore()?;
                Ok(ActionOutput::None)
            }
        }
    }
}
