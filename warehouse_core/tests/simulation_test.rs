//! Simulation tests — tick timing, lifecycle, quotas and snapshots,
//! driven through the public engine API only.

use warehouse_core::actions::{Action, ActionStatus};
use warehouse_core::domain::{CustomerKind, OrderStatus};
use warehouse_core::engine::WarehouseEngine;
use warehouse_core::error::ActionError;
use warehouse_core::hashing::canonical_hash;
use warehouse_core::volunteer::VolunteerSpec;

fn step(engine: &mut WarehouseEngine, steps: u32) {
    engine
        .apply_action(Action::SimulateStep { steps })
        .expect("step never fails");
}

fn order_for(engine: &mut WarehouseEngine, customer_id: u32) -> u32 {
    match engine
        .apply_action(Action::AddOrder { customer_id })
        .expect("order accepted")
    {
        warehouse_core::report::ActionOutput::OrderPlaced(id) => id,
        other => panic!("unexpected output {:?}", other),
    }
}

/// A fixed command sequence touching every action kind.
fn scripted_run() -> WarehouseEngine {
    let mut engine = WarehouseEngine::new();
    engine.add_volunteer("c0", VolunteerSpec::Collector { cooldown: 2 });
    engine.add_volunteer(
        "lc1",
        VolunteerSpec::LimitedCollector {
            cooldown: 1,
            max_orders: 2,
        },
    );
    engine.add_volunteer(
        "d2",
        VolunteerSpec::Driver {
            max_distance: 8,
            distance_per_step: 3,
        },
    );
    engine.add_volunteer(
        "ld3",
        VolunteerSpec::LimitedDriver {
            max_distance: 20,
            distance_per_step: 4,
            max_orders: 1,
        },
    );
    let script = vec![
        Action::AddCustomer {
            name: "near".to_string(),
            kind: CustomerKind::Soldier,
            distance: 4,
            max_orders: 3,
        },
        Action::AddCustomer {
            name: "far".to_string(),
            kind: CustomerKind::Civilian,
            distance: 12,
            max_orders: 2,
        },
        Action::AddOrder { customer_id: 0 },
        Action::AddOrder { customer_id: 1 },
        Action::AddOrder { customer_id: 0 },
        Action::SimulateStep { steps: 2 },
        Action::BackupWarehouse,
        Action::AddOrder { customer_id: 1 },
        Action::AddOrder { customer_id: 1 },
        Action::SimulateStep { steps: 3 },
        Action::PrintOrderStatus { order_id: 1 },
        Action::PrintCustomerStatus { customer_id: 5 },
        Action::PrintVolunteerStatus { volunteer_id: 3 },
        Action::PrintActionsLog,
        Action::SimulateStep { steps: 10 },
    ];
    for action in script {
        let _ = engine.apply_action(action);
    }
    engine
}

// ─────────────────────────────────────────────────────────────
// Test 1: tick_by_tick_pipeline
// ─────────────────────────────────────────────────────────────

#[test]
fn tick_by_tick_pipeline() {
    let mut engine = WarehouseEngine::new();
    let customer = engine.add_customer("maya", CustomerKind::Civilian, 5, 1);
    let collector = engine.add_volunteer("col", VolunteerSpec::Collector { cooldown: 2 });
    let driver = engine.add_volunteer(
        "drv",
        VolunteerSpec::Driver {
            max_distance: 10,
            distance_per_step: 3,
        },
    );
    let order = order_for(&mut engine, customer);

    step(&mut engine, 1);
    let o = engine.order(order).unwrap();
    assert_eq!(o.status, OrderStatus::Collecting);
    assert_eq!(o.collector_id, Some(collector));
    assert_eq!(engine.volunteer(collector).unwrap().time_left(), 2);

    step(&mut engine, 1);
    let c = engine.volunteer(collector).unwrap();
    assert!(c.is_busy());
    assert_eq!(c.time_left(), 1);

    step(&mut engine, 1);
    let o = engine.order(order).unwrap();
    assert_eq!(o.status, OrderStatus::Delivering);
    assert_eq!(o.driver_id, Some(driver));
    assert!(!engine.volunteer(collector).unwrap().is_busy());
    assert_eq!(engine.volunteer(collector).unwrap().completed_order_id, Some(order));
    assert_eq!(engine.volunteer(driver).unwrap().time_left(), 5);

    step(&mut engine, 1);
    assert_eq!(engine.volunteer(driver).unwrap().time_left(), 2);
    assert_eq!(engine.order(order).unwrap().status, OrderStatus::Delivering);

    step(&mut engine, 1);
    assert_eq!(engine.volunteer(driver).unwrap().time_left(), 0);
    assert!(!engine.volunteer(driver).unwrap().is_busy());
    let state = engine.state();
    assert_eq!(state.completed_orders.len(), 1);
    assert_eq!(state.completed_orders[0].status, OrderStatus::Completed);
    assert!(state.pending_orders.is_empty());
    assert!(state.in_process_orders.is_empty());
}

// ─────────────────────────────────────────────────────────────
// Test 2: collector_releases_after_cooldown
// ─────────────────────────────────────────────────────────────

#[test]
fn collector_releases_after_cooldown() {
    for cooldown in 1..=4u32 {
        let mut engine = WarehouseEngine::new();
        let customer = engine.add_customer("c", CustomerKind::Civilian, 1, 1);
        let collector = engine.add_volunteer("col", VolunteerSpec::Collector { cooldown });
        let order = order_for(&mut engine, customer);

        // Assigned on tick 1 (T); released on tick T + cooldown.
        step(&mut engine, 1);
        for _ in 1..cooldown {
            step(&mut engine, 1);
            assert!(engine.volunteer(collector).unwrap().is_busy());
        }
        step(&mut engine, 1);
        assert!(!engine.volunteer(collector).unwrap().is_busy());
        let state = engine.state();
        assert_eq!(state.pending_orders.len(), 1, "cooldown={}", cooldown);
        assert_eq!(state.pending_orders[0].id, order);
        assert_eq!(state.pending_orders[0].status, OrderStatus::Collecting);
    }
}

// ─────────────────────────────────────────────────────────────
// Test 3: driver_completes_after_ceil_distance_over_rate
// ─────────────────────────────────────────────────────────────

#[test]
fn driver_completes_after_ceil_distance_over_rate() {
    for (distance, rate) in [(5u32, 3u32), (6, 3), (1, 4), (9, 2)] {
        let mut engine = WarehouseEngine::new();
        let customer = engine.add_customer("c", CustomerKind::Soldier, distance, 1);
        engine.add_volunteer("col", VolunteerSpec::Collector { cooldown: 1 });
        engine.add_volunteer(
            "drv",
            VolunteerSpec::Driver {
                max_distance: distance,
                distance_per_step: rate,
            },
        );
        order_for(&mut engine, customer);

        // Tick 1 collects, tick 2 hands off to the driver.
        step(&mut engine, 2);
        assert_eq!(engine.state().in_process_orders[0].status, OrderStatus::Delivering);

        let ticks = distance.div_ceil(rate);
        step(&mut engine, ticks - 1);
        assert!(engine.state().completed_orders.is_empty());
        step(&mut engine, 1);
        assert_eq!(
            engine.state().completed_orders.len(),
            1,
            "distance={} rate={}",
            distance,
            rate
        );
    }
}

// ─────────────────────────────────────────────────────────────
// Test 4: driver_skips_orders_beyond_max_distance
// ─────────────────────────────────────────────────────────────

#[test]
fn driver_skips_orders_beyond_max_distance() {
    let mut engine = WarehouseEngine::new();
    let far = engine.add_customer("far", CustomerKind::Civilian, 11, 1);
    engine.add_volunteer("col", VolunteerSpec::Collector { cooldown: 1 });
    engine.add_volunteer(
        "drv",
        VolunteerSpec::Driver {
            max_distance: 10,
            distance_per_step: 5,
        },
    );
    let order = order_for(&mut engine, far);

    step(&mut engine, 6);
    let o = engine.order(order).unwrap();
    assert_eq!(o.status, OrderStatus::Collecting);
    assert_eq!(o.driver_id, None);
    assert_eq!(engine.state().pending_orders.len(), 1);
}

// ─────────────────────────────────────────────────────────────
// Test 5: limited_volunteer_retires_after_quota
// ─────────────────────────────────────────────────────────────

#[test]
fn limited_volunteer_retires_after_quota() {
    let mut engine = WarehouseEngine::new();
    let customer = engine.add_customer("c", CustomerKind::Civilian, 1, 5);
    let limited = engine.add_volunteer(
        "lim",
        VolunteerSpec::LimitedCollector {
            cooldown: 1,
            max_orders: 2,
        },
    );
    let backup_collector = engine.add_volunteer("col", VolunteerSpec::Collector { cooldown: 3 });
    for _ in 0..3 {
        order_for(&mut engine, customer);
    }

    // Tick 1: lim takes order 0, col takes order 1.
    step(&mut engine, 1);
    assert_eq!(engine.volunteer(limited).unwrap().orders_left(), Some(1));

    // Tick 2: lim finishes order 0 and takes order 2 (its last).
    step(&mut engine, 1);
    assert_eq!(engine.order(2).unwrap().collector_id, Some(limited));
    assert_eq!(engine.volunteer(limited).unwrap().orders_left(), Some(0));

    // Tick 3: lim finishes its second order and leaves the pool.
    step(&mut engine, 1);
    assert!(engine.volunteer(limited).is_none());
    assert!(engine.volunteer(backup_collector).is_some());
    assert_eq!(engine.state().volunteers.len(), 1);
}

// ─────────────────────────────────────────────────────────────
// Test 6: customer_quota_enforced
// ─────────────────────────────────────────────────────────────

#[test]
fn customer_quota_enforced() {
    let mut engine = WarehouseEngine::new();
    let customer = engine.add_customer("c", CustomerKind::Soldier, 2, 1);
    order_for(&mut engine, customer);
    let before = canonical_hash(engine.state());

    let err = engine.create_order_for_customer(customer).unwrap_err();
    assert_eq!(err.to_string(), "Cannot place this order");
    assert_eq!(canonical_hash(engine.state()), before);
    assert_eq!(engine.customer(customer).unwrap().order_ids.len(), 1);

    let err = engine
        .apply_action(Action::AddOrder { customer_id: customer })
        .unwrap_err();
    assert_eq!(err, ActionError::CannotPlaceOrder { customer_id: customer });
    assert_eq!(engine.state().order_counter, 1);
}

// ─────────────────────────────────────────────────────────────
// Test 7: backup_restore_roundtrip
// ─────────────────────────────────────────────────────────────

#[test]
fn backup_restore_roundtrip() {
    let mut engine = scripted_run();
    engine.apply_action(Action::BackupWarehouse).unwrap();
    let snapshot_state = engine.snapshot().peek().unwrap().clone();
    let snapshot_hash = engine.snapshot().hash().unwrap();

    engine.apply_action(Action::AddCustomer {
        name: "late".to_string(),
        kind: CustomerKind::Civilian,
        distance: 1,
        max_orders: 1,
    })
    .unwrap();
    step(&mut engine, 4);
    assert_eq!(engine.snapshot().hash().unwrap(), snapshot_hash);

    engine.apply_action(Action::RestoreWarehouse).unwrap();
    let state = engine.state();
    assert_eq!(state.customers, snapshot_state.customers);
    assert_eq!(state.volunteers, snapshot_state.volunteers);
    assert_eq!(state.pending_orders, snapshot_state.pending_orders);
    assert_eq!(state.in_process_orders, snapshot_state.in_process_orders);
    assert_eq!(state.completed_orders, snapshot_state.completed_orders);

    // The restored log plus the restore record itself.
    let log = engine.actions();
    assert_eq!(log.len(), snapshot_state.action_log.len() + 1);
    assert_eq!(log.last().unwrap().action, Action::RestoreWarehouse);
    assert!(log.last().unwrap().status.is_completed());
}

// ─────────────────────────────────────────────────────────────
// Test 8: restore_without_backup_fails
// ─────────────────────────────────────────────────────────────

#[test]
fn restore_without_backup_fails() {
    let mut engine = WarehouseEngine::new();
    engine.add_customer("c", CustomerKind::Civilian, 1, 1);
    let before = engine.state().clone();

    let err = engine.apply_action(Action::RestoreWarehouse).unwrap_err();
    assert_eq!(err, ActionError::NoBackup);

    let state = engine.state();
    assert_eq!(state.customers, before.customers);
    assert_eq!(state.action_log.len(), 1);
    assert_eq!(
        state.action_log[0].status,
        ActionStatus::Error("No backup available".to_string())
    );
}

// ─────────────────────────────────────────────────────────────
// Test 9: restore_is_repeatable
// ─────────────────────────────────────────────────────────────

#[test]
fn restore_is_repeatable() {
    let mut engine = scripted_run();
    engine.restore().unwrap();
    let first = canonical_hash(engine.state());
    step(&mut engine, 3);
    engine.restore().unwrap();
    assert_eq!(canonical_hash(engine.state()), first);
}

// ─────────────────────────────────────────────────────────────
// Test 10: identical_scripts_hash_identically
// ─────────────────────────────────────────────────────────────

#[test]
fn identical_scripts_hash_identically() {
    let h1 = canonical_hash(scripted_run().state());
    let h2 = canonical_hash(scripted_run().state());
    assert_eq!(
        h1, h2,
        "DETERMINISM FAILURE: two runs of the same script produced different hashes"
    );
}

// ─────────────────────────────────────────────────────────────
// Test 11: status_never_moves_backward
// ─────────────────────────────────────────────────────────────

#[test]
fn status_never_moves_backward() {
    let mut engine = scripted_run();
    let mut last: Vec<(u32, OrderStatus)> = engine
        .state()
        .all_orders()
        .map(|o| (o.id, o.status))
        .collect();

    for _ in 0..20 {
        step(&mut engine, 1);
        for (id, prev) in &last {
            let now = engine.order(*id).unwrap().status;
            assert!(now >= *prev, "order {} went from {} to {}", id, prev, now);
            assert!(
                now as u8 <= *prev as u8 + 1,
                "order {} skipped from {} to {}",
                id,
                prev,
                now
            );
        }
        last = engine
            .state()
            .all_orders()
            .map(|o| (o.id, o.status))
            .collect();
    }

    for c in &engine.state().customers {
        assert!(c.order_ids.len() as u32 <= c.max_orders);
    }
}
