//! Warehouse Engine — Canonical Hashing
//!
//! Deterministic canonical serialization + SHA-256 hashing of the full
//! engine state. Two states hash equal iff their counters, entity
//! collections (including collection order) and action logs are equal.
//!
//! Rules:
//!   - engine_version first, then counters, then collections, then the log
//!   - collections keep their in-memory order (FIFO / registration order)
//!   - UTF-8 JSON, no whitespace

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::state::WarehouseState;
use crate::ENGINE_VERSION;

/// Canonical serialization of WarehouseState to UTF-8 JSON bytes.
pub fn canonical_serialize(state: &WarehouseState) -> Vec<u8> {
    let obj = build_canonical_value(state);
    // A Value tree with string keys always serializes.
    serde_json::to_vec(&obj).unwrap_or_default()
}

/// SHA-256 of canonical serialization. Lowercase hex string.
pub fn canonical_hash(state: &WarehouseState) -> String {
    let bytes = canonical_serialize(state);
    let digest = Sha256::digest(&bytes);
    digest
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<String>()
}

fn to_value<T: serde::Serialize>(v: &T) -> Value {
    serde_json::to_value(v).unwrap_or(Value::Null)
}

/// Build the canonical serde_json::Value in strict field order.
///
/// Field order: engine_version, customer_counter, volunteer_counter,
///              order_counter, customers, volunteers, pending_orders,
///              in_process_orders, completed_orders, action_log
fn build_canonical_value(state: &WarehouseState) -> Value {
    let mut root = Map::new();
    root.insert(
        "engine_version".to_string(),
        Value::Number(ENGINE_VERSION.into()),
    );
    root.insert(
        "customer_counter".to_string(),
        Value::Number(state.customer_counter.into()),
    );
    root.insert(
        "volunteer_counter".to_string(),
        Value::Number(state.volunteer_counter.into()),
    );
    root.insert(
        "order_counter".to_string(),
        Value::Number(state.order_counter.into()),
    );
    root.insert("customers".to_string(), to_value(&state.customers));
    root.insert("volunteers".to_string(), to_value(&state.volunteers));
    root.insert("pending_orders".to_string(), to_value(&state.pending_orders));
    root.insert(
        "in_process_orders".to_string(),
        to_value(&state.in_process_orders),
    );
    root.insert(
        "completed_orders".to_string(),
        to_value(&state.completed_orders),
    );

    // Log entries are hashed by their canonical line plus the full outcome,
    // so two logs that print the same still differ on error messages.
    let log: Vec<Value> = state
        .action_log
        .iter()
        .map(|rec| {
            let mut entry = Map::new();
            entry.insert("action".to_string(), Value::String(rec.action.to_string()));
            entry.insert("status".to_string(), to_value(&rec.status));
            Value::Object(entry)
        })
        .collect();
    root.insert("action_log".to_string(), Value::Array(log));

    Value::Object(root)
}
