//! End-to-end scenarios for the reconciler.
//!
//! Each scenario feeds a fixed arrival sequence through the public API and
//! checks the resulting active list, including the ones a demo harness shows.

#![allow(clippy::unwrap_used)]

use reconcile_core::{EventReconciler, process_events};
use reconcile_types::{Event, EventKind, Item};
use serde_json::{Value, json};

fn summary(items: &[Item]) -> Vec<(String, Option<Value>)> {
    items
        .iter()
        .map(|item| (item.id.to_string(), item.timestamp.clone()))
        .collect()
}

fn expect(pairs: &[(&str, i64)]) -> Vec<(String, Option<Value>)> {
    pairs
        .iter()
        .map(|(id, ts)| ((*id).to_owned(), Some(Value::from(*ts))))
        .collect()
}

#[test]
fn basic_created_updated_sequence() {
    let events = [
        Event::created("a", 100),
        Event::created("b", 200),
        Event::updated("a", 150),
    ];
    let items = process_events(&events);
    assert_eq!(summary(&items), expect(&[("a", 150), ("b", 200)]));
}

#[test]
fn late_create_after_delete_stays_deleted() {
    let events = [
        Event::created("x", 100),
        Event::deleted("x", 200),
        Event::created("x", 50),
    ];
    assert!(process_events(&events).is_empty());
}

#[test]
fn duplicate_events_are_idempotent() {
    let events = [
        Event::created("d", 100),
        Event::created("d", 100),
        Event::updated("d", 150),
        Event::updated("d", 150),
    ];
    let items = process_events(&events);
    assert_eq!(summary(&items), expect(&[("d", 150)]));
}

#[test]
fn out_of_order_mix() {
    let events = [
        Event::updated("y", 300),
        Event::created("y", 100),
        Event::created("z", 250),
        Event::deleted("y", 200),
        Event::created("y", 50),
    ];
    let items = process_events(&events);
    assert_eq!(summary(&items), expect(&[("z", 250)]));
}

#[test]
fn delete_before_create_stays_deleted() {
    let events = [Event::deleted("w", 200), Event::created("w", 100)];
    assert!(process_events(&events).is_empty());
}

#[test]
fn output_is_not_sorted_by_timestamp() {
    let events = [
        Event::created("1", 100),
        Event::created("2", 50),
        Event::created("3", 200),
    ];
    let items = process_events(&events);
    assert_eq!(summary(&items), expect(&[("1", 100), ("2", 50), ("3", 200)]));
}

#[test]
fn later_updates_do_not_reorder() {
    let events = [
        Event::created("a", 1),
        Event::created("b", 2),
        Event::updated("a", 99),
        Event::updated("b", 0),
    ];
    let items = process_events(&events);
    assert_eq!(summary(&items), expect(&[("a", 99), ("b", 0)]));
}

#[test]
fn extra_fields_merge_shallowly() {
    let events = [
        Event::created("a", 1).with_field("meta", json!({ "owner": "ops", "tier": 1 })),
        Event::updated("a", 2).with_field("meta", json!({ "tier": 2 })),
        Event::updated("a", 3).with_field("label", "hot"),
    ];
    let items = process_events(&events);
    let item = items.first().unwrap();

    // Nested objects are replaced, not merged.
    assert_eq!(item.field("meta"), Some(&json!({ "tier": 2 })));
    assert_eq!(item.field("label"), Some(&json!("hot")));
    assert_eq!(item.kind, EventKind::Updated);
}

#[test]
fn events_from_json_lines() {
    let lines = r#"
{"id":"a","timestamp":100,"type":"created","name":"first"}
{"id":"a","timestamp":90,"type":"renamed","name":"ignored"}
{"id":"b","type":"created"}
{"id":"a","timestamp":120,"type":"updated","name":"second"}
"#;
    let reconciler: EventReconciler = lines
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str::<Event>(line).unwrap())
        .collect();

    assert_eq!(reconciler.len(), 4);

    let snapshot = reconciler.snapshot();
    let a = snapshot.get("a").unwrap();
    assert_eq!(a.field("name"), Some(&json!("second")));
    assert_eq!(a.timestamp, Some(json!(120)));

    let b = snapshot.get("b").unwrap();
    assert_eq!(b.timestamp, None);

    let rendered = serde_json::to_value(snapshot.items()).unwrap();
    assert_eq!(
        rendered,
        json!([
            { "id": "a", "timestamp": 120, "type": "updated", "name": "second" },
            { "id": "b", "type": "created" },
        ])
    );
}

#[test]
fn ids_and_timestamps_of_any_scalar_shape() {
    let lines = r#"
{"id":"a","timestamp":"2024-03-01T12:00:00Z","type":"created"}
{"id":7,"timestamp":1,"type":"created"}
{"id":"7","timestamp":2,"type":"deleted"}
{"id":7,"timestamp":"late","type":"updated","note":"kept"}
"#;
    let reconciler: EventReconciler = lines
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str::<Event>(line).unwrap())
        .collect();

    let snapshot = reconciler.snapshot();
    assert!(snapshot.is_tombstoned("7"));
    assert_eq!(
        serde_json::to_value(snapshot.items()).unwrap(),
        json!([
            { "id": "a", "timestamp": "2024-03-01T12:00:00Z", "type": "created" },
            { "id": 7, "timestamp": "late", "type": "updated", "note": "kept" },
        ])
    );
}
