use super::*;
use serde_json::{json, Value};
use std::sync::Arc;
use std::thread;

fn record(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        other => panic!("not an object: {other}"),
    }
}

#[test]
fn test_set_then_get_returns_same_record() {
    let world = WorldService::new();
    let r = record(json!({"x": 1, "tags": ["a", "b"], "pos": {"lat": 1.5}}));

    let stored = world.set_entity("a", r.clone());

    assert_eq!(stored, r);
    assert_eq!(world.get_entity("a"), r);
}

#[test]
fn test_update_preserves_untouched_fields() {
    let world = WorldService::new();
    world.set_entity("a", record(json!({"x": 1, "y": 2})));

    let updated = world.update_entity("a", record(json!({"y": 3})));

    assert_eq!(updated, record(json!({"x": 1, "y": 3})));
    assert_eq!(world.get_entity("a"), updated);
}

#[test]
fn test_update_creates_missing_entity() {
    let world = WorldService::new();
    let updated = world.update_entity("fresh", record(json!({"x": 1})));

    assert_eq!(updated, record(json!({"x": 1})));
    assert_eq!(world.entity_count(), 1);
}

#[test]
fn test_unknown_entity_reads_empty() {
    let world = WorldService::new();
    assert_eq!(world.get_entity("never-seen"), Record::new());
}

#[test]
fn test_listener_coalesces_to_latest_snapshot() {
    let world = WorldService::new();
    world.register_listener("L");

    world.set_entity("a", record(json!({"x": 1})));
    world.set_entity("a", record(json!({"x": 2})));

    let bucket = world.drain_listener("L").unwrap();
    assert_eq!(bucket.len(), 1);
    assert_eq!(bucket["a"], record(json!({"x": 2})));
}

#[test]
fn test_drain_clears_bucket() {
    let world = WorldService::new();
    world.register_listener("L");
    world.set_entity("a", record(json!({"x": 1})));

    assert_eq!(world.drain_listener("L").unwrap().len(), 1);
    assert!(world.drain_listener("L").unwrap().is_empty());
}

#[test]
fn test_fan_out_to_every_listener() {
    let world = WorldService::new();
    world.register_listener("L1");
    world.register_listener("L2");

    world.set_entity("a", record(json!({"x": 1})));

    for listener in ["L1", "L2"] {
        let bucket = world.drain_listener(listener).unwrap();
        assert_eq!(bucket.len(), 1);
        assert_eq!(bucket["a"], record(json!({"x": 1})));
    }
}

#[test]
fn test_update_publishes_full_merged_record() {
    let world = WorldService::new();
    world.set_entity("a", record(json!({"x": 1})));
    world.register_listener("L");

    world.update_entity("a", record(json!({"y": 2, "z": 3})));

    let bucket = world.drain_listener("L").unwrap();
    assert_eq!(bucket["a"], record(json!({"x": 1, "y": 2, "z": 3})));
}

#[test]
fn test_listener_registered_after_write_misses_it() {
    let world = WorldService::new();
    world.set_entity("a", record(json!({"x": 1})));
    world.register_listener("late");

    assert!(world.drain_listener("late").unwrap().is_empty());
}

#[test]
fn test_reregister_resets_bucket() {
    let world = WorldService::new();
    let echoed = world.register_listener("L");
    world.set_entity("a", record(json!({"x": 1})));
    world.register_listener("L");

    assert_eq!(echoed, "L");
    assert!(world.drain_listener("L").unwrap().is_empty());
}

#[test]
fn test_unknown_listener_fails() {
    let world = WorldService::new();
    assert_eq!(
        world.drain_listener("never-registered"),
        Err(WorldError::UnknownListener("never-registered".to_string()))
    );
}

#[test]
fn test_replace_world_does_not_publish() {
    let world = WorldService::new();
    world.register_listener("L");

    let mut new_world = World::new();
    new_world.insert("a".to_string(), record(json!({"x": 1})));
    new_world.insert("b".to_string(), record(json!({"y": 2})));
    world.replace_world(new_world.clone());

    assert_eq!(world.get_world(), new_world);
    assert!(world.drain_listener("L").unwrap().is_empty());
}

#[test]
fn test_reset_empties_world_and_keeps_listeners() {
    let world = WorldService::new();
    world.register_listener("L");
    world.set_entity("a", record(json!({"x": 1})));
    world.update_entity("b", record(json!({"y": 2})));

    let after = world.reset();

    assert!(after.is_empty());
    assert!(world.get_world().is_empty());
    assert_eq!(world.listener_count(), 1);
    assert!(world.drain_listener("L").unwrap().is_empty());
}

#[test]
fn test_reset_with_drop_policy_forgets_listeners() {
    let world = WorldService::with_reset_policy(ResetPolicy::DropListeners);
    world.register_listener("L");
    world.set_entity("a", record(json!({"x": 1})));

    world.reset();

    assert!(world.get_world().is_empty());
    assert_eq!(world.listener_count(), 0);
    assert!(world.drain_listener("L").is_err());
}

#[test]
fn test_reset_policy_reported() {
    assert_eq!(WorldService::new().reset_policy(), ResetPolicy::KeepListeners);
    assert_eq!(
        WorldService::with_reset_policy(ResetPolicy::DropListeners).reset_policy(),
        ResetPolicy::DropListeners
    );
}

#[test]
fn test_independent_instances_do_not_share_state() {
    let first = WorldService::new();
    let second = WorldService::new();

    first.set_entity("a", record(json!({"x": 1})));

    assert!(second.get_entity("a").is_empty());
}

#[test]
fn test_concurrent_updates_same_entity() {
    let world = Arc::new(WorldService::new());
    world.register_listener("L");
    let mut handles = vec![];

    // 16 threads, each merging a distinct field into the same entity
    for i in 0..16 {
        let world = Arc::clone(&world);
        handles.push(thread::spawn(move || {
            let mut fields = Record::new();
            fields.insert(format!("field_{i}"), json!(i));
            world.update_entity("shared", fields);
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    let entity = world.get_entity("shared");
    assert_eq!(entity.len(), 16);

    // The bucket holds the final committed record, not an earlier one
    let bucket = world.drain_listener("L").unwrap();
    assert_eq!(bucket["shared"], entity);
}

#[test]
fn test_concurrent_sets_leave_buckets_consistent_with_store() {
    let world = Arc::new(WorldService::new());
    world.register_listener("L1");
    world.register_listener("L2");
    let mut handles = vec![];

    for i in 0..8 {
        let world = Arc::clone(&world);
        handles.push(thread::spawn(move || {
            for j in 0..50 {
                world.set_entity("contested", record(json!({"writer": i, "round": j})));
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    let stored = world.get_entity("contested");
    assert_eq!(world.drain_listener("L1").unwrap()["contested"], stored);
    assert_eq!(world.drain_listener("L2").unwrap()["contested"], stored);
}

#[test]
fn test_concurrent_drains_never_see_partial_update() {
    let world = Arc::new(WorldService::new());
    world.register_listener("L");

    let writer = {
        let world = Arc::clone(&world);
        thread::spawn(move || {
            for i in 0..200 {
                world.update_entity("a", record(json!({"x": i, "y": i})));
            }
        })
    };

    let reader = {
        let world = Arc::clone(&world);
        thread::spawn(move || {
            let mut last = None;
            for _ in 0..200 {
                let bucket = world.drain_listener("L").unwrap();
                if let Some(snapshot) = bucket.get("a") {
                    assert_eq!(snapshot["x"], snapshot["y"]);
                    last = Some(snapshot.clone());
                }
            }
            last
        })
    };

    writer.join().unwrap();
    reader.join().unwrap();

    // Whatever the reader missed is still waiting, and it is the latest value
    let remaining = world.drain_listener("L").unwrap();
    if let Some(snapshot) = remaining.get("a") {
        assert_eq!(snapshot, &world.get_entity("a"));
    }
}
