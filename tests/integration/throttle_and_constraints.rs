//! S3/S4: throttle decay and all-of attribute constraint matching.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use storepool::{PoolConfig, StoreCapacity, StoreDescriptor, StorePool, SystemClock, ThrottleReason};

fn descriptor(store_id: u64, attrs: &[&str]) -> Vec<u8> {
    let desc = StoreDescriptor {
        store_id,
        node_id: store_id,
        node_attrs: attrs.iter().map(|s| s.to_string()).collect(),
        store_attrs: vec![],
        capacity: StoreCapacity::default(),
    };
    serde_json::to_vec(&desc).unwrap()
}

#[test]
fn s3_declined_throttle_expires_after_its_timeout() {
    let mut config = PoolConfig::default();
    config.declined_reservations_timeout = Duration::from_millis(100);
    let pool = StorePool::new(Arc::new(SystemClock::new()), config);

    pool.handle_store_descriptor(&descriptor(7, &["ssd"]));
    pool.throttle(ThrottleReason::Declined, 7);

    let constraints = vec!["ssd".to_string()];
    let (snapshot, alive_count, throttled_count) = pool.get_store_list(&constraints, true);
    assert_eq!(alive_count, 1);
    assert_eq!(throttled_count, 1);
    assert!(snapshot.stores().is_empty());

    thread::sleep(Duration::from_millis(150));

    let (snapshot, alive_count, throttled_count) = pool.get_store_list(&constraints, true);
    assert_eq!(alive_count, 1);
    assert_eq!(throttled_count, 0);
    assert_eq!(snapshot.stores().len(), 1);
    assert_eq!(snapshot.stores()[0].store_id, 7);
}

#[test]
fn s4_non_matching_store_excluded_from_snapshot_but_not_from_registry() {
    let pool = StorePool::new(Arc::new(SystemClock::new()), PoolConfig::aging_disabled());
    pool.handle_store_descriptor(&descriptor(1, &["ssd"]));
    pool.handle_store_descriptor(&descriptor(2, &["hdd"]));

    let constraints = vec!["ssd".to_string()];
    let (snapshot, alive_count, _) = pool.get_store_list(&constraints, true);
    assert_eq!(alive_count, 1);
    assert_eq!(snapshot.stores().len(), 1);
    assert_eq!(snapshot.stores()[0].store_id, 1);
}
