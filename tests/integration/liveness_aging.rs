//! S1/S2: a store ages out when the liveness worker catches up to it, and
//! revives on the next gossip update.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use storepool::{LivenessWorker, PoolConfig, StoreCapacity, StoreDescriptor, StorePool, SystemClock, ThreadStopper};

fn descriptor(store_id: u64) -> Vec<u8> {
    let desc = StoreDescriptor {
        store_id,
        node_id: store_id,
        node_attrs: vec![],
        store_attrs: vec![],
        capacity: StoreCapacity::default(),
    };
    serde_json::to_vec(&desc).unwrap()
}

#[test]
fn s1_store_ages_out_after_time_until_store_dead() {
    let mut config = PoolConfig::default();
    config.time_until_store_dead = Duration::from_millis(5);
    let pool = Arc::new(StorePool::new(Arc::new(SystemClock::new()), config));
    let stopper = Arc::new(ThreadStopper::new());
    let worker = LivenessWorker::spawn(Arc::clone(&pool), stopper.clone());

    pool.handle_store_descriptor(&descriptor(1));
    thread::sleep(Duration::from_millis(20));

    let (snapshot, alive_count, throttled_count) = pool.get_store_list(&[], true);
    assert_eq!(alive_count, 0);
    assert_eq!(throttled_count, 0);
    assert!(snapshot.stores().is_empty());
    assert!(pool.get_store_descriptor(1).is_some());

    stopper.stop();
    worker.join();
}

#[test]
fn s2_store_revives_on_fresh_gossip() {
    let mut config = PoolConfig::default();
    config.time_until_store_dead = Duration::from_millis(5);
    let pool = Arc::new(StorePool::new(Arc::new(SystemClock::new()), config));
    let stopper = Arc::new(ThreadStopper::new());
    let worker = LivenessWorker::spawn(Arc::clone(&pool), stopper.clone());

    pool.handle_store_descriptor(&descriptor(1));
    thread::sleep(Duration::from_millis(20));
    let (_, alive_count, _) = pool.get_store_list(&[], true);
    assert_eq!(alive_count, 0);

    pool.handle_store_descriptor(&descriptor(1));
    let (snapshot, alive_count, _) = pool.get_store_list(&[], true);
    assert_eq!(alive_count, 1);
    assert_eq!(snapshot.stores()[0].store_id, 1);

    stopper.stop();
    worker.join();
}

#[test]
fn aging_disabled_sentinel_never_marks_a_store_dead() {
    let pool = Arc::new(StorePool::new(Arc::new(SystemClock::new()), PoolConfig::aging_disabled()));
    let stopper = Arc::new(ThreadStopper::new());
    let worker = LivenessWorker::spawn(Arc::clone(&pool), stopper.clone());

    pool.handle_store_descriptor(&descriptor(1));
    thread::sleep(Duration::from_millis(50));
    let (_, alive_count, _) = pool.get_store_list(&[], true);
    assert_eq!(alive_count, 1);

    stopper.stop();
    worker.join();
}
