//! S5/S6: per-range dead-replica index, and store-death shadowing it.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use storepool::{
    LivenessWorker, PoolConfig, ReplicaDescriptor, StoreCapacity, StoreDescriptor, StorePool,
    SystemClock, ThreadStopper,
};

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
fn s5_dead_replicas_reported_via_gossip_are_returned() {
    let pool = StorePool::new(Arc::new(SystemClock::new()), PoolConfig::aging_disabled());
    pool.handle_store_descriptor(&descriptor(3));
    pool.handle_dead_replicas(3, br#"{"entries":[{"range_id":42,"replica_id":9}]}"#);

    let result = pool.dead_replicas(
        42,
        &[
            ReplicaDescriptor { store_id: 3, replica_id: 9 },
            ReplicaDescriptor { store_id: 3, replica_id: 10 },
        ],
    );
    assert_eq!(result, vec![ReplicaDescriptor { store_id: 3, replica_id: 9 }]);
}

#[test]
fn s6_dead_store_shadows_per_range_index() {
    let mut config = PoolConfig::default();
    config.time_until_store_dead = Duration::from_millis(5);
    let pool = Arc::new(StorePool::new(Arc::new(SystemClock::new()), config));
    let stopper = Arc::new(ThreadStopper::new());
    let worker = LivenessWorker::spawn(Arc::clone(&pool), stopper.clone());

    pool.handle_store_descriptor(&descriptor(4));
    thread::sleep(Duration::from_millis(20));

    let result = pool.dead_replicas(1, &[ReplicaDescriptor { store_id: 4, replica_id: 5 }]);
    assert_eq!(result, vec![ReplicaDescriptor { store_id: 4, replica_id: 5 }]);

    stopper.stop();
    worker.join();
}
