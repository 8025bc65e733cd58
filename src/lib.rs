//! A per-node, in-memory registry of the storage nodes ("stores") in a
//! distributed key/value cluster.
//!
//! The pool ingests membership and health signals from a cluster-wide
//! gossip layer, ages out stores that stop reporting, applies short-lived
//! throttles against stores that recently refused or failed a replica
//! placement, and answers the queries placement and rebalancing code need:
//! which stores currently match a constraint set and are eligible to
//! receive a replica, and which replicas of a range live on dead stores.
//!
//! # Quick start
//!
//! ```
//! use std::sync::Arc;
//! use storepool::{PoolConfig, StorePool, SystemClock};
//!
//! let pool = StorePool::new(Arc::new(SystemClock::new()), PoolConfig::from_env());
//! let desc = r#"{"store_id":1,"node_id":1,"node_attrs":["ssd"],"store_attrs":[],
//!                "capacity":{"range_count":0,"fraction_used":0.0}}"#;
//! pool.handle_store_descriptor(desc.as_bytes());
//!
//! let (snapshot, alive_count, throttled_count) =
//!     pool.get_store_list(&["ssd".to_string()], false);
//! assert_eq!(alive_count, 1);
//! assert_eq!(throttled_count, 0);
//! assert_eq!(snapshot.stores().len(), 1);
//! ```

mod clock;
mod config;
mod descriptor;
mod detail;
mod error;
mod heap;
mod matcher;
mod pool;
mod snapshot;
mod stats;
mod stopper;
mod worker;

pub use clock::{Clock, HlcTimestamp, ManualClock, SystemClock};
pub use config::PoolConfig;
pub use descriptor::{
    NodeId, RangeId, ReplicaDescriptor, ReplicaId, StoreCapacity, StoreDescriptor, StoreId,
};
pub use error::{PoolError, Result};
pub use matcher::{AllOfMatcher, AttributeMatcher};
pub use pool::{StorePool, ThrottleReason};
pub use snapshot::StoreListSnapshot;
pub use stats::RunningStatistic;
pub use stopper::{Stopper, ThreadStopper};
pub use worker::LivenessWorker;
