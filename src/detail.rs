//! The per-store mutable record owned by the pool.

use std::collections::HashMap;
use std::time::Instant;

use crate::clock::HlcTimestamp;
use crate::descriptor::{RangeId, ReplicaId, StoreDescriptor, StoreId};

/// Sentinel `heap_index` meaning "not currently in the liveness queue".
pub const NOT_IN_HEAP: i64 = -1;

/// Per-store record: latest descriptor, liveness flag, throttle deadline,
/// dead-replica index, and the store's current position in the liveness
/// queue. One of these exists for every store the pool has ever heard of,
/// or been asked about; see invariant 5 in the spec — details are never
/// removed.
pub(crate) struct StoreDetail {
    pub store_id: StoreId,
    pub desc: Option<StoreDescriptor>,
    pub dead: bool,
    pub times_died: u64,
    pub found_dead_on: Option<HlcTimestamp>,
    pub last_updated_time: HlcTimestamp,
    pub throttled_until: Option<Instant>,
    pub dead_replicas: HashMap<RangeId, Vec<ReplicaId>>,
    pub heap_index: i64,
}

impl StoreDetail {
    pub fn new(store_id: StoreId, now: HlcTimestamp) -> Self {
        Self {
            store_id,
            desc: None,
            dead: false,
            times_died: 0,
            found_dead_on: None,
            last_updated_time: now,
            throttled_until: None,
            dead_replicas: HashMap::new(),
            heap_index: NOT_IN_HEAP,
        }
    }

    /// §4.6 `markAlive`: records a fresh observation. `desc` is left
    /// untouched if this update did not carry one (e.g. a lazily-created
    /// detail that a query touched before any gossip arrived).
    pub fn mark_alive(&mut self, now: HlcTimestamp, desc: Option<StoreDescriptor>) {
        if let Some(desc) = desc {
            self.desc = Some(desc);
        }
        self.dead = false;
        self.last_updated_time = now;
    }

    /// §4.6 `markDead`. Returns `true` if a descriptor was present at the
    /// time of the transition, so the caller can decide whether to log at
    /// warning level with store/node context.
    pub fn mark_dead(&mut self, now: HlcTimestamp) -> bool {
        self.dead = true;
        self.found_dead_on = Some(now);
        self.times_died += 1;
        self.desc.is_some()
    }

    pub fn is_throttled(&self, now: Instant) -> bool {
        matches!(self.throttled_until, Some(until) if until > now)
    }

    pub fn remaining_throttle(&self, now: Instant) -> Option<std::time::Duration> {
        self.throttled_until
            .and_then(|until| until.checked_duration_since(now))
            .filter(|d| !d.is_zero())
    }
}
