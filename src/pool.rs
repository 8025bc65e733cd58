//! The store pool itself: registry, gossip ingestion, and query surface.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::sync::Arc;
use std::time::Instant;

use parking_lot::RwLock;
use serde::Deserialize;
use tracing::{error, warn};

use crate::clock::Clock;
use crate::config::PoolConfig;
use crate::descriptor::{RangeId, ReplicaDescriptor, ReplicaId, StoreDescriptor, StoreId};
use crate::detail::StoreDetail;
use crate::heap::LivenessQueue;
use crate::matcher::{AllOfMatcher, AttributeMatcher};
use crate::snapshot::StoreListSnapshot;

/// Reason a store was excluded from a pending replica placement, passed to
/// [`StorePool::throttle`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThrottleReason {
    /// The store declined the placement.
    Declined,
    /// The placement attempt failed outright.
    Failed,
}

/// A single (range, replica) pair as carried in the dead-replicas gossip
/// payload for one store.
#[derive(Clone, Copy, Debug, Deserialize)]
struct DeadReplicaEntry {
    range_id: RangeId,
    replica_id: ReplicaId,
}

/// Wire shape of the dead-replicas gossip payload: keyed implicitly by the
/// store the handler was invoked for, carrying the full current set of
/// (range, replica) pairs known dead on that store.
#[derive(Clone, Debug, Deserialize)]
struct DeadReplicasPayload {
    entries: Vec<DeadReplicaEntry>,
}

struct PoolInner {
    arena: Vec<StoreDetail>,
    index_of: HashMap<StoreId, usize>,
    heap: LivenessQueue,
}

impl PoolInner {
    fn new() -> Self {
        Self {
            arena: Vec::new(),
            index_of: HashMap::new(),
            heap: LivenessQueue::new(),
        }
    }

    /// §4.5 `getOrCreateLocked`. Caller must hold the write lock.
    fn get_or_create(&mut self, id: StoreId, clock: &dyn Clock) -> usize {
        if let Some(&slot) = self.index_of.get(&id) {
            return slot;
        }
        let now = clock.now();
        let slot = self.arena.len();
        let mut detail = StoreDetail::new(id, now);
        detail.mark_alive(now, None);
        self.arena.push(detail);
        self.index_of.insert(id, slot);
        self.heap.enqueue(&mut self.arena, slot);
        slot
    }
}

/// Per-node, in-memory registry of known stores in the cluster.
///
/// Ingests gossip via [`StorePool::handle_store_descriptor`] and
/// [`StorePool::handle_dead_replicas`], ages out stores that stop reporting
/// via a [`crate::worker::LivenessWorker`] running against the same
/// instance, and answers the query surface used by placement code.
pub struct StorePool {
    inner: RwLock<PoolInner>,
    clock: Arc<dyn Clock>,
    config: PoolConfig,
    matcher: Box<dyn AttributeMatcher>,
}

impl StorePool {
    /// Builds a pool with the default all-of attribute matcher.
    pub fn new(clock: Arc<dyn Clock>, config: PoolConfig) -> Self {
        Self::with_matcher(clock, config, Box::new(AllOfMatcher))
    }

    /// Builds a pool with a caller-supplied matcher, per the open question
    /// in the design notes about pluggable constraint policies.
    pub fn with_matcher(
        clock: Arc<dyn Clock>,
        config: PoolConfig,
        matcher: Box<dyn AttributeMatcher>,
    ) -> Self {
        Self {
            inner: RwLock::new(PoolInner::new()),
            clock,
            config,
            matcher,
        }
    }

    pub(crate) fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    pub(crate) fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// §4.7 step 1: peek the queue head and compute the next wake timeout,
    /// aging out the head in place if its deadline has already passed.
    /// Returns the timeout the worker should sleep for.
    pub(crate) fn age_queue_head(&self) -> std::time::Duration {
        let mut inner = self.inner.write();
        loop {
            let Some(slot) = inner.heap.peek() else {
                return self.config.time_until_store_dead;
            };
            let now = self.clock.now();
            let dead_as_of = inner.arena[slot].last_updated_time + self.config.time_until_store_dead;
            if now >= dead_as_of {
                let slot = inner.heap.dequeue(&mut inner.arena).expect("peeked head present");
                let had_desc = inner.arena[slot].mark_dead(now);
                if had_desc {
                    let desc = inner.arena[slot].desc.as_ref().expect("had_desc checked");
                    warn!(store_id = desc.store_id, node_id = desc.node_id, "store marked dead");
                }
                continue;
            }
            return dead_as_of.saturating_duration_since(now);
        }
    }

    /// §4.6 descriptor handler. Drops and logs on decode failure.
    pub fn handle_store_descriptor(&self, payload: &[u8]) {
        let desc: StoreDescriptor = match serde_json::from_slice(payload) {
            Ok(desc) => desc,
            Err(err) => {
                error!(error = %err, "dropping malformed store descriptor gossip");
                return;
            }
        };
        let now = self.clock.now();
        let mut inner = self.inner.write();
        let slot = inner.get_or_create(desc.store_id, &*self.clock);
        inner.arena[slot].mark_alive(now, Some(desc));
        inner.heap.enqueue(&mut inner.arena, slot);
    }

    /// §4.6 dead-replicas handler. `store_id` identifies the store the
    /// gossip key prefix resolved to; the payload supplies the full
    /// replacement set of dead (range, replica) pairs for that store.
    pub fn handle_dead_replicas(&self, store_id: StoreId, payload: &[u8]) {
        let payload: DeadReplicasPayload = match serde_json::from_slice(payload) {
            Ok(payload) => payload,
            Err(err) => {
                error!(error = %err, store_id, "dropping malformed dead-replicas gossip");
                return;
            }
        };
        let mut by_range: HashMap<RangeId, Vec<ReplicaId>> = HashMap::new();
        for entry in payload.entries {
            by_range.entry(entry.range_id).or_default().push(entry.replica_id);
        }
        let mut inner = self.inner.write();
        let slot = inner.get_or_create(store_id, &*self.clock);
        inner.arena[slot].dead_replicas = by_range;
    }

    /// §4.8. Throttling is a pure query-time policy; it never touches the
    /// liveness queue.
    pub fn throttle(&self, reason: ThrottleReason, store_id: StoreId) {
        let timeout = match reason {
            ThrottleReason::Declined => self.config.declined_reservations_timeout,
            ThrottleReason::Failed => self.config.failed_reservations_timeout,
        };
        let mut inner = self.inner.write();
        let slot = inner.get_or_create(store_id, &*self.clock);
        inner.arena[slot].throttled_until = Some(Instant::now() + timeout);
    }

    /// §4.9. Silently dropped if the store has never been seen in gossip.
    pub fn update_remote_capacity_estimate(&self, store_id: StoreId, range_count: i64) {
        let mut inner = self.inner.write();
        let slot = inner.get_or_create(store_id, &*self.clock);
        if let Some(desc) = inner.arena[slot].desc.as_mut() {
            desc.capacity.range_count = range_count;
        }
    }

    /// §4.10. Read-locked: this path never creates a detail.
    pub fn get_store_list(
        &self,
        constraints: &[String],
        deterministic: bool,
    ) -> (StoreListSnapshot, usize, usize) {
        let inner = self.inner.read();
        let now = Instant::now();
        let mut snapshot = StoreListSnapshot::new(self.config.max_fraction_used_threshold);
        let mut alive_count = 0usize;
        let mut throttled_count = 0usize;

        let mut slots: Vec<usize> = (0..inner.arena.len()).collect();
        if deterministic {
            slots.sort_by_key(|&slot| inner.arena[slot].store_id);
        }

        for slot in slots {
            let detail = &inner.arena[slot];
            let Some(desc) = detail.desc.as_ref() else {
                continue; // Dead: desc absent.
            };
            if detail.dead {
                continue; // Dead.
            }
            if !self.matcher.matches(desc, constraints) {
                continue; // Alive but non-matching: contributes to nothing per §4.10 step 4.
            }
            alive_count += 1;
            if detail.is_throttled(now) {
                throttled_count += 1;
            } else {
                snapshot.add(desc.clone());
            }
        }

        (snapshot, alive_count, throttled_count)
    }

    /// §4.11. Read-locked.
    pub fn get_store_descriptor(&self, store_id: StoreId) -> Option<StoreDescriptor> {
        let inner = self.inner.read();
        let slot = *inner.index_of.get(&store_id)?;
        inner.arena[slot].desc.clone()
    }

    /// §4.12. Write-locked because unknown stores referenced by `replicas`
    /// are created reactively.
    pub fn dead_replicas(&self, range_id: RangeId, replicas: &[ReplicaDescriptor]) -> Vec<ReplicaDescriptor> {
        let mut inner = self.inner.write();
        let mut result = Vec::new();
        for replica in replicas {
            let slot = inner.get_or_create(replica.store_id, &*self.clock);
            let detail = &inner.arena[slot];
            if detail.dead {
                result.push(*replica);
                continue;
            }
            let shadowed = detail
                .dead_replicas
                .get(&range_id)
                .is_some_and(|ids| ids.contains(&replica.replica_id));
            if shadowed {
                result.push(*replica);
            }
        }
        result
    }

    /// §4.13. Sorted by store identifier; one line per store.
    pub fn to_string_report(&self) -> String {
        let inner = self.inner.read();
        let mut slots: Vec<usize> = (0..inner.arena.len()).collect();
        slots.sort_by_key(|&slot| inner.arena[slot].store_id);

        let now = Instant::now();
        let mut out = String::new();
        for slot in slots {
            let detail = &inner.arena[slot];
            let marker = if detail.dead { "*" } else { "" };
            let (range_count, fraction_used) = detail
                .desc
                .as_ref()
                .map(|d| (d.capacity.range_count, d.capacity.fraction_used))
                .unwrap_or((0, 0.0));
            let _ = write!(out, "{}{}: ranges={} used={:.3}", detail.store_id, marker, range_count, fraction_used);
            if let Some(remaining) = detail.remaining_throttle(now) {
                let _ = write!(out, " throttled_for={:?}", remaining);
            }
            out.push('\n');
        }
        out
    }
}
