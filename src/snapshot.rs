//! Value object returned by [`crate::pool::StorePool::get_store_list`].

use crate::descriptor::StoreDescriptor;
use crate::stats::RunningStatistic;

/// A filtered view of store descriptors plus aggregate statistics over
/// them, as they stood at the moment the snapshot was taken. Immutable from
/// the caller's perspective once returned.
#[derive(Clone, Debug, Default)]
pub struct StoreListSnapshot {
    stores: Vec<StoreDescriptor>,
    count: RunningStatistic,
    used: RunningStatistic,
    candidate_count: RunningStatistic,
    max_fraction_used_threshold: f64,
}

impl StoreListSnapshot {
    /// `max_fraction_used_threshold` is an allocator-owned constant (not a
    /// pool concept); the pool only needs it to decide which descriptors
    /// count toward `candidate_count`.
    pub fn new(max_fraction_used_threshold: f64) -> Self {
        Self {
            max_fraction_used_threshold,
            ..Default::default()
        }
    }

    /// Appends `desc` and folds it into all three running statistics.
    pub fn add(&mut self, desc: StoreDescriptor) {
        self.count.update(desc.capacity.range_count as f64);
        self.used.update(desc.capacity.fraction_used);
        if desc.capacity.fraction_used <= self.max_fraction_used_threshold {
            self.candidate_count.update(desc.capacity.range_count as f64);
        }
        self.stores.push(desc);
    }

    pub fn stores(&self) -> &[StoreDescriptor] {
        &self.stores
    }

    pub fn count(&self) -> &RunningStatistic {
        &self.count
    }

    pub fn used(&self) -> &RunningStatistic {
        &self.used
    }

    pub fn candidate_count(&self) -> &RunningStatistic {
        &self.candidate_count
    }
}
