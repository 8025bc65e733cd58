//! Store descriptors and the other wire-shaped types the pool treats as
//! opaque input, gossiped in by the cluster.

use serde::{Deserialize, Serialize};

/// Stable, cluster-unique identifier for a store.
pub type StoreId = u64;

/// Identifier of the node hosting one or more stores.
pub type NodeId = u64;

/// Identifier of a range (a contiguous keyspan) replicated across stores.
pub type RangeId = u64;

/// Identifier of a single replica of a range.
pub type ReplicaId = u64;

/// Capacity telemetry a store reports about itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreCapacity {
    pub range_count: i64,
    pub fraction_used: f64,
}

/// The self-description a store gossips: identifier, host node, attributes,
/// and capacity. Opaque to the pool beyond what §4.10's classifier reads.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoreDescriptor {
    pub store_id: StoreId,
    pub node_id: NodeId,
    #[serde(default)]
    pub node_attrs: Vec<String>,
    #[serde(default)]
    pub store_attrs: Vec<String>,
    pub capacity: StoreCapacity,
}

impl StoreDescriptor {
    /// Union of node-level and store-level attributes, the set constraint
    /// matching is performed against.
    pub fn combined_attributes(&self) -> impl Iterator<Item = &str> {
        self.node_attrs
            .iter()
            .chain(self.store_attrs.iter())
            .map(String::as_str)
    }
}

/// One replica of a range, as referenced by placement/allocator callers of
/// [`crate::pool::StorePool::dead_replicas`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplicaDescriptor {
    pub store_id: StoreId,
    pub replica_id: ReplicaId,
}
