//! Constraint matching, behind a trait so a future locality-aware or
//! weighted matcher can replace it without touching the pool's locking or
//! counters (see the open question in the spec's design notes).

use crate::descriptor::StoreDescriptor;

/// Decides whether a store's attributes satisfy a set of constraint values.
pub trait AttributeMatcher: Send + Sync {
    fn matches(&self, descriptor: &StoreDescriptor, constraints: &[String]) -> bool;
}

/// The pool's default matcher: every constraint value must appear
/// somewhere in the store's combined attribute set. Constraint values are
/// compared as opaque strings; an empty constraint set matches everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct AllOfMatcher;

impl AttributeMatcher for AllOfMatcher {
    fn matches(&self, descriptor: &StoreDescriptor, constraints: &[String]) -> bool {
        constraints
            .iter()
            .all(|want| descriptor.combined_attributes().any(|have| have == want))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::StoreCapacity;

    fn desc(node_attrs: &[&str], store_attrs: &[&str]) -> StoreDescriptor {
        StoreDescriptor {
            store_id: 1,
            node_id: 1,
            node_attrs: node_attrs.iter().map(|s| s.to_string()).collect(),
            store_attrs: store_attrs.iter().map(|s| s.to_string()).collect(),
            capacity: StoreCapacity::default(),
        }
    }

    #[test]
    fn empty_constraints_always_match() {
        let matcher = AllOfMatcher;
        assert!(matcher.matches(&desc(&[], &[]), &[]));
    }

    #[test]
    fn all_constraints_must_be_present() {
        let matcher = AllOfMatcher;
        let d = desc(&["us-east"], &["ssd"]);
        assert!(matcher.matches(&d, &["us-east".into(), "ssd".into()]));
        assert!(!matcher.matches(&d, &["us-east".into(), "hdd".into()]));
    }
}
