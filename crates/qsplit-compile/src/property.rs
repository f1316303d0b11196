//! `PropertySet` for pass communication.
//!
//! Passes share results through a [`PropertySet`]: the partitioning pass
//! writes a [`PartitionMap`], the rewrite pass reads it and records a
//! [`RewriteReport`]. Arbitrary extra data can be stored by type.
//!
//! # Examples
//!
//! ```
//! use qsplit_compile::{PartitionMap, PropertySet};
//!
//! let props = PropertySet::new().with_partitions(2);
//! assert_eq!(props.requested_partitions, Some(2));
//! assert!(props.partition_map.is_none());
//!
//! let props = PropertySet::new().with_partition_map(PartitionMap::greedy(4, 2));
//! assert_eq!(props.partition_map.unwrap().num_partitions(), 2);
//! ```
//!
//! ## Custom properties
//!
//! ```
//! use qsplit_compile::PropertySet;
//!
//! #[derive(Debug, PartialEq)]
//! struct Budget(usize);
//!
//! let mut props = PropertySet::new();
//! props.insert(Budget(3));
//! assert_eq!(props.get::<Budget>(), Some(&Budget(3)));
//! assert_eq!(props.remove::<Budget>(), Some(Budget(3)));
//! assert!(props.get::<Budget>().is_none());
//! ```

use rustc_hash::FxHashMap;
use std::any::{Any, TypeId};

use crate::partition::PartitionMap;
use crate::rewrite::RewriteReport;

/// Shared state for a pass pipeline.
#[derive(Debug, Default)]
pub struct PropertySet {
    /// Number of partitions asked for.
    ///
    /// Read by the partitioning pass, which clamps it to the wire count.
    pub requested_partitions: Option<usize>,

    /// Wire to partition assignment.
    ///
    /// Set by the partitioning pass, required by the rewrite pass.
    pub partition_map: Option<PartitionMap>,

    /// What the rewrite pass did.
    pub rewrite_report: Option<RewriteReport>,

    custom: FxHashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl PropertySet {
    /// Create a new empty property set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a number of partitions.
    #[must_use]
    pub fn with_partitions(mut self, n: usize) -> Self {
        self.requested_partitions = Some(n);
        self
    }

    /// Supply a precomputed partition map. The partitioning pass then
    /// skips itself.
    #[must_use]
    pub fn with_partition_map(mut self, map: PartitionMap) -> Self {
        self.partition_map = Some(map);
        self
    }

    /// Insert a custom property.
    pub fn insert<T: Any + Send + Sync>(&mut self, value: T) {
        self.custom.insert(TypeId::of::<T>(), Box::new(value));
    }

    /// Get a custom property.
    pub fn get<T: Any>(&self) -> Option<&T> {
        self.custom
            .get(&TypeId::of::<T>())
            .and_then(|v| v.downcast_ref())
    }

    /// Get a mutable custom property.
    pub fn get_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.custom
            .get_mut(&TypeId::of::<T>())
            .and_then(|v| v.downcast_mut())
    }

    /// Remove a custom property.
    pub fn remove<T: Any>(&mut self) -> Option<T> {
        self.custom
            .remove(&TypeId::of::<T>())
            .and_then(|v| v.downcast().ok())
            .map(|v| *v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders() {
        let props = PropertySet::new()
            .with_partitions(3)
            .with_partition_map(PartitionMap::greedy(6, 3));
        assert_eq!(props.requested_partitions, Some(3));
        assert_eq!(props.partition_map.as_ref().unwrap().sizes(), vec![2, 2, 2]);
        assert!(props.rewrite_report.is_none());
    }

    #[test]
    fn test_custom_properties() {
        #[derive(Debug, PartialEq)]
        struct Counter(u32);

        let mut props = PropertySet::new();
        props.insert(Counter(1));
        props.get_mut::<Counter>().unwrap().0 += 1;
        assert_eq!(props.get::<Counter>(), Some(&Counter(2)));
        assert!(props.get::<String>().is_none());
    }
}
