//! Greedy contiguous partitioning of wires.

use serde::{Deserialize, Serialize};
use std::ops::Range;
use tracing::warn;

use qsplit_ir::{CircuitDocument, WireId};

/// Assign `num_wires` wires to `num_partitions` contiguous blocks.
///
/// Block sizes differ by at most one; the first `num_wires % n` partitions
/// get the extra wire. A request of zero partitions is treated as one.
/// Requests larger than `num_wires` are not capped here, so trailing
/// partitions may be empty. Use [`PartitionMap::for_wires`] for the clamped
/// variant.
pub fn greedy_partition(num_wires: usize, num_partitions: usize) -> Vec<usize> {
    let n = num_partitions.max(1);
    let base = num_wires / n;
    let mut remainder = num_wires % n;

    let mut assignment = Vec::with_capacity(num_wires);
    for p in 0..n {
        let size = base + usize::from(remainder > 0);
        remainder = remainder.saturating_sub(1);
        assignment.extend(std::iter::repeat_n(p, size));
    }
    assignment
}

/// Number of leading wires that are not ancillas.
///
/// Ancillas are only ever appended, so the lowest link wire of any
/// placeholder marks the first ancilla.
pub fn data_wire_count(doc: &CircuitDocument) -> usize {
    doc.placements()
        .filter_map(|p| p.gate.non_local_payload())
        .flat_map(|nl| nl.link)
        .map(WireId::index)
        .min()
        .map_or(doc.num_wires(), |first| first.min(doc.num_wires()))
}

/// A mapping from wire to partition id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionMap {
    assignment: Vec<usize>,
    num_partitions: usize,
}

impl PartitionMap {
    /// The raw greedy split, without capping the partition count.
    pub fn greedy(num_wires: usize, num_partitions: usize) -> Self {
        Self {
            assignment: greedy_partition(num_wires, num_partitions),
            num_partitions: num_partitions.max(1),
        }
    }

    /// The greedy split with the partition count clamped to `1..=num_wires`.
    ///
    /// Every partition of the result is non-empty whenever there is at least
    /// one wire.
    pub fn for_wires(num_wires: usize, requested: usize) -> Self {
        let clamped = requested.clamp(1, num_wires.max(1));
        if clamped != requested {
            warn!(
                "Requested {requested} partitions for {num_wires} wires; using {clamped}"
            );
        }
        Self::greedy(num_wires, clamped)
    }

    /// The clamped split over a document's data wires.
    ///
    /// Ancilla wires appended by an earlier rewrite are left out of the map,
    /// so re-partitioning a rewritten document assigns the original wires
    /// exactly as before.
    pub fn for_document(doc: &CircuitDocument, requested: usize) -> Self {
        Self::for_wires(data_wire_count(doc), requested)
    }

    /// Partition of `wire`, or `None` for wires the map does not cover.
    #[inline]
    pub fn partition_of(&self, wire: usize) -> Option<usize> {
        self.assignment.get(wire).copied()
    }

    /// Number of partitions.
    pub fn num_partitions(&self) -> usize {
        self.num_partitions
    }

    /// Number of wires covered.
    pub fn num_wires(&self) -> usize {
        self.assignment.len()
    }

    /// The per-wire assignment.
    pub fn assignment(&self) -> &[usize] {
        &self.assignment
    }

    /// Number of wires in each partition.
    pub fn sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.num_partitions];
        for &p in &self.assignment {
            sizes[p] += 1;
        }
        sizes
    }

    /// The contiguous wire range of partition `p`.
    pub fn wires_in(&self, p: usize) -> Range<usize> {
        let start = self.assignment.partition_point(|&q| q < p);
        let end = self.assignment.partition_point(|&q| q <= p);
        start..end
    }

    /// The ordered partition pair if `a` and `b` are both mapped and lie in
    /// different partitions.
    pub fn crossing(&self, a: usize, b: usize) -> Option<(usize, usize)> {
        let (pa, pb) = (self.partition_of(a)?, self.partition_of(b)?);
        (pa != pb).then(|| (pa.min(pb), pa.max(pb)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_even_split() {
        assert_eq!(greedy_partition(4, 2), vec![0, 0, 1, 1]);
    }

    #[test]
    fn test_remainder_goes_first() {
        assert_eq!(greedy_partition(7, 3), vec![0, 0, 0, 1, 1, 2, 2]);
    }

    #[test]
    fn test_zero_partitions_is_one() {
        assert_eq!(greedy_partition(3, 0), vec![0, 0, 0]);
        assert_eq!(PartitionMap::greedy(3, 0).num_partitions(), 1);
    }

    #[test]
    fn test_raw_split_is_not_capped() {
        let map = PartitionMap::greedy(2, 4);
        assert_eq!(map.assignment(), &[0, 1]);
        assert_eq!(map.sizes(), vec![1, 1, 0, 0]);
    }

    #[test]
    fn test_for_wires_clamps() {
        let map = PartitionMap::for_wires(3, 10);
        assert_eq!(map.num_partitions(), 3);
        assert_eq!(map.sizes(), vec![1, 1, 1]);

        let map = PartitionMap::for_wires(0, 2);
        assert_eq!(map.num_partitions(), 1);
        assert_eq!(map.num_wires(), 0);
    }

    #[test]
    fn test_wires_in() {
        let map = PartitionMap::greedy(7, 3);
        assert_eq!(map.wires_in(0), 0..3);
        assert_eq!(map.wires_in(1), 3..5);
        assert_eq!(map.wires_in(2), 5..7);
    }

    #[test]
    fn test_crossing() {
        let map = PartitionMap::greedy(4, 2);
        assert_eq!(map.crossing(0, 1), None);
        assert_eq!(map.crossing(3, 0), Some((0, 1)));
        assert_eq!(map.crossing(0, 9), None);
    }

    #[test]
    fn test_for_document_skips_ancillas() {
        use crate::rewrite::rewrite_cross_partition;
        use qsplit_ir::catalog;

        let mut doc = CircuitDocument::new(4);
        doc.place(0, 0, catalog::control()).unwrap();
        doc.place(0, 2, catalog::x()).unwrap();
        assert_eq!(data_wire_count(&doc), 4);

        let (out, _) = rewrite_cross_partition(&doc, &PartitionMap::greedy(4, 2)).unwrap();
        assert_eq!(out.num_wires(), 6);
        assert_eq!(data_wire_count(&out), 4);

        let map = PartitionMap::for_document(&out, 2);
        assert_eq!(map.assignment(), &[0, 0, 1, 1]);
        assert_eq!(map.partition_of(4), None);
    }
}
