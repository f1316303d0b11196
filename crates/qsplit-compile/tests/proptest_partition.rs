//! Property-based tests for partitioning and cross-partition rewriting.

use proptest::prelude::*;
use qsplit_compile::{PartitionMap, distribute, greedy_partition, lower, rewrite_cross_partition};
use qsplit_ir::{CircuitDocument, catalog, matrix};

const IDS: [&str; 8] = ["•", "◦", "X", "Z", "H", "…", "CNOT", "CZ"];

fn arb_document() -> impl Strategy<Value = CircuitDocument> {
    (2..8usize).prop_flat_map(|num_wires| {
        prop::collection::vec(
            (0..5usize, 0..num_wires, prop::sample::select(IDS.to_vec())),
            0..24,
        )
        .prop_map(move |ops| {
            let mut doc = CircuitDocument::new(num_wires);
            for (column, row, id) in ops {
                if let Some(gate) = catalog::lookup(id) {
                    let _ = doc.place(column, row, gate);
                }
            }
            doc
        })
    })
}

fn arb_wires_and_partitions() -> impl Strategy<Value = (usize, usize)> {
    (1..64usize).prop_flat_map(|w| (Just(w), 1..=w))
}

proptest! {
    #[test]
    fn partition_covers_every_wire((wires, n) in arb_wires_and_partitions()) {
        let assignment = greedy_partition(wires, n);
        prop_assert_eq!(assignment.len(), wires);
        prop_assert!(assignment.windows(2).all(|w| w[0] <= w[1]));
        prop_assert_eq!(assignment.iter().max().copied(), Some(n - 1));
    }

    #[test]
    fn partition_sizes_are_balanced((wires, n) in arb_wires_and_partitions()) {
        let sizes = PartitionMap::greedy(wires, n).sizes();
        let min = sizes.iter().min().copied().unwrap_or(0);
        let max = sizes.iter().max().copied().unwrap_or(0);
        prop_assert!(max - min <= 1);
        prop_assert!(sizes.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn rewrite_is_idempotent(doc in arb_document(), n in 1..5usize) {
        let map = PartitionMap::for_document(&doc, n);
        let (once, _) = rewrite_cross_partition(&doc, &map).unwrap();
        let (twice, report) = rewrite_cross_partition(&once, &map).unwrap();
        prop_assert_eq!(twice, once);
        prop_assert_eq!(report.num_ancillas(), 0);
    }

    #[test]
    fn distribute_is_idempotent(doc in arb_document(), n in 1..5usize) {
        let once = distribute(&doc, n).unwrap();
        let twice = distribute(&once.document, n).unwrap();
        prop_assert!(twice.report.is_empty());
        prop_assert_eq!(twice.partition_map, once.partition_map);
        prop_assert_eq!(twice.document, once.document);
    }

    #[test]
    fn rewrite_only_appends_wires(doc in arb_document(), n in 1..5usize) {
        let map = PartitionMap::for_document(&doc, n);
        let (out, report) = rewrite_cross_partition(&doc, &map).unwrap();

        prop_assert_eq!(out.num_wires(), doc.num_wires() + report.num_ancillas());
        prop_assert!(out.validate().is_ok());
        let pairs: std::collections::BTreeSet<_> = report.links.iter().map(|l| l.pair).collect();
        prop_assert_eq!(pairs.len(), report.links.len());

        for placement in out.placements() {
            if let Some(nl) = placement.gate.non_local_payload() {
                let declared = placement.gate.matrix.as_ref().unwrap();
                prop_assert!(matrix::approx_eq(declared, &nl.kind.matrix()));
            }
        }
    }

    #[test]
    fn rewrite_preserves_lowerability(doc in arb_document(), n in 1..5usize) {
        let map = PartitionMap::for_document(&doc, n);
        let (out, _) = rewrite_cross_partition(&doc, &map).unwrap();
        if let Ok(before) = lower(&doc) {
            let after = lower(&out).unwrap();
            prop_assert_eq!(after.len(), before.len());
        }
    }
}
