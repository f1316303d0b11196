//! Cross-partition rewriting.
//!
//! Every CNOT- or CZ-shaped gate whose two wires fall in different
//! partitions is replaced by a non-local placeholder with the same 4x4
//! unitary. Each distinct pair of partitions that needs one gets a pair of
//! ancilla wires appended below the original wires.
//!
//! Two shapes are recognized:
//!
//! - a two-row gate tagged with a [`TwoQubitKind`], in a column without
//!   controls;
//! - a column holding exactly one control and exactly one effectful cell,
//!   which is the plain `X` (CNOT) or `Z` (CZ) gate.
//!
//! Wires outside the partition map are treated as local, so a document
//! that was already rewritten with the same map is left unchanged.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, info, instrument};

use qsplit_ir::{CircuitDocument, Column, Gate, GateRole, NonLocalGate, TwoQubitKind, WireId};

use crate::error::CompileResult;
use crate::partition::PartitionMap;

/// An unordered pair of partitions, stored as `(low, high)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PartitionPair {
    /// The smaller partition id.
    pub low: usize,
    /// The larger partition id.
    pub high: usize,
}

impl PartitionPair {
    /// Normalize `(a, b)` into a pair.
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            low: a.min(b),
            high: a.max(b),
        }
    }
}

impl std::fmt::Display for PartitionPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.low, self.high)
    }
}

/// Two ancilla wires reserved for one partition pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AncillaLink {
    /// The partitions this link connects.
    pub pair: PartitionPair,
    /// First ancilla wire.
    pub a: WireId,
    /// Second ancilla wire.
    pub b: WireId,
}

/// A recognized cross-partition gate in the input document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossPartitionSite {
    /// Column of the gate.
    pub column: usize,
    /// Which primitive was found.
    pub kind: TwoQubitKind,
    /// Control (or upper) wire.
    pub source: WireId,
    /// Target wire.
    pub target: WireId,
    /// Partitions of the two wires.
    pub pair: PartitionPair,
    /// Rows cleared before the placeholder is written.
    pub rows: Vec<usize>,
}

/// What a rewrite did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteReport {
    /// Wire count before ancillas were appended.
    pub original_wires: usize,
    /// Allocated links, in partition-pair order.
    pub links: Vec<AncillaLink>,
    /// Rewritten sites, in column order.
    pub sites: Vec<CrossPartitionSite>,
}

impl RewriteReport {
    /// Whether nothing was rewritten.
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Number of ancilla wires appended.
    pub fn num_ancillas(&self) -> usize {
        self.links.len() * 2
    }

    /// The link for a partition pair.
    pub fn link_for(&self, pair: PartitionPair) -> Option<&AncillaLink> {
        self.links.iter().find(|l| l.pair == pair)
    }
}

/// Find every cross-partition CNOT/CZ in `doc`.
pub fn find_cross_partition_sites(
    doc: &CircuitDocument,
    map: &PartitionMap,
) -> Vec<CrossPartitionSite> {
    doc.columns()
        .iter()
        .enumerate()
        .flat_map(|(index, column)| column_sites(index, column, map))
        .collect()
}

fn column_sites(index: usize, column: &Column, map: &PartitionMap) -> Vec<CrossPartitionSite> {
    let controls: Vec<(usize, &Gate)> = column.gates().filter(|(_, g)| g.is_control()).collect();
    let payload: Vec<(usize, &Gate)> = column
        .gates()
        .filter(|(_, g)| !g.has_no_effect())
        .collect();

    let site = |kind: TwoQubitKind, source: usize, target: usize, rows: Vec<usize>| {
        map.crossing(source, target).map(|(lo, hi)| CrossPartitionSite {
            column: index,
            kind,
            source: WireId::from(source),
            target: WireId::from(target),
            pair: PartitionPair::new(lo, hi),
            rows,
        })
    };

    if controls.is_empty() {
        return payload
            .into_iter()
            .filter(|(_, g)| matches!(g.role, GateRole::Unitary) && g.height == 2)
            .filter_map(|(row, g)| {
                g.two_qubit_kind
                    .and_then(|kind| site(kind, row, row + 1, vec![row, row + 1]))
            })
            .collect();
    }

    match (controls.as_slice(), payload.as_slice()) {
        ([(control, c)], [(target, g)]) if c.control_bit() == Some(true) => {
            let kind = if g.is_plain_not() {
                TwoQubitKind::ControlledX
            } else if g.is_plain_z() {
                TwoQubitKind::ControlledZ
            } else {
                return vec![];
            };
            site(kind, *control, *target, vec![*control, *target])
                .into_iter()
                .collect()
        }
        _ => vec![],
    }
}

/// Replace cross-partition CNOT/CZ gates with non-local placeholders.
///
/// Returns a new document with two ancilla wires appended per distinct
/// partition pair, plus a report of what was done. The input is not
/// modified.
#[instrument(skip(doc, map), fields(wires = doc.num_wires(), partitions = map.num_partitions()))]
pub fn rewrite_cross_partition(
    doc: &CircuitDocument,
    map: &PartitionMap,
) -> CompileResult<(CircuitDocument, RewriteReport)> {
    let sites = find_cross_partition_sites(doc, map);
    let pairs: BTreeSet<PartitionPair> = sites.iter().map(|s| s.pair).collect();

    let mut out = doc.clone();
    let ancillas = out.append_wires(pairs.len() * 2);
    let links: Vec<AncillaLink> = pairs
        .into_iter()
        .zip(ancillas.step_by(2))
        .map(|(pair, a)| AncillaLink {
            pair,
            a: WireId::from(a),
            b: WireId::from(a + 1),
        })
        .collect();
    for link in &links {
        debug!("Link {}: ancillas {} and {}", link.pair, link.a, link.b);
    }

    for site in &sites {
        let Some(link) = links.iter().find(|l| l.pair == site.pair) else {
            continue;
        };
        let top = site.source.min(site.target).index();

        for &row in &site.rows {
            out.clear(site.column, row);
        }
        let placeholder = Gate::non_local(
            format!("{}{}_{}", site.kind.placeholder_prefix(), site.column, top),
            NonLocalGate {
                kind: site.kind,
                source: site.source,
                target: site.target,
                link: [link.a, link.b],
            },
        );
        debug!(
            "Column {}: {} replaced by {}",
            site.column, site.pair, placeholder.title
        );
        out.place(site.column, top, placeholder)?;
    }

    info!(
        "Rewrote {} cross-partition gates using {} ancilla pairs",
        sites.len(),
        links.len()
    );

    let report = RewriteReport {
        original_wires: doc.num_wires(),
        links,
        sites,
    };
    Ok((out, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use qsplit_ir::{catalog, matrix};

    fn cx_doc() -> CircuitDocument {
        let mut doc = CircuitDocument::new(4);
        doc.place(0, 0, catalog::control()).unwrap();
        doc.place(0, 2, catalog::x()).unwrap();
        doc
    }

    #[test]
    fn test_control_column_site() {
        let map = PartitionMap::greedy(4, 2);
        let sites = find_cross_partition_sites(&cx_doc(), &map);
        assert_eq!(sites.len(), 1);
        assert_eq!(sites[0].kind, TwoQubitKind::ControlledX);
        assert_eq!(sites[0].source, WireId(0));
        assert_eq!(sites[0].target, WireId(2));
        assert_eq!(sites[0].pair, PartitionPair::new(1, 0));
    }

    #[test]
    fn test_local_gate_is_not_a_site() {
        let map = PartitionMap::greedy(4, 1);
        assert!(find_cross_partition_sites(&cx_doc(), &map).is_empty());
    }

    #[test]
    fn test_anti_control_is_not_a_site() {
        let mut doc = CircuitDocument::new(4);
        doc.place(0, 0, catalog::anti_control()).unwrap();
        doc.place(0, 3, catalog::z()).unwrap();
        let map = PartitionMap::greedy(4, 2);
        assert!(find_cross_partition_sites(&doc, &map).is_empty());
    }

    #[test]
    fn test_extra_payload_is_not_a_site() {
        let mut doc = cx_doc();
        doc.place(0, 3, catalog::h()).unwrap();
        let map = PartitionMap::greedy(4, 2);
        assert!(find_cross_partition_sites(&doc, &map).is_empty());
    }

    #[test]
    fn test_controlled_tall_gate_is_not_a_site() {
        let mut doc = CircuitDocument::new(4);
        doc.place(0, 0, catalog::control()).unwrap();
        doc.place(0, 1, catalog::cnot()).unwrap();
        let map = PartitionMap::greedy(4, 2);
        assert!(find_cross_partition_sites(&doc, &map).is_empty());
    }

    #[test]
    fn test_rewrite_control_column() {
        let doc = cx_doc();
        let map = PartitionMap::greedy(4, 2);
        let (out, report) = rewrite_cross_partition(&doc, &map).unwrap();

        assert_eq!(out.num_wires(), 6);
        assert_eq!(report.original_wires, 4);
        assert_eq!(report.num_ancillas(), 2);
        assert_eq!(report.links[0].a, WireId(4));
        assert_eq!(report.links[0].b, WireId(5));

        let col = &out.columns()[0];
        let gate = col.get(0).unwrap();
        let nl = gate.non_local_payload().unwrap();
        assert_eq!(gate.id, "~nlcx_0_0");
        assert_eq!(gate.title, "NL-CNOT(0→2)");
        assert_eq!((nl.source, nl.target), (WireId(0), WireId(2)));
        assert_eq!(nl.link, [WireId(4), WireId(5)]);
        assert!(col.get(2).is_none());
        assert_eq!(out.num_gates(), 1);
        out.validate().unwrap();

        // The input snapshot is untouched.
        assert_eq!(doc, cx_doc());
    }

    #[test]
    fn test_rewrite_tall_cz() {
        let mut doc = CircuitDocument::new(4);
        doc.place(0, 1, catalog::cz()).unwrap();
        let map = PartitionMap::greedy(4, 2);
        let (out, report) = rewrite_cross_partition(&doc, &map).unwrap();

        let gate = out.columns()[0].get(1).unwrap();
        assert_eq!(gate.id, "~nlcz_0_1");
        assert_eq!(gate.title, "NL-CZ(1,2)");
        assert_eq!(gate.matrix, catalog::cz().matrix);
        assert_eq!(report.sites[0].rows, vec![1, 2]);
    }

    #[test]
    fn test_unitary_preserved_for_control_column() {
        let mut doc = CircuitDocument::new(2);
        doc.place(0, 1, catalog::control()).unwrap();
        doc.place(0, 0, catalog::z()).unwrap();
        let map = PartitionMap::greedy(2, 2);
        let (out, _) = rewrite_cross_partition(&doc, &map).unwrap();

        let gate = out.columns()[0].get(0).unwrap();
        let expected = matrix::controlled(&matrix::pauli_z());
        assert!(matrix::approx_eq(gate.matrix.as_ref().unwrap(), &expected));
        let nl = gate.non_local_payload().unwrap();
        assert_eq!((nl.source, nl.target), (WireId(1), WireId(0)));
    }

    #[test]
    fn test_one_link_per_pair() {
        let mut doc = CircuitDocument::new(6);
        doc.place(0, 1, catalog::cnot()).unwrap();
        doc.place(1, 0, catalog::control()).unwrap();
        doc.place(1, 3, catalog::x()).unwrap();
        doc.place(2, 3, catalog::cz()).unwrap();
        let map = PartitionMap::greedy(6, 3);

        let (out, report) = rewrite_cross_partition(&doc, &map).unwrap();
        assert_eq!(report.sites.len(), 3);
        let pairs: Vec<_> = report.links.iter().map(|l| l.pair).collect();
        assert_eq!(pairs, vec![PartitionPair::new(0, 1), PartitionPair::new(1, 2)]);
        assert_eq!(out.num_wires(), 10);
        assert_eq!(report.links[1].a, WireId(8));
    }

    #[test]
    fn test_no_sites_leaves_document_equal() {
        let mut doc = CircuitDocument::new(3);
        doc.place(0, 0, catalog::h()).unwrap();
        let map = PartitionMap::greedy(3, 3);
        let (out, report) = rewrite_cross_partition(&doc, &map).unwrap();
        assert_eq!(out, doc);
        assert!(report.is_empty());
    }

    #[test]
    fn test_rewrite_is_idempotent() {
        let map = PartitionMap::greedy(4, 2);
        let (once, _) = rewrite_cross_partition(&cx_doc(), &map).unwrap();
        let (twice, report) = rewrite_cross_partition(&once, &map).unwrap();
        assert_eq!(once, twice);
        assert!(report.is_empty());
    }
}
