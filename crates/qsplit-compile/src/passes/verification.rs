//! Verification pass for rewritten documents.

use std::ops::Range;
use tracing::debug;

use qsplit_ir::{CircuitDocument, NonLocalGate, Placement, matrix};

use crate::error::{CompileError, CompileResult};
use crate::partition::{PartitionMap, data_wire_count};
use crate::pass::{Pass, PassKind};
use crate::property::PropertySet;

/// Result of document validation, stored as a custom property.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    /// Number of gates checked.
    pub gates_checked: usize,
    /// Number of non-local placeholders checked.
    pub placeholders_checked: usize,
}

/// Checks that the document is well formed and that every placeholder is
/// consistent with the rewrite that produced it.
///
/// For each placeholder: its matrix equals the primitive's unitary, its two
/// endpoints are distinct wires and its link wires are two distinct ancillas.
/// Placeholders created by this run's rewrite must use the link allocated
/// for their partition pair; placeholders from an earlier run only need
/// their links to lie among the ancillas. No other gate touches an ancilla
/// wire.
///
/// Ancillas are the wires past the partition map, or past
/// [`data_wire_count`] when no map is present.
pub struct DocumentValidation;

impl DocumentValidation {
    fn fail(&self, reason: impl Into<String>) -> CompileError {
        CompileError::PassFailed {
            name: self.name().to_string(),
            reason: reason.into(),
        }
    }

    fn check_placeholder(
        &self,
        placement: Placement<'_>,
        nl: &NonLocalGate,
        ancillas: &Range<usize>,
        properties: &PropertySet,
    ) -> CompileResult<()> {
        let gate = placement.gate;
        let id = &gate.id;
        if nl.source == nl.target {
            return Err(self.fail(format!("placeholder '{id}' has identical endpoints")));
        }
        if nl.link[0] == nl.link[1] {
            return Err(self.fail(format!("placeholder '{id}' has identical link wires")));
        }
        let expected = nl.kind.matrix();
        if !gate
            .matrix
            .as_ref()
            .is_some_and(|m| matrix::approx_eq(m, &expected))
        {
            return Err(self.fail(format!(
                "placeholder '{id}' does not carry the {} unitary",
                nl.kind.op()
            )));
        }
        if nl.link.iter().any(|w| !ancillas.contains(&w.index())) {
            return Err(self.fail(format!(
                "placeholder '{id}' links {} and {}, which are not ancilla wires",
                nl.link[0], nl.link[1]
            )));
        }

        let site = properties.rewrite_report.as_ref().and_then(|report| {
            report
                .sites
                .iter()
                .find(|s| {
                    s.column == placement.column && s.source == nl.source && s.target == nl.target
                })
                .map(|s| (report, s.pair))
        });
        if let Some((report, pair)) = site {
            let allocated = report.link_for(pair).is_some_and(|l| [l.a, l.b] == nl.link);
            if !allocated {
                return Err(self.fail(format!(
                    "placeholder '{id}' links {} and {}, which the rewrite did not allocate for {pair}",
                    nl.link[0], nl.link[1]
                )));
            }
        }
        Ok(())
    }
}

impl Pass for DocumentValidation {
    fn name(&self) -> &'static str {
        "DocumentValidation"
    }

    fn kind(&self) -> PassKind {
        PassKind::Analysis
    }

    fn run(&self, doc: &mut CircuitDocument, properties: &mut PropertySet) -> CompileResult<()> {
        doc.validate().map_err(|e| self.fail(e.to_string()))?;

        let first_ancilla = properties
            .partition_map
            .as_ref()
            .map_or_else(|| data_wire_count(doc), PartitionMap::num_wires);
        let ancillas = first_ancilla.min(doc.num_wires())..doc.num_wires();

        let mut result = ValidationResult::default();
        for placement in doc.placements() {
            let gate = placement.gate;
            result.gates_checked += 1;

            if let Some(nl) = gate.non_local_payload() {
                self.check_placeholder(placement, nl, &ancillas, properties)?;
                result.placeholders_checked += 1;
                continue;
            }

            let touched = gate.occupied_rows(placement.row);
            if let Some(row) = touched.into_iter().find(|r| ancillas.contains(r)) {
                return Err(self.fail(format!(
                    "gate '{}' at column {} touches ancilla wire {row}",
                    gate.id, placement.column
                )));
            }
        }

        debug!(
            "Document validation passed: {} gates, {} placeholders",
            result.gates_checked, result.placeholders_checked
        );
        properties.insert(result);
        Ok(())
    }
}
