//! One-call entry points over the pass pipeline.

use tracing::{info, instrument};

use qsplit_ir::{CircuitDocument, LoweredProgram};

use crate::error::{CompileError, CompileResult};
use crate::lower::lower;
use crate::manager::PassManagerBuilder;
use crate::partition::PartitionMap;
use crate::rewrite::RewriteReport;

/// Result of distributing a document over partitions.
#[derive(Debug, Clone)]
pub struct Distribution {
    /// The rewritten document, ancillas included.
    pub document: CircuitDocument,
    /// The partition map over the original wires.
    pub partition_map: PartitionMap,
    /// What the rewrite did.
    pub report: RewriteReport,
}

impl Distribution {
    /// Lower the rewritten document.
    pub fn lower(&self) -> CompileResult<LoweredProgram> {
        lower(&self.document)
    }
}

/// Partition `doc` into `partitions` blocks and rewrite cross-partition
/// gates, validating the result.
///
/// The partition count is clamped to the wire count.
#[instrument(skip(doc), fields(wires = doc.num_wires()))]
pub fn distribute(doc: &CircuitDocument, partitions: usize) -> CompileResult<Distribution> {
    let (pm, mut props) = PassManagerBuilder::new()
        .with_partitions(partitions)
        .build();

    let mut document = doc.clone();
    pm.run(&mut document, &mut props)?;

    let partition_map = props
        .partition_map
        .take()
        .ok_or(CompileError::MissingPartitionMap)?;
    let report = props.rewrite_report.take().ok_or_else(|| {
        CompileError::InvalidConfiguration("rewrite pass did not run".into())
    })?;

    info!(
        "Distributed over {} partitions: {} wires, {} placeholders",
        partition_map.num_partitions(),
        document.num_wires(),
        report.sites.len()
    );

    Ok(Distribution {
        document,
        partition_map,
        report,
    })
}
