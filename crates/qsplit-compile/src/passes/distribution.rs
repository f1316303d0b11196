//! Cross-partition rewrite pass.

use qsplit_ir::CircuitDocument;

use crate::error::{CompileError, CompileResult};
use crate::pass::{Pass, PassKind};
use crate::property::PropertySet;
use crate::rewrite::rewrite_cross_partition;

/// Replaces cross-partition CNOT/CZ gates with non-local placeholders.
///
/// Requires a partition map in the property set and stores the
/// [`RewriteReport`](crate::RewriteReport) it produces.
pub struct CrossPartitionRewrite;

impl Pass for CrossPartitionRewrite {
    fn name(&self) -> &'static str {
        "CrossPartitionRewrite"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    fn run(&self, doc: &mut CircuitDocument, properties: &mut PropertySet) -> CompileResult<()> {
        let map = properties
            .partition_map
            .as_ref()
            .ok_or(CompileError::MissingPartitionMap)?;

        let (rewritten, report) = rewrite_cross_partition(doc, map)?;
        *doc = rewritten;
        properties.rewrite_report = Some(report);
        Ok(())
    }
}
