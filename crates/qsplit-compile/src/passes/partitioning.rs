//! Partitioning pass.

use tracing::debug;

use qsplit_ir::CircuitDocument;

use crate::error::CompileResult;
use crate::partition::PartitionMap;
use crate::pass::{Pass, PassKind};
use crate::property::PropertySet;

/// Splits the document's wires into contiguous blocks.
///
/// Reads `requested_partitions`, clamps it to the wire count and stores the
/// resulting map. Skipped when a map is already present.
pub struct GreedyPartition;

impl Pass for GreedyPartition {
    fn name(&self) -> &'static str {
        "GreedyPartition"
    }

    fn kind(&self) -> PassKind {
        PassKind::Analysis
    }

    fn run(&self, doc: &mut CircuitDocument, properties: &mut PropertySet) -> CompileResult<()> {
        let requested = properties.requested_partitions.unwrap_or(1);
        let map = PartitionMap::for_document(doc, requested);
        debug!("Partition sizes: {:?}", map.sizes());
        properties.partition_map = Some(map);
        Ok(())
    }

    fn should_run(&self, _doc: &CircuitDocument, properties: &PropertySet) -> bool {
        properties.partition_map.is_none()
    }
}
