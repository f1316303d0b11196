//! Built-in passes.
//!
//! - [`GreedyPartition`]: assigns wires to partitions
//! - [`CrossPartitionRewrite`]: replaces cross-partition CNOT/CZ gates
//! - [`DocumentValidation`]: checks the rewritten document

mod distribution;
mod partitioning;
mod verification;

pub use distribution::CrossPartitionRewrite;
pub use partitioning::GreedyPartition;
pub use verification::{DocumentValidation, ValidationResult};
