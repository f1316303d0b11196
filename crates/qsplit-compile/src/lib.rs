//! qsplit Compilation Stages
//!
//! This crate turns a [`CircuitDocument`](qsplit_ir::CircuitDocument) into a
//! flat instruction stream and distributes it over contiguous groups of
//! wires.
//!
//! # Overview
//!
//! 1. **Lowering** ([`lower`]): resolves controls, anti-controls, paired swap
//!    halves and nested sub-circuits into a [`LoweredProgram`](qsplit_ir::LoweredProgram).
//! 2. **Partitioning** ([`greedy_partition`], [`PartitionMap`]): splits the
//!    wires into `N` near-equal contiguous blocks.
//! 3. **Cross-partition rewriting** ([`rewrite_cross_partition`]): replaces
//!    CNOT/CZ gates that straddle a block boundary with non-local
//!    placeholders and appends one ancilla pair per block pair.
//!
//! # Architecture
//!
//! ```text
//! CircuitDocument
//!       │
//!       ▼
//! ┌─────────────┐
//! │ PassManager │ ◄── PropertySet (requested partitions, partition map, report)
//! └─────────────┘
//!       │
//!       ├── GreedyPartition
//!       ├── CrossPartitionRewrite
//!       └── DocumentValidation
//!       │
//!       ▼
//! CircuitDocument (+ ancillas) ──► lower ──► LoweredProgram
//! ```
//!
//! # Example
//!
//! ```rust
//! use qsplit_compile::{distribute, lower};
//! use qsplit_ir::{catalog, CircuitDocument, OpCode};
//!
//! let mut doc = CircuitDocument::new(4);
//! doc.place(0, 0, catalog::control()).unwrap();
//! doc.place(0, 2, catalog::x()).unwrap();
//!
//! let program = lower(&doc).unwrap();
//! assert_eq!(program.instructions()[0].op, OpCode::Cx);
//!
//! let dist = distribute(&doc, 2).unwrap();
//! assert_eq!(dist.document.num_wires(), 6);
//! assert_eq!(dist.report.sites.len(), 1);
//! ```
//!
//! # Custom Passes
//!
//! ```rust
//! use qsplit_compile::{CompileResult, Pass, PassKind, PassManager, PropertySet};
//! use qsplit_ir::CircuitDocument;
//!
//! struct CountColumns;
//!
//! impl Pass for CountColumns {
//!     fn name(&self) -> &str { "count_columns" }
//!     fn kind(&self) -> PassKind { PassKind::Analysis }
//!
//!     fn run(&self, doc: &mut CircuitDocument, props: &mut PropertySet) -> CompileResult<()> {
//!         props.insert(doc.num_columns());
//!         Ok(())
//!     }
//! }
//!
//! let mut pm = PassManager::new();
//! pm.add_pass(CountColumns);
//! let mut props = PropertySet::new();
//! pm.run(&mut CircuitDocument::new(1), &mut props).unwrap();
//! assert_eq!(props.get::<usize>(), Some(&0));
//! ```

pub mod error;
pub mod lower;
pub mod manager;
pub mod partition;
pub mod pass;
pub mod pipeline;
pub mod property;
pub mod rewrite;

// Built-in passes
pub mod passes;

pub use error::{CompileError, CompileResult};
pub use lower::lower;
pub use manager::{PassManager, PassManagerBuilder};
pub use partition::{PartitionMap, data_wire_count, greedy_partition};
pub use pass::{Pass, PassKind};
pub use pipeline::{Distribution, distribute};
pub use property::PropertySet;
pub use rewrite::{
    AncillaLink, CrossPartitionSite, PartitionPair, RewriteReport, find_cross_partition_sites,
    rewrite_cross_partition,
};
